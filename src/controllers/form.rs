use crate::error::ApiError;
use axum::extract::Multipart;
use std::collections::HashMap;
use std::str::FromStr;
use validator::Validate;

/// Файл, пришедший в multipart-форме.
#[derive(Debug)]
pub struct UploadedFile {
    pub field: String,
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Разобранная multipart-форма: текстовые поля плюс файлы.
/// Клиент шлёт все мутации как FormData, поэтому разбор общий.
#[derive(Debug, Default)]
pub struct FormFields {
    values: HashMap<String, String>,
    files: Vec<UploadedFile>,
}

impl FormFields {
    pub async fn read(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = FormFields::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Некорректная форма: {e}")))?
        {
            let name = field.name().unwrap_or_default().to_string();
            let file_name = field.file_name().map(str::to_string);
            match file_name {
                Some(file_name) if !file_name.is_empty() => {
                    let content_type = field.content_type().map(str::to_string);
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| ApiError::BadRequest(format!("Ошибка чтения файла: {e}")))?
                        .to_vec();
                    form.files.push(UploadedFile {
                        field: name,
                        file_name,
                        content_type,
                        bytes,
                    });
                }
                _ => {
                    let text = field
                        .text()
                        .await
                        .map_err(|e| ApiError::BadRequest(format!("Ошибка чтения поля: {e}")))?;
                    form.values.insert(name, text);
                }
            }
        }
        Ok(form)
    }

    /// Обязательное текстовое поле.
    pub fn str(&self, key: &str) -> Result<&str, ApiError> {
        self.values
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| ApiError::BadRequest(format!("Не заполнено поле {key}")))
    }

    /// Необязательное текстовое поле, пустая строка по умолчанию.
    pub fn str_or_default(&self, key: &str) -> &str {
        self.values.get(key).map(String::as_str).unwrap_or_default()
    }

    /// Обязательное поле, разбираемое из строки (числа, флаги).
    pub fn parse<T: FromStr>(&self, key: &str) -> Result<T, ApiError> {
        self.str(key)?
            .trim()
            .parse()
            .map_err(|_| ApiError::BadRequest(format!("Некорректное значение поля {key}")))
    }

    pub fn file(&self, field: &str) -> Option<&UploadedFile> {
        self.files.iter().find(|f| f.field == field)
    }
}

/// Прогоняет DTO через validator и сворачивает первую ошибку
/// в сообщение для клиента.
pub fn validate_dto<T: Validate>(dto: &T) -> Result<(), ApiError> {
    dto.validate().map_err(|errors| {
        let msg = errors
            .field_errors()
            .into_iter()
            .flat_map(|(_, errs)| errs.iter())
            .find_map(|e| e.message.as_ref().map(ToString::to_string))
            .unwrap_or_else(|| "Некорректные данные формы".to_string());
        ApiError::BadRequest(msg)
    })
}
