use axum::{
    extract::{Multipart, Path, State},
    response::IntoResponse,
    routing::{delete, post},
    Router,
};
use serde_json::json;
use std::path::Path as FsPath;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::controllers::form::{validate_dto, FormFields, UploadedFile};
use crate::error::ApiError;
use crate::models::film::NewFilm;
use crate::response::ok;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/film", post(create_film))
        .route("/film/{id}", delete(delete_film))
}

#[derive(Debug, Validate)]
struct CreateFilmRequest {
    #[validate(length(min = 1, message = "Название фильма не может быть пустым"))]
    name: String,
    // 1440 минут — сутки; более длинный фильм не влезает в расписание дня
    #[validate(range(min = 1, max = 1440, message = "Недопустимая продолжительность фильма"))]
    duration: u32,
}

/* ---------- POST /film ---------- */

async fn create_film(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let form = FormFields::read(multipart).await?;
    let req = CreateFilmRequest {
        name: form.str("filmName")?.trim().to_string(),
        duration: form.parse("filmDuration")?,
    };
    validate_dto(&req)?;

    let poster = match form.file("filePoster") {
        Some(file) => save_poster(&state, file).await?,
        None => String::new(),
    };

    let films = state
        .store
        .create_film(NewFilm {
            name: req.name.clone(),
            duration: req.duration,
            origin: form.str_or_default("filmOrigin").to_string(),
            poster,
            description: form.str_or_default("filmDescription").to_string(),
        })
        .await;

    tracing::info!("film created: {} ({} min)", req.name, req.duration);
    Ok(ok(json!({ "films": films })))
}

/// Кладёт постер в каталог файлов под случайным именем и возвращает
/// публичный URL. Расширение берётся из имени исходного файла.
async fn save_poster(state: &AppState, file: &UploadedFile) -> Result<String, ApiError> {
    let ext = FsPath::new(&file.file_name)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("img");
    let name = format!("{}.{}", Uuid::new_v4(), ext);
    let dest = state.config.files.dir.join(&name);

    tokio::fs::create_dir_all(&state.config.files.dir)
        .await
        .map_err(|e| ApiError::Internal(format!("Не удалось создать каталог файлов: {e}")))?;
    tokio::fs::write(&dest, &file.bytes)
        .await
        .map_err(|e| ApiError::Internal(format!("Не удалось сохранить постер: {e}")))?;

    let base = state.config.files.public_base_url.trim_end_matches('/');
    Ok(format!("{base}/{name}"))
}

/* ---------- DELETE /film/{id} ---------- */

async fn delete_film(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let films = state.store.delete_film(id).await?;
    tracing::info!("film {} deleted", id);
    Ok(ok(json!({ "films": films })))
}
