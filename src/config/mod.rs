use serde::Deserialize;
use std::env;
use std::path::PathBuf;

// Главная структура конфигурации - контейнер для всех настроек
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub admin: AdminConfig,
    pub files: FilesConfig,
    pub snapshot: SnapshotConfig,
}

// Настройки приложения
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub rust_log: String,
}

// Учётная запись администратора
#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    pub login: String,
    /// bcrypt-хеш пароля; если не задан, сверяется открытый пароль.
    pub password_hash: Option<String>,
    pub password_plain: Option<String>,
}

// Хранение загруженных постеров
#[derive(Debug, Clone, Deserialize)]
pub struct FilesConfig {
    pub dir: PathBuf,
    /// Базовый URL, под которым раздаются файлы (/files).
    pub public_base_url: String,
}

// Снимок состояния на диске (необязательный кеш)
#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotConfig {
    pub path: Option<PathBuf>,
    pub flush_interval_secs: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Config {
            app: AppConfig {
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("PORT")
                    .unwrap_or_else(|_| "8000".to_string())
                    .parse()
                    .expect("PORT must be a valid number"),
                environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
                rust_log: env::var("RUST_LOG")
                    .unwrap_or_else(|_| "cinema_system=debug,tower_http=debug".to_string()),
            },
            admin: AdminConfig {
                login: env::var("ADMIN_LOGIN").unwrap_or_else(|_| "admin".to_string()),
                password_hash: env::var("ADMIN_PASSWORD_HASH").ok(),
                password_plain: Some(
                    env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin".to_string()),
                ),
            },
            files: FilesConfig {
                dir: env::var("FILES_DIR")
                    .unwrap_or_else(|_| "./files".to_string())
                    .into(),
                public_base_url: env::var("PUBLIC_BASE_URL")
                    .unwrap_or_else(|_| "/files".to_string()),
            },
            snapshot: SnapshotConfig {
                path: env::var("SNAPSHOT_PATH").ok().map(PathBuf::from),
                flush_interval_secs: env::var("SNAPSHOT_FLUSH_INTERVAL_SECS")
                    .unwrap_or_else(|_| "30".to_string())
                    .parse()
                    .expect("SNAPSHOT_FLUSH_INTERVAL_SECS must be a valid number"),
            },
        }
    }
}

impl AdminConfig {
    /// Проверка пароля: bcrypt-хеш, если задан, иначе открытое сравнение
    /// (режим для разработки, как и password_plain у пользователей).
    pub fn verify_password(&self, password: &str) -> bool {
        if let Some(ref hash) = self.password_hash {
            return bcrypt::verify(password, hash).unwrap_or(false);
        }
        match self.password_plain {
            Some(ref plain) => plain == password,
            None => false,
        }
    }
}
