use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Ошибки доменного слоя (хранилища).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Зал не найден")]
    HallNotFound,
    #[error("Фильм не найден")]
    FilmNotFound,
    #[error("Сеанс не найден")]
    SeanceNotFound,
    #[error("Сеанс пересекается с другим показом")]
    SeanceOverlap,
    #[error("Нельзя удалить фильм — есть активные сеансы")]
    FilmHasSeances,
    #[error("Продажи в этом зале закрыты")]
    SalesClosed,
    #[error("Место уже занято")]
    SeatTaken,
    #[error("{0}")]
    InvalidInput(String),
}

/// Ошибка уровня API. Любой вариант сериализуется в конверт
/// `{"success": false, "error": "..."}` с соответствующим статусом.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if matches!(self, ApiError::Internal(_)) {
            tracing::error!("internal error: {}", self);
        }
        let body = Json(json!({
            "success": false,
            "error": self.to_string(),
        }));
        (self.status(), body).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        let msg = err.to_string();
        match err {
            StoreError::HallNotFound | StoreError::FilmNotFound | StoreError::SeanceNotFound => {
                ApiError::NotFound(msg)
            }
            StoreError::SeanceOverlap
            | StoreError::FilmHasSeances
            | StoreError::SalesClosed
            | StoreError::SeatTaken => ApiError::Conflict(msg),
            StoreError::InvalidInput(_) => ApiError::BadRequest(msg),
        }
    }
}
