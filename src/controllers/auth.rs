use axum::{extract::Multipart, extract::State, response::IntoResponse, routing::post, Router};
use std::sync::Arc;
use uuid::Uuid;

use crate::controllers::form::FormFields;
use crate::error::ApiError;
use crate::response::ok;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/login", post(login))
}

/// POST /login — вход администратора. При успехе возвращает
/// непрозрачный токен; клиент хранит его как флаг авторизации,
/// другие маршруты токен не проверяют.
async fn login(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let form = FormFields::read(multipart).await?;
    let login = form.str("login")?.trim();
    let password = form.str("password")?;

    let admin = &state.config.admin;
    if login != admin.login || !admin.verify_password(password) {
        tracing::warn!("failed admin login attempt for {login}");
        return Err(ApiError::Unauthorized("Неверный логин или пароль".to_string()));
    }

    tracing::info!("admin logged in");
    Ok(ok(Uuid::new_v4().to_string()))
}
