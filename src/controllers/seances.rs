use axum::{
    extract::{Multipart, Path, State},
    response::IntoResponse,
    routing::{delete, post},
    Router,
};
use serde_json::json;
use std::sync::Arc;

use crate::controllers::form::FormFields;
use crate::error::ApiError;
use crate::response::ok;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/seance", post(create_seance))
        .route("/seance/{id}", delete(delete_seance))
}

/* ---------- POST /seance ---------- */

async fn create_seance(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let form = FormFields::read(multipart).await?;
    let hall_id: i64 = form.parse("seanceHallid")?;
    let film_id: i64 = form.parse("seanceFilmid")?;
    let time = form.str("seanceTime")?.trim().to_string();

    // пересечения интервалов проверяет хранилище
    let seances = state.store.create_seance(hall_id, film_id, &time).await?;
    tracing::info!("seance added: hall {} film {} at {}", hall_id, film_id, time);
    Ok(ok(json!({ "seances": seances })))
}

/* ---------- DELETE /seance/{id} ---------- */

async fn delete_seance(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let seances = state.store.delete_seance(id).await?;
    tracing::info!("seance {} deleted", id);
    Ok(ok(json!({ "seances": seances })))
}
