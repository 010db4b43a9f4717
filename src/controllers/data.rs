use axum::{
    extract::{Query, State},
    response::IntoResponse,
    routing::get,
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;

use crate::error::ApiError;
use crate::response::ok;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/alldata", get(all_data))
        .route("/hallconfig", get(hall_config))
}

/// GET /alldata — полный снимок залов, фильмов и сеансов.
/// Клиент целиком заменяет им своё состояние при каждой загрузке.
async fn all_data(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    ok(state.store.all_data().await)
}

#[derive(Debug, Deserialize)]
struct HallConfigQuery {
    #[serde(rename = "seanceId")]
    seance_id: i64,
    date: String,
}

/// GET /hallconfig?seanceId&date — схема зала сеанса с занятостью на дату.
async fn hall_config(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HallConfigQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let date = NaiveDate::parse_from_str(&params.date, "%Y-%m-%d")
        .map_err(|_| ApiError::BadRequest("Дата должна быть в формате YYYY-MM-DD".to_string()))?;
    let grid = state.store.hall_config(params.seance_id, date).await?;
    Ok(ok(grid))
}
