use axum::{
    extract::{Multipart, Path, State},
    response::IntoResponse,
    routing::{delete, post},
    Router,
};
use serde_json::json;
use std::sync::Arc;
use validator::Validate;

use crate::controllers::form::{validate_dto, FormFields};
use crate::error::ApiError;
use crate::models::SeatType;
use crate::response::ok;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/hall", post(create_hall))
        .route("/hall/{id}", post(update_hall_layout))
        .route("/hall/{id}", delete(delete_hall))
        .route("/price/{id}", post(set_prices))
        .route("/open/{id}", post(set_open))
}

/* ---------- POST /hall ---------- */

#[derive(Debug, Validate)]
struct CreateHallRequest {
    #[validate(length(min = 1, message = "Название зала не может быть пустым"))]
    hall_name: String,
}

async fn create_hall(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let form = FormFields::read(multipart).await?;
    let req = CreateHallRequest {
        hall_name: form.str("hallName")?.trim().to_string(),
    };
    validate_dto(&req)?;

    let halls = state.store.create_hall(&req.hall_name).await;
    tracing::info!("hall created: {}", req.hall_name);
    Ok(ok(json!({ "halls": halls })))
}

/* ---------- POST /hall/{id} (схема зала) ---------- */

// границы совпадают с hall::MAX_ROWS / hall::MAX_PLACES
#[derive(Debug, Validate)]
struct LayoutRequest {
    #[validate(range(min = 1, max = 20, message = "Недопустимое количество рядов"))]
    rows: u32,
    #[validate(range(min = 1, max = 30, message = "Недопустимое количество мест в ряду"))]
    places: u32,
}

async fn update_hall_layout(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let form = FormFields::read(multipart).await?;
    let req = LayoutRequest {
        rows: form.parse("rowCount")?,
        places: form.parse("placeCount")?,
    };
    validate_dto(&req)?;

    // схема приходит сериализованным JSON-полем формы
    let config: Vec<Vec<SeatType>> = serde_json::from_str(form.str("config")?)
        .map_err(|_| ApiError::BadRequest("Некорректная схема зала".to_string()))?;

    let halls = state
        .store
        .update_hall_layout(id, req.rows, req.places, config)
        .await?;
    Ok(ok(json!({ "halls": halls })))
}

/* ---------- DELETE /hall/{id} ---------- */

async fn delete_hall(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let (halls, seances) = state.store.delete_hall(id).await?;
    tracing::info!("hall {} deleted", id);
    Ok(ok(json!({ "halls": halls, "seances": seances })))
}

/* ---------- POST /price/{id} ---------- */

#[derive(Debug, Validate)]
struct PricesRequest {
    #[validate(range(min = 1, max = 100_000, message = "Недопустимая цена обычного места"))]
    standart: u32,
    #[validate(range(min = 1, max = 100_000, message = "Недопустимая цена VIP места"))]
    vip: u32,
}

async fn set_prices(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let form = FormFields::read(multipart).await?;
    let req = PricesRequest {
        standart: form.parse("priceStandart")?,
        vip: form.parse("priceVip")?,
    };
    validate_dto(&req)?;

    let hall = state.store.set_prices(id, req.standart, req.vip).await?;
    Ok(ok(hall))
}

/* ---------- POST /open/{id} ---------- */

async fn set_open(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let form = FormFields::read(multipart).await?;
    let open = match form.str("hallOpen")?.trim() {
        "0" => false,
        "1" => true,
        _ => return Err(ApiError::BadRequest("hallOpen должен быть 0 или 1".to_string())),
    };

    let hall = state.store.set_open(id, open).await?;
    tracing::info!("hall {} sales {}", id, if open { "opened" } else { "closed" });
    Ok(ok(hall))
}
