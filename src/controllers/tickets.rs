use axum::{
    extract::{Multipart, State},
    response::IntoResponse,
    routing::post,
    Router,
};
use chrono::NaiveDate;
use std::sync::Arc;

use crate::controllers::form::FormFields;
use crate::error::ApiError;
use crate::models::ticket::{booking_qr_payload, total_cost, SeatChoice};
use crate::response::ok;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/ticket", post(book_tickets))
}

/// POST /ticket — бронирование выбранных мест на сеанс и дату.
/// Поле `tickets` — JSON-массив `{row, place, coast}`; цены клиент
/// присылает справочно, сервер пересчитывает их по залу.
async fn book_tickets(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let form = FormFields::read(multipart).await?;
    let seance_id: i64 = form.parse("seanceId")?;
    let date = NaiveDate::parse_from_str(form.str("ticketDate")?.trim(), "%Y-%m-%d")
        .map_err(|_| ApiError::BadRequest("Дата должна быть в формате YYYY-MM-DD".to_string()))?;
    let seats: Vec<SeatChoice> = serde_json::from_str(form.str("tickets")?)
        .map_err(|_| ApiError::BadRequest("Некорректный список мест".to_string()))?;

    let tickets = state.store.book_tickets(seance_id, date, &seats).await?;

    tracing::info!(
        "booking confirmed: seance {} on {}, {} seats, total {}",
        seance_id,
        date,
        tickets.len(),
        total_cost(&tickets)
    );
    tracing::debug!("qr payload:\n{}", booking_qr_payload(&tickets));

    Ok(ok(tickets))
}
