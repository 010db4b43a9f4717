pub mod auth;
pub mod data;
pub mod films;
pub mod form;
pub mod halls;
pub mod seances;
pub mod tickets;

use axum::Router;
use std::sync::Arc;

pub fn routes() -> Router<Arc<crate::AppState>> {
    Router::new()
        .merge(data::routes())
        .merge(halls::routes())
        .merge(films::routes())
        .merge(seances::routes())
        .merge(tickets::routes())
        .merge(auth::routes())
}
