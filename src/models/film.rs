use serde::{Deserialize, Serialize};

/// Данные нового фильма из формы админки.
#[derive(Debug, Clone)]
pub struct NewFilm {
    pub name: String,
    pub duration: u32,
    pub origin: String,
    pub poster: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Film {
    pub id: i64,
    pub film_name: String,
    /// Продолжительность в минутах.
    pub film_duration: u32,
    pub film_origin: String,
    /// Публичный URL постера (пустая строка, если постер не загружен).
    pub film_poster: String,
    pub film_description: String,
}
