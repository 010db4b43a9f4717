use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Seance {
    pub id: i64,
    pub seance_filmid: i64,
    pub seance_hallid: i64,
    /// Время начала в формате "HH:MM".
    pub seance_time: String,
}
