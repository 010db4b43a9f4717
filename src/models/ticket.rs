use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Купленный билет: место на конкретный сеанс и дату плюс
/// производные поля для подтверждения брони.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    pub id: i64,
    pub ticket_seanceid: i64,
    pub ticket_date: NaiveDate,
    pub ticket_time: String,
    /// Ряд и место, нумерация с нуля (как в схеме зала).
    pub ticket_row: u32,
    pub ticket_place: u32,
    pub ticket_coast: u32,
    pub ticket_filmname: String,
    pub ticket_hallname: String,
}

/// Выбранное место из поля `tickets` формы бронирования.
/// `coast` присылается клиентом, но цена всегда выводится из зала.
#[derive(Debug, Clone, Deserialize)]
pub struct SeatChoice {
    pub row: u32,
    pub place: u32,
    #[serde(default)]
    pub coast: u32,
}

/// Суммарная стоимость брони. Не переполняется и на предельных ценах.
pub fn total_cost(tickets: &[Ticket]) -> u32 {
    tickets
        .iter()
        .fold(0u32, |acc, t| acc.saturating_add(t.ticket_coast))
}

/// Текст для QR-кода подтверждения: построчная конкатенация полей
/// билетов одной брони. Ряды и места в тексте нумеруются с единицы.
pub fn booking_qr_payload(tickets: &[Ticket]) -> String {
    let Some(first) = tickets.first() else {
        return String::new();
    };

    let mut lines = vec![
        format!("Дата Время: {} {}", first.ticket_date, first.ticket_time),
        format!("Название фильма: {}", first.ticket_filmname),
        format!("Зал: {}", first.ticket_hallname),
    ];
    for (i, t) in tickets.iter().enumerate() {
        lines.push(format!(
            "Место {}: Ряд {}, Место {}",
            i + 1,
            t.ticket_row + 1,
            t.ticket_place + 1
        ));
    }
    lines.push(format!("Стоимость: {} ₽", total_cost(tickets)));
    lines.push("Билет действителен строго на свой сеанс".to_string());
    lines.join("\n")
}
