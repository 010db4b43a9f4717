use serde::{Deserialize, Serialize};

// Параметры зала по умолчанию при создании через POST /hall
pub const DEFAULT_ROWS: u32 = 10;
pub const DEFAULT_PLACES: u32 = 10;
pub const DEFAULT_PRICE_STANDART: u32 = 250;
pub const DEFAULT_PRICE_VIP: u32 = 350;

// Максимальные размеры схемы зала (как в админке)
pub const MAX_ROWS: u32 = 20;
pub const MAX_PLACES: u32 = 30;

/// Тип кресла в схеме зала. На проводе — `standart` / `vip` / `disabled`
/// (орфография зафиксирована клиентом).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatType {
    Standart,
    Vip,
    Disabled,
}

impl SeatType {
    /// Следующий тип в цикле редактора схемы:
    /// standart -> vip -> disabled -> standart.
    pub fn next(self) -> Self {
        match self {
            SeatType::Standart => SeatType::Vip,
            SeatType::Vip => SeatType::Disabled,
            SeatType::Disabled => SeatType::Standart,
        }
    }
}

/// Состояние кресла в схеме конкретного сеанса (GET /hallconfig):
/// тип из схемы зала либо `taken`, если место уже выкуплено.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatState {
    Standart,
    Vip,
    Disabled,
    Taken,
}

impl From<SeatType> for SeatState {
    fn from(t: SeatType) -> Self {
        match t {
            SeatType::Standart => SeatState::Standart,
            SeatType::Vip => SeatState::Vip,
            SeatType::Disabled => SeatState::Disabled,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hall {
    pub id: i64,
    pub hall_name: String,
    pub hall_rows: u32,
    pub hall_places: u32,
    pub hall_config: Vec<Vec<SeatType>>,
    pub hall_price_standart: u32,
    pub hall_price_vip: u32,
    pub hall_open: u8,
}

impl Hall {
    /// Новый зал со схемой и ценами по умолчанию, продажи закрыты.
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Hall {
            id,
            hall_name: name.into(),
            hall_rows: DEFAULT_ROWS,
            hall_places: DEFAULT_PLACES,
            hall_config: default_config(DEFAULT_ROWS, DEFAULT_PLACES),
            hall_price_standart: DEFAULT_PRICE_STANDART,
            hall_price_vip: DEFAULT_PRICE_VIP,
            hall_open: 0,
        }
    }

    pub fn is_open(&self) -> bool {
        self.hall_open == 1
    }

    pub fn seat_at(&self, row: u32, place: u32) -> Option<SeatType> {
        self.hall_config
            .get(row as usize)
            .and_then(|r| r.get(place as usize))
            .copied()
    }

    /// Цена места по типу; у заблокированного кресла цены нет.
    pub fn price_for(&self, seat: SeatType) -> Option<u32> {
        match seat {
            SeatType::Standart => Some(self.hall_price_standart),
            SeatType::Vip => Some(self.hall_price_vip),
            SeatType::Disabled => None,
        }
    }

    /// Заменяет схему зала, синхронизируя счётчики рядов/мест.
    pub fn apply_layout(&mut self, rows: u32, places: u32, config: Vec<Vec<SeatType>>) {
        self.hall_rows = rows;
        self.hall_places = places;
        self.hall_config = config;
    }
}

/// Пустая схема: все кресла обычные.
pub fn default_config(rows: u32, places: u32) -> Vec<Vec<SeatType>> {
    vec![vec![SeatType::Standart; places as usize]; rows as usize]
}

/// Перегенерация схемы под новые размеры. Ячейки, чьи индексы
/// остались в границах, сохраняют свой тип, новые — обычные кресла.
pub fn resize_config(prev: &[Vec<SeatType>], rows: u32, places: u32) -> Vec<Vec<SeatType>> {
    (0..rows as usize)
        .map(|r| {
            (0..places as usize)
                .map(|p| {
                    prev.get(r)
                        .and_then(|row| row.get(p))
                        .copied()
                        .unwrap_or(SeatType::Standart)
                })
                .collect()
        })
        .collect()
}
