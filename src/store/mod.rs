pub mod snapshot;

use crate::error::StoreError;
use crate::models::{
    film::NewFilm,
    hall::{self, MAX_PLACES, MAX_ROWS},
    ticket::SeatChoice,
    Film, Hall, Seance, SeatState, SeatType, Ticket,
};
use crate::services::schedule;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

/// Всё состояние кинотеатра. Авторитетная копия живёт в памяти,
/// снимок на диске — необязательный кеш (см. snapshot).
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct CinemaData {
    pub halls: Vec<Hall>,
    pub films: Vec<Film>,
    pub seances: Vec<Seance>,
    pub tickets: Vec<Ticket>,
    #[serde(default)]
    next_id: i64,
}

impl CinemaData {
    fn alloc_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    /// Счётчик id не должен отставать от максимального выданного id
    /// (снимок мог быть записан без счётчика).
    fn sync_id_counter(&mut self) {
        let max = self
            .halls
            .iter()
            .map(|h| h.id)
            .chain(self.films.iter().map(|f| f.id))
            .chain(self.seances.iter().map(|s| s.id))
            .chain(self.tickets.iter().map(|t| t.id))
            .max()
            .unwrap_or(0);
        self.next_id = self.next_id.max(max);
    }
}

/// Снимок для GET /alldata (билеты наружу не отдаются).
#[derive(Debug, Serialize)]
pub struct AllData {
    pub halls: Vec<Hall>,
    pub films: Vec<Film>,
    pub seances: Vec<Seance>,
}

// Shared state хранилища: один RwLock на всё состояние.
// Это единственная точка сериализации записей.
#[derive(Clone)]
pub struct DataStore {
    inner: Arc<RwLock<CinemaData>>,
    dirty: Arc<AtomicBool>,
}

impl DataStore {
    pub fn new() -> Self {
        Self::with_data(CinemaData::default())
    }

    pub fn with_data(mut data: CinemaData) -> Self {
        data.sync_id_counter();
        DataStore {
            inner: Arc::new(RwLock::new(data)),
            dirty: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Поднимает состояние из снимка, если он есть и читается.
    /// Ошибки чтения не фатальны — стартуем с пустого состояния.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let data = match path {
            Some(p) => match snapshot::load(p) {
                Ok(data) => {
                    info!(
                        "Snapshot loaded: {} halls, {} films, {} seances",
                        data.halls.len(),
                        data.films.len(),
                        data.seances.len()
                    );
                    data
                }
                Err(e) => {
                    warn!("Snapshot unavailable, starting empty: {e:#}");
                    CinemaData::default()
                }
            },
            None => CinemaData::default(),
        };
        Self::with_data(data)
    }

    fn mark_dirty(&self) {
        self.dirty.store(true, Ordering::Release);
    }

    /// Снимает флаг «были изменения» и возвращает его прежнее значение.
    pub fn take_dirty(&self) -> bool {
        self.dirty.swap(false, Ordering::AcqRel)
    }

    /// Сохраняет текущее состояние в файл снимка.
    pub async fn flush(&self, path: &Path) -> anyhow::Result<()> {
        let data = self.inner.read().await.clone();
        snapshot::save(path, &data)
    }

    /* ---------- чтение ---------- */

    pub async fn all_data(&self) -> AllData {
        let data = self.inner.read().await;
        AllData {
            halls: data.halls.clone(),
            films: data.films.clone(),
            seances: data.seances.clone(),
        }
    }

    /// Схема зала для сеанса с наложенной занятостью на дату.
    pub async fn hall_config(
        &self,
        seance_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<Vec<SeatState>>, StoreError> {
        let data = self.inner.read().await;
        let seance = data
            .seances
            .iter()
            .find(|s| s.id == seance_id)
            .ok_or(StoreError::SeanceNotFound)?;
        let hall = data
            .halls
            .iter()
            .find(|h| h.id == seance.seance_hallid)
            .ok_or(StoreError::HallNotFound)?;

        let mut grid: Vec<Vec<SeatState>> = hall
            .hall_config
            .iter()
            .map(|row| row.iter().map(|s| SeatState::from(*s)).collect())
            .collect();

        for t in data
            .tickets
            .iter()
            .filter(|t| t.ticket_seanceid == seance_id && t.ticket_date == date)
        {
            if let Some(cell) = grid
                .get_mut(t.ticket_row as usize)
                .and_then(|r| r.get_mut(t.ticket_place as usize))
            {
                *cell = SeatState::Taken;
            }
        }
        Ok(grid)
    }

    /* ---------- залы ---------- */

    pub async fn create_hall(&self, name: &str) -> Vec<Hall> {
        let mut data = self.inner.write().await;
        let id = data.alloc_id();
        data.halls.push(Hall::new(id, name));
        self.mark_dirty();
        data.halls.clone()
    }

    /// Сохраняет схему зала. Присланная схема нормализуется под
    /// rowCount x placeCount с сохранением попавших в границы ячеек.
    pub async fn update_hall_layout(
        &self,
        hall_id: i64,
        rows: u32,
        places: u32,
        config: Vec<Vec<SeatType>>,
    ) -> Result<Vec<Hall>, StoreError> {
        if !(1..=MAX_ROWS).contains(&rows) || !(1..=MAX_PLACES).contains(&places) {
            return Err(StoreError::InvalidInput(
                "Недопустимый размер схемы зала".to_string(),
            ));
        }
        let mut data = self.inner.write().await;
        let hall = data
            .halls
            .iter_mut()
            .find(|h| h.id == hall_id)
            .ok_or(StoreError::HallNotFound)?;
        let config = hall::resize_config(&config, rows, places);
        hall.apply_layout(rows, places, config);
        self.mark_dirty();
        Ok(data.halls.clone())
    }

    pub async fn set_prices(
        &self,
        hall_id: i64,
        standart: u32,
        vip: u32,
    ) -> Result<Hall, StoreError> {
        let mut data = self.inner.write().await;
        let hall = data
            .halls
            .iter_mut()
            .find(|h| h.id == hall_id)
            .ok_or(StoreError::HallNotFound)?;
        hall.hall_price_standart = standart;
        hall.hall_price_vip = vip;
        let hall = hall.clone();
        self.mark_dirty();
        Ok(hall)
    }

    pub async fn set_open(&self, hall_id: i64, open: bool) -> Result<Hall, StoreError> {
        let mut data = self.inner.write().await;
        let hall = data
            .halls
            .iter_mut()
            .find(|h| h.id == hall_id)
            .ok_or(StoreError::HallNotFound)?;
        hall.hall_open = if open { 1 } else { 0 };
        let hall = hall.clone();
        self.mark_dirty();
        Ok(hall)
    }

    /// Удаляет зал вместе с его сеансами и их билетами.
    pub async fn delete_hall(&self, hall_id: i64) -> Result<(Vec<Hall>, Vec<Seance>), StoreError> {
        let mut data = self.inner.write().await;
        if !data.halls.iter().any(|h| h.id == hall_id) {
            return Err(StoreError::HallNotFound);
        }
        data.halls.retain(|h| h.id != hall_id);

        let removed: Vec<i64> = data
            .seances
            .iter()
            .filter(|s| s.seance_hallid == hall_id)
            .map(|s| s.id)
            .collect();
        data.seances.retain(|s| s.seance_hallid != hall_id);
        data.tickets.retain(|t| !removed.contains(&t.ticket_seanceid));

        self.mark_dirty();
        Ok((data.halls.clone(), data.seances.clone()))
    }

    /* ---------- фильмы ---------- */

    pub async fn create_film(&self, film: NewFilm) -> Vec<Film> {
        let mut data = self.inner.write().await;
        let id = data.alloc_id();
        data.films.push(Film {
            id,
            film_name: film.name,
            film_duration: film.duration,
            film_origin: film.origin,
            film_poster: film.poster,
            film_description: film.description,
        });
        self.mark_dirty();
        data.films.clone()
    }

    /// Фильм с запланированными сеансами удалить нельзя.
    pub async fn delete_film(&self, film_id: i64) -> Result<Vec<Film>, StoreError> {
        let mut data = self.inner.write().await;
        if !data.films.iter().any(|f| f.id == film_id) {
            return Err(StoreError::FilmNotFound);
        }
        if data.seances.iter().any(|s| s.seance_filmid == film_id) {
            return Err(StoreError::FilmHasSeances);
        }
        data.films.retain(|f| f.id != film_id);
        self.mark_dirty();
        Ok(data.films.clone())
    }

    /* ---------- сеансы ---------- */

    /// Добавляет сеанс, если его интервал не пересекает другой показ
    /// в том же зале.
    pub async fn create_seance(
        &self,
        hall_id: i64,
        film_id: i64,
        time: &str,
    ) -> Result<Vec<Seance>, StoreError> {
        let start = schedule::time_to_minutes(time).ok_or_else(|| {
            StoreError::InvalidInput("Время сеанса должно быть в формате HH:MM".to_string())
        })?;

        let mut data = self.inner.write().await;
        if !data.halls.iter().any(|h| h.id == hall_id) {
            return Err(StoreError::HallNotFound);
        }
        let duration = data
            .films
            .iter()
            .find(|f| f.id == film_id)
            .map(|f| f.film_duration)
            .ok_or(StoreError::FilmNotFound)?;

        if schedule::find_conflict(&data.seances, &data.films, hall_id, start, duration).is_some() {
            return Err(StoreError::SeanceOverlap);
        }

        let id = data.alloc_id();
        data.seances.push(Seance {
            id,
            seance_filmid: film_id,
            seance_hallid: hall_id,
            seance_time: time.to_string(),
        });
        self.mark_dirty();
        Ok(data.seances.clone())
    }

    pub async fn delete_seance(&self, seance_id: i64) -> Result<Vec<Seance>, StoreError> {
        let mut data = self.inner.write().await;
        if !data.seances.iter().any(|s| s.id == seance_id) {
            return Err(StoreError::SeanceNotFound);
        }
        data.seances.retain(|s| s.id != seance_id);
        data.tickets.retain(|t| t.ticket_seanceid != seance_id);
        self.mark_dirty();
        Ok(data.seances.clone())
    }

    /* ---------- билеты ---------- */

    /// Бронирует места на сеанс и дату. Цена каждого билета выводится
    /// из цен зала по типу кресла, присланная клиентом игнорируется.
    pub async fn book_tickets(
        &self,
        seance_id: i64,
        date: NaiveDate,
        seats: &[SeatChoice],
    ) -> Result<Vec<Ticket>, StoreError> {
        if seats.is_empty() {
            return Err(StoreError::InvalidInput(
                "Не выбрано ни одного места".to_string(),
            ));
        }

        let mut data = self.inner.write().await;
        let seance = data
            .seances
            .iter()
            .find(|s| s.id == seance_id)
            .cloned()
            .ok_or(StoreError::SeanceNotFound)?;
        let hall = data
            .halls
            .iter()
            .find(|h| h.id == seance.seance_hallid)
            .cloned()
            .ok_or(StoreError::HallNotFound)?;
        let film = data
            .films
            .iter()
            .find(|f| f.id == seance.seance_filmid)
            .cloned()
            .ok_or(StoreError::FilmNotFound)?;

        if !hall.is_open() {
            return Err(StoreError::SalesClosed);
        }

        // Проверяем все места до первой записи: бронь либо целиком, либо никак
        let mut chosen: Vec<(u32, u32, u32)> = Vec::with_capacity(seats.len());
        for seat in seats {
            let seat_type = hall
                .seat_at(seat.row, seat.place)
                .ok_or_else(|| StoreError::InvalidInput("Неверный ряд или место".to_string()))?;
            let price = hall
                .price_for(seat_type)
                .ok_or_else(|| StoreError::InvalidInput("Это кресло заблокировано".to_string()))?;

            let already_taken = data.tickets.iter().any(|t| {
                t.ticket_seanceid == seance_id
                    && t.ticket_date == date
                    && t.ticket_row == seat.row
                    && t.ticket_place == seat.place
            });
            let duplicate = chosen.iter().any(|(r, p, _)| *r == seat.row && *p == seat.place);
            if already_taken || duplicate {
                return Err(StoreError::SeatTaken);
            }
            chosen.push((seat.row, seat.place, price));
        }

        let mut created = Vec::with_capacity(chosen.len());
        for (row, place, price) in chosen {
            let id = data.alloc_id();
            let ticket = Ticket {
                id,
                ticket_seanceid: seance_id,
                ticket_date: date,
                ticket_time: seance.seance_time.clone(),
                ticket_row: row,
                ticket_place: place,
                ticket_coast: price,
                ticket_filmname: film.film_name.clone(),
                ticket_hallname: hall.hall_name.clone(),
            };
            data.tickets.push(ticket.clone());
            created.push(ticket);
        }
        self.mark_dirty();
        Ok(created)
    }
}

impl Default for DataStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 24).unwrap()
    }

    fn seat(row: u32, place: u32) -> SeatChoice {
        SeatChoice { row, place, coast: 0 }
    }

    async fn store_with_open_hall() -> (DataStore, i64, i64, i64) {
        let store = DataStore::new();
        let halls = store.create_hall("Зал 1").await;
        let hall_id = halls[0].id;
        store.set_open(hall_id, true).await.unwrap();
        let films = store
            .create_film(NewFilm {
                name: "Гражданин Кейн".to_string(),
                duration: 120,
                origin: "США".to_string(),
                poster: String::new(),
                description: String::new(),
            })
            .await;
        let film_id = films[0].id;
        let seances = store.create_seance(hall_id, film_id, "18:30").await.unwrap();
        let seance_id = seances[0].id;
        (store, hall_id, film_id, seance_id)
    }

    #[tokio::test]
    async fn overlapping_seance_is_rejected() {
        let (store, hall_id, film_id, _) = store_with_open_hall().await;
        // 18:30 + 120 мин занимает до 20:30
        let err = store.create_seance(hall_id, film_id, "20:00").await.unwrap_err();
        assert!(matches!(err, StoreError::SeanceOverlap));
        // впритык после конца — можно
        assert!(store.create_seance(hall_id, film_id, "20:30").await.is_ok());
    }

    #[tokio::test]
    async fn film_with_seances_cannot_be_deleted() {
        let (store, _, film_id, seance_id) = store_with_open_hall().await;
        let err = store.delete_film(film_id).await.unwrap_err();
        assert!(matches!(err, StoreError::FilmHasSeances));

        store.delete_seance(seance_id).await.unwrap();
        assert!(store.delete_film(film_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn deleting_hall_cascades_to_seances_and_tickets() {
        let (store, hall_id, _, seance_id) = store_with_open_hall().await;
        store.book_tickets(seance_id, date(), &[seat(0, 0)]).await.unwrap();

        let (halls, seances) = store.delete_hall(hall_id).await.unwrap();
        assert!(halls.is_empty());
        assert!(seances.is_empty());
        // билет удалён вместе с сеансом
        assert!(matches!(
            store.hall_config(seance_id, date()).await.unwrap_err(),
            StoreError::SeanceNotFound
        ));
    }

    #[tokio::test]
    async fn booking_derives_price_from_hall_and_seat_type() {
        let (store, hall_id, _, seance_id) = store_with_open_hall().await;
        store.set_prices(hall_id, 300, 500).await.unwrap();

        // делаем место (0,1) VIP
        let all = store.all_data().await;
        let mut config = all.halls[0].hall_config.clone();
        config[0][1] = SeatType::Vip;
        store.update_hall_layout(hall_id, 10, 10, config).await.unwrap();

        let tickets = store
            .book_tickets(seance_id, date(), &[seat(0, 0), seat(0, 1)])
            .await
            .unwrap();
        assert_eq!(tickets[0].ticket_coast, 300);
        assert_eq!(tickets[1].ticket_coast, 500);
        assert_eq!(tickets[0].ticket_filmname, "Гражданин Кейн");
        assert_eq!(tickets[0].ticket_time, "18:30");
    }

    #[tokio::test]
    async fn taken_and_disabled_seats_cannot_be_booked() {
        let (store, hall_id, _, seance_id) = store_with_open_hall().await;
        store.book_tickets(seance_id, date(), &[seat(1, 1)]).await.unwrap();

        let err = store
            .book_tickets(seance_id, date(), &[seat(1, 1)])
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::SeatTaken));

        // на другую дату то же место свободно
        let other = date().succ_opt().unwrap();
        assert!(store.book_tickets(seance_id, other, &[seat(1, 1)]).await.is_ok());

        // заблокированное кресло
        let all = store.all_data().await;
        let mut config = all.halls[0].hall_config.clone();
        config[2][2] = SeatType::Disabled;
        store.update_hall_layout(hall_id, 10, 10, config).await.unwrap();
        let err = store
            .book_tickets(seance_id, date(), &[seat(2, 2)])
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidInput(_)));

        // за пределами схемы
        let err = store
            .book_tickets(seance_id, date(), &[seat(50, 0)])
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn booking_is_all_or_nothing() {
        let (store, _, _, seance_id) = store_with_open_hall().await;
        store.book_tickets(seance_id, date(), &[seat(0, 0)]).await.unwrap();

        // второй запрос задевает занятое место — не бронируется ничего
        let err = store
            .book_tickets(seance_id, date(), &[seat(3, 3), seat(0, 0)])
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::SeatTaken));

        let grid = store.hall_config(seance_id, date()).await.unwrap();
        assert_eq!(grid[3][3], SeatState::Standart);
    }

    #[tokio::test]
    async fn closed_hall_refuses_bookings() {
        let (store, hall_id, _, seance_id) = store_with_open_hall().await;
        store.set_open(hall_id, false).await.unwrap();
        let err = store
            .book_tickets(seance_id, date(), &[seat(0, 0)])
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::SalesClosed));
    }

    #[tokio::test]
    async fn hall_config_marks_booked_seats_taken() {
        let (store, _, _, seance_id) = store_with_open_hall().await;
        store
            .book_tickets(seance_id, date(), &[seat(0, 0), seat(4, 7)])
            .await
            .unwrap();

        let grid = store.hall_config(seance_id, date()).await.unwrap();
        assert_eq!(grid[0][0], SeatState::Taken);
        assert_eq!(grid[4][7], SeatState::Taken);
        assert_eq!(grid[0][1], SeatState::Standart);

        // другая дата — схема чистая
        let other = date().succ_opt().unwrap();
        let grid = store.hall_config(seance_id, other).await.unwrap();
        assert_eq!(grid[0][0], SeatState::Standart);
    }

    #[tokio::test]
    async fn layout_update_normalizes_to_requested_dimensions() {
        let (store, hall_id, _, _) = store_with_open_hall().await;
        let mut config = hall::default_config(5, 5);
        config[0][0] = SeatType::Vip;

        // схема 5x5, но запрошено 3x8 — нормализуется с сохранением ячеек
        let halls = store.update_hall_layout(hall_id, 3, 8, config).await.unwrap();
        let updated = &halls[0];
        assert_eq!(updated.hall_rows, 3);
        assert_eq!(updated.hall_places, 8);
        assert_eq!(updated.hall_config[0][0], SeatType::Vip);
        assert_eq!(updated.hall_config[2][7], SeatType::Standart);

        let err = store
            .update_hall_layout(hall_id, 0, 8, hall::default_config(1, 8))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn restored_snapshot_does_not_reuse_ids() {
        // снимок без счётчика id
        let data: CinemaData = serde_json::from_value(serde_json::json!({
            "halls": [Hall::new(7, "Зал 1")],
            "films": [],
            "seances": [],
            "tickets": []
        }))
        .unwrap();

        let store = DataStore::with_data(data);
        let halls = store.create_hall("Зал 2").await;
        assert_eq!(halls[1].id, 8);
    }

    #[tokio::test]
    async fn dirty_flag_tracks_mutations() {
        let store = DataStore::new();
        assert!(!store.take_dirty());
        store.create_hall("Зал 1").await;
        assert!(store.take_dirty());
        assert!(!store.take_dirty());
    }
}
