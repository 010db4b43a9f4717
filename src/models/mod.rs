pub mod film;
pub mod hall;
pub mod seance;
pub mod ticket;

pub use film::Film;
pub use hall::{Hall, SeatState, SeatType};
pub use seance::Seance;
pub use ticket::Ticket;
