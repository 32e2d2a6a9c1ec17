pub mod manager;
pub mod models;

pub use manager::{BookingDesk, BookingError};
pub use models::{stage_booking, SlotState};
