pub mod models;
pub mod pii;

pub use models::alert::{AlertRecord, AlertStatus};
pub use models::booking::{Booking, TripType};
pub use pii::Masked;
