pub mod alert;
pub mod booking;
