use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Kind of trip a booking was priced for
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TripType {
    City,
    Flight,
}

impl TripType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TripType::City => "City",
            TripType::Flight => "Flight",
        }
    }
}

impl fmt::Display for TripType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TripType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "City" => Ok(TripType::City),
            "Flight" => Ok(TripType::Flight),
            other => Err(format!("unknown trip type: {}", other)),
        }
    }
}

/// A priced trip, either staged as a session's pending booking or
/// stored in the confirmed history.
///
/// The only field that changes after creation is `payment_mode`,
/// which is set once when the booking is confirmed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Booking {
    pub id: Uuid,
    pub session_id: String,
    pub time: DateTime<Utc>,
    pub trip_type: TripType,
    pub vehicle_label: String,
    pub from_city: String,
    pub from_place: Option<String>,
    pub to_city: String,
    pub to_place: Option<String>,
    pub distance_km: f64,
    pub fare_per_km: Option<f64>,
    pub final_price: f64,
    pub payment_mode: Option<String>,
}

impl Booking {
    /// Place name as shown to travellers; flights have none.
    pub fn from_place_label(&self) -> &str {
        self.from_place.as_deref().unwrap_or("-")
    }

    pub fn to_place_label(&self) -> &str {
        self.to_place.as_deref().unwrap_or("-")
    }

    pub fn is_confirmed(&self) -> bool {
        self.payment_mode.is_some()
    }
}
