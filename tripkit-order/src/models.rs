use chrono::{DateTime, Utc};
use serde::Serialize;
use tripkit_catalog::PricedRequest;
use tripkit_shared::Booking;
use uuid::Uuid;

/// State of one session's pending-booking slot
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SlotState {
    Empty,
    Pending,
}

/// Build the unconfirmed booking for a freshly priced request.
pub fn stage_booking(session_id: &str, priced: &PricedRequest, now: DateTime<Utc>) -> Booking {
    Booking {
        id: Uuid::new_v4(),
        session_id: session_id.to_string(),
        time: now,
        trip_type: priced.trip_type(),
        vehicle_label: priced.vehicle_label().to_string(),
        from_city: priced.origin().city.clone(),
        from_place: priced.origin().place.clone(),
        to_city: priced.destination().city.clone(),
        to_place: priced.destination().place.clone(),
        distance_km: priced.distance_km(),
        fare_per_km: priced.fare_per_km(),
        final_price: priced.computed_price(),
        payment_mode: None,
    }
}

/// Payment mode to record on confirmation: the supplied one unless it is
/// blank, otherwise whatever the booking already carried.
pub fn resolve_payment_mode(supplied: Option<String>, prior: Option<String>) -> Option<String> {
    supplied
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
        .or(prior)
}
