use crate::vehicle::VehicleClass;

/// Cab fare for a trip: distance charge floored at the minimum fare,
/// plus the class's platform fee when it has one.
pub fn city_fare(distance_km: f64, vehicle: &VehicleClass) -> f64 {
    let distance_km = distance_km.max(0.0);
    let metered = (distance_km * vehicle.fare_per_km).max(vehicle.min_fare);
    metered + vehicle.platform_fee.unwrap_or(0.0)
}

/// Round a currency amount to two decimals.
pub fn round_to_paise(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
