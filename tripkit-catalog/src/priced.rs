use serde::Serialize;
use tripkit_shared::TripType;

/// One end of a trip. Flights only know the city.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Endpoint {
    pub city: String,
    pub place: Option<String>,
}

/// Trip parameters together with the price computed for them.
///
/// Only the calculators in this crate construct one; afterwards it is
/// read-only.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PricedRequest {
    trip_type: TripType,
    origin: Endpoint,
    destination: Endpoint,
    vehicle_or_airline: String,
    vehicle_label: String,
    distance_km: f64,
    fare_per_km: Option<f64>,
    computed_price: f64,
}

impl PricedRequest {
    pub(crate) fn city(
        origin: Endpoint,
        destination: Endpoint,
        vehicle_name: &str,
        vehicle_label: String,
        distance_km: f64,
        fare_per_km: f64,
        computed_price: f64,
    ) -> Self {
        Self {
            trip_type: TripType::City,
            origin,
            destination,
            vehicle_or_airline: vehicle_name.to_string(),
            vehicle_label,
            distance_km,
            fare_per_km: Some(fare_per_km),
            computed_price,
        }
    }

    pub(crate) fn flight(
        from_city: &str,
        to_city: &str,
        airline: &str,
        distance_km: f64,
        computed_price: f64,
    ) -> Self {
        Self {
            trip_type: TripType::Flight,
            origin: Endpoint { city: from_city.to_string(), place: None },
            destination: Endpoint { city: to_city.to_string(), place: None },
            vehicle_or_airline: airline.to_string(),
            vehicle_label: "✈️ Flight".to_string(),
            distance_km,
            fare_per_km: None,
            computed_price,
        }
    }

    pub fn trip_type(&self) -> TripType {
        self.trip_type
    }

    pub fn origin(&self) -> &Endpoint {
        &self.origin
    }

    pub fn destination(&self) -> &Endpoint {
        &self.destination
    }

    pub fn vehicle_or_airline(&self) -> &str {
        &self.vehicle_or_airline
    }

    pub fn vehicle_label(&self) -> &str {
        &self.vehicle_label
    }

    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    pub fn fare_per_km(&self) -> Option<f64> {
        self.fare_per_km
    }

    pub fn computed_price(&self) -> f64 {
        self.computed_price
    }

    /// Human-readable lines describing the quote.
    pub fn summary_lines(&self) -> Vec<String> {
        match self.trip_type {
            TripType::City => vec![
                format!("🚕 City Trip: {} → {}", self.origin.city, self.destination.city),
                format!("Vehicle: {}", self.vehicle_or_airline),
                format!("Distance: {:.1} km", self.distance_km),
                format!("Total Fare: ₹{:.2}", self.computed_price),
            ],
            TripType::Flight => vec![
                format!("✈️ Flight Booking: {} → {}", self.origin.city, self.destination.city),
                format!("Airline: {}", self.vehicle_or_airline),
                format!("Distance: {} km", self.distance_km),
                format!("Fare: ₹{}", self.computed_price),
            ],
        }
    }
}
