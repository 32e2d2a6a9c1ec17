use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::distance::{DistanceSource, DEFAULT_DISTANCE_KM};
use crate::event::EventPriceEstimator;
use crate::fare::{city_fare, round_to_paise};
use crate::flight::{FlightInfo, FlightTariff};
use crate::listing::{list_events, EventSummary};
use crate::priced::{Endpoint, PricedRequest};
use crate::vehicle::VehicleClass;
use crate::Catalog;

/// Tunable pricing parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Distance assumed for city pairs missing from the distance table.
    pub default_distance_km: f64,
    pub flight_base_fare: f64,
    pub flight_per_km: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        let tariff = FlightTariff::default();
        Self {
            default_distance_km: DEFAULT_DISTANCE_KM,
            flight_base_fare: tariff.base_fare,
            flight_per_km: tariff.per_km,
        }
    }
}

/// Parameters of a cab quote. Every field is required and must be non-empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CityTripRequest {
    pub city: Option<String>,
    pub origin: Option<String>,
    pub dest_city: Option<String>,
    pub destination: Option<String>,
    pub vehicle_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FlightTripRequest {
    pub from_city: Option<String>,
    pub to_city: Option<String>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PricingError {
    #[error("Missing required fields.")]
    MissingFields,

    #[error("Invalid vehicle.")]
    InvalidVehicle,

    #[error("Please select both cities for flight booking.")]
    MissingFlightCities,

    #[error("No flight data available.")]
    NoFlightData,

    #[error("No direct flight from {from} to {to}.")]
    NoDirectFlight { from: String, to: String },
}

/// Static reference data a client needs to build a booking form
#[derive(Debug, Clone, Serialize)]
pub struct BookingConfig {
    pub states: BTreeMap<String, Vec<String>>,
    pub vehicles: BTreeMap<String, VehicleClass>,
    pub flight_cities: Vec<String>,
    pub places: BTreeMap<String, Vec<String>>,
}

fn required(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Turns trip parameters into priced requests using the loaded catalogue
pub struct PricingEngine {
    catalog: Catalog,
    tariff: FlightTariff,
    estimator: EventPriceEstimator,
}

impl PricingEngine {
    pub fn new(catalog: Catalog, config: &PricingConfig) -> Self {
        let catalog = Catalog {
            distances: catalog.distances.with_default_km(config.default_distance_km),
            ..catalog
        };
        Self {
            catalog,
            tariff: FlightTariff {
                base_fare: config.flight_base_fare,
                per_km: config.flight_per_km,
            },
            estimator: EventPriceEstimator::default(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn price_city(&self, req: &CityTripRequest) -> Result<PricedRequest, PricingError> {
        let (Some(city), Some(origin), Some(dest_city), Some(destination), Some(vehicle_name)) = (
            required(&req.city),
            required(&req.origin),
            required(&req.dest_city),
            required(&req.destination),
            required(&req.vehicle_name),
        ) else {
            return Err(PricingError::MissingFields);
        };

        let vehicle = self
            .catalog
            .vehicles
            .get(vehicle_name)
            .ok_or(PricingError::InvalidVehicle)?;

        let lookup = self.catalog.distances.lookup(city, origin, destination);
        if lookup.source == DistanceSource::Default {
            warn!(
                city,
                origin,
                destination,
                distance_km = lookup.distance_km,
                "No distance on record, using default"
            );
        }

        let total = round_to_paise(city_fare(lookup.distance_km, vehicle));
        debug!(
            vehicle = vehicle_name,
            distance_km = lookup.distance_km,
            total,
            "City fare computed"
        );

        Ok(PricedRequest::city(
            Endpoint { city: city.to_string(), place: Some(origin.to_string()) },
            Endpoint { city: dest_city.to_string(), place: Some(destination.to_string()) },
            vehicle_name,
            vehicle.label(),
            lookup.distance_km,
            vehicle.fare_per_km,
            total,
        ))
    }

    pub fn price_flight(&self, req: &FlightTripRequest) -> Result<PricedRequest, PricingError> {
        let (Some(from_city), Some(to_city)) = (required(&req.from_city), required(&req.to_city))
        else {
            return Err(PricingError::MissingFlightCities);
        };

        if self.catalog.flights.is_empty() {
            return Err(PricingError::NoFlightData);
        }

        let row = self
            .catalog
            .flights
            .find(from_city, to_city)
            .ok_or_else(|| PricingError::NoDirectFlight {
                from: from_city.to_string(),
                to: to_city.to_string(),
            })?;

        let total = self.tariff.price(row.distance_km);
        debug!(from_city, to_city, distance_km = row.distance_km, total, "Flight fare computed");

        Ok(PricedRequest::flight(from_city, to_city, &row.airline, row.distance_km, total))
    }

    pub fn flight_info(&self, from_city: &str, to_city: &str) -> FlightInfo {
        self.catalog.flights.info(from_city, to_city)
    }

    pub fn booking_config(&self) -> BookingConfig {
        BookingConfig {
            states: self.catalog.states.clone(),
            vehicles: self
                .catalog
                .vehicles
                .iter()
                .map(|v| (v.name.clone(), v.clone()))
                .collect(),
            flight_cities: self.catalog.flights.cities(),
            places: self.catalog.distances.places_by_city(),
        }
    }

    pub fn events(&self, city: Option<&str>) -> Vec<EventSummary> {
        list_events(&self.catalog.events, &self.estimator, city)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::{DistanceRow, DistanceTable};
    use crate::flight::{FlightRow, FlightTable};
    use tripkit_shared::TripType;

    fn engine() -> PricingEngine {
        let catalog = Catalog {
            distances: DistanceTable::new(vec![DistanceRow {
                city: "Pune".to_string(),
                origin: "Kothrud".to_string(),
                destination: "Baner".to_string(),
                distance_km: 8.0,
            }]),
            flights: FlightTable::new(vec![FlightRow {
                from_city: "Mumbai".to_string(),
                to_city: "Delhi".to_string(),
                distance_km: 1148.0,
                duration: "2:10".to_string(),
                airline: "IndiGo".to_string(),
            }]),
            ..Catalog::default()
        };
        PricingEngine::new(catalog, &PricingConfig::default())
    }

    fn city_request(vehicle: &str) -> CityTripRequest {
        CityTripRequest {
            city: Some("Pune".to_string()),
            origin: Some("Baner".to_string()),
            dest_city: Some("Pune".to_string()),
            destination: Some("Kothrud".to_string()),
            vehicle_name: Some(vehicle.to_string()),
        }
    }

    #[test]
    fn test_city_price_uses_reverse_distance() {
        let priced = engine().price_city(&city_request("MINI")).unwrap();
        assert_eq!(priced.trip_type(), TripType::City);
        assert_eq!(priced.distance_km(), 8.0);
        assert_eq!(priced.computed_price(), 240.0);
        assert_eq!(priced.vehicle_label(), "🚙 MINI");
        assert_eq!(priced.fare_per_km(), Some(30.0));
        assert_eq!(priced.origin().place.as_deref(), Some("Baner"));
    }

    #[test]
    fn test_city_price_default_distance() {
        let mut req = city_request("AUTO");
        req.origin = Some("Nowhere".to_string());
        let priced = engine().price_city(&req).unwrap();
        assert_eq!(priced.distance_km(), 10.0);
        assert_eq!(priced.computed_price(), 125.0);
        assert_eq!(priced.summary_lines()[2], "Distance: 10.0 km");
        assert_eq!(priced.summary_lines()[3], "Total Fare: ₹125.00");
    }

    #[test]
    fn test_city_price_validation() {
        let engine = engine();
        let mut req = city_request("AUTO");
        req.dest_city = Some("  ".to_string());
        assert_eq!(engine.price_city(&req), Err(PricingError::MissingFields));
        assert_eq!(
            engine.price_city(&CityTripRequest::default()),
            Err(PricingError::MissingFields)
        );
        assert_eq!(engine.price_city(&city_request("BUS")), Err(PricingError::InvalidVehicle));
        assert_eq!(PricingError::InvalidVehicle.to_string(), "Invalid vehicle.");
    }

    #[test]
    fn test_flight_price() {
        let req = FlightTripRequest {
            from_city: Some("Mumbai".to_string()),
            to_city: Some("Delhi".to_string()),
        };
        let priced = engine().price_flight(&req).unwrap();
        assert_eq!(priced.computed_price(), 8018.0);
        assert_eq!(priced.vehicle_label(), "✈️ Flight");
        assert_eq!(priced.vehicle_or_airline(), "IndiGo");
        assert!(priced.origin().place.is_none());
        assert_eq!(priced.summary_lines()[3], "Fare: ₹8018");
    }

    #[test]
    fn test_flight_price_errors() {
        let engine = engine();
        let reverse = FlightTripRequest {
            from_city: Some("Delhi".to_string()),
            to_city: Some("Mumbai".to_string()),
        };
        assert_eq!(
            engine.price_flight(&reverse).unwrap_err().to_string(),
            "No direct flight from Delhi to Mumbai."
        );
        assert_eq!(
            engine.price_flight(&FlightTripRequest::default()),
            Err(PricingError::MissingFlightCities)
        );

        let empty = PricingEngine::new(Catalog::default(), &PricingConfig::default());
        let req = FlightTripRequest {
            from_city: Some("Mumbai".to_string()),
            to_city: Some("Delhi".to_string()),
        };
        assert_eq!(empty.price_flight(&req), Err(PricingError::NoFlightData));
    }

    #[test]
    fn test_booking_config() {
        let config = engine().booking_config();
        assert_eq!(config.flight_cities, vec!["Delhi".to_string(), "Mumbai".to_string()]);
        assert_eq!(config.places["Pune"], vec!["Baner".to_string(), "Kothrud".to_string()]);
        assert!(config.vehicles.contains_key("LUX"));
        assert!(config.states.contains_key("Maharashtra"));
    }
}
