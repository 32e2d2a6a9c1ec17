pub mod distance;
pub mod event;
pub mod fare;
pub mod flight;
pub mod listing;
pub mod priced;
pub mod pricing;
pub mod vehicle;

use serde::Deserialize;
use std::collections::BTreeMap;

pub use distance::{DistanceRow, DistanceTable};
pub use event::{EventPriceEstimator, EventPriceInputs};
pub use flight::{FlightInfo, FlightRow, FlightTable};
pub use listing::{EventListing, EventSummary};
pub use priced::{Endpoint, PricedRequest};
pub use pricing::{
    BookingConfig, CityTripRequest, FlightTripRequest, PricingConfig, PricingEngine, PricingError,
};
pub use vehicle::{VehicleCatalog, VehicleClass};

/// Static reference data the calculators read from
#[derive(Debug, Clone)]
pub struct Catalog {
    pub vehicles: VehicleCatalog,
    pub distances: DistanceTable,
    pub flights: FlightTable,
    pub states: BTreeMap<String, Vec<String>>,
    pub events: Vec<EventListing>,
}

fn default_states() -> BTreeMap<String, Vec<String>> {
    [
        ("Maharashtra", &["Mumbai", "Pune"][..]),
        ("Gujarat", &["Ahmedabad", "Surat"][..]),
        ("Karnataka", &["Bangalore"][..]),
        ("Tamil Nadu", &["Chennai"][..]),
        ("West Bengal", &["Kolkata"][..]),
        ("Tamil Nadu South", &["Kanyakumari"][..]),
    ]
    .into_iter()
    .map(|(state, cities)| (state.to_string(), cities.iter().map(|c| c.to_string()).collect()))
    .collect()
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            vehicles: VehicleCatalog::default(),
            distances: DistanceTable::new(Vec::new()),
            flights: FlightTable::default(),
            states: default_states(),
            events: Vec::new(),
        }
    }
}

/// On-disk shape of the catalogue file. Missing sections fall back to the
/// built-in defaults (vehicles, states) or to empty tables.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CatalogData {
    pub vehicles: Option<Vec<VehicleClass>>,
    pub distances: Vec<DistanceRow>,
    pub flights: Vec<FlightRow>,
    pub states: Option<BTreeMap<String, Vec<String>>>,
    pub events: Vec<EventListing>,
}

impl From<CatalogData> for Catalog {
    fn from(data: CatalogData) -> Self {
        Self {
            vehicles: data.vehicles.map(VehicleCatalog::new).unwrap_or_default(),
            distances: DistanceTable::new(data.distances),
            flights: FlightTable::new(data.flights),
            states: data.states.unwrap_or_else(default_states),
            events: data.events,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_data_from_json() {
        let data: CatalogData = serde_json::from_value(serde_json::json!({
            "distances": [
                {"city": "Pune", "origin": "Kothrud", "destination": "Baner", "distance_km": 8.0}
            ],
            "flights": [
                {"from_city": "Pune", "to_city": "Delhi", "distance_km": 1173.0,
                 "duration": "02:05", "airline": "Vistara"}
            ]
        }))
        .unwrap();

        let catalog = Catalog::from(data);
        assert_eq!(catalog.vehicles.len(), 5);
        assert_eq!(catalog.flights.find("Pune", "Delhi").unwrap().duration, "2:05");
        assert_eq!(catalog.states["Karnataka"], vec!["Bangalore".to_string()]);
        assert!(!catalog.distances.is_empty());
    }

    #[test]
    fn test_vehicle_override() {
        let data: CatalogData = serde_json::from_value(serde_json::json!({
            "vehicles": [
                {"name": "SHUTTLE", "icon": "🚐", "fare_per_km": 8.0, "min_fare": 40.0}
            ]
        }))
        .unwrap();
        let catalog = Catalog::from(data);
        assert_eq!(catalog.vehicles.len(), 1);
        assert!(catalog.vehicles.get("AUTO").is_none());
    }
}
