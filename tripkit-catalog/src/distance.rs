use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Distance used when a city pair is not in the table.
pub const DEFAULT_DISTANCE_KM: f64 = 10.0;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DistanceRow {
    pub city: String,
    pub origin: String,
    pub destination: String,
    pub distance_km: f64,
}

/// Where a looked-up distance came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceSource {
    Exact,
    Reverse,
    Default,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceLookup {
    pub distance_km: f64,
    pub source: DistanceSource,
}

/// Intra-city place-to-place distances.
///
/// Lookups never fail: a missing pair degrades to the configured default
/// distance instead of an error.
#[derive(Debug, Clone)]
pub struct DistanceTable {
    rows: Vec<DistanceRow>,
    default_km: f64,
}

impl DistanceTable {
    pub fn new(rows: Vec<DistanceRow>) -> Self {
        Self { rows, default_km: DEFAULT_DISTANCE_KM }
    }

    pub fn with_default_km(mut self, default_km: f64) -> Self {
        self.default_km = default_km;
        self
    }

    pub fn default_km(&self) -> f64 {
        self.default_km
    }

    /// Exact (origin -> destination) row first, then the reverse pair,
    /// then the default distance.
    pub fn lookup(&self, city: &str, origin: &str, destination: &str) -> DistanceLookup {
        let in_city = || self.rows.iter().filter(move |r| r.city == city);

        if let Some(row) = in_city().find(|r| r.origin == origin && r.destination == destination) {
            return DistanceLookup { distance_km: row.distance_km, source: DistanceSource::Exact };
        }
        if let Some(row) = in_city().find(|r| r.origin == destination && r.destination == origin) {
            return DistanceLookup { distance_km: row.distance_km, source: DistanceSource::Reverse };
        }

        DistanceLookup { distance_km: self.default_km, source: DistanceSource::Default }
    }

    /// Sorted, de-duplicated places per city, drawn from both ends of every row.
    pub fn places_by_city(&self) -> BTreeMap<String, Vec<String>> {
        let mut places: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for row in &self.rows {
            let entry = places.entry(row.city.clone()).or_default();
            entry.insert(row.origin.clone());
            entry.insert(row.destination.clone());
        }
        places
            .into_iter()
            .map(|(city, set)| (city, set.into_iter().collect()))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pune_table() -> DistanceTable {
        DistanceTable::new(vec![
            DistanceRow {
                city: "Pune".to_string(),
                origin: "Shivajinagar".to_string(),
                destination: "Hinjewadi".to_string(),
                distance_km: 17.5,
            },
            DistanceRow {
                city: "Mumbai".to_string(),
                origin: "Bandra".to_string(),
                destination: "Andheri".to_string(),
                distance_km: 9.0,
            },
        ])
    }

    #[test]
    fn test_lookup_is_symmetric() {
        let table = pune_table();
        let forward = table.lookup("Pune", "Shivajinagar", "Hinjewadi");
        let backward = table.lookup("Pune", "Hinjewadi", "Shivajinagar");

        assert_eq!(forward.distance_km, 17.5);
        assert_eq!(forward.source, DistanceSource::Exact);
        assert_eq!(backward.distance_km, forward.distance_km);
        assert_eq!(backward.source, DistanceSource::Reverse);
    }

    #[test]
    fn test_unknown_pair_falls_back_to_ten_km() {
        let table = pune_table();
        let lookup = table.lookup("Pune", "Bandra", "Andheri");
        assert_eq!(lookup.distance_km, 10.0);
        assert_eq!(lookup.source, DistanceSource::Default);

        let empty = DistanceTable::new(vec![]);
        assert_eq!(empty.lookup("Pune", "A", "B").distance_km, 10.0);
    }

    #[test]
    fn test_configured_default_distance() {
        let table = DistanceTable::new(vec![]).with_default_km(7.5);
        assert_eq!(table.lookup("Goa", "A", "B").distance_km, 7.5);
    }

    #[test]
    fn test_places_by_city_sorted_and_unique() {
        let places = pune_table().places_by_city();
        assert_eq!(places["Pune"], vec!["Hinjewadi".to_string(), "Shivajinagar".to_string()]);
        assert_eq!(places["Mumbai"], vec!["Andheri".to_string(), "Bandra".to_string()]);
    }
}
