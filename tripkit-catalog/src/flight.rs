use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Domestic flight reference row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FlightRow {
    pub from_city: String,
    pub to_city: String,
    pub distance_km: f64,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub airline: String,
}

/// Flight fare = base + distance * per_km, rounded to whole rupees
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct FlightTariff {
    pub base_fare: f64,
    pub per_km: f64,
}

impl Default for FlightTariff {
    fn default() -> Self {
        Self { base_fare: 4000.0, per_km: 3.5 }
    }
}

impl FlightTariff {
    pub fn price(&self, distance_km: f64) -> f64 {
        (self.base_fare + distance_km.max(0.0) * self.per_km).round_ties_even()
    }
}

/// Route details returned by the flight-info lookup
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum FlightInfo {
    Available {
        available: bool,
        from_city: String,
        to_city: String,
        distance_km: f64,
        duration: String,
        airline: String,
    },
    Unavailable {
        available: bool,
        message: String,
    },
}

impl FlightInfo {
    fn unavailable(message: String) -> Self {
        FlightInfo::Unavailable { available: false, message }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, FlightInfo::Available { .. })
    }
}

/// Directional flight table: a row for A -> B says nothing about B -> A.
#[derive(Debug, Clone, Default)]
pub struct FlightTable {
    rows: Vec<FlightRow>,
}

impl FlightTable {
    pub fn new(rows: Vec<FlightRow>) -> Self {
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.duration = normalize_duration(&row.duration);
                row
            })
            .collect();
        Self { rows }
    }

    pub fn find(&self, from_city: &str, to_city: &str) -> Option<&FlightRow> {
        self.rows.iter().find(|r| r.from_city == from_city && r.to_city == to_city)
    }

    /// Every city that appears at either end of a route, sorted.
    pub fn cities(&self) -> Vec<String> {
        self.rows
            .iter()
            .flat_map(|r| [r.from_city.clone(), r.to_city.clone()])
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn info(&self, from_city: &str, to_city: &str) -> FlightInfo {
        if from_city.trim().is_empty() || to_city.trim().is_empty() {
            return FlightInfo::unavailable(
                "Select both cities to view flight details.".to_string(),
            );
        }
        if self.is_empty() {
            return FlightInfo::unavailable("No flight data available.".to_string());
        }
        match self.find(from_city, to_city) {
            Some(row) => FlightInfo::Available {
                available: true,
                from_city: row.from_city.clone(),
                to_city: row.to_city.clone(),
                distance_km: row.distance_km,
                duration: row.duration.clone(),
                airline: row.airline.clone(),
            },
            None => FlightInfo::unavailable(format!(
                "No direct flights available between {} and {}.",
                from_city, to_city
            )),
        }
    }
}

/// Normalise an "h:mm" duration ("06:49" -> "6:49", "1:5" -> "1:05").
/// Anything that is not two colon-separated integers is kept as written.
pub fn normalize_duration(raw: &str) -> String {
    let trimmed = raw.trim();
    let mut parts = trimmed.split(':');
    let parsed = match (parts.next(), parts.next(), parts.next()) {
        (Some(h), Some(m), None) => h.trim().parse::<u32>().ok().zip(m.trim().parse::<u32>().ok()),
        _ => None,
    };
    match parsed {
        Some((hours, minutes)) => {
            let total = hours * 60 + minutes;
            format!("{}:{:02}", total / 60, total % 60)
        }
        None => trimmed.to_string(),
    }
}
