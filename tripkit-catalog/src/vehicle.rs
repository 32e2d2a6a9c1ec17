use serde::{Deserialize, Serialize};

/// A bookable cab class and its tariff
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VehicleClass {
    pub name: String,
    pub icon: String,
    pub fare_per_km: f64,
    pub min_fare: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform_fee: Option<f64>,
}

impl VehicleClass {
    pub fn new(name: &str, icon: &str, fare_per_km: f64, min_fare: f64) -> Self {
        Self {
            name: name.to_string(),
            icon: icon.to_string(),
            fare_per_km,
            min_fare,
            platform_fee: None,
        }
    }

    pub fn with_platform_fee(mut self, fee: f64) -> Self {
        self.platform_fee = Some(fee);
        self
    }

    /// Label stored on bookings, e.g. "🛺 AUTO".
    pub fn label(&self) -> String {
        format!("{} {}", self.icon, self.name)
    }
}

/// Ordered table of vehicle classes, looked up by exact name.
#[derive(Debug, Clone)]
pub struct VehicleCatalog {
    classes: Vec<VehicleClass>,
}

impl VehicleCatalog {
    pub fn new(classes: Vec<VehicleClass>) -> Self {
        Self { classes }
    }

    pub fn get(&self, name: &str) -> Option<&VehicleClass> {
        self.classes.iter().find(|v| v.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &VehicleClass> {
        self.classes.iter()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl Default for VehicleCatalog {
    fn default() -> Self {
        Self::new(vec![
            VehicleClass::new("AUTO", "🛺", 12.0, 80.0).with_platform_fee(5.0),
            VehicleClass::new("MICRO", "🚗", 20.0, 50.0),
            VehicleClass::new("MINI", "🚙", 30.0, 80.0),
            VehicleClass::new("PRIME", "🚖", 50.0, 150.0),
            VehicleClass::new("LUX", "🚘", 100.0, 300.0),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_has_five_classes() {
        let catalog = VehicleCatalog::default();
        assert_eq!(catalog.len(), 5);

        let auto = catalog.get("AUTO").unwrap();
        assert_eq!(auto.platform_fee, Some(5.0));
        assert_eq!(auto.label(), "🛺 AUTO");

        // Only AUTO carries a platform fee
        assert!(catalog.iter().filter(|v| v.name != "AUTO").all(|v| v.platform_fee.is_none()));
    }

    #[test]
    fn test_lookup_is_exact() {
        let catalog = VehicleCatalog::default();
        assert!(catalog.get("auto").is_none());
        assert!(catalog.get("BUS").is_none());
    }
}
