use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Link text used whenever no position can be determined.
pub const LOCATION_UNAVAILABLE: &str = "Location unavailable";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn maps_link(&self) -> String {
        format!("https://maps.google.com/?q={},{}", self.latitude, self.longitude)
    }
}

/// Best-effort lookup of the caller's approximate position.
#[async_trait]
pub trait LocationLookup: Send + Sync {
    /// Returns a maps link, or `None` when the provider could not answer.
    async fn locate(&self) -> Option<String>;
}

/// Lookup that never resolves anything.
pub struct NoLocation;

#[async_trait]
impl LocationLookup for NoLocation {
    async fn locate(&self) -> Option<String> {
        None
    }
}
