use std::path::Path;
use tracing::{info, warn};
use tripkit_catalog::{Catalog, CatalogData};

#[derive(Debug, thiserror::Error)]
pub enum CatalogLoadError {
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed catalog {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Load reference data from a JSON file.
///
/// A missing file is not fatal: the built-in tables are used instead, so fares
/// fall back to default distances and flight pricing reports no data.
pub fn load_catalog(path: Option<&Path>) -> Result<Catalog, CatalogLoadError> {
    let Some(path) = path else {
        info!("No catalog file configured, using built-in tables");
        return Ok(Catalog::default());
    };

    if !path.exists() {
        warn!(path = %path.display(), "Catalog file not found, using built-in tables");
        return Ok(Catalog::default());
    }

    let raw = std::fs::read_to_string(path).map_err(|source| CatalogLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let data: CatalogData = serde_json::from_str(&raw).map_err(|source| CatalogLoadError::Parse {
        path: path.display().to_string(),
        source,
    })?;

    let catalog = Catalog::from(data);
    info!(
        path = %path.display(),
        vehicles = catalog.vehicles.len(),
        flight_cities = catalog.flights.cities().len(),
        events = catalog.events.len(),
        "Catalog loaded"
    );
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_falls_back() {
        let catalog = load_catalog(Some(Path::new("/nonexistent/tripkit/catalog.json"))).unwrap();
        assert_eq!(catalog.vehicles.len(), 5);
        assert!(catalog.flights.is_empty());
    }

    #[test]
    fn test_loads_bundled_sample() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../data/catalog.json");
        let catalog = load_catalog(Some(&path)).unwrap();
        assert!(!catalog.flights.is_empty());
        assert!(!catalog.distances.is_empty());
        assert!(!catalog.events.is_empty());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let file_name = format!("tripkit-bad-catalog-{}.json", std::process::id());
        let path = std::env::temp_dir().join(file_name);
        std::fs::write(&path, "{ not json").unwrap();
        let result = load_catalog(Some(&path));
        std::fs::remove_file(&path).ok();
        assert!(matches!(result, Err(CatalogLoadError::Parse { .. })));
    }
}
