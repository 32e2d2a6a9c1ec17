pub mod alert_repo;
pub mod app_config;
pub mod booking_repo;
pub mod catalog_loader;
pub mod database;
pub mod memory;

pub use alert_repo::PgAlertRepository;
pub use app_config::Config;
pub use booking_repo::PgBookingHistoryRepository;
pub use catalog_loader::{load_catalog, CatalogLoadError};
pub use database::DbClient;
pub use memory::{MemoryAlertRepository, MemoryBookingHistoryRepository};
