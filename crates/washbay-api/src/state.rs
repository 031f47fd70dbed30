//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by both CLI and REST API.
//! Services are generic over repository, availability and pricing traits, but
//! AppState pins them to the concrete infra implementations.

use std::path::PathBuf;
use std::sync::Arc;

use washbay_core::service::booking::BookingService;
use washbay_core::service::catalog::CatalogService;
use washbay_core::service::customer::CustomerService;
use washbay_infra::availability::ScheduleAvailability;
use washbay_infra::config::{load_global_config, resolve_data_dir};
use washbay_infra::pricing::TablePricing;
use washbay_infra::sqlite::booking::SqliteBookingRepository;
use washbay_infra::sqlite::customer::SqliteCustomerRepository;
use washbay_infra::sqlite::pool::{DatabasePool, database_url};
use washbay_infra::sqlite::service::SqliteServiceRepository;
use washbay_types::config::GlobalConfig;

/// Concrete type aliases for the service generics pinned to infra implementations.
pub type ConcreteBookingService = BookingService<
    SqliteBookingRepository,
    SqliteCustomerRepository,
    SqliteServiceRepository,
    ScheduleAvailability,
    TablePricing,
>;

pub type ConcreteCatalogService = CatalogService<SqliteServiceRepository>;

pub type ConcreteCustomerService = CustomerService<SqliteCustomerRepository>;

/// Shared application state holding all services.
///
/// Used by both CLI commands and REST API handlers.
#[derive(Clone)]
pub struct AppState {
    pub booking_service: Arc<ConcreteBookingService>,
    pub catalog_service: Arc<ConcreteCatalogService>,
    pub customer_service: Arc<ConcreteCustomerService>,
    pub config: Arc<GlobalConfig>,
    pub data_dir: PathBuf,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Initialize the application state: load config, connect to DB, wire services.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();

        // Ensure data directory exists
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_global_config(&data_dir).await;

        let db_url = format!("{}?mode=rwc", database_url(&data_dir));
        let db_pool = DatabasePool::new(&db_url).await?;

        Ok(Self::from_parts(data_dir, db_pool, config))
    }

    /// Wire services over an already-open pool.
    pub fn from_parts(data_dir: PathBuf, db_pool: DatabasePool, config: GlobalConfig) -> Self {
        let booking_service = BookingService::new(
            SqliteBookingRepository::new(db_pool.clone()),
            SqliteCustomerRepository::new(db_pool.clone()),
            SqliteServiceRepository::new(db_pool.clone()),
            ScheduleAvailability::new(db_pool.clone(), config.schedule.clone()),
            TablePricing::new(config.pricing.clone()),
        );

        let catalog_service = CatalogService::new(SqliteServiceRepository::new(db_pool.clone()));
        let customer_service = CustomerService::new(SqliteCustomerRepository::new(db_pool.clone()));

        Self {
            booking_service: Arc::new(booking_service),
            catalog_service: Arc::new(catalog_service),
            customer_service: Arc::new(customer_service),
            config: Arc::new(config),
            data_dir,
            db_pool,
        }
    }
}
