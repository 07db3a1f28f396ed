//! Persistence layer for parcel shipment records.
//!
//! `SqliteParcelRepository` is the parcel store over the `parcel` table;
//! `ParcelService` layers registration and the delivery flow on top of it.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::{ensure_schema, open_db, open_db_in_memory, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::parcel::{ClientId, Parcel, ParcelNumber, ParcelStatus, UnknownStatus};
pub use repo::parcel_repo::{ParcelRepository, RepoError, RepoResult, SqliteParcelRepository};
pub use service::parcel_service::ParcelService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
