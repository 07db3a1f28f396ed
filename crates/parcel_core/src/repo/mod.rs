//! Repository layer over the `parcel` table.
//!
//! # Responsibility
//! - Define the parcel store contract used by services.
//! - Keep SQLite query details inside the persistence boundary.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`, `NotRegistered`) in
//!   addition to storage faults.

pub mod parcel_repo;
