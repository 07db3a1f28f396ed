//! Domain model for parcel shipment records.
//!
//! # Invariants
//! - Every parcel is identified by a store-assigned `ParcelNumber`.
//! - Address and existence are only mutable while the parcel is registered.

pub mod parcel;
