//! Parcel use-case services.
//!
//! Keeps CLI and embedding callers decoupled from storage details.

pub mod parcel_service;
