//! Parcel use-case service.
//!
//! # Responsibility
//! - Register parcels with a creation timestamp.
//! - Walk parcels through the `registered -> sent -> delivered` flow.
//! - Emit metadata-only log events for every mutating use case.
//!
//! # Invariants
//! - Service APIs never bypass the repository's `registered` gate.
//! - Log events never include addresses.

use crate::model::parcel::{ClientId, Parcel, ParcelNumber, ParcelStatus};
use crate::repo::parcel_repo::{ParcelRepository, RepoError, RepoResult};
use chrono::{SecondsFormat, Utc};
use log::{info, warn};

/// Use-case wrapper around a parcel repository.
pub struct ParcelService<R: ParcelRepository> {
    repo: R,
}

impl<R: ParcelRepository> ParcelService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Registers a new parcel for `client` and returns the stored record.
    ///
    /// `created_at` is the current UTC time in RFC 3339 with second precision.
    pub fn register(&self, client: ClientId, address: impl Into<String>) -> RepoResult<Parcel> {
        let created_at = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        let mut parcel = Parcel::new(client, address, created_at);

        parcel.number = self.repo.add(&parcel).inspect_err(|err| {
            warn!("event=parcel_register module=service status=error client={client} error={err}");
        })?;

        info!(
            "event=parcel_register module=service status=ok number={} client={client}",
            parcel.number
        );
        Ok(parcel)
    }

    /// Stores a caller-built parcel as-is.
    pub fn add(&self, parcel: &Parcel) -> RepoResult<ParcelNumber> {
        self.repo.add(parcel)
    }

    pub fn get(&self, number: ParcelNumber) -> RepoResult<Parcel> {
        self.repo.get(number)
    }

    /// Lists all parcels owned by `client`.
    pub fn client_parcels(&self, client: ClientId) -> RepoResult<Vec<Parcel>> {
        self.repo.get_by_client(client)
    }

    /// Advances the parcel one step along the delivery flow.
    ///
    /// Returns the status the parcel ends up with. `delivered` and
    /// unrecognized statuses are left unchanged.
    pub fn next_status(&self, number: ParcelNumber) -> RepoResult<ParcelStatus> {
        let parcel = self.repo.get(number)?;

        let Some(next) = parcel.status.next() else {
            info!(
                "event=parcel_next_status module=service status=skip number={number} current={}",
                parcel.status
            );
            return Ok(parcel.status);
        };

        self.repo.set_status(number, &next)?;
        info!(
            "event=parcel_next_status module=service status=ok number={number} from={} to={next}",
            parcel.status
        );
        Ok(next)
    }

    /// Overwrites the status without checking the transition.
    pub fn set_status(&self, number: ParcelNumber, status: &ParcelStatus) -> RepoResult<()> {
        self.repo.set_status(number, status)?;
        info!("event=parcel_set_status module=service status=ok number={number} to={status}");
        Ok(())
    }

    /// Changes the delivery address of a registered parcel.
    pub fn change_address(&self, number: ParcelNumber, address: &str) -> RepoResult<()> {
        match self.repo.set_address(number, address) {
            Ok(()) => {
                info!("event=parcel_change_address module=service status=ok number={number}");
                Ok(())
            }
            Err(err @ RepoError::NotRegistered(_)) => {
                warn!(
                    "event=parcel_change_address module=service status=rejected number={number} reason=not_registered"
                );
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    /// Deletes a registered parcel; other statuses are kept silently.
    ///
    /// Returns whether the parcel was removed.
    pub fn delete(&self, number: ParcelNumber) -> RepoResult<bool> {
        let removed = self.repo.delete(number)?;
        if removed {
            info!("event=parcel_delete module=service status=ok number={number}");
        } else {
            info!("event=parcel_delete module=service status=skip number={number} reason=not_registered");
        }
        Ok(removed)
    }
}
