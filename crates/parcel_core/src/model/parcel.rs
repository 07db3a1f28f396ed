//! Parcel domain model.
//!
//! # Responsibility
//! - Define the shipment record persisted in the `parcel` table.
//! - Map lifecycle statuses to and from their stored text form.
//!
//! # Invariants
//! - `number` is assigned by storage and never reused.
//! - `created_at` is set once at creation.
//! - Unrecognized stored statuses survive a read/write cycle unchanged.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Store-assigned primary key of a parcel.
pub type ParcelNumber = i64;

/// Identifier of the client owning a parcel.
pub type ClientId = i64;

/// Lifecycle stage of a parcel.
///
/// Only `Registered` gates behavior in the store. Values written by other
/// systems are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ParcelStatus {
    Registered,
    Sent,
    Delivered,
    Other(UnknownStatus),
}

/// Status text that matches none of the known stages.
///
/// Only built through [`ParcelStatus::parse`], so it never holds
/// `registered`, `sent` or `delivered`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnknownStatus(String);

impl UnknownStatus {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ParcelStatus {
    /// Maps status text to a stage; unknown text becomes `Other`.
    ///
    /// Matching is exact and case-sensitive.
    pub fn parse(value: impl Into<String>) -> Self {
        let value = value.into();
        match value.as_str() {
            "registered" => Self::Registered,
            "sent" => Self::Sent,
            "delivered" => Self::Delivered,
            _ => Self::Other(UnknownStatus(value)),
        }
    }

    /// Returns the stored text form.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Registered => "registered",
            Self::Sent => "sent",
            Self::Delivered => "delivered",
            Self::Other(value) => value.as_str(),
        }
    }

    /// Next stage in the delivery flow, if any.
    ///
    /// `Delivered` and unrecognized statuses have no successor.
    pub fn next(&self) -> Option<Self> {
        match self {
            Self::Registered => Some(Self::Sent),
            Self::Sent => Some(Self::Delivered),
            Self::Delivered | Self::Other(_) => None,
        }
    }
}

impl Display for ParcelStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for ParcelStatus {
    fn from(value: String) -> Self {
        Self::parse(value)
    }
}

impl From<&str> for ParcelStatus {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<ParcelStatus> for String {
    fn from(value: ParcelStatus) -> Self {
        match value {
            ParcelStatus::Other(UnknownStatus(raw)) => raw,
            known => known.as_str().to_string(),
        }
    }
}

/// One shipment record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parcel {
    /// Ignored on insert; filled from storage on reads.
    pub number: ParcelNumber,
    pub client: ClientId,
    pub status: ParcelStatus,
    /// Free-text delivery address.
    pub address: String,
    /// Creation timestamp as written by the caller.
    pub created_at: String,
}

impl Parcel {
    /// Builds a registered parcel that has not been stored yet.
    pub fn new(client: ClientId, address: impl Into<String>, created_at: impl Into<String>) -> Self {
        Self {
            number: 0,
            client,
            status: ParcelStatus::Registered,
            address: address.into(),
            created_at: created_at.into(),
        }
    }

    /// Whether address changes and deletion are still allowed.
    pub fn is_registered(&self) -> bool {
        self.status == ParcelStatus::Registered
    }
}

#[cfg(test)]
mod tests {
    use super::{Parcel, ParcelStatus};

    #[test]
    fn status_text_roundtrip_keeps_unknown_values() {
        for raw in ["registered", "sent", "delivered", "lost_in_customs"] {
            assert_eq!(ParcelStatus::parse(raw).as_str(), raw);
        }
        assert!(matches!(
            ParcelStatus::parse("lost_in_customs"),
            ParcelStatus::Other(ref unknown) if unknown.as_str() == "lost_in_customs"
        ));
    }

    #[test]
    fn status_is_case_sensitive() {
        assert!(matches!(
            ParcelStatus::parse("Registered"),
            ParcelStatus::Other(_)
        ));
    }

    #[test]
    fn known_text_never_lands_in_other() {
        for (raw, expected) in [
            ("registered", ParcelStatus::Registered),
            ("sent", ParcelStatus::Sent),
            ("delivered", ParcelStatus::Delivered),
        ] {
            assert_eq!(ParcelStatus::from(raw), expected);
            assert_eq!(ParcelStatus::from(raw.to_string()), expected);
        }

        let mut parcel = Parcel::new(1, "Elm St 5", "2024-01-01T00:00:00Z");
        parcel.status = ParcelStatus::from("registered");
        assert!(parcel.is_registered());
    }

    #[test]
    fn next_follows_delivery_flow() {
        assert_eq!(ParcelStatus::Registered.next(), Some(ParcelStatus::Sent));
        assert_eq!(ParcelStatus::Sent.next(), Some(ParcelStatus::Delivered));
        assert_eq!(ParcelStatus::Delivered.next(), None);
        assert_eq!(ParcelStatus::from("returned").next(), None);
    }

    #[test]
    fn new_parcel_starts_registered() {
        let parcel = Parcel::new(7, "Elm St 5", "2024-01-01T00:00:00Z");
        assert_eq!(parcel.number, 0);
        assert!(parcel.is_registered());
    }

    #[test]
    fn status_serializes_as_plain_string() {
        let json = serde_json::to_string(&ParcelStatus::Delivered).unwrap();
        assert_eq!(json, "\"delivered\"");

        let parsed: ParcelStatus = serde_json::from_str("\"on_hold\"").unwrap();
        assert_eq!(parsed, ParcelStatus::parse("on_hold"));

        let known: ParcelStatus = serde_json::from_str("\"sent\"").unwrap();
        assert_eq!(known, ParcelStatus::Sent);
    }
}
