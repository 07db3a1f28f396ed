//! Parcel store contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD over the `parcel` table with a `registered` gate on
//!   address changes and deletion.
//! - Pass storage faults through without retries.
//!
//! # Invariants
//! - The store borrows an externally owned connection and never creates schema.
//! - `set_address` fails with `NotRegistered` when the parcel left `registered`.
//! - `delete` on a non-registered parcel succeeds without removing it.

use crate::db::DbError;
use crate::model::parcel::{ClientId, Parcel, ParcelNumber, ParcelStatus};
use rusqlite::{named_params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const PARCEL_TABLE: &str = "parcel";
const PARCEL_COLUMNS: [&str; 5] = ["number", "client", "status", "address", "created_at"];

const PARCEL_BY_NUMBER_SQL: &str = "SELECT number, client, status, address, created_at
FROM parcel
WHERE number = :number;";

const PARCELS_BY_CLIENT_SQL: &str = "SELECT number, client, status, address, created_at
FROM parcel
WHERE client = :client;";

const INSERT_PARCEL_SQL: &str = "INSERT INTO parcel (client, status, address, created_at)
VALUES (:client, :status, :address, :created_at);";

const UPDATE_STATUS_SQL: &str = "UPDATE parcel SET status = :status WHERE number = :number;";

const UPDATE_REGISTERED_ADDRESS_SQL: &str = "UPDATE parcel SET address = :address
WHERE number = :number AND status = :status;";

const DELETE_REGISTERED_SQL: &str = "DELETE FROM parcel WHERE number = :number AND status = :status;";

pub type RepoResult<T> = Result<T, RepoError>;

/// Error returned by parcel store operations.
#[derive(Debug)]
pub enum RepoError {
    /// No row carries the requested number.
    NotFound(ParcelNumber),
    /// The operation requires the parcel to still be registered.
    NotRegistered(ParcelNumber),
    /// Storage fault from SQLite, passed through unchanged.
    Db(DbError),
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(number) => write!(f, "parcel with number {number} not found"),
            Self::NotRegistered(number) => {
                write!(f, "parcel with number {number} is not in registered status")
            }
            Self::Db(err) => write!(f, "{err}"),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "missing required column `{table}.{column}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Parcel store contract.
pub trait ParcelRepository {
    /// Inserts a parcel and returns the number assigned by storage.
    ///
    /// `parcel.number` is ignored.
    fn add(&self, parcel: &Parcel) -> RepoResult<ParcelNumber>;
    /// Loads one parcel or fails with `NotFound`.
    fn get(&self, number: ParcelNumber) -> RepoResult<Parcel>;
    /// Lists all parcels of one client in natural query order.
    fn get_by_client(&self, client: ClientId) -> RepoResult<Vec<Parcel>>;
    /// Overwrites the status without checking the transition.
    fn set_status(&self, number: ParcelNumber, status: &ParcelStatus) -> RepoResult<()>;
    /// Overwrites the address of a registered parcel.
    fn set_address(&self, number: ParcelNumber, address: &str) -> RepoResult<()>;
    /// Removes a registered parcel; other statuses are left untouched.
    ///
    /// Returns whether a row was removed. Skipping is not an error.
    fn delete(&self, number: ParcelNumber) -> RepoResult<bool>;
}

/// SQLite-backed parcel store.
pub struct SqliteParcelRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteParcelRepository<'conn> {
    /// Wraps a connection whose `parcel` table is already in place.
    ///
    /// The table may come from anywhere; only its shape is checked.
    ///
    /// # Errors
    /// - `MissingRequiredTable` / `MissingRequiredColumn` when the table shape
    ///   is incomplete.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_parcel_connection_ready(conn)?;
        Ok(Self { conn })
    }

    // Guarded on status so a change landing after the caller's read wins.
    fn update_address_if_registered(&self, number: ParcelNumber, address: &str) -> RepoResult<()> {
        let changed = self.conn.execute(
            UPDATE_REGISTERED_ADDRESS_SQL,
            named_params! {
                ":address": address,
                ":number": number,
                ":status": ParcelStatus::Registered.as_str(),
            },
        )?;

        if changed == 0 {
            return Err(RepoError::NotRegistered(number));
        }

        Ok(())
    }

    fn delete_if_registered(&self, number: ParcelNumber) -> RepoResult<bool> {
        let removed = self.conn.execute(
            DELETE_REGISTERED_SQL,
            named_params! {
                ":number": number,
                ":status": ParcelStatus::Registered.as_str(),
            },
        )?;

        Ok(removed > 0)
    }
}

impl ParcelRepository for SqliteParcelRepository<'_> {
    fn add(&self, parcel: &Parcel) -> RepoResult<ParcelNumber> {
        self.conn.execute(
            INSERT_PARCEL_SQL,
            named_params! {
                ":client": parcel.client,
                ":status": parcel.status.as_str(),
                ":address": parcel.address.as_str(),
                ":created_at": parcel.created_at.as_str(),
            },
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get(&self, number: ParcelNumber) -> RepoResult<Parcel> {
        let mut stmt = self.conn.prepare_cached(PARCEL_BY_NUMBER_SQL)?;

        stmt.query_row(named_params! { ":number": number }, parse_parcel_row)
            .optional()?
            .ok_or(RepoError::NotFound(number))
    }

    fn get_by_client(&self, client: ClientId) -> RepoResult<Vec<Parcel>> {
        let mut stmt = self.conn.prepare_cached(PARCELS_BY_CLIENT_SQL)?;
        let mut rows = stmt.query(named_params! { ":client": client })?;
        let mut parcels = Vec::new();

        while let Some(row) = rows.next()? {
            parcels.push(parse_parcel_row(row)?);
        }

        Ok(parcels)
    }

    fn set_status(&self, number: ParcelNumber, status: &ParcelStatus) -> RepoResult<()> {
        let parcel = self.get(number)?;

        let changed = self.conn.execute(
            UPDATE_STATUS_SQL,
            named_params! {
                ":status": status.as_str(),
                ":number": parcel.number,
            },
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(number));
        }

        Ok(())
    }

    fn set_address(&self, number: ParcelNumber, address: &str) -> RepoResult<()> {
        let parcel = self.get(number)?;
        if !parcel.is_registered() {
            return Err(RepoError::NotRegistered(number));
        }

        self.update_address_if_registered(parcel.number, address)
    }

    fn delete(&self, number: ParcelNumber) -> RepoResult<bool> {
        let parcel = self.get(number)?;
        if !parcel.is_registered() {
            return Ok(false);
        }

        self.delete_if_registered(parcel.number)
    }
}

fn parse_parcel_row(row: &Row<'_>) -> rusqlite::Result<Parcel> {
    let status: String = row.get("status")?;
    Ok(Parcel {
        number: row.get("number")?,
        client: row.get("client")?,
        status: ParcelStatus::parse(status),
        address: row.get("address")?,
        created_at: row.get("created_at")?,
    })
}

fn ensure_parcel_connection_ready(conn: &Connection) -> RepoResult<()> {
    if !table_exists(conn, PARCEL_TABLE)? {
        return Err(RepoError::MissingRequiredTable(PARCEL_TABLE));
    }

    for column in PARCEL_COLUMNS {
        if !table_has_column(conn, PARCEL_TABLE, column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: PARCEL_TABLE,
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
