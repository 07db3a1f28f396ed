//! SQLite connection helpers for callers that do not bring their own handle.
//!
//! The parcel store never opens connections or creates schema; these helpers
//! live outside it and produce a handle the store can borrow.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;

pub use open::{ensure_schema, open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Storage fault raised by SQLite.
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "sqlite: {err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
