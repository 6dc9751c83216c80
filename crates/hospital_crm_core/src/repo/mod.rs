//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define per-collection data access contracts (insert one, find many by
//!   filter, lookup by id).
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Write paths validate payloads before any SQL mutation.
//! - Read paths reject invalid persisted state instead of masking it.
//! - Repository APIs return semantic errors (`NotFound`, `Overlap`) in
//!   addition to DB transport errors.

use crate::db::DbError;
use crate::model::record::RecordId;
use crate::model::validation::ValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod appointment_repo;
pub mod patient_repo;
pub mod provider_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error shared by every collection.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Db(DbError),
    /// No record with this id. Unparseable ids land here too.
    NotFound {
        collection: &'static str,
        id: String,
    },
    /// The candidate appointment intersects an existing one for the provider.
    Overlap { provider_id: String },
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { collection, id } => write!(f, "{collection} not found: {id}"),
            Self::Overlap { provider_id } => write!(
                f,
                "time slot overlaps with another appointment for provider {provider_id}"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound { .. } | Self::Overlap { .. } | Self::InvalidData(_) => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
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

fn parse_record_id(value: &str, column: &str) -> RepoResult<RecordId> {
    RecordId::parse(value)
        .ok_or_else(|| RepoError::InvalidData(format!("invalid id value `{value}` in {column}")))
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}

fn int_to_bool(value: i64, column: &str) -> RepoResult<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(RepoError::InvalidData(format!(
            "invalid boolean value `{other}` in {column}"
        ))),
    }
}

fn limit_to_sql(limit: u32) -> rusqlite::types::Value {
    rusqlite::types::Value::Integer(i64::from(limit))
}
