//! Store-generated identity and the public document envelope.
//!
//! # Invariants
//! - A `RecordId` is a UUID v4 generated by the store, never by clients.
//! - `Document<T>` is the only shape handed to callers; its identity field is
//!   always serialized as `id`.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Identifier of one stored record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(Uuid);

impl RecordId {
    /// Generates a fresh identifier for a record about to be inserted.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parses a client-supplied identifier.
    ///
    /// Returns `None` for anything that is not a UUID; callers treat that the
    /// same as an unknown id.
    pub fn parse(value: &str) -> Option<Self> {
        Uuid::parse_str(value.trim()).ok().map(Self)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Display for RecordId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecordId {
    type Err = uuid::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(value.trim()).map(Self)
    }
}

/// A stored entity as returned to callers: payload fields plus `id`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document<T> {
    pub id: RecordId,
    #[serde(flatten)]
    pub body: T,
}

impl<T> Document<T> {
    pub fn new(id: RecordId, body: T) -> Self {
        Self { id, body }
    }
}
