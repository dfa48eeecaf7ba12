//! Core type definitions for filedb.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Identifier of a record within its table.
///
/// IDs are assigned as `len(records) + 1` at insertion time. They are not
/// renumbered on deletion, and because the counter follows the current
/// length, an ID can be handed out again after a delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(u64);

impl RecordId {
    /// Creates a new record ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Returns the following ID.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for RecordId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// A single stored item: an ID plus an untyped payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Assigned by the owning table.
    pub id: RecordId,
    /// Arbitrary JSON payload, no schema.
    pub data: Value,
}

impl Record {
    /// Creates a record with an explicit ID.
    #[must_use]
    pub fn new(id: RecordId, data: Value) -> Self {
        Self { id, data }
    }
}
