//! Error types for filedb core.

use crate::types::RecordId;
use std::io;
use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in filedb core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// I/O error while creating, listing, reading, writing, or removing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Stored table content could not be parsed, or a value could not be encoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A table with this name is already registered.
    #[error("table {name} already exists")]
    TableAlreadyExists {
        /// Name of the table.
        name: String,
    },

    /// No table with this name is registered.
    #[error("table {name} does not exist")]
    TableNotFound {
        /// Name of the table.
        name: String,
    },

    /// No record with this ID is present in the table.
    #[error("record with ID {} not found in table {table}", .id.as_u64())]
    RecordNotFound {
        /// The table searched.
        table: String,
        /// The record ID that was not found.
        id: RecordId,
    },

    /// The table name cannot be mapped to a file inside the database directory.
    #[error("invalid table name {name:?}: {reason}")]
    InvalidTableName {
        /// The rejected name.
        name: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// The database directory is missing or unexpectedly present.
    #[error("invalid database format: {message}")]
    InvalidFormat {
        /// Description of the format issue.
        message: String,
    },
}

impl CoreError {
    /// Creates a table already exists error.
    pub fn table_already_exists(name: impl Into<String>) -> Self {
        Self::TableAlreadyExists { name: name.into() }
    }

    /// Creates a table not found error.
    pub fn table_not_found(name: impl Into<String>) -> Self {
        Self::TableNotFound { name: name.into() }
    }

    /// Creates a record not found error.
    pub fn record_not_found(table: impl Into<String>, id: RecordId) -> Self {
        Self::RecordNotFound {
            table: table.into(),
            id,
        }
    }

    /// Creates an invalid table name error.
    pub fn invalid_table_name(name: impl Into<String>, reason: &'static str) -> Self {
        Self::InvalidTableName {
            name: name.into(),
            reason,
        }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            message: message.into(),
        }
    }

    /// Returns true for either NotFound condition (table or record).
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::TableNotFound { .. } | Self::RecordNotFound { .. }
        )
    }
}
