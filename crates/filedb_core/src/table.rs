//! In-memory tables mirrored to a single JSON file.
//!
//! A table file looks like:
//!
//! ```text
//! {
//!   "name": "users",
//!   "records": [
//!     { "id": 1, "data": { "x": 1 } },
//!     { "id": 2, "data": "second" }
//!   ]
//! }
//! ```
//!
//! Every save rewrites the whole file in place. There is no temp-file and
//! rename step, so a crash mid-write can leave a truncated file behind.

use crate::config::Config;
use crate::error::{CoreError, CoreResult};
use crate::types::{Record, RecordId};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

/// Name and records, serialized as the table file body.
#[derive(Debug, Clone, Default, Serialize)]
struct TableState {
    name: String,
    records: Vec<Record>,
}

/// Table file body as read back. Absent or `null` fields keep the
/// in-memory value instead of clearing it.
#[derive(Debug, Deserialize)]
struct StoredTable {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    records: Option<Vec<Record>>,
}

/// An ordered sequence of records guarded by its own lock.
///
/// All operations lock for their full duration, including file I/O in
/// [`Table::load`] and [`Table::save`].
///
/// # Example
///
/// ```rust,ignore
/// use filedb_core::Table;
/// use serde_json::json;
///
/// let table = Table::new("users");
/// let id = table.add(json!({"name": "ada"}));
/// assert_eq!(id.as_u64(), 1);
/// table.save(Path::new("users.json"))?;
/// ```
#[derive(Debug)]
pub struct Table {
    state: Mutex<TableState>,
}

impl Table {
    /// Creates an empty table.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            state: Mutex::new(TableState {
                name: name.into(),
                records: Vec::new(),
            }),
        }
    }

    /// Returns the table name.
    #[must_use]
    pub fn name(&self) -> String {
        self.state.lock().name.clone()
    }

    /// Returns the number of live records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.lock().records.len()
    }

    /// Returns true if the table holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.lock().records.is_empty()
    }

    /// Returns a snapshot of all records in insertion order.
    #[must_use]
    pub fn records(&self) -> Vec<Record> {
        self.state.lock().records.clone()
    }

    /// Loads the table from `path`, replacing the in-memory name and records.
    ///
    /// A missing file, or one holding only `null`, is not an error: the
    /// table is left as it was.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file exists but cannot be read, and
    /// `Serialization` if its content is not a valid table document.
    pub fn load(&self, path: &Path) -> CoreResult<()> {
        let mut state = self.state.lock();

        let content = match fs::read(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e.into()),
        };

        let Some(stored) = serde_json::from_slice::<Option<StoredTable>>(&content)? else {
            return Ok(());
        };
        if let Some(name) = stored.name {
            state.name = name;
        }
        if let Some(records) = stored.records {
            state.records = records;
        }

        Ok(())
    }

    /// Writes the full table to `path` using the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or writing fails.
    pub fn save(&self, path: &Path) -> CoreResult<()> {
        self.save_with(path, &Config::default()).map(|_| ())
    }

    /// Writes the full table to `path`, overwriting any existing content.
    ///
    /// Returns the number of bytes written.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or writing fails.
    pub fn save_with(&self, path: &Path, config: &Config) -> CoreResult<u64> {
        let state = self.state.lock();

        let bytes = if config.pretty {
            serde_json::to_vec_pretty(&*state)?
        } else {
            serde_json::to_vec(&*state)?
        };

        let mut file = File::create(path)?;
        file.write_all(&bytes)?;
        if config.sync_on_save {
            file.sync_all()?;
        }

        Ok(bytes.len() as u64)
    }

    /// Appends a record and returns its assigned ID (`len + 1`).
    ///
    /// No uniqueness check is made: after a delete, the assigned ID may
    /// equal one still held by a live record.
    pub fn add(&self, data: Value) -> RecordId {
        let mut state = self.state.lock();
        let id = RecordId::new(state.records.len() as u64 + 1);
        state.records.push(Record::new(id, data));
        id
    }

    /// Replaces the payload of the first record with `id`.
    ///
    /// # Errors
    ///
    /// Returns `RecordNotFound` if no record matches.
    pub fn update(&self, id: RecordId, data: Value) -> CoreResult<()> {
        let mut guard = self.state.lock();
        let state = &mut *guard;
        if let Some(record) = state.records.iter_mut().find(|r| r.id == id) {
            record.data = data;
            return Ok(());
        }
        Err(CoreError::record_not_found(state.name.clone(), id))
    }

    /// Removes the first record with `id`, keeping the order of the rest.
    ///
    /// # Errors
    ///
    /// Returns `RecordNotFound` if no record matches.
    pub fn delete(&self, id: RecordId) -> CoreResult<()> {
        let mut state = self.state.lock();
        match state.records.iter().position(|r| r.id == id) {
            Some(index) => {
                state.records.remove(index);
                Ok(())
            }
            None => Err(CoreError::record_not_found(state.name.clone(), id)),
        }
    }

    /// Returns a copy of the first record with `id`.
    ///
    /// # Errors
    ///
    /// Returns `RecordNotFound` if no record matches.
    pub fn get(&self, id: RecordId) -> CoreResult<Record> {
        let state = self.state.lock();
        state
            .records
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| CoreError::record_not_found(state.name.clone(), id))
    }
}
