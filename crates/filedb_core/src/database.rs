//! Database facade.

use crate::config::Config;
use crate::dir::{validate_table_name, DatabaseDir};
use crate::error::{CoreError, CoreResult};
use crate::stats::DatabaseStats;
use crate::table::Table;
use crate::types::{Record, RecordId};
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// The main database handle.
///
/// A `Database` is a directory of table files plus an in-memory map from
/// table name to [`Table`]. Every mutation rewrites the affected table's
/// file before returning.
///
/// # Locking
///
/// Two lock domains exist: the table map, and one lock per table. Mutating
/// calls hold the map lock only while looking up the table and applying the
/// in-memory change. The file write happens after the map lock is released,
/// so a slow disk does not block unrelated tables. In that window nothing
/// stops a concurrent [`Database::drop_table`] from removing the same table;
/// the in-flight write may then recreate the file after it was deleted.
///
/// If a write fails after the in-memory change succeeded, memory and disk
/// disagree until the next successful save of that table. Nothing
/// reconciles them automatically.
///
/// # Example
///
/// ```rust,ignore
/// use filedb_core::Database;
/// use serde_json::json;
///
/// let db = Database::open("example_db")?;
/// db.create_table("users")?;
/// let id = db.add_record("users", json!({"name": "ada"}))?;
/// let record = db.get_record("users", id)?;
/// ```
pub struct Database {
    /// Database name (last path component).
    name: String,
    /// Configuration.
    config: Config,
    /// Database directory.
    dir: DatabaseDir,
    /// Registered tables by name.
    tables: Mutex<HashMap<String, Arc<Table>>>,
    /// Operation counters.
    stats: DatabaseStats,
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("name", &self.name)
            .field("path", &self.dir.path())
            .field("tables", &self.table_names())
            .finish()
    }
}

impl Database {
    /// Opens a database directory, creating it if needed.
    ///
    /// Every `*.json` file in the directory is loaded as a table named after
    /// the file stem.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or read, or if
    /// any table file fails to load. A single bad table aborts the open.
    pub fn open(path: impl AsRef<Path>) -> CoreResult<Self> {
        Self::open_with_config(path, Config::default())
    }

    /// Opens a database directory with custom configuration.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use filedb_core::{Config, Database};
    ///
    /// let config = Config::default()
    ///     .create_if_missing(false)
    ///     .sync_on_save(true);
    ///
    /// let db = Database::open_with_config("existing_db", config)?;
    /// ```
    pub fn open_with_config(path: impl AsRef<Path>, config: Config) -> CoreResult<Self> {
        let path = path.as_ref();
        let dir = DatabaseDir::open(path, &config)?;

        let mut tables = HashMap::new();
        for (table_name, file) in dir.table_files()? {
            let table = Table::new(table_name.as_str());
            table.load(&file)?;
            debug!(table = %table_name, records = table.len(), "loaded table");
            tables.insert(table_name, Arc::new(table));
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        info!(database = %name, tables = tables.len(), "opened database");

        Ok(Self {
            name,
            config,
            dir,
            tables: Mutex::new(tables),
            stats: DatabaseStats::new(),
        })
    }

    /// Returns the database name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the database directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Returns the path of the file backing `table`, registered or not.
    #[must_use]
    pub fn table_path(&self, table: &str) -> PathBuf {
        self.dir.table_path(table)
    }

    /// Returns the configuration the database was opened with.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the operation counters.
    #[must_use]
    pub fn stats(&self) -> &DatabaseStats {
        &self.stats
    }

    /// Returns the registered table names, sorted.
    #[must_use]
    pub fn table_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tables.lock().keys().cloned().collect();
        names.sort();
        names
    }

    /// Returns true if a table with this name is registered.
    #[must_use]
    pub fn has_table(&self, name: &str) -> bool {
        self.tables.lock().contains_key(name)
    }

    /// Returns a shared handle to a registered table.
    ///
    /// The handle stays usable after the table is dropped from the database;
    /// saving through it writes the file again.
    #[must_use]
    pub fn table(&self, name: &str) -> Option<Arc<Table>> {
        self.tables.lock().get(name).cloned()
    }

    /// Creates an empty table and writes its file.
    ///
    /// # Errors
    ///
    /// Returns `TableAlreadyExists` if the name is taken, `InvalidTableName`
    /// if it cannot be a file name, or an I/O error from the first save. On
    /// a save failure the table stays registered in memory.
    pub fn create_table(&self, name: &str) -> CoreResult<()> {
        self.tracked(|| {
            validate_table_name(name)?;

            let table = {
                let mut tables = self.tables.lock();
                if tables.contains_key(name) {
                    return Err(CoreError::table_already_exists(name));
                }
                let table = Arc::new(Table::new(name));
                tables.insert(name.to_string(), Arc::clone(&table));
                table
            };

            self.persist(name, &table)?;
            self.stats.record_table_created();
            info!(table = %name, "created table");
            Ok(())
        })
    }

    /// Deletes a table's file and unregisters it.
    ///
    /// # Errors
    ///
    /// Returns `TableNotFound` if absent, or the I/O error from removing the
    /// file. If removal fails the table stays registered.
    pub fn drop_table(&self, name: &str) -> CoreResult<()> {
        self.tracked(|| {
            let mut tables = self.tables.lock();
            if !tables.contains_key(name) {
                return Err(CoreError::table_not_found(name));
            }

            self.dir.remove_table_file(name)?;
            tables.remove(name);

            self.stats.record_table_dropped();
            info!(table = %name, "dropped table");
            Ok(())
        })
    }

    /// Rewrites a table's file from its in-memory state.
    ///
    /// # Errors
    ///
    /// Returns `TableNotFound` if absent, or the save error.
    pub fn save_table(&self, name: &str) -> CoreResult<()> {
        self.tracked(|| {
            let table = self.lookup(name)?;
            self.persist(name, &table)
        })
    }

    /// Appends a record to a table and returns its assigned ID.
    ///
    /// # Errors
    ///
    /// Returns `TableNotFound` if absent, or the save error.
    pub fn add_record(&self, table: &str, data: Value) -> CoreResult<RecordId> {
        self.tracked(|| {
            let (handle, id) = {
                let tables = self.tables.lock();
                let handle = Self::get_table(&tables, table)?;
                let id = handle.add(data);
                (handle, id)
            };

            self.stats.record_write();
            debug!(table = %table, id = id.as_u64(), "added record");
            self.persist(table, &handle)?;
            Ok(id)
        })
    }

    /// Replaces the payload of a record.
    ///
    /// # Errors
    ///
    /// Returns `TableNotFound` or `RecordNotFound` if either is absent, or
    /// the save error.
    pub fn update_record(&self, table: &str, id: RecordId, data: Value) -> CoreResult<()> {
        self.tracked(|| {
            let handle = {
                let tables = self.tables.lock();
                let handle = Self::get_table(&tables, table)?;
                handle.update(id, data)?;
                handle
            };

            self.stats.record_write();
            debug!(table = %table, id = id.as_u64(), "updated record");
            self.persist(table, &handle)
        })
    }

    /// Removes a record from a table.
    ///
    /// # Errors
    ///
    /// Returns `TableNotFound` or `RecordNotFound` if either is absent, or
    /// the save error.
    pub fn delete_record(&self, table: &str, id: RecordId) -> CoreResult<()> {
        self.tracked(|| {
            let handle = {
                let tables = self.tables.lock();
                let handle = Self::get_table(&tables, table)?;
                handle.delete(id)?;
                handle
            };

            self.stats.record_delete();
            debug!(table = %table, id = id.as_u64(), "deleted record");
            self.persist(table, &handle)
        })
    }

    /// Returns a copy of a record. Nothing is written.
    ///
    /// # Errors
    ///
    /// Returns `TableNotFound` or `RecordNotFound` if either is absent.
    pub fn get_record(&self, table: &str, id: RecordId) -> CoreResult<Record> {
        self.tracked(|| {
            let tables = self.tables.lock();
            let record = Self::get_table(&tables, table)?.get(id)?;
            self.stats.record_read();
            Ok(record)
        })
    }

    /// Returns all records of a table in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `TableNotFound` if absent.
    pub fn records(&self, table: &str) -> CoreResult<Vec<Record>> {
        self.tracked(|| Ok(self.lookup(table)?.records()))
    }

    fn lookup(&self, name: &str) -> CoreResult<Arc<Table>> {
        Self::get_table(&self.tables.lock(), name)
    }

    fn get_table(tables: &HashMap<String, Arc<Table>>, name: &str) -> CoreResult<Arc<Table>> {
        tables
            .get(name)
            .cloned()
            .ok_or_else(|| CoreError::table_not_found(name))
    }

    /// Writes `table` to its file. Must be called without the map lock held.
    fn persist(&self, name: &str, table: &Table) -> CoreResult<()> {
        let path = self.dir.table_path(name);
        match table.save_with(&path, &self.config) {
            Ok(bytes) => {
                self.stats.record_save(bytes);
                debug!(table = %name, bytes, "saved table");
                Ok(())
            }
            Err(e) => {
                warn!(table = %name, error = %e, "failed to save table; memory and disk now differ");
                Err(e)
            }
        }
    }

    fn tracked<T>(&self, op: impl FnOnce() -> CoreResult<T>) -> CoreResult<T> {
        let result = op();
        if result.is_err() {
            self.stats.record_error();
        }
        result
    }
}
