//! Test fixtures and database helpers.
//!
//! Provides convenience functions for setting up test databases
//! and common test scenarios.

use filedb_core::{Config, Database};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A test database in a temporary directory, removed on drop.
pub struct TestDatabase {
    /// The database instance.
    pub db: Database,
    /// Database directory inside the temporary directory.
    path: PathBuf,
    /// The temporary directory (kept alive to prevent cleanup).
    _temp_dir: TempDir,
}

impl TestDatabase {
    /// Creates a fresh database with the default configuration.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates a fresh database with a custom configuration.
    pub fn with_config(config: Config) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("test_db");
        let db = Database::open_with_config(&path, config).expect("Failed to open database");

        Self {
            db,
            path,
            _temp_dir: temp_dir,
        }
    }

    /// Returns the database directory.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replaces the handle with a freshly opened one, reloading every table
    /// from disk.
    pub fn reopen(&mut self) {
        let config = self.db.config().clone();
        self.db = Database::open_with_config(&self.path, config).expect("Failed to reopen database");
    }
}

impl Default for TestDatabase {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Deref for TestDatabase {
    type Target = Database;

    fn deref(&self) -> &Self::Target {
        &self.db
    }
}

/// Runs a test with a temporary database.
///
/// # Example
///
/// ```rust,ignore
/// use filedb_testkit::with_temp_db;
///
/// #[test]
/// fn my_test() {
///     with_temp_db(|db| {
///         db.create_table("test").unwrap();
///     });
/// }
/// ```
pub fn with_temp_db<F, R>(f: F) -> R
where
    F: FnOnce(&Database) -> R,
{
    let test_db = TestDatabase::new();
    f(&test_db.db)
}

/// Runs a test with a temporary database and its directory path.
pub fn with_temp_db_path<F, R>(f: F) -> R
where
    F: FnOnce(&Database, &Path) -> R,
{
    let test_db = TestDatabase::new();
    f(&test_db.db, test_db.path())
}

/// Test scenario helpers.
pub mod scenarios {
    use super::*;
    use serde_json::json;

    /// Creates a database with one table holding `record_count` records.
    ///
    /// Record `n` carries `{"n": n}` as its payload.
    pub fn populated_database(table: &str, record_count: usize) -> TestDatabase {
        let test_db = TestDatabase::new();
        test_db.create_table(table).expect("Failed to create table");

        for n in 1..=record_count {
            test_db
                .add_record(table, json!({ "n": n }))
                .expect("Failed to add record");
        }

        test_db
    }

    /// Creates a database with several empty tables.
    pub fn multi_table_database(tables: &[&str]) -> TestDatabase {
        let test_db = TestDatabase::new();
        for table in tables {
            test_db.create_table(table).expect("Failed to create table");
        }
        test_db
    }
}
