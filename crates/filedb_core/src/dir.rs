//! Database directory management.
//!
//! A database is a directory holding one file per table:
//!
//! ```text
//! <db_path>/
//! ├─ users.json        # table "users"
//! ├─ posts.json        # table "posts"
//! └─ notes.txt         # ignored: not a table file
//! ```
//!
//! Table names map directly to file stems, so names that would escape the
//! directory or produce hidden files are rejected by [`validate_table_name`].

use crate::config::Config;
use crate::error::{CoreError, CoreResult};
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// Extension of table files within the database directory.
pub const TABLE_EXTENSION: &str = "json";

/// Manages the database directory structure.
#[derive(Debug)]
pub struct DatabaseDir {
    /// Root directory path.
    path: PathBuf,
    /// Whether directory entries are fsynced after files are removed.
    sync: bool,
}

impl DatabaseDir {
    /// Opens or creates a database directory.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The directory doesn't exist and `create_if_missing` is false
    /// - The directory exists and `error_if_exists` is true
    /// - The path exists but is not a directory (`Io`)
    /// - I/O errors occur while creating it
    pub fn open(path: &Path, config: &Config) -> CoreResult<Self> {
        if path.exists() {
            if config.error_if_exists {
                return Err(CoreError::invalid_format(format!(
                    "database already exists and error_if_exists is true: {}",
                    path.display()
                )));
            }
        } else if config.create_if_missing {
            fs::create_dir_all(path)?;
        } else {
            return Err(CoreError::invalid_format(format!(
                "database directory does not exist: {}",
                path.display()
            )));
        }

        // A regular file in place of the directory fails here with the OS
        // error (ENOTDIR).
        fs::read_dir(path)?;

        Ok(Self {
            path: path.to_path_buf(),
            sync: config.sync_on_save,
        })
    }

    /// Returns the path to the database directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the path of the file backing `table`.
    #[must_use]
    pub fn table_path(&self, table: &str) -> PathBuf {
        self.path.join(format!("{table}.{TABLE_EXTENSION}"))
    }

    /// Lists table files as `(table name, path)` pairs, sorted by name.
    ///
    /// Only regular files with the table extension count; everything else
    /// in the directory is ignored.
    pub fn table_files(&self) -> CoreResult<Vec<(String, PathBuf)>> {
        let mut tables = Vec::new();

        for entry in fs::read_dir(&self.path)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }

            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(TABLE_EXTENSION) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            tables.push((stem.to_string(), path));
        }

        tables.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(tables)
    }

    /// Removes the file backing `table`.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be removed, including when it is
    /// already gone.
    pub fn remove_table_file(&self, table: &str) -> CoreResult<()> {
        fs::remove_file(self.table_path(table))?;
        if self.sync {
            self.sync_directory()?;
        }
        Ok(())
    }

    #[cfg(unix)]
    fn sync_directory(&self) -> CoreResult<()> {
        File::open(&self.path)?.sync_all()?;
        Ok(())
    }

    #[cfg(not(unix))]
    fn sync_directory(&self) -> CoreResult<()> {
        // Directory handles cannot be fsynced on this platform
        Ok(())
    }
}

/// Checks that `name` maps to a plain file inside the database directory.
///
/// # Errors
///
/// Returns `InvalidTableName` for empty names, names containing a path
/// separator or NUL, and names starting with `.`.
pub fn validate_table_name(name: &str) -> CoreResult<()> {
    if name.is_empty() {
        return Err(CoreError::invalid_table_name(name, "name is empty"));
    }
    if name.starts_with('.') {
        return Err(CoreError::invalid_table_name(name, "name starts with '.'"));
    }
    if name.contains(['/', '\\', '\0']) {
        return Err(CoreError::invalid_table_name(
            name,
            "name contains a path separator",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn open_creates_directory() {
        let temp = tempdir().unwrap();
        let db_path = temp.path().join("new_db");

        assert!(!db_path.exists());

        let dir = DatabaseDir::open(&db_path, &Config::default()).unwrap();
        assert!(db_path.is_dir());
        assert_eq!(dir.path(), db_path);
    }

    #[test]
    fn open_fails_if_not_exists_and_no_create() {
        let temp = tempdir().unwrap();
        let db_path = temp.path().join("nonexistent");

        let config = Config::new().create_if_missing(false);
        let result = DatabaseDir::open(&db_path, &config);
        assert!(matches!(result, Err(CoreError::InvalidFormat { .. })));
        assert!(!db_path.exists());
    }

    #[test]
    fn open_fails_if_exists_and_error_if_exists() {
        let temp = tempdir().unwrap();

        let config = Config::new().error_if_exists(true);
        let result = DatabaseDir::open(temp.path(), &config);
        assert!(matches!(result, Err(CoreError::InvalidFormat { .. })));
    }

    #[test]
    fn open_fails_on_regular_file() {
        let temp = tempdir().unwrap();
        let file_path = temp.path().join("plain");
        fs::write(&file_path, b"x").unwrap();

        let result = DatabaseDir::open(&file_path, &Config::default());
        assert!(matches!(result, Err(CoreError::Io(_))));
    }

    #[test]
    fn table_files_filters_and_sorts() {
        let temp = tempdir().unwrap();
        let dir = DatabaseDir::open(temp.path(), &Config::default()).unwrap();

        fs::write(temp.path().join("zeta.json"), b"{}").unwrap();
        fs::write(temp.path().join("alpha.json"), b"{}").unwrap();
        fs::write(temp.path().join("notes.txt"), b"").unwrap();
        fs::create_dir(temp.path().join("nested.json")).unwrap();

        let names: Vec<String> = dir
            .table_files()
            .unwrap()
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }

    #[test]
    fn remove_missing_file_is_io_error() {
        let temp = tempdir().unwrap();
        let dir = DatabaseDir::open(temp.path(), &Config::default()).unwrap();

        let result = dir.remove_table_file("ghost");
        assert!(matches!(result, Err(CoreError::Io(_))));
    }

    #[test]
    fn paths_are_correct() {
        let temp = tempdir().unwrap();
        let dir = DatabaseDir::open(temp.path(), &Config::default()).unwrap();
        assert_eq!(dir.table_path("users"), temp.path().join("users.json"));
    }

    #[test]
    fn table_name_validation() {
        assert!(validate_table_name("users").is_ok());
        assert!(validate_table_name("user_events-2024").is_ok());
        assert!(validate_table_name("").is_err());
        assert!(validate_table_name(".hidden").is_err());
        assert!(validate_table_name("../escape").is_err());
        assert!(validate_table_name("a\\b").is_err());
    }
}
