//! # filedb Core
//!
//! A minimal embedded record store. A database is a directory; each table
//! in it is one JSON file holding an ordered list of auto-numbered records.
//!
//! This crate provides:
//! - [`Record`] and [`RecordId`], the stored unit and its identifier
//! - [`Table`], an in-memory record list mirrored to one file
//! - [`Database`], the directory-backed map of tables and the public CRUD surface
//! - [`Config`] and [`DatabaseStats`] for tuning and observing a database
//!
//! ## Example
//!
//! ```rust,no_run
//! use filedb_core::{Database, RecordId};
//! use serde_json::json;
//!
//! let db = Database::open("example_db").unwrap();
//! db.create_table("example_table").unwrap();
//! db.add_record("example_table", json!("First Record")).unwrap();
//!
//! let record = db.get_record("example_table", RecordId::new(1)).unwrap();
//! assert_eq!(record.data, json!("First Record"));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod database;
mod dir;
mod error;
mod stats;
mod table;
mod types;

pub use config::Config;
pub use database::Database;
pub use dir::{validate_table_name, DatabaseDir, TABLE_EXTENSION};
pub use error::{CoreError, CoreResult};
pub use serde_json::Value;
pub use stats::{DatabaseStats, StatsSnapshot};
pub use table::Table;
pub use types::{Record, RecordId};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
