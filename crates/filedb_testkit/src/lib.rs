//! # filedb Testkit
//!
//! Test utilities for filedb.
//!
//! This crate provides:
//! - Test fixtures and temp-dir-backed database helpers
//! - Property-based test generators using proptest
//! - A model-checking harness that mirrors database operations
//! - Stress testing utilities for the table-map and per-table locks
//!
//! ## Usage
//!
//! ```rust,ignore
//! use filedb_testkit::prelude::*;
//!
//! #[test]
//! fn test_with_database() {
//!     with_temp_db(|db| {
//!         db.create_table("test").unwrap();
//!         // ... test operations
//!     });
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod integration;
pub mod stress;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::integration::*;
    pub use crate::stress::*;
}

pub use fixtures::*;
pub use generators::*;
pub use integration::*;
pub use stress::*;
