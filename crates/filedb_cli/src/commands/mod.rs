//! CLI command implementations.

pub mod inspect;
pub mod records;
pub mod tables;

use filedb_core::{Config, Database, Value};
use std::path::Path;

/// Opens a database that must already exist.
pub fn open_existing(path: &Path) -> Result<Database, Box<dyn std::error::Error>> {
    let config = Config::new().create_if_missing(false);
    Ok(Database::open_with_config(path, config)?)
}

/// Parses a record payload given on the command line.
///
/// With `as_string`, the argument is stored verbatim as a JSON string.
pub fn parse_payload(raw: &str, as_string: bool) -> Result<Value, Box<dyn std::error::Error>> {
    if as_string {
        return Ok(Value::String(raw.to_string()));
    }
    serde_json::from_str(raw).map_err(|e| format!("invalid JSON payload {raw:?}: {e}").into())
}
