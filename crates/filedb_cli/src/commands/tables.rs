//! Table management commands.

use super::open_existing;
use filedb_core::Database;
use serde::Serialize;
use std::path::Path;
use tracing::info;

/// One row of the table listing.
#[derive(Debug, Serialize)]
pub struct TableSummary {
    /// Table name.
    pub name: String,
    /// Number of live records.
    pub records: usize,
}

/// Lists the tables of a database.
pub fn list(path: &Path, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    let db = open_existing(path)?;
    let summaries = summarize(&db)?;

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&summaries)?),
        _ => {
            if summaries.is_empty() {
                println!("No tables.");
            }
            for summary in &summaries {
                println!("{:<24} {} records", summary.name, summary.records);
            }
        }
    }

    Ok(())
}

/// Collects a summary for every table, sorted by name.
pub fn summarize(db: &Database) -> Result<Vec<TableSummary>, Box<dyn std::error::Error>> {
    db.table_names()
        .into_iter()
        .map(|name| -> Result<TableSummary, Box<dyn std::error::Error>> {
            let records = db.records(&name)?.len();
            Ok(TableSummary { name, records })
        })
        .collect()
}

/// Creates a table, creating the database directory if needed.
pub fn create(path: &Path, name: &str) -> Result<(), Box<dyn std::error::Error>> {
    info!("Creating table {} in {:?}", name, path);
    let db = Database::open(path)?;
    db.create_table(name)?;
    println!("Created table {name}");
    Ok(())
}

/// Drops a table.
pub fn drop(path: &Path, name: &str) -> Result<(), Box<dyn std::error::Error>> {
    info!("Dropping table {} from {:?}", name, path);
    let db = open_existing(path)?;
    db.drop_table(name)?;
    println!("Dropped table {name}");
    Ok(())
}
