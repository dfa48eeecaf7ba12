//! Inspect command implementation.

use super::open_existing;
use filedb_core::Database;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Database inspection result.
#[derive(Debug, Serialize)]
pub struct InspectResult {
    /// Database path.
    pub path: String,
    /// Database name.
    pub name: String,
    /// Number of tables.
    pub table_count: usize,
    /// Number of live records across all tables.
    pub record_count: usize,
    /// Total size of table files in bytes.
    pub total_size: u64,
    /// Per-table statistics.
    pub tables: Vec<TableStats>,
}

/// Statistics for a single table.
#[derive(Debug, Serialize)]
pub struct TableStats {
    /// Table name.
    pub name: String,
    /// Number of live records.
    pub record_count: usize,
    /// Highest record ID in the table.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_id: Option<u64>,
    /// Whether some ID is held by more than one record.
    pub duplicate_ids: bool,
    /// Table file size in bytes.
    pub file_size: u64,
}

/// Runs the inspect command.
pub fn run(path: &Path, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    let db = open_existing(path)?;
    let result = inspect(&db)?;

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        _ => {
            print_text_output(&result);
        }
    }

    Ok(())
}

/// Gathers statistics for an open database.
pub fn inspect(db: &Database) -> Result<InspectResult, Box<dyn std::error::Error>> {
    let mut tables = Vec::new();

    for name in db.table_names() {
        let records = db.records(&name)?;
        let mut ids: Vec<u64> = records.iter().map(|r| r.id.as_u64()).collect();
        ids.sort_unstable();
        let max_id = ids.last().copied();
        let duplicate_ids = ids.windows(2).any(|w| w[0] == w[1]);

        // A table can be registered while its file is missing after a failed save.
        let file_size = fs::metadata(db.table_path(&name))
            .map(|m| m.len())
            .unwrap_or(0);

        tables.push(TableStats {
            name,
            record_count: records.len(),
            max_id,
            duplicate_ids,
            file_size,
        });
    }

    Ok(InspectResult {
        path: db.path().display().to_string(),
        name: db.name().to_string(),
        table_count: tables.len(),
        record_count: tables.iter().map(|t| t.record_count).sum(),
        total_size: tables.iter().map(|t| t.file_size).sum(),
        tables,
    })
}

fn print_text_output(result: &InspectResult) {
    println!("filedb Database Inspection");
    println!("==========================");
    println!();
    println!("Path: {}", result.path);
    println!("Name: {}", result.name);
    println!();
    println!("Storage:");
    println!("  Total size:  {} bytes", format_size(result.total_size));
    println!();
    println!("Contents:");
    println!("  Tables:  {}", result.table_count);
    println!("  Records: {}", result.record_count);

    if !result.tables.is_empty() {
        println!();
        println!("Tables:");
        for table in &result.tables {
            let note = if table.duplicate_ids {
                " (duplicate IDs)"
            } else {
                ""
            };
            println!(
                "  [{}] {} records, {} bytes{}",
                table.name,
                table.record_count,
                format_size(table.file_size),
                note
            );
        }
    }
}

fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{}", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else if bytes < 1024 * 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else {
        format!("{:.1} GB", bytes as f64 / (1024.0 * 1024.0 * 1024.0))
    }
}
