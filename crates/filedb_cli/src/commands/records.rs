//! Record commands.

use super::open_existing;
use filedb_core::{Record, RecordId, Value};
use std::path::Path;

/// Appends a record and returns its assigned ID.
pub fn add(path: &Path, table: &str, data: Value) -> Result<RecordId, Box<dyn std::error::Error>> {
    let db = open_existing(path)?;
    Ok(db.add_record(table, data)?)
}

/// Prints one record as JSON.
pub fn get(path: &Path, table: &str, id: u64) -> Result<(), Box<dyn std::error::Error>> {
    let db = open_existing(path)?;
    let record = db.get_record(table, RecordId::new(id))?;
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

/// Replaces the payload of a record.
pub fn update(
    path: &Path,
    table: &str,
    id: u64,
    data: Value,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = open_existing(path)?;
    db.update_record(table, RecordId::new(id), data)?;
    println!("Updated record {id} in {table}");
    Ok(())
}

/// Deletes a record.
pub fn delete(path: &Path, table: &str, id: u64) -> Result<(), Box<dyn std::error::Error>> {
    let db = open_existing(path)?;
    db.delete_record(table, RecordId::new(id))?;
    println!("Deleted record {id} from {table}");
    Ok(())
}

/// Prints every record of a table in insertion order.
pub fn dump(path: &Path, table: &str, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    let db = open_existing(path)?;
    let records = db.records(table)?;

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&records)?),
        _ => {
            for record in &records {
                println!("{}", format_record(record));
            }
            println!("({} records)", records.len());
        }
    }

    Ok(())
}

fn format_record(record: &Record) -> String {
    format!("{:>6}  {}", record.id.as_u64(), record.data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use filedb_core::Database;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn crud_through_commands() {
        let temp = tempdir().unwrap();
        Database::open(temp.path())
            .unwrap()
            .create_table("notes")
            .unwrap();

        let id = add(temp.path(), "notes", json!("First Record")).unwrap();
        assert_eq!(id, RecordId::new(1));

        update(temp.path(), "notes", 1, json!("Updated First Record")).unwrap();
        get(temp.path(), "notes", 1).unwrap();
        dump(temp.path(), "notes", "json").unwrap();

        let db = Database::open(temp.path()).unwrap();
        assert_eq!(
            db.get_record("notes", id).unwrap().data,
            json!("Updated First Record")
        );
        drop(db);

        delete(temp.path(), "notes", 1).unwrap();
        assert!(get(temp.path(), "notes", 1).is_err());
    }

    #[test]
    fn format_record_pads_id() {
        let record = Record::new(RecordId::new(7), json!({"x": 1}));
        assert_eq!(format_record(&record), r#"     7  {"x":1}"#);
    }
}
