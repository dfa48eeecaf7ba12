//! Model-checking harness.
//!
//! Applies record operations to a real database and to a plain in-memory
//! model side by side, asserting that both agree after every step and
//! after a reopen from disk.

use crate::fixtures::TestDatabase;
use crate::generators::RecordOp;
use filedb_core::{CoreError, Record, RecordId, Value};

/// A test harness pairing a database table with a reference model.
pub struct IntegrationHarness {
    /// The database under test.
    pub db: TestDatabase,
    /// Table the operations target.
    table: String,
    /// Expected records in order.
    model: Vec<Record>,
}

impl IntegrationHarness {
    /// Creates a harness over a fresh database with one empty table.
    pub fn new(table: &str) -> Self {
        let db = TestDatabase::new();
        db.create_table(table).expect("Failed to create table");
        Self {
            db,
            table: table.to_string(),
            model: Vec::new(),
        }
    }

    /// Appends a record to both sides and checks the assigned ID.
    pub fn add(&mut self, data: Value) -> RecordId {
        let expected = RecordId::new(self.model.len() as u64 + 1);
        let id = self
            .db
            .add_record(&self.table, data.clone())
            .expect("Failed to add record");
        assert_eq!(id, expected, "Assigned ID mismatch");
        self.model.push(Record::new(id, data));
        id
    }

    /// Updates on both sides; NotFound must match the model.
    pub fn update(&mut self, id: RecordId, data: Value) {
        let result = self.db.update_record(&self.table, id, data.clone());
        match self.model.iter_mut().find(|r| r.id == id) {
            Some(record) => {
                result.expect("Update of existing record failed");
                record.data = data;
            }
            None => assert_record_not_found(result),
        }
    }

    /// Deletes on both sides; NotFound must match the model.
    pub fn delete(&mut self, id: RecordId) {
        let result = self.db.delete_record(&self.table, id);
        match self.model.iter().position(|r| r.id == id) {
            Some(index) => {
                result.expect("Delete of existing record failed");
                self.model.remove(index);
            }
            None => assert_record_not_found(result),
        }
    }

    /// Reads from the database and compares with the model.
    pub fn get_and_verify(&self, id: RecordId) -> Option<Record> {
        let result = self.db.get_record(&self.table, id);
        match self.model.iter().find(|r| r.id == id) {
            Some(expected) => {
                let actual = result.expect("Get of existing record failed");
                assert_eq!(&actual, expected, "Record mismatch for {id}");
                Some(actual)
            }
            None => {
                assert_record_not_found(result);
                None
            }
        }
    }

    /// Applies one generated operation.
    pub fn apply(&mut self, op: RecordOp) {
        match op {
            RecordOp::Add(data) => {
                self.add(data);
            }
            RecordOp::Update(id, data) => self.update(id, data),
            RecordOp::Delete(id) => self.delete(id),
            RecordOp::Get(id) => {
                self.get_and_verify(id);
            }
        }
    }

    /// Verifies the full ordered record list matches the model.
    pub fn verify_all(&self) {
        let actual = self
            .db
            .records(&self.table)
            .expect("Failed to read records");
        assert_eq!(actual, self.model, "Record list mismatch");
    }

    /// Reopens the database from disk and verifies nothing was lost.
    pub fn reopen_and_verify(&mut self) {
        self.db.reopen();
        self.verify_all();
    }

    /// Returns the expected records.
    pub fn model(&self) -> &[Record] {
        &self.model
    }
}

fn assert_record_not_found<T: std::fmt::Debug>(result: Result<T, CoreError>) {
    match result {
        Err(CoreError::RecordNotFound { .. }) => {}
        other => panic!("Expected RecordNotFound, got {other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn harness_tracks_crud() {
        let mut harness = IntegrationHarness::new("t");
        let a = harness.add(json!("a"));
        harness.add(json!("b"));
        harness.update(a, json!("A"));
        harness.delete(RecordId::new(2));
        harness.delete(RecordId::new(9));
        harness.update(RecordId::new(9), json!("nope"));
        harness.verify_all();
        harness.reopen_and_verify();

        assert_eq!(harness.model().len(), 1);
        assert_eq!(harness.get_and_verify(a).unwrap().data, json!("A"));
    }
}
