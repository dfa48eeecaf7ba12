//! Stress tests for filedb.
//!
//! These helpers drive a database from several threads at once to exercise
//! the table-map lock and the per-table locks together.

use filedb_core::{Database, RecordId};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::{Duration, Instant};

/// Result of a stress test run.
#[derive(Debug, Clone)]
pub struct StressTestResult {
    /// Total operations performed.
    pub total_ops: usize,
    /// Successful operations.
    pub successful_ops: usize,
    /// Failed operations.
    pub failed_ops: usize,
    /// Total duration.
    pub duration: Duration,
    /// Operations per second.
    pub ops_per_second: f64,
}

impl StressTestResult {
    /// Creates a new result.
    pub fn new(successful: usize, failed: usize, duration: Duration) -> Self {
        let total = successful + failed;
        let ops_per_second = if duration.as_secs_f64() > 0.0 {
            total as f64 / duration.as_secs_f64()
        } else {
            0.0
        };

        Self {
            total_ops: total,
            successful_ops: successful,
            failed_ops: failed,
            duration,
            ops_per_second,
        }
    }

    /// Prints a summary of the test.
    pub fn print_summary(&self, name: &str) {
        println!("\n=== {} ===", name);
        println!("Total operations: {}", self.total_ops);
        println!("Successful: {}", self.successful_ops);
        println!("Failed: {}", self.failed_ops);
        println!("Duration: {:?}", self.duration);
        println!("Throughput: {:.2} ops/sec", self.ops_per_second);
    }
}

/// Configuration for stress tests.
#[derive(Debug, Clone)]
pub struct StressConfig {
    /// Operations per thread.
    pub operations: usize,
    /// Number of concurrent threads.
    pub threads: usize,
}

impl Default for StressConfig {
    fn default() -> Self {
        Self {
            operations: 200,
            threads: 4,
        }
    }
}

/// Appends records to one shared table from every thread.
///
/// The table must already exist.
pub fn stress_concurrent_adds(db: &Database, table: &str, config: &StressConfig) -> StressTestResult {
    let successful = AtomicUsize::new(0);
    let failed = AtomicUsize::new(0);
    let start = Instant::now();

    thread::scope(|s| {
        for t in 0..config.threads {
            let successful = &successful;
            let failed = &failed;
            s.spawn(move || {
                for i in 0..config.operations {
                    match db.add_record(table, json!({ "thread": t, "i": i })) {
                        Ok(_) => successful.fetch_add(1, Ordering::Relaxed),
                        Err(_) => failed.fetch_add(1, Ordering::Relaxed),
                    };
                }
            });
        }
    });

    StressTestResult::new(
        successful.into_inner(),
        failed.into_inner(),
        start.elapsed(),
    )
}

/// Runs adds, updates, reads and deletes on a separate table per thread.
///
/// Tables are named `stress_<n>` and created on demand. Operations on
/// records that a previous step deleted count as failures.
pub fn stress_mixed_operations(db: &Database, config: &StressConfig) -> StressTestResult {
    let successful = AtomicUsize::new(0);
    let failed = AtomicUsize::new(0);
    let start = Instant::now();

    thread::scope(|s| {
        for t in 0..config.threads {
            let successful = &successful;
            let failed = &failed;
            s.spawn(move || {
                let table = format!("stress_{t}");
                if !db.has_table(&table) {
                    db.create_table(&table).expect("Failed to create stress table");
                }

                for i in 0..config.operations {
                    let id = RecordId::new((i / 4 + 1) as u64);
                    let result = match i % 4 {
                        0 => db.add_record(&table, json!(i)).map(|_| ()),
                        1 => db.update_record(&table, id, json!(i)),
                        2 => db.get_record(&table, id).map(|_| ()),
                        _ => db.delete_record(&table, id),
                    };
                    match result {
                        Ok(()) => successful.fetch_add(1, Ordering::Relaxed),
                        Err(_) => failed.fetch_add(1, Ordering::Relaxed),
                    };
                }
            });
        }
    });

    StressTestResult::new(
        successful.into_inner(),
        failed.into_inner(),
        start.elapsed(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::TestDatabase;

    #[test]
    fn concurrent_adds_all_land() {
        let test_db = TestDatabase::new();
        test_db.create_table("shared").unwrap();

        let config = StressConfig {
            operations: 50,
            threads: 4,
        };
        let result = stress_concurrent_adds(&test_db, "shared", &config);

        assert_eq!(result.failed_ops, 0);
        assert_eq!(result.successful_ops, 200);

        // No deletes, so IDs are exactly 1..=200 in order.
        let records = test_db.records("shared").unwrap();
        let ids: Vec<u64> = records.iter().map(|r| r.id.as_u64()).collect();
        assert_eq!(ids, (1..=200).collect::<Vec<_>>());
    }

    #[test]
    fn concurrent_adds_survive_reopen() {
        let mut test_db = TestDatabase::new();
        test_db.create_table("shared").unwrap();

        let config = StressConfig {
            operations: 25,
            threads: 4,
        };
        stress_concurrent_adds(&test_db, "shared", &config);

        test_db.reopen();
        assert_eq!(test_db.records("shared").unwrap().len(), 100);
    }

    #[test]
    fn mixed_operations_complete() {
        let test_db = TestDatabase::new();
        let config = StressConfig {
            operations: 40,
            threads: 3,
        };
        let result = stress_mixed_operations(&test_db, &config);

        assert_eq!(result.total_ops, 120);
        assert_eq!(test_db.table_names().len(), 3);
    }
}
