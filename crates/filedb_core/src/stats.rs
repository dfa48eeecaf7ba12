//! Database statistics.
//!
//! Counters for monitoring what a [`crate::Database`] has done since it was
//! opened.
//!
//! # Usage
//!
//! ```rust,ignore
//! let db = Database::open(Path::new("my_db"))?;
//! db.add_record("users", json!({"name": "ada"}))?;
//!
//! let stats = db.stats().snapshot();
//! println!("Writes: {}", stats.writes);
//! println!("Saves: {}", stats.saves);
//! ```

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Database operation counters.
///
/// All counters are atomic and can be read while operations are in progress.
/// Values only ever increase.
#[derive(Debug, Default)]
pub struct DatabaseStats {
    /// Record lookups.
    reads: AtomicU64,
    /// Record adds and updates.
    writes: AtomicU64,
    /// Record deletes.
    deletes: AtomicU64,
    tables_created: AtomicU64,
    tables_dropped: AtomicU64,
    /// Successful table file writes.
    saves: AtomicU64,
    bytes_written: AtomicU64,
    /// Failed operations of any kind.
    errors: AtomicU64,
}

impl DatabaseStats {
    /// Creates a new stats instance.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_read(&self) {
        self.reads.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_write(&self) {
        self.writes.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_delete(&self) {
        self.deletes.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_table_created(&self) {
        self.tables_created.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_table_dropped(&self) {
        self.tables_dropped.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_save(&self, bytes: u64) {
        self.saves.fetch_add(1, Ordering::Relaxed);
        self.bytes_written.fetch_add(bytes, Ordering::Relaxed);
    }

    pub(crate) fn record_error(&self) {
        self.errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Returns the number of record lookups.
    pub fn reads(&self) -> u64 {
        self.reads.load(Ordering::Relaxed)
    }

    /// Returns the number of record adds and updates.
    pub fn writes(&self) -> u64 {
        self.writes.load(Ordering::Relaxed)
    }

    /// Returns the number of record deletes.
    pub fn deletes(&self) -> u64 {
        self.deletes.load(Ordering::Relaxed)
    }

    /// Returns the number of table files written.
    pub fn saves(&self) -> u64 {
        self.saves.load(Ordering::Relaxed)
    }

    /// Returns the number of failed operations.
    pub fn errors(&self) -> u64 {
        self.errors.load(Ordering::Relaxed)
    }

    /// Returns a point-in-time copy of every counter.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            reads: self.reads(),
            writes: self.writes(),
            deletes: self.deletes(),
            tables_created: self.tables_created.load(Ordering::Relaxed),
            tables_dropped: self.tables_dropped.load(Ordering::Relaxed),
            saves: self.saves(),
            bytes_written: self.bytes_written.load(Ordering::Relaxed),
            errors: self.errors(),
        }
    }
}

/// Plain copy of [`DatabaseStats`] at one moment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    /// Record lookups.
    pub reads: u64,
    /// Record adds and updates.
    pub writes: u64,
    /// Record deletes.
    pub deletes: u64,
    /// Tables created.
    pub tables_created: u64,
    /// Tables dropped.
    pub tables_dropped: u64,
    /// Table files written.
    pub saves: u64,
    /// Bytes written across all saves.
    pub bytes_written: u64,
    /// Failed operations.
    pub errors: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_start_at_zero() {
        let stats = DatabaseStats::new();
        assert_eq!(stats.snapshot(), StatsSnapshot::default());
    }

    #[test]
    fn save_tracks_bytes() {
        let stats = DatabaseStats::new();
        stats.record_save(100);
        stats.record_save(50);

        let snap = stats.snapshot();
        assert_eq!(snap.saves, 2);
        assert_eq!(snap.bytes_written, 150);
    }

    #[test]
    fn counters_are_independent() {
        let stats = DatabaseStats::new();
        stats.record_read();
        stats.record_write();
        stats.record_write();
        stats.record_delete();
        stats.record_table_created();
        stats.record_table_dropped();
        stats.record_error();

        let snap = stats.snapshot();
        assert_eq!(snap.reads, 1);
        assert_eq!(snap.writes, 2);
        assert_eq!(snap.deletes, 1);
        assert_eq!(snap.tables_created, 1);
        assert_eq!(snap.tables_dropped, 1);
        assert_eq!(snap.errors, 1);
    }
}
