//! Property-based test generators using proptest.
//!
//! Provides strategies for generating random test data
//! that maintains required invariants.

use filedb_core::{RecordId, Value};
use proptest::prelude::*;
use serde_json::{Map, Number};

/// Strategy for generating valid table names.
pub fn table_name_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z][a-zA-Z0-9_-]{0,31}")
        .expect("Invalid regex")
        .prop_filter("Table name must not be empty", |s| !s.is_empty())
}

/// Strategy for generating record IDs in a small range, so that lookups
/// hit existing records often.
pub fn record_id_strategy(max: u64) -> impl Strategy<Value = RecordId> {
    (1..=max.max(1)).prop_map(RecordId::new)
}

/// Strategy for generating JSON scalars.
///
/// Floats are finite half-integers so they survive a text round trip
/// unchanged.
pub fn json_scalar_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| Value::Number(n.into())),
        (-1_000_000i32..1_000_000).prop_map(|n| {
            Number::from_f64(f64::from(n) + 0.5)
                .map(Value::Number)
                .unwrap_or(Value::Null)
        }),
        "[ -~]{0,24}".prop_map(Value::String),
    ]
}

/// Strategy for generating nested JSON payloads (arrays and objects).
pub fn json_value_strategy() -> impl Strategy<Value = Value> {
    json_scalar_strategy().prop_recursive(3, 32, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{1,8}", inner, 0..6)
                .prop_map(|entries| Value::Object(entries.into_iter().collect::<Map<_, _>>())),
        ]
    })
}

/// A single database operation for model-based testing.
#[derive(Debug, Clone)]
pub enum RecordOp {
    /// Append a record.
    Add(Value),
    /// Replace a record's payload.
    Update(RecordId, Value),
    /// Remove a record.
    Delete(RecordId),
    /// Read a record.
    Get(RecordId),
}

/// Strategy for generating sequences of record operations.
pub fn record_ops_strategy(len: usize) -> impl Strategy<Value = Vec<RecordOp>> {
    let op = prop_oneof![
        3 => json_value_strategy().prop_map(RecordOp::Add),
        1 => (record_id_strategy(8), json_value_strategy())
            .prop_map(|(id, data)| RecordOp::Update(id, data)),
        1 => record_id_strategy(8).prop_map(RecordOp::Delete),
        1 => record_id_strategy(8).prop_map(RecordOp::Get),
    ];
    prop::collection::vec(op, 0..len)
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Creates a config for quick tests. Every case touches the filesystem,
    /// so this is the usual choice.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}
