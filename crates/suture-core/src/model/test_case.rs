//! Test cases and their generator-derived identity.

use std::fmt;

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

use super::RequirementId;

/// Test case identity.
///
/// Derived from the generation strategy, the strategy's blueprint key,
/// and the sorted covered requirement set, so regenerating over identical
/// requirements replaces cases by identity instead of appending
/// duplicates.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct CaseId(u64);

impl CaseId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn derive(strategy: &str, key: &str, covers: &[RequirementId]) -> Self {
        let mut sorted: Vec<RequirementId> = covers.to_vec();
        sorted.sort();
        sorted.dedup();

        let mut buf = Vec::with_capacity(strategy.len() + key.len() + 2 + sorted.len() * 8);
        buf.extend_from_slice(strategy.as_bytes());
        buf.push(0);
        buf.extend_from_slice(key.as_bytes());
        buf.push(0);
        for id in &sorted {
            buf.extend_from_slice(&id.value().to_le_bytes());
        }
        Self(xxh3_64(&buf))
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for CaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// A verification artifact asserting that one or more requirements are
/// satisfied.
///
/// The payload (steps, expected results) is synthesized by the external
/// templating layer and opaque to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    pub id: CaseId,
    pub title: String,
    /// Opaque body; rendered by the exporter, never interpreted here.
    pub payload: serde_json::Value,
    /// Covered requirement identities, sorted.
    pub covers: Vec<RequirementId>,
}

impl TestCase {
    pub fn covers_requirement(&self, id: RequirementId) -> bool {
        self.covers.binary_search(&id).is_ok()
    }
}
