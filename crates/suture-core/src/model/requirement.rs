//! Requirements and their identity.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

use crate::registry::ControlKey;

/// Stable requirement identity.
///
/// Derived from `(document_id, location, normalized text)`, so re-running
/// extraction over unchanged text yields the same identity and re-mapping
/// never forks a requirement.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct RequirementId(u64);

impl RequirementId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Derive the identity from provenance and normalized text.
    pub fn derive(document_id: &str, location: &str, normalized_text: &str) -> Self {
        let mut buf = Vec::with_capacity(
            document_id.len() + location.len() + normalized_text.len() + 2,
        );
        buf.extend_from_slice(document_id.as_bytes());
        buf.push(0);
        buf.extend_from_slice(location.as_bytes());
        buf.push(0);
        buf.extend_from_slice(normalized_text.as_bytes());
        Self(xxh3_64(&buf))
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequirementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// Where a requirement came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provenance {
    pub document_id: String,
    pub location: String,
}

/// One control association on a requirement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlMapping {
    pub control: ControlKey,
    /// Matcher confidence in `[0, 1]`.
    pub confidence: f32,
    /// Id of the matcher that produced this association.
    pub matcher: String,
}

/// An identity-stable statement extracted from a document and mapped to
/// zero or more controls.
///
/// Created by the mapper, mutated only by re-running mapping; downstream
/// components never write to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Requirement {
    pub id: RequirementId,
    /// Normalized requirement text.
    pub text: String,
    pub source: Provenance,
    /// Control associations, in canonical control-key order.
    pub mappings: Vec<ControlMapping>,
    /// Bumped only when re-mapping changes the control set.
    pub mapping_version: u32,
    /// Explicitly marked informational requirements are never fed to the
    /// test case generator.
    pub testable: bool,
}

impl Requirement {
    pub fn is_mapped(&self) -> bool {
        !self.mappings.is_empty()
    }

    /// The mapped control keys as a set, for change comparison across
    /// mapping runs.
    pub fn control_set(&self) -> BTreeSet<&ControlKey> {
        self.mappings.iter().map(|m| &m.control).collect()
    }

    pub fn maps_to(&self, control: &ControlKey) -> bool {
        self.mappings.iter().any(|m| &m.control == control)
    }

    pub fn confidence_for(&self, control: &ControlKey) -> Option<f32> {
        self.mappings
            .iter()
            .find(|m| &m.control == control)
            .map(|m| m.confidence)
    }
}
