//! Mapper output types.

use serde::{Deserialize, Serialize};
use suture_core::errors::MapError;
use suture_core::model::Requirement;

/// A candidate skipped during mapping, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedCandidate {
    pub document_id: String,
    pub location: String,
    /// The framework the candidate claimed, when that was the reason.
    pub framework: Option<String>,
    pub reason: String,
}

impl SkippedCandidate {
    pub(crate) fn from_error(document_id: &str, location: &str, error: &MapError) -> Self {
        let framework = match error {
            MapError::UnknownFramework { framework, .. } => Some(framework.clone()),
        };
        Self {
            document_id: document_id.to_string(),
            location: location.to_string(),
            framework,
            reason: error.to_string(),
        }
    }
}

/// Result of one mapping run: the new requirement set plus the skip list.
///
/// The skip list is part of the primary result so a candidate can never
/// drop out of a run silently.
#[derive(Debug, Clone, Default)]
pub struct MapOutcome {
    /// Requirements in canonical id order, deduplicated by identity.
    pub requirements: Vec<Requirement>,
    pub skipped: Vec<SkippedCandidate>,
}

impl MapOutcome {
    pub fn requirement_count(&self) -> usize {
        self.requirements.len()
    }
}
