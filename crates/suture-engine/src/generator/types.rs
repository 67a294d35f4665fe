//! Generator output types.

use serde::{Deserialize, Serialize};
use suture_core::errors::GenerateError;
use suture_core::model::{RequirementId, TestCase};

/// A planned test case, before identity assignment.
#[derive(Debug, Clone)]
pub struct CaseBlueprint {
    /// Strategy-chosen discriminator (control key, section, requirement
    /// id), folded into the case identity so distinct groupings over the
    /// same requirement set get distinct cases.
    pub key: String,
    pub title: String,
    /// Opaque body skeleton for the external templating layer.
    pub payload: serde_json::Value,
    pub covers: Vec<RequirementId>,
}

/// Why a requirement ended up with no planned case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionReason {
    /// Explicitly marked informational by the mapper.
    Informational,
    /// The strategy planned no case and no mandatory control forces one.
    NoPlannedCase,
}

/// A requirement excluded from generation, with the explicit reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exclusion {
    pub requirement: RequirementId,
    pub reason: ExclusionReason,
}

/// Result of one generation run.
///
/// Exclusions and failures ride along with the case set so a requirement
/// can never drop out of generation silently.
#[derive(Debug, Clone, Default)]
pub struct GenerateOutcome {
    /// Test cases in canonical id order, deduplicated by identity.
    pub cases: Vec<TestCase>,
    pub exclusions: Vec<Exclusion>,
    pub failures: Vec<GenerateError>,
}

impl GenerateOutcome {
    pub fn case_count(&self) -> usize {
        self.cases.len()
    }
}
