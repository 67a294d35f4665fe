//! Validation result types.

use serde::{Deserialize, Serialize};
use suture_core::model::RequirementId;
use suture_core::registry::ControlKey;

/// Aggregate outcome of a validation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationStatus {
    Pass,
    Fail,
}

/// Per-control coverage verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerdictStatus {
    /// Every mapped requirement is covered.
    Pass,
    /// Some, but not all, mapped requirements are covered.
    Partial,
    /// No mapped requirements, or none covered.
    Fail,
}

/// Coverage standing of one control in scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlVerdict {
    pub control: ControlKey,
    pub status: VerdictStatus,
    pub mapped_requirements: usize,
    pub covering_cases: usize,
    /// Mapped requirements with no covering test case.
    pub uncovered_requirements: Vec<RequirementId>,
}

/// What a violation is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// A control in scope has no requirements mapped to it.
    ControlWithoutRequirements,
    /// A mapped requirement has no covering test case.
    UncoveredRequirement,
    /// A retained mapping sits below the confidence floor.
    LowConfidenceMapping,
    /// A requirement maps to no control.
    UnmappedRequirement,
}

/// One rule violation, carrying the offending entities so reporting can
/// pinpoint root cause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub kind: ViolationKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub control: Option<ControlKey>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirement: Option<RequirementId>,
    pub detail: String,
}

/// Policy-evaluated result over one matrix snapshot.
///
/// Recomputed each run from current requirements, test cases, and policy;
/// never authoritative state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub status: ValidationStatus,
    /// Rules that were enabled for this run.
    pub rules_evaluated: Vec<String>,
    /// Verdicts for every control in scope, in key order.
    pub control_verdicts: Vec<ControlVerdict>,
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    pub fn passed(&self) -> bool {
        self.status == ValidationStatus::Pass
    }
}
