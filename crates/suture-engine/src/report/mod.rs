//! Per-run diagnostics.
//!
//! Every run returns a report alongside its primary result, even on
//! overall success: skipped candidates, generation exclusions and
//! failures, dangling-coverage findings, and validation violations all
//! surface here, so data can never drop out of a run silently.

use serde::{Deserialize, Serialize};
use suture_core::errors::GenerateError;
use suture_core::model::RequirementId;

use crate::generator::{Exclusion, GenerateOutcome};
use crate::mapper::{MapOutcome, SkippedCandidate};
use crate::matrix::BuildDiagnostic;
use crate::validator::{ValidationReport, Violation};

/// A requirement the strategy could not produce a case for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationFailure {
    pub requirement: RequirementId,
    pub strategy: String,
    pub reason: String,
}

impl From<&GenerateError> for GenerationFailure {
    fn from(error: &GenerateError) -> Self {
        match error {
            GenerateError::PolicyRefused {
                requirement,
                strategy,
            } => Self {
                requirement: *requirement,
                strategy: strategy.clone(),
                reason: error.to_string(),
            },
        }
    }
}

/// Accumulated diagnostics for one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub skipped_candidates: Vec<SkippedCandidate>,
    pub exclusions: Vec<Exclusion>,
    pub generation_failures: Vec<GenerationFailure>,
    pub dangling_coverage: Vec<BuildDiagnostic>,
    pub violations: Vec<Violation>,
}

impl RunReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn absorb_mapping(&mut self, outcome: &MapOutcome) {
        self.skipped_candidates
            .extend(outcome.skipped.iter().cloned());
    }

    pub fn absorb_generation(&mut self, outcome: &GenerateOutcome) {
        self.exclusions.extend(outcome.exclusions.iter().cloned());
        self.generation_failures
            .extend(outcome.failures.iter().map(GenerationFailure::from));
    }

    pub fn absorb_build(&mut self, diagnostics: &[BuildDiagnostic]) {
        self.dangling_coverage.extend(diagnostics.iter().cloned());
    }

    pub fn absorb_validation(&mut self, report: &ValidationReport) {
        self.violations.extend(report.violations.iter().cloned());
    }

    /// True when the run produced no diagnostics of any kind.
    pub fn is_clean(&self) -> bool {
        self.skipped_candidates.is_empty()
            && self.exclusions.is_empty()
            && self.generation_failures.is_empty()
            && self.dangling_coverage.is_empty()
            && self.violations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.skipped_candidates.len()
            + self.exclusions.len()
            + self.generation_failures.len()
            + self.dangling_coverage.len()
            + self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
