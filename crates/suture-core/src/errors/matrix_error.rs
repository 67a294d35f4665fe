//! Traceability matrix integrity errors.

use crate::model::{CaseId, RequirementId};
use crate::registry::ControlKey;

/// Violated matrix invariants.
///
/// These indicate a corrupted snapshot or an engine bug, never a data
/// quality issue; they abort the offending build and must not be
/// swallowed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatrixError {
    #[error(
        "link claims requirement {requirement} is covered by case {test_case}, \
         but the case does not cover it"
    )]
    DanglingCoverage {
        requirement: RequirementId,
        test_case: CaseId,
    },

    #[error("link claims requirement {requirement} is covered but names no test case")]
    CoveredWithoutCase { requirement: RequirementId },

    #[error("requirement {requirement} references control {control} absent from the registry")]
    UnknownControl {
        control: ControlKey,
        requirement: RequirementId,
    },
}
