//! Test case generation errors.

use crate::model::RequirementId;

/// Errors that can occur while generating test cases.
///
/// Per-requirement: recorded in the generation outcome, the rest of the
/// batch continues.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerateError {
    #[error("strategy `{strategy}` produced no case for mandatory-control requirement {requirement}")]
    PolicyRefused {
        requirement: RequirementId,
        strategy: String,
    },
}
