//! Validation policy configuration errors.

/// Errors raised while parsing a validation policy.
///
/// Fatal: a misconfigured policy fails fast, no partial validation result
/// is ever returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolicyError {
    #[error("unrecognized policy rule `{rule}`")]
    UnknownRule { rule: String },

    #[error("invalid value `{value}` for policy rule `{rule}`")]
    InvalidValue { rule: String, value: String },
}
