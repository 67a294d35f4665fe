//! Mapping errors.

/// Errors that can occur while mapping candidates to controls.
///
/// Per-candidate: the offending candidate is skipped and recorded in the
/// run skip list, the rest of the batch continues.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MapError {
    #[error("unknown framework `{framework}` referenced by document `{document_id}`")]
    UnknownFramework {
        framework: String,
        document_id: String,
    },
}
