//! Requirement candidates, as produced by the external extractor.

use serde::{Deserialize, Serialize};

/// A raw extracted text span with provenance.
///
/// Read-only input to the mapper; the extractor owns its production.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Source document identifier.
    pub document_id: String,
    /// Location within the document, e.g. `"sec2.1"`.
    pub location: String,
    /// Extracted text span.
    pub text: String,
    /// Framework the document metadata claims to belong to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub framework_hint: Option<String>,
}

impl Candidate {
    pub fn new(
        document_id: impl Into<String>,
        location: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            document_id: document_id.into(),
            location: location.into(),
            text: text.into(),
            framework_hint: None,
        }
    }

    pub fn with_framework_hint(mut self, hint: impl Into<String>) -> Self {
        self.framework_hint = Some(hint.into());
        self
    }
}
