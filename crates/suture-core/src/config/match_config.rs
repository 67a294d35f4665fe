//! Mapper configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the compliance mapper.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MatchConfig {
    /// Minimum confidence for a control match to be retained. Default: 0.5.
    pub confidence_threshold: Option<f32>,
    /// Marker phrases that flag a requirement as informational.
    ///
    /// A requirement whose normalized text contains one of these markers
    /// is mapped but marked non-testable; the generator records it as an
    /// explicit exclusion. Markers are the only path to non-testable —
    /// nothing is inferred.
    #[serde(default)]
    pub informational_markers: Vec<String>,
}

impl MatchConfig {
    /// Returns the effective confidence threshold, defaulting to 0.5.
    pub fn effective_confidence_threshold(&self) -> f32 {
        self.confidence_threshold.unwrap_or(0.5)
    }
}
