//! Compliance mapper — candidates to identity-stable requirements.
//!
//! Mapping is pure: the same candidates, registry, and matcher set always
//! produce the same requirement set, and re-mapping an unchanged candidate
//! reuses its identity instead of forking a new one.

pub mod matchers;
pub mod normalize;
pub mod types;

pub use matchers::{ControlHit, KeywordMatcher, KeywordRule, Matcher, MatcherSet, PatternMatcher, PatternRule};
pub use normalize::normalize;
pub use types::{MapOutcome, SkippedCandidate};

use rayon::prelude::*;
use rustc_hash::FxHashMap;
use suture_core::config::MatchConfig;
use suture_core::errors::MapError;
use suture_core::model::{Candidate, Provenance, Requirement, RequirementId};
use suture_core::registry::ControlRegistry;

/// Maps requirement candidates to controls from the registry.
pub struct ComplianceMapper {
    matchers: MatcherSet,
    config: MatchConfig,
}

impl ComplianceMapper {
    pub fn new(matchers: MatcherSet, config: MatchConfig) -> Self {
        Self { matchers, config }
    }

    /// Map a batch of candidates against the registry.
    ///
    /// When `previous` holds a requirement with the same identity, its
    /// control associations are recomputed from scratch and the mapping
    /// version bumps only if the resulting control set differs.
    ///
    /// Candidates whose framework hint names a framework absent from the
    /// registry are skipped and recorded; the batch continues.
    pub fn map(
        &self,
        candidates: &[Candidate],
        registry: &ControlRegistry,
        previous: Option<&[Requirement]>,
    ) -> MapOutcome {
        let prior: FxHashMap<RequirementId, &Requirement> = previous
            .unwrap_or(&[])
            .iter()
            .map(|r| (r.id, r))
            .collect();

        let threshold = self.config.effective_confidence_threshold();
        let markers: Vec<String> = self
            .config
            .informational_markers
            .iter()
            .map(|m| normalize(m))
            .collect();

        let mapped: Vec<Result<Requirement, SkippedCandidate>> = candidates
            .par_iter()
            .map(|candidate| self.map_one(candidate, registry, &prior, threshold, &markers))
            .collect();

        let mut requirements = Vec::new();
        let mut skipped = Vec::new();
        for result in mapped {
            match result {
                Ok(requirement) => requirements.push(requirement),
                Err(skip) => skipped.push(skip),
            }
        }

        // Canonical order independent of input order and thread
        // scheduling; re-extracted duplicates collapse by identity.
        requirements.sort_by_key(|r| r.id);
        requirements.dedup_by_key(|r| r.id);
        skipped.sort_by(|a, b| {
            (&a.document_id, &a.location).cmp(&(&b.document_id, &b.location))
        });

        tracing::debug!(
            candidates = candidates.len(),
            requirements = requirements.len(),
            skipped = skipped.len(),
            "mapping run complete"
        );

        MapOutcome {
            requirements,
            skipped,
        }
    }

    fn map_one(
        &self,
        candidate: &Candidate,
        registry: &ControlRegistry,
        prior: &FxHashMap<RequirementId, &Requirement>,
        threshold: f32,
        markers: &[String],
    ) -> Result<Requirement, SkippedCandidate> {
        if let Some(hint) = &candidate.framework_hint {
            if !registry.has_framework(hint) {
                let error = MapError::UnknownFramework {
                    framework: hint.clone(),
                    document_id: candidate.document_id.clone(),
                };
                return Err(SkippedCandidate::from_error(
                    &candidate.document_id,
                    &candidate.location,
                    &error,
                ));
            }
        }

        let text = normalize(&candidate.text);
        let id = RequirementId::derive(&candidate.document_id, &candidate.location, &text);

        // Requirements may only reference controls present in the registry
        // at mapping time; stale matcher rules are dropped here.
        let mappings: Vec<_> = self
            .matchers
            .best_matches(&text, threshold)
            .into_iter()
            .filter(|m| registry.contains(&m.control))
            .collect();

        let testable = !markers.iter().any(|m| text.contains(m.as_str()));

        let mapping_version = match prior.get(&id) {
            Some(prev) => {
                let new_set: std::collections::BTreeSet<_> =
                    mappings.iter().map(|m| &m.control).collect();
                if new_set == prev.control_set() {
                    prev.mapping_version
                } else {
                    prev.mapping_version + 1
                }
            }
            None => 1,
        };

        Ok(Requirement {
            id,
            text,
            source: Provenance {
                document_id: candidate.document_id.clone(),
                location: candidate.location.clone(),
            },
            mappings,
            mapping_version,
            testable,
        })
    }
}
