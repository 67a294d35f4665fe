//! Test case generator — requirements to deterministic test cases.
//!
//! Identity is derived from the strategy and the covered requirement set,
//! so regeneration replaces cases instead of accumulating duplicates.

pub mod strategy;
pub mod types;

pub use strategy::{GenerationStrategy, GroupByControl, GroupBySection, PerRequirement};
pub use types::{CaseBlueprint, Exclusion, ExclusionReason, GenerateOutcome};

use rustc_hash::FxHashSet;
use suture_core::errors::GenerateError;
use suture_core::model::{CaseId, Requirement, RequirementId, TestCase};
use suture_core::registry::ControlRegistry;

/// Derives test cases from a requirement set under a grouping strategy.
#[derive(Debug, Default)]
pub struct TestCaseGenerator;

impl TestCaseGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Generate test cases for every testable requirement.
    ///
    /// Non-testable requirements are recorded as explicit exclusions. A
    /// testable requirement the strategy leaves uncovered is a
    /// [`GenerateError::PolicyRefused`] when it maps to a mandatory
    /// control, an exclusion otherwise; either way the batch continues.
    pub fn generate(
        &self,
        requirements: &[Requirement],
        registry: &ControlRegistry,
        strategy: &dyn GenerationStrategy,
    ) -> GenerateOutcome {
        let mut exclusions = Vec::new();
        let mut testable: Vec<&Requirement> = Vec::new();
        for req in requirements {
            if req.testable {
                testable.push(req);
            } else {
                exclusions.push(Exclusion {
                    requirement: req.id,
                    reason: ExclusionReason::Informational,
                });
            }
        }
        // Plan over a canonically ordered view so grouping is independent
        // of caller ordering
        testable.sort_by_key(|r| r.id);

        let mut cases: Vec<TestCase> = strategy
            .plan(&testable)
            .into_iter()
            .map(|blueprint| {
                let mut covers = blueprint.covers;
                covers.sort();
                covers.dedup();
                TestCase {
                    id: CaseId::derive(strategy.id(), &blueprint.key, &covers),
                    title: blueprint.title,
                    payload: blueprint.payload,
                    covers,
                }
            })
            .collect();
        cases.sort_by_key(|c| c.id);
        cases.dedup_by_key(|c| c.id);

        let covered: FxHashSet<RequirementId> =
            cases.iter().flat_map(|c| c.covers.iter().copied()).collect();

        let mut failures = Vec::new();
        for req in &testable {
            if covered.contains(&req.id) {
                continue;
            }
            let mandatory = req
                .mappings
                .iter()
                .any(|m| registry.get(&m.control).is_some_and(|c| c.mandatory));
            if mandatory {
                failures.push(GenerateError::PolicyRefused {
                    requirement: req.id,
                    strategy: strategy.id().to_string(),
                });
            } else {
                exclusions.push(Exclusion {
                    requirement: req.id,
                    reason: ExclusionReason::NoPlannedCase,
                });
            }
        }

        exclusions.sort_by_key(|e| e.requirement);

        tracing::debug!(
            strategy = strategy.id(),
            requirements = requirements.len(),
            cases = cases.len(),
            exclusions = exclusions.len(),
            failures = failures.len(),
            "generation run complete"
        );

        GenerateOutcome {
            cases,
            exclusions,
            failures,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use suture_core::model::{ControlMapping, Provenance};
    use suture_core::registry::{Control, ControlKey};

    fn registry() -> ControlRegistry {
        ControlRegistry::from_controls(
            1,
            vec![
                Control {
                    key: ControlKey::new("HIPAA", "164.312(a)(2)(iv)"),
                    title: "Encryption and decryption".to_string(),
                    mandatory: true,
                    version: "2013".to_string(),
                },
                Control {
                    key: ControlKey::new("GDPR", "Art.13"),
                    title: "Information to be provided".to_string(),
                    mandatory: false,
                    version: "2016".to_string(),
                },
            ],
        )
        .unwrap()
    }

    fn requirement(doc: &str, loc: &str, text: &str, controls: &[ControlKey]) -> Requirement {
        Requirement {
            id: RequirementId::derive(doc, loc, text),
            text: text.to_string(),
            source: Provenance {
                document_id: doc.to_string(),
                location: loc.to_string(),
            },
            mappings: controls
                .iter()
                .map(|c| ControlMapping {
                    control: c.clone(),
                    confidence: 0.9,
                    matcher: "kw".to_string(),
                })
                .collect(),
            mapping_version: 1,
            testable: true,
        }
    }

    #[test]
    fn test_per_requirement_generates_one_case_each() {
        let reqs = vec![
            requirement("D1", "sec1", "encrypt phi at rest", &[ControlKey::new("HIPAA", "164.312(a)(2)(iv)")]),
            requirement("D1", "sec2", "notify data subjects", &[ControlKey::new("GDPR", "Art.13")]),
        ];
        let outcome = TestCaseGenerator::new().generate(&reqs, &registry(), &PerRequirement);

        assert_eq!(outcome.cases.len(), 2);
        assert!(outcome.failures.is_empty());
        for case in &outcome.cases {
            assert_eq!(case.covers.len(), 1);
        }
    }

    #[test]
    fn test_generation_is_deterministic() {
        let reqs = vec![
            requirement("D1", "sec1", "encrypt phi at rest", &[ControlKey::new("HIPAA", "164.312(a)(2)(iv)")]),
            requirement("D1", "sec2", "notify data subjects", &[ControlKey::new("GDPR", "Art.13")]),
        ];
        let generator = TestCaseGenerator::new();
        let a = generator.generate(&reqs, &registry(), &GroupByControl);

        let mut reversed = reqs.clone();
        reversed.reverse();
        let b = generator.generate(&reversed, &registry(), &GroupByControl);

        let ids_a: Vec<_> = a.cases.iter().map(|c| c.id).collect();
        let ids_b: Vec<_> = b.cases.iter().map(|c| c.id).collect();
        assert_eq!(ids_a, ids_b);
        assert_eq!(a.cases, b.cases);
    }

    #[test]
    fn test_group_by_control_covers_all_mapped_requirements() {
        let key = ControlKey::new("HIPAA", "164.312(a)(2)(iv)");
        let reqs = vec![
            requirement("D1", "sec1", "encrypt phi at rest", &[key.clone()]),
            requirement("D1", "sec2", "encrypt backups", &[key.clone()]),
        ];
        let outcome = TestCaseGenerator::new().generate(&reqs, &registry(), &GroupByControl);

        assert_eq!(outcome.cases.len(), 1);
        assert_eq!(outcome.cases[0].covers.len(), 2);
    }

    #[test]
    fn test_non_testable_requirement_is_excluded_explicitly() {
        let mut req = requirement(
            "D1",
            "intro",
            "for information only",
            &[ControlKey::new("GDPR", "Art.13")],
        );
        req.testable = false;
        let outcome = TestCaseGenerator::new().generate(&[req.clone()], &registry(), &PerRequirement);

        assert!(outcome.cases.is_empty());
        assert_eq!(
            outcome.exclusions,
            vec![Exclusion {
                requirement: req.id,
                reason: ExclusionReason::Informational
            }]
        );
    }

    #[test]
    fn test_uncovered_mandatory_requirement_is_a_failure() {
        // group-by-control plans nothing for an unmapped requirement;
        // mandatory-ness is decided by the requirement's own mappings
        let mandatory = requirement(
            "D1",
            "sec1",
            "encrypt phi at rest",
            &[ControlKey::new("HIPAA", "164.312(a)(2)(iv)")],
        );
        let unmapped = requirement("D1", "sec9", "miscellaneous note", &[]);

        struct PlansNothing;
        impl GenerationStrategy for PlansNothing {
            fn id(&self) -> &str {
                "plans-nothing"
            }
            fn plan(&self, _requirements: &[&Requirement]) -> Vec<CaseBlueprint> {
                Vec::new()
            }
        }

        let outcome = TestCaseGenerator::new().generate(
            &[mandatory.clone(), unmapped.clone()],
            &registry(),
            &PlansNothing,
        );

        assert_eq!(
            outcome.failures,
            vec![GenerateError::PolicyRefused {
                requirement: mandatory.id,
                strategy: "plans-nothing".to_string()
            }]
        );
        assert!(outcome
            .exclusions
            .iter()
            .any(|e| e.requirement == unmapped.id && e.reason == ExclusionReason::NoPlannedCase));
    }

    #[test]
    fn test_group_by_section_shares_cases_within_section() {
        let key = ControlKey::new("GDPR", "Art.13");
        let reqs = vec![
            requirement("D1", "sec2.1", "notify subjects", &[key.clone()]),
            requirement("D1", "sec2.3", "notify controllers", &[key.clone()]),
            requirement("D1", "sec4.1", "retention limits", &[key.clone()]),
        ];
        let outcome = TestCaseGenerator::new().generate(&reqs, &registry(), &GroupBySection);

        assert_eq!(outcome.cases.len(), 2);
        let sizes: Vec<usize> = outcome.cases.iter().map(|c| c.covers.len()).collect();
        assert!(sizes.contains(&2) && sizes.contains(&1));
    }
}
