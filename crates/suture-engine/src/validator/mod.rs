//! Compliance validator — policy evaluation over a matrix snapshot.
//!
//! Purely read-side: evaluates each enabled rule independently,
//! aggregates to pass/fail, and never mutates the matrix, so it is safe
//! to run repeatedly and concurrently with other read-side queries.

pub mod types;

pub use types::{
    ControlVerdict, ValidationReport, ValidationStatus, VerdictStatus, Violation, ViolationKind,
};

use suture_core::config::ValidationPolicy;
use suture_core::model::Requirement;
use suture_core::registry::{Control, ControlRegistry};

use crate::matrix::{CoverageStatus, TraceMatrix};

/// Evaluates a [`ValidationPolicy`] against a matrix snapshot.
#[derive(Debug, Default)]
pub struct ComplianceValidator;

impl ComplianceValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validate one snapshot.
    ///
    /// `requirements` must be the same set the matrix was built from; the
    /// registry supplies the control scope, including controls with no
    /// mapped requirements at all — those never appear as matrix edges
    /// but still fail coverage.
    pub fn validate(
        &self,
        matrix: &TraceMatrix,
        requirements: &[Requirement],
        registry: &ControlRegistry,
        policy: &ValidationPolicy,
    ) -> ValidationReport {
        let scope: Vec<&Control> = if policy.mandatory_only {
            registry.mandatory_controls()
        } else {
            registry.controls()
        };

        let mut violations = Vec::new();
        let mut verdicts = Vec::new();

        for control in &scope {
            let mapped = matrix.requirements_for_control(&control.key);
            let covering = matrix.cases_for_control(&control.key);
            let uncovered: Vec<_> = mapped
                .iter()
                .copied()
                .filter(|&req| {
                    matrix
                        .by_requirement(req)
                        .iter()
                        .filter(|l| l.control.as_ref() == Some(&control.key))
                        .all(|l| l.status != CoverageStatus::Covered)
                })
                .collect();

            let status = if mapped.is_empty() || uncovered.len() == mapped.len() {
                VerdictStatus::Fail
            } else if uncovered.is_empty() {
                VerdictStatus::Pass
            } else {
                VerdictStatus::Partial
            };

            if policy.require_full_coverage {
                if mapped.is_empty() {
                    violations.push(Violation {
                        kind: ViolationKind::ControlWithoutRequirements,
                        control: Some(control.key.clone()),
                        requirement: None,
                        detail: format!(
                            "control {} ({}) has no requirements mapped to it",
                            control.key, control.title
                        ),
                    });
                }
                for &req in &uncovered {
                    violations.push(Violation {
                        kind: ViolationKind::UncoveredRequirement,
                        control: Some(control.key.clone()),
                        requirement: Some(req),
                        detail: format!(
                            "requirement {req} mapped to control {} has no covering test case",
                            control.key
                        ),
                    });
                }
            }

            verdicts.push(ControlVerdict {
                control: control.key.clone(),
                status,
                mapped_requirements: mapped.len(),
                covering_cases: covering.len(),
                uncovered_requirements: uncovered,
            });
        }

        if let Some(floor) = policy.min_confidence {
            for req in requirements {
                for mapping in &req.mappings {
                    if policy.mandatory_only
                        && !registry
                            .get(&mapping.control)
                            .is_some_and(|c| c.mandatory)
                    {
                        continue;
                    }
                    if mapping.confidence < floor {
                        violations.push(Violation {
                            kind: ViolationKind::LowConfidenceMapping,
                            control: Some(mapping.control.clone()),
                            requirement: Some(req.id),
                            detail: format!(
                                "mapping of requirement {} to {} has confidence {:.2}, below {:.2}",
                                req.id, mapping.control, mapping.confidence, floor
                            ),
                        });
                    }
                }
            }
        }

        if !policy.allow_unmapped_requirements {
            for req in requirements {
                if !req.is_mapped() {
                    violations.push(Violation {
                        kind: ViolationKind::UnmappedRequirement,
                        control: None,
                        requirement: Some(req.id),
                        detail: format!(
                            "requirement {} ({} {}) maps to no control",
                            req.id, req.source.document_id, req.source.location
                        ),
                    });
                }
            }
        }

        let status = if violations.is_empty() {
            ValidationStatus::Pass
        } else {
            ValidationStatus::Fail
        };

        tracing::debug!(
            controls = verdicts.len(),
            violations = violations.len(),
            ?status,
            "validation run complete"
        );

        ValidationReport {
            status,
            rules_evaluated: policy
                .enabled_rules()
                .iter()
                .map(|r| r.to_string())
                .collect(),
            control_verdicts: verdicts,
            violations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use suture_core::model::{CaseId, ControlMapping, Provenance, RequirementId, TestCase};
    use suture_core::registry::ControlKey;

    use crate::matrix::MatrixBuilder;

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

    fn requirement(loc: &str, text: &str, control: Option<(&str, &str, f32)>) -> Requirement {
        Requirement {
            id: RequirementId::derive("D1", loc, text),
            text: text.to_string(),
            source: Provenance {
                document_id: "D1".to_string(),
                location: loc.to_string(),
            },
            mappings: control
                .map(|(fw, id, confidence)| {
                    vec![ControlMapping {
                        control: ControlKey::new(fw, id),
                        confidence,
                        matcher: "kw".to_string(),
                    }]
                })
                .unwrap_or_default(),
            mapping_version: 1,
            testable: true,
        }
    }

    fn case(covers: Vec<RequirementId>) -> TestCase {
        TestCase {
            id: CaseId::derive("per-requirement", "c", &covers),
            title: "Verify".to_string(),
            payload: serde_json::json!({}),
            covers: {
                let mut covers = covers;
                covers.sort();
                covers
            },
        }
    }

    #[test]
    fn test_mandatory_control_without_cases_fails() {
        let req = requirement(
            "sec1",
            "encrypt at rest",
            Some(("HIPAA", "164.312(a)(2)(iv)", 0.9)),
        );
        let reg = registry();
        let outcome = MatrixBuilder::build(&[req.clone()], &[], &reg).unwrap();

        let policy = ValidationPolicy {
            require_full_coverage: true,
            mandatory_only: true,
            min_confidence: None,
            allow_unmapped_requirements: true,
        };
        let report =
            ComplianceValidator::new().validate(&outcome.matrix, &[req.clone()], &reg, &policy);

        assert_eq!(report.status, ValidationStatus::Fail);
        assert_eq!(report.control_verdicts.len(), 1);
        assert_eq!(report.control_verdicts[0].status, VerdictStatus::Fail);
        assert!(report.violations.iter().any(|v| {
            v.kind == ViolationKind::UncoveredRequirement && v.requirement == Some(req.id)
        }));
    }

    #[test]
    fn test_mandatory_control_with_no_requirements_fails() {
        let reg = registry();
        let outcome = MatrixBuilder::build(&[], &[], &reg).unwrap();

        let policy = ValidationPolicy {
            mandatory_only: true,
            ..ValidationPolicy::default()
        };
        let report = ComplianceValidator::new().validate(&outcome.matrix, &[], &reg, &policy);

        assert_eq!(report.status, ValidationStatus::Fail);
        assert_eq!(
            report.violations[0].kind,
            ViolationKind::ControlWithoutRequirements
        );
        assert_eq!(
            report.violations[0].control,
            Some(ControlKey::new("HIPAA", "164.312(a)(2)(iv)"))
        );
    }

    #[test]
    fn test_full_coverage_passes() {
        let req = requirement(
            "sec1",
            "encrypt at rest",
            Some(("HIPAA", "164.312(a)(2)(iv)", 0.9)),
        );
        let tc = case(vec![req.id]);
        let reg = registry();
        let outcome = MatrixBuilder::build(&[req.clone()], &[tc], &reg).unwrap();

        let policy = ValidationPolicy {
            mandatory_only: true,
            ..ValidationPolicy::default()
        };
        let report =
            ComplianceValidator::new().validate(&outcome.matrix, &[req], &reg, &policy);

        assert_eq!(report.status, ValidationStatus::Pass);
        assert_eq!(report.control_verdicts[0].status, VerdictStatus::Pass);
        assert!(report.violations.is_empty());
        assert_eq!(
            report.rules_evaluated,
            vec!["require_full_coverage", "mandatory_only"]
        );
    }

    #[test]
    fn test_min_confidence_rule() {
        let req = requirement(
            "sec1",
            "encrypt at rest",
            Some(("HIPAA", "164.312(a)(2)(iv)", 0.55)),
        );
        let tc = case(vec![req.id]);
        let reg = registry();
        let outcome = MatrixBuilder::build(&[req.clone()], &[tc], &reg).unwrap();

        let policy = ValidationPolicy {
            require_full_coverage: false,
            mandatory_only: false,
            min_confidence: Some(0.8),
            allow_unmapped_requirements: true,
        };
        let report =
            ComplianceValidator::new().validate(&outcome.matrix, &[req.clone()], &reg, &policy);

        assert_eq!(report.status, ValidationStatus::Fail);
        assert_eq!(report.violations.len(), 1);
        assert_eq!(report.violations[0].kind, ViolationKind::LowConfidenceMapping);
    }

    #[test]
    fn test_unmapped_requirement_rule() {
        let unmapped = requirement("sec9", "misc note", None);
        let reg = registry();
        let outcome = MatrixBuilder::build(&[unmapped.clone()], &[], &reg).unwrap();

        let lenient = ValidationPolicy {
            require_full_coverage: false,
            allow_unmapped_requirements: true,
            ..ValidationPolicy::default()
        };
        let strict = ValidationPolicy {
            require_full_coverage: false,
            allow_unmapped_requirements: false,
            ..ValidationPolicy::default()
        };

        let validator = ComplianceValidator::new();
        assert!(validator
            .validate(&outcome.matrix, &[unmapped.clone()], &reg, &lenient)
            .passed());
        let report = validator.validate(&outcome.matrix, &[unmapped.clone()], &reg, &strict);
        assert_eq!(report.status, ValidationStatus::Fail);
        assert_eq!(report.violations[0].kind, ViolationKind::UnmappedRequirement);
        assert_eq!(report.violations[0].requirement, Some(unmapped.id));
    }

    #[test]
    fn test_partial_coverage_verdict() {
        let covered = requirement(
            "sec1",
            "encrypt at rest",
            Some(("HIPAA", "164.312(a)(2)(iv)", 0.9)),
        );
        let uncovered = requirement(
            "sec2",
            "encrypt backups",
            Some(("HIPAA", "164.312(a)(2)(iv)", 0.9)),
        );
        let tc = case(vec![covered.id]);
        let reg = registry();
        let outcome =
            MatrixBuilder::build(&[covered.clone(), uncovered.clone()], &[tc], &reg).unwrap();

        let policy = ValidationPolicy {
            mandatory_only: true,
            ..ValidationPolicy::default()
        };
        let report = ComplianceValidator::new().validate(
            &outcome.matrix,
            &[covered, uncovered.clone()],
            &reg,
            &policy,
        );

        assert_eq!(report.control_verdicts[0].status, VerdictStatus::Partial);
        assert_eq!(
            report.control_verdicts[0].uncovered_requirements,
            vec![uncovered.id]
        );
    }
}
