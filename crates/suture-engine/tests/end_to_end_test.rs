//! Full-chain tests: candidates → requirements → test cases → matrix →
//! validation, including the coverage-loss flip when a case disappears.

use suture_core::config::{MatchConfig, ValidationPolicy};
use suture_core::model::Candidate;
use suture_core::registry::{self, ControlKey};
use suture_engine::{
    diff, ComplianceMapper, CoverageStatus, KeywordMatcher, KeywordRule, MatcherSet,
    MatrixBuilder, PerRequirement, TracePipeline, ValidationStatus, ViolationKind,
};

const REGISTRY_TOML: &str = r#"
version = 1

[[framework]]
id = "HIPAA"

[[framework.control]]
id = "164.312(a)(2)(iv)"
title = "Encryption and decryption"
mandatory = true
version = "2013"
"#;

fn encryption_control() -> ControlKey {
    ControlKey::new("HIPAA", "164.312(a)(2)(iv)")
}

fn pipeline() -> TracePipeline {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let matchers = MatcherSet::new().push(Box::new(KeywordMatcher::new(
        "hipaa-keywords",
        vec![KeywordRule::new(encryption_control(), &["encrypted at rest"])],
    )));
    TracePipeline::new(ComplianceMapper::new(matchers, MatchConfig::default()))
}

fn policy() -> ValidationPolicy {
    ValidationPolicy {
        require_full_coverage: true,
        mandatory_only: true,
        min_confidence: None,
        allow_unmapped_requirements: true,
    }
}

#[test]
fn test_encryption_requirement_flows_to_passing_validation() {
    let registry = registry::from_toml(REGISTRY_TOML).unwrap();
    let candidates = [Candidate::new(
        "D1",
        "sec2.1",
        "Patient data must be encrypted at rest",
    )
    .with_framework_hint("HIPAA")];

    let result = pipeline()
        .run(&candidates, &registry, &PerRequirement, &policy(), None)
        .unwrap();

    assert_eq!(result.requirements.len(), 1);
    let requirement = &result.requirements[0];
    assert!(requirement.maps_to(&encryption_control()));

    assert_eq!(result.test_cases.len(), 1);
    assert!(result.test_cases[0].covers_requirement(requirement.id));

    let links = result.matrix.links();
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].status, CoverageStatus::Covered);
    assert_eq!(links[0].control.as_ref(), Some(&encryption_control()));

    assert_eq!(result.validation.status, ValidationStatus::Pass);
    assert!(result.report.skipped_candidates.is_empty());
    assert!(result.report.generation_failures.is_empty());
}

#[test]
fn test_removing_case_flips_edge_and_validation() {
    let registry = registry::from_toml(REGISTRY_TOML).unwrap();
    let candidates = [Candidate::new(
        "D1",
        "sec2.1",
        "Patient data must be encrypted at rest",
    )];

    let result = pipeline()
        .run(&candidates, &registry, &PerRequirement, &policy(), None)
        .unwrap();
    assert_eq!(result.validation.status, ValidationStatus::Pass);

    // Rebuild after the covering case is gone
    let rebuilt = MatrixBuilder::build(&result.requirements, &[], &registry).unwrap();
    let delta = diff(&result.matrix, &rebuilt.matrix);
    let regressions = delta.coverage_regressions();
    assert_eq!(regressions.len(), 1);
    assert_eq!(regressions[0].requirement, result.requirements[0].id);
    assert_eq!(regressions[0].to, CoverageStatus::Uncovered);

    let validator = suture_engine::ComplianceValidator::new();
    let report = validator.validate(&rebuilt.matrix, &result.requirements, &registry, &policy());
    assert_eq!(report.status, ValidationStatus::Fail);
    assert!(report.violations.iter().any(|v| {
        v.kind == ViolationKind::UncoveredRequirement
            && v.control.as_ref() == Some(&encryption_control())
    }));
}

#[test]
fn test_unknown_framework_candidate_is_reported_not_fatal() {
    let registry = registry::from_toml(REGISTRY_TOML).unwrap();
    let candidates = [
        Candidate::new("D1", "sec2.1", "Patient data must be encrypted at rest"),
        Candidate::new("D2", "sec1", "Records retained for audit").with_framework_hint("SOX"),
    ];

    let result = pipeline()
        .run(&candidates, &registry, &PerRequirement, &policy(), None)
        .unwrap();

    assert_eq!(result.requirements.len(), 1);
    assert_eq!(result.report.skipped_candidates.len(), 1);
    assert_eq!(
        result.report.skipped_candidates[0].framework.as_deref(),
        Some("SOX")
    );
    // The surviving candidate still validates clean
    assert_eq!(result.validation.status, ValidationStatus::Pass);
}

#[test]
fn test_matrix_snapshot_is_export_ready() {
    let registry = registry::from_toml(REGISTRY_TOML).unwrap();
    let candidates = [Candidate::new(
        "D1",
        "sec2.1",
        "Patient data must be encrypted at rest",
    )];

    let result = pipeline()
        .run(&candidates, &registry, &PerRequirement, &policy(), None)
        .unwrap();

    let snapshot = result.matrix.snapshot();
    assert_eq!(snapshot.covered, 1);

    // Exporters consume plain JSON records
    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json["covered"], 1);
    assert!(json["links"].is_array());

    let validation_json = serde_json::to_value(&result.validation).unwrap();
    assert_eq!(validation_json["status"], "pass");
}
