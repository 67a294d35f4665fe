//! suture-engine: Compliance mapping and traceability engine.
//!
//! This crate provides the four core transformations over the suture-core
//! model, each pure and side-effect-free over immutable inputs:
//! - Mapper: candidates → identity-stable requirements mapped to controls
//! - Generator: requirements → test cases via named grouping strategies
//! - Matrix: control ↔ requirement ↔ test-case edge set with indices and diff
//! - Validator: policy-driven coverage evaluation over a matrix snapshot
//!
//! The report module accumulates per-run diagnostics (skips, exclusions,
//! violations) so nothing is dropped silently; the pipeline module chains
//! the four phases over one consistent snapshot.

pub mod generator;
pub mod mapper;
pub mod matrix;
pub mod pipeline;
pub mod report;
pub mod validator;

// Re-exports for convenience
pub use generator::{
    CaseBlueprint, Exclusion, ExclusionReason, GenerateOutcome, GenerationStrategy,
    GroupByControl, GroupBySection, PerRequirement, TestCaseGenerator,
};
pub use mapper::{
    normalize, ComplianceMapper, ControlHit, KeywordMatcher, KeywordRule, MapOutcome, Matcher,
    MatcherSet, PatternMatcher, PatternRule, SkippedCandidate,
};
pub use matrix::{
    diff, BuildDiagnostic, BuildOutcome, CoverageStatus, MatrixBuilder, MatrixDelta,
    MatrixSnapshot, StatusChange, TraceLink, TraceMatrix,
};
pub use pipeline::{RunResult, TracePipeline};
pub use report::{GenerationFailure, RunReport};
pub use validator::{
    ComplianceValidator, ControlVerdict, ValidationReport, ValidationStatus, VerdictStatus,
    Violation, ViolationKind,
};
