//! End-to-end pipeline: map → generate → build → validate over one
//! consistent snapshot.
//!
//! The pipeline is a convenience facade; incremental callers drive the
//! components directly with a `previous` requirement snapshot, and batch
//! parallelism across documents belongs to the caller's worker pool.

use suture_core::config::ValidationPolicy;
use suture_core::errors::MatrixError;
use suture_core::model::{Candidate, Requirement, TestCase};
use suture_core::registry::ControlRegistry;
use tracing::info;

use crate::generator::{GenerationStrategy, TestCaseGenerator};
use crate::mapper::ComplianceMapper;
use crate::matrix::{MatrixBuilder, TraceMatrix};
use crate::report::RunReport;
use crate::validator::{ComplianceValidator, ValidationReport};

/// Primary result plus diagnostics for one pipeline run.
#[derive(Debug, Clone)]
pub struct RunResult {
    pub requirements: Vec<Requirement>,
    pub test_cases: Vec<TestCase>,
    pub matrix: TraceMatrix,
    pub validation: ValidationReport,
    pub report: RunReport,
}

/// Chains the four engine phases.
pub struct TracePipeline {
    mapper: ComplianceMapper,
    generator: TestCaseGenerator,
    validator: ComplianceValidator,
}

impl TracePipeline {
    pub fn new(mapper: ComplianceMapper) -> Self {
        Self {
            mapper,
            generator: TestCaseGenerator::new(),
            validator: ComplianceValidator::new(),
        }
    }

    /// Run the full chain for one document batch.
    ///
    /// `previous` carries the prior requirement snapshot for incremental
    /// re-mapping; identity-stable requirements keep their version unless
    /// their control set changed.
    pub fn run(
        &self,
        candidates: &[Candidate],
        registry: &ControlRegistry,
        strategy: &dyn GenerationStrategy,
        policy: &ValidationPolicy,
        previous: Option<&[Requirement]>,
    ) -> Result<RunResult, MatrixError> {
        let mut report = RunReport::new();

        let mapped = self.mapper.map(candidates, registry, previous);
        report.absorb_mapping(&mapped);
        info!(
            candidates = candidates.len(),
            requirements = mapped.requirements.len(),
            skipped = mapped.skipped.len(),
            "mapping phase complete"
        );

        let generated = self
            .generator
            .generate(&mapped.requirements, registry, strategy);
        report.absorb_generation(&generated);
        info!(
            strategy = strategy.id(),
            cases = generated.cases.len(),
            "generation phase complete"
        );

        let built = MatrixBuilder::build(&mapped.requirements, &generated.cases, registry)?;
        report.absorb_build(&built.diagnostics);
        info!(links = built.matrix.links().len(), "matrix phase complete");

        let validation =
            self.validator
                .validate(&built.matrix, &mapped.requirements, registry, policy);
        report.absorb_validation(&validation);
        info!(status = ?validation.status, "validation phase complete");

        Ok(RunResult {
            requirements: mapped.requirements,
            test_cases: generated.cases,
            matrix: built.matrix,
            validation,
            report,
        })
    }
}
