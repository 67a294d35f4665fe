//! Matrix construction.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use suture_core::errors::MatrixError;
use suture_core::model::{CaseId, Requirement, RequirementId, TestCase};
use suture_core::registry::ControlRegistry;

use super::types::{CoverageStatus, TraceLink, TraceMatrix};

/// Build-time data-quality findings that are not integrity errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum BuildDiagnostic {
    /// A test case covers a requirement id absent from the requirement
    /// set — typically a stale case surviving a re-extraction.
    DanglingCase {
        test_case: CaseId,
        requirement: RequirementId,
    },
}

/// Result of one matrix build.
#[derive(Debug, Clone)]
pub struct BuildOutcome {
    pub matrix: TraceMatrix,
    pub diagnostics: Vec<BuildDiagnostic>,
}

/// Derives the traceability matrix from requirements and test cases.
///
/// The edge set depends only on the relations, never on processing order,
/// so repeated or concurrent builds over the same snapshot are identical.
#[derive(Debug, Default)]
pub struct MatrixBuilder;

impl MatrixBuilder {
    /// Build the full edge set.
    ///
    /// A requirement referencing a control absent from `registry` is an
    /// integrity error that aborts the build; a test case referencing an
    /// unknown requirement is only a diagnostic.
    pub fn build(
        requirements: &[Requirement],
        test_cases: &[TestCase],
        registry: &ControlRegistry,
    ) -> Result<BuildOutcome, MatrixError> {
        let known: FxHashSet<RequirementId> = requirements.iter().map(|r| r.id).collect();

        // Requirement → covering cases, plus dangling-case diagnostics
        let mut covering: FxHashMap<RequirementId, Vec<CaseId>> = FxHashMap::default();
        let mut diagnostics = Vec::new();
        for case in test_cases {
            for &req in &case.covers {
                if known.contains(&req) {
                    covering.entry(req).or_default().push(case.id);
                } else {
                    diagnostics.push(BuildDiagnostic::DanglingCase {
                        test_case: case.id,
                        requirement: req,
                    });
                }
            }
        }
        for cases in covering.values_mut() {
            cases.sort();
            cases.dedup();
        }
        diagnostics.sort_by_key(|BuildDiagnostic::DanglingCase { test_case, requirement }| {
            (*test_case, *requirement)
        });

        let mut links = Vec::new();
        for req in requirements {
            let cases = covering.get(&req.id).map(Vec::as_slice).unwrap_or(&[]);

            if req.mappings.is_empty() {
                if cases.is_empty() {
                    links.push(TraceLink {
                        control: None,
                        requirement: req.id,
                        test_case: None,
                        status: CoverageStatus::Unmapped,
                    });
                } else {
                    for &case in cases {
                        links.push(TraceLink {
                            control: None,
                            requirement: req.id,
                            test_case: Some(case),
                            status: CoverageStatus::Unmapped,
                        });
                    }
                }
                continue;
            }

            for mapping in &req.mappings {
                if !registry.contains(&mapping.control) {
                    return Err(MatrixError::UnknownControl {
                        control: mapping.control.clone(),
                        requirement: req.id,
                    });
                }
                if cases.is_empty() {
                    links.push(TraceLink {
                        control: Some(mapping.control.clone()),
                        requirement: req.id,
                        test_case: None,
                        status: CoverageStatus::Uncovered,
                    });
                } else {
                    for &case in cases {
                        links.push(TraceLink {
                            control: Some(mapping.control.clone()),
                            requirement: req.id,
                            test_case: Some(case),
                            status: CoverageStatus::Covered,
                        });
                    }
                }
            }
        }

        let matrix = TraceMatrix::from_links(registry.version(), links);
        debug_assert!(matrix.verify(test_cases).is_ok());

        tracing::debug!(
            links = matrix.links().len(),
            diagnostics = diagnostics.len(),
            "matrix build complete"
        );

        Ok(BuildOutcome {
            matrix,
            diagnostics,
        })
    }
}
