//! Traceability matrix types and query surface.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use suture_core::errors::MatrixError;
use suture_core::model::{CaseId, RequirementId, TestCase};
use suture_core::registry::ControlKey;

/// Coverage status of one control ↔ requirement edge.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum CoverageStatus {
    /// At least one test case covers the requirement.
    Covered,
    /// The requirement is mapped but no test case covers it.
    Uncovered,
    /// The requirement maps to no control — a data-quality signal, not an
    /// error.
    Unmapped,
}

/// A materialized edge of the traceability graph.
///
/// `control` is absent for unmapped requirements; `test_case` is absent
/// when nothing covers the requirement.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct TraceLink {
    pub control: Option<ControlKey>,
    pub requirement: RequirementId,
    pub test_case: Option<CaseId>,
    pub status: CoverageStatus,
}

/// Plain structured records handed to the export manager.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixSnapshot {
    pub registry_version: u32,
    pub links: Vec<TraceLink>,
    pub requirement_count: usize,
    pub case_count: usize,
    pub covered: usize,
    pub uncovered: usize,
    pub unmapped: usize,
}

/// The derived edge set with maintained lookup indices.
///
/// Entities are kept in an arena of canonically sorted links; the index
/// maps hold link positions, never back-references, so the graph stays
/// cycle-free. Rebuilding from the same relations is deterministic and
/// idempotent.
#[derive(Debug, Clone, Default)]
pub struct TraceMatrix {
    registry_version: u32,
    links: Vec<TraceLink>,
    by_control: FxHashMap<ControlKey, SmallVec<[u32; 4]>>,
    by_requirement: FxHashMap<RequirementId, SmallVec<[u32; 4]>>,
    by_case: FxHashMap<CaseId, SmallVec<[u32; 4]>>,
}

impl TraceMatrix {
    /// Build a matrix from an edge set, sorting into canonical order and
    /// rebuilding the indices.
    pub fn from_links(registry_version: u32, mut links: Vec<TraceLink>) -> Self {
        links.sort();
        links.dedup();

        let mut matrix = Self {
            registry_version,
            links,
            by_control: FxHashMap::default(),
            by_requirement: FxHashMap::default(),
            by_case: FxHashMap::default(),
        };
        for (pos, link) in matrix.links.iter().enumerate() {
            let pos = pos as u32;
            if let Some(control) = &link.control {
                matrix.by_control.entry(control.clone()).or_default().push(pos);
            }
            matrix
                .by_requirement
                .entry(link.requirement)
                .or_default()
                .push(pos);
            if let Some(case) = &link.test_case {
                matrix.by_case.entry(*case).or_default().push(pos);
            }
        }
        matrix
    }

    pub fn registry_version(&self) -> u32 {
        self.registry_version
    }

    /// All links in canonical order.
    pub fn links(&self) -> &[TraceLink] {
        &self.links
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    fn resolve<'a>(&'a self, positions: Option<&'a SmallVec<[u32; 4]>>) -> Vec<&'a TraceLink> {
        positions
            .map(|ps| ps.iter().map(|&p| &self.links[p as usize]).collect())
            .unwrap_or_default()
    }

    /// Links touching one control.
    pub fn by_control(&self, control: &ControlKey) -> Vec<&TraceLink> {
        self.resolve(self.by_control.get(control))
    }

    /// Links touching one requirement.
    pub fn by_requirement(&self, requirement: RequirementId) -> Vec<&TraceLink> {
        self.resolve(self.by_requirement.get(&requirement))
    }

    /// Links touching one test case.
    pub fn by_test_case(&self, case: CaseId) -> Vec<&TraceLink> {
        self.resolve(self.by_case.get(&case))
    }

    /// Distinct requirements mapped to a control, in id order.
    pub fn requirements_for_control(&self, control: &ControlKey) -> Vec<RequirementId> {
        let mut ids: Vec<RequirementId> = self
            .by_control(control)
            .iter()
            .map(|l| l.requirement)
            .collect();
        ids.dedup();
        ids
    }

    /// Distinct test cases exercising a control, in id order.
    pub fn cases_for_control(&self, control: &ControlKey) -> Vec<CaseId> {
        let mut ids: Vec<CaseId> = self
            .by_control(control)
            .iter()
            .filter_map(|l| l.test_case)
            .collect();
        ids.sort();
        ids.dedup();
        ids
    }

    /// Distinct controls a requirement maps to, in key order.
    pub fn controls_for_requirement(&self, requirement: RequirementId) -> Vec<&ControlKey> {
        let mut keys: Vec<&ControlKey> = self
            .by_requirement(requirement)
            .iter()
            .filter_map(|l| l.control.as_ref())
            .collect();
        keys.dedup();
        keys
    }

    /// Distinct requirements a test case covers, in id order.
    pub fn requirements_for_case(&self, case: CaseId) -> Vec<RequirementId> {
        let mut ids: Vec<RequirementId> = self
            .by_test_case(case)
            .iter()
            .map(|l| l.requirement)
            .collect();
        ids.sort();
        ids.dedup();
        ids
    }

    /// Aggregate coverage status of a requirement, re-derived from its
    /// edges: covered beats uncovered beats unmapped.
    pub fn requirement_status(&self, requirement: RequirementId) -> Option<CoverageStatus> {
        self.by_requirement(requirement)
            .iter()
            .map(|l| l.status)
            .min()
    }

    /// Re-check the no-dangling-claims invariant against a test case set.
    ///
    /// Every covered link must name a test case whose covered set actually
    /// contains the requirement. Holds by construction for built matrices;
    /// this guards deserialized or hand-edited snapshots.
    pub fn verify(&self, test_cases: &[TestCase]) -> Result<(), MatrixError> {
        let by_id: FxHashMap<CaseId, &TestCase> =
            test_cases.iter().map(|c| (c.id, c)).collect();

        for link in &self.links {
            if link.status != CoverageStatus::Covered {
                continue;
            }
            let case = link.test_case.ok_or(MatrixError::CoveredWithoutCase {
                requirement: link.requirement,
            })?;
            let backed = by_id
                .get(&case)
                .is_some_and(|c| c.covers_requirement(link.requirement));
            if !backed {
                return Err(MatrixError::DanglingCoverage {
                    requirement: link.requirement,
                    test_case: case,
                });
            }
        }
        Ok(())
    }

    /// Plain-record snapshot for the export manager.
    pub fn snapshot(&self) -> MatrixSnapshot {
        let mut requirements: Vec<RequirementId> =
            self.links.iter().map(|l| l.requirement).collect();
        requirements.sort();
        requirements.dedup();

        MatrixSnapshot {
            registry_version: self.registry_version,
            links: self.links.clone(),
            requirement_count: requirements.len(),
            case_count: self.by_case.len(),
            covered: self.count(CoverageStatus::Covered),
            uncovered: self.count(CoverageStatus::Uncovered),
            unmapped: self.count(CoverageStatus::Unmapped),
        }
    }

    fn count(&self, status: CoverageStatus) -> usize {
        self.links.iter().filter(|l| l.status == status).count()
    }
}
