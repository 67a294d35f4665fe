//! Domain entities: candidates, requirements, test cases.
//!
//! Identity is content-derived (xxh3 over normalized content), never a
//! sequential counter, so re-extraction of unchanged text and merges
//! across parallel runs keep the same identities.

pub mod candidate;
pub mod requirement;
pub mod test_case;

pub use candidate::Candidate;
pub use requirement::{ControlMapping, Provenance, Requirement, RequirementId};
pub use test_case::{CaseId, TestCase};
