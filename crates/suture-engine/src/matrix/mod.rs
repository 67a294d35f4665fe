//! Traceability matrix — the derived control ↔ requirement ↔ test-case
//! edge set with maintained indices, build, and diff.

pub mod builder;
pub mod diff;
pub mod types;

pub use builder::{BuildDiagnostic, BuildOutcome, MatrixBuilder};
pub use diff::{diff, MatrixDelta, StatusChange};
pub use types::{CoverageStatus, MatrixSnapshot, TraceLink, TraceMatrix};
