//! Error handling for Suture.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.
//!
//! Per-entity failures ([`MapError`], [`GenerateError`]) are isolated and
//! accumulated into the run report; they never abort a batch. Structural
//! errors ([`PolicyError`], [`RegistryError`]) are fatal to the run and
//! surfaced immediately. [`MatrixError`] marks a violated invariant and is
//! never swallowed.

pub mod generate_error;
pub mod map_error;
pub mod matrix_error;
pub mod policy_error;
pub mod registry_error;

pub use generate_error::GenerateError;
pub use map_error::MapError;
pub use matrix_error::MatrixError;
pub use policy_error::PolicyError;
pub use registry_error::RegistryError;
