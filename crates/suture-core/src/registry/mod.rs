//! Compliance control registry.
//!
//! Controls are immutable once published. A registry is loaded once,
//! read-only for the lifetime of a run, and replaced wholesale via
//! [`SharedRegistry::publish`] so in-flight runs never observe a partial
//! update.

pub mod control;
pub mod loader;
pub mod shared;

pub use control::{Control, ControlKey, ControlRegistry};
pub use loader::{from_path, from_toml};
pub use shared::SharedRegistry;
