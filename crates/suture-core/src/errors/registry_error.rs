//! Registry loading errors.

use crate::registry::ControlKey;

/// Errors raised while loading a control registry.
///
/// A malformed registry is fatal to the run.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("registry parse failure: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to read registry file `{path}`")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("duplicate control {control} in registry")]
    DuplicateControl { control: ControlKey },

    #[error("framework `{framework}` declares no controls")]
    EmptyFramework { framework: String },
}
