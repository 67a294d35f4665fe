//! Registry loading from TOML.
//!
//! Format:
//!
//! ```toml
//! version = 3
//!
//! [[framework]]
//! id = "HIPAA"
//!
//! [[framework.control]]
//! id = "164.312(a)(2)(iv)"
//! title = "Encryption and decryption"
//! mandatory = true
//! version = "2013"
//! ```
//!
//! A malformed registry is fatal to the run: parse failures, duplicate
//! control keys, and frameworks without controls are all rejected.

use std::path::Path;

use serde::Deserialize;

use super::{Control, ControlKey, ControlRegistry};
use crate::errors::RegistryError;

#[derive(Debug, Deserialize)]
struct RegistryFile {
    #[serde(default = "default_version")]
    version: u32,
    #[serde(default, rename = "framework")]
    frameworks: Vec<FrameworkEntry>,
}

fn default_version() -> u32 {
    1
}

#[derive(Debug, Deserialize)]
struct FrameworkEntry {
    id: String,
    #[serde(default, rename = "control")]
    controls: Vec<ControlEntry>,
}

#[derive(Debug, Deserialize)]
struct ControlEntry {
    id: String,
    title: String,
    #[serde(default)]
    mandatory: bool,
    #[serde(default)]
    version: String,
}

/// Parse a registry from TOML text.
pub fn from_toml(input: &str) -> Result<ControlRegistry, RegistryError> {
    let file: RegistryFile = toml::from_str(input)?;

    let mut controls = Vec::new();
    for framework in file.frameworks {
        if framework.controls.is_empty() {
            return Err(RegistryError::EmptyFramework {
                framework: framework.id,
            });
        }
        for entry in framework.controls {
            controls.push(Control {
                key: ControlKey::new(framework.id.clone(), entry.id),
                title: entry.title,
                mandatory: entry.mandatory,
                version: entry.version,
            });
        }
    }

    let registry = ControlRegistry::from_controls(file.version, controls)?;
    tracing::debug!(
        version = registry.version(),
        controls = registry.len(),
        "registry loaded"
    );
    Ok(registry)
}

/// Load a registry from a TOML file on disk.
pub fn from_path(path: impl AsRef<Path>) -> Result<ControlRegistry, RegistryError> {
    let text = std::fs::read_to_string(path.as_ref()).map_err(|source| RegistryError::Io {
        path: path.as_ref().display().to_string(),
        source,
    })?;
    from_toml(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    const REGISTRY: &str = r#"
version = 3

[[framework]]
id = "HIPAA"

[[framework.control]]
id = "164.312(a)(2)(iv)"
title = "Encryption and decryption"
mandatory = true
version = "2013"

[[framework.control]]
id = "164.312(b)"
title = "Audit controls"
mandatory = true
version = "2013"

[[framework]]
id = "GDPR"

[[framework.control]]
id = "Art.32"
title = "Security of processing"
mandatory = false
version = "2016"
"#;

    #[test]
    fn test_parse_registry() {
        let registry = from_toml(REGISTRY).unwrap();
        assert_eq!(registry.version(), 3);
        assert_eq!(registry.len(), 3);

        let control = registry
            .get(&ControlKey::new("HIPAA", "164.312(a)(2)(iv)"))
            .unwrap();
        assert_eq!(control.title, "Encryption and decryption");
        assert!(control.mandatory);
    }

    #[test]
    fn test_empty_framework_rejected() {
        let err = from_toml("[[framework]]\nid = \"HIPAA\"\n").unwrap_err();
        assert!(matches!(err, RegistryError::EmptyFramework { .. }));
    }

    #[test]
    fn test_malformed_toml_rejected() {
        let err = from_toml("version = \"not a number\"").unwrap_err();
        assert!(matches!(err, RegistryError::Parse(_)));
    }

    #[test]
    fn test_duplicate_control_rejected() {
        let input = r#"
[[framework]]
id = "HIPAA"

[[framework.control]]
id = "164.312(b)"
title = "Audit controls"

[[framework.control]]
id = "164.312(b)"
title = "Audit controls again"
"#;
        let err = from_toml(input).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateControl { .. }));
    }
}
