//! Control and registry types.

use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::errors::RegistryError;

/// Identity of a compliance control: `(framework, control)`.
///
/// Display form is `"HIPAA/164.312(a)(2)(iv)"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ControlKey {
    /// Framework identifier, e.g. `"HIPAA"`.
    pub framework: String,
    /// Control citation within the framework, e.g. `"164.312(b)"`.
    pub control: String,
}

impl ControlKey {
    pub fn new(framework: impl Into<String>, control: impl Into<String>) -> Self {
        Self {
            framework: framework.into(),
            control: control.into(),
        }
    }
}

impl fmt::Display for ControlKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.framework, self.control)
    }
}

/// A single named regulatory clause within a framework.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Control {
    pub key: ControlKey,
    /// Human-readable title, e.g. `"Encryption and decryption"`.
    pub title: String,
    /// Mandatory controls must end up with covered requirements.
    pub mandatory: bool,
    /// Framework revision this control was published under.
    pub version: String,
}

/// Read-only collection of controls, indexed by key and by framework.
#[derive(Debug, Clone, Default)]
pub struct ControlRegistry {
    version: u32,
    controls: FxHashMap<ControlKey, Control>,
    by_framework: FxHashMap<String, Vec<ControlKey>>,
}

impl ControlRegistry {
    /// Build a registry from a list of controls.
    ///
    /// Duplicate control keys are a malformed-registry error.
    pub fn from_controls(
        version: u32,
        controls: Vec<Control>,
    ) -> Result<Self, RegistryError> {
        let mut registry = Self {
            version,
            controls: FxHashMap::default(),
            by_framework: FxHashMap::default(),
        };

        for control in controls {
            if registry.controls.contains_key(&control.key) {
                return Err(RegistryError::DuplicateControl {
                    control: control.key,
                });
            }
            registry
                .by_framework
                .entry(control.key.framework.clone())
                .or_default()
                .push(control.key.clone());
            registry.controls.insert(control.key.clone(), control);
        }

        // Canonical per-framework order, independent of insertion order
        for keys in registry.by_framework.values_mut() {
            keys.sort();
        }

        Ok(registry)
    }

    /// Registry revision, bumped by the loader on every publish.
    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn get(&self, key: &ControlKey) -> Option<&Control> {
        self.controls.get(key)
    }

    pub fn contains(&self, key: &ControlKey) -> bool {
        self.controls.contains_key(key)
    }

    pub fn has_framework(&self, framework: &str) -> bool {
        self.by_framework.contains_key(framework)
    }

    /// Control keys of one framework, in canonical order.
    pub fn framework_controls(&self, framework: &str) -> &[ControlKey] {
        self.by_framework
            .get(framework)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// All controls, in canonical key order.
    pub fn controls(&self) -> Vec<&Control> {
        let mut all: Vec<&Control> = self.controls.values().collect();
        all.sort_by(|a, b| a.key.cmp(&b.key));
        all
    }

    /// All mandatory controls, in canonical key order.
    pub fn mandatory_controls(&self) -> Vec<&Control> {
        self.controls().into_iter().filter(|c| c.mandatory).collect()
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }
}
