//! Validation policy and its fail-fast parsing.

use serde::{Deserialize, Serialize};

use crate::errors::PolicyError;

/// Recognized policy rule names, the only ones a caller may supply.
pub const RULE_NAMES: &[&str] = &[
    "require_full_coverage",
    "mandatory_only",
    "min_confidence",
    "allow_unmapped_requirements",
];

/// Coverage policy evaluated by the validator.
///
/// Unrecognized rule names fail fast at parse time; the validator never
/// silently ignores a rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationPolicy {
    /// Every control in scope must have mapped requirements and every one
    /// of its requirement edges covered.
    pub require_full_coverage: bool,
    /// Restrict the control scope to mandatory controls.
    pub mandatory_only: bool,
    /// Minimum confidence every retained mapping must meet.
    pub min_confidence: Option<f32>,
    /// Whether requirements mapped to no control are acceptable.
    pub allow_unmapped_requirements: bool,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            require_full_coverage: true,
            mandatory_only: false,
            min_confidence: None,
            allow_unmapped_requirements: true,
        }
    }
}

impl ValidationPolicy {
    /// Build a policy from `(rule, value)` pairs supplied by the caller's
    /// config layer.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, PolicyError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut policy = Self::default();
        for (rule, value) in pairs {
            match rule {
                "require_full_coverage" => {
                    policy.require_full_coverage = parse_bool(rule, value)?;
                }
                "mandatory_only" => {
                    policy.mandatory_only = parse_bool(rule, value)?;
                }
                "min_confidence" => {
                    policy.min_confidence = Some(parse_confidence(rule, value)?);
                }
                "allow_unmapped_requirements" => {
                    policy.allow_unmapped_requirements = parse_bool(rule, value)?;
                }
                other => {
                    return Err(PolicyError::UnknownRule {
                        rule: other.to_string(),
                    });
                }
            }
        }
        Ok(policy)
    }

    /// Parse a policy from a TOML table, rejecting unknown rule names.
    pub fn from_toml(input: &str) -> Result<Self, PolicyError> {
        let table: toml::Table =
            input
                .parse()
                .map_err(|e: toml::de::Error| PolicyError::InvalidValue {
                    rule: "policy".to_string(),
                    value: e.to_string(),
                })?;

        let mut policy = Self::default();
        for (rule, value) in &table {
            match rule.as_str() {
                "require_full_coverage" => {
                    policy.require_full_coverage = toml_bool(rule, value)?;
                }
                "mandatory_only" => {
                    policy.mandatory_only = toml_bool(rule, value)?;
                }
                "min_confidence" => {
                    let raw = value.as_float().ok_or_else(|| invalid(rule, value))?;
                    policy.min_confidence = Some(check_confidence(rule, raw as f32)?);
                }
                "allow_unmapped_requirements" => {
                    policy.allow_unmapped_requirements = toml_bool(rule, value)?;
                }
                other => {
                    return Err(PolicyError::UnknownRule {
                        rule: other.to_string(),
                    });
                }
            }
        }
        Ok(policy)
    }

    /// Names of the rules this policy enables, for reporting.
    pub fn enabled_rules(&self) -> Vec<&'static str> {
        let mut rules = Vec::new();
        if self.require_full_coverage {
            rules.push("require_full_coverage");
        }
        if self.mandatory_only {
            rules.push("mandatory_only");
        }
        if self.min_confidence.is_some() {
            rules.push("min_confidence");
        }
        if !self.allow_unmapped_requirements {
            rules.push("allow_unmapped_requirements");
        }
        rules
    }
}

fn parse_bool(rule: &str, value: &str) -> Result<bool, PolicyError> {
    value.parse().map_err(|_| PolicyError::InvalidValue {
        rule: rule.to_string(),
        value: value.to_string(),
    })
}

fn parse_confidence(rule: &str, value: &str) -> Result<f32, PolicyError> {
    let parsed: f32 = value.parse().map_err(|_| PolicyError::InvalidValue {
        rule: rule.to_string(),
        value: value.to_string(),
    })?;
    check_confidence(rule, parsed)
}

fn check_confidence(rule: &str, value: f32) -> Result<f32, PolicyError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(PolicyError::InvalidValue {
            rule: rule.to_string(),
            value: value.to_string(),
        });
    }
    Ok(value)
}

fn toml_bool(rule: &str, value: &toml::Value) -> Result<bool, PolicyError> {
    value.as_bool().ok_or_else(|| invalid(rule, value))
}

fn invalid(rule: &str, value: &toml::Value) -> PolicyError {
    PolicyError::InvalidValue {
        rule: rule.to_string(),
        value: value.to_string(),
    }
}
