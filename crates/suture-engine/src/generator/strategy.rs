//! Generation strategies — named, swappable grouping policies.

use std::collections::BTreeMap;

use serde_json::json;
use suture_core::model::Requirement;
use suture_core::registry::ControlKey;

use super::types::CaseBlueprint;

/// Grouping policy: decides how many cases to plan and which requirements
/// each one covers. Pure — identical requirement sets yield identical
/// plans.
pub trait GenerationStrategy: Send + Sync {
    fn id(&self) -> &str;
    fn plan(&self, requirements: &[&Requirement]) -> Vec<CaseBlueprint>;
}

fn truncate(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

fn payload_for(requirements: &[&Requirement]) -> serde_json::Value {
    let mut controls: Vec<String> = requirements
        .iter()
        .flat_map(|r| r.mappings.iter().map(|m| m.control.to_string()))
        .collect();
    controls.sort();
    controls.dedup();

    json!({
        "sources": requirements
            .iter()
            .map(|r| json!({
                "document_id": r.source.document_id,
                "location": r.source.location,
                "text": r.text,
            }))
            .collect::<Vec<_>>(),
        "controls": controls,
    })
}

/// One case per requirement.
pub struct PerRequirement;

impl GenerationStrategy for PerRequirement {
    fn id(&self) -> &str {
        "per-requirement"
    }

    fn plan(&self, requirements: &[&Requirement]) -> Vec<CaseBlueprint> {
        requirements
            .iter()
            .map(|&req| CaseBlueprint {
                key: req.id.to_string(),
                title: format!("Verify: {}", truncate(&req.text, 80)),
                payload: payload_for(&[req]),
                covers: vec![req.id],
            })
            .collect()
    }
}

/// One case per control, covering every requirement mapped to it.
///
/// Unmapped requirements get no case from this strategy; the generator
/// surfaces them as exclusions or failures.
pub struct GroupByControl;

impl GenerationStrategy for GroupByControl {
    fn id(&self) -> &str {
        "group-by-control"
    }

    fn plan(&self, requirements: &[&Requirement]) -> Vec<CaseBlueprint> {
        let mut by_control: BTreeMap<ControlKey, Vec<&Requirement>> = BTreeMap::new();
        for &req in requirements {
            for mapping in &req.mappings {
                by_control
                    .entry(mapping.control.clone())
                    .or_default()
                    .push(req);
            }
        }

        by_control
            .into_iter()
            .map(|(control, group)| CaseBlueprint {
                key: control.to_string(),
                title: format!("Verify control {control}"),
                payload: payload_for(&group),
                covers: group.iter().map(|r| r.id).collect(),
            })
            .collect()
    }
}

/// One case per document section.
///
/// The section is the location's first dot-separated segment, so
/// `sec2.1` and `sec2.3` share a case keyed on `D1/sec2`.
pub struct GroupBySection;

impl GenerationStrategy for GroupBySection {
    fn id(&self) -> &str {
        "group-by-section"
    }

    fn plan(&self, requirements: &[&Requirement]) -> Vec<CaseBlueprint> {
        let mut by_section: BTreeMap<(String, String), Vec<&Requirement>> = BTreeMap::new();
        for &req in requirements {
            let section = req
                .source
                .location
                .split('.')
                .next()
                .unwrap_or(&req.source.location)
                .to_string();
            by_section
                .entry((req.source.document_id.clone(), section))
                .or_default()
                .push(req);
        }

        by_section
            .into_iter()
            .map(|((document, section), group)| CaseBlueprint {
                key: format!("{document}/{section}"),
                title: format!("Verify section {section} of {document}"),
                payload: payload_for(&group),
                covers: group.iter().map(|r| r.id).collect(),
            })
            .collect()
    }
}
