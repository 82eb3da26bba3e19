use super::step::{InstallStep, RemoveStep, Step, StepPlan};
use crate::capability::{Capability, CapabilityRegistry};
use crate::shared::ids::NatureId;
use std::collections::HashSet;

/// Orders the requested removals and installs into a [`StepPlan`].
///
/// The caller validates the resulting capability set before planning; nothing here rejects a
/// request. Removals come first, dependents before their prerequisites, and one removal step
/// absorbs every other requested removal whose UI it handles, unless a removal still pending
/// requires the handled capability. Installs follow the order returned
/// by [`CapabilityRegistry::prune_capabilities`]; capabilities whose nature the project already
/// carries are skipped.
pub fn build_steps(
    registry: &CapabilityRegistry,
    remove: &[&Capability],
    add: &[&Capability],
    project_natures: &[NatureId],
) -> StepPlan {
    let mut steps = build_remove_steps(registry, remove);
    steps.extend(build_install_steps(registry, add, project_natures));
    StepPlan::new(steps)
}

fn build_remove_steps(registry: &CapabilityRegistry, remove: &[&Capability]) -> Vec<Step> {
    let mut seen = HashSet::new();
    let unique = remove
        .iter()
        .copied()
        .filter(|capability| seen.insert(capability.id.as_str()))
        .collect::<Vec<_>>();
    let ordered = registry.sort_by_prerequisites(&unique);

    let mut consumed = vec![false; ordered.len()];
    let mut steps = Vec::new();
    for index in (0..ordered.len()).rev() {
        if consumed[index] {
            continue;
        }
        consumed[index] = true;
        let capability = ordered[index];

        let mut nature_ids = vec![capability.nature_id.clone()];
        for (other, handled) in ordered.iter().enumerate() {
            if consumed[other] || !capability.handles_ui_for(handled.id.as_str()) {
                continue;
            }
            // A handled removal that a pending removal still requires keeps its own later step.
            let still_required = ordered.iter().zip(&consumed).any(|(pending, done)| {
                !*done && registry.requires_transitively(pending, handled.id.as_str())
            });
            if !still_required {
                consumed[other] = true;
                nature_ids.push(handled.nature_id.clone());
            }
        }

        steps.push(Step::Remove(RemoveStep {
            capability: capability.clone(),
            nature_ids,
        }));
    }
    steps
}

fn build_install_steps(
    registry: &CapabilityRegistry,
    add: &[&Capability],
    project_natures: &[NatureId],
) -> Vec<Step> {
    let missing = add
        .iter()
        .copied()
        .filter(|capability| !project_natures.contains(&capability.nature_id))
        .collect::<Vec<_>>();

    registry
        .prune_capabilities(&missing)
        .into_iter()
        .enumerate()
        .map(|(index, capability)| {
            Step::Install(InstallStep {
                capability: capability.clone(),
                sequence: index + 1,
            })
        })
        .collect()
}
