use capsteps::capability::{Capability, CapabilityRegistry};
use capsteps::config::CatalogFile;
use capsteps::planning::{build_steps, ReviewPolicy, Step, StepKind};
use capsteps::shared::ids::NatureId;
use std::collections::BTreeSet;

fn registry() -> CapabilityRegistry {
    let catalog: CatalogFile = serde_yaml::from_str(
        r#"
capabilities:
  - id: a
    name: Alpha
    nature: n.a
  - id: b
    name: Beta
    nature: n.b
    handles: [a]
  - id: base
    name: Base
    nature: n.base
  - id: web
    name: Web
    nature: n.web
    prerequisites: [base]
  - id: notes
    name: Notes
    nature: n.notes
  - id: tool
    name: Tool
    nature: n.tool
    handles: [base]
"#,
    )
    .expect("parse catalog");
    CapabilityRegistry::new(catalog).expect("registry")
}

fn resolve<'r>(registry: &'r CapabilityRegistry, raw: &[&str]) -> Vec<&'r Capability> {
    raw.iter()
        .map(|id| registry.get(id).expect("known capability"))
        .collect()
}

fn natures(raw: &[&str]) -> Vec<NatureId> {
    raw.iter()
        .map(|nature| NatureId::parse(nature).expect("nature id"))
        .collect()
}

fn labels(steps: &[Step]) -> Vec<String> {
    steps.iter().map(Step::label).collect()
}

#[test]
fn step_planner_merges_handled_removals_into_one_step() {
    let registry = registry();
    let plan = build_steps(&registry, &resolve(&registry, &["a", "b"]), &[], &[]);

    assert_eq!(labels(plan.steps()), vec!["Remove Beta"]);
    let remove = plan.remove_steps().next().expect("remove step");
    assert_eq!(remove.nature_ids, natures(&["n.b", "n.a"]));
    assert!(plan.is_review_only(ReviewPolicy::UpdateCapabilities));
}

#[test]
fn step_planner_remove_steps_partition_the_requested_natures() {
    let registry = registry();
    let requested = ["notes", "a", "web", "b", "base"];
    let plan = build_steps(&registry, &resolve(&registry, &requested), &[], &[]);

    let mut seen = BTreeSet::new();
    let mut total = 0;
    for step in plan.remove_steps() {
        for nature in &step.nature_ids {
            seen.insert(nature.as_str().to_string());
            total += 1;
        }
    }
    assert_eq!(total, seen.len(), "a nature was removed twice");
    let expected = ["n.notes", "n.a", "n.web", "n.b", "n.base"]
        .iter()
        .map(|nature| nature.to_string())
        .collect::<BTreeSet<_>>();
    assert_eq!(seen, expected);
}

#[test]
fn step_planner_keeps_a_handled_prerequisite_until_its_dependents_are_removed() {
    let registry = registry();
    let plan = build_steps(
        &registry,
        &resolve(&registry, &["base", "web", "tool"]),
        &[],
        &[],
    );

    assert_eq!(
        labels(plan.steps()),
        vec!["Remove Tool", "Remove Web", "Remove Base"]
    );
    let removed = plan
        .remove_steps()
        .map(|step| step.nature_ids.clone())
        .collect::<Vec<_>>();
    assert_eq!(
        removed,
        vec![natures(&["n.tool"]), natures(&["n.web"]), natures(&["n.base"])]
    );

    let step_of = |nature: &str| {
        removed
            .iter()
            .position(|step| step.iter().any(|id| id.as_str() == nature))
            .expect("nature removed")
    };
    assert!(step_of("n.web") < step_of("n.base"));
}

#[test]
fn step_planner_merges_a_handled_prerequisite_once_no_dependent_remains() {
    let registry = registry();
    let plan = build_steps(&registry, &resolve(&registry, &["base", "tool"]), &[], &[]);

    assert_eq!(labels(plan.steps()), vec!["Remove Tool"]);
    let remove = plan.remove_steps().next().expect("remove step");
    assert_eq!(remove.nature_ids, natures(&["n.tool", "n.base"]));
}

#[test]
fn step_planner_removes_dependents_before_prerequisites() {
    let registry = registry();
    let plan = build_steps(&registry, &resolve(&registry, &["base", "web"]), &[], &[]);
    assert_eq!(labels(plan.steps()), vec!["Remove Web", "Remove Base"]);
    assert!(!plan.is_review_only(ReviewPolicy::UpdateCapabilities));
}

#[test]
fn step_planner_places_installs_after_removals_in_prerequisite_order() {
    let registry = registry();
    let plan = build_steps(
        &registry,
        &resolve(&registry, &["notes"]),
        &resolve(&registry, &["web", "base"]),
        &natures(&["n.notes"]),
    );

    assert_eq!(
        labels(plan.steps()),
        vec!["Remove Notes", "Install Base", "Install Web"]
    );
    assert!(plan.removals_precede_installs());
    let sequences = plan
        .install_steps()
        .map(|step| step.sequence)
        .collect::<Vec<_>>();
    assert_eq!(sequences, vec![1, 2]);
    assert_eq!(
        plan.steps().iter().map(Step::kind).collect::<Vec<_>>(),
        vec![StepKind::Remove, StepKind::Install, StepKind::Install]
    );
}

#[test]
fn step_planner_skips_installs_the_project_already_has() {
    let registry = registry();
    let plan = build_steps(
        &registry,
        &[],
        &resolve(&registry, &["base", "web"]),
        &natures(&["n.base"]),
    );
    assert_eq!(labels(plan.steps()), vec!["Install Web"]);
    assert_eq!(plan.install_steps().next().map(|step| step.sequence), Some(1));
}

#[test]
fn step_planner_keeps_ordered_installs_and_handles_empty_requests() {
    let registry = registry();
    let plan = build_steps(&registry, &[], &resolve(&registry, &["base", "web"]), &[]);
    assert_eq!(labels(plan.steps()), vec!["Install Base", "Install Web"]);

    let empty = build_steps(&registry, &[], &[], &[]);
    assert!(empty.is_empty());
    assert!(empty.removals_precede_installs());
}

#[test]
fn step_planner_install_of_handling_capability_absorbs_handled_one() {
    let registry = registry();
    let plan = build_steps(&registry, &[], &resolve(&registry, &["a", "b"]), &[]);
    assert_eq!(labels(plan.steps()), vec!["Install Beta"]);
    assert!(plan.is_review_only(ReviewPolicy::CreateProject));
    assert!(!plan.is_review_only(ReviewPolicy::UpdateCapabilities));
}
