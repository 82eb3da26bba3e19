use crate::app::command_support::{
    event_log, load_registry, load_settings, parse_id_csv, project_store, run_wizard, split_flags,
};
use crate::capability::{CapabilityLookup, CapabilitySelection};
use crate::planning::Step;
use crate::project::ProjectDescriptionStore;
use crate::shared::ids::ProjectName;
use crate::wizard::{NewProjectWizard, UpdateCapabilityWizard, WizardFactoryTable};

pub fn cmd_project(args: &[String]) -> Result<String, String> {
    match args.first().map(String::as_str) {
        Some("list") => cmd_project_list(),
        Some("show") => {
            let Some(name) = args.get(1) else {
                return Err("usage: project show <name>".to_string());
            };
            cmd_project_show(name)
        }
        Some("create") => cmd_project_create(&args[1..]),
        _ => Err("usage: project list|show <name>|create <name> [--with ids] [--keys k]".to_string()),
    }
}

fn parse_project_name(raw: &str) -> Result<ProjectName, String> {
    ProjectName::parse(raw).map_err(|err| format!("invalid project name `{raw}`: {err}"))
}

fn cmd_project_list() -> Result<String, String> {
    let settings = load_settings()?;
    let names = project_store(&settings)
        .list()
        .map_err(|err| err.to_string())?;
    if names.is_empty() {
        return Ok("no projects".to_string());
    }
    Ok(names
        .iter()
        .map(ProjectName::to_string)
        .collect::<Vec<_>>()
        .join("\n"))
}

fn cmd_project_show(raw_name: &str) -> Result<String, String> {
    let name = parse_project_name(raw_name)?;
    let settings = load_settings()?;
    let registry = load_registry(&settings)?;
    let description = project_store(&settings)
        .load(&name)
        .map_err(|err| err.to_string())?;

    let capabilities = registry
        .capabilities_for_natures(&description.natures)
        .into_iter()
        .map(|lookup| match lookup {
            CapabilityLookup::Found(capability) => capability.id.to_string(),
            CapabilityLookup::Missing(_) => lookup.to_string(),
        })
        .collect::<Vec<_>>();
    Ok(format!(
        "project={}\nnatures={}\ncapabilities={}",
        description.name,
        description
            .natures
            .iter()
            .map(|nature| nature.as_str())
            .collect::<Vec<_>>()
            .join(","),
        capabilities.join(",")
    ))
}

fn cmd_project_create(args: &[String]) -> Result<String, String> {
    let (positionals, flags) = split_flags(args, &["with", "keys"])?;
    let [raw_name] = positionals.as_slice() else {
        return Err("usage: project create <name> [--with ids] [--keys k]".to_string());
    };
    let name = parse_project_name(raw_name)?;
    let requested = flags
        .get("with")
        .map(|raw| parse_id_csv(raw))
        .unwrap_or_default();

    let settings = load_settings()?;
    let registry = load_registry(&settings)?;
    let mut selection = CapabilitySelection::new(&registry);
    let mut lines = Vec::new();
    for id in &requested {
        let auto_checked = selection.check(id).map_err(|err| err.to_string())?;
        for prerequisite in auto_checked {
            lines.push(format!("selected prerequisite `{prerequisite}` for `{id}`"));
        }
    }
    if let Some(blocking) = selection.status() {
        return Err(blocking);
    }
    let selected = selection.selected().to_vec();

    let factories = WizardFactoryTable::with_builtin_wizards(&registry);
    let mut store = project_store(&settings);
    let mut wizard = NewProjectWizard::prepare(
        &registry,
        &factories,
        &mut store,
        name,
        &selected,
        event_log(&settings),
    )
    .map_err(|err| err.to_string())?;

    lines.extend(plan_lines(wizard.plan().steps()));
    lines.extend(run_wizard(&mut wizard, flags.get("keys").map(String::as_str))?);
    if wizard.is_committed() {
        lines.push(format!("created project `{}`", wizard.description().name));
    }
    Ok(lines.join("\n"))
}

pub fn cmd_plan(args: &[String]) -> Result<String, String> {
    let [raw_name, raw_ids] = args else {
        return Err("usage: plan <name> <ids>".to_string());
    };
    let name = parse_project_name(raw_name)?;
    let requested = parse_id_csv(raw_ids);

    let settings = load_settings()?;
    let registry = load_registry(&settings)?;
    let factories = WizardFactoryTable::with_builtin_wizards(&registry);
    let mut store = project_store(&settings);
    let wizard =
        UpdateCapabilityWizard::prepare(&registry, &factories, &mut store, &name, &requested)
            .map_err(|err| err.to_string())?;

    if wizard.plan().is_empty() {
        return Ok("no changes".to_string());
    }
    let mut lines = plan_lines(wizard.plan().steps());
    lines.push(format!(
        "natures after apply={}",
        wizard
            .net_natures()
            .iter()
            .map(|nature| nature.as_str())
            .collect::<Vec<_>>()
            .join(",")
    ));
    Ok(lines.join("\n"))
}

pub fn cmd_apply(args: &[String]) -> Result<String, String> {
    let (positionals, flags) = split_flags(args, &["keys"])?;
    let [raw_name, raw_ids] = positionals.as_slice() else {
        return Err("usage: apply <name> <ids> [--keys k]".to_string());
    };
    let name = parse_project_name(raw_name)?;
    let requested = parse_id_csv(raw_ids);

    let settings = load_settings()?;
    let registry = load_registry(&settings)?;
    let factories = WizardFactoryTable::with_builtin_wizards(&registry);
    let mut store = project_store(&settings);
    let mut wizard = UpdateCapabilityWizard::prepare_with_events(
        &registry,
        &factories,
        &mut store,
        &name,
        &requested,
        event_log(&settings),
    )
    .map_err(|err| err.to_string())?;

    let mut lines = plan_lines(wizard.plan().steps());
    lines.extend(run_wizard(&mut wizard, flags.get("keys").map(String::as_str))?);
    if wizard.is_committed() {
        lines.push(format!(
            "natures={}",
            wizard
                .net_natures()
                .iter()
                .map(|nature| nature.as_str())
                .collect::<Vec<_>>()
                .join(",")
        ));
    }
    Ok(lines.join("\n"))
}

fn plan_lines(steps: &[Step]) -> Vec<String> {
    steps
        .iter()
        .enumerate()
        .map(|(index, step)| format!("{}. {}: {}", index + 1, step.label(), step.details()))
        .collect()
}
