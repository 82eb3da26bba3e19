use crate::capability::CapabilityRegistry;
use crate::config::{
    default_global_config_path, load_capability_registry, load_global_settings, ConfigError,
    Settings,
};
use crate::planning::StepPlan;
use crate::project::FileProjectStore;
use crate::wizard::{
    parse_scripted_actions, NewProjectWizard, SequenceAction, SequenceEffect, SequenceState,
    SequenceTransition, UpdateCapabilityWizard, WizardError, WizardEventLog,
};
use std::collections::BTreeMap;

pub fn map_config_err(err: ConfigError) -> String {
    err.to_string()
}

pub fn load_settings() -> Result<Settings, String> {
    let path = default_global_config_path().map_err(map_config_err)?;
    if !path.is_file() {
        return Err(format!(
            "settings file {} is missing; run `capsteps init` first",
            path.display()
        ));
    }
    load_global_settings().map_err(map_config_err)
}

pub fn load_registry(settings: &Settings) -> Result<CapabilityRegistry, String> {
    load_capability_registry(settings).map_err(map_config_err)
}

pub fn project_store(settings: &Settings) -> FileProjectStore {
    FileProjectStore::new(settings.projects_path.clone())
}

pub fn event_log(settings: &Settings) -> WizardEventLog {
    WizardEventLog::new(settings.event_log.clone())
}

/// Comma-separated ids; blanks are skipped so `""` means the empty set.
pub fn parse_id_csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

/// Splits `--flag value` pairs from positional arguments. Only flags in `known` are accepted.
pub fn split_flags(
    args: &[String],
    known: &[&str],
) -> Result<(Vec<String>, BTreeMap<String, String>), String> {
    let mut positionals = Vec::new();
    let mut flags = BTreeMap::new();
    let mut index = 0;
    while index < args.len() {
        let arg = &args[index];
        if let Some(name) = arg.strip_prefix("--") {
            if !known.contains(&name) {
                return Err(format!("unknown option `{arg}`"));
            }
            let Some(value) = args.get(index + 1) else {
                return Err(format!("option `{arg}` requires a value"));
            };
            flags.insert(name.to_string(), value.clone());
            index += 2;
            continue;
        }
        positionals.push(arg.clone());
        index += 1;
    }
    Ok((positionals, flags))
}

pub(crate) trait ScriptedWizard {
    fn handle(&mut self, action: SequenceAction) -> Result<SequenceTransition, WizardError>;

    fn state(&self) -> SequenceState;

    fn plan(&self) -> &StepPlan;
}

impl ScriptedWizard for UpdateCapabilityWizard<'_> {
    fn handle(&mut self, action: SequenceAction) -> Result<SequenceTransition, WizardError> {
        UpdateCapabilityWizard::handle(self, action)
    }

    fn state(&self) -> SequenceState {
        UpdateCapabilityWizard::state(self)
    }

    fn plan(&self) -> &StepPlan {
        UpdateCapabilityWizard::plan(self)
    }
}

impl ScriptedWizard for NewProjectWizard<'_> {
    fn handle(&mut self, action: SequenceAction) -> Result<SequenceTransition, WizardError> {
        NewProjectWizard::handle(self, action)
    }

    fn state(&self) -> SequenceState {
        NewProjectWizard::state(self)
    }

    fn plan(&self) -> &StepPlan {
        NewProjectWizard::plan(self)
    }
}

/// Starts the wizard and feeds it `keys`. Without keys every step is finished in turn.
pub(crate) fn run_wizard(
    wizard: &mut dyn ScriptedWizard,
    keys: Option<&str>,
) -> Result<Vec<String>, String> {
    let actions = keys.map(parse_scripted_actions).transpose()?;
    let mut lines = Vec::new();
    let transition = wizard
        .handle(SequenceAction::Start)
        .map_err(|err| err.to_string())?;
    describe_transition(wizard.plan(), &transition, &mut lines);

    match actions {
        Some(actions) => {
            for action in actions {
                if wizard.state().is_terminal() {
                    break;
                }
                let transition = wizard.handle(action).map_err(|err| err.to_string())?;
                describe_transition(wizard.plan(), &transition, &mut lines);
            }
            if !wizard.state().is_terminal() {
                return Err(format!(
                    "wizard stopped at {}; include enter or esc in --keys",
                    wizard.state()
                ));
            }
        }
        None => {
            while !wizard.state().is_terminal() {
                let transition = wizard
                    .handle(SequenceAction::Finish)
                    .map_err(|err| err.to_string())?;
                if transition.effect == SequenceEffect::None {
                    return Err(format!(
                        "wizard needs input at {}; pass --keys to drive it",
                        wizard.state()
                    ));
                }
                describe_transition(wizard.plan(), &transition, &mut lines);
            }
        }
    }
    lines.push(format!("state={}", wizard.state()));
    Ok(lines)
}

fn describe_transition(plan: &StepPlan, transition: &SequenceTransition, lines: &mut Vec<String>) {
    let label = |index: usize| {
        plan.steps()
            .get(index)
            .map(|step| step.label())
            .unwrap_or_default()
    };
    match &transition.effect {
        SequenceEffect::None => {}
        SequenceEffect::ShowReview => lines.push(format!(
            "review: {} step(s) ready to finish",
            plan.len()
        )),
        SequenceEffect::ShowPage { step, page } => {
            lines.push(format!("step {}: {} (page {})", step + 1, label(*step), page + 1))
        }
        SequenceEffect::StepCompleted { step } => {
            lines.push(format!("completed: {}", label(*step)))
        }
        SequenceEffect::Finished => lines.push("finished".to_string()),
        SequenceEffect::Canceled => lines.push("canceled".to_string()),
    }
    if let Some(feedback) = &transition.feedback {
        lines.push(format!("note: {feedback}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn split_flags_separates_known_options() {
        let (positionals, flags) =
            split_flags(&args(&["create", "demo", "--with", "java,web"]), &["with", "keys"])
                .expect("split flags");
        assert_eq!(positionals, args(&["create", "demo"]));
        assert_eq!(flags.get("with").map(String::as_str), Some("java,web"));

        let err = split_flags(&args(&["--force"]), &["keys"]).expect_err("unknown flag");
        assert_eq!(err, "unknown option `--force`");
        let err = split_flags(&args(&["--keys"]), &["keys"]).expect_err("missing value");
        assert_eq!(err, "option `--keys` requires a value");
    }

    #[test]
    fn parse_id_csv_skips_blanks() {
        assert_eq!(parse_id_csv(" java, ,web,"), args(&["java", "web"]));
        assert!(parse_id_csv("").is_empty());
    }
}
