use crate::capability::Capability;
use crate::shared::ids::NatureId;
use crate::wizard::{StepWizard, WizardFactoryTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    Install,
    Remove,
}

impl std::fmt::Display for StepKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StepKind::Install => write!(f, "install"),
            StepKind::Remove => write!(f, "remove"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallStep {
    pub capability: Capability,
    /// 1-based position among the install steps of a plan.
    pub sequence: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveStep {
    pub capability: Capability,
    /// The capability's own nature followed by the natures of the requested removals it handles.
    pub nature_ids: Vec<NatureId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Install(InstallStep),
    Remove(RemoveStep),
}

impl Step {
    pub fn kind(&self) -> StepKind {
        match self {
            Step::Install(_) => StepKind::Install,
            Step::Remove(_) => StepKind::Remove,
        }
    }

    pub fn capability(&self) -> &Capability {
        match self {
            Step::Install(step) => &step.capability,
            Step::Remove(step) => &step.capability,
        }
    }

    pub fn nature_ids(&self) -> Vec<NatureId> {
        match self {
            Step::Install(step) => vec![step.capability.nature_id.clone()],
            Step::Remove(step) => step.nature_ids.clone(),
        }
    }

    pub fn label(&self) -> String {
        match self {
            Step::Install(step) => format!("Install {}", step.capability.name),
            Step::Remove(step) => format!("Remove {}", step.capability.name),
        }
    }

    pub fn details(&self) -> String {
        match self {
            Step::Install(step) => match &step.capability.description {
                Some(description) => format!(
                    "Adds nature `{}`. {description}",
                    step.capability.nature_id
                ),
                None => format!("Adds nature `{}`.", step.capability.nature_id),
            },
            Step::Remove(step) => format!(
                "Removes natures: {}.",
                step.nature_ids
                    .iter()
                    .map(|nature| format!("`{nature}`"))
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        }
    }

    /// Builds this step's sub-wizard from the factory table; `None` when nothing is registered.
    pub fn build_wizard(&self, factories: &WizardFactoryTable) -> Option<Box<dyn StepWizard>> {
        let capability = self.capability().id.as_str();
        match self {
            Step::Install(_) => factories.build_install(capability),
            Step::Remove(_) => factories.build_uninstall(capability),
        }
    }
}

/// Which plans may be finished straight from the review state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewPolicy {
    /// Exactly one remove step and no install steps.
    UpdateCapabilities,
    /// Exactly one step of any kind.
    CreateProject,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepPlan {
    steps: Vec<Step>,
}

impl StepPlan {
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn remove_steps(&self) -> impl Iterator<Item = &RemoveStep> {
        self.steps.iter().filter_map(|step| match step {
            Step::Remove(step) => Some(step),
            Step::Install(_) => None,
        })
    }

    pub fn install_steps(&self) -> impl Iterator<Item = &InstallStep> {
        self.steps.iter().filter_map(|step| match step {
            Step::Install(step) => Some(step),
            Step::Remove(_) => None,
        })
    }

    pub fn is_review_only(&self, policy: ReviewPolicy) -> bool {
        match policy {
            ReviewPolicy::UpdateCapabilities => {
                self.remove_steps().count() == 1 && self.install_steps().next().is_none()
            }
            ReviewPolicy::CreateProject => self.steps.len() == 1,
        }
    }

    /// Every remove step precedes every install step.
    pub fn removals_precede_installs(&self) -> bool {
        let first_install = self
            .steps
            .iter()
            .position(|step| step.kind() == StepKind::Install)
            .unwrap_or(self.steps.len());
        self.steps[first_install..]
            .iter()
            .all(|step| step.kind() == StepKind::Install)
    }
}
