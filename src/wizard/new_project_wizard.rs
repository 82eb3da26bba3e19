use super::error::WizardError;
use super::events::WizardEventLog;
use super::factory::WizardFactoryTable;
use super::owner::{drive, resolve_requested};
use super::sequencer::{MultiStepSequencer, SequenceAction, SequenceState, SequenceTransition};
use super::update_wizard::join_natures;
use crate::capability::CapabilityRegistry;
use crate::planning::{build_steps, ReviewPolicy, StepPlan};
use crate::project::{sort_nature_set, ProjectDescription, ProjectDescriptionStore};
use crate::shared::errors::ProjectStoreError;
use crate::shared::ids::ProjectName;

/// Creates a project carrying an initial capability set. Every step is an install; a single
/// step may be finished from the review.
pub struct NewProjectWizard<'a> {
    store: &'a mut dyn ProjectDescriptionStore,
    events: WizardEventLog,
    description: ProjectDescription,
    sequencer: MultiStepSequencer<'a>,
    commit_attempted: bool,
    committed: bool,
}

impl<'a> NewProjectWizard<'a> {
    pub fn prepare<S>(
        registry: &'a CapabilityRegistry,
        factories: &'a WizardFactoryTable,
        store: &'a mut dyn ProjectDescriptionStore,
        name: ProjectName,
        requested: &[S],
        events: WizardEventLog,
    ) -> Result<Self, WizardError>
    where
        S: AsRef<str>,
    {
        if store.exists(&name) {
            return Err(WizardError::CollaboratorFailure(
                ProjectStoreError::ProjectExists {
                    name: name.to_string(),
                },
            ));
        }
        let selected = resolve_requested(registry, requested)?;
        registry.validate_capabilities(&selected)?;

        let plan = build_steps(registry, &[], &selected, &[]);
        let natures = selected
            .iter()
            .map(|capability| capability.nature_id.clone())
            .collect::<Vec<_>>();
        let description = ProjectDescription {
            name: name.clone(),
            natures: sort_nature_set(registry, &natures),
        };
        events.info(
            "plan_built",
            &format!(
                "project={} remove=0 install={}",
                name,
                plan.install_steps().count()
            ),
        );

        let selection = selected
            .iter()
            .map(|capability| capability.id.clone())
            .collect();
        let sequencer = MultiStepSequencer::new(plan, factories, name, ReviewPolicy::CreateProject)
            .with_selection(selection);

        Ok(Self {
            store,
            events,
            description,
            sequencer,
            commit_attempted: false,
            committed: false,
        })
    }

    /// The description created on success.
    pub fn description(&self) -> &ProjectDescription {
        &self.description
    }

    pub fn plan(&self) -> &StepPlan {
        self.sequencer.plan()
    }

    pub fn sequencer(&self) -> &MultiStepSequencer<'a> {
        &self.sequencer
    }

    pub fn state(&self) -> SequenceState {
        self.sequencer.state()
    }

    pub fn is_committed(&self) -> bool {
        self.committed
    }

    pub fn start(&mut self) -> Result<SequenceTransition, WizardError> {
        self.handle(SequenceAction::Start)
    }

    pub fn handle(&mut self, action: SequenceAction) -> Result<SequenceTransition, WizardError> {
        let (transition, finished_now) = drive(&mut self.sequencer, &self.events, action)?;
        if finished_now && !self.commit_attempted {
            self.commit_attempted = true;
            if let Err(err) = self.store.create(&self.description) {
                self.events.error("commit_failed", &err.to_string());
                return Err(WizardError::CollaboratorFailure(err));
            }
            self.committed = true;
            self.events.info(
                "natures_committed",
                &format!(
                    "project={} natures={}",
                    self.description.name,
                    join_natures(&self.description.natures)
                ),
            );
        }
        Ok(transition)
    }
}
