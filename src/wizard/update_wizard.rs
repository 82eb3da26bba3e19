use super::error::WizardError;
use super::events::WizardEventLog;
use super::factory::WizardFactoryTable;
use super::owner::{drive, resolve_requested};
use super::sequencer::{MultiStepSequencer, SequenceAction, SequenceState, SequenceTransition};
use crate::capability::{Capability, CapabilityRegistry};
use crate::planning::{build_steps, ReviewPolicy, StepPlan};
use crate::project::{sort_nature_set, ProjectDescription, ProjectDescriptionStore};
use crate::shared::ids::{NatureId, ProjectName};

/// Changes an existing project's capabilities to a requested final set.
///
/// `prepare` loads the project, diffs its current natures against the request, validates the
/// resulting set and plans the steps. Driving the sequencer to `Finished` writes the new nature
/// list through the store in one call; cancel and abort write nothing.
pub struct UpdateCapabilityWizard<'a> {
    store: &'a mut dyn ProjectDescriptionStore,
    events: WizardEventLog,
    project: ProjectDescription,
    sequencer: MultiStepSequencer<'a>,
    net_natures: Vec<NatureId>,
    commit_attempted: bool,
    committed: bool,
}

impl<'a> UpdateCapabilityWizard<'a> {
    pub fn prepare<S>(
        registry: &'a CapabilityRegistry,
        factories: &'a WizardFactoryTable,
        store: &'a mut dyn ProjectDescriptionStore,
        project: &ProjectName,
        requested: &[S],
    ) -> Result<Self, WizardError>
    where
        S: AsRef<str>,
    {
        Self::prepare_with_events(
            registry,
            factories,
            store,
            project,
            requested,
            WizardEventLog::disabled(),
        )
    }

    pub fn prepare_with_events<S>(
        registry: &'a CapabilityRegistry,
        factories: &'a WizardFactoryTable,
        store: &'a mut dyn ProjectDescriptionStore,
        project: &ProjectName,
        requested: &[S],
        events: WizardEventLog,
    ) -> Result<Self, WizardError>
    where
        S: AsRef<str>,
    {
        let description = store.load(project)?;
        let desired = resolve_requested(registry, requested)?;
        registry.validate_capabilities(&desired)?;

        let current = registry
            .capabilities_for_natures(&description.natures)
            .into_iter()
            .filter_map(|lookup| lookup.found())
            .collect::<Vec<_>>();
        let remove = current
            .iter()
            .copied()
            .filter(|capability| !contains(&desired, capability))
            .collect::<Vec<_>>();
        let add = desired
            .iter()
            .copied()
            .filter(|capability| !contains(&current, capability))
            .collect::<Vec<_>>();

        let plan = build_steps(registry, &remove, &add, &description.natures);
        let net_natures = net_natures(registry, &description.natures, &remove, &add);
        events.info(
            "plan_built",
            &format!(
                "project={} remove={} install={}",
                description.name,
                plan.remove_steps().count(),
                plan.install_steps().count()
            ),
        );

        let selection = desired
            .iter()
            .map(|capability| capability.id.clone())
            .collect();
        let sequencer = MultiStepSequencer::new(
            plan,
            factories,
            description.name.clone(),
            ReviewPolicy::UpdateCapabilities,
        )
        .with_selection(selection);

        Ok(Self {
            store,
            events,
            project: description,
            sequencer,
            net_natures,
            commit_attempted: false,
            committed: false,
        })
    }

    pub fn project(&self) -> &ProjectDescription {
        &self.project
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

    /// Nature list written on success.
    pub fn net_natures(&self) -> &[NatureId] {
        &self.net_natures
    }

    pub fn is_committed(&self) -> bool {
        self.committed
    }

    pub fn start(&mut self) -> Result<SequenceTransition, WizardError> {
        self.handle(SequenceAction::Start)
    }

    /// A commit failure is returned as `CollaboratorFailure`; the sequence stays `Finished` and
    /// the commit is not retried.
    pub fn handle(&mut self, action: SequenceAction) -> Result<SequenceTransition, WizardError> {
        let (transition, finished_now) = drive(&mut self.sequencer, &self.events, action)?;
        if finished_now && !self.commit_attempted {
            self.commit()?;
        }
        Ok(transition)
    }

    fn commit(&mut self) -> Result<(), WizardError> {
        self.commit_attempted = true;
        match self
            .store
            .apply_natures(&self.project.name, &self.net_natures)
        {
            Ok(()) => {
                self.committed = true;
                self.project.natures = self.net_natures.clone();
                self.events.info(
                    "natures_committed",
                    &format!(
                        "project={} natures={}",
                        self.project.name,
                        join_natures(&self.net_natures)
                    ),
                );
                Ok(())
            }
            Err(err) => {
                self.events.error("commit_failed", &err.to_string());
                Err(WizardError::CollaboratorFailure(err))
            }
        }
    }
}

fn contains(set: &[&Capability], capability: &Capability) -> bool {
    set.iter().any(|member| member.id == capability.id)
}

/// Current natures minus every removed capability's nature, plus every added one, sorted.
fn net_natures(
    registry: &CapabilityRegistry,
    current: &[NatureId],
    remove: &[&Capability],
    add: &[&Capability],
) -> Vec<NatureId> {
    let mut natures = current
        .iter()
        .filter(|nature| !remove.iter().any(|capability| &capability.nature_id == *nature))
        .cloned()
        .collect::<Vec<_>>();
    for capability in add {
        if !natures.contains(&capability.nature_id) {
            natures.push(capability.nature_id.clone());
        }
    }
    sort_nature_set(registry, &natures)
}

pub(crate) fn join_natures(natures: &[NatureId]) -> String {
    natures
        .iter()
        .map(NatureId::as_str)
        .collect::<Vec<_>>()
        .join(",")
}
