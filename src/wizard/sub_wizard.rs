use crate::planning::StepKind;
use crate::shared::ids::{CapabilityId, NatureId, ProjectName};

/// What a sub-wizard is told about the step it runs for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepContext {
    pub project: ProjectName,
    /// Capability ids the user ended up with, in selection order.
    pub selection: Vec<CapabilityId>,
    pub kind: StepKind,
    pub capability: CapabilityId,
    /// Natures this step adds or removes.
    pub nature_ids: Vec<NatureId>,
}

/// One capability's install or uninstall pages.
///
/// The sequencer calls `init` once before showing any page, asks `can_finish` before
/// `perform_finish`, and never calls `perform_finish` twice on the same instance. Project nature
/// changes are not made here; the owning wizard commits them once the whole sequence finishes.
pub trait StepWizard {
    fn init(&mut self, context: &StepContext);

    fn page_count(&self) -> usize;

    fn is_page_complete(&self, page: usize) -> bool;

    fn can_finish(&self) -> bool;

    fn perform_finish(&mut self) -> Result<(), String>;
}

/// Sub-wizard for capabilities that need nothing beyond the nature change itself.
#[derive(Debug, Default)]
pub struct NatureOnlyWizard {
    context: Option<StepContext>,
}

impl NatureOnlyWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn context(&self) -> Option<&StepContext> {
        self.context.as_ref()
    }
}

impl StepWizard for NatureOnlyWizard {
    fn init(&mut self, context: &StepContext) {
        self.context = Some(context.clone());
    }

    fn page_count(&self) -> usize {
        0
    }

    fn is_page_complete(&self, _page: usize) -> bool {
        true
    }

    fn can_finish(&self) -> bool {
        true
    }

    fn perform_finish(&mut self) -> Result<(), String> {
        Ok(())
    }
}
