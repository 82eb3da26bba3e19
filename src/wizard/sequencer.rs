use super::error::SequenceError;
use super::factory::WizardFactoryTable;
use super::sub_wizard::{StepContext, StepWizard};
use crate::planning::{ReviewPolicy, Step, StepPlan};
use crate::shared::ids::{CapabilityId, ProjectName};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceState {
    NotStarted,
    ReviewOnly,
    InStep { index: usize, page: usize },
    Finished,
    Canceled,
    Aborted,
}

impl SequenceState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            SequenceState::Finished | SequenceState::Canceled | SequenceState::Aborted
        )
    }

    fn as_str(self) -> &'static str {
        match self {
            SequenceState::NotStarted => "not_started",
            SequenceState::ReviewOnly => "review_only",
            SequenceState::InStep { .. } => "in_step",
            SequenceState::Finished => "finished",
            SequenceState::Canceled => "canceled",
            SequenceState::Aborted => "aborted",
        }
    }
}

impl std::fmt::Display for SequenceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SequenceState::InStep { index, page } => {
                write!(f, "{}(step={index}, page={page})", self.as_str())
            }
            other => f.write_str(other.as_str()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceAction {
    Start,
    Next,
    Back,
    Finish,
    Cancel,
}

impl SequenceAction {
    fn as_str(self) -> &'static str {
        match self {
            SequenceAction::Start => "start",
            SequenceAction::Next => "next",
            SequenceAction::Back => "back",
            SequenceAction::Finish => "finish",
            SequenceAction::Cancel => "cancel",
        }
    }
}

impl std::fmt::Display for SequenceAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequenceEffect {
    None,
    ShowReview,
    ShowPage { step: usize, page: usize },
    /// `step` finished and the next step's first page is showing.
    StepCompleted { step: usize },
    Finished,
    Canceled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceTransition {
    pub effect: SequenceEffect,
    pub feedback: Option<String>,
}

impl SequenceTransition {
    fn no_op(feedback: impl Into<String>) -> Self {
        Self {
            effect: SequenceEffect::None,
            feedback: Some(feedback.into()),
        }
    }

    fn effect(effect: SequenceEffect) -> Self {
        Self {
            effect,
            feedback: None,
        }
    }
}

/// Drives one sub-wizard per plan step, in plan order.
///
/// Each step is finished (and its sub-wizard's own side effects applied) before the next one is
/// built, so going back never crosses a step boundary. The sequencer never touches the project
/// description; owners read [`MultiStepSequencer::state`] and commit once it is `Finished`.
pub struct MultiStepSequencer<'f> {
    plan: StepPlan,
    factories: &'f WizardFactoryTable,
    project: ProjectName,
    selection: Vec<CapabilityId>,
    review_only: bool,
    state: SequenceState,
    current: Option<Box<dyn StepWizard>>,
    completed_steps: usize,
}

impl<'f> MultiStepSequencer<'f> {
    pub fn new(
        plan: StepPlan,
        factories: &'f WizardFactoryTable,
        project: ProjectName,
        policy: ReviewPolicy,
    ) -> Self {
        let review_only = plan.is_review_only(policy);
        Self {
            plan,
            factories,
            project,
            selection: Vec::new(),
            review_only,
            state: SequenceState::NotStarted,
            current: None,
            completed_steps: 0,
        }
    }

    pub fn with_selection(mut self, selection: Vec<CapabilityId>) -> Self {
        self.selection = selection;
        self
    }

    pub fn plan(&self) -> &StepPlan {
        &self.plan
    }

    pub fn state(&self) -> SequenceState {
        self.state
    }

    pub fn completed_steps(&self) -> usize {
        self.completed_steps
    }

    pub fn is_review_only(&self) -> bool {
        self.review_only
    }

    pub fn current_step(&self) -> Option<&Step> {
        match self.state {
            SequenceState::InStep { index, .. } => self.plan.steps().get(index),
            _ => None,
        }
    }

    pub fn start(&mut self) -> Result<SequenceTransition, SequenceError> {
        self.handle(SequenceAction::Start)
    }

    pub fn handle(&mut self, action: SequenceAction) -> Result<SequenceTransition, SequenceError> {
        match (self.state, action) {
            (
                state @ (SequenceState::Finished | SequenceState::Canceled | SequenceState::Aborted),
                action,
            ) => Err(SequenceError::InvalidTransition { state, action }),
            (_, SequenceAction::Cancel) => {
                self.current = None;
                self.state = SequenceState::Canceled;
                Ok(SequenceTransition::effect(SequenceEffect::Canceled))
            }
            (SequenceState::NotStarted, SequenceAction::Start) => self.begin(),
            (state, SequenceAction::Start) | (state @ SequenceState::NotStarted, _) => {
                Err(SequenceError::InvalidTransition { state, action })
            }
            (SequenceState::ReviewOnly, SequenceAction::Finish) => self.finish_from_review(),
            (SequenceState::ReviewOnly, SequenceAction::Next | SequenceAction::Back) => Ok(
                SequenceTransition::no_op("Nothing to page through; choose Finish to apply."),
            ),
            (SequenceState::InStep { index, page }, SequenceAction::Next) => {
                Ok(self.next_page(index, page))
            }
            (SequenceState::InStep { index, page }, SequenceAction::Back) => {
                Ok(self.previous_page(index, page))
            }
            (SequenceState::InStep { index, .. }, SequenceAction::Finish) => {
                self.finish_step(index)
            }
        }
    }

    fn begin(&mut self) -> Result<SequenceTransition, SequenceError> {
        if self.plan.is_empty() {
            self.state = SequenceState::Finished;
            return Ok(SequenceTransition {
                effect: SequenceEffect::Finished,
                feedback: Some("No capability changes to apply.".to_string()),
            });
        }
        if self.review_only {
            self.state = SequenceState::ReviewOnly;
            return Ok(SequenceTransition::effect(SequenceEffect::ShowReview));
        }
        self.open_step(0)?;
        Ok(SequenceTransition::effect(SequenceEffect::ShowPage {
            step: 0,
            page: 0,
        }))
    }

    fn next_page(&mut self, index: usize, page: usize) -> SequenceTransition {
        let label = self.step_label(index);
        let Some(wizard) = self.current.as_ref() else {
            return SequenceTransition::no_op(format!("`{label}` is not open."));
        };
        if page + 1 >= wizard.page_count() {
            return SequenceTransition::no_op(format!(
                "`{label}` has no further pages; choose Finish to apply it."
            ));
        }
        if !wizard.is_page_complete(page) {
            return SequenceTransition::no_op(format!(
                "Complete page {} of `{label}` before moving on.",
                page + 1
            ));
        }
        self.state = SequenceState::InStep {
            index,
            page: page + 1,
        };
        SequenceTransition::effect(SequenceEffect::ShowPage {
            step: index,
            page: page + 1,
        })
    }

    fn previous_page(&mut self, index: usize, page: usize) -> SequenceTransition {
        if page == 0 {
            let feedback = if index == 0 {
                "Already on the first page."
            } else {
                "Earlier steps are already applied and cannot be revisited."
            };
            return SequenceTransition::no_op(feedback);
        }
        self.state = SequenceState::InStep {
            index,
            page: page - 1,
        };
        SequenceTransition::effect(SequenceEffect::ShowPage {
            step: index,
            page: page - 1,
        })
    }

    fn finish_step(&mut self, index: usize) -> Result<SequenceTransition, SequenceError> {
        let Some(mut wizard) = self.current.take() else {
            return Err(SequenceError::InvalidTransition {
                state: self.state,
                action: SequenceAction::Finish,
            });
        };
        if !wizard.can_finish() {
            let label = self.step_label(index);
            self.current = Some(wizard);
            return Ok(SequenceTransition::no_op(format!(
                "`{label}` is not ready to finish."
            )));
        }
        self.run_finish(index, wizard.as_mut())?;

        if index + 1 == self.plan.len() {
            self.state = SequenceState::Finished;
            return Ok(SequenceTransition::effect(SequenceEffect::Finished));
        }
        self.open_step(index + 1)?;
        Ok(SequenceTransition::effect(SequenceEffect::StepCompleted {
            step: index,
        }))
    }

    /// Finishes every step without page navigation. A step that still needs input drops the
    /// sequence into that step's first page instead.
    fn finish_from_review(&mut self) -> Result<SequenceTransition, SequenceError> {
        for index in 0..self.plan.len() {
            let mut wizard = self.build_step_wizard(index)?;
            if !wizard.can_finish() {
                let label = self.step_label(index);
                self.current = Some(wizard);
                self.state = SequenceState::InStep { index, page: 0 };
                return Ok(SequenceTransition {
                    effect: SequenceEffect::ShowPage {
                        step: index,
                        page: 0,
                    },
                    feedback: Some(format!("`{label}` needs input before it can finish.")),
                });
            }
            self.run_finish(index, wizard.as_mut())?;
        }
        self.state = SequenceState::Finished;
        Ok(SequenceTransition::effect(SequenceEffect::Finished))
    }

    fn open_step(&mut self, index: usize) -> Result<(), SequenceError> {
        let wizard = self.build_step_wizard(index)?;
        self.current = Some(wizard);
        self.state = SequenceState::InStep { index, page: 0 };
        Ok(())
    }

    fn build_step_wizard(&mut self, index: usize) -> Result<Box<dyn StepWizard>, SequenceError> {
        let Some(step) = self.plan.steps().get(index) else {
            self.abort();
            return Err(SequenceError::MissingStepWizard {
                label: format!("step {}", index + 1),
            });
        };
        let Some(mut wizard) = step.build_wizard(self.factories) else {
            let label = step.label();
            self.abort();
            return Err(SequenceError::MissingStepWizard { label });
        };
        let context = StepContext {
            project: self.project.clone(),
            selection: self.selection.clone(),
            kind: step.kind(),
            capability: step.capability().id.clone(),
            nature_ids: step.nature_ids(),
        };
        wizard.init(&context);
        Ok(wizard)
    }

    fn run_finish(
        &mut self,
        index: usize,
        wizard: &mut dyn StepWizard,
    ) -> Result<(), SequenceError> {
        if let Err(reason) = wizard.perform_finish() {
            let label = self.step_label(index);
            self.abort();
            return Err(SequenceError::StepFailed { label, reason });
        }
        self.completed_steps += 1;
        Ok(())
    }

    fn abort(&mut self) {
        self.current = None;
        self.state = SequenceState::Aborted;
    }

    fn step_label(&self, index: usize) -> String {
        self.plan
            .steps()
            .get(index)
            .map(Step::label)
            .unwrap_or_else(|| format!("step {}", index + 1))
    }
}
