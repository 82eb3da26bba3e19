use super::sequencer::{SequenceAction, SequenceState};
use crate::capability::CapabilityValidationError;
use crate::config::ConfigError;
use crate::shared::errors::ProjectStoreError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SequenceError {
    #[error("no sub-wizard is registered for step `{label}`")]
    MissingStepWizard { label: String },
    #[error("step `{label}` failed: {reason}")]
    StepFailed { label: String, reason: String },
    #[error("invalid wizard transition: state={state} action={action}")]
    InvalidTransition {
        state: SequenceState,
        action: SequenceAction,
    },
}

impl SequenceError {
    /// Everything except an invalid transition ends the sequence.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, SequenceError::InvalidTransition { .. })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    #[error("{0}")]
    Validation(CapabilityValidationError),
    #[error("unknown capability `{id}`")]
    UnknownCapability { id: String },
    #[error("{0}")]
    Sequence(SequenceError),
    #[error("project description update failed: {0}")]
    CollaboratorFailure(#[source] ProjectStoreError),
    #[error("{0}")]
    Config(String),
}

impl From<CapabilityValidationError> for WizardError {
    fn from(value: CapabilityValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<SequenceError> for WizardError {
    fn from(value: SequenceError) -> Self {
        Self::Sequence(value)
    }
}

impl From<ProjectStoreError> for WizardError {
    fn from(value: ProjectStoreError) -> Self {
        Self::CollaboratorFailure(value)
    }
}

impl From<ConfigError> for WizardError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value.to_string())
    }
}
