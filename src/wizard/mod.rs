pub mod error;
pub mod events;
pub mod factory;
pub mod navigation;
pub mod new_project_wizard;
mod owner;
pub mod sequencer;
pub mod sub_wizard;
pub mod update_wizard;

pub use error::{SequenceError, WizardError};
pub use events::WizardEventLog;
pub use factory::{StepWizardFactory, WizardFactoryTable};
pub use navigation::{parse_scripted_actions, parse_scripted_keys, sequence_action_from_key};
pub use new_project_wizard::NewProjectWizard;
pub use sequencer::{
    MultiStepSequencer, SequenceAction, SequenceEffect, SequenceState, SequenceTransition,
};
pub use sub_wizard::{NatureOnlyWizard, StepContext, StepWizard};
pub use update_wizard::UpdateCapabilityWizard;
