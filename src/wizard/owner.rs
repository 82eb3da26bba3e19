use super::error::WizardError;
use super::events::WizardEventLog;
use super::sequencer::{MultiStepSequencer, SequenceAction, SequenceState, SequenceTransition};
use crate::capability::{Capability, CapabilityRegistry};

/// Resolves requested ids in order, dropping repeats. The first unknown id fails the request.
pub(crate) fn resolve_requested<'r, S>(
    registry: &'r CapabilityRegistry,
    requested: &[S],
) -> Result<Vec<&'r Capability>, WizardError>
where
    S: AsRef<str>,
{
    let mut resolved: Vec<&'r Capability> = Vec::new();
    for raw in requested {
        let raw = raw.as_ref().trim();
        let Some(capability) = registry.get(raw) else {
            return Err(WizardError::UnknownCapability { id: raw.to_string() });
        };
        if !resolved.iter().any(|seen| seen.id == capability.id) {
            resolved.push(capability);
        }
    }
    Ok(resolved)
}

/// Forwards one action to the sequencer and logs what changed. Returns whether the sequence
/// reached `Finished` on this action.
pub(crate) fn drive(
    sequencer: &mut MultiStepSequencer<'_>,
    events: &WizardEventLog,
    action: SequenceAction,
) -> Result<(SequenceTransition, bool), WizardError> {
    let was_finished = sequencer.state() == SequenceState::Finished;
    let completed_before = sequencer.completed_steps();
    let result = sequencer.handle(action);

    for index in completed_before..sequencer.completed_steps() {
        if let Some(step) = sequencer.plan().steps().get(index) {
            events.info("step_completed", &step.label());
        }
    }

    match result {
        Ok(transition) => {
            if sequencer.state() == SequenceState::Canceled {
                events.info(
                    "sequence_canceled",
                    &format!("canceled after {} step(s)", sequencer.completed_steps()),
                );
            }
            let finished_now = !was_finished && sequencer.state() == SequenceState::Finished;
            Ok((transition, finished_now))
        }
        Err(err) => {
            if err.is_fatal() {
                events.error("sequence_aborted", &err.to_string());
            }
            Err(err.into())
        }
    }
}
