use crate::shared::logging::append_event_log;
use std::path::PathBuf;

/// Optional JSON-lines sink shared by the wizard owners.
#[derive(Debug, Clone, Default)]
pub struct WizardEventLog {
    path: Option<PathBuf>,
}

impl WizardEventLog {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn info(&self, event: &str, message: &str) {
        self.append("info", event, message);
    }

    pub fn error(&self, event: &str, message: &str) {
        self.append("error", event, message);
    }

    fn append(&self, level: &str, event: &str, message: &str) {
        if let Some(path) = &self.path {
            append_event_log(path, level, event, message);
        }
    }
}
