use super::sub_wizard::{NatureOnlyWizard, StepWizard};
use crate::capability::CapabilityRegistry;
use crate::config::WizardSource;
use crate::shared::ids::CapabilityId;
use std::collections::BTreeMap;

pub type StepWizardFactory = Box<dyn Fn() -> Box<dyn StepWizard>>;

/// Capability id to sub-wizard constructors, filled once at startup.
#[derive(Default)]
pub struct WizardFactoryTable {
    install: BTreeMap<CapabilityId, StepWizardFactory>,
    uninstall: BTreeMap<CapabilityId, StepWizardFactory>,
}

impl std::fmt::Debug for WizardFactoryTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WizardFactoryTable")
            .field("install", &self.install.keys().collect::<Vec<_>>())
            .field("uninstall", &self.uninstall.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl WizardFactoryTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers [`NatureOnlyWizard`] for every catalogue entry that asks for the builtin one.
    /// Entries marked `host` are left for the embedding application to register.
    pub fn with_builtin_wizards(registry: &CapabilityRegistry) -> Self {
        let mut table = Self::new();
        for capability in registry.capabilities() {
            if capability.install_wizard == Some(WizardSource::Builtin) {
                table.register_install(capability.id.clone(), nature_only);
            }
            if capability.uninstall_wizard == Some(WizardSource::Builtin) {
                table.register_uninstall(capability.id.clone(), nature_only);
            }
        }
        table
    }

    pub fn register_install<F>(&mut self, capability: CapabilityId, factory: F)
    where
        F: Fn() -> Box<dyn StepWizard> + 'static,
    {
        self.install.insert(capability, Box::new(factory));
    }

    pub fn register_uninstall<F>(&mut self, capability: CapabilityId, factory: F)
    where
        F: Fn() -> Box<dyn StepWizard> + 'static,
    {
        self.uninstall.insert(capability, Box::new(factory));
    }

    pub fn has_install(&self, capability: &str) -> bool {
        self.install.contains_key(capability)
    }

    pub fn has_uninstall(&self, capability: &str) -> bool {
        self.uninstall.contains_key(capability)
    }

    pub fn build_install(&self, capability: &str) -> Option<Box<dyn StepWizard>> {
        self.install.get(capability).map(|factory| factory())
    }

    pub fn build_uninstall(&self, capability: &str) -> Option<Box<dyn StepWizard>> {
        self.uninstall.get(capability).map(|factory| factory())
    }
}

fn nature_only() -> Box<dyn StepWizard> {
    Box::new(NatureOnlyWizard::new())
}
