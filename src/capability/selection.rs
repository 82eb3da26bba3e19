use super::{Capability, CapabilityRegistry, CapabilityValidationError};
use crate::shared::ids::{CapabilityId, NatureId};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("unknown capability `{id}`")]
    UnknownCapability { id: String },
    #[error("capability `{capability}` is required by `{dependent}` and cannot be deselected")]
    RequiredBy {
        capability: CapabilityId,
        dependent: CapabilityId,
    },
}

/// Page-level capability selection. Checking pulls in prerequisites; every change can be
/// re-validated through [`CapabilitySelection::status`].
#[derive(Debug, Clone)]
pub struct CapabilitySelection<'r> {
    registry: &'r CapabilityRegistry,
    selected: Vec<CapabilityId>,
}

impl<'r> CapabilitySelection<'r> {
    pub fn new(registry: &'r CapabilityRegistry) -> Self {
        Self {
            registry,
            selected: Vec::new(),
        }
    }

    /// Seeds the selection from a project's natures; natures without a capability are skipped.
    pub fn from_natures(registry: &'r CapabilityRegistry, natures: &[NatureId]) -> Self {
        let selected = natures
            .iter()
            .filter_map(|nature| registry.capability_for_nature(nature.as_str()))
            .map(|capability| capability.id.clone())
            .collect();
        Self { registry, selected }
    }

    pub fn selected(&self) -> &[CapabilityId] {
        &self.selected
    }

    pub fn selected_capabilities(&self) -> Vec<&'r Capability> {
        let registry = self.registry;
        self.selected
            .iter()
            .filter_map(|id| registry.get(id.as_str()))
            .collect()
    }

    pub fn is_checked(&self, id: &str) -> bool {
        self.selected.iter().any(|selected| selected.as_str() == id)
    }

    /// Checks `id` and any unchecked prerequisites (transitively). Returns the capabilities that
    /// were checked on the caller's behalf, prerequisites first.
    pub fn check(&mut self, id: &str) -> Result<Vec<CapabilityId>, SelectionError> {
        let registry = self.registry;
        let capability = registry
            .get(id)
            .ok_or_else(|| SelectionError::UnknownCapability { id: id.to_string() })?;
        if self.is_checked(id) {
            return Ok(Vec::new());
        }

        let mut order = Vec::new();
        self.collect_unchecked_prerequisites(capability, &mut order);
        let auto_checked = order.clone();
        self.selected.extend(order);
        self.selected.push(capability.id.clone());
        Ok(auto_checked)
    }

    fn collect_unchecked_prerequisites(&self, capability: &Capability, order: &mut Vec<CapabilityId>) {
        for prerequisite in &capability.prerequisites {
            if self.is_checked(prerequisite.as_str()) || order.contains(prerequisite) {
                continue;
            }
            if let Some(required) = self.registry.get(prerequisite.as_str()) {
                self.collect_unchecked_prerequisites(required, order);
            }
            if !order.contains(prerequisite) {
                order.push(prerequisite.clone());
            }
        }
    }

    pub fn uncheck(&mut self, id: &str) -> Result<(), SelectionError> {
        let registry = self.registry;
        let capability = registry
            .get(id)
            .ok_or_else(|| SelectionError::UnknownCapability { id: id.to_string() })?;
        let selected = self.selected_capabilities();
        if let Some(dependent) = registry.dependents_of(id, &selected).first() {
            return Err(SelectionError::RequiredBy {
                capability: capability.id.clone(),
                dependent: dependent.id.clone(),
            });
        }
        self.selected.retain(|selected| selected.as_str() != id);
        Ok(())
    }

    pub fn validate(&self) -> Result<(), CapabilityValidationError> {
        self.registry
            .validate_capabilities(&self.selected_capabilities())
    }

    /// Blocking message for the current selection, if any.
    pub fn status(&self) -> Option<String> {
        self.validate().err().map(|err| err.to_string())
    }
}
