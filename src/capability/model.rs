use crate::config::{CapabilityConfig, CategoryConfig, WizardSource};
use crate::shared::ids::{CapabilityId, CategoryId, MembershipSetId, NatureId};

/// Display name for capabilities that declare no category.
pub const OTHER_CATEGORY_NAME: &str = "Other";

/// One installable project feature, backed by exactly one nature id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capability {
    pub id: CapabilityId,
    pub name: String,
    pub nature_id: NatureId,
    pub category: Option<CategoryId>,
    pub description: Option<String>,
    pub prerequisites: Vec<CapabilityId>,
    pub membership_sets: Vec<MembershipSetId>,
    /// Other capabilities whose install/removal UI this capability presents.
    pub handles: Vec<CapabilityId>,
    pub install_wizard: Option<WizardSource>,
    pub uninstall_wizard: Option<WizardSource>,
}

impl Capability {
    pub fn requires(&self, id: &str) -> bool {
        self.prerequisites.iter().any(|candidate| candidate.as_str() == id)
    }

    pub fn handles_ui_for(&self, id: &str) -> bool {
        self.handles.iter().any(|candidate| candidate.as_str() == id)
    }
}

impl From<CapabilityConfig> for Capability {
    fn from(value: CapabilityConfig) -> Self {
        Self {
            id: value.id,
            name: value.name.trim().to_string(),
            nature_id: value.nature,
            category: value.category,
            description: value
                .description
                .map(|text| text.trim().to_string())
                .filter(|text| !text.is_empty()),
            prerequisites: value.prerequisites,
            membership_sets: value.membership_sets,
            handles: value.handles,
            install_wizard: value.install_wizard,
            uninstall_wizard: value.uninstall_wizard,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

impl From<CategoryConfig> for Category {
    fn from(value: CategoryConfig) -> Self {
        Self {
            id: value.id,
            name: value.name.trim().to_string(),
        }
    }
}
