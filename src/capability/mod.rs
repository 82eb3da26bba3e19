pub mod model;
pub mod registry;
pub mod selection;
pub mod validation;

pub use model::{Capability, Category, OTHER_CATEGORY_NAME};
pub use registry::{CapabilityLookup, CapabilityRegistry};
pub use selection::{CapabilitySelection, SelectionError};
pub use validation::{validate_capability_set, CapabilityValidationError};
