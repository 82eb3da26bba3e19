pub mod description;
pub mod natures;
pub mod store;

pub use description::ProjectDescription;
pub use natures::sort_nature_set;
pub use store::{
    FileProjectStore, InMemoryProjectStore, ProjectDescriptionStore,
    PROJECT_DESCRIPTION_FILE_NAME,
};
