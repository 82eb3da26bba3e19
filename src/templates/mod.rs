pub mod starter_catalog;

pub use starter_catalog::{starter_catalog, StarterCatalog};
