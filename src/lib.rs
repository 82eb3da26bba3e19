pub mod app;
pub mod capability;
pub mod config;
pub mod path_variables;
pub mod planning;
pub mod project;
pub mod shared;
pub mod templates;
pub mod wizard;
