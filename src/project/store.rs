use super::ProjectDescription;
use crate::shared::errors::ProjectStoreError;
use crate::shared::fs_atomic::atomic_write_file;
use crate::shared::ids::{NatureId, ProjectName};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

pub const PROJECT_DESCRIPTION_FILE_NAME: &str = "project.yaml";

/// The workspace-side owner of project descriptions. Wizards read snapshots through it and
/// write the final nature list back in a single call.
pub trait ProjectDescriptionStore {
    fn exists(&self, name: &ProjectName) -> bool;

    fn load(&self, name: &ProjectName) -> Result<ProjectDescription, ProjectStoreError>;

    fn create(&mut self, description: &ProjectDescription) -> Result<(), ProjectStoreError>;

    fn apply_natures(
        &mut self,
        name: &ProjectName,
        natures: &[NatureId],
    ) -> Result<(), ProjectStoreError>;
}

/// One `project.yaml` per project directory under `root`.
#[derive(Debug, Clone)]
pub struct FileProjectStore {
    root: PathBuf,
}

impl FileProjectStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn description_path(&self, name: &ProjectName) -> PathBuf {
        self.root
            .join(name.as_str())
            .join(PROJECT_DESCRIPTION_FILE_NAME)
    }

    pub fn list(&self) -> Result<Vec<ProjectName>, ProjectStoreError> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }
        let entries = fs::read_dir(&self.root).map_err(|source| ProjectStoreError::Read {
            path: self.root.display().to_string(),
            source,
        })?;
        let mut names = Vec::new();
        for entry in entries.flatten() {
            let Some(raw) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            let Ok(name) = ProjectName::parse(&raw) else {
                continue;
            };
            if self.description_path(&name).is_file() {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }

    fn write(&self, description: &ProjectDescription) -> Result<(), ProjectStoreError> {
        let path = self.description_path(&description.name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ProjectStoreError::CreateDir {
                path: parent.display().to_string(),
                source,
            })?;
        }
        let body = serde_yaml::to_string(description).map_err(|source| {
            ProjectStoreError::Encode {
                path: path.display().to_string(),
                source,
            }
        })?;
        atomic_write_file(&path, body.as_bytes()).map_err(|source| ProjectStoreError::Write {
            path: path.display().to_string(),
            source,
        })
    }
}

impl ProjectDescriptionStore for FileProjectStore {
    fn exists(&self, name: &ProjectName) -> bool {
        self.description_path(name).is_file()
    }

    fn load(&self, name: &ProjectName) -> Result<ProjectDescription, ProjectStoreError> {
        let path = self.description_path(name);
        if !path.is_file() {
            return Err(ProjectStoreError::UnknownProject {
                name: name.to_string(),
            });
        }
        let raw = fs::read_to_string(&path).map_err(|source| ProjectStoreError::Read {
            path: path.display().to_string(),
            source,
        })?;
        serde_yaml::from_str(&raw).map_err(|source| ProjectStoreError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    fn create(&mut self, description: &ProjectDescription) -> Result<(), ProjectStoreError> {
        if self.exists(&description.name) {
            return Err(ProjectStoreError::ProjectExists {
                name: description.name.to_string(),
            });
        }
        self.write(description)
    }

    fn apply_natures(
        &mut self,
        name: &ProjectName,
        natures: &[NatureId],
    ) -> Result<(), ProjectStoreError> {
        let mut description = self.load(name)?;
        description.natures = natures.to_vec();
        self.write(&description)
    }
}

/// Store kept entirely in memory, for embedding hosts that own persistence themselves.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProjectStore {
    projects: BTreeMap<ProjectName, ProjectDescription>,
}

impl InMemoryProjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_project(mut self, description: ProjectDescription) -> Self {
        self.projects.insert(description.name.clone(), description);
        self
    }
}

impl ProjectDescriptionStore for InMemoryProjectStore {
    fn exists(&self, name: &ProjectName) -> bool {
        self.projects.contains_key(name)
    }

    fn load(&self, name: &ProjectName) -> Result<ProjectDescription, ProjectStoreError> {
        self.projects
            .get(name)
            .cloned()
            .ok_or_else(|| ProjectStoreError::UnknownProject {
                name: name.to_string(),
            })
    }

    fn create(&mut self, description: &ProjectDescription) -> Result<(), ProjectStoreError> {
        if self.exists(&description.name) {
            return Err(ProjectStoreError::ProjectExists {
                name: description.name.to_string(),
            });
        }
        self.projects
            .insert(description.name.clone(), description.clone());
        Ok(())
    }

    fn apply_natures(
        &mut self,
        name: &ProjectName,
        natures: &[NatureId],
    ) -> Result<(), ProjectStoreError> {
        let description =
            self.projects
                .get_mut(name)
                .ok_or_else(|| ProjectStoreError::UnknownProject {
                    name: name.to_string(),
                })?;
        description.natures = natures.to_vec();
        Ok(())
    }
}
