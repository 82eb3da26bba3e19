//! Picks the path variable that best describes where a set of resources lives.

use crate::shared::ids::validate_identifier_value;
use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathVariableError {
    #[error("invalid path variable name `{name}`: {reason}")]
    InvalidName { name: String, reason: String },
    #[error("path variable `{name}` must point to an absolute location, got `{location}`")]
    RelativeLocation { name: String, location: String },
    #[error("invalid path variable assignment `{raw}`; expected NAME=/absolute/path")]
    InvalidAssignment { raw: String },
}

/// Variable name to absolute location.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathVariables {
    variables: BTreeMap<String, PathBuf>,
}

impl PathVariables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `NAME=/path` assignments separated by commas.
    pub fn parse_assignments(raw: &str) -> Result<Self, PathVariableError> {
        let mut variables = Self::new();
        for assignment in raw.split(',') {
            let assignment = assignment.trim();
            if assignment.is_empty() {
                continue;
            }
            let Some((name, location)) = assignment.split_once('=') else {
                return Err(PathVariableError::InvalidAssignment {
                    raw: assignment.to_string(),
                });
            };
            variables.insert(name.trim(), PathBuf::from(location.trim()))?;
        }
        Ok(variables)
    }

    pub fn insert(&mut self, name: &str, location: PathBuf) -> Result<(), PathVariableError> {
        validate_identifier_value("path variable name", name).map_err(|reason| {
            PathVariableError::InvalidName {
                name: name.to_string(),
                reason,
            }
        })?;
        if !location.is_absolute() {
            return Err(PathVariableError::RelativeLocation {
                name: name.to_string(),
                location: location.display().to_string(),
            });
        }
        self.variables
            .insert(name.to_string(), normalize(&location));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Path> {
        self.variables.get(name).map(PathBuf::as_path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.variables
            .iter()
            .map(|(name, location)| (name.as_str(), location.as_path()))
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

/// Longest shared ancestor-or-self of absolute `paths`. `None` for empty input or when a path is
/// relative.
pub fn common_root<P>(paths: &[P]) -> Option<PathBuf>
where
    P: AsRef<Path>,
{
    let (first, rest) = paths.split_first()?;
    if !first.as_ref().is_absolute() {
        return None;
    }
    let mut root = normalize(first.as_ref());
    for path in rest {
        let path = path.as_ref();
        if !path.is_absolute() {
            return None;
        }
        let path = normalize(path);
        let shared = root
            .components()
            .zip(path.components())
            .take_while(|(left, right)| left == right)
            .count();
        root = root.components().take(shared).collect();
    }
    Some(root)
}

/// The variable whose location encloses the common root of `paths` most closely.
///
/// Only variables located at the root or above it qualify; a variable that sits inside the root
/// would not cover every path. Equal distances go to the lexicographically smallest name.
pub fn preferred_variable<'v, P>(variables: &'v PathVariables, paths: &[P]) -> Option<&'v str>
where
    P: AsRef<Path>,
{
    let root = common_root(paths)?;
    let root_depth = root.components().count();

    let mut best: Option<(usize, &'v str)> = None;
    for (name, location) in variables.iter() {
        if !root.starts_with(location) {
            continue;
        }
        let distance = root_depth - location.components().count();
        if best.map_or(true, |(best_distance, _)| distance < best_distance) {
            best = Some((distance, name));
        }
    }
    best.map(|(_, name)| name)
}

/// Lexical cleanup: `.` is dropped and `..` removes the preceding segment. `..` never climbs
/// above the root.
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_root_is_longest_shared_prefix() {
        let root = common_root(&["/work/src/app/a.txt", "/work/src/app/b/c.txt"]);
        assert_eq!(root, Some(PathBuf::from("/work/src/app")));
        assert_eq!(common_root(&["/work/a"]), Some(PathBuf::from("/work/a")));
        assert_eq!(common_root::<&str>(&[]), None);
        assert_eq!(common_root(&["/work/a", "relative/b"]), None);
    }

    #[test]
    fn assignments_require_absolute_locations() {
        let err = PathVariables::parse_assignments("A=/x,B=y").expect_err("relative location");
        assert_eq!(
            err,
            PathVariableError::RelativeLocation {
                name: "B".to_string(),
                location: "y".to_string(),
            }
        );
        let err = PathVariables::parse_assignments("A").expect_err("missing location");
        assert!(matches!(err, PathVariableError::InvalidAssignment { .. }));
    }

    #[test]
    fn parent_segments_are_resolved_before_matching() {
        assert_eq!(
            common_root(&["/work/src/../lib/a.txt", "/work/lib/./b.txt"]),
            Some(PathBuf::from("/work/lib"))
        );
        assert_eq!(common_root(&["/../work/a"]), Some(PathBuf::from("/work/a")));

        let variables = PathVariables::parse_assignments("LIB=/work/lib,SRC=/work/src")
            .expect("parse variables");
        assert_eq!(
            preferred_variable(&variables, &["/work/src/../lib/a.txt"]),
            Some("LIB")
        );
    }

    #[test]
    fn ties_go_to_the_smallest_name() {
        let variables =
            PathVariables::parse_assignments("ZETA=/work,ALPHA=/work").expect("parse variables");
        assert_eq!(
            preferred_variable(&variables, &["/work/src/a.txt"]),
            Some("ALPHA")
        );
    }
}
