use crate::shared::ids::{NatureId, ProjectName};
use crate::shared::serde_ext::parse_id_list;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectDescription {
    pub name: ProjectName,
    #[serde(default, deserialize_with = "nature_id_list")]
    pub natures: Vec<NatureId>,
}

fn nature_id_list<'de, D>(deserializer: D) -> Result<Vec<NatureId>, D::Error>
where
    D: Deserializer<'de>,
{
    parse_id_list(deserializer, "nature id", NatureId::parse)
}

impl ProjectDescription {
    pub fn new(name: ProjectName) -> Self {
        Self {
            name,
            natures: Vec::new(),
        }
    }

    pub fn has_nature(&self, nature_id: &str) -> bool {
        self.natures.iter().any(|nature| nature.as_str() == nature_id)
    }
}
