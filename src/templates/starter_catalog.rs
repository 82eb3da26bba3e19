use crate::config::{CapabilityConfig, CatalogFile, CategoryConfig, ConfigError, WizardSource};
use crate::shared::ids::{CapabilityId, CategoryId, MembershipSetId, NatureId};

/// Catalogues `capsteps init` can seed a fresh state root with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StarterCatalog {
    Empty,
    Sample,
}

impl StarterCatalog {
    pub fn parse(raw: &str) -> Result<Self, String> {
        match raw.trim() {
            "empty" => Ok(Self::Empty),
            "sample" => Ok(Self::Sample),
            other => Err(format!(
                "unknown starter catalog `{other}`; expected one of: empty, sample"
            )),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StarterCatalog::Empty => "empty",
            StarterCatalog::Sample => "sample",
        }
    }
}

pub fn starter_catalog(kind: StarterCatalog) -> Result<CatalogFile, ConfigError> {
    let catalog = match kind {
        StarterCatalog::Empty => CatalogFile::default(),
        StarterCatalog::Sample => sample_catalog().map_err(ConfigError::Catalog)?,
    };
    catalog.validate()?;
    Ok(catalog)
}

struct Entry<'a> {
    id: &'a str,
    name: &'a str,
    category: Option<&'a str>,
    description: &'a str,
    prerequisites: &'a [&'a str],
    membership_sets: &'a [&'a str],
    handles: &'a [&'a str],
}

fn sample_catalog() -> Result<CatalogFile, String> {
    let categories = vec![
        category("java", "Java Development")?,
        category("web", "Web Development")?,
    ];
    let entries = [
        Entry {
            id: "java",
            name: "Java",
            category: Some("java"),
            description: "Java sources, builder and class path.",
            prerequisites: &[],
            membership_sets: &[],
            handles: &[],
        },
        Entry {
            id: "java-tests",
            name: "Java Tests",
            category: Some("java"),
            description: "Test source folders and runner launch configurations.",
            prerequisites: &["java"],
            membership_sets: &[],
            handles: &[],
        },
        Entry {
            id: "web",
            name: "Web Content",
            category: Some("web"),
            description: "Static web content folder.",
            prerequisites: &[],
            membership_sets: &[],
            handles: &[],
        },
        Entry {
            id: "servlets",
            name: "Servlets",
            category: Some("web"),
            description: "Servlet container deployment.",
            prerequisites: &["java", "web"],
            membership_sets: &["web-runtime"],
            handles: &["web"],
        },
        Entry {
            id: "static-site",
            name: "Static Site",
            category: Some("web"),
            description: "Pre-rendered site output.",
            prerequisites: &["web"],
            membership_sets: &["web-runtime"],
            handles: &[],
        },
        Entry {
            id: "notes",
            name: "Notes",
            category: None,
            description: "Free-form project notes.",
            prerequisites: &[],
            membership_sets: &[],
            handles: &[],
        },
    ];

    let capabilities = entries
        .iter()
        .map(capability)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(CatalogFile {
        categories,
        capabilities,
    })
}

fn category(id: &str, name: &str) -> Result<CategoryConfig, String> {
    Ok(CategoryConfig {
        id: CategoryId::parse(id)?,
        name: name.to_string(),
    })
}

fn capability(entry: &Entry<'_>) -> Result<CapabilityConfig, String> {
    Ok(CapabilityConfig {
        id: CapabilityId::parse(entry.id)?,
        name: entry.name.to_string(),
        nature: NatureId::parse(&format!("capsteps.nature.{}", entry.id))?,
        category: entry.category.map(CategoryId::parse).transpose()?,
        description: Some(entry.description.to_string()),
        prerequisites: parse_all(entry.prerequisites, CapabilityId::parse)?,
        membership_sets: parse_all(entry.membership_sets, MembershipSetId::parse)?,
        handles: parse_all(entry.handles, CapabilityId::parse)?,
        install_wizard: Some(WizardSource::Builtin),
        uninstall_wizard: Some(WizardSource::Builtin),
    })
}

fn parse_all<T>(raw: &[&str], parse: fn(&str) -> Result<T, String>) -> Result<Vec<T>, String> {
    raw.iter().map(|value| parse(value)).collect()
}
