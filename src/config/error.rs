use std::path::PathBuf;

/// Failures reading, validating or writing capsteps settings and catalogues.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse {} as yaml: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("cannot serialize yaml for {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("cannot create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid capsteps settings: {0}")]
    Settings(String),
    #[error("capability catalog validation failed: {0}")]
    Catalog(String),
    #[error("HOME is not set; cannot locate the capsteps state directory")]
    HomeDirectoryUnavailable,
}
