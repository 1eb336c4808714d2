use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use snippets::ExtractConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config '{}': {source}", config_path.display())]
    Read {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot parse config '{}': {source}", config_path.display())]
    Parse {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// Settings from a TOML file. Every key is optional; absent keys keep
/// whatever the layer below provides.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub document_path: Option<PathBuf>,
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub fence: Option<String>,
    #[serde(default)]
    pub preamble: Option<String>,
    #[serde(default)]
    pub prefix: Option<String>,
    #[serde(default)]
    pub extension: Option<String>,
}

impl FileConfig {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Self, ConfigError> {
        let config_path = config_path.as_ref();
        let content = std::fs::read_to_string(config_path).map_err(|source| ConfigError::Read {
            config_path: config_path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            config_path: config_path.to_path_buf(),
            source,
        })
    }

    /// Overlay these settings on `base`.
    pub fn apply(self, base: &mut ExtractConfig) {
        if let Some(v) = self.document_path {
            base.document_path = v;
        }
        if let Some(v) = self.output_dir {
            base.output_dir = v;
        }
        if let Some(v) = self.tag {
            base.tag = v;
        }
        if let Some(v) = self.fence {
            base.fence = v;
        }
        if let Some(v) = self.preamble {
            base.preamble = v;
        }
        if let Some(v) = self.prefix {
            base.prefix = v;
        }
        if let Some(v) = self.extension {
            base.extension = v;
        }
    }
}
