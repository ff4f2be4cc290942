use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::error::{ListError, Result};
use crate::record::ListStyle;

const QUALIFIER: &str = "dev.codex";
const ORGANIZATION: &str = "Codex";
const APPLICATION: &str = "cdx-list";
const CONFIG_FILE_NAME: &str = "config.toml";

/// User configuration of the list tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Style used when incoming data does not name one
    pub default_style: ListStyle,
}

impl Default for ToolConfig {
    fn default() -> Self {
        ToolConfig {
            default_style: ListStyle::Ordered,
        }
    }
}

impl ToolConfig {
    pub fn from_toml(contents: &str, path: &Path) -> Result<Self> {
        toml::from_str::<ToolConfig>(contents).map_err(|source| ListError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load the config at `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(contents) => Self::from_toml(&contents, path),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(source) => Err(ListError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

pub fn config_file_path() -> Option<PathBuf> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = ToolConfig::from_toml("default_style = \"unordered\"", Path::new("x")).unwrap();
        assert_eq!(config.default_style, ListStyle::Unordered);
    }

    #[test]
    fn test_empty_config_is_default() {
        let config = ToolConfig::from_toml("", Path::new("x")).unwrap();
        assert_eq!(config, ToolConfig::default());
    }

    #[test]
    fn test_invalid_style_is_config_error() {
        let err = ToolConfig::from_toml("default_style = \"numbered\"", Path::new("cfg.toml"))
            .unwrap_err();
        assert!(matches!(err, ListError::Config { .. }));
        assert!(err.to_string().contains("cfg.toml"));
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let path = std::env::temp_dir().join("cdx-list-does-not-exist/config.toml");
        assert_eq!(ToolConfig::load(&path).unwrap(), ToolConfig::default());
    }
}
