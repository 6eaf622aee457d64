// customui-core/src/config.rs
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::area::Area;
use crate::storage::FileBlobStore;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Host configuration, read from `customui.toml`
///
/// ```toml
/// state_path = "/tmp/ui.json"
/// extensions_dir = "~/.customui/extensions"
///
/// [[areas]]
/// id = "side-panel"
/// anchor = "overflow-button"
/// defaults = ["home-button"]
/// ```
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ConfigFile {
    pub state_path: Option<PathBuf>,
    pub extensions_dir: Option<PathBuf>,
    /// Extra areas declared next to the built-in ones
    #[serde(default)]
    pub areas: Vec<AreaConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AreaConfig {
    pub id: String,
    #[serde(default)]
    pub anchor: String,
    #[serde(default)]
    pub defaults: Vec<String>,
}

impl AreaConfig {
    pub fn to_area(&self) -> Area {
        Area::panel(self.id.as_str())
            .with_anchor(self.anchor.as_str())
            .with_defaults(self.defaults.iter().cloned())
    }
}

impl ConfigFile {
    pub fn load() -> Result<Self, ConfigError> {
        // Priority: ./customui.toml -> ~/.config/customui/customui.toml -> default
        let mut paths = vec![std::env::current_dir()?.join("customui.toml")];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("customui/customui.toml"));
        }
        Self::load_first(&paths)
    }

    /// Load the first candidate that exists, or the default config
    pub fn load_first(candidates: &[PathBuf]) -> Result<Self, ConfigError> {
        match candidates.iter().find(|path| path.exists()) {
            Some(path) => Self::load_from(path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::parse(&content)?;
        tracing::debug!(path = %path.display(), areas = config.areas.len(), "loaded config");
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::Parse)
    }

    /// Where the UI state blob lives
    pub fn state_path(&self) -> PathBuf {
        self.state_path
            .clone()
            .unwrap_or_else(FileBlobStore::default_location)
    }

    /// Directory scanned for extension manifests
    pub fn extensions_dir(&self) -> PathBuf {
        self.extensions_dir.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .map(|h| h.join(".customui/extensions"))
                .unwrap_or_else(|| PathBuf::from("./extensions"))
        })
    }

    pub fn extra_areas(&self) -> impl Iterator<Item = Area> + '_ {
        self.areas.iter().map(AreaConfig::to_area)
    }
}
