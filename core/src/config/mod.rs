//! Engine configuration loaded from `config.json`.
//!
//! Every field has a default, so a missing file or a partial file is valid. Validation happens at
//! load time and again when an engine is constructed from a hand-built value.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::nav::TapZones;
use crate::types::{ContentMode, FitMode};

use super::Result;

const APP_QUALIFIER: &str = "com";
const APP_ORGANISATION: &str = "MediaViewer";
const APP_NAME: &str = "comic-engine";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub tap_zones: TapZones,
    pub initial_mode: ContentMode,
    pub fit: FitMode,
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        self.tap_zones.validate()
    }

    /// Parse and validate a JSON document.
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        let config: EngineConfig =
            serde_json::from_slice(bytes).context("parsing engine configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read(path) {
            Ok(bytes) => Self::from_json(&bytes)
                .with_context(|| format!("loading configuration from {}", path.display())),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no configuration file; using defaults");
                Ok(Self::default())
            }
            Err(err) => {
                Err(err).with_context(|| format!("reading configuration at {}", path.display()))
            }
        }
    }

    /// Load from the per-user configuration directory.
    pub fn load_default() -> Result<Self> {
        Self::load(&default_config_path()?)
    }
}

pub fn default_config_path() -> Result<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORGANISATION, APP_NAME)
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
        .ok_or_else(|| anyhow!("unable to resolve application configuration directory"))
}
