//! Client configuration management.
//!
//! Holds the backend URL, where the token is stored, and the last email used
//! to sign in. Stored at `~/.config/carcare/config.json`.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::auth::TokenStorage;

/// Application name used for config/data directory paths
const APP_NAME: &str = "carcare";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Backend address used when nothing is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    #[default]
    File,
    Keychain,
    None,
}

impl FromStr for StorageKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(StorageKind::File),
            "keychain" | "keyring" => Ok(StorageKind::Keychain),
            "none" | "off" | "memory" => Ok(StorageKind::None),
            other => Err(anyhow::anyhow!(
                "Unknown token storage '{}' (expected file, keychain or none)",
                other
            )),
        }
    }
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StorageKind::File => "file",
            StorageKind::Keychain => "keychain",
            StorageKind::None => "none",
        };
        f.write_str(name)
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub storage: StorageKind,
    pub last_email: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            storage: StorageKind::default(),
            last_email: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse config file {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    pub fn data_dir() -> Result<PathBuf> {
        let data_dir = dirs::data_local_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find data directory"))?;
        Ok(data_dir.join(APP_NAME))
    }

    /// Token storage for this configuration.
    ///
    /// Keychain entries are keyed by backend URL so tokens for different
    /// servers do not overwrite each other.
    pub fn token_storage(&self) -> Result<TokenStorage> {
        Ok(match self.storage {
            StorageKind::File => TokenStorage::file_in(Self::data_dir()?),
            StorageKind::Keychain => TokenStorage::keychain(self.base_url.clone()),
            StorageKind::None => TokenStorage::Disabled,
        })
    }
}
