//! Persistent mirror of the bearer token.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use keyring::Entry;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Token file name inside the data directory
const TOKEN_FILE: &str = "token.json";

/// Keychain service name
const KEYCHAIN_SERVICE: &str = "carcare";

#[derive(Debug, Serialize, Deserialize)]
struct StoredToken {
    token: String,
    saved_at: DateTime<Utc>,
}

/// Where the token is kept between runs.
#[derive(Debug, Clone)]
pub enum TokenStorage {
    /// Nothing is persisted; `initialize` always ends logged out.
    Disabled,
    /// JSON file holding the token and when it was saved.
    File(PathBuf),
    /// OS keychain entry.
    Keychain { service: String, account: String },
}

impl TokenStorage {
    /// File storage at `<dir>/token.json`
    pub fn file_in(dir: impl Into<PathBuf>) -> Self {
        TokenStorage::File(dir.into().join(TOKEN_FILE))
    }

    /// Keychain storage, one entry per account (the backend URL).
    pub fn keychain(account: impl Into<String>) -> Self {
        TokenStorage::Keychain {
            service: KEYCHAIN_SERVICE.to_string(),
            account: account.into(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        !matches!(self, TokenStorage::Disabled)
    }

    /// Read the stored token. Empty tokens count as absent.
    pub fn load(&self) -> Result<Option<String>> {
        let token = match self {
            TokenStorage::Disabled => None,
            TokenStorage::File(path) => {
                if !path.exists() {
                    return Ok(None);
                }
                let contents = std::fs::read_to_string(path)
                    .context("Failed to read token file")?;
                let stored: StoredToken = serde_json::from_str(&contents)
                    .context("Failed to parse token file")?;
                debug!(saved_at = %stored.saved_at, "Loaded stored token");
                Some(stored.token)
            }
            TokenStorage::Keychain { service, account } => {
                let entry = Entry::new(service, account)
                    .context("Failed to create keyring entry")?;
                match entry.get_password() {
                    Ok(token) => Some(token),
                    Err(keyring::Error::NoEntry) => None,
                    Err(e) => {
                        return Err(e).context("Failed to retrieve token from keychain");
                    }
                }
            }
        };
        Ok(token.filter(|t| !t.is_empty()))
    }

    pub fn save(&self, token: &str) -> Result<()> {
        match self {
            TokenStorage::Disabled => {}
            TokenStorage::File(path) => {
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent)
                        .context("Failed to create token directory")?;
                }
                let stored = StoredToken {
                    token: token.to_string(),
                    saved_at: Utc::now(),
                };
                let contents = serde_json::to_string_pretty(&stored)?;
                std::fs::write(path, contents).context("Failed to write token file")?;
            }
            TokenStorage::Keychain { service, account } => {
                let entry = Entry::new(service, account)
                    .context("Failed to create keyring entry")?;
                entry
                    .set_password(token)
                    .context("Failed to store token in keychain")?;
            }
        }
        Ok(())
    }

    /// Remove the stored token. Removing nothing is not an error.
    pub fn clear(&self) -> Result<()> {
        match self {
            TokenStorage::Disabled => {}
            TokenStorage::File(path) => {
                if path.exists() {
                    std::fs::remove_file(path).context("Failed to remove token file")?;
                }
            }
            TokenStorage::Keychain { service, account } => {
                let entry = Entry::new(service, account)
                    .context("Failed to create keyring entry")?;
                match entry.delete_credential() {
                    Ok(()) | Err(keyring::Error::NoEntry) => {}
                    Err(e) => return Err(e).context("Failed to delete token from keychain"),
                }
            }
        }
        Ok(())
    }

    pub fn describe(&self) -> String {
        match self {
            TokenStorage::Disabled => "disabled".to_string(),
            TokenStorage::File(path) => format!("file ({})", path.display()),
            TokenStorage::Keychain { service, account } => {
                format!("keychain ({}/{})", service, account)
            }
        }
    }
}
