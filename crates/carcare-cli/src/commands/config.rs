use anyhow::Result;
use clap::Args;

use carcare_core::{Config, StorageKind};

/// Flags are prefixed with `set-` so they stay distinct from the global
/// `--base-url` / `--storage` overrides.
#[derive(Args, Debug)]
pub struct ConfigCommand {
    /// Save a new backend base URL
    #[arg(long)]
    pub set_base_url: Option<String>,
    /// Save a new token storage: file, keychain or none
    #[arg(long)]
    pub set_storage: Option<String>,
}

pub fn run(cmd: ConfigCommand) -> Result<()> {
    let mut config = Config::load()?;

    if cmd.set_base_url.is_none() && cmd.set_storage.is_none() {
        println!("Config:     {}", Config::config_path()?.display());
        println!("Base URL:   {}", config.base_url);
        println!("Storage:    {}", config.storage);
        println!("Last email: {}", config.last_email.as_deref().unwrap_or("-"));
        return Ok(());
    }

    if let Some(url) = cmd.set_base_url {
        config.base_url = url.trim_end_matches('/').to_string();
    }
    if let Some(storage) = cmd.set_storage {
        config.storage = storage.parse::<StorageKind>()?;
    }
    config.save()?;
    println!("Saved {}", Config::config_path()?.display());
    Ok(())
}
