//! Subcommand implementations.
//!
//! Every command starts from a `Context`: the merged configuration, an
//! initialized `AuthStore`, and an `ApiClient` bound to it.

pub mod admin;
pub mod catalog;
pub mod config;
pub mod history;
pub mod predict;
pub mod request;
pub mod services;
pub mod session;
pub mod vehicles;

use anyhow::{bail, Result};
use tracing::debug;

use carcare_core::{api, ApiClient, AuthPhase, AuthStore, Config, StorageKind, User};

use crate::cli::{Cli, Command, GlobalOptions};

pub struct Context {
    pub config: Config,
    pub auth: AuthStore,
    pub client: ApiClient,
}

impl Context {
    /// Load config, apply command line overrides, and restore any stored session.
    pub async fn connect(options: &GlobalOptions) -> Result<Self> {
        let mut config = Config::load()?;
        if let Some(ref url) = options.base_url {
            config.base_url = url.clone();
        }
        if let Some(ref storage) = options.storage {
            config.storage = storage.parse::<StorageKind>()?;
        }
        debug!(base_url = %config.base_url, storage = %config.storage, "Connecting");

        let auth = AuthStore::new(api::http_client()?, &config.base_url, config.token_storage()?);
        auth.initialize().await;
        let client = ApiClient::new(auth.clone());

        Ok(Self {
            config,
            auth,
            client,
        })
    }

    /// The signed-in user, or an error telling how to sign in.
    pub fn require_login(&self) -> Result<User> {
        let state = self.auth.get();
        match (state.phase(), state.user) {
            (AuthPhase::Authenticated, Some(user)) => Ok(user),
            _ => bail!("Not logged in. Run `carcare login` first."),
        }
    }

    pub fn require_superuser(&self) -> Result<User> {
        let user = self.require_login()?;
        if !user.is_superuser {
            bail!("{} is not an administrator", user.email);
        }
        Ok(user)
    }
}

pub async fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        // Config edits must work even when the backend is unreachable
        Command::Config(cmd) => config::run(cmd),
        command => {
            let ctx = Context::connect(&cli.global).await?;
            dispatch_connected(&ctx, command).await
        }
    }
}

async fn dispatch_connected(ctx: &Context, command: Command) -> Result<()> {
    match command {
        Command::Login(cmd) => session::login(ctx, cmd).await,
        Command::Logout => session::logout(ctx),
        Command::Status => session::status(ctx),
        Command::Whoami => session::whoami(ctx).await,
        Command::Register(cmd) => session::register(ctx, cmd).await,
        Command::Request(cmd) => request::run(ctx, cmd).await,
        Command::Vehicles(cmd) => vehicles::run(ctx, cmd).await,
        Command::Predict(cmd) => predict::run(ctx, cmd).await,
        Command::History(cmd) => history::run(ctx, cmd).await,
        Command::Services(cmd) => services::run(ctx, cmd).await,
        Command::Catalog(cmd) => catalog::run(ctx, cmd).await,
        Command::Users(cmd) => admin::run(ctx, cmd).await,
        Command::Health => request::health(ctx).await,
        Command::Config(cmd) => config::run(cmd),
    }
}
