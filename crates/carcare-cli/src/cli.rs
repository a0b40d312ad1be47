use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::commands::{admin, catalog, config, history, predict, request, services, session, vehicles};

/// Car Service Prediction client
#[derive(Parser, Debug)]
#[command(name = "carcare", version, propagate_version = true, subcommand_required = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,
    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every subcommand
#[derive(Args, Debug)]
pub struct GlobalOptions {
    /// Backend base URL (overrides the config file)
    #[arg(long, env = "CARCARE_BASE_URL", global = true)]
    pub base_url: Option<String>,
    /// Token storage: file, keychain or none (overrides the config file)
    #[arg(long, env = "CARCARE_STORAGE", global = true)]
    pub storage: Option<String>,
    /// Write logs to this file instead of stderr
    #[arg(long, env = "CARCARE_LOG_FILE", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in with email and password, or with an existing token
    Login(session::LoginCommand),
    /// Forget the stored token
    Logout,
    /// Show whether a session is active and when its token expires
    Status,
    /// Print the signed-in account as reported by the backend
    Whoami,
    /// Create a new account
    Register(session::RegisterCommand),
    /// Send a raw authenticated request and print the response
    Request(request::RequestCommand),
    /// Manage garage vehicles
    #[command(subcommand)]
    Vehicles(vehicles::VehiclesCommand),
    /// Predict when a car needs service
    Predict(predict::PredictCommand),
    /// Browse saved predictions and account statistics
    #[command(subcommand)]
    History(history::HistoryCommand),
    /// Keep a log of services done
    #[command(subcommand)]
    Services(services::ServicesCommand),
    /// Browse or edit the make/model catalog
    #[command(subcommand)]
    Catalog(catalog::CatalogCommand),
    /// Administer accounts (superuser only)
    #[command(subcommand)]
    Users(admin::UsersCommand),
    /// Check that the backend is up
    Health,
    /// Show or change the saved configuration
    Config(config::ConfigCommand),
}

pub fn parse() -> Cli {
    Cli::parse()
}
