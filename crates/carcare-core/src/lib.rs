//! Core library for carcare.
//!
//! A client for the Car Service Prediction backend: a reactive
//! authentication store that mirrors its bearer token into persistent
//! storage, and an API client that attaches that token to every request.
//!
//! ```no_run
//! # async fn demo() -> anyhow::Result<()> {
//! use carcare_core::{api, ApiClient, AuthStore, Config};
//!
//! let config = Config::load()?;
//! let auth = AuthStore::new(api::http_client()?, &config.base_url, config.token_storage()?);
//! auth.initialize().await;
//!
//! let client = ApiClient::new(auth.clone());
//! let vehicles = client.list_vehicles(0, 100).await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod models;

pub use api::{ApiClient, ApiError};
pub use auth::{AuthPhase, AuthState, AuthStore, TokenClaims, TokenStorage};
pub use config::{Config, StorageKind};
pub use models::User;
