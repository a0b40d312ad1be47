//! Reactive authentication store.
//!
//! `AuthStore` owns the current `AuthState` and publishes every change on a
//! `tokio::sync::watch` channel. Each operation performs at most one call to
//! `/auth/me` and one read or write of the token storage.

use std::sync::Arc;

use anyhow::Result;
use reqwest::Client;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::models::User;

use super::{AuthState, TokenStorage};

/// Endpoint returning the account behind a bearer token
const ME_ENDPOINT: &str = "/auth/me";

/// Shared authentication state.
/// Clone is cheap and every clone refers to the same store.
#[derive(Clone)]
pub struct AuthStore {
    inner: Arc<Inner>,
}

struct Inner {
    state: watch::Sender<AuthState>,
    client: Client,
    base_url: String,
    storage: TokenStorage,
}

impl AuthStore {
    pub fn new(client: Client, base_url: impl Into<String>, storage: TokenStorage) -> Self {
        let (state, _) = watch::channel(AuthState::default());
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self {
            inner: Arc::new(Inner {
                state,
                client,
                base_url,
                storage,
            }),
        }
    }

    /// Receiver that sees the current value at once and every later publish.
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.inner.state.subscribe()
    }

    /// Snapshot of the current state
    pub fn get(&self) -> AuthState {
        self.inner.state.borrow().clone()
    }

    /// Token currently held, if any
    pub fn token(&self) -> Option<String> {
        self.inner.state.borrow().token.clone()
    }

    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    pub fn storage(&self) -> &TokenStorage {
        &self.inner.storage
    }

    pub(crate) fn http_client(&self) -> &Client {
        &self.inner.client
    }

    /// Persist `token`, mark the state as loading, then confirm it against
    /// the backend.
    ///
    /// Returns an error only when the token cannot be written to storage, in
    /// which case the state is left untouched.
    pub async fn login(&self, token: impl Into<String>) -> Result<()> {
        let token = token.into();
        self.inner.storage.save(&token)?;

        self.inner
            .state
            .send_modify(|state| state.begin_loading(token.clone()));
        self.fetch_user(&token).await;
        Ok(())
    }

    /// Forget the token and publish the logged-out state.
    ///
    /// The state is reset even when removing the stored token fails; that
    /// failure is returned afterwards.
    pub fn logout(&self) -> Result<()> {
        let cleared = self.inner.storage.clear();
        self.inner.state.send_replace(AuthState::logged_out());
        info!("Logged out");
        cleared
    }

    /// Restore a session from storage, if there is one.
    pub async fn initialize(&self) {
        if !self.inner.storage.is_enabled() {
            self.inner.state.send_replace(AuthState::logged_out());
            return;
        }

        let stored = match self.inner.storage.load() {
            Ok(token) => token,
            Err(e) => {
                warn!(error = %e, "Failed to read stored token");
                None
            }
        };

        match stored {
            Some(token) => {
                debug!("Found stored token, validating");
                self.inner
                    .state
                    .send_modify(|state| state.begin_loading(token.clone()));
                self.fetch_user(&token).await;
            }
            None => {
                self.inner.state.send_replace(AuthState::logged_out());
            }
        }
    }

    /// Replace the user without touching the other fields.
    pub fn set_user(&self, user: User) {
        self.inner.state.send_modify(|state| state.user = Some(user));
    }

    async fn fetch_user(&self, token: &str) {
        let url = format!("{}{}", self.inner.base_url, ME_ENDPOINT);

        let response = match self.inner.client.get(&url).bearer_auth(token).send().await {
            Ok(response) => response,
            Err(e) => {
                error!(error = %e, "Error fetching user");
                self.inner.state.send_replace(AuthState::logged_out());
                return;
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, "Token rejected, clearing stored token");
            self.inner.state.send_replace(AuthState::logged_out());
            if let Err(e) = self.inner.storage.clear() {
                warn!(error = %e, "Failed to remove rejected token");
            }
            return;
        }

        match response.json::<User>().await {
            Ok(user) => {
                info!(email = %user.email, "Authenticated");
                self.inner
                    .state
                    .send_modify(|state| state.authenticated(token.to_string(), user));
            }
            Err(e) => {
                // Storage is kept: the token was not rejected
                error!(error = %e, "Error fetching user");
                self.inner.state.send_replace(AuthState::logged_out());
            }
        }
    }
}
