use serde::Serialize;

use crate::models::User;

/// Snapshot published by `AuthStore`.
///
/// `is_authenticated` is true only once a user fetch for `token` succeeded,
/// except during the loading window where it is set optimistically.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthState {
    pub is_authenticated: bool,
    pub token: Option<String>,
    pub user: Option<User>,
    pub loading: bool,
}

/// Coarse view of an `AuthState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPhase {
    LoggedOut,
    Loading,
    Authenticated,
}

impl Default for AuthState {
    /// Value before `initialize` has run: nothing known yet, still loading.
    fn default() -> Self {
        Self {
            is_authenticated: false,
            token: None,
            user: None,
            loading: true,
        }
    }
}

impl AuthState {
    pub fn logged_out() -> Self {
        Self {
            loading: false,
            ..Self::default()
        }
    }

    /// Token accepted locally, user fetch in flight. Keeps the current user.
    pub(crate) fn begin_loading(&mut self, token: String) {
        self.is_authenticated = true;
        self.token = Some(token);
        self.loading = true;
    }

    pub(crate) fn authenticated(&mut self, token: String, user: User) {
        self.is_authenticated = true;
        self.token = Some(token);
        self.user = Some(user);
        self.loading = false;
    }

    pub fn phase(&self) -> AuthPhase {
        if self.loading {
            AuthPhase::Loading
        } else if self.is_authenticated && self.token.is_some() {
            AuthPhase::Authenticated
        } else {
            AuthPhase::LoggedOut
        }
    }

    pub fn is_superuser(&self) -> bool {
        self.user.as_ref().map(|u| u.is_superuser).unwrap_or(false)
    }
}
