//! Account models returned by the `/auth` and `/users` endpoints.

use serde::{Deserialize, Serialize};

/// The signed-in account as reported by `/auth/me`.
///
/// Only `email` and `is_superuser` are relied upon; the backend also sends
/// `id` and `is_active`, which are kept when present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    #[serde(default)]
    pub is_superuser: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl User {
    pub fn new(email: impl Into<String>, is_superuser: bool) -> Self {
        Self {
            email: email.into(),
            is_superuser,
            id: None,
            is_active: None,
        }
    }

    pub fn role_display(&self) -> &'static str {
        if self.is_superuser {
            "admin"
        } else {
            "user"
        }
    }
}

/// Response of `POST /auth/token`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

impl TokenResponse {
    pub fn is_bearer(&self) -> bool {
        self.token_type.eq_ignore_ascii_case("bearer")
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}
