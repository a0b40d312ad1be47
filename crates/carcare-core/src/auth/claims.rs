//! Unverified JWT payload decoding.
//!
//! The backend signs tokens with a secret the client never sees, so the
//! payload is only read for display (subject and expiry).

use anyhow::{Context, Result};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenClaims {
    pub sub: Option<String>,
    pub exp: Option<i64>,
}

impl TokenClaims {
    pub fn decode(token: &str) -> Result<Self> {
        let parts: Vec<&str> = token.split('.').collect();
        if parts.len() != 3 {
            anyhow::bail!("Token is not a JWT (expected 3 segments, got {})", parts.len());
        }

        let payload = URL_SAFE_NO_PAD
            .decode(parts[1].trim_end_matches('='))
            .context("Token payload is not valid base64url")?;

        serde_json::from_slice(&payload).context("Token payload is not valid JSON")
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|exp| DateTime::from_timestamp(exp, 0))
    }

    /// Tokens without `exp` never count as expired.
    pub fn is_expired(&self) -> bool {
        self.expires_at().map(|at| Utc::now() > at).unwrap_or(false)
    }

    /// Get minutes remaining until expiry (for display)
    pub fn minutes_until_expiry(&self) -> Option<i64> {
        self.expires_at()
            .map(|at| (at - Utc::now()).num_minutes().max(0))
    }
}
