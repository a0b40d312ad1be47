//! Authentication module for holding the signed-in state and its token.
//!
//! This module provides:
//! - `AuthStore`: reactive store publishing `AuthState` to subscribers
//! - `TokenStorage`: where the bearer token is mirrored (file, OS keychain, or nowhere)
//! - `TokenClaims`: unverified JWT payload, for display only
//!
//! Only the token is persisted. The user is always re-fetched from `/auth/me`.

pub mod claims;
pub mod state;
pub mod storage;
pub mod store;

pub use claims::TokenClaims;
pub use state::{AuthPhase, AuthState};
pub use storage::TokenStorage;
pub use store::AuthStore;
