//! REST API client module for the Car Service Prediction backend.
//!
//! `ApiClient::request` reads the bearer token from the shared `AuthStore`,
//! attaches it, and logs the store out when the backend answers 401.
//! Typed endpoint methods are built on the `get`/`post`/`put`/`delete` verbs.

pub mod client;
pub mod error;

pub use client::{http_client, ApiClient, RequestOptions};
pub use error::ApiError;
