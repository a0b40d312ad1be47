//! API client for the Car Service Prediction REST backend.
//!
//! Every call goes through `ApiClient::request`, which attaches the bearer
//! token held by the `AuthStore` and logs out on a 401. There is no retry.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client, Method, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::auth::AuthStore;
use crate::models::{
    CarData, Health, NewMake, NewModel, NewPredictionRecord, NewServiceRecord, NewVehicle,
    PredictionRecord, PredictionResponse, RegisterRequest, ServiceRecord, TokenResponse, User,
    UserStatistics, Vehicle, VehicleMake, VehicleModel, VehicleUpdate,
};

use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// HTTP request timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Password length accepted by `/auth/register` (bcrypt caps input at 72 bytes).
const MIN_PASSWORD_LENGTH: usize = 8;
const MAX_PASSWORD_LENGTH: usize = 72;

/// Build the HTTP client shared by the store and the API client.
pub fn http_client() -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
        .context("Failed to build HTTP client")
}

/// Paginated list endpoint, optionally filtered to one vehicle.
fn paged(path: &str, skip: u32, limit: u32, vehicle_id: Option<i64>) -> String {
    match vehicle_id {
        Some(id) => format!("{}?skip={}&limit={}&vehicle_id={}", path, skip, limit, id),
        None => format!("{}?skip={}&limit={}", path, skip, limit),
    }
}

/// Extra headers and an already encoded body for `ApiClient::request`.
#[derive(Debug, Default, Clone)]
pub struct RequestOptions {
    pub headers: HeaderMap,
    pub body: Option<String>,
}

impl RequestOptions {
    pub fn json<B: Serialize + ?Sized>(body: &B) -> Result<Self, ApiError> {
        Ok(Self {
            headers: HeaderMap::new(),
            body: Some(serde_json::to_string(body)?),
        })
    }
}

/// API client bound to an `AuthStore`.
/// Clone is cheap - reqwest::Client and AuthStore are both shared handles.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    auth: AuthStore,
}

impl ApiClient {
    /// Create a client that shares the store's connection pool and base URL.
    pub fn new(auth: AuthStore) -> Self {
        Self {
            client: auth.http_client().clone(),
            auth,
        }
    }

    pub fn auth(&self) -> &AuthStore {
        &self.auth
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.auth.base_url(), endpoint)
    }

    /// Issue one request to `endpoint` with the current credentials.
    ///
    /// The response is returned whatever its status. A 401 logs the store out
    /// before returning.
    pub async fn request(
        &self,
        method: Method,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<Response> {
        let mut headers = options.headers;

        if let Some(token) = self.auth.token() {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(ApiError::from)?;
            headers.insert(header::AUTHORIZATION, value);
        }

        if !headers.contains_key(header::CONTENT_TYPE) {
            headers.insert(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            );
        }

        let url = self.url(endpoint);
        debug!(method = %method, url = %url, "Sending request");

        let mut builder = self.client.request(method.clone(), &url).headers(headers);
        if let Some(body) = options.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(ApiError::from)
            .with_context(|| format!("Failed to send {} request to {}", method, url))?;

        if response.status() == StatusCode::UNAUTHORIZED {
            warn!(url = %url, "Unauthorized response, logging out");
            if let Err(e) = self.auth.logout() {
                warn!(error = %e, "Failed to clear stored token");
            }
        }

        Ok(response)
    }

    pub async fn get(&self, endpoint: &str) -> Result<Response> {
        self.request(Method::GET, endpoint, RequestOptions::default())
            .await
    }

    pub async fn post<B: Serialize + ?Sized>(&self, endpoint: &str, body: &B) -> Result<Response> {
        self.request(Method::POST, endpoint, RequestOptions::json(body)?)
            .await
    }

    pub async fn put<B: Serialize + ?Sized>(&self, endpoint: &str, body: &B) -> Result<Response> {
        self.request(Method::PUT, endpoint, RequestOptions::json(body)?)
            .await
    }

    pub async fn delete(&self, endpoint: &str) -> Result<Response> {
        self.request(Method::DELETE, endpoint, RequestOptions::default())
            .await
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: Response) -> Result<Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body).into())
        }
    }

    async fn parse_json<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
        let response = Self::check_response(response).await?;
        let text = response
            .text()
            .await
            .map_err(ApiError::from)
            .with_context(|| format!("Failed to read {} response body", what))?;
        serde_json::from_str(&text)
            .map_err(|e| ApiError::InvalidResponse(format!("{}: {}", what, e)).into())
    }

    // ===== Authentication =====

    /// Exchange email and password for a bearer token.
    ///
    /// Sent as an OAuth2 password form and without the stored token, so a
    /// wrong password never logs out an existing session.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<TokenResponse> {
        let url = self.url("/auth/token");

        let response = self
            .client
            .post(&url)
            .header(header::ACCEPT, "application/json")
            .form(&[("username", email), ("password", password)])
            .send()
            .await
            .map_err(ApiError::from)
            .context("Failed to send authentication request")?;

        let token: TokenResponse = Self::parse_json(response, "token").await?;
        if !token.is_bearer() {
            warn!(token_type = %token.token_type, "Unexpected token type");
        }
        Ok(token)
    }

    /// Create an account. Password length is checked before any request.
    pub async fn register(&self, email: &str, password: &str) -> Result<User> {
        let length = password.chars().count();
        if !(MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH).contains(&length) {
            return Err(ApiError::Validation(format!(
                "Password must be between {} and {} characters",
                MIN_PASSWORD_LENGTH, MAX_PASSWORD_LENGTH
            ))
            .into());
        }

        let body = RegisterRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = self.post("/auth/register", &body).await?;
        Self::parse_json(response, "register").await
    }

    pub async fn current_user(&self) -> Result<User> {
        let response = self.get("/auth/me").await?;
        Self::parse_json(response, "user").await
    }

    // ===== Users (superuser only) =====

    pub async fn list_users(&self, skip: u32, limit: u32) -> Result<Vec<User>> {
        let response = self
            .get(&format!("/users/?skip={}&limit={}", skip, limit))
            .await?;
        Self::parse_json(response, "users").await
    }

    pub async fn delete_user(&self, user_id: i64) -> Result<User> {
        let response = self.delete(&format!("/users/{}", user_id)).await?;
        Self::parse_json(response, "deleted user").await
    }

    // ===== Vehicles =====

    pub async fn list_vehicles(&self, skip: u32, limit: u32) -> Result<Vec<Vehicle>> {
        let response = self
            .get(&format!("/vehicles/?skip={}&limit={}", skip, limit))
            .await?;
        Self::parse_json(response, "vehicles").await
    }

    pub async fn get_vehicle(&self, vehicle_id: i64) -> Result<Vehicle> {
        let response = self.get(&format!("/vehicles/{}", vehicle_id)).await?;
        Self::parse_json(response, "vehicle").await
    }

    pub async fn create_vehicle(&self, vehicle: &NewVehicle) -> Result<Vehicle> {
        let response = self.post("/vehicles/", vehicle).await?;
        Self::parse_json(response, "vehicle").await
    }

    pub async fn update_vehicle(&self, vehicle_id: i64, update: &VehicleUpdate) -> Result<Vehicle> {
        let response = self
            .put(&format!("/vehicles/{}", vehicle_id), update)
            .await?;
        Self::parse_json(response, "vehicle").await
    }

    pub async fn delete_vehicle(&self, vehicle_id: i64) -> Result<()> {
        let response = self.delete(&format!("/vehicles/{}", vehicle_id)).await?;
        Self::check_response(response).await?;
        Ok(())
    }

    // ===== Predictions =====

    pub async fn predict(&self, car: &CarData) -> Result<PredictionResponse> {
        let response = self.post("/predict", car).await?;
        Self::parse_json(response, "prediction").await
    }

    // ===== Prediction history =====

    pub async fn save_prediction(&self, record: &NewPredictionRecord) -> Result<PredictionRecord> {
        let response = self.post("/predictions/save", record).await?;
        Self::parse_json(response, "saved prediction").await
    }

    /// Saved predictions, newest first.
    pub async fn prediction_history(
        &self,
        skip: u32,
        limit: u32,
        vehicle_id: Option<i64>,
    ) -> Result<Vec<PredictionRecord>> {
        let response = self
            .get(&paged("/predictions/history", skip, limit, vehicle_id))
            .await?;
        Self::parse_json(response, "prediction history").await
    }

    pub async fn prediction_stats(&self) -> Result<UserStatistics> {
        let response = self.get("/predictions/stats").await?;
        Self::parse_json(response, "statistics").await
    }

    pub async fn get_prediction(&self, prediction_id: i64) -> Result<PredictionRecord> {
        let response = self
            .get(&format!("/predictions/{}", prediction_id))
            .await?;
        Self::parse_json(response, "saved prediction").await
    }

    // ===== Service records =====

    pub async fn create_service_record(&self, record: &NewServiceRecord) -> Result<ServiceRecord> {
        let response = self.post("/services/", record).await?;
        Self::parse_json(response, "service record").await
    }

    /// Service records, most recent service date first.
    pub async fn list_service_records(
        &self,
        skip: u32,
        limit: u32,
        vehicle_id: Option<i64>,
    ) -> Result<Vec<ServiceRecord>> {
        let response = self
            .get(&paged("/services/", skip, limit, vehicle_id))
            .await?;
        Self::parse_json(response, "service records").await
    }

    pub async fn get_service_record(&self, service_id: i64) -> Result<ServiceRecord> {
        let response = self.get(&format!("/services/{}", service_id)).await?;
        Self::parse_json(response, "service record").await
    }

    pub async fn delete_service_record(&self, service_id: i64) -> Result<()> {
        let response = self.delete(&format!("/services/{}", service_id)).await?;
        Self::check_response(response).await?;
        Ok(())
    }

    // ===== Catalog =====

    /// Every make with its models. Needs no login.
    pub async fn list_makes(&self) -> Result<Vec<VehicleMake>> {
        let response = self.get("/catalog/makes").await?;
        Self::parse_json(response, "makes").await
    }

    pub async fn list_models_for_make(&self, make_id: i64) -> Result<Vec<VehicleModel>> {
        let response = self
            .get(&format!("/catalog/makes/{}/models", make_id))
            .await?;
        Self::parse_json(response, "models").await
    }

    pub async fn create_make(&self, name: &str) -> Result<VehicleMake> {
        let body = NewMake {
            name: name.to_string(),
        };
        let response = self.post("/catalog/makes", &body).await?;
        Self::parse_json(response, "make").await
    }

    pub async fn create_model(&self, make_id: i64, name: &str) -> Result<VehicleModel> {
        let body = NewModel {
            name: name.to_string(),
            make_id,
        };
        let response = self.post("/catalog/models", &body).await?;
        Self::parse_json(response, "model").await
    }

    pub async fn delete_make(&self, make_id: i64) -> Result<()> {
        let response = self.delete(&format!("/catalog/makes/{}", make_id)).await?;
        Self::check_response(response).await?;
        Ok(())
    }

    pub async fn delete_model(&self, model_id: i64) -> Result<()> {
        let response = self.delete(&format!("/catalog/models/{}", model_id)).await?;
        Self::check_response(response).await?;
        Ok(())
    }

    pub async fn health(&self) -> Result<Health> {
        let response = self.get("/health").await?;
        Self::parse_json(response, "health").await
    }
}
