//! End-to-end behaviour of `AuthStore` and `ApiClient` against an in-process
//! fake backend.

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::extract::{Path as UrlPath, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Form, Json, Router};
use reqwest::header::HeaderValue;
use reqwest::Method;
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::sync::Notify;

use carcare_core::api::{http_client, RequestOptions};
use carcare_core::models::{CarData, NewPredictionRecord, NewServiceRecord, PredictionResponse};
use carcare_core::{ApiClient, ApiError, AuthPhase, AuthState, AuthStore, TokenStorage};

const GOOD_TOKEN: &str = "good-token";
const BROKEN_JSON_TOKEN: &str = "broken-json";
const ADMIN_TOKEN: &str = "admin-token";
/// `/auth/me` holds this token's response until `Backend::release` is notified
const SLOW_TOKEN: &str = "slow-token";

#[derive(Clone, Default)]
struct Backend {
    me_hits: Arc<AtomicUsize>,
    release: Arc<Notify>,
}

fn bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

fn signed_in(headers: &HeaderMap) -> bool {
    matches!(bearer(headers), Some(GOOD_TOKEN) | Some(ADMIN_TOKEN))
}

fn ana() -> Value {
    json!({
        "email": "ana@example.com",
        "id": 1,
        "is_active": true,
        "is_superuser": false
    })
}

async fn me(State(backend): State<Backend>, headers: HeaderMap) -> Response {
    backend.me_hits.fetch_add(1, Ordering::SeqCst);
    match bearer(&headers) {
        Some(GOOD_TOKEN) => Json(ana()).into_response(),
        Some(ADMIN_TOKEN) => Json(json!({
            "email": "root@example.com",
            "id": 2,
            "is_active": true,
            "is_superuser": true
        }))
        .into_response(),
        Some(SLOW_TOKEN) => {
            backend.release.notified().await;
            Json(ana()).into_response()
        }
        Some(BROKEN_JSON_TOKEN) => (StatusCode::OK, "<html>oops</html>").into_response(),
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "Could not validate credentials"})),
        )
            .into_response(),
    }
}

#[derive(Deserialize)]
struct LoginForm {
    username: String,
    password: String,
}

async fn token(Form(form): Form<LoginForm>) -> Response {
    if form.username == "ana@example.com" && form.password == "correct horse" {
        Json(json!({"access_token": GOOD_TOKEN, "token_type": "bearer"})).into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "Incorrect email or password"})),
        )
            .into_response()
    }
}

async fn vehicles(headers: HeaderMap) -> Response {
    if bearer(&headers) != Some(GOOD_TOKEN) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    Json(json!([{
        "id": 3, "user_id": 1, "make": "Honda", "model": "Civic", "year": 2016,
        "vin": null, "nickname": "Blue", "mileage": 120000.0, "engine_size": 1.5,
        "transmission": "manual", "fuel_type": "petrol", "is_default": true,
        "created_at": "2024-03-02T08:00:00"
    }]))
    .into_response()
}

async fn missing_vehicle() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"detail": "Vehicle not found"})),
    )
        .into_response()
}

fn header_str(headers: &HeaderMap, name: header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

async fn echo(headers: HeaderMap, body: String) -> Json<Value> {
    Json(json!({
        "authorization": header_str(&headers, header::AUTHORIZATION),
        "content_type": header_str(&headers, header::CONTENT_TYPE),
        "body": body,
    }))
}

async fn always_unauthorized() -> StatusCode {
    StatusCode::UNAUTHORIZED
}

fn not_found(detail: &str) -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "detail": detail }))).into_response()
}

fn vehicle_filter(params: &HashMap<String, String>) -> Value {
    params
        .get("vehicle_id")
        .and_then(|v| v.parse::<i64>().ok())
        .map(Value::from)
        .unwrap_or(Value::Null)
}

// ===== /predictions =====

fn prediction_record(id: i64, vehicle_id: Value) -> Value {
    json!({
        "id": id, "user_id": 1, "vehicle_id": vehicle_id, "make": "Honda", "model": "Civic",
        "year": 2016, "mileage": 120000.0, "service_needed": true, "confidence": 0.82,
        "estimated_days_until_service": 12,
        "recommended_services": "[\"Oil Change\",\"Brake Inspection\"]",
        "risk_level": "High", "created_at": "2024-06-01T10:00:00"
    })
}

async fn save_prediction(headers: HeaderMap, Json(mut body): Json<Value>) -> Response {
    if !signed_in(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    body["id"] = json!(11);
    body["user_id"] = json!(1);
    body["created_at"] = json!("2024-06-01T10:00:00");
    Json(body).into_response()
}

async fn prediction_history(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    Json(json!([prediction_record(11, vehicle_filter(&params))]))
}

async fn prediction_stats() -> Json<Value> {
    Json(json!({
        "total_predictions": 4, "total_vehicles": 1, "total_services": 2,
        "predictions_this_month": 3, "upcoming_services": 1
    }))
}

async fn get_prediction(UrlPath(id): UrlPath<i64>) -> Response {
    if id == 11 {
        Json(prediction_record(11, json!(3))).into_response()
    } else {
        not_found("Prediction not found")
    }
}

// ===== /services =====

fn service_record(id: i64, vehicle_id: Value) -> Value {
    json!({
        "id": id, "user_id": 1, "vehicle_id": vehicle_id, "service_type": "Oil Change",
        "service_date": "2024-05-01T00:00:00", "cost": 89.5, "mileage_at_service": 118000.0,
        "notes": null, "created_at": "2024-05-01T12:00:00"
    })
}

async fn create_service(headers: HeaderMap, Json(mut body): Json<Value>) -> Response {
    if !signed_in(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    body["id"] = json!(7);
    body["user_id"] = json!(1);
    body["created_at"] = json!("2024-05-01T12:00:00");
    Json(body).into_response()
}

async fn list_services(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    Json(json!([service_record(7, vehicle_filter(&params))]))
}

async fn get_service(UrlPath(id): UrlPath<i64>) -> Response {
    if id == 7 {
        Json(service_record(7, json!(3))).into_response()
    } else {
        not_found("Service record not found")
    }
}

async fn delete_service(UrlPath(id): UrlPath<i64>) -> Response {
    if id == 7 {
        Json(json!({"message": "Service record deleted successfully"})).into_response()
    } else {
        not_found("Service record not found")
    }
}

// ===== /catalog =====

fn corolla() -> Value {
    json!({"id": 4, "name": "Corolla", "make_id": 1, "created_at": "2024-01-01T00:00:00"})
}

/// Catalog edits need a superuser, as on the real backend.
fn require_admin(headers: &HeaderMap) -> Option<Response> {
    match bearer(headers) {
        Some(ADMIN_TOKEN) => None,
        Some(GOOD_TOKEN) => Some(
            (
                StatusCode::FORBIDDEN,
                Json(json!({"detail": "The user doesn't have enough privileges"})),
            )
                .into_response(),
        ),
        _ => Some(StatusCode::UNAUTHORIZED.into_response()),
    }
}

async fn list_makes() -> Json<Value> {
    Json(json!([{
        "id": 1, "name": "Toyota", "created_at": "2024-01-01T00:00:00", "models": [corolla()]
    }]))
}

async fn models_for_make(UrlPath(make_id): UrlPath<i64>) -> Json<Value> {
    if make_id == 1 {
        Json(json!([corolla()]))
    } else {
        Json(json!([]))
    }
}

async fn create_make(headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if let Some(denied) = require_admin(&headers) {
        return denied;
    }
    Json(json!({"id": 2, "name": body["name"], "created_at": "2024-06-01T00:00:00"})).into_response()
}

async fn create_model(headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if let Some(denied) = require_admin(&headers) {
        return denied;
    }
    Json(json!({
        "id": 5, "name": body["name"], "make_id": body["make_id"],
        "created_at": "2024-06-01T00:00:00"
    }))
    .into_response()
}

async fn delete_make(headers: HeaderMap, UrlPath(id): UrlPath<i64>) -> Response {
    if let Some(denied) = require_admin(&headers) {
        return denied;
    }
    match id {
        1 | 2 => Json(json!({"message": "Make deleted successfully"})).into_response(),
        _ => not_found("Make not found"),
    }
}

async fn delete_model(headers: HeaderMap, UrlPath(id): UrlPath<i64>) -> Response {
    if let Some(denied) = require_admin(&headers) {
        return denied;
    }
    match id {
        4 | 5 => Json(json!({"message": "Model deleted successfully"})).into_response(),
        _ => not_found("Model not found"),
    }
}

async fn spawn_backend(backend: Backend) -> String {
    let app = Router::new()
        .route("/auth/me", get(me))
        .route("/auth/token", post(token))
        .route("/vehicles/", get(vehicles))
        .route("/vehicles/404", get(missing_vehicle))
        .route("/echo", get(echo).post(echo))
        .route("/expired", get(always_unauthorized))
        .route("/health", get(|| async { Json(json!({"status": "healthy"})) }))
        .route("/predictions/save", post(save_prediction))
        .route("/predictions/history", get(prediction_history))
        .route("/predictions/stats", get(prediction_stats))
        .route("/predictions/{id}", get(get_prediction))
        .route("/services/", post(create_service).get(list_services))
        .route("/services/{id}", get(get_service).delete(delete_service))
        .route("/catalog/makes", get(list_makes).post(create_make))
        .route("/catalog/makes/{id}", delete(delete_make))
        .route("/catalog/makes/{id}/models", get(models_for_make))
        .route("/catalog/models", post(create_model))
        .route("/catalog/models/{id}", delete(delete_model))
        .with_state(backend);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Address nothing listens on
async fn closed_address() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

struct Harness {
    store: AuthStore,
    backend: Backend,
    _dir: tempfile::TempDir,
}

impl Harness {
    async fn new() -> Self {
        Self::with_storage(|dir| TokenStorage::file_in(dir)).await
    }

    /// Live backend, token storage built inside a fresh temp directory.
    async fn with_storage(storage: impl FnOnce(&Path) -> TokenStorage) -> Self {
        let backend = Backend::default();
        let base_url = spawn_backend(backend.clone()).await;
        let dir = tempfile::tempdir().unwrap();
        let store = AuthStore::new(http_client().unwrap(), base_url, storage(dir.path()));
        Self {
            store,
            backend,
            _dir: dir,
        }
    }

    fn with_base_url(base_url: String, backend: Backend) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let storage = TokenStorage::file_in(dir.path());
        let store = AuthStore::new(http_client().unwrap(), base_url, storage);
        Self {
            store,
            backend,
            _dir: dir,
        }
    }

    fn stored_token(&self) -> Option<String> {
        self.store.storage().load().unwrap()
    }

    fn me_hits(&self) -> usize {
        self.backend.me_hits.load(Ordering::SeqCst)
    }
}

// ============================================================================
// AuthStore
// ============================================================================

#[tokio::test]
async fn login_with_valid_token_authenticates() {
    let h = Harness::new().await;

    h.store.login(GOOD_TOKEN).await.unwrap();

    let state = h.store.get();
    assert_eq!(state.phase(), AuthPhase::Authenticated);
    assert!(state.is_authenticated);
    assert!(!state.loading);
    assert_eq!(state.token.as_deref(), Some(GOOD_TOKEN));
    assert_eq!(state.user.unwrap().email, "ana@example.com");
    assert_eq!(h.stored_token().as_deref(), Some(GOOD_TOKEN));
}

#[tokio::test]
async fn login_with_rejected_token_clears_storage() {
    let h = Harness::new().await;

    h.store.login("stale-token").await.unwrap();

    assert_eq!(h.store.get(), AuthState::logged_out());
    assert_eq!(h.stored_token(), None);
}

#[tokio::test]
async fn unparsable_user_logs_out_but_keeps_token() {
    let h = Harness::new().await;

    h.store.login(BROKEN_JSON_TOKEN).await.unwrap();

    assert_eq!(h.store.get(), AuthState::logged_out());
    assert_eq!(h.stored_token().as_deref(), Some(BROKEN_JSON_TOKEN));
}

#[tokio::test]
async fn unreachable_backend_logs_out_but_keeps_token() {
    let h = Harness::with_base_url(closed_address().await, Backend::default());

    h.store.login(GOOD_TOKEN).await.unwrap();

    assert_eq!(h.store.get(), AuthState::logged_out());
    assert_eq!(h.stored_token().as_deref(), Some(GOOD_TOKEN));
}

#[tokio::test]
async fn initialize_restores_stored_session() {
    let h = Harness::new().await;
    h.store.storage().save(GOOD_TOKEN).unwrap();

    h.store.initialize().await;

    let state = h.store.get();
    assert_eq!(state.phase(), AuthPhase::Authenticated);
    assert_eq!(state.token.as_deref(), Some(GOOD_TOKEN));
    assert_eq!(h.me_hits(), 1);
}

#[tokio::test]
async fn initialize_without_token_makes_no_request() {
    let h = Harness::new().await;

    h.store.initialize().await;

    assert_eq!(h.store.get(), AuthState::logged_out());
    assert_eq!(h.me_hits(), 0);
}

#[tokio::test]
async fn initialize_with_corrupt_storage_is_logged_out() {
    let h = Harness::new().await;
    if let TokenStorage::File(path) = h.store.storage() {
        std::fs::write(path, "{not json").unwrap();
    }

    h.store.initialize().await;

    assert_eq!(h.store.get(), AuthState::logged_out());
    assert_eq!(h.me_hits(), 0);
}

#[tokio::test]
async fn logout_clears_storage_and_resets_state() {
    let h = Harness::new().await;
    h.store.login(GOOD_TOKEN).await.unwrap();
    let mut rx = h.store.subscribe();
    rx.mark_unchanged();

    h.store.logout().unwrap();

    assert!(rx.has_changed().unwrap());
    assert_eq!(*rx.borrow_and_update(), AuthState::logged_out());
    assert_eq!(h.stored_token(), None);
}

#[tokio::test]
async fn subscriber_observes_login_result() {
    let h = Harness::new().await;
    let mut rx = h.store.subscribe();
    assert!(rx.borrow_and_update().loading);

    h.store.login(GOOD_TOKEN).await.unwrap();

    rx.changed().await.unwrap();
    let state = rx.borrow_and_update().clone();
    assert_eq!(state.phase(), AuthPhase::Authenticated);
}

#[tokio::test]
async fn login_storage_failure_changes_nothing() {
    // The token directory would have to be created under a regular file
    let h = Harness::with_storage(|dir| {
        let blocker = dir.join("blocker");
        std::fs::write(&blocker, "").unwrap();
        TokenStorage::file_in(blocker.join("sub"))
    })
    .await;
    h.store.initialize().await;
    let before = h.store.get();

    let err = h.store.login(GOOD_TOKEN).await.unwrap_err();

    assert!(format!("{:#}", err).contains("Failed to create token directory"));
    assert_eq!(h.store.get(), before);
    assert_eq!(h.me_hits(), 0);
}

#[tokio::test]
async fn logout_storage_failure_still_resets_state() {
    let h = Harness::new().await;
    h.store.login(GOOD_TOKEN).await.unwrap();
    let TokenStorage::File(path) = h.store.storage() else {
        panic!("harness uses file storage");
    };
    // A directory where the token file was cannot be removed with remove_file
    std::fs::remove_file(path).unwrap();
    std::fs::create_dir(path).unwrap();

    let err = h.store.logout().unwrap_err();

    assert!(format!("{:#}", err).contains("Failed to remove token file"));
    assert_eq!(h.store.get(), AuthState::logged_out());
}

#[tokio::test]
async fn loading_window_is_published_before_user_arrives() {
    let h = Harness::new().await;
    h.store.initialize().await;
    let mut rx = h.store.subscribe();

    let store = h.store.clone();
    let login = tokio::spawn(async move { store.login(SLOW_TOKEN).await });

    let loading = rx
        .wait_for(|state| state.is_authenticated && state.loading)
        .await
        .unwrap()
        .clone();
    assert_eq!(loading.phase(), AuthPhase::Loading);
    assert_eq!(loading.token.as_deref(), Some(SLOW_TOKEN));
    assert!(loading.user.is_none());

    h.backend.release.notify_one();
    login.await.unwrap().unwrap();

    let state = h.store.get();
    assert_eq!(state.phase(), AuthPhase::Authenticated);
    assert_eq!(state.user.unwrap().email, "ana@example.com");
}

// ============================================================================
// ApiClient::request
// ============================================================================

async fn echoed(client: &ApiClient, options: RequestOptions) -> Value {
    let response = client
        .request(Method::POST, "/echo", options)
        .await
        .unwrap();
    assert!(response.status().is_success());
    response.json().await.unwrap()
}

#[tokio::test]
async fn request_without_token_sends_no_authorization() {
    let h = Harness::new().await;
    h.store.initialize().await;
    let client = ApiClient::new(h.store.clone());

    let seen = echoed(&client, RequestOptions::default()).await;

    assert_eq!(seen["authorization"], Value::Null);
    assert_eq!(seen["content_type"], "application/json");
}

#[tokio::test]
async fn request_attaches_bearer_token() {
    let h = Harness::new().await;
    h.store.login(GOOD_TOKEN).await.unwrap();
    let client = ApiClient::new(h.store.clone());

    let mut options = RequestOptions::json(&json!({"mileage": 1})).unwrap();
    options
        .headers
        .insert(reqwest::header::AUTHORIZATION, HeaderValue::from_static("Bearer caller"));
    let seen = echoed(&client, options).await;

    assert_eq!(seen["authorization"], "Bearer good-token");
    assert_eq!(seen["body"], r#"{"mileage":1}"#);
}

#[tokio::test]
async fn request_keeps_caller_content_type() {
    let h = Harness::new().await;
    let client = ApiClient::new(h.store.clone());

    let mut options = RequestOptions {
        body: Some("plain".to_string()),
        ..Default::default()
    };
    options
        .headers
        .insert(reqwest::header::CONTENT_TYPE, HeaderValue::from_static("text/plain"));
    let seen = echoed(&client, options).await;

    assert_eq!(seen["content_type"], "text/plain");
}

#[tokio::test]
async fn unauthorized_response_triggers_logout() {
    let h = Harness::new().await;
    h.store.login(GOOD_TOKEN).await.unwrap();
    let client = ApiClient::new(h.store.clone());

    let response = client.get("/expired").await.unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::UNAUTHORIZED);
    assert_eq!(h.store.get(), AuthState::logged_out());
    assert_eq!(h.stored_token(), None);
}

#[tokio::test]
async fn other_error_statuses_leave_session_alone() {
    let h = Harness::new().await;
    h.store.login(GOOD_TOKEN).await.unwrap();
    let client = ApiClient::new(h.store.clone());

    let err = client.get_vehicle(404).await.unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ApiError>(),
        Some(ApiError::NotFound(m)) if m == "Vehicle not found"
    ));
    assert_eq!(h.store.get().phase(), AuthPhase::Authenticated);
}

#[tokio::test]
async fn transport_error_is_network_error() {
    let h = Harness::with_base_url(closed_address().await, Backend::default());
    let client = ApiClient::new(h.store.clone());

    let err = client.get("/health").await.unwrap_err();

    assert!(matches!(err.downcast_ref::<ApiError>(), Some(ApiError::Network(_))));
}

// ============================================================================
// Typed endpoints
// ============================================================================

#[tokio::test]
async fn password_login_then_list_vehicles() {
    let h = Harness::new().await;
    h.store.initialize().await;
    let client = ApiClient::new(h.store.clone());

    let token = client
        .authenticate("ana@example.com", "correct horse")
        .await
        .unwrap();
    h.store.login(token.access_token).await.unwrap();

    let vehicles = client.list_vehicles(0, 100).await.unwrap();
    assert_eq!(vehicles.len(), 1);
    assert_eq!(vehicles[0].display_name(), "Blue");

    let me = client.current_user().await.unwrap();
    assert_eq!(me.email, "ana@example.com");
}

#[tokio::test]
async fn wrong_password_does_not_touch_session() {
    let h = Harness::new().await;
    h.store.login(GOOD_TOKEN).await.unwrap();
    let client = ApiClient::new(h.store.clone());

    let err = client
        .authenticate("ana@example.com", "wrong")
        .await
        .unwrap_err();

    assert!(err.downcast_ref::<ApiError>().unwrap().is_unauthorized());
    assert_eq!(h.store.get().phase(), AuthPhase::Authenticated);
    assert_eq!(h.stored_token().as_deref(), Some(GOOD_TOKEN));
}

#[tokio::test]
async fn health_check() {
    let h = Harness::new().await;
    let client = ApiClient::new(h.store.clone());

    assert!(client.health().await.unwrap().is_healthy());
}

#[tokio::test]
async fn predictions_save_history_stats_and_lookup() {
    let h = Harness::new().await;
    h.store.login(GOOD_TOKEN).await.unwrap();
    let client = ApiClient::new(h.store.clone());

    let car = CarData {
        make: "Honda".to_string(),
        model: "Civic".to_string(),
        year: 2016,
        mileage: 120000.0,
        last_service_date: "2024-01-15".to_string(),
        engine_size: 1.5,
        transmission: "Manual".to_string(),
        fuel_type: "Petrol".to_string(),
    };
    let prediction = PredictionResponse {
        service_needed: true,
        confidence: 0.82,
        estimated_days_until_service: 12,
        recommended_services: vec!["Oil Change".to_string()],
        risk_level: "High".to_string(),
    };
    let record = NewPredictionRecord::from_prediction(Some(3), &car, &prediction).unwrap();

    let saved = client.save_prediction(&record).await.unwrap();
    assert_eq!(saved.id, 11);
    assert_eq!(saved.vehicle_id, Some(3));
    assert_eq!(saved.services(), vec!["Oil Change".to_string()]);

    let history = client.prediction_history(0, 50, Some(3)).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].vehicle_id, Some(3));
    let unfiltered = client.prediction_history(0, 50, None).await.unwrap();
    assert_eq!(unfiltered[0].vehicle_id, None);

    let stats = client.prediction_stats().await.unwrap();
    assert_eq!(stats.total_predictions, 4);
    assert_eq!(stats.upcoming_services, 1);

    let one = client.get_prediction(11).await.unwrap();
    assert_eq!(one.services().len(), 2);
    let err = client.get_prediction(12).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ApiError>(),
        Some(ApiError::NotFound(m)) if m == "Prediction not found"
    ));
}

#[tokio::test]
async fn service_records_create_list_get_delete() {
    let h = Harness::new().await;
    h.store.login(GOOD_TOKEN).await.unwrap();
    let client = ApiClient::new(h.store.clone());

    let new = NewServiceRecord {
        vehicle_id: Some(3),
        service_type: "Oil Change".to_string(),
        service_date: "2024-05-01T00:00:00".to_string(),
        cost: Some(89.5),
        ..Default::default()
    };
    let created = client.create_service_record(&new).await.unwrap();
    assert_eq!(created.id, 7);
    assert_eq!(created.cost, Some(89.5));
    assert_eq!(created.notes, None);

    let listed = client.list_service_records(0, 100, Some(3)).await.unwrap();
    assert_eq!(listed[0].vehicle_id, Some(3));

    let fetched = client.get_service_record(7).await.unwrap();
    assert_eq!(fetched.service_type, "Oil Change");

    client.delete_service_record(7).await.unwrap();
    let err = client.delete_service_record(8).await.unwrap_err();
    assert!(matches!(err.downcast_ref::<ApiError>(), Some(ApiError::NotFound(_))));
    assert_eq!(h.store.get().phase(), AuthPhase::Authenticated);
}

#[tokio::test]
async fn catalog_reads_are_public_and_edits_need_superuser() {
    let h = Harness::new().await;
    h.store.initialize().await;
    let client = ApiClient::new(h.store.clone());

    let makes = client.list_makes().await.unwrap();
    assert_eq!(makes[0].name, "Toyota");
    assert_eq!(makes[0].models[0].name, "Corolla");
    let models = client.list_models_for_make(1).await.unwrap();
    assert_eq!(models.len(), 1);
    assert!(client.list_models_for_make(9).await.unwrap().is_empty());

    h.store.login(GOOD_TOKEN).await.unwrap();
    let err = client.create_make("Mazda").await.unwrap_err();
    assert!(matches!(err.downcast_ref::<ApiError>(), Some(ApiError::AccessDenied(_))));
    // 403 is not 401: the session survives
    assert_eq!(h.store.get().phase(), AuthPhase::Authenticated);

    h.store.login(ADMIN_TOKEN).await.unwrap();
    assert!(h.store.get().is_superuser());
    let make = client.create_make("Mazda").await.unwrap();
    assert_eq!((make.id, make.name.as_str()), (2, "Mazda"));
    let model = client.create_model(make.id, "MX-5").await.unwrap();
    assert_eq!(model.make_id, 2);
    client.delete_model(model.id).await.unwrap();
    client.delete_make(make.id).await.unwrap();

    let err = client.delete_make(42).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ApiError>(),
        Some(ApiError::NotFound(m)) if m == "Make not found"
    ));
}
