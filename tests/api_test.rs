//! Integration tests for API endpoints.
//!
//! These tests drive the full router against an in-memory directory, so
//! no AWS account is required.

use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::response::IntoResponse;
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

use password_admin::api::{create_router, AppState};
use password_admin::config::Config;
use password_admin::domain::{mask, UserAttribute, UserRecord};
use password_admin::errors::AppError;
use password_admin::infra::{Directory, DirectoryError, SetPasswordReceipt};
use password_admin::utils::logging;

const CPF: &str = "00062716506";

// =============================================================================
// In-memory Directory
// =============================================================================

#[derive(Clone)]
enum Outcome {
    Success,
    NotFound,
    Upstream(&'static str),
}

/// Directory double that records every call it receives
struct FakeDirectory {
    outcome: Outcome,
    fetch_calls: AtomicUsize,
    set_calls: Mutex<Vec<(String, String, String, bool)>>,
}

impl FakeDirectory {
    fn new(outcome: Outcome) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            fetch_calls: AtomicUsize::new(0),
            set_calls: Mutex::new(Vec::new()),
        })
    }

    fn fetch_count(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    fn set_calls(&self) -> Vec<(String, String, String, bool)> {
        self.set_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Directory for FakeDirectory {
    async fn fetch_user(
        &self,
        pool_id: &str,
        username: &str,
    ) -> Result<UserRecord, DirectoryError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        match &self.outcome {
            Outcome::Success => Ok(UserRecord {
                username: username.to_string(),
                enabled: true,
                status: "CONFIRMED".to_string(),
                attributes: vec![
                    UserAttribute::new("email", "ana@example.com"),
                    UserAttribute::new("custom:pool", pool_id),
                    UserAttribute::new("name", "Ana"),
                    UserAttribute::new("name", "Ana Souza"),
                ],
            }),
            Outcome::NotFound => Err(DirectoryError::UserNotFound),
            Outcome::Upstream(msg) => Err(DirectoryError::Upstream(msg.to_string())),
        }
    }

    async fn set_password(
        &self,
        pool_id: &str,
        username: &str,
        password: &str,
        permanent: bool,
    ) -> Result<SetPasswordReceipt, DirectoryError> {
        self.set_calls.lock().unwrap().push((
            pool_id.to_string(),
            username.to_string(),
            password.to_string(),
            permanent,
        ));
        match &self.outcome {
            Outcome::Upstream(msg) => Err(DirectoryError::Upstream(msg.to_string())),
            _ => Ok(SetPasswordReceipt {
                request_id: Some("3f1c9a2e-request".to_string()),
            }),
        }
    }
}

// =============================================================================
// Log Capture
// =============================================================================

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

struct CapturedWriter(Arc<Mutex<Vec<u8>>>);

impl io::Write for CapturedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedWriter;

    fn make_writer(&'a self) -> Self::Writer {
        CapturedWriter(self.0.clone())
    }
}

impl CapturedLogs {
    fn raw(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }

    fn lines(&self) -> Vec<Value> {
        self.raw()
            .lines()
            .map(|line| serde_json::from_str(line).expect("log line is JSON"))
            .collect()
    }

    fn event(&self, name: &str) -> Value {
        self.lines()
            .into_iter()
            .find(|line| line["event"] == name)
            .unwrap_or_else(|| panic!("no {name} event in logs:\n{}", self.raw()))
    }
}

// =============================================================================
// Test Helpers
// =============================================================================

fn config() -> Config {
    Config::from_vars([
        ("USER_POOL_ID_APP", "pool_app"),
        ("USER_POOL_ID_CORP", "pool_corp"),
        ("USER_POOL_ID_PARCERIAS", "pool_parcerias"),
    ])
    .unwrap()
}

fn app(directory: Arc<FakeDirectory>) -> Router {
    create_router(AppState::from_config(directory, config()))
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

async fn post(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn change_request(cpf: &str, change_pass: &str, application: &str) -> Value {
    json!({ "cpf": cpf, "change_pass": change_pass, "application": application })
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health() {
    let (status, body) = get(app(FakeDirectory::new(Outcome::Success)), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

// =============================================================================
// Get User
// =============================================================================

#[tokio::test]
async fn test_get_user_success() {
    let directory = FakeDirectory::new(Outcome::Success);
    let (status, body) = get(
        app(directory.clone()),
        &format!("/users/{CPF}?application=corp"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], CPF);
    assert_eq!(body["enabled"], true);
    assert_eq!(body["user_status"], "CONFIRMED");
    assert_eq!(body["user_attributes"]["email"], "ana@example.com");
    assert_eq!(body["user_attributes"]["custom:pool"], "pool_corp");
    assert_eq!(body["user_attributes"]["name"], "Ana Souza");
    assert_eq!(directory.fetch_count(), 1);
}

#[tokio::test]
async fn test_get_user_not_found() {
    let directory = FakeDirectory::new(Outcome::NotFound);
    let (status, body) = get(
        app(directory.clone()),
        &format!("/users/{CPF}?application=app"),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "USER_NOT_FOUND");
    assert_eq!(directory.fetch_count(), 1);
}

#[tokio::test]
async fn test_get_user_upstream_error_is_not_retried() {
    let directory =
        FakeDirectory::new(Outcome::Upstream("TooManyRequestsException: rate exceeded"));
    let (status, body) = get(
        app(directory.clone()),
        &format!("/users/{CPF}?application=parcerias"),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let message = body["error"]["message"].as_str().unwrap();
    assert!(message.contains("rate exceeded"), "message: {message}");
    assert_eq!(directory.fetch_count(), 1);
}

#[tokio::test]
async fn test_get_user_requires_known_application() {
    let directory = FakeDirectory::new(Outcome::Success);

    for uri in [
        format!("/users/{CPF}"),
        format!("/users/{CPF}?application="),
        format!("/users/{CPF}?application=vendas"),
        format!("/users/{CPF}?application=corporativo"),
    ] {
        let (status, body) = get(app(directory.clone()), &uri).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "uri: {uri}");
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }
    assert_eq!(directory.fetch_count(), 0);
}

// =============================================================================
// Change Password
// =============================================================================

#[tokio::test]
async fn test_change_password_for_app() {
    let logs = CapturedLogs::default();
    let _guard = tracing::subscriber::set_default(logging::json_subscriber(
        EnvFilter::new("info"),
        logs.clone(),
    ));

    let directory = FakeDirectory::new(Outcome::Success);
    let (status, body) = post(
        app(directory.clone()),
        &format!("/users/{CPF}"),
        change_request(CPF, "yes", "app"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], CPF);
    assert!(body["message"].as_str().unwrap().contains("successfully"));

    let password = body["new_password"].as_str().unwrap().to_string();
    assert_eq!(password.len(), 6);
    assert!(password.chars().all(|c| c.is_ascii_digit()));

    let calls = directory.set_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(
        calls[0],
        ("pool_app".to_string(), CPF.to_string(), password.clone(), true)
    );

    // no log field carries the raw password
    let masked = mask(&password);
    for line in logs.lines() {
        for (key, value) in line.as_object().unwrap() {
            assert_ne!(value.as_str(), Some(password.as_str()), "{key} leaks password");
        }
    }

    let received = logs.event("request_received");
    assert_eq!(received["logger"], "password-reset-api");
    assert_eq!(received["level"], "INFO");
    assert_eq!(received["username"], CPF);
    assert_eq!(received["application"], "app");
    assert!(received["payload"].as_str().unwrap().contains("change_pass: \"yes\""));
    assert!(received["timestamp"].as_str().is_some());

    let start = logs.event("password_reset_start");
    assert_eq!(start["logger"], "password-reset-directory");
    assert_eq!(start["user_pool_id"], "pool_app");
    assert_eq!(start["new_password_masked"], masked.as_str());

    let success = logs.event("password_reset_success");
    assert_eq!(success["request_id"], "3f1c9a2e-request");
    assert_eq!(success["new_password_masked"], masked.as_str());

    let returned = logs.event("password_returned_to_frontend");
    assert_eq!(returned["logger"], "password-reset-api");
    assert_eq!(returned["new_password_masked"], masked.as_str());
    assert!(returned["new_password_masked"].as_str().unwrap().ends_with("**"));
}

#[tokio::test]
async fn test_change_password_complex_never_logged() {
    let logs = CapturedLogs::default();
    let _guard = tracing::subscriber::set_default(logging::json_subscriber(
        EnvFilter::new("debug"),
        logs.clone(),
    ));

    let directory = FakeDirectory::new(Outcome::Success);
    let (status, body) = post(
        app(directory.clone()),
        &format!("/users/{CPF}"),
        change_request(CPF, "TRUE", "corp"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let password = body["new_password"].as_str().unwrap();
    assert_eq!(password.len(), 10);
    assert!(!logs.raw().contains(password));

    let calls = directory.set_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "pool_corp");
    assert!(calls[0].3, "password must be permanent");
}

#[tokio::test]
async fn test_every_log_line_names_its_logger() {
    let logs = CapturedLogs::default();
    let _guard = tracing::subscriber::set_default(logging::json_subscriber(
        EnvFilter::new("password_admin=debug"),
        logs.clone(),
    ));

    let config = Config::from_vars([
        ("USER_POOL_ID_APP", "pool_app"),
        ("USER_POOL_ID_CORP", "pool_corp"),
        ("USER_POOL_ID_PARCERIAS", "pool_parcerias"),
        ("CORS_ALLOWED_ORIGINS", "http://localhost:3000,bad\u{1}origin"),
    ])
    .unwrap();
    let directory = FakeDirectory::new(Outcome::Success);
    let router = create_router(AppState::from_config(directory, config));

    let (status, _) = post(
        router,
        &format!("/users/{CPF}"),
        change_request(CPF, "yes", "app"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let _ = AppError::internal("disk full").into_response();

    let lines = logs.lines();
    let messages: Vec<&str> = lines
        .iter()
        .filter_map(|line| line["message"].as_str())
        .collect();
    assert!(messages.iter().any(|m| m.starts_with("Ignoring invalid CORS origin")));
    assert!(messages.contains(&"Request started"));
    assert!(messages.contains(&"Request finished"));
    assert!(messages.contains(&"Internal error: disk full"));

    for line in &lines {
        let logger = line["logger"].as_str().unwrap_or_default();
        assert!(
            logger == "password-reset-api" || logger == "password-reset-directory",
            "line without logger: {line}"
        );
    }
}

#[tokio::test]
async fn test_change_password_username_mismatch() {
    let directory = FakeDirectory::new(Outcome::Success);
    let (status, body) = post(
        app(directory.clone()),
        "/users/12345678901",
        change_request("45678901234", "yes", "app"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
    assert!(directory.set_calls().is_empty());
}

#[tokio::test]
async fn test_change_password_not_confirmed() {
    let directory = FakeDirectory::new(Outcome::Success);

    for flag in ["no", "No", "", "nope"] {
        let (status, body) = post(
            app(directory.clone()),
            &format!("/users/{CPF}"),
            change_request(CPF, flag, "app"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "flag: {flag:?}");
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("not requested"));
    }
    assert!(directory.set_calls().is_empty());
}

#[tokio::test]
async fn test_change_password_cpf_length() {
    let directory = FakeDirectory::new(Outcome::Success);

    for cpf in ["0006271650", "000627165067"] {
        let (status, _) = post(
            app(directory.clone()),
            &format!("/users/{cpf}"),
            change_request(cpf, "yes", "app"),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "cpf: {cpf}");
    }
    assert!(directory.set_calls().is_empty());
}

#[tokio::test]
async fn test_change_password_unknown_application() {
    let directory = FakeDirectory::new(Outcome::Success);

    for application in ["marketing", "parceria", "APP"] {
        let (status, _) = post(
            app(directory.clone()),
            &format!("/users/{CPF}"),
            change_request(CPF, "yes", application),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "application: {application}");
    }
    assert!(directory.set_calls().is_empty());
}

#[tokio::test]
async fn test_change_password_malformed_body() {
    let request = Request::builder()
        .method("POST")
        .uri(format!("/users/{CPF}"))
        .header("content-type", "application/json")
        .body(Body::from("{\"cpf\": "))
        .unwrap();
    let (status, _) = send(app(FakeDirectory::new(Outcome::Success)), request).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_change_password_upstream_error_is_not_retried() {
    let directory = FakeDirectory::new(Outcome::Upstream("ServiceUnavailable: try again"));
    let (status, body) = post(
        app(directory.clone()),
        &format!("/users/{CPF}"),
        change_request(CPF, "y", "parcerias"),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("try again"));
    assert_eq!(directory.set_calls().len(), 1);
}

// =============================================================================
// Error Type Tests
// =============================================================================

#[tokio::test]
async fn test_app_error_status_codes() {
    let cases = [
        (AppError::validation("bad"), StatusCode::UNPROCESSABLE_ENTITY),
        (AppError::bad_request("bad"), StatusCode::BAD_REQUEST),
        (AppError::invalid_application("x"), StatusCode::BAD_REQUEST),
        (AppError::UserNotFound, StatusCode::NOT_FOUND),
        (AppError::Directory("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
        (AppError::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR),
    ];

    for (error, expected) in cases {
        assert_eq!(error.into_response().status(), expected);
    }
}

#[tokio::test]
async fn test_app_error_messages() {
    assert_eq!(
        AppError::invalid_application(" Vendas").user_message(),
        "Invalid application: \" Vendas\""
    );
    assert_eq!(
        AppError::Directory("AccessDenied".into()).user_message(),
        "Directory error: AccessDenied"
    );
    assert_eq!(
        AppError::internal("secret detail").user_message(),
        "An internal error occurred"
    );
}
