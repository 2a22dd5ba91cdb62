use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use authclient::api::auth::AuthClient;
use authclient::api::{ApiError, HttpTransport};
use authclient::cookie::memory::MemoryCookieStore;
use authclient::cookie::CookieStore;
use authclient::jwt::TokenError;
use authclient::logs::ErrorLogger;

/// Transport double returning one prepared outcome per call.
struct MockTransport {
    outcomes: Mutex<Vec<Result<Value, ApiError>>>,
    urls: Mutex<Vec<String>>,
}

impl MockTransport {
    fn new(outcomes: Vec<Result<Value, ApiError>>) -> Arc<Self> {
        Arc::new(Self {
            outcomes: Mutex::new(outcomes),
            urls: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn post_json(&self, url: &str, _body: Value) -> Result<Value, ApiError> {
        self.urls.lock().unwrap().push(url.to_string());
        self.outcomes.lock().unwrap().remove(0)
    }
}

#[derive(Default)]
struct RecordingLogger {
    api_errors: Mutex<Vec<String>>,
    token_errors: AtomicUsize,
}

impl ErrorLogger for RecordingLogger {
    fn log_api_error(&self, err: &ApiError) {
        self.api_errors.lock().unwrap().push(err.to_string());
    }

    fn log_token_error(&self, _err: &TokenError) {
        self.token_errors.fetch_add(1, Ordering::SeqCst);
    }
}

fn build_client(transport: Arc<MockTransport>) -> (AuthClient, Arc<RecordingLogger>) {
    let logger = Arc::new(RecordingLogger::default());
    let client = AuthClient::new(transport, Arc::new(MemoryCookieStore::new()))
        .with_logger(logger.clone());
    (client, logger)
}

#[tokio::test]
async fn register_and_login_return_body() {
    let transport = MockTransport::new(vec![Ok(json!({"id": 1})), Ok(json!({"id": 1}))]);
    let (client, logger) = build_client(transport.clone());

    let registered: Value = client
        .register_user(&json!({"username": "alice", "password": "pw"}))
        .await
        .unwrap();
    assert_eq!(registered, json!({"id": 1}));

    let logged_in: Value = client
        .login_user(&json!({"username": "alice", "password": "pw"}))
        .await
        .unwrap();
    assert_eq!(logged_in, json!({"id": 1}));

    assert!(logger.api_errors.lock().unwrap().is_empty());
    assert_eq!(
        *transport.urls.lock().unwrap(),
        vec![
            String::from("http://localhost:5255/api/auth/register"),
            String::from("http://localhost:5255/api/auth/login"),
        ]
    );
}

#[tokio::test]
async fn register_failure_logged_once_and_returned() {
    let transport = MockTransport::new(vec![Err(ApiError::Status {
        status: 409,
        body: String::from("{\"message\":\"user already exists\"}"),
    })]);
    let (client, logger) = build_client(transport);

    let result: Result<Value, ApiError> = client
        .register_user(&json!({"username": "alice", "password": "pw"}))
        .await;

    match result {
        Err(ApiError::Status { status, body }) => {
            assert_eq!(status, 409);
            assert_eq!(body, "{\"message\":\"user already exists\"}");
        }
        other => panic!("unexpected result: {other:?}"),
    }

    let logged = logger.api_errors.lock().unwrap();
    assert_eq!(logged.len(), 1);
    assert_eq!(
        logged[0],
        "Server error: status 409, {\"message\":\"user already exists\"}"
    );
    assert_eq!(logger.token_errors.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn login_network_failure_logged_once_and_returned() {
    let transport = MockTransport::new(vec![Err(ApiError::Network(anyhow::anyhow!(
        "connection refused"
    )))]);
    let (client, logger) = build_client(transport);

    let result: Result<Value, ApiError> = client
        .login_user(&json!({"username": "alice", "password": "wrong"}))
        .await;

    match result {
        Err(ApiError::Network(err)) => assert_eq!(err.to_string(), "connection refused"),
        other => panic!("unexpected result: {other:?}"),
    }
    assert_eq!(logger.api_errors.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn failures_do_not_poison_later_calls() {
    let transport = MockTransport::new(vec![
        Err(ApiError::Status {
            status: 401,
            body: String::from("invalid credentials"),
        }),
        Ok(json!({"id": 7})),
    ]);
    let (client, logger) = build_client(transport);

    let first: Result<Value, ApiError> = client.login_user(&json!({"password": "x"})).await;
    assert_eq!(first.unwrap_err().status(), Some(401));

    let second: Value = client.login_user(&json!({"password": "y"})).await.unwrap();
    assert_eq!(second, json!({"id": 7}));

    assert_eq!(logger.api_errors.lock().unwrap().len(), 1);
}

#[test]
fn login_state_follows_auth_cookie() {
    let transport = MockTransport::new(vec![]);
    let cookies = Arc::new(MemoryCookieStore::new());
    let client = AuthClient::new(transport, cookies.clone());
    assert!(!client.is_user_logged_in());

    cookies.set("AuthToken", "").unwrap();
    assert!(!client.is_user_logged_in());

    cookies.set("AuthToken", "header.payload.signature").unwrap();
    assert!(client.is_user_logged_in());

    cookies.remove("AuthToken").unwrap();
    assert!(!client.is_user_logged_in());
}
