pub mod auth;
pub mod config;
pub mod factory;
pub mod transport;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

pub const AUTH_API_BASE_URL: &str = "http://localhost:5255/api/auth";
pub const AUTH_COOKIE_NAME: &str = "AuthToken";

pub const REGISTER_PATH: &str = "register";
pub const LOGIN_PATH: &str = "login";

pub const HEADER_ACCEPT: &str = "Accept";
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
pub const HEADER_COOKIE: &str = "Cookie";
pub const HEADER_SET_COOKIE: &str = "Set-Cookie";
pub const MIME_JSON: &str = "application/json";

/// Error types that can occur during auth API requests
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Encode request body failed: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Network error: {0:#}")]
    Network(#[from] anyhow::Error),

    #[error("Server error: status {status}, {body}")]
    Status { status: u16, body: String },

    #[error("Server returned invalid json: {0}")]
    Decode(#[source] serde_json::Error),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// One-shot JSON transport used by the auth client. Implementations send the cookies
/// they know about with every request and remember the ones the server sets.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn post_json(&self, url: &str, body: Value) -> Result<Value, ApiError>;
}

/// Joins the API base url and an endpoint path with exactly one slash.
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url() {
        assert_eq!(
            join_url(AUTH_API_BASE_URL, REGISTER_PATH),
            "http://localhost:5255/api/auth/register"
        );
        assert_eq!(
            join_url("http://127.0.0.1:8080/api/auth/", "/login"),
            "http://127.0.0.1:8080/api/auth/login"
        );
    }

    #[test]
    fn test_status() {
        let err = ApiError::Status {
            status: 409,
            body: String::from("user exists"),
        };
        assert_eq!(err.status(), Some(409));
        assert_eq!(err.to_string(), "Server error: status 409, user exists");

        let err = ApiError::Network(anyhow::anyhow!("connection refused"));
        assert_eq!(err.status(), None);
    }
}
