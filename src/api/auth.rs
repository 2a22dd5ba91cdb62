use std::sync::Arc;

use log::{debug, info};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::cookie::CookieStore;
use crate::jwt::{token_state, TokenState};
use crate::logs::{ErrorLogger, LogErrorLogger};

use super::{join_url, ApiError, HttpTransport, AUTH_API_BASE_URL, AUTH_COOKIE_NAME};
use super::{LOGIN_PATH, REGISTER_PATH};

/// Client for the authentication API.
///
/// All collaborators are injected: the transport performs the HTTP calls, the cookie
/// store answers login-state questions and the error logger receives every failed
/// call exactly once before the error is handed back to the caller.
pub struct AuthClient {
    base_url: String,
    cookie_name: String,

    transport: Arc<dyn HttpTransport>,
    cookies: Arc<dyn CookieStore>,
    logger: Arc<dyn ErrorLogger>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionState {
    /// No auth cookie, or an empty one.
    LoggedOut,
    /// Auth cookie holds a token that has not expired yet.
    Active { expire_at: f64 },
    /// Auth cookie holds an expired or undecodable token.
    Expired,
}

impl AuthClient {
    pub fn new(transport: Arc<dyn HttpTransport>, cookies: Arc<dyn CookieStore>) -> Self {
        Self {
            base_url: String::from(AUTH_API_BASE_URL),
            cookie_name: String::from(AUTH_COOKIE_NAME),
            transport,
            cookies,
            logger: Arc::new(LogErrorLogger),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_cookie_name(mut self, cookie_name: impl Into<String>) -> Self {
        self.cookie_name = cookie_name.into();
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn ErrorLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Value of the auth cookie, `None` when it is absent or empty.
    pub fn auth_token(&self) -> Option<String> {
        self.cookies
            .get(&self.cookie_name)
            .filter(|value| !value.is_empty())
    }

    pub fn is_user_logged_in(&self) -> bool {
        self.auth_token().is_some()
    }

    /// Login state including the expiry of the token held in the auth cookie.
    pub fn session_state(&self, now_millis: i64) -> SessionState {
        let token = match self.auth_token() {
            Some(token) => token,
            None => return SessionState::LoggedOut,
        };

        match token_state(&token, now_millis) {
            Ok(TokenState::Fresh { expire_at }) => SessionState::Active { expire_at },
            Ok(TokenState::Expired { .. }) => SessionState::Expired,
            Err(err) => {
                self.logger.log_token_error(&err);
                SessionState::Expired
            }
        }
    }

    pub async fn register_user<D, R>(&self, data: &D) -> Result<R, ApiError>
    where
        D: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let resp = self.post(REGISTER_PATH, data).await?;
        info!("Register request accepted by auth server");
        Ok(resp)
    }

    pub async fn login_user<D, R>(&self, data: &D) -> Result<R, ApiError>
    where
        D: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let resp = self.post(LOGIN_PATH, data).await?;
        info!("Login request accepted by auth server");
        Ok(resp)
    }

    async fn post<D, R>(&self, path: &str, data: &D) -> Result<R, ApiError>
    where
        D: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let result = self.do_post(path, data).await;
        if let Err(ref err) = result {
            self.logger.log_api_error(err);
        }
        result
    }

    async fn do_post<D, R>(&self, path: &str, data: &D) -> Result<R, ApiError>
    where
        D: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = serde_json::to_value(data).map_err(ApiError::Encode)?;
        let url = join_url(&self.base_url, path);
        debug!("Post auth request to {url}");

        let resp = self.transport.post_json(&url, body).await?;
        serde_json::from_value(resp).map_err(ApiError::Decode)
    }
}
