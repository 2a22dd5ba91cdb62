use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Method;
use serde_json::Value;

use crate::cookie::CookieStore;

use super::{
    ApiError, HttpTransport, HEADER_ACCEPT, HEADER_CONTENT_TYPE, HEADER_COOKIE,
    HEADER_SET_COOKIE, MIME_JSON,
};

/// [`HttpTransport`] backed by reqwest. Cookies travel both ways through the
/// shared [`CookieStore`], like a browser request made with credentials included.
pub struct ReqwestTransport {
    client: reqwest::Client,
    cookies: Arc<dyn CookieStore>,
}

impl ReqwestTransport {
    pub fn new(cookies: Arc<dyn CookieStore>) -> Self {
        Self::with_client(reqwest::Client::new(), cookies)
    }

    pub fn with_client(client: reqwest::Client, cookies: Arc<dyn CookieStore>) -> Self {
        Self { client, cookies }
    }

    fn store_cookies(&self, resp: &reqwest::Response) {
        for value in resp.headers().get_all(HEADER_SET_COOKIE) {
            let header = match value.to_str() {
                Ok(header) => header,
                Err(_) => {
                    warn!("Ignore non-ascii Set-Cookie header from server");
                    continue;
                }
            };
            if let Err(err) = self.cookies.apply_set_cookie(header) {
                warn!("Save cookie from server failed: {err:#}");
            }
        }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn post_json(&self, url: &str, body: Value) -> Result<Value, ApiError> {
        let body = serde_json::to_vec(&body).map_err(ApiError::Encode)?;

        let mut req = self
            .client
            .request(Method::POST, url)
            .header(HEADER_CONTENT_TYPE, MIME_JSON)
            .header(HEADER_ACCEPT, MIME_JSON)
            .body(body);
        if let Some(cookie) = self.cookies.header_value() {
            req = req.header(HEADER_COOKIE, cookie);
        }

        let req = req.build().context("build auth request")?;
        debug!("Request auth server: {} {}", req.method(), req.url());

        let resp = self
            .client
            .execute(req)
            .await
            .context("send auth request")?;

        self.store_cookies(&resp);

        let status = resp.status();
        let text = resp.text().await.context("read response body")?;
        debug!("Auth server responded {status}, body size {}", text.len());

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(ApiError::Decode)
    }
}
