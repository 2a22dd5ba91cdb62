use std::sync::Arc;

use anyhow::Result;

use crate::config::{CommonConfig, PathSet};
use crate::cookie::file::FileCookieStore;
use crate::cookie::CookieStore;

use super::auth::AuthClient;
use super::config::ClientConfig;
use super::transport::ReqwestTransport;

pub struct AuthClientFactory {
    cfg: ClientConfig,
}

impl AuthClientFactory {
    pub fn new(cfg: ClientConfig) -> Self {
        Self { cfg }
    }

    pub fn load(ps: &PathSet) -> Result<Self> {
        let cfg = ps.load_config("client", ClientConfig::default)?;
        Ok(Self { cfg })
    }

    pub fn build_cookie_store(&self) -> Arc<dyn CookieStore> {
        Arc::new(FileCookieStore::new(self.cfg.cookie_path.clone()))
    }

    pub fn build_client(&self) -> AuthClient {
        let cookies = self.build_cookie_store();
        let transport = Arc::new(ReqwestTransport::new(cookies.clone()));
        AuthClient::new(transport, cookies)
            .with_base_url(self.cfg.base_url.clone())
            .with_cookie_name(self.cfg.cookie_name.clone())
    }
}
