use anyhow::{Context, Result};
use async_trait::async_trait;
use authclient::api::factory::AuthClientFactory;
use clap::Args;
use log::{info, warn};
use serde_json::Value;

use super::{display_json, ConfigArgs, PayloadArgs, RunCommand};

/// Login with the given credentials. Cookies set by the server (including the auth
/// token) are saved to the cookie file.
#[derive(Args)]
pub struct LoginArgs {
    #[command(flatten)]
    pub payload: PayloadArgs,

    #[command(flatten)]
    pub config: ConfigArgs,
}

#[async_trait]
impl RunCommand for LoginArgs {
    async fn run(&self) -> Result<()> {
        let data = self.payload.read_payload()?;

        let ps = self.config.build_path_set()?;
        let client = AuthClientFactory::load(&ps)?.build_client();

        let resp: Value = client.login_user(&data).await.context("login")?;
        if client.is_user_logged_in() {
            info!("Login success, auth cookie saved");
        } else {
            warn!("Server accepted the login but did not set the auth cookie");
        }
        display_json(resp)
    }
}
