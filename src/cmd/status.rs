use anyhow::Result;
use async_trait::async_trait;
use authclient::api::factory::AuthClientFactory;
use authclient::time::current_millis;
use clap::Args;
use serde_json::json;

use super::{display_json, ConfigArgs, RunCommand};

/// Show whether the auth cookie is present, and the state of the token it holds.
#[derive(Args)]
pub struct StatusArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
}

#[async_trait]
impl RunCommand for StatusArgs {
    async fn run(&self) -> Result<()> {
        let ps = self.config.build_path_set()?;
        let client = AuthClientFactory::load(&ps)?.build_client();

        display_json(json!({
            "server": client.base_url(),
            "logged_in": client.is_user_logged_in(),
            "session": client.session_state(current_millis()),
        }))
    }
}
