use anyhow::{Context, Result};
use async_trait::async_trait;
use authclient::api::factory::AuthClientFactory;
use clap::Args;
use serde_json::Value;

use super::{display_json, ConfigArgs, PayloadArgs, RunCommand};

/// Register a new account. The JSON body is sent as is, for example
/// `--data '{"username": "alice", "email": "alice@example.com", "password": "..."}'`.
#[derive(Args)]
pub struct RegisterArgs {
    #[command(flatten)]
    pub payload: PayloadArgs,

    #[command(flatten)]
    pub config: ConfigArgs,
}

#[async_trait]
impl RunCommand for RegisterArgs {
    async fn run(&self) -> Result<()> {
        let data = self.payload.read_payload()?;

        let ps = self.config.build_path_set()?;
        let client = AuthClientFactory::load(&ps)?.build_client();

        let resp: Value = client.register_user(&data).await.context("register")?;
        display_json(resp)
    }
}
