use anyhow::Result;
use async_trait::async_trait;
use authclient::api::config::ClientConfig;
use authclient::config::CommonConfig;
use clap::Args;

use super::{display_json, ConfigArgs, RunCommand};

/// Display the configuration used, in JSON format.
#[derive(Args)]
pub struct ShowConfigArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
}

#[async_trait]
impl RunCommand for ShowConfigArgs {
    async fn run(&self) -> Result<()> {
        let ps = self.config.build_path_set()?;
        let cfg = ps.load_config("client", ClientConfig::default)?;
        display_json(cfg)
    }
}
