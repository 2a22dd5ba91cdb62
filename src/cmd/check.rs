use anyhow::{bail, Result};
use async_trait::async_trait;
use authclient::api::factory::AuthClientFactory;
use authclient::jwt::token_state;
use authclient::logs::{ErrorLogger, LogErrorLogger};
use authclient::time::current_millis;
use clap::Args;

use super::{display_json, ConfigArgs, RunCommand};

/// Decode a token (without verifying its signature) and report whether it has expired.
/// Exits with failure when the token is expired or cannot be decoded.
#[derive(Args)]
pub struct CheckTokenArgs {
    /// The token to check. Default is the token stored in the auth cookie.
    pub token: Option<String>,

    #[command(flatten)]
    pub config: ConfigArgs,
}

#[async_trait]
impl RunCommand for CheckTokenArgs {
    async fn run(&self) -> Result<()> {
        let token = match self.token {
            Some(ref token) => token.clone(),
            None => {
                let ps = self.config.build_path_set()?;
                let client = AuthClientFactory::load(&ps)?.build_client();
                match client.auth_token() {
                    Some(token) => token,
                    None => bail!("no token given and no auth cookie stored, please login first"),
                }
            }
        };

        let state = match token_state(&token, current_millis()) {
            Ok(state) => state,
            Err(err) => {
                LogErrorLogger.log_token_error(&err);
                bail!("token is invalid");
            }
        };

        display_json(state)?;
        if state.is_expired() {
            bail!("token is expired");
        }
        Ok(())
    }
}
