mod check;
mod config;
mod login;
mod register;
mod status;

use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use authclient::config::PathSet;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use serde_json::Value;

/// Command line client for the authentication API.
#[derive(Parser)]
#[command(author, version, about)]
pub struct App {
    #[command(subcommand)]
    pub commands: Commands,

    /// Log level: error, warn, info or debug.
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,
}

#[derive(Subcommand)]
pub enum Commands {
    CheckToken(check::CheckTokenArgs),
    Status(status::StatusArgs),
    Register(register::RegisterArgs),
    Login(login::LoginArgs),
    Config(config::ShowConfigArgs),
}

impl App {
    pub async fn run(&self) -> Result<()> {
        match &self.commands {
            Commands::CheckToken(args) => args.run().await,
            Commands::Status(args) => args.run().await,
            Commands::Register(args) => args.run().await,
            Commands::Login(args) => args.run().await,
            Commands::Config(args) => args.run().await,
        }
    }
}

#[async_trait]
pub trait RunCommand {
    async fn run(&self) -> Result<()>;
}

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    /// The config directory. Default is `~/.config/authclient`.
    #[arg(long)]
    pub config_dir: Option<PathBuf>,

    /// The data directory, holding the cookie file. Default is
    /// `~/.local/share/authclient`.
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
}

impl ConfigArgs {
    pub fn build_path_set(&self) -> Result<PathSet> {
        PathSet::new(self.config_dir.clone(), self.data_dir.clone())
    }
}

#[derive(Args, Debug, Clone)]
pub struct PayloadArgs {
    /// JSON request body. Read from stdin when omitted.
    #[arg(long, short)]
    pub data: Option<String>,
}

impl PayloadArgs {
    pub fn read_payload(&self) -> Result<Value> {
        let text = match self.data {
            Some(ref data) => data.clone(),
            None => {
                let mut buf = String::new();
                io::stdin()
                    .lock()
                    .read_to_string(&mut buf)
                    .context("read request body from stdin")?;
                buf
            }
        };

        if text.trim().is_empty() {
            bail!("request body is empty, use `--data` or pipe JSON to stdin");
        }
        let value: Value = serde_json::from_str(&text).context("parse request body json")?;
        if !value.is_object() {
            bail!("request body should be a JSON object");
        }
        Ok(value)
    }
}

pub fn display_json<T: Serialize>(o: T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&o)?);
    Ok(())
}
