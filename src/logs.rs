use std::io::{self, IsTerminal};

use anyhow::{bail, Context, Result};
use fern::colors::{Color, ColoredLevelConfig};
use log::{error, LevelFilter};

use crate::api::ApiError;
use crate::jwt::TokenError;

pub fn init(level: &str) -> Result<()> {
    let level = match level {
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        _ => bail!("unknown log level '{}'", level),
    };

    let is_terminal = io::stderr().is_terminal();

    let colors = ColoredLevelConfig::new()
        .info(Color::Green)
        .debug(Color::Magenta);

    fern::Dispatch::new()
        .format(move |out, message, record| {
            if is_terminal {
                out.finish(format_args!(
                    "{} [{}] {}",
                    humantime::format_rfc3339_millis(std::time::SystemTime::now()),
                    colors.color(record.level()),
                    message
                ))
            } else {
                out.finish(format_args!(
                    "{} [{}] {}",
                    humantime::format_rfc3339_millis(std::time::SystemTime::now()),
                    record.level(),
                    message
                ))
            }
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()
        .context("init logger")?;

    Ok(())
}

/// Sink for failures that are reported for diagnostics. Token decode failures are
/// reported and then swallowed; API failures are reported and then returned to the
/// caller.
pub trait ErrorLogger: Send + Sync {
    fn log_api_error(&self, err: &ApiError);
    fn log_token_error(&self, err: &TokenError);
}

/// Writes failures to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogErrorLogger;

impl ErrorLogger for LogErrorLogger {
    fn log_api_error(&self, err: &ApiError) {
        match err {
            ApiError::Status { status, body } => {
                error!("API responded with status {status}: {body}")
            }
            ApiError::Network(err) => {
                error!("API request failed, no response received: {err:#}")
            }
            ApiError::Encode(err) => error!("API request was not sent: {err}"),
            ApiError::Decode(err) => error!("API response could not be parsed: {err}"),
        }
    }

    fn log_token_error(&self, err: &TokenError) {
        error!("Error decoding token: {err}");
    }
}
