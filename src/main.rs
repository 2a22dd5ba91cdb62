mod cmd;

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;

use crate::cmd::App;

#[tokio::main]
async fn main() -> ExitCode {
    let app = App::parse();
    if let Err(err) = authclient::logs::init(&app.log_level) {
        _ = writeln!(io::stderr(), "Fatal: {:#}", err);
        return ExitCode::FAILURE;
    }

    match app.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            _ = writeln!(io::stderr(), "Fatal: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
