//! Hackaday.io OAuth example server

use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, error};

use hackaday_oauth_example::{cli::Cli, config::Config, setup_tracing, web::Server};

#[tokio::main]
async fn main() -> ExitCode {
    // .env is optional; missing file is not an error
    let dotenv = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(e) = setup_tracing(&cli.log_level, cli.log_format.as_deref()) {
        eprintln!("Failed to setup tracing: {e}");
        return ExitCode::FAILURE;
    }

    if let Ok(path) = dotenv {
        debug!(path = %path.display(), "Loaded env file");
    }

    let mut config = match Config::load(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load config: {e}");
            return ExitCode::FAILURE;
        }
    };

    cli.apply_overrides(&mut config);

    if let Err(e) = config.validate() {
        error!("{e}");
        return ExitCode::FAILURE;
    }

    debug!(?config, "Effective configuration");

    match Server::new(config).run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Server error: {e}");
            ExitCode::FAILURE
        }
    }
}
