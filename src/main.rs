use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use scarlet::app::App;
use scarlet::cli::Args;
use scarlet::config;
use scarlet::logging::setup_logging;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Load config before App::new() so startup logs are never silently dropped.
    let config = match config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("failed to load config: {e:#}");
            return ExitCode::FAILURE;
        }
    };
    setup_logging(&config, args.tracing);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        commit = env!("GIT_COMMIT_SHORT"),
        environment = if cfg!(debug_assertions) {
            "development"
        } else {
            "production"
        },
        "starting scarlet"
    );

    let app = match App::new(config).await {
        Ok(app) => app,
        Err(e) => {
            error!(error = ?e, "failed to initialize application");
            return ExitCode::FAILURE;
        }
    };

    match app.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = ?e, "application exited with error");
            ExitCode::FAILURE
        }
    }
}
