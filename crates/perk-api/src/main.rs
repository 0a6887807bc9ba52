//! perk-api server binary
//!
//! Loads configuration from the environment (a `.env` file is honored),
//! installs the tracing subscriber and runs the HTTP server until it exits.

use perk_common::{try_init_tracing, AppConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = try_init_tracing() {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Failed to load configuration");
            std::process::exit(1);
        }
    };

    info!(
        env = ?config.app.env,
        address = %config.api.address(),
        "Starting loyalty check-in server"
    );

    if let Err(e) = perk_api::run(config).await {
        error!(error = %e, "Server exited with error");
        std::process::exit(1);
    }
}
