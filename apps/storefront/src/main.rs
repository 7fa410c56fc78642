//! # RocketShoes CLI Entry Point
//!
//! Runs one cart command, prints the cart as JSON on stdout and any
//! shopper-facing messages on stderr.
//!
//! ## Exit Status
//! - `0` - the command succeeded (or was ignored)
//! - `1` - configuration, startup or cart operation failed

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use rocketshoes_storefront::cli::Cli;
use rocketshoes_storefront::commands::{self, CartResponse};
use rocketshoes_storefront::services::ChannelNotifier;
use rocketshoes_storefront::{build_store, init_tracing, StorefrontConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let config = match StorefrontConfig::load(cli.config) {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Failed to load configuration");
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let (notifier, mut toasts) = ChannelNotifier::new();
    let store = match build_store(&config, Arc::new(notifier)).await {
        Ok(store) => store,
        Err(e) => {
            error!(error = %e, "Failed to start storefront");
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = cli.command.execute(&store).await;

    while let Ok(message) = toasts.try_recv() {
        eprintln!("{}", message);
    }

    let (response, status) = match result {
        Ok(response) => (response, ExitCode::SUCCESS),
        Err(e) => {
            info!(code = ?e.code, "Cart command failed");
            (commands::get_cart(&store), ExitCode::FAILURE)
        }
    };

    if let Err(e) = print_json(&response) {
        error!(error = %e, "Failed to encode cart");
        return ExitCode::FAILURE;
    }

    status
}

fn print_json(response: &CartResponse) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(response)?);
    Ok(())
}
