//! Config check tool for the content-management server.
//!
//! Loads a config file through the same loader the server uses at
//! startup, reports validation errors, and prints the fully resolved
//! configuration (defaults applied). Run it after editing the config
//! and before restarting the server.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cms_config::config::loader::load_config;

#[derive(Parser)]
#[command(name = "cms-config")]
#[command(about = "Validate and print a content-management server config", long_about = None)]
struct Cli {
    /// Path to the TOML config file.
    config: PathBuf,

    /// Print the resolved configuration as JSON.
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cms_config=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = match load_config(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(path = %cli.config.display(), error = %e, "config check failed");
            return ExitCode::FAILURE;
        }
    };

    if cli.json {
        match serde_json::to_string_pretty(&config) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                tracing::error!(error = %e, "failed to serialize configuration");
                return ExitCode::FAILURE;
            }
        }
    } else {
        tracing::info!(
            one_click_instance = config.one_click_instance_enabled(),
            user_limit = config.one_click_instance_user_limit(),
            local_cache = ?config.local_cache_backend(),
            locking_cache = ?config.locking_cache_backend(),
            lock_host = %config.locking_cache_endpoint().host,
            lock_port = config.locking_cache_endpoint().port,
            unix_socket = config.locking_cache_endpoint().is_unix_socket(),
            logfile = %config.log_file_path().display(),
            logrotate_size = config.log_rotate_size_bytes(),
            "config check passed"
        );
    }

    ExitCode::SUCCESS
}
