//! Main application entry point (server binary).
//!
//! This is a thin wrapper around the `gdoc_fields` library that handles:
//! - Environment variable loading (.env file)
//! - Command-line / environment configuration
//! - Logger initialization
//!
//! All request handling is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;

use gdoc_fields::{init_logger_with, start_server, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine; real environment variables still apply
    let _ = dotenvy::dotenv();

    let config = Config::parse();

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    start_server(config).await.context("Server terminated")
}
