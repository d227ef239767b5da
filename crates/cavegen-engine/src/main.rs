//! # Cavegen Engine
//!
//! Headless entry point for cavegen: loads a pipeline configuration,
//! generates one cave map and logs the result.
//!
//! Usage: `cavegen [config.toml]`. A missing config file is created with
//! the default settings.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

mod app;
mod config;

use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::EngineConfig;

/// Main entry point.
fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("cavegen=info".parse()?))
        .init();

    info!("Cavegen starting...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let path = EngineConfig::resolve_path(std::env::args().nth(1));
    let mut config = EngineConfig::load_from(&path);
    if !path.exists() {
        if let Err(e) = config.save_to(&path) {
            warn!("Failed to write default config: {e}");
        }
    }
    config.validate();

    app::run(&config)?;

    info!("Cavegen finished");
    Ok(())
}
