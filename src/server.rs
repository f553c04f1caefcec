use crate::config::Config;
use crate::core_network::network;
use anyhow::{Context, Result};
use log::{error, info};
use std::sync::Arc;

/// Runs the file transfer server until it is interrupted.
///
/// # Arguments
///
/// * `config` - The server configuration.
/// * `listen_port` - The control port to listen on.
///
/// # Returns
///
/// Result<(), anyhow::Error>; an error means the server could not start.
pub async fn run(config: Config, listen_port: u16) -> Result<()> {
    info!("Starting server with config: {:?}", config);
    log_config(&config);

    tokio::select! {
        result = network::start_server(listen_port, Arc::new(config)) => {
            if let Err(e) = &result {
                error!("Failed to start server: {:#}", e);
            }
            result
        }
        signal = tokio::signal::ctrl_c() => {
            signal.context("Failed to listen for the interrupt signal")?;
            info!("Interrupt received, shutting down.");
            Ok(())
        }
    }
}

// Helper function to log configuration options
fn log_config(config: &Config) {
    info!("  Bind Address: {}", config.server.bind_address);
    info!("  Root Directory: {}", config.server.root_dir.display());
    info!(
        "  Download Buffer Size: {} KB",
        config.download_buffer_size() / 1024
    );
}
