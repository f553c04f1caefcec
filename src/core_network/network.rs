use crate::config::Config;
use crate::core_network::control::handle_control_connection;
use crate::session::Session;
use anyhow::{Context, Result};
use log::{debug, error, info};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

/// Binds the control port and serves clients forever.
pub async fn start_server(listen_port: u16, config: Arc<Config>) -> Result<()> {
    let address = config.bind_address()?;
    let listener = TcpListener::bind((address, listen_port))
        .await
        .with_context(|| format!("Failed to bind control port {}:{}", address, listen_port))?;
    info!("Server listening on {}", listener.local_addr()?);

    serve(listener, config).await
}

/// Accepts control connections one at a time, serving each to completion
/// before the next accept. Session failures are logged and never end the loop.
pub async fn serve(listener: TcpListener, config: Arc<Config>) -> Result<()> {
    let port = listener.local_addr()?.port();

    loop {
        info!("Server open on {}", port);

        let (socket, addr) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                error!("Failed to accept control connection: {}", e);
                // Avoid spinning when the process is out of descriptors
                tokio::time::sleep(Duration::from_millis(100)).await;
                continue;
            }
        };

        let session = match Session::new(addr, &config) {
            Ok(session) => session,
            Err(e) => {
                error!("Failed to set up session for {}: {:#}", addr, e);
                continue;
            }
        };

        match handle_control_connection(socket, session).await {
            Ok(outcome) => debug!("Session with {} ended: {:?}", addr, outcome),
            Err(e) => error!("Session with {} aborted: {}", addr, e),
        }
        info!("Connection closed for {}", addr);
    }
}
