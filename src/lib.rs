pub mod error;
pub mod models;
pub mod modules;
pub mod proxy; // Gateway service module
pub mod utils;

use std::sync::Arc;

use error::{AppError, AppResult};
use modules::logger;
use proxy::diagnostics::TracingSink;
use proxy::upstream::UpstreamClient;
use proxy::{AxumServer, Forwarder};
use tracing::{error, info};

/// Load config, start the gateway and serve until Ctrl-C.
pub async fn run() -> AppResult<()> {
    logger::init_logger();

    let config = modules::config::load_app_config().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;
    let gateway = config.gateway;

    let upstream = Arc::new(UpstreamClient::new(
        gateway.request_timeout,
        Some(gateway.upstream_proxy.clone()),
    ));
    let forwarder = Forwarder::from_config(&gateway, upstream, Arc::new(TracingSink))
        .map_err(AppError::Config)?;

    info!(
        "Forwarding to upstream {} (timeout {}s)",
        gateway.upstream_base_url, gateway.request_timeout
    );

    let (server, handle) = AxumServer::start(
        gateway.get_bind_address().to_string(),
        gateway.port,
        Arc::new(forwarder),
        gateway.max_body_bytes,
    )
    .await
    .map_err(AppError::Server)?;

    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received");

    server.stop();
    handle
        .await
        .map_err(|e| AppError::Unknown(format!("Server task failed: {}", e)))?;

    Ok(())
}
