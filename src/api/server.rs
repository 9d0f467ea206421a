//! API Server
//!
//! Serves the bet endpoints and keeps the supply maintenance running
//! alongside until shutdown.

use super::{
    handlers::AppState,
    middleware::{create_cors_layer, request_id_middleware},
    routes::create_router,
};
use crate::{config::ApiConfig, context::GameContext, errors::LuckyPairResult, LuckyPairError};
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{info, warn};

pub struct ApiServer {
    config: ApiConfig,
    context: Arc<GameContext>,
}

impl ApiServer {
    pub fn new(config: ApiConfig, context: Arc<GameContext>) -> Self {
        Self { config, context }
    }

    /// Start maintenance, serve until Ctrl+C or SIGTERM, then stop maintenance
    pub async fn run(self) -> LuckyPairResult<()> {
        let maintenance = self.context.start_maintenance()?;

        let app = self.create_app();
        let addr = self.socket_addr()?;
        let listener = tokio::net::TcpListener::bind(addr).await?;

        info!("Lucky pair API listening on http://{}", addr);
        self.log_server_info();

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        maintenance.shutdown().await;
        info!("API server stopped gracefully");
        Ok(())
    }

    /// Router with the full middleware stack
    pub fn create_app(&self) -> axum::Router {
        let state = Arc::new(AppState {
            context: self.context.clone(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        });

        create_router(state)
            .layer(axum::middleware::from_fn(request_id_middleware))
            .layer(create_cors_layer(self.config.allowed_origins.clone()))
            .layer(TimeoutLayer::new(self.config.request_timeout()))
            .layer(TraceLayer::new_for_http())
    }

    fn socket_addr(&self) -> LuckyPairResult<SocketAddr> {
        let ip = self
            .config
            .host
            .parse::<std::net::IpAddr>()
            .map_err(|e| LuckyPairError::Server(format!("Invalid host '{}': {}", self.config.host, e)))?;
        Ok(SocketAddr::from((ip, self.config.port)))
    }

    fn log_server_info(&self) {
        info!("   CORS: {:?}", self.config.allowed_origins);
        info!("   Request timeout: {}s", self.config.request_timeout_secs);
        info!("   Supply capacity: {}", self.context.supply().capacity());
        info!("Available endpoints:");
        info!("   GET  /health");
        info!("   POST /api/v1/bets");
        info!("   GET  /api/v1/jackpot");
        info!("   GET  /api/v1/bonus/:player_id");
    }
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C signal"),
        _ = terminate => info!("Received terminate signal"),
    }
}
