//! # HTTP Server
//!
//! Combines the gazette and health routers behind the configured prefix and
//! CORS policy.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use super::config::HttpServerConfig;
use super::gazette_routes::gazette_routes;
use super::health_routes::health_routes;
use crate::gazettes::GazetteAccessInterface;
use crate::observability::{Event, Logger};

/// HTTP server for the gazette API
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server answering queries through `gazettes`
    pub fn new(config: HttpServerConfig, gazettes: Arc<dyn GazetteAccessInterface>) -> Self {
        let router = build_router(&config, gazettes);
        Self { config, router }
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Serve until the process receives Ctrl-C
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self
            .config
            .socket_addr()
            .parse()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

        let listener = TcpListener::bind(addr).await?;
        let addr_text = addr.to_string();
        let prefix = self.config.route_prefix().unwrap_or_default();
        Logger::info(
            Event::ServerStart,
            &[("addr", &addr_text), ("root_path", &prefix)],
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Logger::info(Event::ServerStop, &[("addr", &addr_text)]);
        Ok(())
    }
}

/// Build the application router
pub fn build_router(config: &HttpServerConfig, gazettes: Arc<dyn GazetteAccessInterface>) -> Router {
    let cors = if config.cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .iter()
            .filter_map(|s| s.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    let routes = Router::new()
        .merge(health_routes())
        .merge(gazette_routes(gazettes));

    let routes = match config.route_prefix() {
        Some(prefix) => Router::new().nest(&prefix, routes),
        None => routes,
    };

    routes.layer(cors)
}

async fn shutdown_signal() {
    // An error here means no handler could be installed; keep serving.
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}
