//! Server startup stages, the base router, and graceful shutdown.
//!
//! Startup is a pipeline of [`RunServer`] stages: each receives the
//! context, the service config, and the handler built so far, and hands
//! them to the next stage. [`HttpServer`] is the last one: it binds the
//! listener and serves the final handler until the context is cancelled.
//! [`base_handler`] builds the Axum router plugins wrap, and
//! [`shutdown_signal`] covers SIGTERM / Ctrl+C handling.

use std::future::Future;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;

use crate::config::model::ServiceConfig;
use crate::context::Context;
use crate::error::PlugchainError;
use crate::handler::{self, Handler};
use crate::health::health_handler;

/// One stage of server startup.
///
/// Implemented for async closures taking `(Context, ServiceConfig,
/// Handler)`, so a stage can be written inline.
#[async_trait]
pub trait RunServer: Send + Sync {
    async fn run(
        &self,
        ctx: Context,
        config: ServiceConfig,
        handler: Handler,
    ) -> Result<(), PlugchainError>;
}

#[async_trait]
impl<F, Fut> RunServer for F
where
    F: Fn(Context, ServiceConfig, Handler) -> Fut + Send + Sync,
    Fut: Future<Output = Result<(), PlugchainError>> + Send + 'static,
{
    async fn run(
        &self,
        ctx: Context,
        config: ServiceConfig,
        handler: Handler,
    ) -> Result<(), PlugchainError> {
        self(ctx, config, handler).await
    }
}

#[derive(Debug)]
pub struct AppState {
    pub service: String,
    pub start_time: Instant,
}

/// The handler plugins wrap: `GET /health`, 404 for everything else.
#[must_use]
pub fn base_handler(config: &ServiceConfig) -> Handler {
    let state = Arc::new(AppState {
        service: config.name.clone(),
        start_time: Instant::now(),
    });
    handler::boxed(
        Router::new()
            .route("/health", get(health_handler))
            .with_state(state),
    )
}

/// Terminal stage: listens on `host:port` and serves the handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpServer;

#[async_trait]
impl RunServer for HttpServer {
    async fn run(
        &self,
        ctx: Context,
        config: ServiceConfig,
        handler: Handler,
    ) -> Result<(), PlugchainError> {
        let ip: IpAddr = config.host.parse()?;
        let addr = SocketAddr::new(ip, config.port);
        let listener = TcpListener::bind(addr).await?;

        tracing::info!(addr = %addr, service = %config.name, "plugchain started");
        serve(listener, ctx, handler).await?;
        tracing::info!("plugchain stopped");
        Ok(())
    }
}

/// Serve `handler` on an already-bound listener until `ctx` is cancelled.
pub async fn serve(
    listener: TcpListener,
    ctx: Context,
    handler: Handler,
) -> Result<(), PlugchainError> {
    let app = Router::new().fallback_service(handler);
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async move { ctx.cancelled().await })
    .await?;
    Ok(())
}

pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received Ctrl+C"),
        () = terminate => tracing::info!("received SIGTERM"),
    }
}
