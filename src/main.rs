//! Sibyl server entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use sibyl::adapters::{build_router, RoomRegistry};
use sibyl::config::{AppConfig, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    init_tracing(&config.server);
    config.validate().context("invalid configuration")?;

    let registry = Arc::new(RoomRegistry::new(config.session.teardown_grace()));
    {
        let registry = registry.clone();
        tokio::spawn(async move { registry.run_teardown_listener().await });
    }
    spawn_room_diagnostics(registry.clone());

    let app = build_router(registry, &config.server, &config.session);
    let addr = config.server.bind_address()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    tracing::info!(
        %addr,
        environment = ?config.server.environment,
        default_deck = %config.session.default_deck,
        "sibyl listening"
    );

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

    tracing::info!("server stopped");
    Ok(())
}

/// Plain text logs in development, JSON in production. `RUST_LOG` wins over
/// the configured level.
fn init_tracing(server: &ServerConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&server.log_level));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);

    if server.is_production() {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

/// Logs every live room whenever the process receives SIGUSR1.
#[cfg(unix)]
fn spawn_room_diagnostics(registry: Arc<RoomRegistry>) {
    use tokio::signal::unix::{signal, SignalKind};

    let mut usr1 = match signal(SignalKind::user_defined1()) {
        Ok(stream) => stream,
        Err(e) => {
            tracing::warn!("could not listen for SIGUSR1: {}", e);
            return;
        }
    };

    tokio::spawn(async move {
        while usr1.recv().await.is_some() {
            registry.log_active_rooms().await;
        }
    });
}

#[cfg(not(unix))]
fn spawn_room_diagnostics(_registry: Arc<RoomRegistry>) {}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("could not listen for ctrl-c: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("could not listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
