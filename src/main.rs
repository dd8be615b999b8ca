//! Ionia ingestion API binary entrypoint wiring config, storage, and routes.

use std::{env, net::SocketAddr, sync::Arc};

use anyhow::Context;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ionia_ingest::{
    config::AppConfig,
    dao::row_store::{DisabledRowStore, RowStore},
    routes,
    services::bootstrap,
    state::AppState,
};

#[cfg(feature = "sheets-store")]
use ionia_ingest::dao::row_store::sheets::{SheetsConfig, SheetsRowStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AppConfig::load();
    let store = build_row_store()?;
    let state = AppState::new(config, store);

    // Reload credentials and dedupe keys written by previous processes.
    bootstrap::rehydrate(&state).await;

    let app = routes::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let port = env::var("PORT")
        .or_else(|_| env::var("SERVER_PORT"))
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(%addr, "starting server");

    let listener = TcpListener::bind(addr).await.context("binding server")?;
    let service = app.into_make_service();
    axum::serve(listener, service)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving axum")?;

    Ok(())
}

/// Pick the configured sheets store, or the no-op store when the sheet id
/// or credentials are missing.
#[cfg(feature = "sheets-store")]
fn build_row_store() -> anyhow::Result<Arc<dyn RowStore>> {
    match SheetsConfig::from_env() {
        Some(config) => {
            let store = SheetsRowStore::new(config).context("building sheets client")?;
            Ok(Arc::new(store))
        }
        None => {
            info!("sheets writer disabled; missing sheet id or credentials");
            Ok(Arc::new(DisabledRowStore))
        }
    }
}

#[cfg(not(feature = "sheets-store"))]
fn build_row_store() -> anyhow::Result<Arc<dyn RowStore>> {
    info!("sheets store feature disabled at build time");
    Ok(Arc::new(DisabledRowStore))
}

/// Configure tracing subscribers so logs include spans by default.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=debug".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Wait for Ctrl+C or SIGTERM and shut the server down gracefully.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut term = signal(SignalKind::terminate()).expect("install SIGTERM handler");
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = term.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
