//! Huddle Back binary entrypoint wiring REST, WebSocket, SSE, and SQLite layers.

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{
    Router,
    http::{HeaderValue, Method, header},
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use huddle_back::{
    config::AppConfig,
    dao::{
        activity_store::sqlite::{SqliteActivityStore, SqliteConfig},
        seed::seed_demo_data,
    },
    routes,
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AppConfig::load();

    let store = SqliteActivityStore::connect(SqliteConfig::from_path(&config.db_file))
        .await
        .with_context(|| format!("opening database {}", config.db_file.display()))?;
    info!(path = %config.db_file.display(), "database ready");

    if config.seed_demo_data {
        match seed_demo_data(&store).await {
            Ok(true) => info!("demo data inserted"),
            Ok(false) => {}
            Err(err) => warn!(error = %err, "failed to seed demo data"),
        }
    }

    let cors = cors_layer(&config)?;
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let app_state = AppState::new(Arc::new(store), config);

    // Build the HTTP router once the shared state is ready.
    let app = build_router(app_state, cors);

    info!(%addr, "starting server");

    let listener = TcpListener::bind(addr).await.context("binding server")?;
    let service = app.into_make_service();
    axum::serve(listener, service)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving axum")?;

    Ok(())
}

/// Build the top-level router and attach cross-cutting middleware layers.
fn build_router(state: huddle_back::state::SharedState, cors: CorsLayer) -> Router<()> {
    routes::router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Restrict CORS to the configured client origin, or allow any origin without one.
fn cors_layer(config: &AppConfig) -> anyhow::Result<CorsLayer> {
    let Some(origin) = config.client_origin.as_deref() else {
        return Ok(CorsLayer::permissive());
    };

    let origin: HeaderValue = origin
        .parse()
        .with_context(|| format!("invalid CLIENT_ORIGIN `{origin}`"))?;
    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]))
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

        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {},
                    _ = term.recv() => {},
                }
            }
            Err(err) => {
                warn!(error = %err, "failed to install SIGTERM handler");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
