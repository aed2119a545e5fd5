//! Astro Studios Server
//!
//! Serves the studio's content API (games, news, reviews, contact form and
//! newsletter sign-up) and, optionally, the built frontend.
//!
//! All content is held in memory and seeded at startup.

mod config;
mod handlers;
mod storage;

use anyhow::{Context, Result};
use astro_core::{seed, ContentStore};
use axum::{
    routing::{get, post},
    Router,
};
use clap::Parser;
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::{Cli, ServerConfig};
use storage::MemStorage;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ContentStore>,
}

#[tokio::main]
async fn main() {
    // Set up panic hook to log crashes
    std::panic::set_hook(Box::new(|info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()));
        let payload = if let Some(s) = info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        eprintln!("[PANIC] at {:?}: {}", location, payload);
        tracing::error!("PANIC at {:?}: {}", location, payload);
    }));

    let cli = Cli::parse();
    let config = match ServerConfig::load(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("[FATAL] Failed to load configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    // Initialize tracing; RUST_LOG wins over the configured filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("[FATAL] Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!("Starting Astro Studios server v{}", env!("CARGO_PKG_VERSION"));
    info!("PID: {}", std::process::id());

    if let Err(e) = run_server(config).await {
        error!("Server failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run_server(config: ServerConfig) -> Result<()> {
    info!(
        "Config loaded: bind={}, static_dir={:?}, seed={}",
        config.bind_address, config.static_dir, config.seed_sample_data
    );
    let addr = config.socket_addr()?;

    let store = Arc::new(MemStorage::new());
    if config.seed_sample_data {
        seed::seed(store.as_ref())
            .await
            .context("Failed to seed sample data")?;
    } else {
        warn!("Sample data disabled, starting with an empty store");
    }

    let state = AppState { store };

    if let Some(dir) = &config.static_dir {
        info!("Static files directory: {}", dir.display());
        if !dir.join("index.html").exists() {
            warn!("No index.html in {}, client routes will 404", dir.display());
        }
    }

    let app = build_router(state, config.static_dir.as_deref());

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Build the full application: health check, content API and, when a
/// frontend directory is given, static files with an `index.html` fallback
/// for client-side routes.
pub fn build_router(state: AppState, static_dir: Option<&Path>) -> Router {
    let mut app = Router::new()
        .route("/health", get(handlers::health))
        .nest("/api", api_routes());

    if let Some(dir) = static_dir {
        let index_path = dir.join("index.html");
        app = app.fallback_service(ServeDir::new(dir).fallback(ServeFile::new(index_path)));
    }

    app.layer(
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    )
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/games", get(handlers::games::list))
        .route("/games/:slug", get(handlers::games::get))
        .route("/blog", get(handlers::blog::list))
        .route("/blog/:slug", get(handlers::blog::get))
        .route("/reviews", get(handlers::reviews::list))
        .route("/reviews/game/:game_id", get(handlers::reviews::list_for_game))
        .route("/contact", post(handlers::contact::create))
        .route("/newsletter", post(handlers::newsletter::subscribe))
        .fallback(handlers::not_found)
}
