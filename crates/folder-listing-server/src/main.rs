//! Folder Listing Server - standalone folder content listing server
//!
//! Serves folder listings by path and by id over HTTP.
//! Users connect via API Key authentication.

mod auth;
mod config;
mod state;

use anyhow::Result;
use axum::{extract::State, http::StatusCode, response::Json, routing::get, Router};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::auth::middleware::auth_middleware;
use crate::config::Config;
use crate::state::{AppState, DatabaseBackend};

#[derive(Parser)]
#[command(version, about = "Folder content listing server")]
struct Cli {
    /// TOML configuration file; environment variables are used when absent
    #[arg(long, env = "LISTING_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    init_tracing();

    let config = match &cli.config {
        Some(path) => Config::from_file(&path.to_string_lossy())?,
        None => Config::from_env()?,
    };
    config.validate()?;
    info!(
        "Starting Folder Listing Server on {}:{}",
        config.host, config.port
    );

    let db = DatabaseBackend::connect(&config).await?;
    info!("Store backend: {:?}", db.database_type());

    let addr = SocketAddr::new(config.host.parse()?, config.port);
    let state = Arc::new(AppState::new(config, db));
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "folder_listing_server=info,folder_listing=info,tower_http=debug".into()
    });
    let json = std::env::var("LOG_FORMAT")
        .map(|f| f.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    let (plain, json) = if json {
        (None, Some(tracing_subscriber::fmt::layer().json()))
    } else {
        (Some(tracing_subscriber::fmt::layer()), None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(plain)
        .with(json)
        .init();
}

fn cors_layer(config: &Config) -> CorsLayer {
    let origins: Vec<axum::http::HeaderValue> = config
        .cors_allowed_origins
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| s.parse().ok())
        .collect();

    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        cors.allow_origin(Any)
    } else {
        cors.allow_origin(origins)
    }
}

fn build_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config);

    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .with_state(state.clone());

    // Listing routes behind API key auth
    let listing_routes = folder_listing::routes::configure(state.listing.clone()).layer(
        axum::middleware::from_fn_with_state(state.clone(), auth_middleware),
    );

    Router::new()
        .merge(public_routes)
        .nest("/api", listing_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

async fn root() -> &'static str {
    "Folder Listing Server"
}

async fn health_check(
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    match state.listing.service.ping().await {
        Ok(_) => Ok(Json(serde_json::json!({
            "status": "healthy",
            "database": "connected",
            "backend": format!("{:?}", state.db.database_type()),
            "version": env!("CARGO_PKG_VERSION")
        }))),
        Err(_) => Err(StatusCode::SERVICE_UNAVAILABLE),
    }
}
