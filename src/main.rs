//! Slack Directory Backend
//!
//! Fetches workspace members from the Slack directory API and serves them
//! filtered and sorted for the member table.

mod api;
mod auth;
mod config;
mod directory;
mod errors;
mod models;
mod projection;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use directory::{DirectoryClient, DirectoryStore};
use models::ViewState;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<DirectoryClient>,
    pub store: Arc<DirectoryStore>,
    pub view: Arc<RwLock<ViewState>>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, reqwest::Error> {
        let client = DirectoryClient::new(&config.upstream_url, config.request_timeout)?;

        Ok(Self {
            client: Arc::new(client),
            store: Arc::new(DirectoryStore::new()),
            view: Arc::new(RwLock::new(ViewState::default())),
            config: Arc::new(config),
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Slack Directory Backend");
    tracing::info!("Upstream: {}", config.upstream_url);
    tracing::info!("Bind address: {}", config.bind_addr);

    if config.api_psk.is_none() {
        tracing::warn!("No API PSK configured (SLACK_DIRECTORY_API_PSK). Authentication is disabled!");
    }

    let bind_addr = config.bind_addr;
    let state = AppState::new(config)?;
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("Server listening on {}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let psk = state.config.api_psk.clone();

    let api_routes = Router::new()
        // Directory
        .route("/directory", get(api::get_directory))
        .route("/directory/fetch", post(api::fetch_directory))
        // View state
        .route("/view", get(api::get_view))
        .route("/view/sort/{key}", post(api::toggle_sort))
        .route("/view/filter", put(api::update_filter))
        // Members
        .route("/members", get(api::list_members))
        .layer(middleware::from_fn(move |req, next| {
            auth::psk_auth_layer(psk.clone(), req, next)
        }));

    // Health check (no auth required)
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
