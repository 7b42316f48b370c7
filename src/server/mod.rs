//! Web form server
//!
//! A sidebar menu selects one operation at a time; its form posts a multipart
//! body to `/run`, and each produced file is offered as a download link.

mod form;
mod handlers;
mod html;
mod menu;

pub use form::parse_params;
pub use menu::MenuState;

use crate::convert::ToolConfig;
use crate::store::ArtifactStore;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Server configuration options
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Maximum request body size in bytes (default: 100MB)
    pub max_upload_bytes: usize,
    /// Maximum number of downloads kept (default: 64)
    pub store_max_entries: usize,
    /// Maximum total bytes of downloads kept (default: 512MB)
    pub store_max_bytes: usize,
    /// External conversion tools
    pub tools: ToolConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            max_upload_bytes: 100 * 1024 * 1024, // 100MB
            store_max_entries: 64,
            store_max_bytes: 512 * 1024 * 1024, // 512MB
            tools: ToolConfig::default(),
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub menu: Arc<MenuState>,
    pub store: Arc<ArtifactStore>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            menu: Arc::new(MenuState::new()),
            store: Arc::new(ArtifactStore::new(
                config.store_max_entries,
                config.store_max_bytes,
            )),
            config: Arc::new(config),
        }
    }
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    let max_upload = state.config.max_upload_bytes;

    Router::new()
        .route("/", get(handlers::index))
        .route("/select/:slug", post(handlers::select))
        .route("/back", post(handlers::back))
        .route("/run", post(handlers::run))
        .route("/download/:id", get(handlers::download))
        .route("/health", get(handlers::health))
        .layer(DefaultBodyLimit::max(max_upload))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the web server until the process is stopped
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    tracing::info!(
        max_upload_bytes = config.max_upload_bytes,
        store_max_entries = config.store_max_entries,
        store_max_bytes = config.store_max_bytes,
        tool_timeout_secs = config.tools.timeout.as_secs(),
        "server configuration"
    );

    if !crate::pdf::pdfium_available() {
        tracing::warn!("PDFium library not found; rendering, text and image operations will fail");
    }

    let app = router(AppState::new(config));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("PDF Workbench listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
