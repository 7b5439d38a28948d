//! Axum router configuration with middleware.
//!
//! Routes: `POST /chat`, `POST /clear`, `GET /health`. The static chat
//! UI is served from disk (default `web/`, overridable via
//! `CAROUSEL_WEB_DIR`); API routes take priority and unknown paths fall
//! through to the UI's `index.html`. If the directory does not exist,
//! only the API is served.

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Environment variable overriding the chat UI directory.
pub const WEB_DIR_VAR: &str = "CAROUSEL_WEB_DIR";

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new()
        .route("/chat", post(handlers::chat::chat))
        .route("/clear", post(handlers::chat::clear))
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let web_dir = std::env::var(WEB_DIR_VAR).unwrap_or_else(|_| "web".to_string());
    if std::path::Path::new(&web_dir).exists() {
        let index_path = format!("{web_dir}/index.html");
        let serve_dir = ServeDir::new(&web_dir).fallback(ServeFile::new(index_path));
        router = router.fallback_service(serve_dir);
        tracing::info!(path = %web_dir, "chat UI static file serving enabled");
    } else {
        tracing::warn!(path = %web_dir, "chat UI directory not found, serving API only");
    }

    router
}

/// GET /health - simple liveness probe.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
