use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::AppState;
use crate::api;
use crate::config::AppConfig;
use crate::extraction::TripleExtractor;
use crate::parser::loader::load_parser;

/// Load the parser model, then serve the extraction API until shutdown.
pub async fn start_server(config: Arc<AppConfig>) -> anyhow::Result<()> {
    // Model is resolved once; a startup without any model is fatal
    let parser = load_parser(&config.parser).await?;
    let extractor = Arc::new(TripleExtractor::new(parser, &config.extraction)?);

    let state = AppState {
        extractor,
        config: Arc::clone(&config),
    };

    let app = build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(
        name: "server.started",
        address = %addr,
        "Server started"
    );

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}

/// Build the application router.
///
/// Cross-origin requests are allowed from any origin.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/extract", post(api::extract_triples))
        .route("/health", get(api::health))
        .layer(DefaultBodyLimit::max(state.config.server.body_limit_bytes))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
