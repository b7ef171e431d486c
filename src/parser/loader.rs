//! Model loading with primary/fallback resolution.
//!
//! Runs once at startup. The parser it returns is immutable and shared by
//! every request handler; failing to load any model is a startup error.

use super::{DependencyParser, ParseError, udpipe::UdpipeParser};
use crate::config::ParserConfig;
use reqwest::Client;
use std::sync::Arc;
use tracing::{info, warn};

/// Load the configured back-end, trying the primary model first and the
/// fallback model second.
pub async fn load_parser(config: &ParserConfig) -> Result<Arc<dyn DependencyParser>, ParseError> {
    if config.backend != "udpipe" {
        return Err(ParseError::UnsupportedBackend(config.backend.clone()));
    }

    let client = Client::new();
    let mut tried = vec![config.primary_model.clone()];

    match UdpipeParser::load(client.clone(), &config.base_url, &config.primary_model).await {
        Ok(parser) => return Ok(loaded(parser, false)),
        Err(e) => {
            warn!(
                name: "parser.model.failed",
                model = %config.primary_model,
                error = %e,
                "Primary model unavailable"
            );
        }
    }

    if let Some(fallback) = config.fallback_model.as_deref().filter(|m| !m.is_empty()) {
        tried.push(fallback.to_string());
        match UdpipeParser::load(client, &config.base_url, fallback).await {
            Ok(parser) => return Ok(loaded(parser, true)),
            Err(e) => {
                warn!(
                    name: "parser.model.failed",
                    model = %fallback,
                    error = %e,
                    "Fallback model unavailable"
                );
            }
        }
    }

    Err(ParseError::ModelUnavailable {
        tried: tried.join(", "),
    })
}

fn loaded(parser: UdpipeParser, fallback: bool) -> Arc<dyn DependencyParser> {
    info!(
        name: "parser.model.loaded",
        backend = parser.backend_name(),
        model = %parser.model(),
        fallback,
        "Dependency parsing model loaded"
    );
    Arc::new(parser)
}
