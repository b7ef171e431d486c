//! Triple Extractor
//!
//! An HTTP service that turns free-form text into subject-predicate-object
//! triples.
//!
//! # Architecture
//!
//! - **Server**: Axum-based HTTP server exposing `POST /extract`
//! - **Parser**: Pluggable dependency parser back-ends (UDPipe REST, CoNLL-U)
//! - **Extraction**: Parse-tree strategy with a regex fallback
//!
//! # Modules
//!
//! - [`api`]: Request handlers and wire types
//! - [`config`]: Layered configuration (defaults, file, env, CLI)
//! - [`extraction`]: Syntactic and heuristic triple extraction
//! - [`parser`]: Dependency parser trait, document model and back-ends

// Allow pedantic clippy warnings that don't add value for this codebase
#![allow(clippy::missing_fields_in_debug)]
#![allow(clippy::cargo_common_metadata)]
#![allow(clippy::multiple_crate_versions)]
#![allow(clippy::unused_async)]

pub mod api;
pub mod config;
pub mod extraction;
pub mod parser;
pub mod server;

use crate::config::AppConfig;
use extraction::TripleExtractor;
use std::sync::Arc;

/// Application state shared across all handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Extractor bound to the parser model loaded at startup.
    pub extractor: Arc<TripleExtractor>,
    /// Global Configuration
    pub config: Arc<AppConfig>,
}
