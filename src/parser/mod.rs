//! Dependency Parser Back-ends
//!
//! Provides the trait interface the extractor parses text through, the
//! document model parsers produce, and the concrete back-ends.

pub mod conllu;
pub mod document;
pub mod loader;
pub mod udpipe;

pub use document::{DepLabel, ParsedDocument, Sentence, Token};

use async_trait::async_trait;

// =============================================================================
// Errors
// =============================================================================

/// Errors raised while loading a model or parsing text.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The configured back-end name is unknown.
    #[error("Unsupported parser backend: {0}")]
    UnsupportedBackend(String),

    /// The back-end URL could not be parsed.
    #[error("Invalid parser URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The requested model is not served by the back-end.
    #[error("Model not available: {0}")]
    ModelNotFound(String),

    /// Neither the primary nor the fallback model could be loaded.
    #[error("No dependency-parsing model could be loaded (tried: {tried})")]
    ModelUnavailable { tried: String },

    /// Transport failure talking to the back-end.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The back-end answered with a non-success status.
    #[error("Parser backend returned {status}: {message}")]
    Backend { status: u16, message: String },

    /// The back-end output could not be read as a parse.
    #[error("Malformed parse at line {line}: {reason}")]
    Malformed { line: usize, reason: String },
}

// =============================================================================
// Parser Trait
// =============================================================================

/// A dependency parser bound to one loaded model.
///
/// Implementations are shared read-only across request handlers, so
/// `parse` must not rely on per-call mutation of shared state.
#[async_trait]
pub trait DependencyParser: Send + Sync + std::fmt::Debug {
    /// Split `text` into sentences and parse each one.
    async fn parse(&self, text: &str) -> Result<ParsedDocument, ParseError>;

    /// Name of the loaded model.
    fn model(&self) -> &str;

    /// Get the back-end name for logging and diagnostics.
    fn backend_name(&self) -> &'static str;
}
