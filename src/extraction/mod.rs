//! Triple Extraction
//!
//! Combines the two extraction strategies: the parse tree is read first and
//! the regex heuristics only run when it yields fewer triples than the
//! configured threshold. Heuristic triples are appended, never substituted.

pub mod heuristic;
pub mod syntactic;

use crate::config::ExtractionConfig;
use crate::parser::{DependencyParser, ParseError, ParsedDocument};
use heuristic::HeuristicExtractor;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// =============================================================================
// Triple
// =============================================================================

/// A subject-predicate-object fact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Triple {
    pub subject: String,
    pub predicate: String,
    pub object: String,
    /// Fixed per strategy, see [`syntactic::SYNTACTIC_CONFIDENCE`] and
    /// [`heuristic::HEURISTIC_CONFIDENCE`]
    pub confidence: f32,
}

impl Triple {
    pub fn new(
        subject: impl Into<String>,
        predicate: impl Into<String>,
        object: impl Into<String>,
        confidence: f32,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
            confidence,
        }
    }
}

/// Errors raised while building an extractor from configuration.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("Invalid entity pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

// =============================================================================
// Triple Extractor
// =============================================================================

/// Parses text and runs both strategies over it.
#[derive(Debug, Clone)]
pub struct TripleExtractor {
    parser: Arc<dyn DependencyParser>,
    heuristic: HeuristicExtractor,
    min_syntactic_triples: usize,
}

impl TripleExtractor {
    pub fn new(
        parser: Arc<dyn DependencyParser>,
        config: &ExtractionConfig,
    ) -> Result<Self, ExtractionError> {
        Ok(Self {
            parser,
            heuristic: HeuristicExtractor::new(config)?,
            min_syntactic_triples: config.min_syntactic_triples,
        })
    }

    /// The parser back-end this extractor reads trees from.
    pub fn parser(&self) -> &dyn DependencyParser {
        self.parser.as_ref()
    }

    /// Parse `text` and extract triples from it.
    pub async fn extract(&self, text: &str) -> Result<Vec<Triple>, ParseError> {
        let doc = self.parser.parse(text).await?;
        Ok(self.extract_parsed(text, &doc))
    }

    /// Extract from an already parsed document. `text` must be the input the
    /// document was parsed from; the heuristics scan it directly.
    pub fn extract_parsed(&self, text: &str, doc: &ParsedDocument) -> Vec<Triple> {
        let mut triples = syntactic::extract(doc);
        let syntactic_count = triples.len();

        if syntactic_count < self.min_syntactic_triples {
            triples.extend(self.heuristic.extract(text));
        }

        tracing::debug!(
            name: "extract.completed",
            sentences = doc.sentences.len(),
            syntactic = syntactic_count,
            heuristic = triples.len() - syntactic_count,
            "Triples extracted"
        );

        triples
    }
}
