//! Regex entity detection with relation-word lookup.
//!
//! Used as a fallback when the parse tree yields too few triples. Every
//! ordered pair of distinct entities produces a triple; pairs without a
//! relation word between them get the default relation.
//!
//! Pairing is quadratic: `E` distinct entities cost `O(E² · n)` substring
//! scans over a text of length `n` and yield `E · (E - 1)` triples. Only the
//! request body limit bounds `E`.

use super::{ExtractionError, Triple};
use crate::config::ExtractionConfig;
use regex::Regex;
use std::collections::HashSet;
use std::sync::Arc;

/// Confidence attached to every heuristic triple.
pub const HEURISTIC_CONFIDENCE: f32 = 0.7;

#[derive(Clone, Debug)]
pub struct HeuristicExtractor {
    /// Entity patterns, scanned in order
    patterns: Arc<[Regex]>,
    /// Relation words, highest priority first
    relation_words: Arc<[String]>,
    default_relation: String,
}

impl HeuristicExtractor {
    pub fn new(config: &ExtractionConfig) -> Result<Self, ExtractionError> {
        let patterns = config
            .entity_patterns
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|source| ExtractionError::InvalidPattern {
                    pattern: pattern.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            patterns: patterns.into(),
            relation_words: config.relation_words.clone().into(),
            default_relation: config.default_relation.clone(),
        })
    }

    /// Find entities and pair every two distinct ones.
    pub fn extract(&self, text: &str) -> Vec<Triple> {
        let entities = self.extract_entities(text);
        self.pair_entities(text, &entities)
    }

    /// All pattern matches, deduplicated, in first-seen order (pattern order,
    /// then position).
    pub fn extract_entities(&self, text: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut entities = Vec::new();

        for pattern in self.patterns.iter() {
            for m in pattern.find_iter(text) {
                if seen.insert(m.as_str()) {
                    entities.push(m.as_str().to_string());
                }
            }
        }

        entities
    }

    /// Emit one triple per ordered pair of distinct entities.
    pub fn pair_entities(&self, text: &str, entities: &[String]) -> Vec<Triple> {
        let mut triples = Vec::new();

        for (i, subject) in entities.iter().enumerate() {
            for (j, object) in entities.iter().enumerate() {
                if i == j {
                    continue;
                }
                let relation = self.find_relation(text, subject, object);
                triples.push(Triple::new(
                    subject.clone(),
                    relation,
                    object.clone(),
                    HEURISTIC_CONFIDENCE,
                ));
            }
        }

        triples
    }

    /// The highest-priority relation word between the first occurrences of
    /// `subject` and `object`, or the default relation when the subject does
    /// not end strictly before the object starts, either entity is missing, or
    /// no relation word sits between them.
    pub fn find_relation(&self, text: &str, subject: &str, object: &str) -> &str {
        let between = text.find(subject).and_then(|start| {
            let start = start + subject.len();
            let end = text.find(object)?;
            (start < end).then(|| &text[start..end])
        });

        between
            .and_then(|between| {
                self.relation_words
                    .iter()
                    .find(|word| between.contains(word.as_str()))
            })
            .map_or(self.default_relation.as_str(), String::as_str)
    }
}
