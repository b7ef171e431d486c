//! Dependency-parse document model.
//!
//! Tokens live in a flat per-sentence arena and refer to their governor by
//! index, so a sentence is a tree without any shared ownership.

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Dependency Labels
// =============================================================================

/// Dependency relation between a token and its governor.
///
/// Both the ClearNLP scheme (spaCy) and Universal Dependencies (UDPipe,
/// Stanza) are accepted; labels with no special meaning to extraction are
/// kept verbatim in [`DepLabel::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DepLabel {
    /// Main predicate of the sentence
    Root,
    /// `nsubj`
    NominalSubject,
    /// `nsubjpass` / `nsubj:pass`
    PassiveNominalSubject,
    /// `dobj` / `obj`
    DirectObject,
    /// `pobj`
    PrepositionalObject,
    /// `compound`
    Compound,
    /// `amod`
    AdjectivalModifier,
    /// `nummod`
    NumericModifier,
    /// `dep`, the parser could not determine the relation
    Unspecified,
    /// Any other label
    Other(String),
}

impl DepLabel {
    /// Labels that introduce the subject of a verb.
    pub fn is_subject(&self) -> bool {
        matches!(self, Self::NominalSubject | Self::PassiveNominalSubject)
    }

    /// Labels that introduce the object of a verb.
    pub fn is_object(&self) -> bool {
        matches!(self, Self::DirectObject | Self::PrepositionalObject)
    }

    /// Labels folded into a head word during phrase expansion.
    pub fn is_phrase_modifier(&self) -> bool {
        matches!(
            self,
            Self::Compound | Self::AdjectivalModifier | Self::NumericModifier | Self::Unspecified
        )
    }

    /// Canonical spelling of the label.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Root => "ROOT",
            Self::NominalSubject => "nsubj",
            Self::PassiveNominalSubject => "nsubjpass",
            Self::DirectObject => "dobj",
            Self::PrepositionalObject => "pobj",
            Self::Compound => "compound",
            Self::AdjectivalModifier => "amod",
            Self::NumericModifier => "nummod",
            Self::Unspecified => "dep",
            Self::Other(label) => label,
        }
    }
}

impl From<&str> for DepLabel {
    fn from(label: &str) -> Self {
        match label {
            "ROOT" | "root" => Self::Root,
            "nsubj" => Self::NominalSubject,
            "nsubjpass" | "nsubj:pass" => Self::PassiveNominalSubject,
            "dobj" | "obj" => Self::DirectObject,
            "pobj" => Self::PrepositionalObject,
            "compound" => Self::Compound,
            "amod" => Self::AdjectivalModifier,
            "nummod" => Self::NumericModifier,
            "dep" => Self::Unspecified,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for DepLabel {
    fn from(label: String) -> Self {
        Self::from(label.as_str())
    }
}

impl From<DepLabel> for String {
    fn from(label: DepLabel) -> Self {
        label.as_str().to_string()
    }
}

impl fmt::Display for DepLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Tokens and Sentences
// =============================================================================

/// A single word of a parsed sentence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Surface form
    pub text: String,
    /// Relation to the governor
    pub dep: DepLabel,
    /// Universal POS tag (e.g. "VERB", "NOUN")
    pub pos: String,
    /// Index of the governing token within the sentence, `None` for the root
    pub head: Option<usize>,
}

impl Token {
    pub fn new(
        text: impl Into<String>,
        dep: impl Into<DepLabel>,
        pos: impl Into<String>,
        head: Option<usize>,
    ) -> Self {
        Self {
            text: text.into(),
            dep: dep.into(),
            pos: pos.into(),
            head,
        }
    }

    pub fn is_verb(&self) -> bool {
        self.pos == "VERB"
    }
}

/// One sentence: tokens in linear order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    pub tokens: Vec<Token>,
}

impl Sentence {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    /// Tokens directly governed by `head`, in linear order.
    pub fn children(&self, head: usize) -> impl Iterator<Item = &Token> + '_ {
        self.tokens
            .iter()
            .filter(move |token| token.head == Some(head))
    }
}

/// Output of a dependency parser: a read-only sequence of sentences.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedDocument {
    pub sentences: Vec<Sentence>,
}

impl ParsedDocument {
    pub fn new(sentences: Vec<Sentence>) -> Self {
        Self { sentences }
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }
}
