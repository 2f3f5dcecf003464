//! Phrase analyzer used for dictionary lines and query phrases.
//!
//! # Pipeline
//!
//! 1. [`Normalizer`] (trim, punctuation removal, whitespace collapse, lowercase)
//! 2. [`WhitespaceTokenizer`] or [`WholeTokenizer`], per [`TokenizationMode`]
//!
//! # Examples
//!
//! ```
//! use bayesfilter::analysis::analyzer::{Analyzer, PhraseAnalyzer, TokenizationMode};
//!
//! let analyzer = PhraseAnalyzer::new(TokenizationMode::Whitespace).unwrap();
//! let words = analyzer.analyze_to_strings("Hello,  World!").unwrap();
//! assert_eq!(words, vec!["hello", "world"]);
//!
//! let analyzer = PhraseAnalyzer::new(TokenizationMode::Whole).unwrap();
//! let words = analyzer.analyze_to_strings("Hello,  World!").unwrap();
//! assert_eq!(words, vec!["hello world"]);
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::{Analyzer, PipelineAnalyzer};
use crate::analysis::normalizer::Normalizer;
use crate::analysis::token::TokenStream;
use crate::analysis::tokenizer::{Tokenizer, WhitespaceTokenizer, WholeTokenizer};
use crate::error::{BayesFilterError, Result};

/// How a normalized line is turned into tokens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenizationMode {
    /// One token per whitespace-separated word.
    #[default]
    Whitespace,
    /// The whole normalized line is one token.
    ///
    /// Degenerate: the model becomes a per-line frequency table.
    Whole,
}

impl TokenizationMode {
    /// Whether this mode reduces the model to per-line frequencies.
    pub fn is_degenerate(&self) -> bool {
        matches!(self, TokenizationMode::Whole)
    }

    fn tokenizer(&self) -> Arc<dyn Tokenizer> {
        match self {
            TokenizationMode::Whitespace => Arc::new(WhitespaceTokenizer::new()),
            TokenizationMode::Whole => Arc::new(WholeTokenizer::new()),
        }
    }
}

impl fmt::Display for TokenizationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenizationMode::Whitespace => write!(f, "whitespace"),
            TokenizationMode::Whole => write!(f, "whole"),
        }
    }
}

impl FromStr for TokenizationMode {
    type Err = BayesFilterError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "whitespace" => Ok(TokenizationMode::Whitespace),
            "whole" => Ok(TokenizationMode::Whole),
            other => Err(BayesFilterError::invalid_config(format!(
                "unknown tokenization mode '{other}' (expected 'whitespace' or 'whole')"
            ))),
        }
    }
}

/// The analyzer applied to every corpus line and every query phrase.
#[derive(Clone)]
pub struct PhraseAnalyzer {
    inner: PipelineAnalyzer,
    mode: TokenizationMode,
}

impl PhraseAnalyzer {
    /// Create a phrase analyzer for the given tokenization mode.
    pub fn new(mode: TokenizationMode) -> Result<Self> {
        if mode.is_degenerate() {
            log::warn!(
                "tokenization mode '{mode}' treats each line as a single token; \
                 the model degenerates to per-line frequencies"
            );
        }

        let inner = PipelineAnalyzer::new(mode.tokenizer())
            .add_char_filter(Arc::new(Normalizer::new()?))
            .with_name(format!("phrase_{mode}"));

        Ok(PhraseAnalyzer { inner, mode })
    }

    /// Get the tokenization mode.
    pub fn mode(&self) -> TokenizationMode {
        self.mode
    }

    /// Get the inner pipeline analyzer.
    pub fn inner(&self) -> &PipelineAnalyzer {
        &self.inner
    }

    /// Normalize text without tokenizing it.
    pub fn normalize(&self, text: &str) -> String {
        self.inner.filter_text(text)
    }
}

impl Default for PhraseAnalyzer {
    fn default() -> Self {
        Self::new(TokenizationMode::default())
            .expect("Phrase analyzer should be creatable with default settings")
    }
}

impl Analyzer for PhraseAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.inner.analyze(text)
    }

    fn name(&self) -> &'static str {
        "phrase"
    }
}

impl fmt::Debug for PhraseAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhraseAnalyzer")
            .field("mode", &self.mode)
            .field("inner", &self.inner)
            .finish()
    }
}
