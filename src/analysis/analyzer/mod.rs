//! Analyzers combine char filters and a tokenizer into one pipeline.
//!
//! ```text
//! Raw Text → Char Filters → Tokenizer → Token Stream → Classifier
//! ```
//!
//! - [`PipelineAnalyzer`] - Arbitrary char filters + tokenizer
//! - [`PhraseAnalyzer`] - The phrase normalizer + a [`TokenizationMode`]

mod phrase;
mod pipeline;

pub use phrase::{PhraseAnalyzer, TokenizationMode};
pub use pipeline::PipelineAnalyzer;

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for analyzers that convert text into processed tokens.
pub trait Analyzer: Send + Sync {
    /// Analyze the given text and return a stream of tokens.
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this analyzer (for debugging and configuration).
    fn name(&self) -> &'static str;

    /// Analyze text and collect the token texts.
    fn analyze_to_strings(&self, text: &str) -> Result<Vec<String>> {
        Ok(self.analyze(text)?.map(|t| t.into_text()).collect())
    }
}
