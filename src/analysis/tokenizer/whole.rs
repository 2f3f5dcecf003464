//! Per-line tokenizer for the degenerate `whole` tokenization mode.

use super::Tokenizer;

use crate::analysis::token::{Token, TokenStream};
use crate::error::Result;

/// Emits a normalized corpus line as one token.
///
/// Each distinct line becomes its own vocabulary entry, so the model ends
/// up counting repeated lines rather than words. Blank input yields nothing,
/// which the trainer treats as a skipped line.
#[derive(Clone, Debug, Default)]
pub struct WholeTokenizer;

impl WholeTokenizer {
    /// Create a per-line tokenizer.
    pub fn new() -> Self {
        WholeTokenizer
    }
}

impl Tokenizer for WholeTokenizer {
    fn tokenize(&self, line: &str) -> Result<TokenStream> {
        if line.is_empty() {
            return Ok(Box::new(std::iter::empty()));
        }

        let token = Token::with_offsets(line, 0, 0, line.len());
        Ok(Box::new(std::iter::once(token)))
    }

    fn name(&self) -> &'static str {
        "whole"
    }
}
