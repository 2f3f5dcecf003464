//! Whitespace tokenizer implementation.

use super::Tokenizer;

use crate::analysis::token::{Token, TokenStream};
use crate::error::Result;

/// A tokenizer that splits text on whitespace.
///
/// Runs of whitespace never produce empty tokens.
#[derive(Clone, Debug, Default)]
pub struct WhitespaceTokenizer;

impl WhitespaceTokenizer {
    /// Create a new whitespace tokenizer.
    pub fn new() -> Self {
        WhitespaceTokenizer
    }
}

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let mut tokens = Vec::new();
        let mut search_from = 0;

        for (position, word) in text.split_whitespace().enumerate() {
            // split_whitespace yields words in order, so the next match at or
            // after the previous end is this word's real offset.
            let start_offset = text[search_from..]
                .find(word)
                .map(|i| i + search_from)
                .unwrap_or(search_from);
            let end_offset = start_offset + word.len();
            tokens.push(Token::with_offsets(word, position, start_offset, end_offset));
            search_from = end_offset;
        }

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "whitespace"
    }
}
