//! Text analysis for bayesfilter.
//!
//! Raw phrases pass through char filters (normalization) and a tokenizer
//! before they reach the classifier.

pub mod analyzer;
pub mod char_filter;
pub mod normalizer;
pub mod token;
pub mod tokenizer;

// Re-export commonly used types
pub use analyzer::{Analyzer, PhraseAnalyzer, PipelineAnalyzer, TokenizationMode};
pub use normalizer::{Normalizer, normalize};
pub use token::{Token, TokenStream};
