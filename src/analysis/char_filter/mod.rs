//! Char filter implementations for text normalization.
//!
//! Char filters pre-process the raw text before it reaches the tokenizer.
//! The phrase normalizer is built entirely from them.
//!
//! # Available Filters
//!
//! - [`trim::TrimCharFilter`] - Strips a character set from both ends
//! - [`mapping::MappingCharFilter`] - Literal substring replacement (or removal)
//! - [`pattern_replace::PatternReplaceCharFilter`] - Regex-based replacement
//! - [`lowercase::LowercaseCharFilter`] - Unicode lowercasing
//!
//! # Examples
//!
//! ```
//! use bayesfilter::analysis::char_filter::CharFilter;
//! use bayesfilter::analysis::char_filter::pattern_replace::PatternReplaceCharFilter;
//!
//! let filter = PatternReplaceCharFilter::new(r"\s+", " ").unwrap();
//! assert_eq!(filter.filter("a \t\n b"), "a b");
//! ```

/// Trait for character filters that transform text before tokenization.
///
/// Filters are pure: the same input always yields the same output.
pub trait CharFilter: Send + Sync {
    /// Apply this filter to the input text.
    fn filter(&self, input: &str) -> String;

    /// Get the name of this char filter.
    fn name(&self) -> &'static str;
}

pub mod lowercase;
pub mod mapping;
pub mod pattern_replace;
pub mod trim;

pub use lowercase::LowercaseCharFilter;
pub use mapping::MappingCharFilter;
pub use pattern_replace::PatternReplaceCharFilter;
pub use trim::TrimCharFilter;
