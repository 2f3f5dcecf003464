//! Lowercase char filter implementation.
//!
//! # Examples
//!
//! ```
//! use bayesfilter::analysis::char_filter::CharFilter;
//! use bayesfilter::analysis::char_filter::lowercase::LowercaseCharFilter;
//!
//! let filter = LowercaseCharFilter::new();
//! assert_eq!(filter.filter("Hello WORLD"), "hello world");
//! ```

use super::CharFilter;

/// A char filter that lowercases all alphabetic characters.
///
/// ASCII input takes the cheap byte-wise path; anything else goes through
/// Unicode-aware lowercasing.
#[derive(Clone, Debug, Default)]
pub struct LowercaseCharFilter;

impl LowercaseCharFilter {
    /// Create a new lowercase char filter.
    pub fn new() -> Self {
        LowercaseCharFilter
    }
}

impl CharFilter for LowercaseCharFilter {
    fn filter(&self, input: &str) -> String {
        if input.is_ascii() {
            input.to_ascii_lowercase()
        } else {
            input.to_lowercase()
        }
    }

    fn name(&self) -> &'static str {
        "lowercase"
    }
}
