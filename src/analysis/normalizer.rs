//! Phrase normalization.
//!
//! [`Normalizer`] runs the fixed char filter chain that turns a raw
//! dictionary line or query phrase into canonical form:
//!
//! 1. trim `\n`, `\r`, `\t` and space from both ends
//! 2. remove [`PUNCTUATION_MARKS`] and [`EXTRA_PUNCTUATION_MARKS`]
//! 3. replace [`NEWLINE_VARIANTS`] with a space
//! 4. collapse whitespace runs into one space
//! 5. lowercase
//! 6. trim again, since step 2 can expose leading or trailing spaces
//!
//! The last step makes normalization idempotent.
//!
//! # Examples
//!
//! ```
//! use bayesfilter::analysis::normalize;
//!
//! assert_eq!(normalize("Hello,  World!\n"), "hello world");
//! assert_eq!(normalize(""), "");
//! ```

use std::sync::{Arc, LazyLock};

use crate::analysis::char_filter::{
    CharFilter, LowercaseCharFilter, MappingCharFilter, PatternReplaceCharFilter, TrimCharFilter,
};
use crate::error::Result;

/// First punctuation set removed by the normalizer.
pub const PUNCTUATION_MARKS: [&str; 19] = [
    ".", ",", "!", "@", "#", "$", "%", "^", "&", "*", "(", ")", "{", "}", "<", ">", "[", "]", "\\",
];

/// Second punctuation set removed by the normalizer.
pub const EXTRA_PUNCTUATION_MARKS: [&str; 10] =
    ["-", "_", "+", "=", ":", ";", "'", "`", "~", "\""];

/// Newline sequences replaced by a single space.
pub const NEWLINE_VARIANTS: [&str; 4] = ["\n", "\r", "\n\r", "\r\n"];

static DEFAULT_NORMALIZER: LazyLock<Normalizer> =
    LazyLock::new(|| Normalizer::new().expect("built-in normalizer patterns are valid"));

/// Normalize text with the default [`Normalizer`].
///
/// Total function: every input, including the empty string, has a result.
pub fn normalize(text: &str) -> String {
    DEFAULT_NORMALIZER.normalize(text)
}

/// A chain of char filters applied in order.
#[derive(Clone)]
pub struct Normalizer {
    char_filters: Vec<Arc<dyn CharFilter>>,
}

impl Normalizer {
    /// Create the standard phrase normalizer.
    pub fn new() -> Result<Self> {
        let punctuation = PUNCTUATION_MARKS
            .iter()
            .chain(EXTRA_PUNCTUATION_MARKS.iter())
            .copied();
        let newlines = NEWLINE_VARIANTS.iter().map(|nl| (*nl, " "));

        Ok(Self::with_char_filters(vec![
            Arc::new(TrimCharFilter::line_whitespace()),
            Arc::new(MappingCharFilter::removing(punctuation)?),
            Arc::new(MappingCharFilter::new(newlines)?),
            Arc::new(PatternReplaceCharFilter::collapse_whitespace()?),
            Arc::new(LowercaseCharFilter::new()),
            Arc::new(TrimCharFilter::line_whitespace()),
        ]))
    }

    /// Create a normalizer from an explicit filter chain.
    pub fn with_char_filters(char_filters: Vec<Arc<dyn CharFilter>>) -> Self {
        Normalizer { char_filters }
    }

    /// Get the char filters in application order.
    pub fn char_filters(&self) -> &[Arc<dyn CharFilter>] {
        &self.char_filters
    }

    /// Run every filter over the text.
    pub fn normalize(&self, text: &str) -> String {
        self.char_filters
            .iter()
            .fold(text.to_string(), |acc, filter| filter.filter(&acc))
    }
}

impl CharFilter for Normalizer {
    fn filter(&self, input: &str) -> String {
        self.normalize(input)
    }

    fn name(&self) -> &'static str {
        "normalizer"
    }
}

impl std::fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.char_filters.iter().map(|c| c.name()).collect();
        f.debug_struct("Normalizer")
            .field("char_filters", &names)
            .finish()
    }
}
