//! Trim char filter implementation.

use super::CharFilter;

/// Characters stripped from both ends of a line: newline, carriage return,
/// tab and space.
pub const LINE_WHITESPACE: [char; 4] = ['\n', '\r', '\t', ' '];

/// A char filter that strips a fixed character set from both ends of the text.
///
/// Characters in the middle of the text are left alone.
#[derive(Clone, Debug)]
pub struct TrimCharFilter {
    chars: Vec<char>,
}

impl TrimCharFilter {
    /// Create a trim filter for the given character set.
    pub fn new(chars: &[char]) -> Self {
        TrimCharFilter {
            chars: chars.to_vec(),
        }
    }

    /// Create a trim filter for [`LINE_WHITESPACE`].
    pub fn line_whitespace() -> Self {
        Self::new(&LINE_WHITESPACE)
    }
}

impl Default for TrimCharFilter {
    fn default() -> Self {
        Self::line_whitespace()
    }
}

impl CharFilter for TrimCharFilter {
    fn filter(&self, input: &str) -> String {
        input.trim_matches(self.chars.as_slice()).to_string()
    }

    fn name(&self) -> &'static str {
        "trim"
    }
}
