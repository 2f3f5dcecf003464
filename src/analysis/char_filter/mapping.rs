//! Mapping char filter implementation.
//!
//! Replaces literal substrings using a single Aho-Corasick pass. Mapping a
//! pattern to the empty string removes it.

use aho_corasick::{AhoCorasick, MatchKind};

use super::CharFilter;
use crate::error::{BayesFilterError, Result};

/// A char filter that replaces literal patterns with fixed replacements.
///
/// Overlapping patterns resolve leftmost-longest, so `"\r\n"` wins over
/// `"\r"` when both are mapped.
#[derive(Clone, Debug)]
pub struct MappingCharFilter {
    ac: AhoCorasick,
    replacements: Vec<String>,
}

impl MappingCharFilter {
    /// Create a mapping filter from `(pattern, replacement)` pairs.
    pub fn new<I, K, V>(mapping: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut keys = Vec::new();
        let mut replacements = Vec::new();

        for (k, v) in mapping {
            let key = k.into();
            if key.is_empty() {
                return Err(BayesFilterError::analysis(
                    "mapping char filter patterns must not be empty",
                ));
            }
            keys.push(key);
            replacements.push(v.into());
        }

        let ac = AhoCorasick::builder()
            .match_kind(MatchKind::LeftmostLongest)
            .build(&keys)
            .map_err(|e| BayesFilterError::Anyhow(anyhow::Error::from(e)))?;

        Ok(Self { ac, replacements })
    }

    /// Create a filter that deletes every occurrence of the given patterns.
    pub fn removing<I, K>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        Self::new(patterns.into_iter().map(|p| (p, "")))
    }

    /// Number of patterns this filter matches.
    pub fn pattern_count(&self) -> usize {
        self.replacements.len()
    }
}

impl CharFilter for MappingCharFilter {
    fn filter(&self, input: &str) -> String {
        let mut output = String::with_capacity(input.len());
        let mut last_match_end = 0;

        for m in self.ac.find_iter(input) {
            output.push_str(&input[last_match_end..m.start()]);
            output.push_str(&self.replacements[m.pattern().as_usize()]);
            last_match_end = m.end();
        }

        output.push_str(&input[last_match_end..]);
        output
    }

    fn name(&self) -> &'static str {
        "mapping"
    }
}
