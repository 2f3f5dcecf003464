//! Per-class word frequency tables.
//!
//! Invariant: for every class, `total_words` equals the sum of the counts in
//! `word_freq`, and no entry has a zero count. A class with no examples has
//! no words, and the examples of all classes sum without overflowing a
//! `u64`. Training only ever adds, so the invariant holds by construction;
//! [`FrequencyModel::from_classes`] verifies it for tables rebuilt from an
//! artifact.

use ahash::{AHashMap, AHashSet};

use crate::error::{BayesFilterError, Result};

/// Word counts learned for one class.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassFrequencies {
    /// Occurrences of each token in this class.
    pub word_freq: AHashMap<String, u64>,
    /// Sum of all counts in `word_freq`.
    pub total_words: u64,
    /// Number of training examples fed to this class.
    pub examples: u64,
}

impl ClassFrequencies {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count of a token in this class, zero when unseen.
    pub fn count(&self, token: &str) -> u64 {
        self.word_freq.get(token).copied().unwrap_or(0)
    }

    /// Number of distinct tokens seen in this class.
    pub fn distinct_tokens(&self) -> usize {
        self.word_freq.len()
    }

    /// Record one training example. Returns the number of tokens counted.
    pub fn record<I, S>(&mut self, tokens: I) -> u64
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut counted = 0;
        for token in tokens {
            let token = token.as_ref();
            match self.word_freq.get_mut(token) {
                Some(count) => *count += 1,
                None => {
                    self.word_freq.insert(token.to_string(), 1);
                }
            }
            counted += 1;
        }

        self.total_words += counted;
        self.examples += 1;
        counted
    }

    /// Entries sorted by token, for deterministic serialization.
    pub fn sorted_entries(&self) -> Vec<(&str, u64)> {
        let mut entries: Vec<(&str, u64)> = self
            .word_freq
            .iter()
            .map(|(token, &count)| (token.as_str(), count))
            .collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries
    }

    /// The `n` most frequent tokens, count descending then token ascending.
    pub fn top_tokens(&self, n: usize) -> Vec<(String, u64)> {
        let mut entries = self.sorted_entries();
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries
            .into_iter()
            .take(n)
            .map(|(token, count)| (token.to_string(), count))
            .collect()
    }

    /// Verify the table invariant.
    pub fn check(&self) -> Result<()> {
        let mut sum: u64 = 0;
        for (token, &count) in &self.word_freq {
            if count == 0 {
                return Err(BayesFilterError::corrupt_artifact(format!(
                    "token '{token}' has a zero count"
                )));
            }
            sum = sum.checked_add(count).ok_or_else(|| {
                BayesFilterError::corrupt_artifact("word counts overflow u64")
            })?;
        }

        if sum != self.total_words {
            return Err(BayesFilterError::corrupt_artifact(format!(
                "total_words is {} but the entries sum to {sum}",
                self.total_words
            )));
        }

        if self.examples == 0 && self.total_words > 0 {
            return Err(BayesFilterError::corrupt_artifact(format!(
                "{} words recorded without any example",
                self.total_words
            )));
        }

        Ok(())
    }
}

/// Frequency tables for every class, in class order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyModel {
    classes: Vec<ClassFrequencies>,
}

impl FrequencyModel {
    /// Create an empty model for `class_count` classes.
    pub fn new(class_count: usize) -> Self {
        FrequencyModel {
            classes: vec![ClassFrequencies::new(); class_count],
        }
    }

    /// Build a model from existing tables, checking each one.
    pub fn from_classes(classes: Vec<ClassFrequencies>) -> Result<Self> {
        let mut examples: u64 = 0;
        for class in &classes {
            class.check()?;
            examples = examples.checked_add(class.examples).ok_or_else(|| {
                BayesFilterError::corrupt_artifact("example counts overflow u64")
            })?;
        }
        Ok(FrequencyModel { classes })
    }

    /// Number of classes.
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// Table for the class at `index`.
    pub fn class(&self, index: usize) -> Option<&ClassFrequencies> {
        self.classes.get(index)
    }

    /// All tables in class order.
    pub fn classes(&self) -> &[ClassFrequencies] {
        &self.classes
    }

    /// Record one example for the class at `index`.
    ///
    /// Returns the number of tokens counted.
    pub fn learn<I, S>(&mut self, index: usize, tokens: I) -> Result<u64>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let class = self.classes.get_mut(index).ok_or_else(|| {
            BayesFilterError::other(format!("class index {index} out of range"))
        })?;
        Ok(class.record(tokens))
    }

    /// Number of distinct tokens across all classes.
    pub fn vocabulary_size(&self) -> usize {
        let mut vocabulary: AHashSet<&str> = AHashSet::new();
        for class in &self.classes {
            vocabulary.extend(class.word_freq.keys().map(String::as_str));
        }
        vocabulary.len()
    }

    /// Sum of examples across all classes.
    ///
    /// Cannot overflow: tables from an artifact were summed with
    /// `checked_add` in [`from_classes`](Self::from_classes).
    pub fn total_examples(&self) -> u64 {
        self.classes.iter().map(|c| c.examples).sum()
    }

    /// Whether nothing has been learned yet.
    pub fn is_empty(&self) -> bool {
        self.classes.iter().all(|c| c.word_freq.is_empty())
    }
}
