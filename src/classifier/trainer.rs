//! Feeding labeled corpora into a classifier.
//!
//! A corpus is a plain-text file with one training example per line. Each
//! line is run through the analyzer; lines that produce no tokens are
//! skipped rather than trained on.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, info, trace};
use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::Analyzer;
use crate::classifier::naive_bayes::NaiveBayesClassifier;
use crate::error::{BayesFilterError, Result};

/// One labeled token sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingExample {
    pub class: String,
    pub tokens: Vec<String>,
}

impl TrainingExample {
    /// Create a new training example.
    pub fn new<S: Into<String>>(class: S, tokens: Vec<String>) -> Self {
        TrainingExample {
            class: class.into(),
            tokens,
        }
    }
}

/// What one pass over a corpus did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedStats {
    /// Lines read from the input.
    pub lines_read: u64,
    /// Lines that produced at least one token and were learned.
    pub examples_learned: u64,
    /// Lines that normalized to nothing.
    pub lines_skipped: u64,
    /// Tokens counted across all learned examples.
    pub tokens_learned: u64,
}

/// Drives training of a classifier through an analyzer.
pub struct Trainer<'a> {
    classifier: &'a mut NaiveBayesClassifier,
    analyzer: &'a dyn Analyzer,
}

impl<'a> Trainer<'a> {
    /// Create a trainer for the given classifier and analyzer.
    pub fn new(classifier: &'a mut NaiveBayesClassifier, analyzer: &'a dyn Analyzer) -> Self {
        Trainer {
            classifier,
            analyzer,
        }
    }

    /// Learn an already-tokenized example.
    pub fn learn_example(&mut self, example: TrainingExample) -> Result<()> {
        self.classifier.learn(&example.tokens, &example.class)
    }

    /// Analyze and learn one raw line.
    ///
    /// Returns `false` when the line produced no tokens and was skipped.
    pub fn feed_line(&mut self, line: &str, class: &str) -> Result<bool> {
        Ok(self.feed_line_counted(line, class)?.is_some())
    }

    fn feed_line_counted(&mut self, line: &str, class: &str) -> Result<Option<u64>> {
        let tokens = self.analyzer.analyze_to_strings(line)?;
        if tokens.is_empty() {
            trace!("skipping empty line {line:?}");
            return Ok(None);
        }

        debug!("{class}: {line:?} -> {tokens:?}");
        self.classifier.learn_counted(&tokens, class).map(Some)
    }

    /// Learn every line of a reader as one example of `class`.
    pub fn feed_reader<R: BufRead>(&mut self, reader: R, class: &str) -> Result<FeedStats> {
        // Fail on a bad label even when the input is empty.
        self.classifier.classes().resolve(class)?;

        let mut stats = FeedStats::default();
        for line in reader.lines() {
            let line = line?;
            stats.lines_read += 1;

            match self.feed_line_counted(&line, class)? {
                Some(tokens) => {
                    stats.examples_learned += 1;
                    stats.tokens_learned += tokens;
                }
                None => stats.lines_skipped += 1,
            }
        }

        Ok(stats)
    }

    /// Learn every line of the file at `path` as one example of `class`.
    pub fn feed_file<P: AsRef<Path>>(&mut self, path: P, class: &str) -> Result<FeedStats> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| BayesFilterError::io_at(path, e))?;

        let stats = self
            .feed_reader(BufReader::new(file), class)
            .map_err(|e| match e {
                BayesFilterError::Io(err) => BayesFilterError::io_at(path, err),
                other => other,
            })?;

        info!(
            "learned {} examples ({} tokens) of {class} from {}; skipped {} empty lines",
            stats.examples_learned,
            stats.tokens_learned,
            path.display(),
            stats.lines_skipped
        );
        Ok(stats)
    }
}
