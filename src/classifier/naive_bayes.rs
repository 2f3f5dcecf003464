//! The classifier facade: a class set plus the frequency tables learned for it.

use std::path::Path;

use log::debug;
use serde::Serialize;

use crate::analysis::analyzer::{Analyzer, TokenizationMode};
use crate::classifier::class::ClassSet;
use crate::classifier::codec;
use crate::classifier::model::FrequencyModel;
use crate::classifier::scorer::{Scorer, Scores};
use crate::error::{BayesFilterError, Result};

/// Multinomial Naive Bayes text classifier.
///
/// # Examples
///
/// ```
/// use bayesfilter::classifier::NaiveBayesClassifier;
///
/// let mut classifier = NaiveBayesClassifier::from_labels(["Good", "Bad"]).unwrap();
/// classifier.learn(["great"], "Good").unwrap();
/// classifier.learn(["awful"], "Bad").unwrap();
///
/// let scores = classifier.score(["great"]).unwrap();
/// assert_eq!(scores.best(), "Good");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NaiveBayesClassifier {
    classes: ClassSet,
    model: FrequencyModel,
    /// How training text was tokenized; persisted with the model.
    tokenization: TokenizationMode,
}

impl NaiveBayesClassifier {
    /// Create an untrained classifier over the given classes.
    pub fn new(classes: ClassSet) -> Self {
        let model = FrequencyModel::new(classes.len());
        NaiveBayesClassifier {
            classes,
            model,
            tokenization: TokenizationMode::default(),
        }
    }

    /// Create an untrained classifier from raw labels.
    pub fn from_labels<I, S>(labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Self::new(ClassSet::new(labels)?))
    }

    /// Assemble a classifier from already-learned tables.
    pub fn from_parts(classes: ClassSet, model: FrequencyModel) -> Result<Self> {
        if classes.len() != model.class_count() {
            return Err(BayesFilterError::other(format!(
                "{} labels but {} frequency tables",
                classes.len(),
                model.class_count()
            )));
        }
        Ok(NaiveBayesClassifier {
            classes,
            model,
            tokenization: TokenizationMode::default(),
        })
    }

    /// Record the tokenization mode the counts are learned under.
    pub fn with_tokenization(mut self, tokenization: TokenizationMode) -> Self {
        self.tokenization = tokenization;
        self
    }

    /// The tokenization mode the counts were learned under.
    pub fn tokenization(&self) -> TokenizationMode {
        self.tokenization
    }

    /// The configured classes.
    pub fn classes(&self) -> &ClassSet {
        &self.classes
    }

    /// The learned frequency tables.
    pub fn model(&self) -> &FrequencyModel {
        &self.model
    }

    /// Learn one example of `class`.
    ///
    /// Fails with `UnknownClass` before touching any count.
    pub fn learn<I, S>(&mut self, tokens: I, class: &str) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.learn_counted(tokens, class).map(|_| ())
    }

    /// Like [`learn`](Self::learn) but returns how many tokens were counted.
    pub fn learn_counted<I, S>(&mut self, tokens: I, class: &str) -> Result<u64>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let index = self.classes.resolve(class)?;
        self.model.learn(index, tokens)
    }

    /// Score a token sequence against every class.
    pub fn score<I, S>(&self, tokens: I) -> Result<Scores>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Scorer::new().score(&self.model, &self.classes, tokens)
    }

    /// Analyze a raw phrase and score the resulting tokens.
    pub fn score_phrase(&self, analyzer: &dyn Analyzer, phrase: &str) -> Result<Scores> {
        let tokens = analyzer.analyze_to_strings(phrase)?;
        debug!("scoring {phrase:?} as {tokens:?}");
        self.score(&tokens)
    }

    /// Best class label for a token sequence.
    pub fn classify<I, S>(&self, tokens: I) -> Result<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(self.score(tokens)?.best().to_string())
    }

    /// Raw counts of each token, per class in class order.
    pub fn word_frequencies<I, S>(&self, tokens: I) -> Vec<Vec<u64>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        tokens
            .into_iter()
            .map(|token| {
                self.model
                    .classes()
                    .iter()
                    .map(|class| class.count(token.as_ref()))
                    .collect()
            })
            .collect()
    }

    /// Summary counts for every class.
    pub fn stats(&self) -> ModelStats {
        let classes = self
            .classes
            .iter()
            .zip(self.model.classes())
            .map(|(label, freq)| ClassStats {
                label: label.to_string(),
                examples: freq.examples,
                total_words: freq.total_words,
                distinct_tokens: freq.distinct_tokens(),
            })
            .collect();

        ModelStats {
            classes,
            vocabulary_size: self.model.vocabulary_size(),
            total_examples: self.model.total_examples(),
        }
    }

    /// Whether nothing has been learned yet.
    pub fn is_empty(&self) -> bool {
        self.model.is_empty()
    }

    /// Persist the classifier to `path`.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        codec::save(self, path)
    }

    /// Load a classifier from `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        codec::load(path)
    }
}

/// Per-class summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassStats {
    pub label: String,
    pub examples: u64,
    pub total_words: u64,
    pub distinct_tokens: usize,
}

/// Summary of a trained model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelStats {
    pub classes: Vec<ClassStats>,
    pub vocabulary_size: usize,
    pub total_examples: u64,
}
