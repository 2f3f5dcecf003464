//! Log-space Naive Bayes scoring with add-one smoothing.
//!
//! For each class `c` with vocabulary size `V`:
//!
//! ```text
//! score(c) = ln(examples[c] / Σ examples) + Σ_t ln((freq[c][t] + 1) / (total_words[c] + V))
//! ```
//!
//! Unseen tokens still contribute a finite term, so a single
//! out-of-vocabulary word cannot zero out a class.

use serde::Serialize;

use crate::classifier::class::ClassSet;
use crate::classifier::model::FrequencyModel;
use crate::error::{BayesFilterError, Result};

/// Stateless Naive Bayes scorer.
#[derive(Debug, Clone, Copy, Default)]
pub struct Scorer;

impl Scorer {
    /// Create a new scorer.
    pub fn new() -> Self {
        Scorer
    }

    /// Score a token sequence against every class.
    pub fn score<I, S>(&self, model: &FrequencyModel, classes: &ClassSet, tokens: I) -> Result<Scores>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if model.class_count() != classes.len() {
            return Err(BayesFilterError::other(format!(
                "model has {} classes but the class set has {}",
                model.class_count(),
                classes.len()
            )));
        }

        let vocabulary = model.vocabulary_size();
        if vocabulary == 0 {
            return Err(BayesFilterError::empty_model(
                "no tokens have been learned; train the classifier first",
            ));
        }

        let total_examples = model.total_examples();
        if total_examples == 0 {
            return Err(BayesFilterError::empty_model(
                "no training examples have been learned; train the classifier first",
            ));
        }

        let tokens: Vec<S> = tokens.into_iter().collect();
        let vocabulary = vocabulary as f64;
        let total_examples = total_examples as f64;

        let scores = model
            .classes()
            .iter()
            .map(|class| {
                if class.examples == 0 {
                    return f64::NEG_INFINITY;
                }

                let prior = class.examples as f64 / total_examples;
                let denominator = class.total_words as f64 + vocabulary;
                tokens.iter().fold(prior.ln(), |acc, token| {
                    let count = class.count(token.as_ref()) as f64;
                    acc + ((count + 1.0) / denominator).ln()
                })
            })
            .collect();

        Scores::new(classes.labels().to_vec(), scores)
    }
}

/// Per-class log-scores in class order, with the argmax resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scores {
    labels: Vec<String>,
    scores: Vec<f64>,
    best: usize,
}

impl Scores {
    /// Pair labels with scores and pick the best one.
    ///
    /// Ties keep the earliest class. Both vectors must be non-empty and of
    /// equal length.
    pub(crate) fn new(labels: Vec<String>, scores: Vec<f64>) -> Result<Self> {
        if scores.is_empty() || labels.len() != scores.len() {
            return Err(BayesFilterError::other(format!(
                "{} labels for {} scores",
                labels.len(),
                scores.len()
            )));
        }

        let mut best = 0;
        for (index, &score) in scores.iter().enumerate().skip(1) {
            if score > scores[best] {
                best = index;
            }
        }

        Ok(Scores {
            labels,
            scores,
            best,
        })
    }

    /// Label of the highest-scoring class.
    pub fn best(&self) -> &str {
        &self.labels[self.best]
    }

    /// Index of the highest-scoring class.
    pub fn best_index(&self) -> usize {
        self.best
    }

    /// Log-score of the highest-scoring class.
    pub fn best_score(&self) -> f64 {
        self.scores[self.best]
    }

    /// Log-score for a label.
    pub fn get(&self, label: &str) -> Option<f64> {
        self.labels
            .iter()
            .position(|l| l == label)
            .map(|index| self.scores[index])
    }

    /// `(label, log-score)` pairs in class order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.scores.iter().copied())
    }

    /// Number of scored classes.
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Whether no class was scored.
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// True when the best score is strictly greater than every other one.
    pub fn is_strict(&self) -> bool {
        let best = self.best_score();
        self.scores
            .iter()
            .enumerate()
            .all(|(index, &score)| index == self.best || score < best)
    }

    /// Normalized posteriors via log-sum-exp, in class order.
    ///
    /// Uniform when every class scores `-inf`.
    pub fn probabilities(&self) -> Vec<(String, f64)> {
        let max = self.best_score();
        let n = self.scores.len() as f64;

        let weights: Vec<f64> = if max == f64::NEG_INFINITY {
            vec![1.0; self.scores.len()]
        } else {
            self.scores.iter().map(|&s| (s - max).exp()).collect()
        };
        let sum: f64 = weights.iter().sum();

        self.labels
            .iter()
            .zip(weights)
            .map(|(label, weight)| {
                let p = if sum > 0.0 { weight / sum } else { 1.0 / n };
                (label.clone(), p)
            })
            .collect()
    }
}
