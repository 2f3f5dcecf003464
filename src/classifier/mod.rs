//! Naive Bayes text classification.
//!
//! - [`ClassSet`] - the fixed, ordered class labels
//! - [`FrequencyModel`] - per-class word counts
//! - [`Trainer`] - feeds analyzed corpora into a classifier
//! - [`Scorer`] - log-space scoring with add-one smoothing
//! - [`NaiveBayesClassifier`] - the facade tying them together
//! - [`codec`] - the binary artifact the model is persisted as

pub mod class;
pub mod codec;
pub mod model;
pub mod naive_bayes;
pub mod scorer;
pub mod trainer;

pub use class::{BAD_CLASS, ClassSet, GOOD_CLASS};
pub use model::{ClassFrequencies, FrequencyModel};
pub use naive_bayes::{ClassStats, ModelStats, NaiveBayesClassifier};
pub use scorer::{Scorer, Scores};
pub use trainer::{FeedStats, Trainer, TrainingExample};
