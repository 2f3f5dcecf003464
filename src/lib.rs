//! # bayesfilter
//!
//! A Naive Bayes phrase filter: learn "Good" and "Bad" phrases from two
//! line-oriented corpora, persist the learned word frequencies, and score new
//! phrases against them.
//!
//! ## Features
//!
//! - Phrase normalization through a pluggable char filter and tokenizer pipeline
//! - Multinomial Naive Bayes with add-one smoothing, scored in log space
//! - Checksummed binary model artifact written atomically
//! - `bf` command line tool
//!
//! ```
//! use bayesfilter::analysis::analyzer::{Analyzer, PhraseAnalyzer};
//! use bayesfilter::classifier::{NaiveBayesClassifier, GOOD_CLASS, BAD_CLASS};
//!
//! let analyzer = PhraseAnalyzer::default();
//! let mut classifier = NaiveBayesClassifier::from_labels([BAD_CLASS, GOOD_CLASS]).unwrap();
//! classifier.learn(analyzer.analyze_to_strings("What a lovely day!").unwrap(), GOOD_CLASS).unwrap();
//! classifier.learn(analyzer.analyze_to_strings("What an awful day.").unwrap(), BAD_CLASS).unwrap();
//!
//! let scores = classifier.score_phrase(&analyzer, "lovely").unwrap();
//! assert_eq!(scores.best(), GOOD_CLASS);
//! ```

pub mod analysis;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod error;
pub mod storage;
pub mod util;

pub mod prelude {
    pub use crate::analysis::analyzer::{Analyzer, PhraseAnalyzer, TokenizationMode};
    pub use crate::classifier::{
        BAD_CLASS, ClassSet, GOOD_CLASS, NaiveBayesClassifier, Scores, Trainer,
    };
    pub use crate::config::FilterConfig;
    pub use crate::error::{BayesFilterError, Result};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
