//! Filter configuration.
//!
//! Values come from three layers, later ones winning: built-in defaults, an
//! optional JSON file, then command line flags.
//!
//! ```json
//! {
//!   "good_corpus_path": "./data/good_dictionary.txt",
//!   "bad_corpus_path": "./data/bad_dictionary.txt",
//!   "artifact_path": "./data/data.bin",
//!   "class_labels": ["Bad", "Good"],
//!   "tokenization": "whitespace"
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::TokenizationMode;
use crate::classifier::class::ClassSet;
use crate::error::{BayesFilterError, Result};

pub use crate::classifier::class::{BAD_CLASS, GOOD_CLASS};

/// Default location of the good corpus.
pub const DEFAULT_GOOD_CORPUS_PATH: &str = "./data/good_dictionary.txt";

/// Default location of the bad corpus.
pub const DEFAULT_BAD_CORPUS_PATH: &str = "./data/bad_dictionary.txt";

/// Default location of the trained model.
pub const DEFAULT_ARTIFACT_PATH: &str = "./data/data.bin";

/// Paths, labels and tokenization for one filter setup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Corpus trained under [`GOOD_CLASS`].
    pub good_corpus_path: PathBuf,
    /// Corpus trained under [`BAD_CLASS`].
    pub bad_corpus_path: PathBuf,
    /// Where the trained model is saved and loaded.
    pub artifact_path: PathBuf,
    /// Classes in score and tie-break order.
    pub class_labels: Vec<String>,
    /// How lines are split into tokens.
    pub tokenization: TokenizationMode,
}

impl Default for FilterConfig {
    fn default() -> Self {
        FilterConfig {
            good_corpus_path: PathBuf::from(DEFAULT_GOOD_CORPUS_PATH),
            bad_corpus_path: PathBuf::from(DEFAULT_BAD_CORPUS_PATH),
            artifact_path: PathBuf::from(DEFAULT_ARTIFACT_PATH),
            class_labels: vec![BAD_CLASS.to_string(), GOOD_CLASS.to_string()],
            tokenization: TokenizationMode::default(),
        }
    }
}

impl FilterConfig {
    /// Load a configuration from a JSON file. Missing fields keep their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| BayesFilterError::io_at(path, e))?;
        let config: FilterConfig = serde_json::from_str(&content).map_err(|e| {
            BayesFilterError::invalid_config(format!("{}: {e}", path.display()))
        })?;
        Ok(config)
    }

    /// Check labels and paths.
    pub fn validate(&self) -> Result<()> {
        ClassSet::validate(&self.class_labels)?;

        for (name, path) in [
            ("good_corpus_path", &self.good_corpus_path),
            ("bad_corpus_path", &self.bad_corpus_path),
            ("artifact_path", &self.artifact_path),
        ] {
            if path.as_os_str().is_empty() {
                return Err(BayesFilterError::invalid_config(format!(
                    "{name} must not be empty"
                )));
            }
        }

        Ok(())
    }

    /// The configured labels as a validated class set.
    pub fn class_set(&self) -> Result<ClassSet> {
        ClassSet::new(self.class_labels.iter().cloned())
    }

    /// Builder-style override of the good corpus path.
    pub fn with_good_corpus_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.good_corpus_path = path.into();
        self
    }

    /// Builder-style override of the bad corpus path.
    pub fn with_bad_corpus_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.bad_corpus_path = path.into();
        self
    }

    /// Builder-style override of the artifact path.
    pub fn with_artifact_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.artifact_path = path.into();
        self
    }

    /// Builder-style override of the tokenization mode.
    pub fn with_tokenization(mut self, tokenization: TokenizationMode) -> Self {
        self.tokenization = tokenization;
        self
    }

    /// Builder-style override of the class labels.
    pub fn with_class_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.class_labels = labels.into_iter().map(Into::into).collect();
        self
    }
}
