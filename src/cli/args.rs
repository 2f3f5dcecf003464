//! Command line argument parsing for the bf CLI using clap.

use std::path::PathBuf;

use clap::{ArgGroup, Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::TokenizationMode;
use crate::config::FilterConfig;
use crate::error::Result;

/// bf - Naive Bayes good/bad phrase filter
#[derive(Parser, Debug, Clone)]
#[command(name = "bf")]
#[command(about = "Train a good/bad phrase filter and score phrases against it")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
#[command(group(ArgGroup::new("mode").args(["learn", "phrase", "stats"])))]
pub struct BfArgs {
    /// Train from both corpora and save the model
    #[arg(short, long)]
    pub learn: bool,

    /// Score a phrase against the saved model
    #[arg(short, long, value_name = "TEXT")]
    pub phrase: Option<String>,

    /// Show statistics about the saved model
    #[arg(short, long)]
    pub stats: bool,

    /// JSON configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Corpus of good phrases, one per line
    #[arg(long, value_name = "FILE")]
    pub good_corpus: Option<PathBuf>,

    /// Corpus of bad phrases, one per line
    #[arg(long, value_name = "FILE")]
    pub bad_corpus: Option<PathBuf>,

    /// Path of the trained model
    #[arg(short, long, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// How lines are split into tokens
    #[arg(short, long, value_name = "MODE")]
    pub tokenization: Option<TokenizationModeArg>,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Verbosity level (repeat for more detail)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,
}

impl BfArgs {
    /// Get the effective verbosity level.
    ///
    /// 0 = errors only, 1 = warnings (default), 2 = info, 3+ = debug.
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose.saturating_add(1)
        }
    }

    /// The selected mode, if any.
    pub fn mode(&self) -> Option<Mode> {
        if self.learn {
            Some(Mode::Learn)
        } else if let Some(phrase) = &self.phrase {
            Some(Mode::Phrase(phrase.clone()))
        } else if self.stats {
            Some(Mode::Stats)
        } else {
            None
        }
    }

    /// Layer the flags over the config file (if any) and the defaults.
    pub fn resolve_config(&self) -> Result<FilterConfig> {
        let mut config = match &self.config {
            Some(path) => FilterConfig::from_file(path)?,
            None => FilterConfig::default(),
        };

        if let Some(path) = &self.good_corpus {
            config = config.with_good_corpus_path(path);
        }
        if let Some(path) = &self.bad_corpus {
            config = config.with_bad_corpus_path(path);
        }
        if let Some(path) = &self.data {
            config = config.with_artifact_path(path);
        }
        if let Some(mode) = self.tokenization {
            config = config.with_tokenization(mode.into());
        }

        config.validate()?;
        Ok(config)
    }
}

/// What the invocation should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Learn,
    Phrase(String),
    Stats,
}

/// Tokenization mode as accepted on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenizationModeArg {
    /// One token per word
    Whitespace,
    /// The whole line is one token (degenerate)
    Whole,
}

impl From<TokenizationModeArg> for TokenizationMode {
    fn from(arg: TokenizationModeArg) -> Self {
        match arg {
            TokenizationModeArg::Whitespace => TokenizationMode::Whitespace,
            TokenizationModeArg::Whole => TokenizationMode::Whole,
        }
    }
}

/// Output format options.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
