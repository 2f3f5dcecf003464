//! Command implementations for the bf CLI.

use log::{info, warn};

use crate::analysis::analyzer::{Analyzer, PhraseAnalyzer};
use crate::classifier::{BAD_CLASS, GOOD_CLASS, NaiveBayesClassifier, Trainer};
use crate::cli::args::{BfArgs, Mode};
use crate::cli::output::*;
use crate::config::FilterConfig;
use crate::error::{BayesFilterError, Result};

/// Number of tokens listed per class by `--stats`.
const TOP_TOKENS: usize = 10;

/// Execute the mode selected on the command line.
pub fn execute_command(args: &BfArgs) -> Result<()> {
    let mode = args
        .mode()
        .ok_or_else(|| BayesFilterError::invalid_config("no mode selected"))?;
    let config = args.resolve_config()?;

    match mode {
        Mode::Learn => {
            let report = learn(&config)?;
            output_result(&report, args.output_format, args.verbosity())
        }
        Mode::Phrase(phrase) => {
            let report = score_phrase(&config, &phrase)?;
            output_result(&report, args.output_format, args.verbosity())
        }
        Mode::Stats => {
            let report = show_stats(&config)?;
            output_result(&report, args.output_format, args.verbosity())
        }
    }
}

/// Train on both corpora and save the model.
pub fn learn(config: &FilterConfig) -> Result<TrainingReport> {
    let analyzer = PhraseAnalyzer::new(config.tokenization)?;
    let mut classifier =
        NaiveBayesClassifier::new(config.class_set()?).with_tokenization(config.tokenization);

    let mut corpora = Vec::with_capacity(2);
    {
        let mut trainer = Trainer::new(&mut classifier, &analyzer);
        for (path, class) in [
            (&config.good_corpus_path, GOOD_CLASS),
            (&config.bad_corpus_path, BAD_CLASS),
        ] {
            let stats = trainer.feed_file(path, class)?;
            if stats.examples_learned == 0 {
                warn!("{} contributed no examples to {class}", path.display());
            }
            corpora.push(CorpusReport {
                path: path.display().to_string(),
                class: class.to_string(),
                stats,
            });
        }
    }

    classifier.save(&config.artifact_path)?;

    Ok(TrainingReport {
        corpora,
        artifact_path: config.artifact_path.display().to_string(),
        tokenization: config.tokenization.to_string(),
        vocabulary_size: classifier.model().vocabulary_size(),
    })
}

/// Load the model and score one phrase.
pub fn score_phrase(config: &FilterConfig, phrase: &str) -> Result<ScoreReport> {
    let classifier = load_classifier(config)?;
    let analyzer = PhraseAnalyzer::new(classifier.tokenization())?;

    let tokens = analyzer.analyze_to_strings(phrase)?;
    let scores = classifier.score(&tokens)?;
    info!("{phrase:?} scored best as {}", scores.best());

    Ok(ScoreReport::new(phrase, tokens, &scores))
}

/// Load the model and summarize it.
pub fn show_stats(config: &FilterConfig) -> Result<ModelStatsReport> {
    let classifier = load_classifier(config)?;

    let top_tokens = classifier
        .classes()
        .iter()
        .zip(classifier.model().classes())
        .map(|(label, freq)| TopTokens {
            label: label.to_string(),
            tokens: freq.top_tokens(TOP_TOKENS),
        })
        .collect();

    Ok(ModelStatsReport {
        artifact_path: config.artifact_path.display().to_string(),
        stats: classifier.stats(),
        top_tokens,
    })
}

fn load_classifier(config: &FilterConfig) -> Result<NaiveBayesClassifier> {
    let classifier = NaiveBayesClassifier::load(&config.artifact_path)?;

    if classifier.classes().labels() != config.class_labels.as_slice() {
        warn!(
            "model classes {} differ from configured {:?}; using the model's",
            classifier.classes(),
            config.class_labels
        );
    }
    if classifier.tokenization() != config.tokenization {
        warn!(
            "model was trained with '{}' tokenization but '{}' is configured; using the model's",
            classifier.tokenization(),
            config.tokenization
        );
    }
    Ok(classifier)
}
