//! Output formatting for CLI commands.

use std::io::{self, Write};

use serde::{Serialize, Serializer};

use crate::classifier::{FeedStats, ModelStats, Scores};
use crate::cli::args::OutputFormat;
use crate::error::Result;

/// Reports that know how to print themselves for people.
pub trait HumanReadable {
    /// Write the human-readable form. Extra detail appears at verbosity 2+.
    fn write_human(&self, out: &mut dyn Write, verbosity: u8) -> io::Result<()>;
}

/// One corpus pass within a training run.
#[derive(Debug, Clone, Serialize)]
pub struct CorpusReport {
    pub path: String,
    pub class: String,
    #[serde(flatten)]
    pub stats: FeedStats,
}

/// Result of `--learn`.
#[derive(Debug, Clone, Serialize)]
pub struct TrainingReport {
    pub corpora: Vec<CorpusReport>,
    pub artifact_path: String,
    pub tokenization: String,
    pub vocabulary_size: usize,
}

/// Score of one class for a phrase.
#[derive(Debug, Clone, Serialize)]
pub struct ClassScore {
    pub label: String,
    /// A class with no examples scores `-inf`, written to JSON as `"-inf"`.
    #[serde(serialize_with = "serialize_log_score")]
    pub log_score: f64,
    pub probability: f64,
}

// JSON has no infinities; serde_json would otherwise emit `null`.
fn serialize_log_score<S>(score: &f64, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if score.is_finite() {
        serializer.serialize_f64(*score)
    } else {
        serializer.serialize_str(&score.to_string())
    }
}

/// Result of `--phrase`.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreReport {
    pub phrase: String,
    pub tokens: Vec<String>,
    pub scores: Vec<ClassScore>,
    pub best: String,
    pub strict: bool,
}

impl ScoreReport {
    /// Build a report from scored tokens.
    pub fn new(phrase: &str, tokens: Vec<String>, scores: &Scores) -> Self {
        let probabilities = scores.probabilities();
        let scores_by_class = scores
            .iter()
            .zip(probabilities)
            .map(|((label, log_score), (_, probability))| ClassScore {
                label: label.to_string(),
                log_score,
                probability,
            })
            .collect();

        ScoreReport {
            phrase: phrase.to_string(),
            tokens,
            scores: scores_by_class,
            best: scores.best().to_string(),
            strict: scores.is_strict(),
        }
    }
}

/// Most frequent tokens of one class.
#[derive(Debug, Clone, Serialize)]
pub struct TopTokens {
    pub label: String,
    pub tokens: Vec<(String, u64)>,
}

/// Result of `--stats`.
#[derive(Debug, Clone, Serialize)]
pub struct ModelStatsReport {
    pub artifact_path: String,
    #[serde(flatten)]
    pub stats: ModelStats,
    pub top_tokens: Vec<TopTokens>,
}

impl HumanReadable for TrainingReport {
    fn write_human(&self, out: &mut dyn Write, verbosity: u8) -> io::Result<()> {
        for corpus in &self.corpora {
            writeln!(
                out,
                "{}: learned {} examples ({} tokens) from {}",
                corpus.class, corpus.stats.examples_learned, corpus.stats.tokens_learned, corpus.path
            )?;
            if verbosity > 1 {
                writeln!(
                    out,
                    "  lines read: {}, skipped: {}",
                    corpus.stats.lines_read, corpus.stats.lines_skipped
                )?;
            }
        }
        writeln!(
            out,
            "Saved model to {} (vocabulary: {} tokens, tokenization: {})",
            self.artifact_path, self.vocabulary_size, self.tokenization
        )
    }
}

impl HumanReadable for ScoreReport {
    fn write_human(&self, out: &mut dyn Write, verbosity: u8) -> io::Result<()> {
        if verbosity > 1 {
            writeln!(out, "Tokens: {}", self.tokens.join(" "))?;
        }
        for score in &self.scores {
            writeln!(out, "{}: {}", score.label, score.log_score)?;
        }
        if verbosity > 1 {
            for score in &self.scores {
                writeln!(out, "P({}) = {:.6}", score.label, score.probability)?;
            }
        }
        writeln!(out, "Best: {}", self.best)
    }
}

impl HumanReadable for ModelStatsReport {
    fn write_human(&self, out: &mut dyn Write, verbosity: u8) -> io::Result<()> {
        writeln!(out, "Model: {}", self.artifact_path)?;
        writeln!(out, "Vocabulary: {} tokens", self.stats.vocabulary_size)?;
        writeln!(out, "Examples: {}", self.stats.total_examples)?;
        for class in &self.stats.classes {
            writeln!(
                out,
                "{}: {} examples, {} words, {} distinct",
                class.label, class.examples, class.total_words, class.distinct_tokens
            )?;
        }

        if verbosity > 1 {
            for top in &self.top_tokens {
                let tokens: Vec<String> = top
                    .tokens
                    .iter()
                    .map(|(token, count)| format!("{token} ({count})"))
                    .collect();
                writeln!(out, "Top {}: {}", top.label, tokens.join(", "))?;
            }
        }
        Ok(())
    }
}

/// Write a report in the requested format.
pub fn write_result<T, W>(out: &mut W, result: &T, format: OutputFormat, verbosity: u8) -> Result<()>
where
    T: HumanReadable + Serialize,
    W: Write,
{
    match format {
        OutputFormat::Human => result.write_human(out, verbosity)?,
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(result)?)?,
    }
    Ok(())
}

/// Print a report to stdout in the requested format.
pub fn output_result<T>(result: &T, format: OutputFormat, verbosity: u8) -> Result<()>
where
    T: HumanReadable + Serialize,
{
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_result(&mut out, result, format, verbosity)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render<T: HumanReadable + Serialize>(result: &T, format: OutputFormat, verbosity: u8) -> String {
        let mut out = Vec::new();
        write_result(&mut out, result, format, verbosity).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn score_report() -> ScoreReport {
        let scores = Scores::new(
            vec!["Bad".to_string(), "Good".to_string()],
            vec![-4.5, -2.25],
        )
        .unwrap();
        ScoreReport::new("Great!", vec!["great".to_string()], &scores)
    }

    #[test]
    fn test_score_report_human() {
        let text = render(&score_report(), OutputFormat::Human, 1);
        assert_eq!(text, "Bad: -4.5\nGood: -2.25\nBest: Good\n");

        let text = render(&score_report(), OutputFormat::Human, 2);
        assert!(text.starts_with("Tokens: great\n"));
        assert!(text.contains("P(Good) = "));
    }

    #[test]
    fn test_score_report_json() {
        let text = render(&score_report(), OutputFormat::Json, 1);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value["best"], "Good");
        assert_eq!(value["strict"], true);
        assert_eq!(value["scores"][1]["label"], "Good");
        assert_eq!(value["scores"][1]["log_score"], -2.25);
    }

    #[test]
    fn test_empty_class_scores_negative_infinity_in_json() {
        let scores = Scores::new(
            vec!["Bad".to_string(), "Good".to_string()],
            vec![f64::NEG_INFINITY, -1.5],
        )
        .unwrap();
        let report = ScoreReport::new("great", vec!["great".to_string()], &scores);

        let text = render(&report, OutputFormat::Json, 1);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["scores"][0]["log_score"], "-inf");
        assert_eq!(value["scores"][0]["probability"], 0.0);
        assert_eq!(value["scores"][1]["log_score"], -1.5);

        let text = render(&report, OutputFormat::Human, 1);
        assert!(text.starts_with("Bad: -inf\n"));
    }

    #[test]
    fn test_training_report_flattens_stats() {
        let report = TrainingReport {
            corpora: vec![CorpusReport {
                path: "good.txt".to_string(),
                class: "Good".to_string(),
                stats: FeedStats {
                    lines_read: 3,
                    examples_learned: 2,
                    lines_skipped: 1,
                    tokens_learned: 5,
                },
            }],
            artifact_path: "data.bin".to_string(),
            tokenization: "whitespace".to_string(),
            vocabulary_size: 4,
        };

        let value: serde_json::Value =
            serde_json::from_str(&render(&report, OutputFormat::Json, 1)).unwrap();
        assert_eq!(value["corpora"][0]["examples_learned"], 2);

        let text = render(&report, OutputFormat::Human, 1);
        assert!(text.contains("Good: learned 2 examples (5 tokens) from good.txt"));
        assert!(text.contains("vocabulary: 4 tokens"));
    }
}
