use std::fs;
use std::io::Cursor;

use bayesfilter::analysis::analyzer::{Analyzer, PhraseAnalyzer, TokenizationMode};
use bayesfilter::analysis::normalize;
use bayesfilter::classifier::{BAD_CLASS, GOOD_CLASS, NaiveBayesClassifier, Trainer};
use bayesfilter::cli::commands::{learn, score_phrase, show_stats};
use bayesfilter::config::FilterConfig;
use bayesfilter::error::Result;
use tempfile::TempDir;

const GOOD_CORPUS: &str = "Thank you, that was lovely!\nGreat job\r\n\nwell done, TEAM\n";
const BAD_CORPUS: &str = "That was awful.\n  terrible   job  \n(rude)\n--\nshame on you";

#[test]
fn test_normalize_examples() {
    assert_eq!(normalize("Hello,  World!\n"), "hello world");
    assert_eq!(normalize("\t  \"Quoted\" -- text;\r\n\r\nmore "), "quoted text more");
    assert_eq!(normalize(""), "");

    for input in [GOOD_CORPUS, BAD_CORPUS, "  . a\t\tB ! "] {
        let once = normalize(input);
        assert_eq!(normalize(&once), once);
        assert!(!once.contains("  "));
        assert!(!once.starts_with(' ') && !once.ends_with(' '));
    }
}

#[test]
fn test_trainer_over_corpora() -> Result<()> {
    let analyzer = PhraseAnalyzer::new(TokenizationMode::Whitespace)?;
    let mut classifier = NaiveBayesClassifier::from_labels([BAD_CLASS, GOOD_CLASS])?;

    let (good, bad) = {
        let mut trainer = Trainer::new(&mut classifier, &analyzer);
        (
            trainer.feed_reader(Cursor::new(GOOD_CORPUS), GOOD_CLASS)?,
            trainer.feed_reader(Cursor::new(BAD_CORPUS), BAD_CLASS)?,
        )
    };

    assert_eq!(good.lines_read, 4);
    assert_eq!(good.examples_learned, 3);
    assert_eq!(good.lines_skipped, 1);
    assert_eq!(bad.lines_read, 5);
    assert_eq!(bad.examples_learned, 4);
    assert_eq!(bad.lines_skipped, 1);

    let tokens = analyzer.analyze_to_strings("What a lovely team!")?;
    assert_eq!(classifier.classify(&tokens)?, GOOD_CLASS);

    let tokens = analyzer.analyze_to_strings("RUDE and awful")?;
    assert_eq!(classifier.classify(&tokens)?, BAD_CLASS);
    Ok(())
}

#[test]
fn test_whole_line_mode_learns_lines() -> Result<()> {
    let analyzer = PhraseAnalyzer::new(TokenizationMode::Whole)?;
    let mut classifier = NaiveBayesClassifier::from_labels([BAD_CLASS, GOOD_CLASS])?;
    Trainer::new(&mut classifier, &analyzer).feed_reader(Cursor::new(GOOD_CORPUS), GOOD_CLASS)?;

    let good = classifier.model().class(1).unwrap();
    assert_eq!(good.count("great job"), 1);
    assert_eq!(good.count("great"), 0);
    assert_eq!(good.total_words, 3);
    Ok(())
}

#[test]
fn test_feed_missing_file_names_path() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("good_dictionary.txt");

    let analyzer = PhraseAnalyzer::default();
    let mut classifier = NaiveBayesClassifier::from_labels([BAD_CLASS, GOOD_CLASS]).unwrap();
    let err = Trainer::new(&mut classifier, &analyzer)
        .feed_file(&missing, GOOD_CLASS)
        .unwrap_err();

    assert!(err.is_io());
    assert!(err.to_string().contains("good_dictionary.txt"));
    assert!(classifier.is_empty());
}

#[test]
fn test_learn_score_stats_end_to_end() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let good = temp_dir.path().join("good_dictionary.txt");
    let bad = temp_dir.path().join("bad_dictionary.txt");
    fs::write(&good, GOOD_CORPUS)?;
    fs::write(&bad, BAD_CORPUS)?;

    let config_path = temp_dir.path().join("bf.json");
    fs::write(
        &config_path,
        format!(
            r#"{{"good_corpus_path": {:?}, "bad_corpus_path": {:?}, "artifact_path": {:?}}}"#,
            good,
            bad,
            temp_dir.path().join("out").join("data.bin")
        ),
    )?;
    let config = FilterConfig::from_file(&config_path)?;

    let report = learn(&config)?;
    assert_eq!(report.corpora.len(), 2);
    assert!(report.vocabulary_size > 0);

    let report = score_phrase(&config, "lovely job, team")?;
    assert_eq!(report.best, GOOD_CLASS);
    assert_eq!(report.scores.len(), 2);

    let report = score_phrase(&config, "awful, rude")?;
    assert_eq!(report.best, BAD_CLASS);

    let stats = show_stats(&config)?;
    assert_eq!(stats.stats.total_examples, 7);
    assert_eq!(stats.stats.classes[1].label, GOOD_CLASS);
    Ok(())
}
