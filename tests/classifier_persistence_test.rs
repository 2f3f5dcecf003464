use std::fs;

use bayesfilter::classifier::{ClassSet, NaiveBayesClassifier, codec};
use bayesfilter::error::{BayesFilterError, Result};
use tempfile::TempDir;

fn one_token_per_example() -> Result<NaiveBayesClassifier> {
    let mut classifier = NaiveBayesClassifier::new(ClassSet::new(["Good", "Bad"])?);
    for word in ["good", "great", "nice"] {
        classifier.learn([word], "Good")?;
    }
    for word in ["bad", "awful", "terrible"] {
        classifier.learn([word], "Bad")?;
    }
    Ok(classifier)
}

#[test]
fn test_great_scores_good() -> Result<()> {
    let classifier = one_token_per_example()?;
    let scores = classifier.score(["great"])?;

    assert!(scores.get("Good").unwrap() > scores.get("Bad").unwrap());
    assert_eq!(scores.best(), "Good");
    Ok(())
}

#[test]
fn test_unseen_tokens_stay_finite() -> Result<()> {
    let classifier = one_token_per_example()?;
    let scores = classifier.score(["never", "seen", "before"])?;

    for (label, score) in scores.iter() {
        assert!(score.is_finite(), "{label} scored {score}");
    }
    Ok(())
}

#[test]
fn test_empty_model_cannot_score() {
    let classifier = NaiveBayesClassifier::new(ClassSet::default());
    assert!(matches!(
        classifier.score(["great"]),
        Err(BayesFilterError::EmptyModel(_))
    ));
}

#[test]
fn test_save_load_reproduces_counts() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("data.bin");

    let mut classifier = one_token_per_example()?;
    classifier.learn(["great", "great", "service"], "Good")?;
    classifier.save(&path)?;

    let loaded = NaiveBayesClassifier::load(&path)?;
    assert_eq!(loaded.classes(), classifier.classes());
    for (original, restored) in classifier.model().classes().iter().zip(loaded.model().classes()) {
        assert_eq!(original.word_freq, restored.word_freq);
        assert_eq!(original.total_words, restored.total_words);
        assert_eq!(original.examples, restored.examples);
    }

    // Scoring the persisted model is deterministic
    let first = loaded.score(["great", "service"])?;
    let second = NaiveBayesClassifier::load(&path)?.score(["great", "service"])?;
    assert_eq!(first, second);
    assert_eq!(first, classifier.score(["great", "service"])?);
    Ok(())
}

#[test]
fn test_saving_twice_is_byte_identical() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let first = temp_dir.path().join("first.bin");
    let second = temp_dir.path().join("second.bin");

    let classifier = one_token_per_example()?;
    classifier.save(&first)?;
    NaiveBayesClassifier::load(&first)?.save(&second)?;

    assert_eq!(fs::read(&first)?, fs::read(&second)?);
    Ok(())
}

#[test]
fn test_truncated_artifact_is_io_error() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("data.bin");
    one_token_per_example()?.save(&path)?;

    let bytes = fs::read(&path)?;
    fs::write(&path, &bytes[..bytes.len() / 2])?;

    let err = NaiveBayesClassifier::load(&path).unwrap_err();
    assert!(err.is_io(), "expected an I/O error, got {err}");
    assert!(err.to_string().contains("data.bin"));
    Ok(())
}

#[test]
fn test_flipped_byte_is_corrupt() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("data.bin");
    one_token_per_example()?.save(&path)?;

    let mut bytes = fs::read(&path)?;
    let middle = bytes.len() / 2;
    bytes[middle] ^= 0xFF;
    fs::write(&path, &bytes)?;

    assert!(matches!(
        NaiveBayesClassifier::load(&path),
        Err(BayesFilterError::CorruptArtifact(_))
    ));
    Ok(())
}

#[test]
fn test_unknown_version_is_corrupt() -> Result<()> {
    let mut bytes = codec::encode(&one_token_per_example()?)?;
    bytes[4..8].copy_from_slice(&99u32.to_le_bytes());

    assert!(matches!(
        codec::decode(&bytes),
        Err(BayesFilterError::CorruptArtifact(_))
    ));
    Ok(())
}

#[test]
fn test_not_an_artifact_is_corrupt() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("data.bin");
    fs::write(&path, "great\nnice\n")?;

    assert!(matches!(
        NaiveBayesClassifier::load(&path),
        Err(BayesFilterError::CorruptArtifact(_))
    ));
    Ok(())
}

#[test]
fn test_unknown_class_leaves_counts_alone() -> Result<()> {
    let mut classifier = one_token_per_example()?;
    let before = classifier.stats();

    let err = classifier.learn(["great", "stuff"], "Neutral").unwrap_err();
    assert!(matches!(err, BayesFilterError::UnknownClass(ref label) if label == "Neutral"));
    assert_eq!(classifier.stats(), before);
    Ok(())
}

#[test]
fn test_probabilities_sum_to_one() -> Result<()> {
    let classifier = one_token_per_example()?;
    let scores = classifier.score(["great", "awful", "nice"])?;

    let probabilities = scores.probabilities();
    let sum: f64 = probabilities.iter().map(|(_, p)| p).sum();
    assert!((sum - 1.0).abs() < 1e-9);

    let best = probabilities
        .iter()
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(label, _)| label.as_str())
        .unwrap();
    assert_eq!(best, scores.best());
    Ok(())
}
