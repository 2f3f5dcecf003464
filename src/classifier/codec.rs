//! Binary artifact format for a trained classifier.
//!
//! ```text
//! magic        "BAYF"
//! version      u32
//! payload_len  u64                     length of the body below
//! body:
//!   class_count  varint
//!   labels       class_count x string
//!   tokenization string                  "whitespace" or "whole"
//!   per class:   examples u64, total_words u64, entry_count varint,
//!                entry_count x (string token, varint count), sorted by token
//! checksum     u32                     CRC-32 of every preceding byte
//! ```
//!
//! Integers are little-endian; strings are a varint byte length followed by
//! UTF-8. Writes go to a temporary file that is synced and then renamed over
//! the destination, so a crash never leaves a half-written artifact behind
//! under the real name.

use std::io::{self, ErrorKind, Read, Write};
use std::path::Path;

use ahash::AHashMap;
use log::{info, warn};

use crate::analysis::analyzer::TokenizationMode;
use crate::classifier::class::ClassSet;
use crate::classifier::model::{ClassFrequencies, FrequencyModel};
use crate::classifier::naive_bayes::NaiveBayesClassifier;
use crate::error::{BayesFilterError, Result};
use crate::storage::{
    FileStorage, Storage, StorageConfig, StorageInput, StorageOutput, StructReader, StructWriter,
};

/// File magic.
pub const MAGIC: &[u8; 4] = b"BAYF";

/// Current format version.
pub const FORMAT_VERSION: u32 = 1;

/// Magic + version + payload length.
pub const HEADER_LEN: u64 = 4 + 4 + 8;

/// Trailing CRC-32.
pub const CHECKSUM_LEN: u64 = 4;

/// Serialize a classifier to artifact bytes.
///
/// The output depends only on the learned counts, never on hash map order.
pub fn encode(classifier: &NaiveBayesClassifier) -> Result<Vec<u8>> {
    let body = encode_body(classifier)?;

    let mut writer = StructWriter::new(Vec::with_capacity(body.len() + 24));
    writer.write_raw(MAGIC)?;
    writer.write_u32(FORMAT_VERSION)?;
    writer.write_u64(body.len() as u64)?;
    writer.write_raw(&body)?;
    writer.finish()
}

fn encode_body(classifier: &NaiveBayesClassifier) -> Result<Vec<u8>> {
    let mut writer = StructWriter::new(Vec::new());

    let classes = classifier.classes();
    writer.write_varint(classes.len() as u64)?;
    for label in classes.iter() {
        writer.write_string(label)?;
    }
    writer.write_string(&classifier.tokenization().to_string())?;

    for freq in classifier.model().classes() {
        writer.write_u64(freq.examples)?;
        writer.write_u64(freq.total_words)?;

        let entries = freq.sorted_entries();
        writer.write_varint(entries.len() as u64)?;
        for (token, count) in entries {
            writer.write_string(token)?;
            writer.write_varint(count)?;
        }
    }

    Ok(writer.into_inner())
}

/// Deserialize and validate artifact bytes.
pub fn decode(bytes: &[u8]) -> Result<NaiveBayesClassifier> {
    let size = bytes.len() as u64;
    if size < MAGIC.len() as u64 {
        return Err(truncated(format!(
            "artifact is {size} bytes, too short to hold the file magic"
        )));
    }
    if &bytes[..MAGIC.len()] != MAGIC {
        return Err(BayesFilterError::corrupt_artifact(
            "bad magic, not a bayesfilter artifact",
        ));
    }
    if size < HEADER_LEN {
        return Err(truncated(format!(
            "artifact is {size} bytes, too short to hold the header"
        )));
    }

    let mut reader = StructReader::new(bytes, size);
    reader.read_raw(MAGIC.len() as u64)?;

    let version = reader.read_u32()?;
    if version != FORMAT_VERSION {
        return Err(BayesFilterError::corrupt_artifact(format!(
            "unsupported format version {version} (expected {FORMAT_VERSION})"
        )));
    }

    let payload_len = reader.read_u64()?;
    let expected = HEADER_LEN
        .checked_add(payload_len)
        .and_then(|n| n.checked_add(CHECKSUM_LEN))
        .ok_or_else(|| BayesFilterError::corrupt_artifact("payload length overflows"))?;
    if size < expected {
        return Err(truncated(format!(
            "artifact is {size} bytes but the header promises {expected}"
        )));
    }
    if size > expected {
        return Err(BayesFilterError::corrupt_artifact(format!(
            "{} trailing bytes after the checksum",
            size - expected
        )));
    }

    let body = reader.read_raw(payload_len)?;
    if !reader.verify_checksum()? {
        return Err(BayesFilterError::corrupt_artifact("checksum mismatch"));
    }

    decode_body(&body).map_err(into_corrupt)
}

fn decode_body(body: &[u8]) -> Result<NaiveBayesClassifier> {
    let mut reader = StructReader::new(body, body.len() as u64);

    let class_count = reader.read_varint()?;
    if class_count == 0 {
        return Err(BayesFilterError::corrupt_artifact("artifact has no classes"));
    }
    // Every label takes at least one byte.
    if class_count > reader.remaining() {
        return Err(BayesFilterError::corrupt_artifact(format!(
            "class count {class_count} exceeds the body size"
        )));
    }

    let mut labels = Vec::with_capacity(class_count as usize);
    for _ in 0..class_count {
        labels.push(reader.read_string()?);
    }
    let classes = ClassSet::new(labels)?;
    let tokenization: TokenizationMode = reader.read_string()?.parse()?;

    let mut tables = Vec::with_capacity(classes.len());
    for label in classes.iter() {
        tables.push(decode_class(&mut reader, label)?);
    }

    if reader.remaining() != 0 {
        return Err(BayesFilterError::corrupt_artifact(format!(
            "{} unread bytes at the end of the body",
            reader.remaining()
        )));
    }

    let model = FrequencyModel::from_classes(tables)?;
    Ok(NaiveBayesClassifier::from_parts(classes, model)?.with_tokenization(tokenization))
}

fn decode_class<R: Read>(reader: &mut StructReader<R>, label: &str) -> Result<ClassFrequencies> {
    let examples = reader.read_u64()?;
    let total_words = reader.read_u64()?;

    let entry_count = reader.read_varint()?;
    // Every entry takes at least two bytes.
    if entry_count > reader.remaining() / 2 {
        return Err(BayesFilterError::corrupt_artifact(format!(
            "class {label}: entry count {entry_count} exceeds the body size"
        )));
    }

    let mut word_freq = AHashMap::with_capacity(entry_count as usize);
    let mut previous: Option<String> = None;
    for _ in 0..entry_count {
        let token = reader.read_string()?;
        let count = reader.read_varint()?;

        if count == 0 {
            return Err(BayesFilterError::corrupt_artifact(format!(
                "class {label}: token '{token}' has a zero count"
            )));
        }
        if previous.as_deref().is_some_and(|p| p >= token.as_str()) {
            return Err(BayesFilterError::corrupt_artifact(format!(
                "class {label}: entries are duplicated or out of order at '{token}'"
            )));
        }

        previous = Some(token.clone());
        word_freq.insert(token, count);
    }

    Ok(ClassFrequencies {
        word_freq,
        total_words,
        examples,
    })
}

/// Write a classifier to `path` atomically.
pub fn save<P: AsRef<Path>>(classifier: &NaiveBayesClassifier, path: P) -> Result<()> {
    let path = path.as_ref();
    let (directory, name) = split_path(path)?;
    let bytes = encode(classifier)?;

    let storage = FileStorage::new(directory, StorageConfig::default())?;
    let (temp_name, mut output) = storage.create_temp_output(&format!(".{name}"))?;

    let written = output
        .write_all(&bytes)
        .map_err(|e| BayesFilterError::io_at(storage.file_path(&temp_name), e))
        .and_then(|_| output.flush_and_sync());
    drop(output);

    if let Err(e) = written.and_then(|_| storage.rename_file(&temp_name, name)) {
        if let Err(cleanup) = storage.delete_file(&temp_name) {
            warn!("failed to remove temporary file {temp_name}: {cleanup}");
        }
        return Err(e);
    }

    info!(
        "saved model ({} classes, {} tokens in vocabulary, {} bytes) to {}",
        classifier.classes().len(),
        classifier.model().vocabulary_size(),
        bytes.len(),
        path.display()
    );
    Ok(())
}

/// Read and validate a classifier from `path`.
pub fn load<P: AsRef<Path>>(path: P) -> Result<NaiveBayesClassifier> {
    let path = path.as_ref();
    let (directory, name) = split_path(path)?;

    let storage = FileStorage::open(directory, StorageConfig::default())?;
    let mut input = storage.open_input(name)?;
    let mut bytes = Vec::with_capacity(input.size()? as usize);
    input
        .read_to_end(&mut bytes)
        .map_err(|e| BayesFilterError::io_at(path, e))?;
    drop(input);

    let classifier = decode(&bytes).map_err(|e| match e {
        BayesFilterError::Io(err) => BayesFilterError::io_at(path, err),
        other => other,
    })?;

    info!(
        "loaded model with classes {}, {} tokenization and {} tokens in vocabulary from {}",
        classifier.classes(),
        classifier.tokenization(),
        classifier.model().vocabulary_size(),
        path.display()
    );
    Ok(classifier)
}

fn split_path(path: &Path) -> Result<(&Path, &str)> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            BayesFilterError::invalid_config(format!(
                "artifact path {} does not name a file",
                path.display()
            ))
        })?;

    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    Ok((directory, name))
}

fn truncated(msg: String) -> BayesFilterError {
    BayesFilterError::Io(io::Error::new(
        ErrorKind::UnexpectedEof,
        format!("truncated artifact: {msg}"),
    ))
}

fn into_corrupt(err: BayesFilterError) -> BayesFilterError {
    match err {
        BayesFilterError::CorruptArtifact(_) => err,
        // The body length is already known to be exact, so any read
        // failure inside it means the content itself is malformed.
        other => BayesFilterError::corrupt_artifact(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn trained() -> NaiveBayesClassifier {
        let mut classifier = NaiveBayesClassifier::new(ClassSet::default());
        classifier.learn(["great", "film"], "Good").unwrap();
        classifier.learn(["nice"], "Good").unwrap();
        classifier.learn(["awful", "film"], "Bad").unwrap();
        classifier
    }

    /// Recompute the trailing checksum after editing bytes in place.
    fn reseal(bytes: &mut [u8]) {
        let end = bytes.len() - CHECKSUM_LEN as usize;
        let crc = crc32fast::hash(&bytes[..end]);
        bytes[end..].copy_from_slice(&crc.to_le_bytes());
    }

    #[test]
    fn test_encode_decode() {
        let classifier = trained();
        let bytes = encode(&classifier).unwrap();

        assert_eq!(&bytes[..4], MAGIC);
        assert_eq!(decode(&bytes).unwrap(), classifier);
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let mut a = NaiveBayesClassifier::new(ClassSet::default());
        let mut b = NaiveBayesClassifier::new(ClassSet::default());
        let words = ["zeta", "alpha", "mid", "beta", "omega"];

        for word in words {
            a.learn([word], "Good").unwrap();
        }
        for word in words.iter().rev() {
            b.learn([word], "Good").unwrap();
        }

        assert_eq!(encode(&a).unwrap(), encode(&b).unwrap());
    }

    #[test]
    fn test_untrained_classifier_round_trips() {
        let classifier = NaiveBayesClassifier::new(ClassSet::default());
        let decoded = decode(&encode(&classifier).unwrap()).unwrap();
        assert!(decoded.is_empty());
        assert_eq!(decoded.classes(), classifier.classes());
    }

    #[test]
    fn test_truncation_is_io() {
        let bytes = encode(&trained()).unwrap();

        for len in [0, 3, 10, bytes.len() - 1, bytes.len() - 5] {
            let err = decode(&bytes[..len]).unwrap_err();
            assert!(err.is_io(), "length {len} gave {err}");
        }
    }

    #[test]
    fn test_flipped_bytes_are_corrupt() {
        let bytes = encode(&trained()).unwrap();

        for index in [0, HEADER_LEN as usize + 2, bytes.len() - 1] {
            let mut damaged = bytes.clone();
            damaged[index] ^= 0x40;
            assert!(matches!(
                decode(&damaged),
                Err(BayesFilterError::CorruptArtifact(_))
            ));
        }
    }

    #[test]
    fn test_unknown_version_is_corrupt() {
        let mut bytes = encode(&trained()).unwrap();
        bytes[4..8].copy_from_slice(&2u32.to_le_bytes());
        reseal(&mut bytes);

        let err = decode(&bytes).unwrap_err();
        assert!(matches!(err, BayesFilterError::CorruptArtifact(_)));
        assert!(err.to_string().contains("version 2"));
    }

    #[test]
    fn test_trailing_bytes_are_corrupt() {
        let mut bytes = encode(&trained()).unwrap();
        bytes.push(0);
        assert!(matches!(
            decode(&bytes),
            Err(BayesFilterError::CorruptArtifact(_))
        ));
    }

    fn sealed(body: &[u8]) -> Vec<u8> {
        let mut writer = StructWriter::new(Vec::new());
        writer.write_raw(MAGIC).unwrap();
        writer.write_u32(FORMAT_VERSION).unwrap();
        writer.write_u64(body.len() as u64).unwrap();
        writer.write_raw(body).unwrap();
        writer.finish().unwrap()
    }

    /// A body with one class per `(examples, total_words, entries)` tuple.
    fn body(classes: &[(u64, u64, &[(&str, u64)])]) -> Vec<u8> {
        let mut writer = StructWriter::new(Vec::new());
        writer.write_varint(classes.len() as u64).unwrap();
        for index in 0..classes.len() {
            writer.write_string(&format!("Class{index}")).unwrap();
        }
        writer.write_string("whitespace").unwrap();

        for (examples, total_words, entries) in classes {
            writer.write_u64(*examples).unwrap();
            writer.write_u64(*total_words).unwrap();
            writer.write_varint(entries.len() as u64).unwrap();
            for (token, count) in entries.iter() {
                writer.write_string(token).unwrap();
                writer.write_varint(*count).unwrap();
            }
        }
        writer.into_inner()
    }

    fn single_class_body(total_words: u64, entries: &[(&str, u64)]) -> Vec<u8> {
        body(&[(1, total_words, entries)])
    }

    #[test]
    fn test_invariant_violations_are_corrupt() {
        let cases = [
            single_class_body(3, &[("a", 1), ("b", 1)]),
            single_class_body(1, &[("a", 1), ("b", 0)]),
            single_class_body(2, &[("a", 1), ("a", 1)]),
            single_class_body(2, &[("b", 1), ("a", 1)]),
            single_class_body(0, &[("a", u64::MAX), ("b", 1)]),
            body(&[(0, 1, &[("a", 1)])]),
            body(&[(u64::MAX, 1, &[("x", 1)]), (u64::MAX, 1, &[("x", 1)])]),
        ];

        for body in cases {
            assert!(matches!(
                decode(&sealed(&body)),
                Err(BayesFilterError::CorruptArtifact(_))
            ));
        }

        // Sanity check: the helper produces valid bodies too.
        decode(&sealed(&single_class_body(2, &[("a", 1), ("b", 1)]))).unwrap();
    }

    #[test]
    fn test_saturated_example_counts_still_score() {
        let bytes = sealed(&body(&[(u64::MAX, 1, &[("x", 1)]), (0, 0, &[])]));
        let classifier = decode(&bytes).unwrap();

        assert_eq!(classifier.stats().total_examples, u64::MAX);
        assert_eq!(classifier.classify(["x"]).unwrap(), "Class0");
    }

    #[test]
    fn test_tokenization_is_persisted() {
        let classifier = trained().with_tokenization(TokenizationMode::Whole);
        let decoded = decode(&encode(&classifier).unwrap()).unwrap();
        assert_eq!(decoded.tokenization(), TokenizationMode::Whole);

        let decoded = decode(&encode(&trained()).unwrap()).unwrap();
        assert_eq!(decoded.tokenization(), TokenizationMode::Whitespace);
    }

    #[test]
    fn test_unknown_tokenization_is_corrupt() {
        let mut writer = StructWriter::new(Vec::new());
        writer.write_varint(1).unwrap();
        writer.write_string("Good").unwrap();
        writer.write_string("bigram").unwrap();
        writer.write_u64(0).unwrap();
        writer.write_u64(0).unwrap();
        writer.write_varint(0).unwrap();

        assert!(matches!(
            decode(&sealed(&writer.into_inner())),
            Err(BayesFilterError::CorruptArtifact(_))
        ));
    }

    #[test]
    fn test_duplicate_labels_are_corrupt() {
        let mut writer = StructWriter::new(Vec::new());
        writer.write_varint(2).unwrap();
        writer.write_string("Good").unwrap();
        writer.write_string("Good").unwrap();
        writer.write_string("whitespace").unwrap();
        for _ in 0..2 {
            writer.write_u64(0).unwrap();
            writer.write_u64(0).unwrap();
            writer.write_varint(0).unwrap();
        }

        assert!(matches!(
            decode(&sealed(&writer.into_inner())),
            Err(BayesFilterError::CorruptArtifact(_))
        ));
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("models").join("data.bin");
        let classifier = trained();

        save(&classifier, &path).unwrap();
        assert_eq!(load(&path).unwrap(), classifier);

        // Only the artifact remains; the temporary file was renamed away.
        let names: Vec<_> = std::fs::read_dir(path.parent().unwrap())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("data.bin")]);
    }

    #[test]
    fn test_save_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data.bin");

        save(&NaiveBayesClassifier::new(ClassSet::default()), &path).unwrap();
        save(&trained(), &path).unwrap();
        assert_eq!(load(&path).unwrap(), trained());
    }

    #[test]
    fn test_load_missing_is_io() {
        let temp_dir = TempDir::new().unwrap();

        let err = load(temp_dir.path().join("data.bin")).unwrap_err();
        assert!(err.is_io());

        let err = load(temp_dir.path().join("nodir").join("data.bin")).unwrap_err();
        assert!(err.is_io());
    }
}
