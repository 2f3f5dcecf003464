//! The fixed, ordered set of class labels a classifier knows about.

use std::fmt;

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::error::{BayesFilterError, Result};

/// Label the good corpus is trained under.
pub const GOOD_CLASS: &str = "Good";

/// Label the bad corpus is trained under.
pub const BAD_CLASS: &str = "Bad";

/// Ordered, duplicate-free list of class labels.
///
/// The order matters: it is the order scores are reported in and the
/// tie-break order when two classes score the same.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct ClassSet {
    labels: Vec<String>,
}

impl ClassSet {
    /// Create a class set, rejecting empty lists, empty labels and duplicates.
    pub fn new<I, S>(labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        Self::validate(&labels)?;
        Ok(ClassSet { labels })
    }

    /// Check labels against the class set rules without building one.
    pub fn validate(labels: &[String]) -> Result<()> {
        if labels.is_empty() {
            return Err(BayesFilterError::invalid_config(
                "class set must contain at least one label",
            ));
        }

        let mut seen = AHashSet::with_capacity(labels.len());
        for label in labels {
            if label.is_empty() {
                return Err(BayesFilterError::invalid_config(
                    "class labels must not be empty",
                ));
            }
            if !seen.insert(label.as_str()) {
                return Err(BayesFilterError::invalid_config(format!(
                    "duplicate class label: {label}"
                )));
            }
        }

        Ok(())
    }

    /// Number of classes.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Always false for a constructed set; present for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Labels in class order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Label at the given index.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    /// Index of a label, if it is a member.
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    /// Index of a label, failing with `UnknownClass` for non-members.
    pub fn resolve(&self, label: &str) -> Result<usize> {
        self.index_of(label)
            .ok_or_else(|| BayesFilterError::unknown_class(label))
    }

    /// Whether the label is a member.
    pub fn contains(&self, label: &str) -> bool {
        self.index_of(label).is_some()
    }

    /// Iterate over labels in class order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }
}

impl Default for ClassSet {
    /// The two labels the filter tool trains: `Bad` first, then `Good`.
    fn default() -> Self {
        ClassSet {
            labels: vec![BAD_CLASS.to_string(), GOOD_CLASS.to_string()],
        }
    }
}

impl TryFrom<Vec<String>> for ClassSet {
    type Error = BayesFilterError;

    fn try_from(labels: Vec<String>) -> Result<Self> {
        ClassSet::new(labels)
    }
}

impl From<ClassSet> for Vec<String> {
    fn from(classes: ClassSet) -> Self {
        classes.labels
    }
}

impl fmt::Display for ClassSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.labels.join(", "))
    }
}
