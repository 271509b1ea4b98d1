//! Form-field labels that are never headings.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use crate::error::{Error, Result};

/// Labels rejected by default, compared case-insensitively against whole lines.
pub const DEFAULT_STOP_WORDS: &[&str] = &[
    "name",
    "age",
    "date",
    "s.no",
    "relationship",
    "designation",
    "rs.",
    "i declare",
    "amount of advance required.",
    "service",
    "pay + si + npa",
    "signature of government servant.",
];

/// A set of exact, case-insensitive, whole-line labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Denylist {
    entries: BTreeSet<String>,
}

impl Denylist {
    /// An empty denylist that rejects nothing.
    pub fn empty() -> Self {
        Self {
            entries: BTreeSet::new(),
        }
    }

    /// Build a denylist from labels. Labels are trimmed and lowercased.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = Self::empty();
        list.extend(labels);
        list
    }

    /// Read labels one per line. Blank lines and lines starting with `#` are skipped.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut list = Self::empty();
        for line in BufReader::new(reader).lines() {
            let line = line.map_err(|e| Error::Denylist(e.to_string()))?;
            let label = line.trim();
            if label.is_empty() || label.starts_with('#') {
                continue;
            }
            list.insert(label);
        }
        Ok(list)
    }

    /// Read labels from a file, see [`from_reader`](Self::from_reader).
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| Error::Denylist(format!("{}: {}", path.display(), e)))?;
        Self::from_reader(file)
    }

    /// Add one label.
    pub fn insert(&mut self, label: &str) {
        self.entries.insert(label.trim().to_lowercase());
    }

    /// Add several labels.
    pub fn extend<I, S>(&mut self, labels: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for label in labels {
            self.insert(label.as_ref());
        }
    }

    /// Whether the trimmed line equals a label, ignoring case.
    pub fn contains(&self, line: &str) -> bool {
        self.entries.contains(&line.trim().to_lowercase())
    }

    /// Number of labels.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the denylist has no labels.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Labels in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}

impl Default for Denylist {
    fn default() -> Self {
        Self::from_labels(DEFAULT_STOP_WORDS)
    }
}
