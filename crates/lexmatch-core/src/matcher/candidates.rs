//! Candidate dictionary

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::fingerprint::Fingerprinter;
use crate::normalize::{normalize, NormalizedText, Stopwords};

/// One reference item of the match dictionary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateEntry {
    pub name: String,
    pub normalized: NormalizedText,
}

/// Ordered, read-only candidate dictionary.
///
/// Iteration order is the order in which names were first inserted; it
/// decides ties when ranking, so it is part of the contract.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Candidates {
    entries: Vec<CandidateEntry>,
    fingerprint: String,
}

impl Candidates {
    /// Normalize `(name, raw text)` pairs into a dictionary.
    ///
    /// A repeated name replaces the earlier text but keeps its position.
    pub fn from_pairs<I, N, R>(pairs: I, stopwords: &Stopwords) -> Self
    where
        I: IntoIterator<Item = (N, R)>,
        N: Into<String>,
        R: AsRef<str>,
    {
        let mut by_name: IndexMap<String, NormalizedText> = IndexMap::new();
        for (name, raw) in pairs {
            let name = name.into();
            let normalized = normalize(raw.as_ref(), stopwords);
            if by_name.insert(name.clone(), normalized).is_some() {
                warn!(name = %name, "duplicate candidate name, keeping the later text");
            }
        }
        Self::from_normalized(by_name)
    }

    /// Dictionary where each text is its own name
    pub fn from_texts<I, S>(texts: I, stopwords: &Stopwords) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::from_pairs(
            texts.into_iter().map(|t| (t.as_ref().to_string(), t)),
            stopwords,
        )
    }

    /// Dictionary over already normalized texts
    pub fn from_normalized(map: IndexMap<String, NormalizedText>) -> Self {
        let mut fp = Fingerprinter::new();
        let entries: Vec<CandidateEntry> = map
            .into_iter()
            .map(|(name, normalized)| {
                fp.add(&name);
                fp.add(&normalized.blanched);
                fp.add(&normalized.chopped);
                CandidateEntry { name, normalized }
            })
            .collect();

        Self {
            entries,
            fingerprint: fp.finish(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&CandidateEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn entries(&self) -> &[CandidateEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CandidateEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fingerprint of names and normalized texts, in order
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }
}

impl<'a> IntoIterator for &'a Candidates {
    type Item = &'a CandidateEntry;
    type IntoIter = std::slice::Iter<'a, CandidateEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
