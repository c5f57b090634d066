//! Term Importance Estimator
//!
//! Weighs every distinct term of a reference corpus by how rare it is. Terms
//! seen exactly once always carry the full weight of `1.0`; more frequent
//! terms are spread over a band scaled by the order of magnitude of their
//! frequency ratio.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::fingerprint::{fingerprint_of, Fingerprinter};
use crate::normalize::tokenize;

/// Importance assumed for a term the corpus never contained
pub const UNSEEN_TERM_IMPORTANCE: f64 = 1.0;

/// Importance data for one distinct term
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermRecord {
    pub term: String,
    /// Occurrences across the whole corpus (always >= 1)
    pub count: usize,
    /// `count / countrange`
    pub ratio: f64,
    /// Order of magnitude of `ratio`
    pub magnitude: i32,
    pub importance: f64,
}

/// Per-term importance over a reference corpus.
///
/// Ordered by count descending, then term ascending. Read-only once built;
/// rebuild it whenever the corpus changes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportanceTable {
    terms: IndexMap<String, TermRecord>,
    fingerprint: String,
}

impl ImportanceTable {
    /// Build the table in one pass over `corpus`.
    pub fn build<I, S>(corpus: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut fp = Fingerprinter::new();
        let mut counts: HashMap<String, usize> = HashMap::new();
        let mut texts = 0usize;

        for text in corpus {
            let text = text.as_ref();
            fp.add(text);
            texts += 1;
            for term in tokenize(text) {
                *counts.entry(term).or_insert(0) += 1;
            }
        }

        let mut counted: Vec<(String, usize)> = counts.into_iter().collect();
        counted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        let terms = score_terms(counted);
        info!(texts, terms = terms.len(), "built term importance table");

        Self {
            terms,
            fingerprint: fp.finish(),
        }
    }

    /// Record for `term`, if the corpus contained it
    pub fn get(&self, term: &str) -> Option<&TermRecord> {
        self.terms.get(term)
    }

    /// Importance of `term`; unseen terms count as maximally rare.
    pub fn importance(&self, term: &str) -> f64 {
        self.terms
            .get(term)
            .map(|r| r.importance)
            .unwrap_or(UNSEEN_TERM_IMPORTANCE)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TermRecord> {
        self.terms.values()
    }

    /// Fingerprint of the corpus this table was built from
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// Whether the table was built from exactly this corpus
    pub fn is_current_for<I, S>(&self, corpus: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        fingerprint_of(corpus) == self.fingerprint
    }
}

fn score_terms(counted: Vec<(String, usize)>) -> IndexMap<String, TermRecord> {
    let (Some(max_count), Some(min_count)) = (
        counted.iter().map(|(_, c)| *c).max(),
        counted.iter().map(|(_, c)| *c).min(),
    ) else {
        return IndexMap::new();
    };

    let count_range = (max_count - min_count).max(1) as f64;

    let measured: Vec<(String, usize, f64, i32)> = counted
        .into_iter()
        .map(|(term, count)| {
            let ratio = count as f64 / count_range;
            (term, count, ratio, magnitude(ratio))
        })
        .collect();

    let max_mag = measured.iter().map(|m| m.3).max().unwrap_or(0);
    let min_mag = measured.iter().map(|m| m.3).min().unwrap_or(0);
    let increment = 1.0 / (max_mag - min_mag).max(1) as f64;

    debug!(count_range, max_mag, min_mag, increment, "term magnitude spread");

    measured
        .into_iter()
        .map(|(term, count, ratio, magnitude)| {
            let importance = if count == 1 {
                1.0
            } else {
                magnitude as f64 * increment
            };
            let record = TermRecord {
                term: term.clone(),
                count,
                ratio,
                magnitude,
                importance,
            };
            (term, record)
        })
        .collect()
}

/// Order of magnitude of a positive frequency ratio.
///
/// With a nonzero integer part this is minus the number of integer digits
/// (`12.5 -> -2`). Otherwise it is one plus the number of zeros between the
/// decimal point and the first significant digit (`0.5 -> 1`, `0.05 -> 2`).
fn magnitude(ratio: f64) -> i32 {
    let whole = ratio.trunc();
    if whole >= 1.0 {
        return -(format!("{}", whole as u64).len() as i32);
    }

    let rendered = format!("{ratio}");
    let fraction = rendered.split_once('.').map(|(_, f)| f).unwrap_or("");
    fraction.chars().take_while(|c| *c == '0').count() as i32 + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_magnitude() {
        assert_eq!(magnitude(1.0), -1);
        assert_eq!(magnitude(9.99), -1);
        assert_eq!(magnitude(12.5), -2);
        assert_eq!(magnitude(250.0), -3);
        assert_eq!(magnitude(0.5), 1);
        assert_eq!(magnitude(0.1), 1);
        assert_eq!(magnitude(0.05), 2);
        assert_eq!(magnitude(0.01), 2);
        assert_eq!(magnitude(0.001), 3);
    }

    #[test]
    fn test_singletons_get_full_importance() {
        let table = ImportanceTable::build(["red fox", "red hen", "red ant", "blue jay"]);
        for term in ["fox", "hen", "ant", "blue", "jay"] {
            assert_eq!(table.importance(term), 1.0, "{term}");
        }
        // count 3, range 2, ratio 1.5 -> magnitude -1; singletons ratio 0.5 -> 1
        let red = table.get("red").unwrap();
        assert_eq!(red.count, 3);
        assert_eq!(red.ratio, 1.5);
        assert_eq!(red.magnitude, -1);
        assert_eq!(red.importance, -0.5);
    }

    #[test]
    fn test_flat_distribution_does_not_divide_by_zero() {
        let table = ImportanceTable::build(["a b", "a b"]);
        let a = table.get("a").unwrap();
        assert_eq!(a.count, 2);
        assert_eq!(a.ratio, 2.0);
        assert_eq!(a.magnitude, -1);
        assert_eq!(a.importance, -1.0);
    }

    #[test]
    fn test_mid_frequency_terms() {
        // the x4, cat x2, sat/mat x1: range 3
        let table = ImportanceTable::build(["the cat sat", "the cat", "the mat", "the"]);
        let the = table.get("the").unwrap();
        let cat = table.get("cat").unwrap();
        assert_eq!(the.magnitude, -1);
        assert_eq!(cat.magnitude, 1);
        // magnitudes span -1..=1, increment 0.5
        assert_eq!(the.importance, -0.5);
        assert_eq!(cat.importance, 0.5);
        assert_eq!(table.importance("sat"), 1.0);
    }

    #[test]
    fn test_ordering_by_count_then_term() {
        let table = ImportanceTable::build(["b a c", "c"]);
        let order: Vec<&str> = table.iter().map(|r| r.term.as_str()).collect();
        assert_eq!(order, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_tokenization_matches_normalizer() {
        let table = ImportanceTable::build(["Café-Society!", "CAFE"]);
        assert_eq!(table.get("cafe").map(|r| r.count), Some(2));
        assert_eq!(table.get("society").map(|r| r.count), Some(1));
    }

    #[test]
    fn test_empty_corpus() {
        let table = ImportanceTable::build(Vec::<String>::new());
        assert!(table.is_empty());
        assert_eq!(table.importance("anything"), UNSEEN_TERM_IMPORTANCE);
    }

    #[test]
    fn test_fingerprint_tracks_corpus() {
        let corpus = vec!["one fish", "two fish"];
        let table = ImportanceTable::build(&corpus);
        assert!(table.is_current_for(&corpus));
        assert!(!table.is_current_for(["one fish", "red fish"]));
    }
}
