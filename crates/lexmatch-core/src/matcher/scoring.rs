//! Per-candidate scoring: word score, tier gating and the composite rank

use serde::{Deserialize, Serialize};

use crate::importance::ImportanceTable;
use crate::normalize::NormalizedText;
use crate::similarity::similarity;

/// Scores recorded for a candidate that survived gating.
///
/// Tier scores are `None` when the tier was comparable but exceeded the
/// threshold; `Some(0.0)` means the tier matched exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateScore {
    pub threshold: usize,
    pub juice_score: Option<f64>,
    pub mash_score: Option<f64>,
    pub fold_score: Option<f64>,
    pub word_score: f64,
}

impl CandidateScore {
    /// Ranking value; lower is better.
    pub fn composite(&self) -> f64 {
        -self.word_score
            + self.juice_score.unwrap_or(0.0)
            + self.mash_score.unwrap_or(0.0)
            + self.fold_score.unwrap_or(0.0)
    }
}

/// Character-budget tolerance for the aggregate tiers of a query
pub fn threshold(mashed_len: usize, juiced_len: usize) -> usize {
    if mashed_len > 8 {
        (juiced_len as f64 * 0.2).floor() as usize
    } else if mashed_len > 3 {
        (mashed_len as f64 * 0.4).floor() as usize
    } else {
        0
    }
}

/// Contribution of a non-identical word pair
fn near_miss_weight(score: f64) -> f64 {
    if score < 1.0 {
        0.9
    } else if score < 2.0 {
        0.3
    } else if score < 3.0 {
        0.1
    } else {
        0.0
    }
}

/// Cumulative word score over the full cross product of query and candidate
/// words. Repeated words contribute once per pairing.
pub fn word_score(query_words: &[&str], candidate_words: &[&str], importance: &ImportanceTable) -> f64 {
    let mut score = 0.0;
    for w1 in query_words {
        for w2 in candidate_words {
            if w1 == w2 {
                score += importance.importance(w1);
            } else if let Some(s) = similarity(w1, w2) {
                score += near_miss_weight(s);
            }
        }
    }
    score
}

/// Outcome of comparing one abstraction tier
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TierScore {
    /// No characters in common
    Incomparable,
    /// Comparable but above the threshold
    OverThreshold(f64),
    /// Within the threshold
    Within(f64),
}

impl TierScore {
    pub fn gate(a: &str, b: &str, threshold: usize) -> Self {
        match similarity(a, b) {
            None => TierScore::Incomparable,
            Some(s) if s <= threshold as f64 => TierScore::Within(s),
            Some(s) => TierScore::OverThreshold(s),
        }
    }

    /// The score if it counts towards ranking
    pub fn value(self) -> Option<f64> {
        match self {
            TierScore::Within(s) => Some(s),
            _ => None,
        }
    }
}

/// Score one candidate against a normalized query.
///
/// Returns `None` when the candidate is rejected, either by the juiced hard
/// gate or by the inclusion test.
pub fn score_candidate(
    query: &str,
    query_norm: &NormalizedText,
    query_words: &[&str],
    threshold: usize,
    name: &str,
    candidate: &NormalizedText,
    importance: &ImportanceTable,
) -> Option<CandidateScore> {
    let candidate_words: Vec<&str> = candidate.words().collect();

    let mut word = word_score(query_words, &candidate_words, importance);
    if query == name {
        word = query_words.len() as f64;
    }

    let juice = TierScore::gate(&query_norm.juiced, &candidate.juiced, threshold);
    if juice == TierScore::Incomparable {
        return None;
    }
    let mash = TierScore::gate(&query_norm.mashed, &candidate.mashed, threshold).value();
    let fold = TierScore::gate(&query_norm.folded, &candidate.folded, threshold).value();

    let included = word >= 1.0 || (word >= 0.3 && mash.is_some()) || fold.is_some();
    if !included {
        return None;
    }

    Some(CandidateScore {
        threshold,
        juice_score: juice.value(),
        mash_score: mash,
        fold_score: fold,
        word_score: word,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_bands() {
        assert_eq!(threshold(0, 0), 0);
        assert_eq!(threshold(1, 1), 0);
        assert_eq!(threshold(3, 3), 0);
        assert_eq!(threshold(4, 4), 1);
        assert_eq!(threshold(5, 4), 2);
        assert_eq!(threshold(8, 6), 3);
        // long texts use the juiced inventory instead
        assert_eq!(threshold(9, 7), 1);
        assert_eq!(threshold(30, 15), 3);
    }

    #[test]
    fn test_near_miss_buckets() {
        assert_eq!(near_miss_weight(0.5), 0.9);
        assert_eq!(near_miss_weight(1.0), 0.3);
        assert_eq!(near_miss_weight(1.99), 0.3);
        assert_eq!(near_miss_weight(2.0), 0.1);
        assert_eq!(near_miss_weight(3.0), 0.0);
    }

    #[test]
    fn test_word_score_full_cross_product() {
        let table = ImportanceTable::default();
        // each "red" in the query pairs with each "red" in the candidate
        let s = word_score(&["red", "red"], &["red", "red"], &table);
        assert_eq!(s, 4.0);
    }

    #[test]
    fn test_word_score_near_misses() {
        let table = ImportanceTable::default();
        // dog/dot scores 1.0 -> 0.3, dog/xyz incomparable -> nothing
        let s = word_score(&["dog"], &["dot", "xyz"], &table);
        assert!((s - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_tier_gate() {
        assert_eq!(TierScore::gate("abc", "xyz", 5), TierScore::Incomparable);
        assert_eq!(TierScore::gate("dog", "dog", 0), TierScore::Within(0.0));
        assert_eq!(TierScore::gate("dog", "dot", 0), TierScore::OverThreshold(1.0));
        assert_eq!(TierScore::gate("dog", "dot", 1), TierScore::Within(1.0));
    }

    #[test]
    fn test_composite_ignores_absent_tiers() {
        let score = CandidateScore {
            threshold: 1,
            juice_score: Some(0.0),
            mash_score: None,
            fold_score: Some(1.0),
            word_score: 2.0,
        };
        assert_eq!(score.composite(), -1.0);
    }
}
