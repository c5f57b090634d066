//! Pairwise similarity scoring
//!
//! The score is a length-adjusted Damerau-Levenshtein distance: lower is more
//! similar and `0.0` means identical. Strings with no characters in common are
//! not comparable at all and score `None`.

use std::collections::HashSet;

use strsim::damerau_levenshtein;

/// Gated similarity between two strings.
///
/// Returns `None` when the character sets of `a` and `b` are disjoint.
/// Symmetric in its arguments.
pub fn similarity(a: &str, b: &str) -> Option<f64> {
    if a == b {
        return Some(0.0);
    }

    if jaccard(a, b) == 0.0 {
        return None;
    }

    let distance = damerau_levenshtein(a, b) as f64;
    Some(distance * length_ratio(a, b).sqrt())
}

/// Like [`similarity`], for values that may be missing.
pub fn similarity_opt(a: Option<&str>, b: Option<&str>) -> Option<f64> {
    similarity(a?, b?)
}

/// Longer length over shorter length, rounded to 4 decimal places.
///
/// `1.0` for equal lengths. Lengths are counted in characters.
pub fn length_ratio(a: &str, b: &str) -> f64 {
    let (la, lb) = (a.chars().count(), b.chars().count());
    if la == lb {
        return 1.0;
    }

    let (long, short) = if la > lb { (la, lb) } else { (lb, la) };
    if short == 0 {
        return f64::INFINITY;
    }

    round4(long as f64 / short as f64)
}

/// Jaccard index of the character sets of `a` and `b`.
///
/// Two empty strings have an index of `0.0`.
pub fn jaccard(a: &str, b: &str) -> f64 {
    let sa: HashSet<char> = a.chars().collect();
    let sb: HashSet<char> = b.chars().collect();

    let union = sa.union(&sb).count();
    if union == 0 {
        return 0.0;
    }

    sa.intersection(&sb).count() as f64 / union as f64
}

fn round4(x: f64) -> f64 {
    (x * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_strings_score_zero() {
        for s in ["", "a", "cat", "the quick brown fox"] {
            assert_eq!(similarity(s, s), Some(0.0), "similarity({s:?}, {s:?})");
        }
    }

    #[test]
    fn cats_vs_cat() {
        let score = similarity("cats", "cat").unwrap();
        assert!((score - 1.3333f64.sqrt()).abs() < 1e-9, "got {score}");
        assert!((score - 1.1547).abs() < 1e-4);
    }

    #[test]
    fn disjoint_strings_are_not_comparable() {
        assert_eq!(similarity("xyz", "abc"), None);
        assert_eq!(similarity("abc", ""), None);
        assert_eq!(similarity("", "abc"), None);
    }

    #[test]
    fn symmetry() {
        let pairs = [
            ("dog", "dot"),
            ("kitten", "sitting"),
            ("ab", "ba"),
            ("cafedelmar", "delmarcafe"),
            ("x", "xxxxxxxx"),
            ("xyz", "abc"),
        ];
        for (a, b) in pairs {
            assert_eq!(similarity(a, b), similarity(b, a), "{a} vs {b}");
        }
    }

    #[test]
    fn transposition_costs_one() {
        assert_eq!(similarity("ab", "ba"), Some(1.0));
    }

    #[test]
    fn length_ratio_penalizes_short_long_pairs() {
        // distance 7, ratio 8.0
        let score = similarity("x", "xxxxxxxx").unwrap();
        assert!((score - 7.0 * 8f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn ratio_is_rounded() {
        assert_eq!(length_ratio("abc", "abcdefg"), 2.3333);
        assert_eq!(length_ratio("abc", "xyz"), 1.0);
    }

    #[test]
    fn jaccard_index() {
        assert_eq!(jaccard("cats", "cat"), 0.75);
        assert_eq!(jaccard("abc", "xyz"), 0.0);
        assert_eq!(jaccard("", ""), 0.0);
    }

    #[test]
    fn missing_values_are_not_comparable() {
        assert_eq!(similarity_opt(None, Some("abc")), None);
        assert_eq!(similarity_opt(Some("abc"), None), None);
        assert_eq!(similarity_opt(Some("dog"), Some("dot")), Some(1.0));
    }
}
