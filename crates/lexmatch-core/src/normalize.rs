//! Text Normalizer
//!
//! Produces the five-tier abstraction ladder for a string, from near-verbatim
//! to a bare character inventory:
//!
//! 1. `blanched` - transliterated to ASCII, lowercased, trimmed
//! 2. `chopped`  - non-alphanumeric runs collapsed to spaces, stopwords dropped
//! 3. `folded`   - chopped tokens in sorted order
//! 4. `mashed`   - folded with spaces removed
//! 5. `juiced`   - sorted distinct characters of mashed

use std::collections::{BTreeSet, HashSet};

use deunicode::deunicode;
use serde::{Deserialize, Serialize};

/// Tokens ignored when building the `chopped` tier.
///
/// Entries are stored lowercased and trimmed, matching the tokens they are
/// compared against.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stopwords(HashSet<String>);

impl Stopwords {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.0.contains(token)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for Stopwords {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|s| s.as_ref().trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect(),
        )
    }
}

/// The five normal forms of one raw string
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NormalizedText {
    pub blanched: String,
    pub chopped: String,
    pub folded: String,
    pub mashed: String,
    pub juiced: String,
}

impl NormalizedText {
    /// Tokens of the `chopped` tier, in their original order
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.chopped.split_whitespace()
    }

    /// Length of `mashed` in characters
    pub fn mashed_len(&self) -> usize {
        self.mashed.chars().count()
    }

    /// Length of `juiced` in characters
    pub fn juiced_len(&self) -> usize {
        self.juiced.chars().count()
    }
}

/// Normalize `raw` into its five-tier ladder.
///
/// Pure: identical `(raw, stopwords)` always yields an identical result.
pub fn normalize(raw: &str, stopwords: &Stopwords) -> NormalizedText {
    let blanched = blanch(raw);

    let chopped = chop(&blanched)
        .filter(|token| !stopwords.contains(token))
        .collect::<Vec<_>>()
        .join(" ");

    let mut tokens: Vec<&str> = chopped.split_whitespace().collect();
    tokens.sort_unstable();
    let folded = tokens.join(" ");

    let mashed: String = folded.chars().filter(|c| *c != ' ').collect();

    let juiced: String = mashed.chars().collect::<BTreeSet<char>>().into_iter().collect();

    NormalizedText {
        blanched,
        chopped,
        folded,
        mashed,
        juiced,
    }
}

/// Split `raw` into terms the same way the `chopped` tier does, without
/// stopword filtering.
pub fn tokenize(raw: &str) -> Vec<String> {
    chop(&blanch(raw)).map(str::to_string).collect()
}

/// Normalize each word of an already tokenized text.
///
/// Returns `(word, ladder)` pairs in input order. Stopwords are applied to
/// each word individually, so a stopword yields an empty `chopped` tier.
pub fn normalize_words<S: AsRef<str>>(words: &[S], stopwords: &Stopwords) -> Vec<(String, NormalizedText)> {
    words
        .iter()
        .map(|w| (w.as_ref().to_string(), normalize(w.as_ref(), stopwords)))
        .collect()
}

/// Transliterate to ASCII, lowercase and trim.
///
/// Letters without a decomposition (`ł`, `ß`, `ø`) and non-Latin scripts get
/// their closest ASCII spelling instead of being lost to the separator class.
fn blanch(raw: &str) -> String {
    deunicode(raw).to_ascii_lowercase().trim().to_string()
}

/// Tokens of `blanched` text: runs of ASCII letters and digits.
fn chop(blanched: &str) -> impl Iterator<Item = &str> {
    blanched
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn none() -> Stopwords {
        Stopwords::new()
    }

    #[test]
    fn test_cafe_del_mar() {
        let n = normalize("Café del Mar!", &none());
        assert_eq!(n.blanched, "cafe del mar!");
        assert_eq!(n.chopped, "cafe del mar");
        assert_eq!(n.folded, "cafe del mar");
        assert_eq!(n.mashed, "cafedelmar");
        assert_eq!(n.juiced, "acdeflmr");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize("", &none()), NormalizedText::default());
        assert_eq!(normalize("   \t ", &none()), NormalizedText::default());
    }

    #[test]
    fn test_punctuation_runs_collapse() {
        let n = normalize("  The--Wind,  in the WILLOWS ", &none());
        assert_eq!(n.blanched, "the--wind,  in the willows");
        assert_eq!(n.chopped, "the wind in the willows");
        assert_eq!(n.folded, "in the the willows wind");
        assert_eq!(n.mashed, "inthethewillowswind");
    }

    #[test]
    fn test_stopwords_removed_from_chopped() {
        let stop: Stopwords = ["The", " in "].into_iter().collect();
        let n = normalize("The Wind in the Willows", &stop);
        assert_eq!(n.chopped, "wind willows");
        assert_eq!(n.folded, "willows wind");
        assert_eq!(n.juiced, "dilnosw");
    }

    #[test]
    fn test_letters_without_decomposition_are_transliterated() {
        assert_eq!(normalize("Łódź", &none()).chopped, "lodz");
        assert_eq!(normalize("Straße 9", &none()).chopped, "strasse 9");
        assert_eq!(normalize("Ørsted", &none()).chopped, "orsted");
        assert_eq!(normalize("Æsir", &none()).mashed, "aesir");
    }

    #[test]
    fn test_blanched_is_ascii() {
        let n = normalize("  Dvořák: Rusalka ", &none());
        assert_eq!(n.blanched, "dvorak: rusalka");
        assert!(normalize("Łódź Straße Þór", &none()).blanched.is_ascii());
    }

    #[test]
    fn test_folded_is_idempotent() {
        let n = normalize("Zeta alpha, Mu; beta", &none());
        let again = normalize(&n.folded, &none());
        assert_eq!(again.folded, n.folded);
    }

    #[test]
    fn test_tokenize_ignores_stopwords() {
        assert_eq!(tokenize("Of Mice & Men"), vec!["of", "mice", "men"]);
    }

    #[test]
    fn test_normalize_words() {
        let stop: Stopwords = ["the"].into_iter().collect();
        let words = normalize_words(&["The", "Élan"], &stop);
        assert_eq!(words[0].0, "The");
        assert_eq!(words[0].1.chopped, "");
        assert_eq!(words[1].1.mashed, "elan");
    }
}
