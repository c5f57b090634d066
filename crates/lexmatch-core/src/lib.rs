//! lexmatch Core Engine
//!
//! Fuzzy matching of free-form text against a reference dictionary of
//! proper nouns, labels and titles. Pure and in-memory: no I/O, no shared
//! mutable state.
//!
//! # Components
//!
//! - [`normalize`] - five-tier abstraction ladder (blanched, chopped, folded,
//!   mashed, juiced)
//! - [`importance`] - rarity weight per term over a reference corpus
//! - [`similarity`] - gated, length-adjusted Damerau-Levenshtein score
//! - [`matcher`] - candidate ranking and best-match selection
//!
//! # Features
//!
//! - `parallel` - score large dictionaries and batches on the rayon pool
//!
//! # Example
//!
//! ```rust
//! use lexmatch_core::{ImportanceTable, Matcher, Candidates, Stopwords};
//!
//! let corpus = ["The Wind in the Willows", "Wuthering Heights", "Middlemarch"];
//! let stopwords: Stopwords = ["the", "in"].into_iter().collect();
//!
//! let matcher = Matcher::new(
//!     Candidates::from_texts(corpus, &stopwords),
//!     ImportanceTable::build(corpus),
//!     stopwords,
//! );
//!
//! let result = matcher.find("wind in the willow");
//! assert_eq!(result.best_match.as_deref(), Some("The Wind in the Willows"));
//! ```

pub mod error;
mod fingerprint;
pub mod importance;
pub mod matcher;
pub mod normalize;
pub mod similarity;

// Re-export main types at crate root
pub use error::MatchError;
pub use importance::{ImportanceTable, TermRecord, UNSEEN_TERM_IMPORTANCE};
pub use matcher::{
    closest_match, CancelToken, CandidateEntry, CandidateScore, Candidates, MatchResult, Matcher,
    MatcherConfig, NO_MATCH_SCORE,
};
pub use normalize::{normalize, normalize_words, tokenize, NormalizedText, Stopwords};
pub use similarity::similarity;
