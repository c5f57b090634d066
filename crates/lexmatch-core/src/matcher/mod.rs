//! Candidate Matcher
//!
//! Ranks a candidate dictionary against a free-form query and returns the
//! single best match. Each candidate goes through:
//!
//! 1. Word score - full cross product of query and candidate words; exact
//!    words add their importance, near misses add 0.9 / 0.3 / 0.1
//! 2. Hard gate - a juiced tier with no characters in common rejects the
//!    candidate outright
//! 3. Soft threshold - juiced, mashed and folded tiers count only within a
//!    length-derived tolerance
//! 4. Inclusion - strong words, decent words plus a mashed score, or a folded
//!    score keep the candidate
//!
//! The lowest composite (`-words + tier scores`) wins; ties go to the earlier
//! candidate in dictionary order.
//!
//! # Example
//!
//! ```rust
//! use lexmatch_core::matcher::{closest_match, Candidates};
//! use lexmatch_core::{ImportanceTable, Stopwords};
//!
//! let stopwords = Stopwords::new();
//! let texts = ["dog", "dot"];
//! let candidates = Candidates::from_texts(texts, &stopwords);
//! let importance = ImportanceTable::build(texts);
//!
//! let result = closest_match("dog", &candidates, &importance, &stopwords);
//! assert_eq!(result.best_match.as_deref(), Some("dog"));
//! ```

mod candidates;
mod engine;
mod scoring;

pub use candidates::{CandidateEntry, Candidates};
pub use engine::{closest_match, CancelToken, MatchResult, Matcher, MatcherConfig, NO_MATCH_SCORE};
pub use scoring::{threshold, word_score, CandidateScore, TierScore};
