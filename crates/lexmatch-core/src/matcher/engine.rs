//! Matcher - ranks a candidate dictionary against a query

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::candidates::{CandidateEntry, Candidates};
use super::scoring::{score_candidate, threshold, CandidateScore};
use crate::error::MatchError;
use crate::importance::ImportanceTable;
use crate::normalize::{normalize, NormalizedText, Stopwords};

/// Best score reported when no candidate is retained
pub const NO_MATCH_SCORE: f64 = 1000.0;

/// Ranked outcome of one query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub query: String,
    /// Retained candidates in dictionary order
    pub candidates: IndexMap<String, CandidateScore>,
    pub best_match: Option<String>,
    pub best_score: f64,
}

impl MatchResult {
    fn empty(query: &str) -> Self {
        Self {
            query: query.to_string(),
            candidates: IndexMap::new(),
            best_match: None,
            best_score: NO_MATCH_SCORE,
        }
    }

    pub fn is_match(&self) -> bool {
        self.best_match.is_some()
    }
}

/// Matcher configuration
#[derive(Debug, Clone)]
pub struct MatcherConfig {
    /// Dictionary size at which candidate scoring goes parallel
    pub parallel_threshold: usize,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: 1000,
        }
    }
}

/// Cooperative cancellation signal, checked between candidates
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Token that also fires once `timeout` has elapsed
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
            deadline: Some(Instant::now() + timeout),
        }
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
            || self.deadline.is_some_and(|d| Instant::now() >= d)
    }
}

/// Rank `candidates` against `query` and pick the best match.
pub fn closest_match(
    query: &str,
    candidates: &Candidates,
    importance: &ImportanceTable,
    stopwords: &Stopwords,
) -> MatchResult {
    let config = MatcherConfig::default();
    let matcher = MatchRef {
        candidates,
        importance,
        stopwords,
        config: &config,
    };
    match matcher.run(query, None) {
        Ok(result) => result,
        // without a token the run cannot be cancelled
        Err(_) => MatchResult::empty(query),
    }
}

/// Reusable matcher over a fixed dictionary and importance table.
///
/// Immutable once built; share it freely across threads.
#[derive(Debug, Clone)]
pub struct Matcher {
    candidates: Candidates,
    importance: ImportanceTable,
    stopwords: Stopwords,
    config: MatcherConfig,
}

impl Matcher {
    pub fn new(candidates: Candidates, importance: ImportanceTable, stopwords: Stopwords) -> Self {
        Self::with_config(candidates, importance, stopwords, MatcherConfig::default())
    }

    pub fn with_config(
        candidates: Candidates,
        importance: ImportanceTable,
        stopwords: Stopwords,
        config: MatcherConfig,
    ) -> Self {
        Self {
            candidates,
            importance,
            stopwords,
            config,
        }
    }

    /// Find the best match for `query`
    pub fn find(&self, query: &str) -> MatchResult {
        match self.view().run(query, None) {
            Ok(result) => result,
            Err(_) => MatchResult::empty(query),
        }
    }

    /// Find the best match, giving up when `token` fires
    pub fn find_cancellable(&self, query: &str, token: &CancelToken) -> Result<MatchResult, MatchError> {
        self.view().run(query, Some(token))
    }

    /// Match every query; results are in query order.
    pub fn find_batch<S: AsRef<str> + Sync>(&self, queries: &[S]) -> Vec<MatchResult> {
        #[cfg(feature = "parallel")]
        {
            queries.par_iter().map(|q| self.find(q.as_ref())).collect()
        }

        #[cfg(not(feature = "parallel"))]
        {
            queries.iter().map(|q| self.find(q.as_ref())).collect()
        }
    }

    pub fn candidates(&self) -> &Candidates {
        &self.candidates
    }

    pub fn importance(&self) -> &ImportanceTable {
        &self.importance
    }

    pub fn stopwords(&self) -> &Stopwords {
        &self.stopwords
    }

    fn view(&self) -> MatchRef<'_> {
        MatchRef {
            candidates: &self.candidates,
            importance: &self.importance,
            stopwords: &self.stopwords,
            config: &self.config,
        }
    }
}

/// Borrowed view shared by the free function and [`Matcher`]
struct MatchRef<'a> {
    candidates: &'a Candidates,
    importance: &'a ImportanceTable,
    stopwords: &'a Stopwords,
    #[cfg_attr(not(feature = "parallel"), allow(dead_code))]
    config: &'a MatcherConfig,
}

/// Normalized query plus the values derived from it once per match
struct Query<'q> {
    raw: &'q str,
    norm: &'q NormalizedText,
    words: Vec<&'q str>,
    threshold: usize,
}

impl<'a> MatchRef<'a> {
    fn run(&self, query: &str, token: Option<&CancelToken>) -> Result<MatchResult, MatchError> {
        let norm = normalize(query, self.stopwords);
        let q = Query {
            raw: query,
            norm: &norm,
            words: norm.words().collect(),
            threshold: threshold(norm.mashed_len(), norm.juiced_len()),
        };

        let scored = self.score_all(&q, token)?;

        let candidates: IndexMap<String, CandidateScore> = self
            .candidates
            .iter()
            .zip(scored)
            .filter_map(|(entry, score)| score.map(|s| (entry.name.clone(), s)))
            .collect();

        let (best_match, best_score) = rank(&candidates);

        debug!(
            query,
            threshold = q.threshold,
            total = self.candidates.len(),
            retained = candidates.len(),
            best = best_match.as_deref().unwrap_or(""),
            best_score,
            "matched query"
        );

        Ok(MatchResult {
            query: query.to_string(),
            candidates,
            best_match,
            best_score,
        })
    }

    /// Score every candidate, one slot per candidate in dictionary order
    #[cfg(feature = "parallel")]
    fn score_all(&self, q: &Query<'_>, token: Option<&CancelToken>) -> Result<Vec<Option<CandidateScore>>, MatchError> {
        if self.candidates.len() >= self.config.parallel_threshold {
            let total = self.candidates.len();
            self.candidates
                .entries()
                .par_iter()
                .map(|entry| {
                    if token.is_some_and(CancelToken::is_cancelled) {
                        // rayon does not report progress; count is a lower bound
                        return Err(MatchError::Cancelled { scored: 0, total });
                    }
                    Ok(self.score_one(q, entry))
                })
                .collect()
        } else {
            self.score_sequential(q, token)
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn score_all(&self, q: &Query<'_>, token: Option<&CancelToken>) -> Result<Vec<Option<CandidateScore>>, MatchError> {
        self.score_sequential(q, token)
    }

    fn score_sequential(&self, q: &Query<'_>, token: Option<&CancelToken>) -> Result<Vec<Option<CandidateScore>>, MatchError> {
        let total = self.candidates.len();
        let mut scored = Vec::with_capacity(total);
        for entry in self.candidates {
            if token.is_some_and(CancelToken::is_cancelled) {
                return Err(MatchError::Cancelled {
                    scored: scored.len(),
                    total,
                });
            }
            scored.push(self.score_one(q, entry));
        }
        Ok(scored)
    }

    fn score_one(&self, q: &Query<'_>, entry: &CandidateEntry) -> Option<CandidateScore> {
        score_candidate(
            q.raw,
            q.norm,
            &q.words,
            q.threshold,
            &entry.name,
            &entry.normalized,
            self.importance,
        )
    }
}

/// Lowest composite wins; ties go to the earlier candidate. A sole retained
/// candidate wins whatever its composite.
fn rank(candidates: &IndexMap<String, CandidateScore>) -> (Option<String>, f64) {
    if candidates.len() == 1 {
        if let Some((name, score)) = candidates.first() {
            return (Some(name.clone()), score.composite());
        }
    }

    let mut best_match = None;
    let mut best_score = NO_MATCH_SCORE;
    for (name, score) in candidates {
        let composite = score.composite();
        if composite < best_score {
            best_match = Some(name.clone());
            best_score = composite;
        }
    }
    (best_match, best_score)
}
