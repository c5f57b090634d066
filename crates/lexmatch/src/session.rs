//! Matching sessions
//!
//! A session owns the reference data for one run: it builds the importance
//! table first, then serves queries against a read-only [`Matcher`].

use std::path::Path;
use std::time::Instant;

use lexmatch_core::{CancelToken, Candidates, ImportanceTable, MatchResult, Matcher, Stopwords};
use tracing::info;

use crate::config::Config;
use crate::error::Result;
use crate::input::{self, CandidateTexts};

pub struct Session {
    matcher: Matcher,
    config: Config,
}

impl Session {
    /// Build a session from in-memory reference data.
    ///
    /// Without a corpus, the candidate texts themselves are the corpus.
    pub fn new(
        candidates: CandidateTexts,
        corpus: Option<Vec<String>>,
        stopwords: Stopwords,
        config: Config,
    ) -> Self {
        let start = Instant::now();

        let importance = match &corpus {
            Some(corpus) => ImportanceTable::build(corpus),
            None => ImportanceTable::build(candidates.values()),
        };
        let candidates = Candidates::from_pairs(candidates, &stopwords);

        info!(
            candidates = candidates.len(),
            terms = importance.len(),
            stopwords = stopwords.len(),
            build_ms = start.elapsed().as_millis() as u64,
            "session ready"
        );

        let matcher = Matcher::with_config(candidates, importance, stopwords, config.matcher_config());
        Self { matcher, config }
    }

    /// Load reference data from disk and build a session
    pub fn load(
        candidates_path: &Path,
        corpus_path: Option<&Path>,
        stopwords_path: Option<&Path>,
        config: Config,
    ) -> Result<Self> {
        config.validate()?;

        let candidates = input::load_candidates(candidates_path)?;
        let corpus = corpus_path.map(input::load_corpus).transpose()?;
        let stopwords = match stopwords_path {
            Some(path) => input::load_stopwords(path)?,
            None => Stopwords::new(),
        };

        Ok(Self::new(candidates, corpus, stopwords, config))
    }

    /// Match one query, subject to the configured timeout
    pub fn run_query(&self, query: &str) -> Result<MatchResult> {
        match self.config.timeout() {
            Some(timeout) => {
                let token = CancelToken::with_timeout(timeout);
                Ok(self.matcher.find_cancellable(query, &token)?)
            }
            None => Ok(self.matcher.find(query)),
        }
    }

    /// Match every query, results in query order.
    ///
    /// With a timeout each query gets its own budget and the first query to
    /// run out fails the batch.
    pub fn run_batch<S: AsRef<str> + Sync>(&self, queries: &[S]) -> Result<Vec<MatchResult>> {
        if self.config.timeout().is_none() {
            return Ok(self.matcher.find_batch(queries));
        }
        queries.iter().map(|q| self.run_query(q.as_ref())).collect()
    }

    /// Whether the importance table was built from exactly this corpus
    pub fn importance_is_current<S: AsRef<str>>(&self, corpus: &[S]) -> bool {
        self.matcher.importance().is_current_for(corpus)
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(pairs: &[(&str, &str)]) -> CandidateTexts {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_candidates_double_as_corpus() {
        let session = Session::new(
            texts(&[("wh", "Wuthering Heights"), ("mm", "Middlemarch")]),
            None,
            Stopwords::new(),
            Config::default(),
        );
        assert!(session.importance_is_current(&["Wuthering Heights", "Middlemarch"]));
        assert_eq!(session.matcher().importance().importance("heights"), 1.0);
    }

    #[test]
    fn test_explicit_corpus_is_used() {
        let corpus = vec!["heights heights".to_string(), "middlemarch".to_string()];
        let session = Session::new(
            texts(&[("wh", "Wuthering Heights")]),
            Some(corpus.clone()),
            Stopwords::new(),
            Config::default(),
        );
        assert!(session.importance_is_current(&corpus));
        assert_eq!(session.matcher().importance().get("heights").map(|r| r.count), Some(2));
    }

    #[test]
    fn test_run_query_uses_names() {
        let session = Session::new(
            texts(&[("wh", "Wuthering Heights"), ("mm", "Middlemarch")]),
            None,
            Stopwords::new(),
            Config::default(),
        );
        let result = session.run_query("wuthering heights").unwrap();
        assert_eq!(result.best_match.as_deref(), Some("wh"));
    }

    #[test]
    fn test_batch_with_timeout() {
        let config = Config {
            timeout_ms: Some(60_000),
            ..Config::default()
        };
        let session = Session::new(
            texts(&[("mm", "Middlemarch")]),
            None,
            Stopwords::new(),
            config,
        );
        let results = session.run_batch(&["middlemarch", "qqq"]).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].best_match.as_deref(), Some("mm"));
        assert_eq!(results[1].best_match, None);
    }
}
