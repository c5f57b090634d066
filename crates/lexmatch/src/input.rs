//! Reference data loaders
//!
//! - corpus: one text per non-blank line
//! - candidates: a JSON object of `name -> text`, or one text per line
//! - stopwords: one word per line, `#` comment lines

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use lexmatch_core::Stopwords;
use tracing::debug;

use crate::error::{Error, Result};

/// Ordered `name -> raw text` pairs as loaded from disk
pub type CandidateTexts = IndexMap<String, String>;

/// Non-blank lines of a UTF-8 text file, trimmed
pub fn load_lines(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect())
}

/// Reference corpus for the importance table
pub fn load_corpus(path: &Path) -> Result<Vec<String>> {
    let corpus = load_lines(path)?;
    debug!(path = %path.display(), texts = corpus.len(), "loaded corpus");
    Ok(corpus)
}

pub fn load_stopwords(path: &Path) -> Result<Stopwords> {
    let stopwords: Stopwords = load_lines(path)?
        .into_iter()
        .filter(|l| !l.starts_with('#'))
        .collect();
    debug!(path = %path.display(), count = stopwords.len(), "loaded stopwords");
    Ok(stopwords)
}

/// Candidate dictionary, in file order.
///
/// `.json` files hold an object of string values; anything else is read as
/// one candidate per line, named by its own text.
pub fn load_candidates(path: &Path) -> Result<CandidateTexts> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let candidates = if is_json {
        parse_candidate_json(path, &fs::read_to_string(path)?)?
    } else {
        load_lines(path)?
            .into_iter()
            .map(|line| (line.clone(), line))
            .collect()
    };

    debug!(path = %path.display(), count = candidates.len(), "loaded candidates");
    Ok(candidates)
}

fn parse_candidate_json(path: &Path, content: &str) -> Result<CandidateTexts> {
    let value: serde_json::Value = serde_json::from_str(content)?;
    let serde_json::Value::Object(_) = value else {
        return Err(Error::Input {
            path: path.to_path_buf(),
            message: "expected a JSON object of name -> text".to_string(),
        });
    };

    // re-parse into an IndexMap so document order survives
    serde_json::from_str::<CandidateTexts>(content).map_err(|e| Error::Input {
        path: path.to_path_buf(),
        message: format!("candidate texts must be strings: {}", e),
    })
}
