//! Matching error types

use thiserror::Error;

/// Errors from the cancellable matching entry points.
///
/// Plain matching never fails; anomalies degrade to "no match".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    /// The cancel token fired before every candidate was scored
    #[error("match cancelled after {scored} of {total} candidates")]
    Cancelled { scored: usize, total: usize },
}
