use std::time::Duration;

use thiserror::Error;

/// Failure reported by (or on behalf of) a directions, elevation or places
/// provider. Never retried inside the engine.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{provider} provider returned non-success status: {status}")]
    Status {
        provider: &'static str,
        status: String,
    },
    #[error("elevation batch returned {actual} results for {expected} coordinates")]
    LengthMismatch { expected: usize, actual: usize },
    #[error("no route found between the requested points")]
    NoRoute,
    #[error("elevation data does not cover {missing} coordinate(s)")]
    Coverage { missing: usize },
    #[error("{operation} timed out after {after:?}")]
    Timeout {
        operation: &'static str,
        after: Duration,
    },
    #[error("provider transport error: {0}")]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error("degenerate input: {0}")]
    DegenerateInput(String),
}

impl AnalyticsError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, AnalyticsError::Provider(ProviderError::Timeout { .. }))
    }
}
