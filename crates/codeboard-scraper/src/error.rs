use thiserror::Error;

use crate::types::FailureKind;

/// Everything that can go wrong inside a single source fetch.
///
/// These never leave a source: each source's `fetch` folds them into a
/// degraded [`crate::SourceRecord`] according to that source's fallback rules.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("{element} not found in profile")]
    MissingElement { element: &'static str },

    #[error("invalid number for {field}: \"{value}\"")]
    InvalidNumber { field: &'static str, value: String },

    #[error("invalid CSS selector \"{css}\": {reason}")]
    Selector { css: String, reason: String },

    #[error("GraphQL query error: {0}")]
    Query(String),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

impl SourceError {
    /// Where this error sits in the failure taxonomy.
    #[must_use]
    pub fn kind(&self) -> FailureKind {
        match self {
            SourceError::Http(_) => FailureKind::Transport,
            SourceError::UnexpectedStatus { .. } => FailureKind::Status,
            SourceError::MissingElement { .. } | SourceError::InvalidNumber { .. } => {
                FailureKind::StructuralParse
            }
            SourceError::Query(_) | SourceError::Deserialize { .. } => FailureKind::Query,
            SourceError::Selector { .. } => FailureKind::Unexpected,
        }
    }
}
