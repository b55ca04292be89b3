//! Error types for page copy actions
//!
//! Per-section extractors never return these; they degrade to an empty
//! section. Only action-scoped operations (`crate::actions`) and the
//! notebook collaborator surface a `PageCopyError`.

use thiserror::Error;

/// Result type alias for page copy operations
pub type PageCopyResult<T> = Result<T, PageCopyError>;

/// Error types for page copy operations
#[derive(Debug, Error)]
pub enum PageCopyError {
    /// An action required content that no extractor produced
    #[error("Nothing to extract: {0}")]
    NothingExtracted(String),

    /// A network call failed or returned a non-success status
    #[error("Transport failure for {url}: {message}")]
    Transport { url: String, message: String },

    /// A network call did not finish within the configured timeout
    #[error("Request to {url} timed out")]
    Timeout { url: String },

    /// The action cannot run against this page or input
    #[error("{0}")]
    Unsupported(String),

    /// Another action is still running
    #[error("Another action is already in progress")]
    Busy,

    /// The streaming markup rewriter rejected its input
    #[error("Markup rewrite failed: {0}")]
    Rewrite(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Base64 payload could not be decoded
    #[error("Invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
}

impl From<reqwest::Error> for PageCopyError {
    fn from(error: reqwest::Error) -> Self {
        let url = error
            .url()
            .map(ToString::to_string)
            .unwrap_or_else(|| "<unknown>".to_string());
        if error.is_timeout() {
            PageCopyError::Timeout { url }
        } else {
            PageCopyError::Transport {
                url,
                message: error.to_string(),
            }
        }
    }
}

impl PageCopyError {
    /// Check if the error came from the network layer
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            PageCopyError::Transport { .. } | PageCopyError::Timeout { .. }
        )
    }

    /// Short label for the user-visible failure indicator
    #[must_use]
    pub fn indicator(&self) -> &'static str {
        match self {
            PageCopyError::NothingExtracted(_) => "nothing extracted",
            PageCopyError::Transport { .. } | PageCopyError::Timeout { .. } => "network failure",
            PageCopyError::Unsupported(_) | PageCopyError::Busy => "unsupported",
            PageCopyError::Config(_) => "configuration error",
            PageCopyError::Rewrite(_)
            | PageCopyError::Io(_)
            | PageCopyError::Json(_)
            | PageCopyError::Base64(_) => "output failure",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_classification() {
        let err = PageCopyError::Timeout {
            url: "https://a.b/api".to_string(),
        };
        assert!(err.is_transport());
        assert_eq!(err.indicator(), "network failure");

        let err = PageCopyError::Unsupported("No text selected".to_string());
        assert!(!err.is_transport());
        assert_eq!(err.to_string(), "No text selected");
    }
}
