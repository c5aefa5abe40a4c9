use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Service error codes that indicate a temporary outage rather than bad input.
const TRANSIENT_SERVICE_CODES: &[i64] = &[10, 105, 106];

pub const CONNECTIVITY_MESSAGE: &str =
    "Network connection failed. Please check your internet connection.";
pub const SERVICE_FALLBACK_MESSAGE: &str = "Failed to fetch data from Flickr";
pub const NO_RESULTS_MESSAGE: &str = "No photos found";

/// Classified feed failure.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum FeedError {
    /// Request could not complete: network unreachable or non-2xx status.
    #[error("transport error: {message}")]
    Transport { status: Option<u16>, message: String },

    /// Service answered but reported a logical failure.
    #[error("service error ({code:?}): {message}")]
    Service { code: Option<i64>, message: String },

    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// Zero results for a non-append query.
    #[error("no results for query {query:?}")]
    EmptyResult { query: String },

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Coarse classification the presentation layer switches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedErrorKind {
    Transport,
    Service,
    EmptyResult,
}

impl FeedError {
    pub fn transport(message: impl Into<String>) -> Self {
        FeedError::Transport {
            status: None,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> FeedErrorKind {
        match self {
            FeedError::Transport { .. } => FeedErrorKind::Transport,
            FeedError::EmptyResult { .. } => FeedErrorKind::EmptyResult,
            FeedError::Service { .. }
            | FeedError::MalformedPayload(_)
            | FeedError::InvalidRequest(_) => FeedErrorKind::Service,
        }
    }

    /// Whether retrying the same request can succeed without new input.
    pub fn is_retryable(&self) -> bool {
        match self {
            FeedError::Transport { .. } | FeedError::MalformedPayload(_) => true,
            FeedError::Service { code, .. } => code
                .map(|c| TRANSIENT_SERVICE_CODES.contains(&c))
                .unwrap_or(false),
            FeedError::EmptyResult { .. } | FeedError::InvalidRequest(_) => false,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            FeedError::Transport { .. } => CONNECTIVITY_MESSAGE.to_string(),
            FeedError::Service { message, .. } if !message.trim().is_empty() => message.clone(),
            FeedError::Service { .. } | FeedError::MalformedPayload(_) => {
                SERVICE_FALLBACK_MESSAGE.to_string()
            }
            FeedError::EmptyResult { .. } => NO_RESULTS_MESSAGE.to_string(),
            FeedError::InvalidRequest(message) => message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_payload_is_classified_as_service() {
        let err = FeedError::MalformedPayload("missing photos".into());
        assert_eq!(err.kind(), FeedErrorKind::Service);
        assert!(err.is_retryable());
    }

    #[test]
    fn service_retryability_depends_on_code() {
        let bad_key = FeedError::Service {
            code: Some(100),
            message: "Invalid API Key".into(),
        };
        let outage = FeedError::Service {
            code: Some(105),
            message: "Service currently unavailable".into(),
        };
        assert!(!bad_key.is_retryable());
        assert!(outage.is_retryable());
    }

    #[test]
    fn user_messages_follow_classification() {
        assert_eq!(
            FeedError::transport("dns").user_message(),
            CONNECTIVITY_MESSAGE
        );
        assert_eq!(
            FeedError::Service {
                code: Some(100),
                message: "Invalid API Key".into()
            }
            .user_message(),
            "Invalid API Key"
        );
        assert_eq!(
            FeedError::Service {
                code: None,
                message: String::new()
            }
            .user_message(),
            SERVICE_FALLBACK_MESSAGE
        );
        assert_eq!(
            FeedError::EmptyResult {
                query: "zzz".into()
            }
            .user_message(),
            NO_RESULTS_MESSAGE
        );
    }
}
