//! Client error types.

use std::sync::Arc;

use serde::Deserialize;

/// Errors that can occur when using the client.
///
/// Transport, API and decode errors come from the [`Backend`](crate::Backend)
/// and reach the caller unchanged. The error is `Clone` so a failed
/// [`ListIter`](crate::ListIter) can keep returning it.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ClientError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[source] Arc<reqwest::Error>),

    /// Stripe API returned an error.
    #[error("Stripe API error ({status}): {error_type} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error type (e.g., `invalid_request_error`).
        error_type: String,
        /// Error message.
        message: String,
        /// Error code.
        code: Option<String>,
        /// Parameter that caused the error.
        param: Option<String>,
    },

    /// Response body could not be decoded.
    #[error("serialization error: {0}")]
    Serialization(#[source] Arc<serde_json::Error>),

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Webhook signature did not match.
    #[error("invalid webhook signature")]
    InvalidSignature,

    /// Webhook signature header is malformed or too old.
    #[error("webhook timestamp rejected: {0}")]
    WebhookTimestamp(String),
}

impl ClientError {
    /// HTTP status of an API error.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether the API reported the resource as missing.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(Arc::new(err))
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(Arc::new(err))
    }
}

/// Stripe API error response.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

/// Stripe error detail.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorDetail {
    #[serde(rename = "type", default)]
    pub error_type: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub param: Option<String>,
}

impl ApiErrorResponse {
    /// Parse an error body, falling back to a generic error for the status.
    pub(crate) fn into_error(body: &[u8], status: u16) -> ClientError {
        match serde_json::from_slice::<Self>(body) {
            Ok(response) => ClientError::Api {
                status,
                error_type: response.error.error_type,
                message: response.error.message,
                code: response.error.code,
                param: response.error.param,
            },
            Err(_) => ClientError::Api {
                status,
                error_type: "unknown".to_string(),
                message: format!("HTTP {status}"),
                code: None,
                param: None,
            },
        }
    }
}
