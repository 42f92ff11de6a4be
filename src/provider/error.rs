//! Request-path errors and their HTTP mapping.

use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;
use serde_json::Value;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum CheckoutError {
    /// A credential needed by this route is not configured
    #[error("{0}")]
    Configuration(String),

    /// The provider could not be reached, or the call timed out
    #[error("{operation}: {source}")]
    UpstreamTransport {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The client-credentials exchange was refused
    #[error("access token request failed: {status}")]
    TokenRejected { status: StatusCode, body: String },

    /// Provider returned a non-success JSON payload; relayed as-is
    #[error("provider returned {status}")]
    Upstream { status: StatusCode, body: Value },

    /// Provider reply did not have the expected shape
    #[error("malformed provider response: {0}")]
    MalformedResponse(String),

    /// Request from the browser cannot be forwarded
    #[error("{0}")]
    InvalidRequest(String),

    #[error("checkout page rendering failed: {0}")]
    Template(String),
}

impl CheckoutError {
    pub fn transport(operation: &'static str, source: reqwest::Error) -> Self {
        CheckoutError::UpstreamTransport { operation, source }
    }

    pub fn malformed(detail: impl Into<String>) -> Self {
        CheckoutError::MalformedResponse(detail.into())
    }

    /// Metric label
    pub fn reason(&self) -> &'static str {
        match self {
            CheckoutError::Configuration(_) => "configuration",
            CheckoutError::UpstreamTransport { source, .. } if source.is_timeout() => "timeout",
            CheckoutError::UpstreamTransport { .. } => "transport",
            CheckoutError::TokenRejected { .. } => "token_rejected",
            CheckoutError::Upstream { .. } => "upstream",
            CheckoutError::MalformedResponse(_) => "malformed",
            CheckoutError::InvalidRequest(_) => "invalid_request",
            CheckoutError::Template(_) => "template",
        }
    }
}

impl IntoResponse for CheckoutError {
    fn into_response(self) -> Response {
        match self {
            CheckoutError::Upstream { status, body } => (status, Json(body)).into_response(),
            CheckoutError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            other => {
                error!("{}", other);
                (StatusCode::INTERNAL_SERVER_ERROR, other.to_string()).into_response()
            }
        }
    }
}
