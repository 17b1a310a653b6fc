use std::fmt;

use thiserror::Error;

use crate::client::RawResponse;

/// Top-level error type for the `nakivo-api` crate.
///
/// Every failure mode of a director call lands in exactly one category:
/// construction, encoding, transport, cancellation, decoding, or an
/// application error reported inside the response envelope.
#[derive(Debug, Error)]
pub enum Error {
    // ── Construction ────────────────────────────────────────────────
    /// The director address was empty.
    #[error("Invalid client configuration: unknown address")]
    InvalidAddress,

    /// The director port was zero.
    #[error("Invalid client configuration: unknown port")]
    InvalidPort,

    /// The router URL could not be built from the address and port.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The HTTP client could not be built (bad CA bundle, TLS backend).
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Encoding ────────────────────────────────────────────────────
    /// The outbound envelope or its parameters could not be serialized.
    #[error("Failed to encode request: {0}")]
    Encode(#[source] serde_json::Error),

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    // ── Cancellation ────────────────────────────────────────────────
    /// The call's cancellation token fired before the response arrived.
    #[error("Request cancelled")]
    Cancelled,

    /// The call's deadline passed before the response arrived.
    #[error("Request deadline exceeded")]
    DeadlineExceeded,

    // ── Data ────────────────────────────────────────────────────────
    /// The director answered with an empty body.
    #[error("Empty response body (HTTP {})", .response.status)]
    EmptyResponse { response: Box<RawResponse> },

    /// The body could not be parsed as an envelope, or `data` did not match
    /// the expected shape. Carries the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization {
        message: String,
        body: String,
        response: Box<RawResponse>,
    },

    // ── Application ─────────────────────────────────────────────────
    /// The envelope itself reported a failure (`message` + `cause`).
    #[error("{error}")]
    Api {
        error: ApiError,
        response: Box<RawResponse>,
    },
}

impl Error {
    /// Returns `true` if the call was abandoned because its context was
    /// cancelled or its deadline passed.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled | Self::DeadlineExceeded)
    }

    /// Returns `true` if the director reported a logical failure.
    pub fn is_api(&self) -> bool {
        matches!(self, Self::Api { .. })
    }

    /// The structured application error, if this is one.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api { error, .. } => Some(error),
            _ => None,
        }
    }

    /// HTTP-level metadata of the response, when one was received.
    pub fn response(&self) -> Option<&RawResponse> {
        match self {
            Self::EmptyResponse { response }
            | Self::Deserialization { response, .. }
            | Self::Api { response, .. } => Some(&**response),
            _ => None,
        }
    }
}

/// Failure reported by the director inside an otherwise valid envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// Human-readable failure message.
    pub message: String,
    /// The envelope's `where` field: the server-side method that failed.
    /// Empty when the director did not say.
    pub location: String,
    /// Cause of the failure.
    pub cause: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.location.is_empty() {
            write!(
                f,
                "api: request failed with '{}' ({})",
                self.message, self.cause
            )
        } else {
            write!(
                f,
                "api: request failed with {} on {} ({})",
                self.message, self.location, self.cause
            )
        }
    }
}

impl std::error::Error for ApiError {}
