//! Error types for the Mollie API client.
//!
//! # Design
//! Three kinds of failure reach the caller: the request never produced a
//! response (`Transport`), a response arrived but its body was not JSON
//! (`InvalidResponse`), or the body carried an `error` envelope (`Api`).
//! The Display text of each is the fixed human-readable message; the status
//! code and detail payload are exposed through accessors for programmatic
//! inspection.
//!
//! A DELETE that hits a missing resource is not an error at all; see
//! `Outcome::Gone`.

use std::error::Error as StdError;

use serde_json::Value;
use thiserror::Error;

/// Coarse classification of an `ApiError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    InvalidResponse,
    Api,
    Serialization,
}

/// Errors returned by endpoint operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No response was received: connection refused, DNS or TLS failure,
    /// or the timeout elapsed.
    #[error("request failed")]
    Transport {
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    /// A response arrived but its body is not valid JSON, or does not have
    /// the shape the caller asked to deserialize.
    #[error("invalid response")]
    InvalidResponse {
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    /// The remote service answered with an `error` envelope. `detail` is the
    /// value of that field.
    #[error("API error")]
    Api { status: u16, detail: Value },

    /// Request parameters could not be converted into form fields.
    #[error("serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Transport { .. } => ErrorKind::Transport,
            ApiError::InvalidResponse { .. } => ErrorKind::InvalidResponse,
            ApiError::Api { .. } => ErrorKind::Api,
            ApiError::Serialization(_) => ErrorKind::Serialization,
        }
    }

    /// HTTP status of the response, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::InvalidResponse { status, .. } | ApiError::Api { status, .. } => Some(*status),
            ApiError::Transport { .. } | ApiError::Serialization(_) => None,
        }
    }

    /// The remote `error` payload of an `Api` error.
    ///
    /// `Transport` and `InvalidResponse` carry their detail as a typed cause
    /// instead: the I/O failure or the JSON parse error, reached through
    /// `std::error::Error::source()`.
    pub fn detail(&self) -> Option<&Value> {
        match self {
            ApiError::Api { detail, .. } => Some(detail),
            _ => None,
        }
    }

    /// Shorthand for `detail()["message"]`, the text Mollie puts in its
    /// error envelopes.
    pub fn remote_message(&self) -> Option<&str> {
        self.detail()?.get("message")?.as_str()
    }
}
