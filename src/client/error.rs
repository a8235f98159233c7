//! Error types for schema fetch operations.

use thiserror::Error;

use crate::api::{ApiError, TransportError};
use crate::parser::ParseError;

/// Errors returned by [`SchemaClient`](super::SchemaClient) fetch operations.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The API answered with a non-success status.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// No response was received.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A success response body was not the expected JSON shape.
    #[error("unexpected response format from {url}: {source}")]
    Decode {
        /// Requested URL (API key redacted).
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// The client schema text could not be parsed.
    #[error(transparent)]
    ClientSchema(#[from] ParseError),

    /// A configured or server-supplied URL is invalid.
    #[error("invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Neither the items nor the overview result carried a client schema URL.
    #[error("no items_game_url in either the items or overview result")]
    MissingClientSchemaUrl,

    /// Pagination exceeded the configured `max_pages` bound.
    #[error("item pagination exceeded {limit} page(s) without reaching the last page")]
    PageLimitExceeded { limit: usize },
}

impl SchemaError {
    pub fn decode(url: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Decode {
            url: url.into(),
            source,
        }
    }

    pub fn invalid_url(url: impl Into<String>, source: url::ParseError) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            source,
        }
    }

    /// The classified API error, if this failure came from an HTTP status.
    #[must_use]
    pub fn as_api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(error) => Some(error),
            _ => None,
        }
    }
}
