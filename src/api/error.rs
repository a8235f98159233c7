//! Classification of failed Steam Web API responses.
//!
//! A non-success response is classified once, at the HTTP boundary, into an
//! [`ApiErrorKind`]. The resulting [`ApiError`] displays a fixed category
//! message and always keeps the original response as its [`ErrorCause`].
//!
//! | Status | Kind | Retryable |
//! |--------|------|-----------|
//! | 400 | `MalformedRequest` | no |
//! | 401, 403 | `AccessDenied` | no |
//! | 408 | `RequestTimeout` | yes |
//! | 500 | `ServerError` | no |
//! | 502, 504 | `UpstreamUnavailable` | yes |
//! | other | `Unknown` | no |
//!
//! Retryability is advisory; nothing in this crate retries.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::transport::HttpResponse;

const MALFORMED_REQUEST_MESSAGE: &str =
    "The request was malformed or invalid. Check the error cause or try again";
const ACCESS_DENIED_MESSAGE: &str =
    "Access is denied. Retrying will not help. Please verify your API key";
const REQUEST_TIMEOUT_MESSAGE: &str = "The request timed out. Please try again later";
const SERVER_ERROR_MESSAGE: &str =
    "An unexpected error occurred when communicating with the Steam Web API";
const UPSTREAM_UNAVAILABLE_MESSAGE: &str =
    "Steam servers are currently unavailable or not responding. Please try again later";
const UNKNOWN_MESSAGE: &str = "Unknown error occurred while processing the Steam API response";

/// Category of a failed API response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    /// 400 Bad Request.
    MalformedRequest,
    /// 401 Unauthorized or 403 Forbidden; the API key is the problem.
    AccessDenied,
    /// 408 Request Timeout.
    RequestTimeout,
    /// 500 Internal Server Error.
    ServerError,
    /// 502 Bad Gateway or 504 Gateway Timeout.
    UpstreamUnavailable,
    /// Any other status.
    Unknown,
}

impl ApiErrorKind {
    /// Classifies an HTTP status code.
    #[must_use]
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => Self::MalformedRequest,
            401 | 403 => Self::AccessDenied,
            408 => Self::RequestTimeout,
            500 => Self::ServerError,
            502 | 504 => Self::UpstreamUnavailable,
            _ => Self::Unknown,
        }
    }

    /// The fixed human-readable message for this category.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::MalformedRequest => MALFORMED_REQUEST_MESSAGE,
            Self::AccessDenied => ACCESS_DENIED_MESSAGE,
            Self::RequestTimeout => REQUEST_TIMEOUT_MESSAGE,
            Self::ServerError => SERVER_ERROR_MESSAGE,
            Self::UpstreamUnavailable => UPSTREAM_UNAVAILABLE_MESSAGE,
            Self::Unknown => UNKNOWN_MESSAGE,
        }
    }

    /// Whether a caller-side retry may succeed.
    #[must_use]
    pub fn is_retryable(self) -> bool {
        matches!(self, Self::RequestTimeout | Self::UpstreamUnavailable)
    }

    /// Stable snake-case label for logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MalformedRequest => "malformed_request",
            Self::AccessDenied => "access_denied",
            Self::RequestTimeout => "request_timeout",
            Self::ServerError => "server_error",
            Self::UpstreamUnavailable => "upstream_unavailable",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The failed response an [`ApiError`] was classified from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorCause {
    /// Raw response body.
    pub body: String,
    /// HTTP status code.
    pub status: u16,
    /// Canonical reason phrase for the status (may be empty).
    #[serde(rename = "statusText")]
    pub status_text: String,
}

/// A classified Steam Web API failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", kind.message())]
pub struct ApiError {
    kind: ApiErrorKind,
    cause: ErrorCause,
}

impl ApiError {
    /// Classifies a cause by its status code.
    #[must_use]
    pub fn new(cause: ErrorCause) -> Self {
        Self {
            kind: ApiErrorKind::from_status(cause.status),
            cause,
        }
    }

    /// Builds an error from a failed response, keeping body and status.
    #[must_use]
    pub fn from_response(response: &HttpResponse) -> Self {
        Self::new(ErrorCause {
            body: response.body.clone(),
            status: response.status,
            status_text: response.status_text.clone(),
        })
    }

    #[must_use]
    pub fn kind(&self) -> ApiErrorKind {
        self.kind
    }

    #[must_use]
    pub fn cause(&self) -> &ErrorCause {
        &self.cause
    }

    /// The category message (same text as `Display`).
    #[must_use]
    pub fn message(&self) -> &'static str {
        self.kind.message()
    }

    #[must_use]
    pub fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = "Response from the Steam Web API";

    fn error_for(status: u16) -> ApiError {
        ApiError::from_response(&HttpResponse {
            status,
            status_text: "Reason".to_string(),
            body: BODY.to_string(),
        })
    }

    #[test]
    fn test_bad_gateway_and_gateway_timeout_share_unavailable_message() {
        let bad_gateway = error_for(502);
        let gateway_timeout = error_for(504);
        assert_eq!(bad_gateway.kind(), ApiErrorKind::UpstreamUnavailable);
        assert_eq!(
            bad_gateway.to_string(),
            "Steam servers are currently unavailable or not responding. Please try again later"
        );
        assert_eq!(bad_gateway.to_string(), gateway_timeout.to_string());
        assert!(bad_gateway.is_retryable());
    }

    #[test]
    fn test_bad_request_is_malformed() {
        let err = error_for(400);
        assert_eq!(err.kind(), ApiErrorKind::MalformedRequest);
        assert_eq!(
            err.to_string(),
            "The request was malformed or invalid. Check the error cause or try again"
        );
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_request_timeout_is_retryable() {
        let err = error_for(408);
        assert_eq!(err.kind(), ApiErrorKind::RequestTimeout);
        assert_eq!(err.to_string(), "The request timed out. Please try again later");
        assert!(err.is_retryable());
    }

    #[test]
    fn test_unauthorized_and_forbidden_share_access_denied_message() {
        let unauthorized = error_for(401);
        let forbidden = error_for(403);
        assert_eq!(unauthorized.kind(), ApiErrorKind::AccessDenied);
        assert_eq!(forbidden.kind(), ApiErrorKind::AccessDenied);
        assert_eq!(
            forbidden.to_string(),
            "Access is denied. Retrying will not help. Please verify your API key"
        );
        assert_eq!(unauthorized.message(), forbidden.message());
        assert!(!forbidden.is_retryable());
    }

    #[test]
    fn test_internal_server_error_message() {
        let err = error_for(500);
        assert_eq!(err.kind(), ApiErrorKind::ServerError);
        assert_eq!(
            err.to_string(),
            "An unexpected error occurred when communicating with the Steam Web API"
        );
    }

    #[test]
    fn test_unlisted_status_is_unknown() {
        for status in [418, 404, 429, 503] {
            let err = error_for(status);
            assert_eq!(err.kind(), ApiErrorKind::Unknown, "status {status}");
            assert_eq!(
                err.to_string(),
                "Unknown error occurred while processing the Steam API response"
            );
        }
    }

    #[test]
    fn test_cause_is_preserved_for_every_category() {
        for status in [400, 401, 403, 408, 500, 502, 504, 418] {
            let err = error_for(status);
            assert_eq!(err.cause().status, status);
            assert_eq!(err.cause().body, BODY);
            assert_eq!(err.cause().status_text, "Reason");
        }
    }

    #[test]
    fn test_cause_serializes_status_text_in_camel_case() {
        let cause = error_for(418).cause().clone();
        let json = serde_json::to_value(&cause).unwrap_or_default();
        assert_eq!(json["statusText"], "Reason");
        assert_eq!(json["status"], 418);
    }
}
