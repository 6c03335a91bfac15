//! Error type for the data-access layer.
//!
//! The taxonomy callers see is deliberately small: transport failures, HTTP
//! error statuses carrying the server's message, and decode failures at the
//! boundary. Business-rule rejections always arrive as a status error; the
//! client defines no business error types of its own.

use thiserror::Error;

/// Errors that can occur when talking to the Copperleaf API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never completed (connect failure, timeout, bad TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with an error status and (usually) a message.
    #[error("API error ({status}): {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Server-supplied message, or a generic fallback.
        message: String,
    },

    /// The response body did not match the endpoint's declared shape.
    #[error("decode error at {endpoint}: {source}")]
    Decode {
        /// Endpoint path the response came from.
        endpoint: String,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Resource not found (HTTP 404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Missing or insufficient credentials (HTTP 401/403).
    #[error("unauthorized: {0}")]
    Unauthorized(String),
}

impl ApiError {
    /// Map an error response status to the matching variant.
    pub(crate) fn from_status(status: reqwest::StatusCode, message: String) -> Self {
        match status.as_u16() {
            404 => Self::NotFound(message),
            401 | 403 => Self::Unauthorized(message),
            code => Self::Status {
                status: code,
                message,
            },
        }
    }

    /// The HTTP status associated with this error, when one exists.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            Self::Status { status, .. } => Some(*status),
            Self::NotFound(_) => Some(404),
            Self::Unauthorized(_) => Some(401),
            Self::Decode { .. } => None,
        }
    }

    /// Message suitable for a user-facing notification.
    ///
    /// Server-supplied messages pass through; transport and decode failures
    /// collapse to a generic fallback rather than leaking internals.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Status { message, .. } | Self::NotFound(message) | Self::Unauthorized(message) => {
                message.clone()
            }
            Self::Http(_) | Self::Decode { .. } => {
                "Something went wrong. Please try again.".to_owned()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_mapping() {
        let err = ApiError::from_status(reqwest::StatusCode::NOT_FOUND, "no such order".into());
        assert!(matches!(err, ApiError::NotFound(_)));

        let err = ApiError::from_status(reqwest::StatusCode::UNAUTHORIZED, "expired".into());
        assert!(matches!(err, ApiError::Unauthorized(_)));

        let err = ApiError::from_status(reqwest::StatusCode::FORBIDDEN, "admins only".into());
        assert!(matches!(err, ApiError::Unauthorized(_)));

        let err = ApiError::from_status(reqwest::StatusCode::CONFLICT, "already paid".into());
        assert!(matches!(err, ApiError::Status { status: 409, .. }));
    }

    #[test]
    fn test_status_accessor() {
        let err = ApiError::Status {
            status: 422,
            message: "invalid coupon".into(),
        };
        assert_eq!(err.status(), Some(422));
        assert_eq!(ApiError::NotFound("x".into()).status(), Some(404));
    }

    #[test]
    fn test_user_message_passthrough_and_fallback() {
        let err = ApiError::Status {
            status: 409,
            message: "Order is already paid".into(),
        };
        assert_eq!(err.user_message(), "Order is already paid");

        let decode = ApiError::Decode {
            endpoint: "/orders".into(),
            source: serde_json::from_str::<u32>("not json").unwrap_err(),
        };
        assert_eq!(decode.user_message(), "Something went wrong. Please try again.");
    }

    #[test]
    fn test_display() {
        let err = ApiError::Status {
            status: 422,
            message: "invalid coupon".into(),
        };
        assert_eq!(err.to_string(), "API error (422): invalid coupon");
    }
}
