//! Recipe API error types.

use thiserror::Error;

/// Failure in the recipe fetch/decode pipeline.
#[derive(Debug, Clone, Error)]
#[allow(missing_docs)]
pub enum ApiError {
    #[error("the endpoint URL is invalid: {url}")]
    InvalidUrl { url: String },

    #[error("recipe request timed out")]
    Timeout,

    #[error("no network path available")]
    NotConnected,

    #[error("the server returned an invalid response: status {status}")]
    InvalidResponse { status: u16 },

    #[error("the data received was invalid: {reason}")]
    InvalidData { reason: String },

    #[error("error decoding the recipe data: {reason}")]
    Decoding { reason: String },

    #[error("unknown recipe API error: {message}")]
    Unknown { message: String },
}

impl ApiError {
    /// Creates an invalid-URL error.
    #[must_use]
    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl { url: url.into() }
    }

    /// Creates an invalid-response error from an HTTP status code.
    #[must_use]
    pub const fn invalid_response(status: u16) -> Self {
        Self::InvalidResponse { status }
    }

    /// Creates an invalid-data error.
    #[must_use]
    pub fn invalid_data(reason: impl Into<String>) -> Self {
        Self::InvalidData {
            reason: reason.into(),
        }
    }

    /// Creates a decoding error.
    #[must_use]
    pub fn decoding(reason: impl Into<String>) -> Self {
        Self::Decoding {
            reason: reason.into(),
        }
    }

    /// Creates an unknown error, preserving the cause for diagnostics.
    #[must_use]
    pub fn unknown(message: impl Into<String>) -> Self {
        Self::Unknown {
            message: message.into(),
        }
    }

    /// Returns whether the failure is network related and may succeed on a
    /// fresh attempt.
    #[must_use]
    pub const fn is_network_error(&self) -> bool {
        matches!(
            self,
            Self::Timeout | Self::NotConnected | Self::InvalidResponse { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_predicate() {
        assert!(ApiError::Timeout.is_network_error());
        assert!(ApiError::NotConnected.is_network_error());
        assert!(ApiError::invalid_response(503).is_network_error());
        assert!(!ApiError::decoding("bad json").is_network_error());
        assert!(!ApiError::invalid_data("empty list").is_network_error());
    }
}
