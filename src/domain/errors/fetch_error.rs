//! Image fetch error types.

use thiserror::Error;

/// Failure of a single image fetch attempt.
///
/// Every variant is terminal for that attempt: the cache never retries and
/// never stores a failure, so the next `get` for the same key starts fresh.
/// The type is `Clone` so one in-flight result can be handed to every caller
/// waiting on the same key.
#[derive(Debug, Clone, Error)]
#[allow(missing_docs)]
pub enum FetchError {
    #[error("image request or resource timed out")]
    NetworkTimeout,

    #[error("no network path available")]
    NotConnected,

    #[error("invalid response from image host: status {status}")]
    InvalidResponse { status: u16 },

    #[error("response body is not a decodable image: {reason}")]
    DecodeFailure { reason: String },

    #[error("image fetch failed: {message}")]
    Unknown { message: String },
}

impl FetchError {
    /// Creates a timeout error.
    #[must_use]
    pub const fn timeout() -> Self {
        Self::NetworkTimeout
    }

    /// Creates a no-connectivity error.
    #[must_use]
    pub const fn not_connected() -> Self {
        Self::NotConnected
    }

    /// Creates an invalid-response error from an HTTP status code.
    #[must_use]
    pub const fn invalid_response(status: u16) -> Self {
        Self::InvalidResponse { status }
    }

    /// Creates a decode failure.
    #[must_use]
    pub fn decode(reason: impl Into<String>) -> Self {
        Self::DecodeFailure {
            reason: reason.into(),
        }
    }

    /// Creates an unknown transport error, preserving the cause for
    /// diagnostics.
    #[must_use]
    pub fn unknown(message: impl Into<String>) -> Self {
        Self::Unknown {
            message: message.into(),
        }
    }

    /// Returns whether the failure happened before a body was decoded.
    #[must_use]
    pub const fn is_transport_error(&self) -> bool {
        matches!(
            self,
            Self::NetworkTimeout | Self::NotConnected | Self::InvalidResponse { .. }
        )
    }

    /// Returns whether the body arrived but was not a decodable image.
    #[must_use]
    pub const fn is_decode_failure(&self) -> bool {
        matches!(self, Self::DecodeFailure { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(FetchError::timeout(), true; "timeout is transport")]
    #[test_case(FetchError::not_connected(), true; "not connected is transport")]
    #[test_case(FetchError::invalid_response(404), true; "status is transport")]
    #[test_case(FetchError::decode("not an image"), false; "decode is not transport")]
    #[test_case(FetchError::unknown("boom"), false; "unknown is not transport")]
    fn test_is_transport_error(error: FetchError, expected: bool) {
        assert_eq!(error.is_transport_error(), expected);
    }

    #[test]
    fn test_invalid_response_carries_status() {
        let error = FetchError::invalid_response(404);
        assert_eq!(error.to_string(), "invalid response from image host: status 404");
    }
}
