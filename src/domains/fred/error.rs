//! Error taxonomy for FRED requests.

use thiserror::Error;

/// Result type for FRED operations.
pub type FredResult<T> = Result<T, FredError>;

/// Errors that can occur while talking to the FRED API.
///
/// Every variant is terminal for the call that produced it. The batch tools
/// isolate `Upstream` and `Transport` failures per item; a `Config` failure
/// aborts the whole call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FredError {
    /// The API key is missing or empty.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A caller-supplied parameter was rejected before any request was sent.
    #[error("Invalid parameter '{param}': {message}")]
    Validation { param: String, message: String },

    /// FRED answered with its own error payload.
    #[error("FRED API error {code}: {message}")]
    Upstream { code: i64, message: String },

    /// Network failure, timeout or an unreadable response body.
    #[error("Transport error: {0}")]
    Transport(String),
}

impl FredError {
    /// The error returned when no API key is configured.
    pub fn missing_api_key() -> Self {
        Self::Config(
            "FRED API key is not set. Set FRED_API_KEY \
             (get a free key at https://fred.stlouisfed.org/docs/api/api_key.html)"
                .to_string(),
        )
    }

    /// Create a validation error naming the offending parameter.
    pub fn validation(param: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            param: param.into(),
            message: message.into(),
        }
    }

    /// Create an upstream error.
    pub fn upstream(code: i64, message: impl Into<String>) -> Self {
        Self::Upstream {
            code,
            message: message.into(),
        }
    }

    /// Create a transport error.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_names_param() {
        let err = FredError::validation("years", "must be between 1 and 100");
        assert_eq!(
            err.to_string(),
            "Invalid parameter 'years': must be between 1 and 100"
        );
    }

    #[test]
    fn test_upstream_message_passes_through() {
        let err = FredError::upstream(400, "Bad Request. The series does not exist.");
        assert_eq!(
            err.to_string(),
            "FRED API error 400: Bad Request. The series does not exist."
        );
    }
}
