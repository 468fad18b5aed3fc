//! Error types for storyshelf

use thiserror::Error;

/// Result type alias for storyshelf operations
pub type RestResult<T> = Result<T, RestError>;

/// Error types for remote table operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RestError {
    /// Non-2xx response from the REST endpoint
    #[error("REST error: {status} - {body}")]
    Status { status: u16, body: String },

    /// Success response whose body is not valid JSON
    #[error("Parse error: {0}")]
    Parse(String),

    /// Single-row access on an empty result
    #[error("No data returned")]
    NoRows,

    /// Network failure or unusable endpoint URL
    #[error("Transport error: {0}")]
    Transport(String),

    /// Request did not complete within the configured timeout
    #[error("Request timeout after {0:?}")]
    Timeout(std::time::Duration),

    /// The query descriptor was built inconsistently
    #[error("Validation error: {0}")]
    Validation(String),

    /// Response data does not match the expected record shape
    #[error("Decode error: {0}")]
    Decode(String),

    /// Admin secret did not match
    #[error("Unauthorized")]
    Unauthorized,
}

impl RestError {
    /// Create a status error from a response.
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// HTTP status carried by this error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check if this is the single-row "no data" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NoRows)
    }

    /// Check if this is a timeout error
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }

    /// Check if the server reported a conflict (e.g. duplicate slug)
    pub fn is_conflict(&self) -> bool {
        self.status_code() == Some(409)
    }
}

impl From<serde_json::Error> for RestError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

impl From<reqwest::Error> for RestError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

impl From<url::ParseError> for RestError {
    fn from(err: url::ParseError) -> Self {
        Self::Transport(format!("invalid endpoint url: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_message_carries_code_and_body() {
        let err = RestError::status(409, "conflict");
        let msg = err.to_string();
        assert!(msg.contains("409"));
        assert!(msg.contains("conflict"));
        assert!(err.is_conflict());
        assert_eq!(err.status_code(), Some(409));
    }

    #[test]
    fn no_rows_is_not_found() {
        assert!(RestError::NoRows.is_not_found());
        assert_eq!(RestError::NoRows.to_string(), "No data returned");
        assert_eq!(RestError::NoRows.status_code(), None);
    }
}
