//! Error types for the trip planner.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our custom error.
pub type Result<T> = std::result::Result<T, NavigatorError>;

/// Errors that can occur while planning a trip.
#[derive(Error, Debug)]
pub enum NavigatorError {
    /// Error reading or writing files.
    #[error("I/O error for path '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file or value error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The LLM completion call failed or returned a non-success status.
    #[error("LLM completion failed: {0}")]
    Completion(String),

    /// The completion text is not valid JSON.
    #[error("LLM response is not valid JSON: {0}")]
    LlmParse(String),

    /// The completion text is valid JSON but not a list of points of interest.
    #[error("LLM response has unexpected shape: {0}")]
    LlmShape(String),

    /// The places lookup service could not be reached or answered with an HTTP error.
    #[error("Places API error: {0}")]
    PlacesApi(String),

    /// Neither the primary nor the fallback lookup produced a usable place.
    #[error("Could not resolve '{title}' in '{general_location}' (last lookup status: {status})")]
    Resolution {
        title: String,
        general_location: String,
        status: String,
    },

    /// The submitted trip form is missing fields or malformed.
    #[error("Invalid trip form: {0}")]
    Form(String),

    /// The web server could not bind or stopped with an error.
    #[error("Server error on '{address}': {source}")]
    Server {
        address: String,
        #[source]
        source: std::io::Error,
    },

    /// The completion hit the token limit before the JSON was complete.
    #[error("LLM response was cut off after {max_tokens} tokens: {reason}")]
    LlmTruncated { max_tokens: u32, reason: String },

    /// HTTP request error.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Page template rendering error.
    #[error("Failed to render page: {0}")]
    Render(String),
}

impl NavigatorError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// True for every kind of unusable LLM output.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            Self::LlmParse(_) | Self::LlmShape(_) | Self::LlmTruncated { .. }
        )
    }
}

impl From<reqwest::Error> for NavigatorError {
    fn from(err: reqwest::Error) -> Self {
        NavigatorError::Http(err.to_string())
    }
}

impl From<serde_json::Error> for NavigatorError {
    fn from(err: serde_json::Error) -> Self {
        NavigatorError::LlmParse(err.to_string())
    }
}

impl From<askama::Error> for NavigatorError {
    fn from(err: askama::Error) -> Self {
        NavigatorError::Render(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_grouping() {
        assert!(NavigatorError::LlmParse("eof".into()).is_parse_error());
        assert!(NavigatorError::LlmShape("object".into()).is_parse_error());
        assert!(
            NavigatorError::LlmTruncated {
                max_tokens: 1024,
                reason: "eof".into()
            }
            .is_parse_error()
        );
        assert!(!NavigatorError::Completion("500".into()).is_parse_error());
    }

    #[test]
    fn test_serde_json_error_maps_to_parse() {
        let err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: NavigatorError = err.into();
        assert!(matches!(err, NavigatorError::LlmParse(_)));
    }

    #[test]
    fn test_resolution_message_names_candidate() {
        let err = NavigatorError::Resolution {
            title: "Louvre".into(),
            general_location: "Paris, France".into(),
            status: "ZERO_RESULTS".into(),
        };
        let message = err.to_string();
        assert!(message.contains("Louvre"));
        assert!(message.contains("ZERO_RESULTS"));
    }
}
