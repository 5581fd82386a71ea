//! Error types for webclip.
//!
//! This module defines the document-level errors returned by capture
//! operations and by the messaging boundary. Per-stylesheet fetch failures
//! live in [`crate::styles::FetchError`] and never surface here unless a
//! caller fetches directly.

/// Error type for clip operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The chosen element was removed from the document before capture ran.
    #[error("Selected element is no longer available.")]
    SelectionDetached,

    /// The chosen element serialized to blank markup.
    #[error("Unable to capture the selected element - element is empty.")]
    EmptySelection,

    /// An incoming message did not match any known command shape.
    #[error("Invalid message: {0}")]
    InvalidMessage(String),

    /// A network resource could not be retrieved.
    #[error("Failed to fetch {url}: {message}")]
    Fetch {
        /// Absolute URL that was requested.
        url: String,
        /// Human-readable failure reason.
        message: String,
    },

    /// Metadata or payload serialization failed.
    #[error("Serialization failed: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result type alias for clip operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_user_facing() {
        assert_eq!(
            Error::SelectionDetached.to_string(),
            "Selected element is no longer available."
        );
        assert_eq!(
            Error::EmptySelection.to_string(),
            "Unable to capture the selected element - element is empty."
        );
    }

    #[test]
    fn fetch_error_names_url() {
        let err = Error::Fetch {
            url: "https://example.com/a.css".to_string(),
            message: "status 404".to_string(),
        };
        assert!(err.to_string().contains("https://example.com/a.css"));
        assert!(err.to_string().contains("404"));
    }
}
