use directus_client::DirectusError;
use thiserror::Error;

/// Errors that can occur while inspecting a collection
///
/// Transport, HTTP status and decoding failures are all reported the same
/// way on the console, so they share one kind carrying the rendered message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InspectorError {
    #[error("{message}")]
    InspectionFailed { message: String },
}

impl InspectorError {
    /// Create a new inspection failure
    pub fn inspection_failed<S: Into<String>>(message: S) -> Self {
        Self::InspectionFailed {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::InspectionFailed { message } => message,
        }
    }
}

impl From<DirectusError> for InspectorError {
    fn from(err: DirectusError) -> Self {
        Self::inspection_failed(err.to_string())
    }
}

impl From<reqwest::Error> for InspectorError {
    fn from(err: reqwest::Error) -> Self {
        Self::inspection_failed(err.to_string())
    }
}

impl From<serde_json::Error> for InspectorError {
    fn from(err: serde_json::Error) -> Self {
        Self::inspection_failed(err.to_string())
    }
}

/// Type alias for Results using InspectorError
pub type Result<T> = std::result::Result<T, InspectorError>;
