//! Lumen Photos - Error Types

use thiserror::Error;

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Client error types
#[derive(Error, Debug)]
pub enum ClientError {
    // ═══════════════════════════════════════════════════════════════
    // ENVIRONMENT / SESSION ERRORS
    // ═══════════════════════════════════════════════════════════════

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("The environment is not public")]
    EnvNotPublic,

    #[error("No stored session - run connect first")]
    NoSession,

    // ═══════════════════════════════════════════════════════════════
    // TRANSPORT ERRORS
    // ═══════════════════════════════════════════════════════════════

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    // ═══════════════════════════════════════════════════════════════
    // GALLERY MAPPING ERRORS
    // ═══════════════════════════════════════════════════════════════

    #[error("Unsupported media type '{0}'")]
    UnsupportedMediaType(String),

    #[error("Malformed media record: {0}")]
    MalformedRecord(String),

    #[error("Invalid page cursor '{0}'")]
    InvalidCursor(String),

    // ═══════════════════════════════════════════════════════════════
    // IMAGE ERRORS
    // ═══════════════════════════════════════════════════════════════

    #[error("Image processing error: {0}")]
    ImageError(String),

    // ═══════════════════════════════════════════════════════════════
    // PERSISTENCE ERRORS
    // ═══════════════════════════════════════════════════════════════

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl ClientError {
    /// Check if this error means the stored credentials are no longer good
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            ClientError::InvalidCredentials | ClientError::Api { status: 401, .. }
        )
    }

    /// Check if this error came from the transport layer
    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Network(_) | ClientError::Api { .. })
    }

    /// Check if a single gallery record caused this error
    pub fn is_record_error(&self) -> bool {
        matches!(
            self,
            ClientError::UnsupportedMediaType(_) | ClientError::MalformedRecord(_)
        )
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::SerializationError(e.to_string())
    }
}

impl From<image::ImageError> for ClientError {
    fn from(e: image::ImageError) -> Self {
        ClientError::ImageError(e.to_string())
    }
}
