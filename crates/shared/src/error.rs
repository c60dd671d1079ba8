use thiserror::Error;

pub const INVALID_EXTENSION_MESSAGE: &str = "Please select a .docx file.";
pub const SERVICE_FAILURE_FALLBACK: &str = "Failed to process file";
pub const CONNECTION_FAILURE_MESSAGE: &str = "An error occurred connecting to the server.";
pub const MISSING_DOWNLOAD_LINK_MESSAGE: &str = "The service did not return a download link.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Detected locally before any network call.
    Validation,
    /// The service answered and reported a failure.
    Service,
    /// The request could not be completed or the reply was unusable.
    Transport,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("Please select a .docx file.")]
    InvalidExtension { filename: String },
    #[error("Could not read {filename}: {reason}")]
    Unreadable { filename: String, reason: String },
    #[error("{message}")]
    Service {
        http_status: Option<u16>,
        message: String,
    },
    #[error("An error occurred connecting to the server.")]
    Transport { detail: String },
}

impl UploadError {
    /// Builds a service error, falling back to a generic message when the
    /// service supplied none.
    pub fn service(http_status: Option<u16>, message: Option<&str>) -> Self {
        let message = message
            .map(str::trim)
            .filter(|message| !message.is_empty())
            .unwrap_or(SERVICE_FAILURE_FALLBACK);
        Self::Service {
            http_status,
            message: message.to_string(),
        }
    }

    pub fn transport(detail: impl Into<String>) -> Self {
        Self::Transport {
            detail: detail.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            UploadError::InvalidExtension { .. } | UploadError::Unreadable { .. } => {
                ErrorCategory::Validation
            }
            UploadError::Service { .. } => ErrorCategory::Service,
            UploadError::Transport { .. } => ErrorCategory::Transport,
        }
    }
}
