use serde::{Deserialize, Serialize};

/// `status` value the service uses to signal failure.
pub const STATUS_ERROR: &str = "error";

/// Body returned by `POST /upload`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UploadResponse {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
}

impl UploadResponse {
    /// Any status other than `"error"` counts as success.
    pub fn reports_error(&self) -> bool {
        self.status == STATUS_ERROR
    }

    pub fn download_path(&self) -> Option<&str> {
        self.download_url
            .as_deref()
            .map(str::trim)
            .filter(|path| !path.is_empty())
    }
}
