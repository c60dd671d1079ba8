use std::fmt;

use crate::error::UploadError;

/// Literal suffix a candidate file name must carry. Matching is case-sensitive.
pub const DOCX_EXTENSION: &str = ".docx";

/// Content type sent with the multipart `file` part.
pub const DOCX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

pub fn is_docx_name(filename: &str) -> bool {
    filename.ends_with(DOCX_EXTENSION)
}

/// Checks a candidate name before any bytes are read.
pub fn validate_document_name(filename: &str) -> Result<(), UploadError> {
    if is_docx_name(filename) {
        Ok(())
    } else {
        Err(UploadError::InvalidExtension {
            filename: filename.to_string(),
        })
    }
}

/// A file chosen for submission. Owned by the session once accepted.
#[derive(Clone, PartialEq, Eq)]
pub struct SelectedDocument {
    name: String,
    bytes: Vec<u8>,
}

impl SelectedDocument {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

// File contents are deliberately left out of debug output.
impl fmt::Debug for SelectedDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedDocument")
            .field("name", &self.name)
            .field("size", &self.bytes.len())
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStatus {
    Idle,
    Uploading,
    Processing,
    Success,
    Error,
}

impl UploadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UploadStatus::Idle => "idle",
            UploadStatus::Uploading => "uploading",
            UploadStatus::Processing => "processing",
            UploadStatus::Success => "success",
            UploadStatus::Error => "error",
        }
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(self, UploadStatus::Uploading | UploadStatus::Processing)
    }
}

impl fmt::Display for UploadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn human_readable_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes < KB {
        return format!("{bytes} B");
    }
    if bytes < MB {
        return format_scaled_unit(bytes, KB, "KB");
    }
    if bytes < GB {
        return format_scaled_unit(bytes, MB, "MB");
    }
    format_scaled_unit(bytes, GB, "GB")
}

fn format_scaled_unit(bytes: u64, unit_size: u64, unit_label: &str) -> String {
    let value = bytes as f64 / unit_size as f64;
    let value_text = format!("{value:.1}");
    let compact_value = value_text.strip_suffix(".0").unwrap_or(&value_text);
    format!("{compact_value} {unit_label}")
}
