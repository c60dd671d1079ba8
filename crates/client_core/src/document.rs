use std::path::Path;

use shared::{
    domain::{validate_document_name, SelectedDocument},
    error::UploadError,
};
use tracing::debug;

pub fn document_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Validates the file name, then reads the bytes. Nothing is read for a
/// rejected name.
pub async fn load_document(path: &Path) -> Result<SelectedDocument, UploadError> {
    let filename = document_name(path);
    validate_document_name(&filename)?;

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|err| UploadError::Unreadable {
            filename: filename.clone(),
            reason: err.to_string(),
        })?;
    debug!(path = %path.display(), size = bytes.len(), "document loaded");

    Ok(SelectedDocument::new(filename, bytes))
}

#[cfg(test)]
mod tests {
    use std::{
        env, fs,
        time::{SystemTime, UNIX_EPOCH},
    };

    use shared::error::ErrorCategory;

    use super::*;

    fn temp_dir(label: &str) -> std::path::PathBuf {
        let suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        let dir = env::temp_dir().join(format!("neurophrase_{label}_{suffix}"));
        fs::create_dir_all(&dir).expect("temp dir");
        dir
    }

    #[tokio::test]
    async fn loads_docx_bytes_under_file_name() {
        let dir = temp_dir("load");
        let path = dir.join("essay.docx");
        fs::write(&path, b"PK\x03\x04docx").expect("write");

        let document = load_document(&path).await.expect("load");
        assert_eq!(document.name(), "essay.docx");
        assert_eq!(document.bytes(), b"PK\x03\x04docx");

        fs::remove_dir_all(dir).expect("cleanup");
    }

    #[tokio::test]
    async fn rejects_wrong_extension_without_touching_disk() {
        let err = load_document(Path::new("/definitely/missing/notes.pdf"))
            .await
            .expect_err("must reject");
        assert!(matches!(err, UploadError::InvalidExtension { ref filename } if filename == "notes.pdf"));
    }

    #[tokio::test]
    async fn missing_docx_is_reported_as_unreadable() {
        let dir = temp_dir("missing");
        let err = load_document(&dir.join("gone.docx"))
            .await
            .expect_err("must fail");
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(err.to_string().starts_with("Could not read gone.docx"));

        fs::remove_dir_all(dir).expect("cleanup");
    }
}
