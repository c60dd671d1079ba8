//! HTTP seam to the Document Transform Service.

use async_trait::async_trait;
use reqwest::{multipart, Client};
use shared::{
    domain::{SelectedDocument, DOCX_MIME_TYPE},
    error::{UploadError, MISSING_DOWNLOAD_LINK_MESSAGE},
    protocol::UploadResponse,
};
use tracing::{debug, info, warn};
use url::Url;

pub const UPLOAD_PATH: &str = "/upload";
/// Name of the single multipart part carrying the document.
pub const UPLOAD_FIELD: &str = "file";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadOutcome {
    /// Absolute link the processed document can be fetched from.
    pub download_url: String,
}

#[async_trait]
pub trait TransformService: Send + Sync {
    async fn upload(&self, document: &SelectedDocument) -> Result<UploadOutcome, UploadError>;
}

pub struct HttpTransformClient {
    http: Client,
    base_url: String,
}

impl HttpTransformClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn upload_endpoint(&self) -> String {
        format!("{}{UPLOAD_PATH}", self.base_url)
    }
}

#[async_trait]
impl TransformService for HttpTransformClient {
    async fn upload(&self, document: &SelectedDocument) -> Result<UploadOutcome, UploadError> {
        let part = multipart::Part::bytes(document.bytes().to_vec())
            .file_name(document.name().to_string())
            .mime_str(DOCX_MIME_TYPE)
            .map_err(|err| UploadError::transport(format!("invalid part content type: {err}")))?;
        let form = multipart::Form::new().part(UPLOAD_FIELD, part);

        let endpoint = self.upload_endpoint();
        debug!(
            %endpoint,
            filename = document.name(),
            size = document.size(),
            "posting document"
        );

        let response = self
            .http
            .post(&endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|err| {
                warn!(%endpoint, "upload request failed: {err}");
                UploadError::transport(err.to_string())
            })?;

        let http_status = response.status().as_u16();
        let body = response.bytes().await.map_err(|err| {
            warn!(http_status, "failed to read upload response body: {err}");
            UploadError::transport(err.to_string())
        })?;
        info!(http_status, bytes = body.len(), "upload response received");

        interpret_response(&self.base_url, http_status, &body)
    }
}

/// Maps a raw service reply onto the outcome of a submission.
///
/// An HTTP-success reply is a success unless its `status` is `"error"`; an
/// undecodable body there is a transport failure. Any other HTTP status is a
/// service failure carrying the reply's `message` when one is present.
pub fn interpret_response(
    base_url: &str,
    http_status: u16,
    body: &[u8],
) -> Result<UploadOutcome, UploadError> {
    if !(200..300).contains(&http_status) {
        return Err(UploadError::service(
            Some(http_status),
            failure_message(body).as_deref(),
        ));
    }

    let response = serde_json::from_slice::<UploadResponse>(body).map_err(|err| {
        UploadError::transport(format!("malformed response body: {err}"))
    })?;

    if response.reports_error() {
        return Err(UploadError::service(
            Some(http_status),
            response.message.as_deref(),
        ));
    }

    match response.download_path() {
        Some(path) => Ok(UploadOutcome {
            download_url: resolve_download_url(base_url, path),
        }),
        None => Err(UploadError::service(
            Some(http_status),
            Some(MISSING_DOWNLOAD_LINK_MESSAGE),
        )),
    }
}

/// Pulls `message` out of a failed reply without requiring the rest of the
/// success shape.
fn failure_message(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    value.get("message")?.as_str().map(str::to_string)
}

/// Joins a server-relative path onto the base URL by concatenation, so any
/// path prefix of the base is kept. Absolute `http(s)` links pass through.
pub fn resolve_download_url(base_url: &str, download_path: &str) -> String {
    if let Ok(absolute) = Url::parse(download_path) {
        if matches!(absolute.scheme(), "http" | "https") {
            return download_path.to_string();
        }
    }

    let base = base_url.trim_end_matches('/');
    if download_path.starts_with('/') {
        format!("{base}{download_path}")
    } else {
        format!("{base}/{download_path}")
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
