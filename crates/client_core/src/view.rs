//! What the upload screen shows for a given session.
//!
//! Front ends render from [`SessionView`] and never inspect [`Session`]
//! directly, so the visibility rules live in one place.

use shared::domain::{human_readable_bytes, UploadStatus};

use crate::session::Session;

pub const APP_TITLE: &str = "NeuroPhrase";
pub const APP_TAGLINE: &str = "AI-Powered Document Humanizer";
pub const DROP_ZONE_PROMPT: &str = "Click to upload or drag & drop";
pub const DROP_ZONE_HINT: &str = ".DOCX files only";
pub const SUCCESS_TITLE: &str = "Ready for Download!";
pub const SUCCESS_BODY: &str = "Your document has been paraphrased successfully.";
pub const DOWNLOAD_LABEL: &str = "Download Result";
pub const PROCESS_ANOTHER_LABEL: &str = "Process another file";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCard {
    pub name: String,
    pub size_label: String,
    pub can_clear: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimaryAction {
    pub label: &'static str,
    pub enabled: bool,
    pub busy: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuccessPanel {
    pub download_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView {
    pub status: UploadStatus,
    pub show_drop_zone: bool,
    pub file_card: Option<FileCard>,
    pub primary_action: Option<PrimaryAction>,
    pub success: Option<SuccessPanel>,
    pub error_banner: Option<String>,
}

impl SessionView {
    pub fn from_session(session: &Session) -> Self {
        let status = session.status();
        let in_flight = status.is_in_flight();
        let document = session.document();

        let file_card = document
            .filter(|_| status != UploadStatus::Success)
            .map(|document| FileCard {
                name: document.name().to_string(),
                size_label: human_readable_bytes(document.size()),
                can_clear: !in_flight,
            });

        let primary_action = file_card.as_ref().map(|_| PrimaryAction {
            label: primary_label(status),
            enabled: !in_flight,
            busy: in_flight,
        });

        Self {
            status,
            show_drop_zone: document.is_none(),
            file_card,
            primary_action,
            success: session.download_url().map(|url| SuccessPanel {
                download_url: url.to_string(),
            }),
            error_banner: session.error_detail(),
        }
    }
}

pub fn primary_label(status: UploadStatus) -> &'static str {
    match status {
        UploadStatus::Idle => "Humanize Document",
        UploadStatus::Uploading => "Uploading...",
        UploadStatus::Processing => "Humanizing Text...",
        UploadStatus::Error => "Retry Upload",
        UploadStatus::Success => DOWNLOAD_LABEL,
    }
}
