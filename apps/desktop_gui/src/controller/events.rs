//! Events flowing back from the backend worker, and actions raised by widgets.

use client_core::UploadOutcome;
use shared::{domain::SelectedDocument, error::UploadError};

pub enum UiEvent {
    Info(String),
    BackendUnavailable(String),
    DocumentLoaded(SelectedDocument),
    DocumentRejected(UploadError),
    TransferStarted,
    UploadFinished(Result<UploadOutcome, UploadError>),
}

impl UiEvent {
    pub fn name(&self) -> &'static str {
        match self {
            UiEvent::Info(_) => "info",
            UiEvent::BackendUnavailable(_) => "backend_unavailable",
            UiEvent::DocumentLoaded(_) => "document_loaded",
            UiEvent::DocumentRejected(_) => "document_rejected",
            UiEvent::TransferStarted => "transfer_started",
            UiEvent::UploadFinished(_) => "upload_finished",
        }
    }
}

/// User intents collected while drawing a frame and applied afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    PickFile,
    Submit,
    Clear,
    Download(String),
    ProcessAnother,
}
