//! Applies backend events to the UI-owned session.

use client_core::Session;
use shared::error::UploadError;

use crate::controller::events::UiEvent;

#[derive(Debug, Default)]
pub struct UiState {
    pub session: Session,
    pub status: String,
    /// Name of a file the worker is currently reading.
    pub loading_document: Option<String>,
    pub backend_available: bool,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            backend_available: true,
            ..Self::default()
        }
    }

    /// A pick may replace the selection unless a read is still pending.
    pub fn accepts_selection(&self) -> bool {
        self.session.accepts_selection() && self.loading_document.is_none()
    }

    /// Drops additionally need the drop zone to be showing.
    pub fn accepts_drop(&self) -> bool {
        self.accepts_selection() && self.session.document().is_none()
    }
}

pub fn reduce(state: &mut UiState, event: UiEvent) {
    tracing::debug!(event = event.name(), status = %state.session.status(), "applying ui event");
    match event {
        UiEvent::Info(message) => {
            state.status = message;
        }
        UiEvent::BackendUnavailable(message) => {
            state.backend_available = false;
            state.loading_document = None;
            if state.session.is_in_flight() {
                state
                    .session
                    .complete_submission(Err(UploadError::transport(message.clone())));
            }
            state.status = message;
        }
        UiEvent::DocumentLoaded(document) => {
            state.loading_document = None;
            state.session.select_document(document);
        }
        UiEvent::DocumentRejected(error) => {
            state.loading_document = None;
            state.session.reject_selection(error);
        }
        UiEvent::TransferStarted => {
            state.session.mark_transfer_started();
        }
        UiEvent::UploadFinished(result) => {
            state.session.complete_submission(result);
        }
    }
}
