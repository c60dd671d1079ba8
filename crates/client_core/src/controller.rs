use shared::{domain::SelectedDocument, error::UploadError};
use tracing::info;

use crate::{
    session::{SelectionOutcome, Session, SubmitRejection},
    transport::TransformService,
};

/// Drives a [`Session`] against a [`TransformService`] for callers that can
/// await the whole submission in place (CLI, tests). The GUI applies the
/// same session transitions from its event loop instead.
pub struct UploadController<S: TransformService> {
    service: S,
    session: Session,
}

impl<S: TransformService> UploadController<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            session: Session::default(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn select_document(&mut self, candidate: SelectedDocument) -> SelectionOutcome {
        self.session.select_document(candidate)
    }

    pub fn reject_selection(&mut self, error: UploadError) -> SelectionOutcome {
        self.session.reject_selection(error)
    }

    /// Runs one submission attempt to completion. Rejected submissions leave
    /// the session untouched and never reach the service.
    pub async fn submit(&mut self) -> Result<&Session, SubmitRejection> {
        let document = self.session.begin_submission()?;
        self.session.mark_transfer_started();

        let result = self.service.upload(&document).await;
        self.session.complete_submission(result);
        info!(status = %self.session.status(), "submission finished");
        Ok(&self.session)
    }

    pub fn clear(&mut self) -> bool {
        self.session.clear()
    }

    pub fn process_another(&mut self) -> bool {
        self.session.process_another()
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
