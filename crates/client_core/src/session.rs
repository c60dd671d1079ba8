//! Client-side lifecycle of one document submission.
//!
//! Each variant carries only the fields that are valid in that state, so a
//! result link outside `Success` or an error outside `Error` cannot be
//! represented. Resetting always rebuilds the default value.

use shared::{
    domain::{validate_document_name, SelectedDocument, UploadStatus},
    error::{UploadError, MISSING_DOWNLOAD_LINK_MESSAGE},
};
use tracing::{debug, info, warn};

use crate::transport::UploadOutcome;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Session {
    Idle {
        document: Option<SelectedDocument>,
    },
    Uploading {
        document: SelectedDocument,
    },
    Processing {
        document: SelectedDocument,
    },
    Success {
        document: SelectedDocument,
        download_url: String,
    },
    Error {
        document: Option<SelectedDocument>,
        error: UploadError,
    },
}

impl Default for Session {
    fn default() -> Self {
        Session::Idle { document: None }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOutcome {
    Accepted,
    Rejected,
    /// Selection is not offered in the current state.
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitRejection {
    NoDocument,
    InFlight,
    AlreadyCompleted,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> UploadStatus {
        match self {
            Session::Idle { .. } => UploadStatus::Idle,
            Session::Uploading { .. } => UploadStatus::Uploading,
            Session::Processing { .. } => UploadStatus::Processing,
            Session::Success { .. } => UploadStatus::Success,
            Session::Error { .. } => UploadStatus::Error,
        }
    }

    pub fn document(&self) -> Option<&SelectedDocument> {
        match self {
            Session::Idle { document } | Session::Error { document, .. } => document.as_ref(),
            Session::Uploading { document }
            | Session::Processing { document }
            | Session::Success { document, .. } => Some(document),
        }
    }

    pub fn download_url(&self) -> Option<&str> {
        match self {
            Session::Success { download_url, .. } => Some(download_url),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&UploadError> {
        match self {
            Session::Error { error, .. } => Some(error),
            _ => None,
        }
    }

    pub fn error_detail(&self) -> Option<String> {
        self.error().map(ToString::to_string)
    }

    pub fn is_in_flight(&self) -> bool {
        self.status().is_in_flight()
    }

    pub fn accepts_selection(&self) -> bool {
        matches!(self, Session::Idle { .. } | Session::Error { .. })
    }

    /// Offers a candidate file. Valid names replace any held document and
    /// clear a previous error; invalid names enter `Error` and leave the held
    /// document untouched.
    pub fn select_document(&mut self, candidate: SelectedDocument) -> SelectionOutcome {
        if !self.accepts_selection() {
            debug!(status = %self.status(), "ignoring file selection");
            return SelectionOutcome::Ignored;
        }

        match validate_document_name(candidate.name()) {
            Ok(()) => {
                info!(
                    filename = candidate.name(),
                    size = candidate.size(),
                    "document selected"
                );
                *self = Session::Idle {
                    document: Some(candidate),
                };
                SelectionOutcome::Accepted
            }
            Err(error) => self.reject_selection(error),
        }
    }

    /// Records a selection that failed before a document could be built
    /// (bad extension, unreadable file).
    pub fn reject_selection(&mut self, error: UploadError) -> SelectionOutcome {
        if !self.accepts_selection() {
            debug!(status = %self.status(), "ignoring rejected file selection");
            return SelectionOutcome::Ignored;
        }

        warn!(error = %error, "file selection rejected");
        let document = match std::mem::take(self) {
            Session::Idle { document } | Session::Error { document, .. } => document,
            _ => None,
        };
        *self = Session::Error { document, error };
        SelectionOutcome::Rejected
    }

    /// Moves a held document into `Uploading` and hands back a copy for the
    /// transfer. The session is left unchanged when the submission is
    /// rejected.
    pub fn begin_submission(&mut self) -> Result<SelectedDocument, SubmitRejection> {
        match std::mem::take(self) {
            Session::Idle {
                document: Some(document),
            }
            | Session::Error {
                document: Some(document),
                ..
            } => {
                info!(filename = document.name(), "submission started");
                let outbound = document.clone();
                *self = Session::Uploading { document };
                Ok(outbound)
            }
            other => {
                let rejection = match &other {
                    Session::Uploading { .. } | Session::Processing { .. } => {
                        SubmitRejection::InFlight
                    }
                    Session::Success { .. } => SubmitRejection::AlreadyCompleted,
                    _ => SubmitRejection::NoDocument,
                };
                debug!(status = %other.status(), ?rejection, "submission rejected");
                *self = other;
                Err(rejection)
            }
        }
    }

    /// `Uploading` -> `Processing`. Returns whether the transition applied.
    pub fn mark_transfer_started(&mut self) -> bool {
        match std::mem::take(self) {
            Session::Uploading { document } => {
                *self = Session::Processing { document };
                true
            }
            other => {
                *self = other;
                false
            }
        }
    }

    /// Applies the service result to an in-flight submission. Completions
    /// arriving in any other state are dropped.
    pub fn complete_submission(&mut self, result: Result<UploadOutcome, UploadError>) -> bool {
        let document = match std::mem::take(self) {
            Session::Uploading { document } | Session::Processing { document } => document,
            other => {
                warn!(status = %other.status(), "dropping completion with no submission in flight");
                *self = other;
                return false;
            }
        };

        let result = result.and_then(|outcome| {
            if outcome.download_url.trim().is_empty() {
                Err(UploadError::service(None, Some(MISSING_DOWNLOAD_LINK_MESSAGE)))
            } else {
                Ok(outcome)
            }
        });

        *self = match result {
            Ok(outcome) => {
                info!(download_url = %outcome.download_url, "document processed");
                Session::Success {
                    document,
                    download_url: outcome.download_url,
                }
            }
            Err(error) => {
                warn!(error = %error, category = ?error.category(), "submission failed");
                Session::Error {
                    document: Some(document),
                    error,
                }
            }
        };
        true
    }

    /// Drops the document, link and error. Not offered while a submission is
    /// in flight.
    pub fn clear(&mut self) -> bool {
        if self.is_in_flight() {
            debug!(status = %self.status(), "ignoring clear during submission");
            return false;
        }
        *self = Session::default();
        true
    }

    /// Starts over after a successful run.
    pub fn process_another(&mut self) -> bool {
        if !matches!(self, Session::Success { .. }) {
            debug!(status = %self.status(), "process another is only offered after success");
            return false;
        }
        *self = Session::default();
        true
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
