//! Backend commands queued from UI to backend worker.

use shared::domain::SelectedDocument;
use std::path::PathBuf;

pub enum BackendCommand {
    /// Read a file whose name already passed validation.
    LoadDocument { path: PathBuf },
    Upload { document: SelectedDocument },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::LoadDocument { .. } => "load_document",
            BackendCommand::Upload { .. } => "upload",
        }
    }
}
