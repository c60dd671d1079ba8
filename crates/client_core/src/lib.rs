pub mod config;
pub mod controller;
pub mod document;
pub mod session;
pub mod transport;
pub mod view;

pub use config::{load_settings, Settings};
pub use controller::UploadController;
pub use document::load_document;
pub use session::{SelectionOutcome, Session, SubmitRejection};
pub use transport::{HttpTransformClient, TransformService, UploadOutcome};
pub use view::SessionView;
