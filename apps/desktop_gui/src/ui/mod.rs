//! UI layer for desktop GUI: the single upload window.

pub mod app;

pub use app::DesktopGuiApp;
