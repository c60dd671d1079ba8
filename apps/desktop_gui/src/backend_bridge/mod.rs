//! Worker side of the GUI: owns the tokio runtime and the HTTP client.

pub mod commands;
pub mod runtime;
