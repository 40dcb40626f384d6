use std::io;
use thiserror::Error;
use wlanscope_scan::ScanError;

/// The terminal could not be written. Always fatal.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("terminal write failed: {0}")]
    Io(#[from] io::Error),
}

/// Conditions that end the dashboard loop.
///
/// Per-adapter scan failures never show up here; they are rendered in place.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("cannot enumerate wireless adapters: {0}")]
    Enumerate(#[source] ScanError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("keyboard input failed: {0}")]
    Input(#[source] io::Error),
}
