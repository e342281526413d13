//! Error type for the dice tray

use thiserror::Error;

/// Errors surfaced by configuration and caller-facing entry points.
///
/// The per-frame path never returns these; it logs and degrades instead.
#[derive(Debug, Error)]
pub enum TrayError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unknown die kind: {0}. Valid: d4, d6, d8, d10, d12, d20, d100")]
    UnknownDieKind(String),
    #[error("Invalid viewport {width}x{height}")]
    InvalidViewport { width: f32, height: f32 },
}
