use thiserror::Error;

use crate::config::ConfigError;
use crate::export::ExportError;

/// Errors that abort startup or surface to the user
#[derive(Debug, Error)]
pub enum SketchError {
    /// The drawing surface could not be created. Fatal, there is no degraded mode.
    #[error("Drawing surface unavailable for a {width}x{height} canvas")]
    SurfaceUnavailable { width: u32, height: u32 },

    /// None of the bundled fonts could be parsed for glyph rendering
    #[error("No usable glyph font found in the bundled font set")]
    FontUnavailable,

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Export failed: {0}")]
    Export(#[from] ExportError),
}

/// Result type for fallible sketchpad operations
pub type SketchResult<T> = Result<T, SketchError>;
