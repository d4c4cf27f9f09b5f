//! Errors surfaced by the renderer.

use std::path::PathBuf;

use thiserror::Error;

/// Failures the rendering core reports to its caller.
///
/// Misses and depth exhaustion are not errors; they resolve to the
/// background color inside the shading code.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The image encoder rejected the buffer or could not write the file.
    #[error("failed to encode image to {}: {source}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// A render setting is out of range.
    #[error("invalid render configuration: {0}")]
    InvalidConfig(String),
}
