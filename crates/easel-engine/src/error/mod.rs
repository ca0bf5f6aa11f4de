//! Error types.
//!
//! Two failure paths exist: decoding a picture (`DecodeError`) and drawing a
//! picture or allocating a surface (`RenderError`). Geometry calls are total
//! and never fail; colors are clamped instead of rejected.

use std::path::PathBuf;

use crate::coords::PixelRect;
use crate::picture::BufferId;

/// Returned by picture loading when the source cannot be decoded.
#[derive(Debug, thiserror::Error)]
#[error("failed to load picture: {}", .path.display())]
pub struct DecodeError {
    pub path: PathBuf,
    #[source]
    pub source: image::ImageError,
}

impl DecodeError {
    pub(crate) fn new(path: impl Into<PathBuf>, source: image::ImageError) -> Self {
        Self { path: path.into(), source }
    }
}

/// Backend failure to materialize a texture from a raster buffer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TextureError {
    #[error("source buffer is empty ({width}x{height})")]
    EmptySource { width: u32, height: u32 },

    #[error("source buffer {width}x{height} exceeds the backend limit of {limit}")]
    TooLarge { width: u32, height: u32, limit: u32 },

    #[error("backend error: {0}")]
    Backend(String),
}

/// Failure of a draw or buffer operation.
///
/// A draw call returning this error was aborted: nothing of it reached the
/// backend, and the caller should treat the frame as incomplete.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("failed to create texture for buffer {buffer:?}: {source}")]
    TextureCreation {
        buffer: BufferId,
        #[source]
        source: TextureError,
    },

    #[error("picture view {view:?} is outside its {width}x{height} buffer")]
    ViewOutOfBounds { view: PixelRect, width: u32, height: u32 },

    #[error("buffer {0:?} is static and cannot be modified")]
    StaticBuffer(BufferId),

    #[error("buffer {0:?} is being updated")]
    BufferBusy(BufferId),

    #[error("cannot allocate a {width}x{height} framebuffer")]
    InvalidSurface { width: u32, height: u32 },
}

pub type RenderResult<T> = Result<T, RenderError>;
