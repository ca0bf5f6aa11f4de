//! Output capabilities.
//!
//! Each trait is a self-contained capability a backend may offer. A full
//! [`Output`] is simply the union of all of them; a test double or a
//! headless backend implements only the traits it needs.
//!
//! Conventions shared by every implementation:
//! - coordinates are output pixels, rounded with [`round_px`](crate::coords::round_px)
//! - `thickness == 0.0` means "fill", not "zero-width stroke"
//! - every color is multiplied by the active mask before use

mod composed;

pub use composed::ComposedOutput;

use crate::coords::{Rect, Vec2};
use crate::error::RenderResult;
use crate::paint::Color;
use crate::picture::Picture;

/// Window presentation control.
pub trait WindowOutput {
    /// Switches to fullscreen if `fullscreen`, otherwise back to windowed.
    fn set_fullscreen(&mut self, fullscreen: bool);

    /// Changes the window size (or resolution, when fullscreen).
    fn resize(&mut self, width: u32, height: u32);

    fn set_title(&mut self, title: &str);

    /// Drawable area in output pixels, origin at zero.
    fn output_rect(&self) -> Rect;
}

/// Geometric primitives.
pub trait PrimitiveVideoOutput {
    /// Plots a single pixel.
    fn draw_point(&mut self, point: Vec2, color: Color);

    /// Strokes the segment `a → b`.
    fn draw_line(&mut self, a: Vec2, b: Vec2, thickness: f32, color: Color);

    /// Draws a closed polygon. Filled when `thickness == 0.0`, otherwise stroked
    /// with rounded joints. A single point with non-zero thickness is a disk.
    fn draw_polygon(&mut self, points: &[Vec2], thickness: f32, color: Color);

    /// Draws a rectangle: filled (`0`), one-pixel outline (`1`) or stroked.
    fn draw_rect(&mut self, rect: Rect, thickness: f32, color: Color);
}

/// Bitmap drawing.
pub trait PictureVideoOutput {
    /// Stretches `picture` to exactly fill `dest` (non-uniform scale allowed),
    /// rotated about the center of `dest` by the picture's angle.
    ///
    /// An error means nothing was drawn and the frame is incomplete. Drawing a
    /// picture from inside an update of its own buffer is one such error.
    fn draw_picture(&mut self, dest: Rect, picture: &Picture) -> RenderResult<()>;
}

/// Everything needed to draw a frame.
pub trait VideoOutput: PrimitiveVideoOutput + PictureVideoOutput {
    /// Fills the whole output with one (masked) color.
    fn clear(&mut self, color: Color);

    /// Replaces the mask multiplied into every subsequent draw call.
    fn set_mask(&mut self, mask: Color);

    fn mask(&self) -> Color;
}

/// Sound and music. Reserved; no operations yet.
pub trait AudioOutput {}

/// Window, video and audio output combined.
pub trait Output: WindowOutput + VideoOutput + AudioOutput {}

impl<T> Output for T where T: WindowOutput + VideoOutput + AudioOutput {}
