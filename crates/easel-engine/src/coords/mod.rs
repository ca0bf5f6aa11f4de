//! Geometry types shared by the output traits and the renderer.
//!
//! Canonical space:
//! - Output pixels, origin top-left
//! - +X right, +Y down
//!
//! Float geometry (`Vec2`, `Rect`) is what callers pass in. Backends only ever
//! see integer pixels, produced by [`round_px`].

mod pixel;
mod rect;
mod vec2;

pub use pixel::{round_px, PixelRect};
pub use rect::Rect;
pub use vec2::Vec2;
