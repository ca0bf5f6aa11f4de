//! CPU rasterizer backend.
//!
//! [`SoftwareCanvas`] renders into a tiny-skia pixmap. It is the reference
//! [`Canvas`](crate::render::Canvas): headless, deterministic, and
//! inspectable pixel by pixel.
//!
//! Sampling rules (all painting is aliased):
//! - polygons cover a pixel when its center is inside (even-odd)
//! - lines and disks are centered on pixel centers
//! - boxes are inclusive of their integer bounds
//! - everything except `clear` is source-over blended
//!
//! Geometry reaching far outside the framebuffer is clipped to a guard band
//! before rasterization.

mod canvas;
mod clip;
mod texture;

pub use canvas::{SoftwareCanvas, MAX_TEXTURE_SIDE};
pub use texture::SoftTexture;
