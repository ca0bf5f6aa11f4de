//! Backend renderer.
//!
//! [`Renderer`] implements the video capabilities on top of any [`Canvas`]
//! (the backend drawing context). It owns:
//! - the active mask
//! - a [`TextureCache`] mapping raster buffers to backend textures
//!
//! Convention:
//! - callers speak float output pixels and `paint::Color`
//! - canvases only ever see rounded integer pixels and `paint::DeviceColor`

mod canvas;
mod config;
mod renderer;
mod texture_cache;

#[cfg(test)]
pub(crate) mod testing;

pub use canvas::{Canvas, PixelPoint};
pub use config::RendererConfig;
pub use renderer::Renderer;
pub use texture_cache::TextureCache;
