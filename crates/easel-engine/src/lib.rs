//! Easel engine crate.
//!
//! An immediate-mode drawing surface. Application code talks to the
//! capability traits in [`output`]; [`render::Renderer`] implements them over
//! any backend [`render::Canvas`], with [`raster::SoftwareCanvas`] as the
//! built-in CPU backend and [`window`] adapting real or headless windows.

pub mod coords;
pub mod error;
pub mod logging;
pub mod output;
pub mod paint;
pub mod picture;
pub mod raster;
pub mod render;
pub mod window;

pub use error::{DecodeError, RenderError, TextureError};
pub use output::{Output, VideoOutput};
pub use paint::Color;
pub use picture::Picture;
