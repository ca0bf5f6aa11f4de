use std::path::Path;
use std::rc::Rc;

use image::RgbaImage;

use crate::coords::PixelRect;
use crate::error::DecodeError;

use super::{BufferId, Mutability, RasterBuffer};

/// A drawable view onto a shared raster buffer: sub-rect plus rotation.
///
/// Cloning and slicing are cheap and never touch pixel data.
#[derive(Debug, Clone)]
pub struct Picture {
    buffer: Rc<RasterBuffer>,
    view: PixelRect,
    angle: f32,
}

impl Picture {
    /// Decodes the image file at `path`.
    ///
    /// The buffer is tagged [`Mutability::Static`] and the view covers it fully.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DecodeError> {
        let path = path.as_ref();
        let img = image::open(path).map_err(|e| DecodeError::new(path, e))?;
        let pic = Self::from_image(img.to_rgba8(), Mutability::Static);
        log::debug!(
            "loaded picture {} as buffer {:?} ({}x{})",
            path.display(),
            pic.buffer_id(),
            pic.view.w,
            pic.view.h
        );
        Ok(pic)
    }

    /// Decodes an in-memory encoded image (PNG, JPEG, ...). Tagged static.
    pub fn load_from_memory(bytes: &[u8]) -> Result<Self, DecodeError> {
        let img = image::load_from_memory(bytes).map_err(|e| DecodeError::new("<memory>", e))?;
        Ok(Self::from_image(img.to_rgba8(), Mutability::Static))
    }

    /// Wraps already-decoded pixels in a new buffer.
    pub fn from_image(pixels: RgbaImage, mutability: Mutability) -> Self {
        let view = PixelRect::full(pixels.width(), pixels.height());
        Self {
            buffer: Rc::new(RasterBuffer::new(pixels, mutability)),
            view,
            angle: 0.0,
        }
    }

    /// Transparent dynamic picture, meant to be painted through
    /// [`RasterBuffer::update`].
    pub fn blank(width: u32, height: u32) -> Self {
        Self::from_image(RgbaImage::new(width, height), Mutability::Dynamic)
    }

    /// `(width, height)` of the view, not of the whole buffer.
    #[inline]
    pub fn size(&self) -> (u32, u32) {
        (self.view.w, self.view.h)
    }

    /// Cuts `(x, y, w, h)` out of this picture, relative to its own view.
    ///
    /// The result shares the buffer and starts unrotated. The rect is not
    /// clipped; drawing a slice that leaves the buffer fails at draw time.
    pub fn slice(&self, x: i32, y: i32, w: u32, h: u32) -> Self {
        Self {
            buffer: Rc::clone(&self.buffer),
            view: PixelRect::new(self.view.x.saturating_add(x), self.view.y.saturating_add(y), w, h),
            angle: 0.0,
        }
    }

    /// Returns the same view rotated by `angle` radians about the destination
    /// center at draw time.
    #[inline]
    pub fn rotated(&self, angle: f32) -> Self {
        Self { angle, ..self.clone() }
    }

    #[inline]
    pub fn set_angle(&mut self, angle: f32) {
        self.angle = angle;
    }

    /// Rotation in radians.
    #[inline]
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Source rect in buffer pixels.
    #[inline]
    pub fn view(&self) -> PixelRect {
        self.view
    }

    #[inline]
    pub fn buffer(&self) -> &Rc<RasterBuffer> {
        &self.buffer
    }

    #[inline]
    pub fn buffer_id(&self) -> BufferId {
        self.buffer.id()
    }

    #[inline]
    pub fn is_static(&self) -> bool {
        self.buffer.is_static()
    }

    /// Returns `true` if the view is non-empty and inside the buffer.
    pub fn view_in_bounds(&self) -> bool {
        let (w, h) = self.buffer.size();
        self.view.fits_within(w, h)
    }
}
