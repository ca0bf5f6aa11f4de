use std::cell::{Ref, RefCell};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use image::RgbaImage;

use crate::error::{RenderError, RenderResult};

static NEXT_BUFFER_ID: AtomicU64 = AtomicU64::new(1);

/// Stable identity of a raster buffer.
///
/// Assigned once at construction from a process-wide counter and never reused,
/// so it is safe as a texture-cache key even after the buffer is freed.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct BufferId(u64);

impl BufferId {
    fn next() -> Self {
        Self(NEXT_BUFFER_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[inline]
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Whether buffer contents may change after creation.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum Mutability {
    /// Contents never change; derived textures can be reused indefinitely.
    #[default]
    Static,
    /// Contents may change at any time; derived textures are rebuilt on every draw.
    Dynamic,
}

/// Decoded RGBA8 pixels for one image.
pub struct RasterBuffer {
    id: BufferId,
    mutability: Mutability,
    pixels: RefCell<RgbaImage>,
}

impl RasterBuffer {
    pub fn new(pixels: RgbaImage, mutability: Mutability) -> Self {
        Self {
            id: BufferId::next(),
            mutability,
            pixels: RefCell::new(pixels),
        }
    }

    #[inline]
    pub fn id(&self) -> BufferId {
        self.id
    }

    #[inline]
    pub fn mutability(&self) -> Mutability {
        self.mutability
    }

    #[inline]
    pub fn is_static(&self) -> bool {
        self.mutability == Mutability::Static
    }

    /// Current `(width, height)` in pixels.
    ///
    /// # Panics
    /// Panics if called from inside an [`update`](Self::update) closure on the
    /// same buffer.
    pub fn size(&self) -> (u32, u32) {
        self.pixels.borrow().dimensions()
    }

    /// Borrows the pixels for reading.
    ///
    /// # Panics
    /// Same restriction as [`size`](Self::size); see [`try_pixels`](Self::try_pixels).
    pub fn pixels(&self) -> Ref<'_, RgbaImage> {
        self.pixels.borrow()
    }

    /// Borrows the pixels for reading, or fails with [`RenderError::BufferBusy`]
    /// while an [`update`](Self::update) on this buffer is running.
    pub fn try_pixels(&self) -> RenderResult<Ref<'_, RgbaImage>> {
        self.pixels.try_borrow().map_err(|_| RenderError::BufferBusy(self.id))
    }

    /// Mutates the pixels of a dynamic buffer.
    ///
    /// Static buffers refuse with [`RenderError::StaticBuffer`], since renderers
    /// may hold textures built from their original contents. A nested update of
    /// the same buffer fails with [`RenderError::BufferBusy`].
    pub fn update<R>(&self, f: impl FnOnce(&mut RgbaImage) -> R) -> RenderResult<R> {
        if self.is_static() {
            return Err(RenderError::StaticBuffer(self.id));
        }
        let mut pixels = self.pixels.try_borrow_mut().map_err(|_| RenderError::BufferBusy(self.id))?;
        Ok(f(&mut pixels))
    }
}

impl fmt::Debug for RasterBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (w, h) = self.size();
        f.debug_struct("RasterBuffer")
            .field("id", &self.id)
            .field("mutability", &self.mutability)
            .field("size", &format_args!("{w}x{h}"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn ids_are_unique() {
        let a = RasterBuffer::new(RgbaImage::new(1, 1), Mutability::Static);
        let b = RasterBuffer::new(RgbaImage::new(1, 1), Mutability::Static);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn static_buffer_refuses_update() {
        let buf = RasterBuffer::new(RgbaImage::new(2, 2), Mutability::Static);
        let err = buf.update(|img| img.put_pixel(0, 0, Rgba([1, 2, 3, 4]))).unwrap_err();
        assert_eq!(err, RenderError::StaticBuffer(buf.id()));
        assert_eq!(buf.pixels().get_pixel(0, 0), &Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn dynamic_buffer_accepts_update() {
        let buf = RasterBuffer::new(RgbaImage::new(2, 2), Mutability::Dynamic);
        buf.update(|img| img.put_pixel(1, 1, Rgba([9, 9, 9, 255]))).unwrap();
        assert_eq!(buf.pixels().get_pixel(1, 1), &Rgba([9, 9, 9, 255]));
    }

    #[test]
    fn nested_access_during_update_is_refused() {
        let buf = RasterBuffer::new(RgbaImage::new(2, 2), Mutability::Dynamic);
        let (read, write) = buf
            .update(|_| (buf.try_pixels().map(|_| ()), buf.update(|_| ())))
            .unwrap();
        assert_eq!(read, Err(RenderError::BufferBusy(buf.id())));
        assert_eq!(write, Err(RenderError::BufferBusy(buf.id())));
        assert!(buf.try_pixels().is_ok());
    }

    #[test]
    fn size_reports_dimensions() {
        let buf = RasterBuffer::new(RgbaImage::new(7, 3), Mutability::Dynamic);
        assert_eq!(buf.size(), (7, 3));
    }
}
