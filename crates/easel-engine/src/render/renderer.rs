use crate::coords::{round_px, Rect, Vec2};
use crate::error::{RenderError, RenderResult};
use crate::output::{PictureVideoOutput, PrimitiveVideoOutput, VideoOutput};
use crate::paint::{Color, DeviceColor};
use crate::picture::Picture;

use super::{Canvas, PixelPoint, RendererConfig, TextureCache};

/// Video output over a backend [`Canvas`].
///
/// Per call:
/// 1. `color × mask` is computed once and converted to a device color
/// 2. coordinates are rounded with `floor(v + 0.5)`
/// 3. the canvas is invoked immediately (no batching, no reordering)
///
/// Pictures are resolved through a per-renderer [`TextureCache`]. Dropping the
/// renderer destroys every texture it still holds.
pub struct Renderer<C: Canvas> {
    canvas: C,
    textures: TextureCache<C::Texture>,
    mask: Color,
    config: RendererConfig,
}

impl<C: Canvas> Renderer<C> {
    pub fn new(canvas: C) -> Self {
        Self::with_config(canvas, RendererConfig::default())
    }

    pub fn with_config(canvas: C, config: RendererConfig) -> Self {
        Self {
            canvas,
            textures: TextureCache::new(),
            mask: config.initial_mask,
            config,
        }
    }

    #[inline]
    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    #[inline]
    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    /// Direct canvas access, e.g. to present or resize it.
    ///
    /// Textures cached by this renderer must not be destroyed through it.
    #[inline]
    pub fn canvas_mut(&mut self) -> &mut C {
        &mut self.canvas
    }

    /// Number of textures currently cached.
    #[inline]
    pub fn cached_textures(&self) -> usize {
        self.textures.len()
    }

    /// Destroys textures whose pictures have all been dropped.
    pub fn purge_textures(&mut self) -> usize {
        self.textures.purge(&mut self.canvas)
    }

    /// Destroys every cached texture. Static pictures are re-uploaded on their
    /// next draw.
    pub fn clear_textures(&mut self) {
        self.textures.clear(&mut self.canvas);
    }

    // The single place the mask is applied.
    #[inline]
    fn masked(&self, color: Color) -> DeviceColor {
        color.mul(self.mask).to_device_rgba()
    }

    fn stroke_polygon(&mut self, points: &[PixelPoint], thickness: f32, color: DeviceColor) {
        let width = stroke_width(thickness);
        let radius = round_px(thickness / 2.0).max(0) as u32;

        if let [single] = points {
            self.canvas.fill_circle(*single, radius, color);
            return;
        }

        for (i, &from) in points.iter().enumerate() {
            let to = points[(i + 1) % points.len()];
            self.canvas.line(from, to, width, color);
            self.canvas.fill_circle(from, radius, color);
        }
    }
}

impl<C: Canvas> PrimitiveVideoOutput for Renderer<C> {
    fn draw_point(&mut self, point: Vec2, color: Color) {
        let color = self.masked(color);
        self.canvas.plot(point.to_px(), color);
    }

    fn draw_line(&mut self, a: Vec2, b: Vec2, thickness: f32, color: Color) {
        let color = self.masked(color);
        self.canvas.line(a.to_px(), b.to_px(), stroke_width(thickness), color);
    }

    fn draw_polygon(&mut self, points: &[Vec2], thickness: f32, color: Color) {
        if points.is_empty() {
            return;
        }
        let color = self.masked(color);
        let points: Vec<PixelPoint> = points.iter().map(|p| p.to_px()).collect();

        if is_fill(thickness) {
            self.canvas.fill_polygon(&points, color);
        } else {
            self.stroke_polygon(&points, thickness, color);
        }
    }

    fn draw_rect(&mut self, rect: Rect, thickness: f32, color: Color) {
        let color = self.masked(color);
        let min = rect.min().to_px();
        let max = rect.max().to_px();

        if is_fill(thickness) {
            self.canvas.fill_box(min, max, color);
        } else if thickness == 1.0 {
            self.canvas.outline_box(min, max, color);
        } else {
            let corners = rect.corners().map(Vec2::to_px);
            self.stroke_polygon(&corners, thickness, color);
        }
    }
}

impl<C: Canvas> PictureVideoOutput for Renderer<C> {
    fn draw_picture(&mut self, dest: Rect, picture: &Picture) -> RenderResult<()> {
        // Fails while the buffer is inside its own `update`; later borrows are then safe.
        drop(picture.buffer().try_pixels()?);

        if self.config.check_view_bounds && !picture.view_in_bounds() {
            let (width, height) = picture.buffer().size();
            log::warn!(
                "rejecting picture view {:?} outside its {width}x{height} buffer",
                picture.view()
            );
            return Err(RenderError::ViewOutOfBounds { view: picture.view(), width, height });
        }

        let modulation = self.masked(Color::WHITE);
        let texture = self
            .textures
            .resolve(&mut self.canvas, picture.buffer(), self.config.blend_textures)
            .inspect_err(|e| log::warn!("picture draw aborted: {e}"))?;

        self.canvas.set_texture_modulation(texture, modulation);
        self.canvas.copy_texture(texture, picture.view(), dest.to_px(), picture.angle().to_degrees());
        Ok(())
    }
}

impl<C: Canvas> VideoOutput for Renderer<C> {
    fn clear(&mut self, color: Color) {
        let color = self.masked(color);
        self.canvas.clear(color);
    }

    fn set_mask(&mut self, mask: Color) {
        log::trace!("mask set to {mask:?}");
        self.mask = mask;
    }

    fn mask(&self) -> Color {
        self.mask
    }
}

impl<C: Canvas> Drop for Renderer<C> {
    fn drop(&mut self) {
        self.textures.clear(&mut self.canvas);
    }
}

// Non-positive thickness fills.
#[inline]
fn is_fill(thickness: f32) -> bool {
    thickness <= 0.0
}

#[inline]
fn stroke_width(thickness: f32) -> u32 {
    round_px(thickness).max(1) as u32
}
