use image::RgbaImage;
use tiny_skia::{
    BlendMode, ColorU8, FilterQuality, IntSize, Paint, Pattern, Pixmap, PremultipliedColorU8, Rect as SkiaRect,
    SpreadMode, Transform,
};

use crate::coords::PixelRect;
use crate::error::TextureError;
use crate::paint::DeviceColor;

/// Texture owned by a [`SoftwareCanvas`](super::SoftwareCanvas): a premultiplied
/// copy of the source pixels plus draw state.
///
/// Color modulation is baked into a tinted copy whenever it changes; alpha
/// modulation becomes the pattern opacity at copy time.
#[derive(Debug, Clone)]
pub struct SoftTexture {
    source: Pixmap,
    tinted: Option<Pixmap>,
    modulation: DeviceColor,
    blend: bool,
}

impl SoftTexture {
    pub(super) fn from_image(pixels: &RgbaImage, blend: bool) -> Result<Self, TextureError> {
        let (width, height) = pixels.dimensions();
        let size = IntSize::from_wh(width, height).ok_or(TextureError::EmptySource { width, height })?;
        let data = pixels
            .pixels()
            .flat_map(|p| {
                let pm = ColorU8::from_rgba(p[0], p[1], p[2], p[3]).premultiply();
                [pm.red(), pm.green(), pm.blue(), pm.alpha()]
            })
            .collect();
        let source = Pixmap::from_vec(data, size)
            .ok_or_else(|| TextureError::Backend(format!("cannot allocate a {width}x{height} pixmap")))?;

        Ok(Self { source, tinted: None, modulation: DeviceColor::OPAQUE_WHITE, blend })
    }

    #[inline]
    pub fn size(&self) -> (u32, u32) {
        (self.source.width(), self.source.height())
    }

    #[inline]
    pub fn modulation(&self) -> DeviceColor {
        self.modulation
    }

    pub(super) fn set_modulation(&mut self, color: DeviceColor) {
        if color == self.modulation {
            return;
        }
        let recolor = (color.r, color.g, color.b) != (255, 255, 255);
        let stale = (self.modulation.r, self.modulation.g, self.modulation.b) != (color.r, color.g, color.b);
        self.modulation = color;
        if !recolor {
            self.tinted = None;
        } else if stale || self.tinted.is_none() {
            self.tinted = Some(tint(&self.source, color));
        }
    }

    /// Paints `src` of this texture into `dst` on `frame`, stretched and rotated
    /// clockwise by `angle_degrees` about the center of `dst`. Nearest-neighbour
    /// sampling; parts outside `frame` are clipped by the rasterizer.
    pub(super) fn copy_into(&self, frame: &mut Pixmap, src: PixelRect, dst: PixelRect, angle_degrees: f32) {
        if src.is_empty() || dst.is_empty() {
            return;
        }
        let Some(area) = SkiaRect::from_xywh(src.x as f32, src.y as f32, src.w as f32, src.h as f32) else {
            return;
        };

        let center = dst.center();
        let transform = Transform::from_rotate_at(angle_degrees, center.x, center.y)
            .pre_translate(dst.x as f32, dst.y as f32)
            .pre_scale(dst.w as f32 / src.w as f32, dst.h as f32 / src.h as f32)
            .pre_translate(-(src.x as f32), -(src.y as f32));
        if !transform.is_finite() {
            log::warn!("skipping texture copy with a degenerate transform");
            return;
        }

        let pixels = self.tinted.as_ref().unwrap_or(&self.source);
        let paint = Paint {
            shader: Pattern::new(
                pixels.as_ref(),
                SpreadMode::Pad,
                FilterQuality::Nearest,
                f32::from(self.modulation.a) / 255.0,
                Transform::identity(),
            ),
            blend_mode: if self.blend { BlendMode::SourceOver } else { BlendMode::Source },
            anti_alias: false,
            force_hq_pipeline: false,
        };
        frame.fill_rect(area, &paint, transform, None);
    }
}

// Scales the color channels of a premultiplied pixmap.
fn tint(source: &Pixmap, color: DeviceColor) -> Pixmap {
    let scale = |c: u8, m: u8| ((u32::from(c) * u32::from(m) + 127) / 255) as u8;
    let mut tinted = source.clone();
    for px in tinted.pixels_mut() {
        let scaled = PremultipliedColorU8::from_rgba(
            scale(px.red(), color.r),
            scale(px.green(), color.g),
            scale(px.blue(), color.b),
            px.alpha(),
        );
        // Scaling down never breaks the premultiplied invariant.
        if let Some(scaled) = scaled {
            *px = scaled;
        }
    }
    tinted
}
