use std::path::Path;

use image::{Rgba, RgbaImage};
use tiny_skia::{
    Color as SkiaColor, FillRule, LineCap, Paint, PathBuilder, Pixmap, PremultipliedColorU8, Rect as SkiaRect,
    Stroke, Transform,
};

use crate::coords::PixelRect;
use crate::error::{RenderError, RenderResult, TextureError};
use crate::paint::DeviceColor;
use crate::render::{Canvas, PixelPoint};

use super::clip::{Guard, Point};
use super::SoftTexture;

/// Largest texture side accepted by [`SoftwareCanvas::create_texture`].
pub const MAX_TEXTURE_SIDE: u32 = 16_384;

/// CPU framebuffer implementing [`Canvas`] on top of a tiny-skia [`Pixmap`].
///
/// All painting is aliased so results are pixel exact.
#[derive(Debug, Clone)]
pub struct SoftwareCanvas {
    pixmap: Pixmap,
}

impl SoftwareCanvas {
    /// Transparent black framebuffer.
    ///
    /// Fails with [`RenderError::InvalidSurface`] for zero or unallocatable sizes.
    pub fn new(width: u32, height: u32) -> RenderResult<Self> {
        let pixmap = Pixmap::new(width, height).ok_or(RenderError::InvalidSurface { width, height })?;
        Ok(Self { pixmap })
    }

    pub fn with_background(width: u32, height: u32, background: DeviceColor) -> RenderResult<Self> {
        let mut canvas = Self::new(width, height)?;
        canvas.clear(background);
        Ok(canvas)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Reads back one pixel (straight alpha); `None` outside the framebuffer.
    pub fn pixel(&self, x: i32, y: i32) -> Option<DeviceColor> {
        let (x, y) = (u32::try_from(x).ok()?, u32::try_from(y).ok()?);
        if x >= self.width() || y >= self.height() {
            return None;
        }
        self.pixmap.pixel(x, y).map(straight)
    }

    #[inline]
    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn into_pixmap(self) -> Pixmap {
        self.pixmap
    }

    /// Straight-alpha copy of the framebuffer.
    pub fn to_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width(), self.height(), |x, y| {
            let color = self.pixmap.pixel(x, y).map_or(DeviceColor::TRANSPARENT, straight);
            Rgba(color.to_array())
        })
    }

    /// Reallocates the framebuffer; previous contents are discarded.
    pub fn resize(&mut self, width: u32, height: u32) -> RenderResult<()> {
        *self = Self::new(width, height)?;
        Ok(())
    }

    /// Encodes the framebuffer to `path`; format from the extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), image::ImageError> {
        self.to_image().save(path)
    }

    // Band around the framebuffer wide enough that clipped-off edges never show.
    fn guard(&self, margin: f64) -> Guard {
        Guard::around(self.width(), self.height(), margin)
    }

    /// Fills the cells `x0..=x1` × `y0..=y1`, clipped to the framebuffer.
    fn fill_cells(&mut self, (x0, y0): (i64, i64), (x1, y1): (i64, i64), color: DeviceColor) {
        let (x0, x1) = (x0.max(0), x1.min(i64::from(self.width()) - 1));
        let (y0, y1) = (y0.max(0), y1.min(i64::from(self.height()) - 1));
        if x0 > x1 || y0 > y1 {
            return;
        }
        let Some(rect) = SkiaRect::from_ltrb(x0 as f32, y0 as f32, (x1 + 1) as f32, (y1 + 1) as f32) else {
            return;
        };
        self.pixmap.fill_rect(rect, &solid(color), Transform::identity(), None);
    }

    fn fill_outline(&mut self, points: &[Point], fill_rule: FillRule, color: DeviceColor) {
        let points = self.guard(1.0).polygon(points);
        let [first, rest @ ..] = points.as_slice() else {
            return;
        };
        if rest.len() < 2 || zero_area(&points) {
            return;
        }

        let mut pb = PathBuilder::new();
        pb.move_to(first.0 as f32, first.1 as f32);
        for p in rest {
            pb.line_to(p.0 as f32, p.1 as f32);
        }
        pb.close();
        if let Some(path) = pb.finish() {
            self.pixmap.fill_path(&path, &solid(color), fill_rule, Transform::identity(), None);
        }
    }
}

impl Canvas for SoftwareCanvas {
    type Texture = SoftTexture;

    fn clear(&mut self, color: DeviceColor) {
        self.pixmap.fill(SkiaColor::from_rgba8(color.r, color.g, color.b, color.a));
    }

    fn plot(&mut self, at: PixelPoint, color: DeviceColor) {
        let at = widen(at);
        self.fill_cells(at, at, color);
    }

    fn line(&mut self, from: PixelPoint, to: PixelPoint, width: u32, color: DeviceColor) {
        if from == to {
            if width <= 1 {
                self.plot(from, color);
            } else {
                self.fill_circle(from, width / 2, color);
            }
            return;
        }

        let margin = f64::from(width) / 2.0 + 2.0;
        let Some((a, b)) = self.guard(margin).segment(center(from), center(to)) else {
            return;
        };
        let mut pb = PathBuilder::new();
        pb.move_to(a.0 as f32, a.1 as f32);
        pb.line_to(b.0 as f32, b.1 as f32);
        let Some(path) = pb.finish() else {
            return;
        };

        // Zero width is tiny-skia's hairline; square caps make both end pixels inclusive.
        let stroke = if width <= 1 {
            Stroke { width: 0.0, line_cap: LineCap::Square, ..Stroke::default() }
        } else {
            Stroke { width: width as f32, line_cap: LineCap::Butt, ..Stroke::default() }
        };
        self.pixmap.stroke_path(&path, &solid(color), &stroke, Transform::identity(), None);
    }

    fn fill_polygon(&mut self, points: &[PixelPoint], color: DeviceColor) {
        let points: Vec<Point> = points.iter().map(|&(x, y)| (f64::from(x), f64::from(y))).collect();
        self.fill_outline(&points, FillRule::EvenOdd, color);
    }

    fn fill_circle(&mut self, center_px: PixelPoint, radius: u32, color: DeviceColor) {
        // Covers pixel centers within `radius + 0.5` of the center pixel's center.
        let (cx, cy) = center(center_px);
        let r = f64::from(radius) + 0.5;
        let (w, h) = (f64::from(self.width()), f64::from(self.height()));
        if cx + r < 0.0 || cy + r < 0.0 || cx - r > w || cy - r > h {
            return;
        }

        let reaches = |x: f64, y: f64| (x - cx).hypot(y - cy) <= r;
        if reaches(0.5, 0.5) && reaches(w - 0.5, 0.5) && reaches(0.5, h - 0.5) && reaches(w - 0.5, h - 0.5) {
            let last = (i64::from(self.width()) - 1, i64::from(self.height()) - 1);
            self.fill_cells((0, 0), last, color);
            return;
        }

        if let Some(path) = PathBuilder::from_circle(cx as f32, cy as f32, r as f32) {
            self.pixmap.fill_path(&path, &solid(color), FillRule::Winding, Transform::identity(), None);
        }
    }

    fn fill_box(&mut self, min: PixelPoint, max: PixelPoint, color: DeviceColor) {
        let ((x0, y0), (x1, y1)) = ordered(min, max);
        self.fill_cells((x0, y0), (x1, y1), color);
    }

    fn outline_box(&mut self, min: PixelPoint, max: PixelPoint, color: DeviceColor) {
        let ((x0, y0), (x1, y1)) = ordered(min, max);

        self.fill_cells((x0, y0), (x1, y0), color);
        if y1 != y0 {
            self.fill_cells((x0, y1), (x1, y1), color);
        }
        // Sides without the corners, which the rows already covered.
        if y1 - y0 >= 2 {
            self.fill_cells((x0, y0 + 1), (x0, y1 - 1), color);
            if x1 != x0 {
                self.fill_cells((x1, y0 + 1), (x1, y1 - 1), color);
            }
        }
    }

    fn create_texture(&mut self, pixels: &RgbaImage, blend: bool) -> Result<SoftTexture, TextureError> {
        let (width, height) = pixels.dimensions();
        if width > MAX_TEXTURE_SIDE || height > MAX_TEXTURE_SIDE {
            return Err(TextureError::TooLarge { width, height, limit: MAX_TEXTURE_SIDE });
        }
        SoftTexture::from_image(pixels, blend)
    }

    fn destroy_texture(&mut self, texture: SoftTexture) {
        drop(texture);
    }

    fn set_texture_modulation(&mut self, texture: &mut SoftTexture, color: DeviceColor) {
        texture.set_modulation(color);
    }

    fn copy_texture(&mut self, texture: &SoftTexture, src: PixelRect, dst: PixelRect, angle_degrees: f32) {
        texture.copy_into(&mut self.pixmap, src, dst, angle_degrees);
    }
}

fn solid(color: DeviceColor) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, color.a);
    paint.anti_alias = false;
    paint
}

fn straight(px: PremultipliedColorU8) -> DeviceColor {
    let c = px.demultiply();
    DeviceColor::new(c.red(), c.green(), c.blue(), c.alpha())
}

#[inline]
fn widen((x, y): PixelPoint) -> (i64, i64) {
    (i64::from(x), i64::from(y))
}

#[inline]
fn center((x, y): PixelPoint) -> Point {
    (f64::from(x) + 0.5, f64::from(y) + 0.5)
}

fn ordered(a: PixelPoint, b: PixelPoint) -> ((i64, i64), (i64, i64)) {
    let (a, b) = (widen(a), widen(b));
    ((a.0.min(b.0), a.1.min(b.1)), (a.0.max(b.0), a.1.max(b.1)))
}

// tiny-skia refuses (and logs) fills without area; skip them quietly.
fn zero_area(points: &[Point]) -> bool {
    let (mut min, mut max) = (points[0], points[0]);
    for p in points {
        min = (min.0.min(p.0), min.1.min(p.1));
        max = (max.0.max(p.0), max.1.max(p.1));
    }
    max.0 - min.0 < 1e-6 || max.1 - min.1 < 1e-6
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: DeviceColor = DeviceColor::new(255, 0, 0, 255);
    const BLUE: DeviceColor = DeviceColor::new(0, 0, 255, 255);
    const CLEAR: DeviceColor = DeviceColor::TRANSPARENT;

    fn canvas(w: u32, h: u32) -> SoftwareCanvas {
        SoftwareCanvas::new(w, h).unwrap()
    }

    fn painted(canvas: &SoftwareCanvas) -> Vec<(i32, i32)> {
        let mut out = Vec::new();
        for (x, y, p) in canvas.to_image().enumerate_pixels() {
            if p[3] != 0 {
                out.push((x as i32, y as i32));
            }
        }
        out
    }

    fn bounds(px: &[(i32, i32)]) -> (i32, i32, i32, i32) {
        let xs = px.iter().map(|p| p.0);
        let ys = px.iter().map(|p| p.1);
        (xs.clone().min().unwrap(), ys.clone().min().unwrap(), xs.max().unwrap(), ys.max().unwrap())
    }

    // ── surface ───────────────────────────────────────────────────────────

    #[test]
    fn zero_sized_surface_is_rejected() {
        let err = SoftwareCanvas::new(0, 4).unwrap_err();
        assert_eq!(err, RenderError::InvalidSurface { width: 0, height: 4 });
    }

    #[test]
    fn pixel_outside_is_none() {
        let c = canvas(4, 3);
        assert_eq!(c.pixel(4, 0), None);
        assert_eq!(c.pixel(0, 3), None);
        assert_eq!(c.pixel(-1, 0), None);
        assert_eq!(c.pixel(3, 2), Some(CLEAR));
    }

    #[test]
    fn resize_discards_contents() {
        let mut c = SoftwareCanvas::with_background(2, 2, RED).unwrap();
        c.resize(5, 3).unwrap();
        assert_eq!((c.width(), c.height()), (5, 3));
        assert!(painted(&c).is_empty());
    }

    // ── primitives ────────────────────────────────────────────────────────

    #[test]
    fn clear_overwrites_without_blending() {
        let mut c = SoftwareCanvas::with_background(4, 4, RED).unwrap();
        c.clear(DeviceColor::new(0, 255, 0, 10));
        assert_eq!(c.pixel(3, 3), Some(DeviceColor::new(0, 255, 0, 10)));
    }

    #[test]
    fn plot_outside_is_ignored() {
        let mut c = canvas(4, 4);
        c.plot((-1, 0), RED);
        c.plot((4, 0), RED);
        c.plot((1, 2), RED);
        assert_eq!(painted(&c), vec![(1, 2)]);
    }

    #[test]
    fn fill_box_is_inclusive() {
        let mut c = canvas(20, 20);
        c.fill_box((2, 3), (5, 7), RED);
        let px = painted(&c);
        assert_eq!(px.len(), 4 * 5);
        assert_eq!(bounds(&px), (2, 3, 5, 7));
    }

    #[test]
    fn outline_box_paints_border_once() {
        let mut c = canvas(20, 20);
        c.outline_box((1, 1), (4, 3), DeviceColor::new(255, 0, 0, 128));
        let px = painted(&c);
        // 4 + 4 top/bottom, 1 + 1 sides.
        assert_eq!(px.len(), 10);
        assert!(!px.contains(&(2, 2)));
        // Corners blended once: same alpha as an edge pixel.
        assert_eq!(c.pixel(1, 1), c.pixel(2, 1));
    }

    #[test]
    fn disk_has_requested_radius() {
        let mut c = canvas(40, 40);
        c.fill_circle((20, 20), 5, RED);
        let px = painted(&c);
        assert_eq!(bounds(&px), (15, 15, 25, 25));
        assert_eq!(c.pixel(20, 20), Some(RED));
        assert_eq!(c.pixel(24, 24), Some(CLEAR));
    }

    #[test]
    fn zero_radius_disk_is_one_pixel() {
        let mut c = canvas(8, 8);
        c.fill_circle((3, 4), 0, RED);
        assert_eq!(painted(&c), vec![(3, 4)]);
    }

    #[test]
    fn thin_line_includes_both_ends() {
        let mut c = canvas(12, 4);
        c.line((2, 1), (9, 1), 1, RED);
        assert_eq!(painted(&c), (2..=9).map(|x| (x, 1)).collect::<Vec<_>>());
    }

    #[test]
    fn thin_vertical_line_includes_both_ends() {
        let mut c = canvas(4, 12);
        c.line((2, 9), (2, 3), 1, RED);
        let mut expected: Vec<_> = (3..=9).map(|y| (2, y)).collect();
        expected.sort_by_key(|&(x, y)| (y, x));
        assert_eq!(painted(&c), expected);
    }

    #[test]
    fn thick_horizontal_line_spans_width() {
        let mut c = canvas(20, 20);
        c.line((2, 10), (12, 10), 4, RED);
        let (_, y0, _, y1) = bounds(&painted(&c));
        assert_eq!(y1 - y0 + 1, 4);
    }

    #[test]
    fn zero_length_thick_line_is_a_dot() {
        let mut c = canvas(20, 20);
        c.line((10, 10), (10, 10), 6, RED);
        assert_eq!(bounds(&painted(&c)), (7, 7, 13, 13));
    }

    #[test]
    fn triangle_fill_stays_inside_bounds() {
        let mut c = canvas(20, 20);
        c.fill_polygon(&[(0, 0), (10, 0), (0, 10)], RED);
        let px = painted(&c);
        assert!(!px.is_empty());
        assert!(px.iter().all(|&(x, y)| x + y < 10));
    }

    #[test]
    fn self_intersecting_polygon_uses_even_odd() {
        // Pentagram: the inner pentagon is crossed twice and stays empty.
        let star = [(10, 0), (16, 19), (0, 7), (20, 7), (4, 19)];
        let mut c = canvas(21, 21);
        c.fill_polygon(&star, RED);
        assert_eq!(c.pixel(10, 10), Some(CLEAR));
        assert_eq!(c.pixel(10, 3), Some(RED));
    }

    #[test]
    fn flat_polygon_draws_nothing() {
        let mut c = canvas(8, 8);
        c.fill_polygon(&[(1, 3), (6, 3), (4, 3)], RED);
        c.fill_polygon(&[(1, 3), (6, 3)], RED);
        assert!(painted(&c).is_empty());
    }

    // ── far-away geometry ─────────────────────────────────────────────────

    #[test]
    fn thin_line_with_far_endpoints_is_clipped() {
        let mut c = canvas(8, 8);
        c.line((-2_000_000_000, 1), (2_000_000_000, 1), 1, RED);
        assert_eq!(painted(&c), (0..8).map(|x| (x, 1)).collect::<Vec<_>>());
    }

    #[test]
    fn thick_line_with_far_endpoints_is_clipped() {
        let mut c = canvas(8, 8);
        c.line((-2_000_000_000, 4), (2_000_000_000, 4), 3, RED);
        let px = painted(&c);
        assert_eq!(px.len(), 8 * 3);
        assert_eq!(bounds(&px), (0, 3, 7, 5));
    }

    #[test]
    fn long_line_ending_on_canvas() {
        let mut c = canvas(8, 8);
        c.line((0, 1), (1_000_000_000, 1), 1, RED);
        assert_eq!(painted(&c).len(), 8);
    }

    #[test]
    fn huge_outline_only_touches_visible_edges() {
        let mut c = canvas(8, 8);
        c.outline_box((-2_000_000_000, -2_000_000_000), (2_000_000_000, 2_000_000_000), RED);
        assert!(painted(&c).is_empty());

        c.outline_box((-2_000_000_000, 2), (2_000_000_000, 5), RED);
        let px = painted(&c);
        assert_eq!(px.len(), 16);
        assert!(px.iter().all(|&(_, y)| y == 2 || y == 5));
    }

    #[test]
    fn huge_polygon_covers_canvas() {
        let mut c = canvas(8, 8);
        let b = 2_000_000_000;
        c.fill_polygon(&[(-b, -b), (b, -b), (b, b), (-b, b)], RED);
        assert_eq!(painted(&c).len(), 64);
    }

    #[test]
    fn huge_disk_covers_canvas_and_far_disk_misses() {
        let mut c = canvas(8, 8);
        c.fill_circle((2_000_000_000, 0), 3, RED);
        assert!(painted(&c).is_empty());

        c.fill_circle((4, 4), 1_000_000_000, RED);
        assert_eq!(painted(&c).len(), 64);
    }

    // ── textures ──────────────────────────────────────────────────────────

    fn two_by_two() -> RgbaImage {
        RgbaImage::from_fn(2, 2, |x, y| match (x, y) {
            (0, 0) => Rgba([255, 0, 0, 255]),
            (1, 1) => Rgba([0, 0, 255, 255]),
            _ => Rgba([0, 255, 0, 255]),
        })
    }

    #[test]
    fn empty_texture_is_rejected() {
        let mut c = canvas(1, 1);
        let err = c.create_texture(&RgbaImage::new(0, 3), true).unwrap_err();
        assert_eq!(err, TextureError::EmptySource { width: 0, height: 3 });
    }

    #[test]
    fn oversized_texture_is_rejected() {
        let mut c = canvas(1, 1);
        let err = c.create_texture(&RgbaImage::new(MAX_TEXTURE_SIDE + 1, 1), true).unwrap_err();
        assert!(matches!(err, TextureError::TooLarge { limit: MAX_TEXTURE_SIDE, .. }));
    }

    #[test]
    fn copy_stretches_source() {
        let mut c = canvas(8, 8);
        let tex = c.create_texture(&two_by_two(), true).unwrap();
        c.copy_texture(&tex, PixelRect::new(0, 0, 2, 2), PixelRect::new(0, 0, 8, 8), 0.0);
        assert_eq!(c.pixel(0, 0), Some(RED));
        assert_eq!(c.pixel(3, 3), Some(RED));
        assert_eq!(c.pixel(4, 4), Some(BLUE));
        assert_eq!(c.pixel(7, 7), Some(BLUE));
    }

    #[test]
    fn copy_uses_source_rect() {
        let mut c = canvas(4, 4);
        let tex = c.create_texture(&two_by_two(), true).unwrap();
        c.copy_texture(&tex, PixelRect::new(1, 1, 1, 1), PixelRect::new(0, 0, 4, 4), 0.0);
        assert!(c.to_image().pixels().all(|p| p.0 == [0, 0, 255, 255]));
    }

    #[test]
    fn copy_rotated_half_turn() {
        let mut c = canvas(2, 2);
        let tex = c.create_texture(&two_by_two(), true).unwrap();
        c.copy_texture(&tex, PixelRect::new(0, 0, 2, 2), PixelRect::new(0, 0, 2, 2), 180.0);
        assert_eq!(c.pixel(0, 0), Some(BLUE));
        assert_eq!(c.pixel(1, 1), Some(RED));
    }

    #[test]
    fn copy_applies_modulation() {
        let mut c = canvas(2, 2);
        let mut tex = c.create_texture(&two_by_two(), false).unwrap();
        c.set_texture_modulation(&mut tex, DeviceColor::new(128, 255, 255, 255));
        c.copy_texture(&tex, PixelRect::new(0, 0, 1, 1), PixelRect::new(0, 0, 1, 1), 0.0);
        assert_eq!(c.pixel(0, 0), Some(DeviceColor::new(128, 0, 0, 255)));
    }

    #[test]
    fn copy_without_blend_replaces_destination() {
        let mut c = SoftwareCanvas::with_background(1, 1, RED).unwrap();
        let tex = c.create_texture(&RgbaImage::new(1, 1), false).unwrap();
        c.copy_texture(&tex, PixelRect::new(0, 0, 1, 1), PixelRect::new(0, 0, 1, 1), 0.0);
        assert_eq!(c.pixel(0, 0), Some(CLEAR));
    }

    #[test]
    fn copy_clips_to_framebuffer() {
        let mut c = canvas(4, 4);
        let tex = c.create_texture(&two_by_two(), true).unwrap();
        c.copy_texture(&tex, PixelRect::new(0, 0, 2, 2), PixelRect::new(-2, -2, 4, 4), 0.0);
        assert_eq!(c.pixel(0, 0), Some(BLUE));
        assert_eq!(c.pixel(2, 2), Some(CLEAR));
    }
}
