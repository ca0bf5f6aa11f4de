use image::RgbaImage;

use crate::coords::PixelRect;
use crate::error::TextureError;
use crate::paint::DeviceColor;

/// Integer pixel coordinate.
pub type PixelPoint = (i32, i32);

/// Backend drawing context.
///
/// Receives already-rounded coordinates and already-masked colors; it never
/// sees the renderer's mask. Box corners are inclusive on both ends.
pub trait Canvas {
    /// Backend texture handle. Released only through [`destroy_texture`](Self::destroy_texture).
    type Texture;

    /// Overwrites every pixel with `color` (no blending).
    fn clear(&mut self, color: DeviceColor);

    fn plot(&mut self, at: PixelPoint, color: DeviceColor);

    /// Segment of `width` pixels (at least one).
    fn line(&mut self, from: PixelPoint, to: PixelPoint, width: u32, color: DeviceColor);

    /// Filled polygon; `points` in boundary order, self-intersections resolved
    /// by the backend's fill rule.
    fn fill_polygon(&mut self, points: &[PixelPoint], color: DeviceColor);

    /// Filled disk of `radius` around `center`.
    fn fill_circle(&mut self, center: PixelPoint, radius: u32, color: DeviceColor);

    fn fill_box(&mut self, min: PixelPoint, max: PixelPoint, color: DeviceColor);

    /// One-pixel outline of the box.
    fn outline_box(&mut self, min: PixelPoint, max: PixelPoint, color: DeviceColor);

    /// Builds a texture from the current buffer contents.
    fn create_texture(&mut self, pixels: &RgbaImage, blend: bool) -> Result<Self::Texture, TextureError>;

    fn destroy_texture(&mut self, texture: Self::Texture);

    /// Sets the color/alpha modulation applied when `texture` is copied.
    fn set_texture_modulation(&mut self, texture: &mut Self::Texture, color: DeviceColor);

    /// Copies `src` (texture pixels) into `dst` (output pixels), stretching as
    /// needed and rotating clockwise by `angle_degrees` about the center of `dst`.
    fn copy_texture(&mut self, texture: &Self::Texture, src: PixelRect, dst: PixelRect, angle_degrees: f32);
}
