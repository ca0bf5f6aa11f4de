//! Recording canvas double shared by the renderer tests.

use std::collections::HashSet;

use image::RgbaImage;

use crate::coords::PixelRect;
use crate::error::TextureError;
use crate::paint::DeviceColor;

use super::{Canvas, PixelPoint};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Op {
    Clear(DeviceColor),
    Plot(PixelPoint, DeviceColor),
    Line(PixelPoint, PixelPoint, u32, DeviceColor),
    FillPolygon(Vec<PixelPoint>, DeviceColor),
    FillCircle(PixelPoint, u32, DeviceColor),
    FillBox(PixelPoint, PixelPoint, DeviceColor),
    OutlineBox(PixelPoint, PixelPoint, DeviceColor),
    Copy { texture: u32, src: PixelRect, dst: PixelRect, angle: f32, modulation: DeviceColor },
}

#[derive(Debug, PartialEq)]
pub(crate) struct FakeTexture {
    pub id: u32,
    pub size: (u32, u32),
    pub modulation: DeviceColor,
}

/// Records every call and tracks live texture handles.
///
/// Destroying an unknown or already-destroyed handle panics, so double frees
/// surface as test failures.
#[derive(Debug, Default)]
pub(crate) struct RecordingCanvas {
    pub ops: Vec<Op>,
    pub builds: u32,
    pub destroyed: Vec<u32>,
    pub live: HashSet<u32>,
    pub fail_next_build: bool,
    next_id: u32,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Canvas for RecordingCanvas {
    type Texture = FakeTexture;

    fn clear(&mut self, color: DeviceColor) {
        self.ops.push(Op::Clear(color));
    }

    fn plot(&mut self, at: PixelPoint, color: DeviceColor) {
        self.ops.push(Op::Plot(at, color));
    }

    fn line(&mut self, from: PixelPoint, to: PixelPoint, width: u32, color: DeviceColor) {
        self.ops.push(Op::Line(from, to, width, color));
    }

    fn fill_polygon(&mut self, points: &[PixelPoint], color: DeviceColor) {
        self.ops.push(Op::FillPolygon(points.to_vec(), color));
    }

    fn fill_circle(&mut self, center: PixelPoint, radius: u32, color: DeviceColor) {
        self.ops.push(Op::FillCircle(center, radius, color));
    }

    fn fill_box(&mut self, min: PixelPoint, max: PixelPoint, color: DeviceColor) {
        self.ops.push(Op::FillBox(min, max, color));
    }

    fn outline_box(&mut self, min: PixelPoint, max: PixelPoint, color: DeviceColor) {
        self.ops.push(Op::OutlineBox(min, max, color));
    }

    fn create_texture(&mut self, pixels: &RgbaImage, _blend: bool) -> Result<FakeTexture, TextureError> {
        if std::mem::take(&mut self.fail_next_build) {
            return Err(TextureError::Backend("out of texture memory".into()));
        }
        self.next_id += 1;
        self.builds += 1;
        self.live.insert(self.next_id);
        Ok(FakeTexture {
            id: self.next_id,
            size: pixels.dimensions(),
            modulation: DeviceColor::OPAQUE_WHITE,
        })
    }

    fn destroy_texture(&mut self, texture: FakeTexture) {
        assert!(self.live.remove(&texture.id), "texture {} destroyed twice", texture.id);
        self.destroyed.push(texture.id);
    }

    fn set_texture_modulation(&mut self, texture: &mut FakeTexture, color: DeviceColor) {
        texture.modulation = color;
    }

    fn copy_texture(&mut self, texture: &FakeTexture, src: PixelRect, dst: PixelRect, angle_degrees: f32) {
        self.ops.push(Op::Copy {
            texture: texture.id,
            src,
            dst,
            angle: angle_degrees,
            modulation: texture.modulation,
        });
    }
}
