use crate::coords::{Rect, Vec2};
use crate::error::RenderResult;
use crate::paint::Color;
use crate::picture::Picture;

use super::{AudioOutput, PictureVideoOutput, PrimitiveVideoOutput, VideoOutput, WindowOutput};

/// Pairs a window with a video backend into a full [`Output`](super::Output).
///
/// Every call is forwarded unchanged; resizing the window does not touch the
/// video side.
#[derive(Debug)]
pub struct ComposedOutput<W, V> {
    window: W,
    video: V,
}

impl<W, V> ComposedOutput<W, V>
where
    W: WindowOutput,
    V: VideoOutput,
{
    pub fn new(window: W, video: V) -> Self {
        Self { window, video }
    }

    pub fn window(&self) -> &W {
        &self.window
    }

    pub fn window_mut(&mut self) -> &mut W {
        &mut self.window
    }

    pub fn video(&self) -> &V {
        &self.video
    }

    pub fn video_mut(&mut self) -> &mut V {
        &mut self.video
    }

    pub fn into_parts(self) -> (W, V) {
        (self.window, self.video)
    }
}

impl<W: WindowOutput, V> WindowOutput for ComposedOutput<W, V> {
    fn set_fullscreen(&mut self, fullscreen: bool) {
        self.window.set_fullscreen(fullscreen);
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.window.resize(width, height);
    }

    fn set_title(&mut self, title: &str) {
        self.window.set_title(title);
    }

    fn output_rect(&self) -> Rect {
        self.window.output_rect()
    }
}

impl<W, V: PrimitiveVideoOutput> PrimitiveVideoOutput for ComposedOutput<W, V> {
    fn draw_point(&mut self, point: Vec2, color: Color) {
        self.video.draw_point(point, color);
    }

    fn draw_line(&mut self, a: Vec2, b: Vec2, thickness: f32, color: Color) {
        self.video.draw_line(a, b, thickness, color);
    }

    fn draw_polygon(&mut self, points: &[Vec2], thickness: f32, color: Color) {
        self.video.draw_polygon(points, thickness, color);
    }

    fn draw_rect(&mut self, rect: Rect, thickness: f32, color: Color) {
        self.video.draw_rect(rect, thickness, color);
    }
}

impl<W, V: PictureVideoOutput> PictureVideoOutput for ComposedOutput<W, V> {
    fn draw_picture(&mut self, dest: Rect, picture: &Picture) -> RenderResult<()> {
        self.video.draw_picture(dest, picture)
    }
}

impl<W, V: VideoOutput> VideoOutput for ComposedOutput<W, V> {
    fn clear(&mut self, color: Color) {
        self.video.clear(color);
    }

    fn set_mask(&mut self, mask: Color) {
        self.video.set_mask(mask);
    }

    fn mask(&self) -> Color {
        self.video.mask()
    }
}

impl<W, V> AudioOutput for ComposedOutput<W, V> {}
