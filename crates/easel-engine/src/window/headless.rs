use crate::coords::Rect;
use crate::output::WindowOutput;

/// Window stand-in that only records what was asked of it.
///
/// Pairs with [`SoftwareCanvas`](crate::raster::SoftwareCanvas) for offscreen
/// rendering and tests.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessWindow {
    title: String,
    width: u32,
    height: u32,
    fullscreen: bool,
}

impl HeadlessWindow {
    pub fn new(title: impl Into<String>, width: u32, height: u32) -> Self {
        Self { title: title.into(), width, height, fullscreen: false }
    }

    #[inline]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[inline]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline]
    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }
}

impl WindowOutput for HeadlessWindow {
    fn set_fullscreen(&mut self, fullscreen: bool) {
        self.fullscreen = fullscreen;
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    fn set_title(&mut self, title: &str) {
        title.clone_into(&mut self.title);
    }

    fn output_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width as f32, self.height as f32)
    }
}
