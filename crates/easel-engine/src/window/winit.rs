use std::sync::Arc;

use winit::dpi::LogicalSize;
use winit::window::{Fullscreen, Window};

use crate::coords::Rect;
use crate::output::WindowOutput;

/// [`WindowOutput`] over a `winit` window created by the application.
///
/// Sizes are logical pixels; the window's scale factor is applied by winit.
#[derive(Debug, Clone)]
pub struct WinitWindow {
    window: Arc<Window>,
}

impl WinitWindow {
    pub fn new(window: Arc<Window>) -> Self {
        Self { window }
    }

    #[inline]
    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }

    /// Returns the logical window size as `(width, height)`.
    pub fn logical_size(&self) -> (f32, f32) {
        let logical: LogicalSize<f64> = self.window.inner_size().to_logical(self.window.scale_factor());
        (logical.width as f32, logical.height as f32)
    }
}

impl WindowOutput for WinitWindow {
    fn set_fullscreen(&mut self, fullscreen: bool) {
        let mode = fullscreen.then_some(Fullscreen::Borderless(None));
        log::debug!("window {:?}: fullscreen = {fullscreen}", self.window.id());
        self.window.set_fullscreen(mode);
    }

    fn resize(&mut self, width: u32, height: u32) {
        // `None` means the platform applies the size asynchronously and a
        // `Resized` event follows.
        let applied = self.window.request_inner_size(LogicalSize::new(width, height));
        log::debug!(
            "window {:?}: resize to {width}x{height} requested (applied now: {})",
            self.window.id(),
            applied.is_some()
        );
    }

    fn set_title(&mut self, title: &str) {
        self.window.set_title(title);
    }

    fn output_rect(&self) -> Rect {
        let (w, h) = self.logical_size();
        Rect::new(0.0, 0.0, w, h)
    }
}
