use crate::paint::Color;

/// Renderer construction parameters.
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Mask in effect before the first `set_mask`.
    pub initial_mask: Color,

    /// Reject pictures whose view is empty or leaves its buffer with
    /// `RenderError::ViewOutOfBounds`. When off, the canvas decides what an
    /// out-of-range view looks like.
    pub check_view_bounds: bool,

    /// Alpha-blend picture textures onto the output instead of overwriting.
    pub blend_textures: bool,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            initial_mask: Color::WHITE,
            check_view_bounds: true,
            blend_textures: true,
        }
    }
}
