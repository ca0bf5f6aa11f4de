use super::Vec2;

/// Converts a float coordinate to an integer pixel: `floor(v + 0.5)`.
///
/// Every coordinate handed to a backend goes through this function, so
/// `2.5 → 3` and `-2.5 → -2` regardless of which primitive is drawn.
#[inline]
pub fn round_px(v: f32) -> i32 {
    (v + 0.5).floor() as i32
}

/// Integer rectangle in raster-buffer pixels.
///
/// Used for picture views (source rects) and for rounded destination rects.
/// `w`/`h` are unsigned; a zero extent is an empty rect.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

impl PixelRect {
    #[inline]
    pub const fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// Rect covering a whole `w × h` buffer.
    #[inline]
    pub const fn full(w: u32, h: u32) -> Self {
        Self { x: 0, y: 0, w, h }
    }

    /// Builds a rect from two inclusive-exclusive corners; swapped corners are
    /// normalized.
    #[inline]
    pub fn from_corners(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        let (l, r) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
        let (t, b) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };
        Self::new(l, t, r.abs_diff(l), b.abs_diff(t))
    }

    /// Exclusive right edge.
    #[inline]
    pub fn right(self) -> i64 {
        self.x as i64 + self.w as i64
    }

    /// Exclusive bottom edge.
    #[inline]
    pub fn bottom(self) -> i64 {
        self.y as i64 + self.h as i64
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// Center in continuous pixel space.
    #[inline]
    pub fn center(self) -> Vec2 {
        Vec2::new(
            self.x as f32 + self.w as f32 / 2.0,
            self.y as f32 + self.h as f32 / 2.0,
        )
    }

    /// Returns `true` if the rect is non-empty and lies inside `[0, w) × [0, h)`.
    #[inline]
    pub fn fits_within(self, w: u32, h: u32) -> bool {
        !self.is_empty()
            && self.x >= 0
            && self.y >= 0
            && self.right() <= w as i64
            && self.bottom() <= h as i64
    }

    /// Returns `true` if pixel `(px, py)` lies inside the rect.
    #[inline]
    pub fn contains(self, px: i32, py: i32) -> bool {
        let (px, py) = (px as i64, py as i64);
        px >= self.x as i64 && py >= self.y as i64 && px < self.right() && py < self.bottom()
    }
}
