//! Guard-band clipping.
//!
//! tiny-skia's scan converter gives up on paths whose integer bounds overflow
//! `i32`, so geometry is cut down to a band around the framebuffer first.
//! Everything inside the band is left exactly as it was.

pub(super) type Point = (f64, f64);

/// Framebuffer bounds grown by a margin on every side.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(super) struct Guard {
    left: f64,
    top: f64,
    right: f64,
    bottom: f64,
}

impl Guard {
    pub(super) fn around(width: u32, height: u32, margin: f64) -> Self {
        Self {
            left: -margin,
            top: -margin,
            right: f64::from(width) + margin,
            bottom: f64::from(height) + margin,
        }
    }

    /// Liang–Barsky. `None` when the segment misses the band.
    pub(super) fn segment(&self, a: Point, b: Point) -> Option<(Point, Point)> {
        let (dx, dy) = (b.0 - a.0, b.1 - a.1);
        let (mut t0, mut t1) = (0.0_f64, 1.0_f64);

        for (p, q) in [
            (-dx, a.0 - self.left),
            (dx, self.right - a.0),
            (-dy, a.1 - self.top),
            (dy, self.bottom - a.1),
        ] {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let t = q / p;
            if p < 0.0 {
                if t > t1 {
                    return None;
                }
                t0 = t0.max(t);
            } else {
                if t < t0 {
                    return None;
                }
                t1 = t1.min(t);
            }
        }

        let at = |t: f64| (a.0 + t * dx, a.1 + t * dy);
        Some((at(t0), at(t1)))
    }

    /// Sutherland–Hodgman against the four band edges.
    ///
    /// Parts outside are folded onto the band edge, which leaves the winding
    /// number (and so even-odd coverage) of every point inside the band intact.
    pub(super) fn polygon(&self, points: &[Point]) -> Vec<Point> {
        let mut out = points.to_vec();
        for edge in [
            Edge { axis: Axis::X, bound: self.left, keep_above: true },
            Edge { axis: Axis::X, bound: self.right, keep_above: false },
            Edge { axis: Axis::Y, bound: self.top, keep_above: true },
            Edge { axis: Axis::Y, bound: self.bottom, keep_above: false },
        ] {
            if out.is_empty() {
                break;
            }
            out = edge.clip(&out);
        }
        out
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
enum Axis {
    X,
    Y,
}

#[derive(Debug, Copy, Clone)]
struct Edge {
    axis: Axis,
    bound: f64,
    keep_above: bool,
}

impl Edge {
    #[inline]
    fn coord(&self, p: Point) -> f64 {
        match self.axis {
            Axis::X => p.0,
            Axis::Y => p.1,
        }
    }

    #[inline]
    fn inside(&self, p: Point) -> bool {
        if self.keep_above { self.coord(p) >= self.bound } else { self.coord(p) <= self.bound }
    }

    fn crossing(&self, a: Point, b: Point) -> Point {
        let t = (self.bound - self.coord(a)) / (self.coord(b) - self.coord(a));
        match self.axis {
            Axis::X => (self.bound, a.1 + t * (b.1 - a.1)),
            Axis::Y => (a.0 + t * (b.0 - a.0), self.bound),
        }
    }

    fn clip(&self, points: &[Point]) -> Vec<Point> {
        let mut out = Vec::with_capacity(points.len() + 2);
        let Some(&last) = points.last() else {
            return out;
        };

        let mut prev = last;
        for &cur in points {
            match (self.inside(prev), self.inside(cur)) {
                (true, true) => out.push(cur),
                (true, false) => out.push(self.crossing(prev, cur)),
                (false, true) => {
                    out.push(self.crossing(prev, cur));
                    out.push(cur);
                }
                (false, false) => {}
            }
            prev = cur;
        }
        out
    }
}
