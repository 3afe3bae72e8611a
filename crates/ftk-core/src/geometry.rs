#![forbid(unsafe_code)]

//! Geometric primitives.

/// A rectangle on the terminal surface.
///
/// Uses terminal coordinates (0-indexed, origin at top-left).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: u16,
    /// Top edge (inclusive).
    pub y: u16,
    /// Width in cells.
    pub width: u16,
    /// Height in cells.
    pub height: u16,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from origin with given size.
    #[inline]
    pub const fn from_size(width: u16, height: u16) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    /// Check if the rectangle has zero area.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub const fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// True when `self` lies entirely inside `outer`.
    #[inline]
    pub const fn fits_within(&self, outer: &Rect) -> bool {
        self.x >= outer.x
            && self.y >= outer.y
            && self.right() <= outer.right()
            && self.bottom() <= outer.bottom()
    }

    /// Shrink by `margin` cells on every side.
    pub fn inset(&self, margin: u16) -> Rect {
        let twice = margin.saturating_mul(2);
        Rect {
            x: self.x.saturating_add(margin),
            y: self.y.saturating_add(margin),
            width: self.width.saturating_sub(twice),
            height: self.height.saturating_sub(twice),
        }
    }

    /// The same rectangle placed at a new origin.
    #[inline]
    pub const fn at(&self, x: u16, y: u16) -> Rect {
        Rect::new(x, y, self.width, self.height)
    }

    /// Move by a signed offset, saturating at the surface origin.
    pub fn offset(&self, dx: i32, dy: i32) -> Rect {
        let shift = |v: u16, d: i32| (i32::from(v) + d).clamp(0, i32::from(u16::MAX)) as u16;
        self.at(shift(self.x, dx), shift(self.y, dy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges() {
        let r = Rect::new(2, 3, 10, 4);
        assert_eq!(r.right(), 12);
        assert_eq!(r.bottom(), 7);
        assert!(r.contains(2, 3));
        assert!(!r.contains(12, 3));
    }

    #[test]
    fn inset_saturates() {
        let r = Rect::new(0, 0, 3, 3);
        assert_eq!(r.inset(1), Rect::new(1, 1, 1, 1));
        assert!(r.inset(2).is_empty());
    }

    #[test]
    fn fits_within_surface() {
        let surface = Rect::from_size(80, 24);
        assert!(Rect::new(70, 20, 10, 4).fits_within(&surface));
        assert!(!Rect::new(71, 20, 10, 4).fits_within(&surface));
    }

    #[test]
    fn offset_clamps_at_origin() {
        let r = Rect::new(1, 1, 5, 5);
        assert_eq!(r.offset(-4, 2), Rect::new(0, 3, 5, 5));
        assert_eq!(r.offset(3, 0).x, 4);
    }
}
