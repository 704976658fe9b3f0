//! Axis-aligned rectangles and the overlap test every collision uses.

/// An axis-aligned box in playfield pixels.  `(x, y)` is the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Closed-interval overlap: boxes sharing only an edge or a corner
    /// still count as intersecting.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x <= other.right()
            && other.x <= self.right()
            && self.y <= other.bottom()
            && other.y <= self.bottom()
    }

    /// True when any part of the box lies outside `[0, width] × [0, height]`.
    pub fn outside_horizontally(&self, width: i32) -> bool {
        self.x < 0 || self.right() > width
    }

    pub fn outside_vertically(&self, height: i32) -> bool {
        self.y < 0 || self.bottom() > height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_touch_intersects() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(10, 10, 5, 5);
        assert!(a.intersects(&b));
    }

    #[test]
    fn one_pixel_gap_does_not_intersect() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(11, 0, 5, 5);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn bounds_checks() {
        let r = Rect::new(1240, 680, 50, 50);
        assert!(r.outside_horizontally(1280));
        assert!(r.outside_vertically(720));
        assert!(!Rect::new(1230, 670, 50, 50).outside_horizontally(1280));
    }
}
