use super::Vec2;

/// Axis-aligned bounds of `rect`, `ellipse` and `arc`, in model space.
///
/// The size may be negative (a rectangle drawn from its far corner); primitives call
/// [`Rect::normalized`] before use.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn min(self) -> Vec2 {
        self.origin
    }

    #[inline]
    pub fn max(self) -> Vec2 {
        self.origin + self.size
    }

    #[inline]
    pub fn center(self) -> Vec2 {
        self.origin + self.half_size()
    }

    /// Radii of the inscribed ellipse.
    #[inline]
    pub fn half_size(self) -> Vec2 {
        self.size * 0.5
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x == 0.0 || self.size.y == 0.0
    }

    /// Same area with a non-negative size.
    pub fn normalized(self) -> Self {
        let (x, w) = flip(self.origin.x, self.size.x);
        let (y, h) = flip(self.origin.y, self.size.y);
        Rect::new(x, y, w, h)
    }
}

fn flip(start: f32, len: f32) -> (f32, f32) {
    if len < 0.0 { (start + len, -len) } else { (start, len) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_keeps_positive_rects() {
        let r = Rect::new(1.0, 2.0, 10.0, 20.0);
        assert_eq!(r.normalized(), r);
    }

    #[test]
    fn normalized_flips_negative_extents() {
        let n = Rect::new(10.0, 10.0, -4.0, -3.0).normalized();
        assert_eq!(n, Rect::new(6.0, 7.0, 4.0, 3.0));
        assert_eq!(n.max(), Vec2::new(10.0, 10.0));
    }

    #[test]
    fn center_and_half_size() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.center(), Vec2::new(25.0, 40.0));
        assert_eq!(r.half_size(), Vec2::new(15.0, 20.0));
    }

    #[test]
    fn zero_extent_is_empty() {
        assert!(Rect::new(0.0, 0.0, 0.0, 5.0).is_empty());
        assert!(!Rect::new(0.0, 0.0, -1.0, 1.0).is_empty());
    }
}
