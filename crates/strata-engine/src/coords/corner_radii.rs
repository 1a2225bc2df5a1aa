/// Per-corner radii for a rounded rectangle (logical pixels).
///
/// Corners follow CSS convention: top-left, top-right, bottom-right, bottom-left.
/// Zero means a sharp corner.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct CornerRadii {
    pub top_left: f32,
    pub top_right: f32,
    pub bottom_right: f32,
    pub bottom_left: f32,
}

impl CornerRadii {
    #[inline]
    pub const fn new(top_left: f32, top_right: f32, bottom_right: f32, bottom_left: f32) -> Self {
        Self { top_left, top_right, bottom_right, bottom_left }
    }

    /// Uniform radius on all four corners.
    #[inline]
    pub const fn all(r: f32) -> Self {
        Self { top_left: r, top_right: r, bottom_right: r, bottom_left: r }
    }

    /// No rounding.
    #[inline]
    pub const fn zero() -> Self {
        Self::all(0.0)
    }

    /// Clamps every radius into `[0, max]`.
    ///
    /// `max` is normally half of the shorter rectangle side so adjacent corners
    /// never overlap.
    #[inline]
    pub fn clamped(self, max: f32) -> Self {
        let max = max.max(0.0);
        Self {
            top_left: self.top_left.clamp(0.0, max),
            top_right: self.top_right.clamp(0.0, max),
            bottom_right: self.bottom_right.clamp(0.0, max),
            bottom_left: self.bottom_left.clamp(0.0, max),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamped_limits_each_corner() {
        let r = CornerRadii::new(-3.0, 5.0, 50.0, 10.0).clamped(10.0);
        assert_eq!(r, CornerRadii::new(0.0, 5.0, 10.0, 10.0));
    }
}
