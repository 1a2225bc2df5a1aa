use core::f32::consts::FRAC_PI_4;

use crate::coords::{Affine2, Viewport};

/// Upper bound on segments for a single arc.
pub const MAX_ARC_SEGMENTS: u32 = 127;

/// Segment count for circular geometry (round joins, round caps, ellipses, arcs).
///
/// `scale` approximates the on-screen magnification of the active transform so that
/// zoomed-in circles stay smooth and zoomed-out ones stay cheap.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ArcDetail {
    scale: f32,
}

impl Default for ArcDetail {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

impl ArcDetail {
    #[inline]
    pub const fn with_scale(scale: f32) -> Self {
        Self { scale }
    }

    /// Detail for the full transform (projection included) drawing into `viewport`.
    ///
    /// The projection's NDC basis vectors are converted back to pixels, so this measures
    /// how much the model-space unit is magnified on screen.
    pub fn from_transform(projmodelview: &Affine2, viewport: Viewport) -> Self {
        let half_w = viewport.width * 0.5;
        let half_h = viewport.height * 0.5;
        let on_screen = Affine2::new(
            projmodelview.a * half_w,
            projmodelview.b * half_h,
            projmodelview.c * half_w,
            projmodelview.d * half_h,
            0.0,
            0.0,
        );
        Self { scale: on_screen.max_axis_scale() }
    }

    #[inline]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Number of segments approximating an arc of `radius` sweeping `sweep` radians.
    ///
    /// `clamp(1, 127, floor(sqrt(radius * scale) / (pi/4) * |sweep| * 0.75) + 1)`.
    pub fn segments(&self, radius: f32, sweep: f32) -> u32 {
        let r = radius * self.scale;
        let n = (r.sqrt() / FRAC_PI_4 * sweep.abs() * 0.75).floor();
        // NaN (negative radius) casts to 0.
        let n = n as i64 + 1;
        n.clamp(1, MAX_ARC_SEGMENTS as i64) as u32
    }
}
