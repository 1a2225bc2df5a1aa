use super::{Vec2, Viewport};

/// 2D affine transform (column-vector convention).
///
/// Matrix:
/// [ a c tx ]
/// [ b d ty ]
/// [ 0 0  1 ]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Affine2 {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub tx: f32,
    pub ty: f32,
}

impl Default for Affine2 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Affine2 {
    pub const IDENTITY: Self = Self {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        tx: 0.0,
        ty: 0.0,
    };

    #[inline]
    pub const fn new(a: f32, b: f32, c: f32, d: f32, tx: f32, ty: f32) -> Self {
        Self { a, b, c, d, tx, ty }
    }

    #[inline]
    pub const fn translation(tx: f32, ty: f32) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    #[inline]
    pub const fn scaling(sx: f32, sy: f32) -> Self {
        Self::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    #[inline]
    pub fn rotation(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::new(c, s, -s, c, 0.0, 0.0)
    }

    #[inline]
    pub fn shear_x(angle: f32) -> Self {
        Self::new(1.0, 0.0, angle.tan(), 1.0, 0.0, 0.0)
    }

    #[inline]
    pub fn shear_y(angle: f32) -> Self {
        Self::new(1.0, angle.tan(), 0.0, 1.0, 0.0, 0.0)
    }

    /// Maps logical pixels (top-left origin, +Y down) to NDC (+Y up).
    #[inline]
    pub fn pixel_to_ndc(viewport: Viewport) -> Self {
        let w = viewport.width.max(1.0);
        let h = viewport.height.max(1.0);
        Self::new(2.0 / w, 0.0, 0.0, -2.0 / h, -1.0, 1.0)
    }

    /// Returns `self * rhs`: `rhs` is applied first.
    #[inline]
    pub fn then_apply(self, rhs: Affine2) -> Affine2 {
        Affine2 {
            a: self.a * rhs.a + self.c * rhs.b,
            b: self.b * rhs.a + self.d * rhs.b,
            c: self.a * rhs.c + self.c * rhs.d,
            d: self.b * rhs.c + self.d * rhs.d,
            tx: self.a * rhs.tx + self.c * rhs.ty + self.tx,
            ty: self.b * rhs.tx + self.d * rhs.ty + self.ty,
        }
    }

    #[inline]
    pub fn transform_point(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            self.a * p.x + self.c * p.y + self.tx,
            self.b * p.x + self.d * p.y + self.ty,
        )
    }

    /// Column-major 4x4 matrix, as expected by WGSL `mat4x4<f32>` uniforms.
    pub fn to_mat4(&self) -> [f32; 16] {
        [
            self.a, self.b, 0.0, 0.0, //
            self.c, self.d, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            self.tx, self.ty, 0.0, 1.0,
        ]
    }

    /// Larger of the two basis-vector magnitudes of the linear part.
    #[inline]
    pub fn max_axis_scale(&self) -> f32 {
        let i = Vec2::new(self.a, self.b).length();
        let j = Vec2::new(self.c, self.d).length();
        i.max(j)
    }
}
