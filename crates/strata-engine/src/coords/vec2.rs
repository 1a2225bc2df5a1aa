use core::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

/// 2D vector in logical pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    #[inline]
    pub fn dot(self, rhs: Vec2) -> f32 {
        self.x * rhs.x + self.y * rhs.y
    }

    /// z component of the 3D cross product.
    #[inline]
    pub fn cross(self, rhs: Vec2) -> f32 {
        self.x * rhs.y - self.y * rhs.x
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Vector of length `r` pointing at `angle`, measured from +Y towards +X.
    ///
    /// Stroke geometry measures leg directions with `atan2(dx, dy)`; this is the
    /// matching inverse.
    #[inline]
    pub fn from_angle(angle: f32, r: f32) -> Self {
        Self::new(angle.sin() * r, angle.cos() * r)
    }

    /// Angle of this vector measured from +Y towards +X (inverse of [`from_angle`]).
    ///
    /// [`from_angle`]: Self::from_angle
    #[inline]
    pub fn angle(self) -> f32 {
        self.x.atan2(self.y)
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    #[inline]
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    #[inline]
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    #[inline]
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Vec2 {
    #[inline]
    fn sub_assign(&mut self, rhs: Vec2) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Neg for Vec2 {
    type Output = Vec2;
    #[inline]
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f32> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn div(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x / rhs, self.y / rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn angle_round_trips_through_from_angle() {
        let v = Vec2::new(3.0, -4.0);
        let back = Vec2::from_angle(v.angle(), v.length());
        assert!((back.x - v.x).abs() < 1e-5);
        assert!((back.y - v.y).abs() < 1e-5);
    }

    #[test]
    fn angle_is_measured_from_positive_y() {
        assert_eq!(Vec2::new(0.0, 1.0).angle(), 0.0);
        assert!((Vec2::new(1.0, 0.0).angle() - core::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn cross_sign_follows_turn_direction() {
        let a = Vec2::new(1.0, 0.0);
        assert!(a.cross(Vec2::new(0.0, 1.0)) > 0.0);
        assert!(a.cross(Vec2::new(0.0, -1.0)) < 0.0);
    }
}
