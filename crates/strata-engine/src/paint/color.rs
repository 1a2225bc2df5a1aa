/// Straight-alpha RGBA color packed into 32 bits.
///
/// Invariant:
/// - memory byte order is `[r, g, b, a]`, so the value can be handed to the GPU as a
///   `Unorm8x4` vertex attribute without swizzling.
///
/// The packed value occupies one 4-byte float slot of the vertex record.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct PackedColor(pub u32);

impl PackedColor {
    pub const TRANSPARENT: Self = Self::from_rgba8(0, 0, 0, 0);
    pub const BLACK: Self = Self::from_rgba8(0, 0, 0, 255);
    pub const WHITE: Self = Self::from_rgba8(255, 255, 255, 255);

    #[inline]
    pub const fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(u32::from_le_bytes([r, g, b, a]))
    }

    /// Opaque color from sRGB bytes.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgba8(r, g, b, 255)
    }

    /// Creates a color from straight `f32` components in `[0, 1]`.
    #[inline]
    pub fn from_straight(r: f32, g: f32, b: f32, a: f32) -> Self {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::from_rgba8(q(r), q(g), q(b), q(a))
    }

    #[inline]
    pub const fn to_rgba8(self) -> [u8; 4] {
        self.0.to_le_bytes()
    }

    #[inline]
    pub const fn r(self) -> u8 {
        self.to_rgba8()[0]
    }

    #[inline]
    pub const fn g(self) -> u8 {
        self.to_rgba8()[1]
    }

    #[inline]
    pub const fn b(self) -> u8 {
        self.to_rgba8()[2]
    }

    #[inline]
    pub const fn a(self) -> u8 {
        self.to_rgba8()[3]
    }

    /// Straight `f32` components in `[0, 1]`.
    #[inline]
    pub fn to_f32(self) -> [f32; 4] {
        self.to_rgba8().map(|c| c as f32 / 255.0)
    }

    #[inline]
    pub const fn is_opaque(self) -> bool {
        self.a() == 255
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_are_stored_in_rgba_order() {
        let c = PackedColor::from_rgba8(1, 2, 3, 4);
        assert_eq!(c.to_rgba8(), [1, 2, 3, 4]);
        assert_eq!(bytemuck::bytes_of(&c.0), &[1, 2, 3, 4]);
    }

    #[test]
    fn from_straight_clamps_and_rounds() {
        let c = PackedColor::from_straight(2.0, 0.5, -1.0, 1.0);
        assert_eq!(c.to_rgba8(), [255, 128, 0, 255]);
    }
}
