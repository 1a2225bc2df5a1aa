use bytemuck::{Pod, Zeroable};

use crate::coords::Vec2;
use crate::paint::PackedColor;

/// Vertex record as uploaded to the GPU.
///
/// Seven 4-byte slots: `[x, y, depth, u, v, color, tex_factor]`. The color slot holds the
/// packed RGBA bytes unchanged and is read as `Unorm8x4`.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct GpuVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
    pub color: u32,
    pub tex_factor: f32,
}

impl GpuVertex {
    /// Number of 4-byte slots per vertex.
    pub const SLOTS: usize = 7;
    pub const STRIDE: u64 = (Self::SLOTS * 4) as u64;

    pub const POSITION_OFFSET: u64 = 0;
    pub const UV_OFFSET: u64 = 12;
    pub const COLOR_OFFSET: u64 = 20;
    pub const TEX_FACTOR_OFFSET: u64 = 24;

    #[inline]
    pub fn new(pos: Vec2, depth: f32, uv: Vec2, color: PackedColor, tex_factor: f32) -> Self {
        Self {
            position: [pos.x, pos.y, depth],
            uv: [uv.x, uv.y],
            color: color.0,
            tex_factor,
        }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.position[0], self.position[1])
    }

    #[inline]
    pub fn depth(&self) -> f32 {
        self.position[2]
    }

    #[inline]
    pub fn packed_color(&self) -> PackedColor {
        PackedColor(self.color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_seven_slots() {
        assert_eq!(std::mem::size_of::<GpuVertex>() as u64, GpuVertex::STRIDE);
        assert_eq!(std::mem::offset_of!(GpuVertex, uv) as u64, GpuVertex::UV_OFFSET);
        assert_eq!(std::mem::offset_of!(GpuVertex, color) as u64, GpuVertex::COLOR_OFFSET);
        assert_eq!(std::mem::offset_of!(GpuVertex, tex_factor) as u64, GpuVertex::TEX_FACTOR_OFFSET);
    }

    #[test]
    fn color_bytes_are_stored_verbatim() {
        let c = PackedColor::from_rgba8(1, 2, 3, 4);
        let v = GpuVertex::new(Vec2::zero(), 0.5, Vec2::zero(), c, 0.0);
        let bytes: &[u8] = bytemuck::bytes_of(&v);
        assert_eq!(&bytes[20..24], &[1, 2, 3, 4]);
        assert_eq!(v.packed_color(), c);
    }
}
