use crate::coords::Vec2;
use crate::paint::PackedColor;

/// Shape vertex as collected by the assembler and produced by the tessellators.
///
/// `tex_factor` selects between the flat color (0) and the sampled texture (1).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct TessVertex {
    pub pos: Vec2,
    pub uv: Vec2,
    pub color: PackedColor,
    pub tex_factor: f32,
}

impl TessVertex {
    #[inline]
    pub const fn new(pos: Vec2, uv: Vec2, color: PackedColor, tex_factor: f32) -> Self {
        Self { pos, uv, color, tex_factor }
    }

    /// Untextured vertex.
    #[inline]
    pub const fn flat(pos: Vec2, color: PackedColor) -> Self {
        Self::new(pos, Vec2::zero(), color, 0.0)
    }

    /// Builds the vertex synthesized at `pos` from weighted source vertices.
    ///
    /// Each color channel is a plain weighted average truncated to 8 bits; `uv` and
    /// `tex_factor` are weighted averages. Weights are normalized to sum to one.
    pub fn combine(pos: Vec2, sources: &[(TessVertex, f32)]) -> Self {
        let total: f32 = sources.iter().map(|(_, w)| *w).sum();
        if sources.is_empty() || total <= 0.0 {
            return Self::flat(pos, PackedColor::TRANSPARENT);
        }

        let mut channels = [0.0f32; 4];
        let mut uv = Vec2::zero();
        let mut tex_factor = 0.0;
        for (v, w) in sources {
            let w = *w / total;
            for (acc, c) in channels.iter_mut().zip(v.color.to_rgba8()) {
                *acc += w * c as f32;
            }
            uv += v.uv * w;
            tex_factor += v.tex_factor * w;
        }

        let [r, g, b, a] = channels.map(|c| c.clamp(0.0, 255.0) as u8);
        Self::new(pos, uv, PackedColor::from_rgba8(r, g, b, a), tex_factor)
    }
}

/// Triangle list produced for one primitive (fill or stroke).
///
/// Every three consecutive vertices form one triangle. The renderer appends a mesh to the
/// batch as a unit.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    vertices: Vec<TessVertex>,
}

impl Mesh {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.vertices.clear();
    }

    #[inline]
    pub fn vertices(&self) -> &[TessVertex] {
        &self.vertices
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    #[inline]
    pub fn push_triangle(&mut self, a: TessVertex, b: TessVertex, c: TessVertex) {
        self.vertices.extend_from_slice(&[a, b, c]);
    }

    /// Flat-colored triangle.
    #[inline]
    pub fn push_flat(&mut self, a: Vec2, b: Vec2, c: Vec2, color: PackedColor) {
        self.push_triangle(
            TessVertex::flat(a, color),
            TessVertex::flat(b, color),
            TessVertex::flat(c, color),
        );
    }

    /// Sum of absolute triangle areas.
    pub fn area(&self) -> f32 {
        self.vertices
            .chunks_exact(3)
            .map(|t| ((t[1].pos - t[0].pos).cross(t[2].pos - t[0].pos) * 0.5).abs())
            .sum()
    }
}
