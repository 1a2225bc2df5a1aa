use crate::coords::Viewport;

/// How primitives are handed to the GPU. Chosen once per renderer.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum SubmitMode {
    /// Accumulate primitives and draw on capacity or state-change boundaries.
    #[default]
    Batched,
    /// Draw after every primitive, with a `LessEqual` depth test.
    Immediate,
}

/// Construction-time renderer settings.
#[derive(Debug, Clone, PartialEq)]
pub struct RendererConfig {
    /// Transform vertices on the CPU as they are emitted.
    ///
    /// When `false` the transform is uploaded as a uniform per batch and every transform
    /// change flushes pending geometry.
    pub premultiply_matrices: bool,

    /// Batch size in vertices. Rounded down to a multiple of 3 (minimum 3).
    pub batch_capacity: usize,

    /// Depth decrement per primitive.
    pub depth_step: f32,

    /// Lowest usable depth; crossing it flushes and clears the depth buffer.
    pub depth_floor: f32,

    /// Segments per `bezier_vertex` / `quadratic_vertex` call.
    pub bezier_detail: u32,

    /// Segments per `curve_vertex` span.
    pub curve_detail: u32,

    /// Catmull-Rom tightness (0 is the standard spline).
    pub curve_tightness: f32,

    pub submit: SubmitMode,

    /// Initial logical viewport.
    pub viewport: Viewport,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            premultiply_matrices: true,
            batch_capacity: 6000,
            depth_step: 1.0e-6,
            depth_floor: -1.0,
            bezier_detail: 20,
            curve_detail: 20,
            curve_tightness: 0.0,
            submit: SubmitMode::Batched,
            viewport: Viewport::default(),
        }
    }
}
