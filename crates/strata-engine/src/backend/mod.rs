//! GPU command and shader-compiler abstractions.
//!
//! The renderer talks to the GPU exclusively through [`GpuBackend`]. Two implementations
//! ship with the crate:
//! - [`WgpuBackend`] draws with wgpu into a texture (a window surface or an offscreen
//!   target)
//! - [`SoftwareBackend`] rasterizes on the CPU and records every call, which keeps the
//!   renderer testable without a GPU

mod software;
mod wgpu_backend;

pub use software::{DrawCall, SoftwareBackend, SoftwareProgram};
pub use wgpu_backend::{WgpuBackend, WgpuProgram};

use crate::error::{BackendError, ShaderError};
use crate::paint::PackedColor;
use crate::shader::{ShaderBindings, ShaderSource, UniformType};

/// Handle to a vertex buffer created by a backend.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct BufferId(pub u32);

/// Handle to a texture created by a backend.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// Image texture together with its pixel size (needed for `texScale`).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct TextureRef {
    pub id: TextureId,
    pub width: u32,
    pub height: u32,
}

impl TextureRef {
    /// `(1/width, 1/height)`: maps pixel uv coordinates to normalized ones.
    #[inline]
    pub fn tex_scale(&self) -> [f32; 2] {
        [1.0 / self.width.max(1) as f32, 1.0 / self.height.max(1) as f32]
    }
}

/// Depth comparison used for batched triangles.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum DepthTest {
    #[default]
    Less,
    LessEqual,
}

impl DepthTest {
    #[inline]
    pub fn passes(self, incoming: f32, stored: f32) -> bool {
        match self {
            DepthTest::Less => incoming < stored,
            DepthTest::LessEqual => incoming <= stored,
        }
    }
}

/// Per-draw uniform values.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Uniforms {
    /// Column-major transform applied to vertex positions.
    pub transform: [f32; 16],
    pub tex_scale: [f32; 2],
}

impl Default for Uniforms {
    fn default() -> Self {
        Self {
            transform: crate::coords::Affine2::IDENTITY.to_mat4(),
            tex_scale: [1.0, 1.0],
        }
    }
}

/// Attribute and uniform lookup on a compiled program.
pub trait ShaderProgram {
    /// Location of a vertex input, or `None` if the program has no such attribute.
    fn attribute_location(&self, name: &str) -> Option<u32>;

    /// Binding index of a uniform, or `None` if the program has no such uniform.
    fn uniform_location(&self, name: &str) -> Option<u32>;

    /// Reflected type of a uniform.
    fn uniform_type(&self, name: &str) -> Option<UniformType>;
}

/// Turns shader sources into programs.
pub trait ShaderCompiler {
    type Program: ShaderProgram + Clone;

    fn compile(&mut self, source: &ShaderSource) -> Result<Self::Program, ShaderError>;
}

/// GPU command surface consumed by the renderer.
///
/// Calls arrive in flush order: upload, bind program, bind texture, draw, unbind.
pub trait GpuBackend: ShaderCompiler {
    /// Creates a vertex buffer of `size` bytes.
    fn create_buffer(&mut self, size: u64) -> BufferId;

    /// Replaces the contents of `buffer` starting at offset 0.
    fn upload_buffer_data(&mut self, buffer: BufferId, bytes: &[u8]);

    fn bind_program(&mut self, program: &Self::Program, bindings: &ShaderBindings, uniforms: &Uniforms);

    fn unbind_program(&mut self);

    /// Binds the image texture for subsequent draws; `None` binds a white texel.
    fn bind_texture(&mut self, texture: Option<TextureId>);

    fn set_depth_test(&mut self, test: DepthTest);

    /// Draws `vertex_count` vertices from `buffer` as a triangle list.
    fn draw_triangles(&mut self, buffer: BufferId, vertex_count: u32);

    fn clear_depth_buffer(&mut self);

    fn clear(&mut self, color: PackedColor);

    /// Uploads an RGBA8 image.
    fn create_texture(&mut self, width: u32, height: u32, rgba: &[u8]) -> Result<TextureRef, BackendError>;

    /// Size of the current render target in physical pixels.
    fn target_size(&self) -> (u32, u32);

    /// RGBA8 contents of the render target, row-major, top row first.
    fn read_pixels(&mut self) -> Result<Vec<u8>, BackendError>;

    /// Replaces the render target with `rgba`, laid out like [`GpuBackend::read_pixels`].
    fn write_pixels(&mut self, rgba: &[u8]) -> Result<(), BackendError>;
}
