use std::borrow::Cow;

/// WGSL sources of one shader program: a vertex module and a fragment module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSource {
    pub vertex: Cow<'static, str>,
    pub fragment: Cow<'static, str>,
}

impl ShaderSource {
    pub fn new(vertex: impl Into<Cow<'static, str>>, fragment: impl Into<Cow<'static, str>>) -> Self {
        Self {
            vertex: vertex.into(),
            fragment: fragment.into(),
        }
    }

    /// The bundled program compatible with the fixed 2D vertex layout.
    pub fn default_2d() -> Self {
        Self::new(DEFAULT_VERTEX, DEFAULT_FRAGMENT)
    }
}

/// Bind group holding the `transform` and `texScale` uniforms.
pub const UNIFORM_GROUP: u32 = 0;
/// Bind group holding the image texture (binding 0) and its sampler (binding 1).
pub const TEXTURE_GROUP: u32 = 1;

pub const DEFAULT_VERTEX: &str = include_str!("shaders/default_vert.wgsl");
pub const DEFAULT_FRAGMENT: &str = include_str!("shaders/default_frag.wgsl");
