//! Shader programs for 2D batches.
//!
//! Programs are written in WGSL. Both backends reflect them through naga, so attribute
//! and uniform lookups behave identically with and without a GPU.

mod binding;
mod reflect;
mod source;

pub use binding::ShaderBindings;
pub use reflect::{parse_stage, ProgramInterface, UniformSlot, UniformType};
pub use source::{ShaderSource, DEFAULT_FRAGMENT, DEFAULT_VERTEX, TEXTURE_GROUP, UNIFORM_GROUP};
