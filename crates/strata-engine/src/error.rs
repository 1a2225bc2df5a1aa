//! Error types surfaced by the renderer and its backends.
//!
//! Every failure is contained: a rejected shader leaves the previous one bound and a
//! failed tessellation drops only the shape being drawn.

use thiserror::Error;

/// Shader program failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShaderError {
    /// A stage source failed to parse.
    #[error("shader compilation failed ({stage}): {message}")]
    Compile { stage: &'static str, message: String },

    /// The stages do not form a usable program (missing entry points, unmatched varyings).
    #[error("shader link failed: {0}")]
    Link(String),

    /// A stage parsed but failed semantic validation.
    #[error("shader validation failed ({stage}): {message}")]
    Validate { stage: &'static str, message: String },

    /// The program lacks one or more bindings required by the 2D vertex layout.
    #[error("shader cannot be used for 2D rendering; missing bindings: {}", missing.join(", "))]
    Incompatible { missing: Vec<&'static str> },
}

/// Backend failures outside of shader compilation.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error(transparent)]
    Shader(#[from] ShaderError),

    /// The current render target cannot be read back.
    #[error("pixel readback is not supported for the current target: {0}")]
    UnsupportedReadback(&'static str),

    #[error("pixel writeback is not supported for the current target: {0}")]
    UnsupportedWriteback(&'static str),

    #[error("gpu operation failed: {0}")]
    Gpu(String),
}

/// Polygon tessellation failure for one shape.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("polygon tessellation failed: {0}")]
pub struct FillError(pub String);
