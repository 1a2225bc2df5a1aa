//! Immediate-mode drawing front end.
//!
//! [`Renderer`] owns the style state, the transform stack, the vertex batch and the depth
//! allocator, and drives a [`GpuBackend`](crate::backend::GpuBackend).
//!
//! Convention:
//! - Coordinates are logical pixels (top-left origin, +Y down).
//! - Each fill or stroke takes one depth layer, so later primitives cover earlier ones
//!   within a batch without sorting.

mod config;
mod primitives;
mod renderer;
mod strategy;
mod style;

pub use config::{RendererConfig, SubmitMode};
pub use primitives::ArcMode;
pub use renderer::Renderer;
pub use strategy::{Batched, Immediate, SubmitStrategy};
pub use style::Style;

pub use crate::tess::{EndMode, ShapeKind, StrokeCap, StrokeJoin};
