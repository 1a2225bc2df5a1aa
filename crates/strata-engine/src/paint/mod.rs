//! Color representation shared between the tessellator, the batch buffer and backends.
//!
//! Vertices carry one packed straight-alpha color; blending is configured by the backend.

pub mod color;

pub use color::PackedColor;
