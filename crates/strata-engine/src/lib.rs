//! Strata engine crate.
//!
//! An immediate-mode 2D vector renderer: shapes are assembled and tessellated on the CPU,
//! batched into depth-layered triangle lists and drawn through a pluggable GPU backend.

pub mod backend;
pub mod batch;
pub mod coords;
pub mod device;
pub mod error;
pub mod logging;
pub mod paint;
pub mod render;
pub mod shader;
pub mod tess;
