//! CPU-side geometry: shape assembly, fill triangulation and stroke generation.
//!
//! Everything here works in model space and produces flat triangle lists ([`Mesh`]).
//! Nothing touches the GPU.

pub mod curve;
pub mod detail;
pub mod fill;
pub mod shape;
pub mod stroke;
pub mod vertex;

pub use curve::CurveStepper;
pub use detail::{ArcDetail, MAX_ARC_SEGMENTS};
pub use fill::FillTessellator;
pub use shape::{EndMode, Shape, ShapeAssembler, ShapeKind};
pub use stroke::{StrokeCap, StrokeJoin, StrokeStyle, Stroker, THIN_STROKE_LIMIT};
pub use vertex::{Mesh, TessVertex};
