//! Coordinate and geometry types shared across the tessellator and renderer.
//!
//! Canonical CPU space:
//! - Logical pixels
//! - Origin top-left
//! - +X right, +Y down
//!
//! The renderer converts to NDC through the active transform (see `Affine2::pixel_to_ndc`).

mod affine;
mod corner_radii;
mod rect;
mod vec2;
mod viewport;

pub use affine::Affine2;
pub use corner_radii::CornerRadii;
pub use rect::Rect;
pub use vec2::Vec2;
pub use viewport::Viewport;
