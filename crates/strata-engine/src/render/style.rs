use crate::paint::PackedColor;
use crate::tess::{StrokeCap, StrokeJoin, StrokeStyle};

/// Drawing state applied to subsequent primitives.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Style {
    /// `None` disables filling.
    pub fill: Option<PackedColor>,
    /// `None` disables stroking.
    pub stroke: Option<PackedColor>,
    /// Full stroke width; geometry uses half of it.
    pub weight: f32,
    pub join: StrokeJoin,
    pub cap: StrokeCap,
    /// Color multiplied into textured vertices; `None` means opaque white.
    pub tint: Option<PackedColor>,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fill: Some(PackedColor::WHITE),
            stroke: Some(PackedColor::BLACK),
            weight: 1.0,
            join: StrokeJoin::Miter,
            cap: StrokeCap::Round,
            tint: None,
        }
    }
}

impl Style {
    /// Stroke parameters, or `None` when stroking is disabled.
    pub fn stroke_style(&self) -> Option<StrokeStyle> {
        self.stroke.map(|color| StrokeStyle {
            weight: self.weight,
            join: self.join,
            cap: self.cap,
            color,
        })
    }

    #[inline]
    pub fn fill_color(&self) -> PackedColor {
        self.fill.unwrap_or(PackedColor::TRANSPARENT)
    }

    #[inline]
    pub fn tint_color(&self) -> PackedColor {
        self.tint.unwrap_or(PackedColor::WHITE)
    }
}
