//! Fixed primitives built on the shape API.

use core::f32::consts::TAU;

use crate::backend::GpuBackend;
use crate::coords::{CornerRadii, Rect, Vec2};
use crate::tess::{EndMode, ShapeKind, Stroker};

use super::renderer::Renderer;

/// Outline style of [`Renderer::arc`].
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum ArcMode {
    /// Filled as a pie, stroked along the curve only.
    #[default]
    OpenPie,
    /// Curve only; the fill closes straight across.
    Open,
    /// Closed with a straight chord.
    Chord,
    /// Closed through the center.
    Pie,
}

impl<B: GpuBackend> Renderer<B> {
    /// One stroked segment. Nothing is drawn while stroking is disabled.
    pub fn line(&mut self, a: Vec2, b: Vec2) {
        let Some(style) = self.style().stroke_style() else {
            return;
        };
        self.draw_mesh(|r, mesh| Stroker::new(style, r.arc_detail()).single_line(a, b, mesh));
        self.end_primitive();
    }

    /// A stroke-colored dot of the stroke weight. Nothing is drawn while stroking is disabled.
    pub fn point(&mut self, p: Vec2) {
        let Some(style) = self.style().stroke_style() else {
            return;
        };
        self.draw_mesh(|r, mesh| Stroker::new(style, r.arc_detail()).single_point(p, mesh));
        self.end_primitive();
    }

    pub fn triangle(&mut self, a: Vec2, b: Vec2, c: Vec2) {
        self.begin_shape(ShapeKind::Triangles);
        for p in [a, b, c] {
            self.vertex(p);
        }
        self.end_shape(EndMode::Open);
    }

    pub fn quad(&mut self, a: Vec2, b: Vec2, c: Vec2, d: Vec2) {
        self.begin_shape(ShapeKind::Quads);
        for p in [a, b, c, d] {
            self.vertex(p);
        }
        self.end_shape(EndMode::Open);
    }

    /// Axis-aligned rectangle with optional rounded corners.
    ///
    /// Radii are clamped to half the shorter side; each rounded corner is one quadratic
    /// segment.
    pub fn rect(&mut self, rect: Rect, radii: CornerRadii) {
        let rect = rect.normalized();
        let (min, max) = (rect.min(), rect.max());
        let (x1, y1, x2, y2) = (min.x, min.y, max.x, max.y);
        let r = radii.clamped(rect.size.x.min(rect.size.y) * 0.5);

        self.begin_shape(ShapeKind::Polygon);

        if r.top_right > 0.0 {
            self.vertex(Vec2::new(x2 - r.top_right, y1));
            self.quadratic_vertex(Vec2::new(x2, y1), Vec2::new(x2, y1 + r.top_right));
        } else {
            self.vertex(Vec2::new(x2, y1));
        }

        if r.bottom_right > 0.0 {
            self.vertex(Vec2::new(x2, y2 - r.bottom_right));
            self.quadratic_vertex(Vec2::new(x2, y2), Vec2::new(x2 - r.bottom_right, y2));
        } else {
            self.vertex(Vec2::new(x2, y2));
        }

        if r.bottom_left > 0.0 {
            self.vertex(Vec2::new(x1 + r.bottom_left, y2));
            self.quadratic_vertex(Vec2::new(x1, y2), Vec2::new(x1, y2 - r.bottom_left));
        } else {
            self.vertex(Vec2::new(x1, y2));
        }

        if r.top_left > 0.0 {
            self.vertex(Vec2::new(x1, y1 + r.top_left));
            self.quadratic_vertex(Vec2::new(x1, y1), Vec2::new(x1 + r.top_left, y1));
        } else {
            self.vertex(Vec2::new(x1, y1));
        }

        self.mark_convex();
        self.end_shape(EndMode::Close);
    }

    /// Ellipse inscribed in `bounds`.
    pub fn ellipse(&mut self, bounds: Rect) {
        let bounds = bounds.normalized();
        let c = bounds.center();
        let radius = bounds.half_size();

        let stroke_extra = if self.style().stroke.is_some() { self.style().weight } else { 0.0 };
        let segments = self
            .arc_detail()
            .segments(radius.x.max(radius.y) + stroke_extra, TAU);
        let step = TAU / segments as f32;

        self.begin_shape(ShapeKind::Polygon);
        let mut angle = 0.0f32;
        for _ in 0..segments {
            angle += step;
            self.vertex(Vec2::new(c.x + angle.sin() * radius.x, c.y + angle.cos() * radius.y));
        }
        self.mark_convex();
        self.end_shape(EndMode::Close);
    }

    /// Elliptical arc in `bounds` from `start` to `stop` (radians, clockwise on screen).
    ///
    /// `stop < start` or a non-finite angle draws nothing. Sweeps longer than a full turn
    /// draw the whole ellipse.
    pub fn arc(&mut self, bounds: Rect, mut start: f32, mut stop: f32, mode: ArcMode) {
        if !start.is_finite() || !stop.is_finite() || stop < start {
            return;
        }
        let shift = start.rem_euclid(TAU) - start;
        start += shift;
        stop += shift;
        if stop - start > TAU {
            start = 0.0;
            stop = TAU;
        }

        let bounds = bounds.normalized();
        let c = bounds.center();
        let radius = bounds.half_size();
        let sweep = stop - start;
        let segments = self.arc_detail().segments(radius.x.max(radius.y), sweep);
        let step = sweep / segments as f32;

        self.begin_shape(ShapeKind::Polygon);
        if matches!(mode, ArcMode::OpenPie | ArcMode::Pie) {
            self.vertex(c);
        }
        if mode == ArcMode::OpenPie {
            // the center only anchors the fill; the stroke starts on the curve
            self.begin_contour();
        }
        let mut angle = start;
        for _ in 0..=segments {
            self.vertex(Vec2::new(c.x + angle.cos() * radius.x, c.y + angle.sin() * radius.y));
            angle += step;
        }
        self.mark_convex();

        let end = match mode {
            ArcMode::Chord | ArcMode::Pie => EndMode::Close,
            ArcMode::Open | ArcMode::OpenPie => EndMode::Open,
        };
        self.end_shape(end);
    }
}

#[cfg(test)]
mod tests {
    use core::f32::consts::{FRAC_PI_2, PI};

    use crate::backend::SoftwareBackend;
    use crate::coords::Viewport;
    use crate::paint::PackedColor;
    use crate::render::RendererConfig;

    use super::*;

    const RED: PackedColor = PackedColor::rgb(255, 0, 0);
    const WHITE: [u8; 4] = [255, 255, 255, 255];
    const EMPTY: [u8; 4] = [0, 0, 0, 0];

    fn renderer() -> Renderer<SoftwareBackend> {
        let config = RendererConfig {
            viewport: Viewport::new(64.0, 64.0),
            ..RendererConfig::default()
        };
        let mut r = Renderer::new(SoftwareBackend::new(64, 64), config);
        r.begin_draw();
        r
    }

    fn fill_only() -> Renderer<SoftwareBackend> {
        let mut r = renderer();
        r.no_stroke();
        r
    }

    #[test]
    fn line_and_point_need_a_stroke() {
        let mut r = renderer();
        r.no_stroke();
        r.line(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        r.point(Vec2::new(5.0, 5.0));
        assert_eq!(r.pending_vertices(), 0);

        r.stroke(RED);
        r.stroke_weight(4.0);
        r.line(Vec2::new(2.0, 32.0), Vec2::new(60.0, 32.0));
        r.point(Vec2::new(10.0, 10.0));
        r.end_draw();
        assert_eq!(r.backend().pixel(30, 32), [255, 0, 0, 255]);
        assert_eq!(r.backend().pixel(10, 10), [255, 0, 0, 255]);
        assert_eq!(r.backend().pixel(30, 20), EMPTY);
    }

    #[test]
    fn triangle_covers_its_interior() {
        let mut r = fill_only();
        r.triangle(Vec2::new(0.0, 0.0), Vec2::new(40.0, 0.0), Vec2::new(0.0, 40.0));
        r.end_draw();
        assert_eq!(r.backend().pixel(5, 5), WHITE);
        assert_eq!(r.backend().pixel(35, 35), EMPTY);
    }

    #[test]
    fn quad_is_two_triangles() {
        let mut r = fill_only();
        r.quad(
            Vec2::new(10.0, 10.0),
            Vec2::new(30.0, 10.0),
            Vec2::new(30.0, 30.0),
            Vec2::new(10.0, 30.0),
        );
        assert_eq!(r.pending_vertices(), 6);
    }

    #[test]
    fn rect_accepts_negative_size() {
        let mut r = fill_only();
        r.rect(Rect::new(40.0, 40.0, -20.0, -20.0), CornerRadii::zero());
        r.end_draw();
        assert_eq!(r.backend().pixel(30, 30), WHITE);
        assert_eq!(r.backend().pixel(45, 45), EMPTY);
    }

    #[test]
    fn rounded_rect_cuts_its_corners() {
        let mut r = fill_only();
        r.rect(Rect::new(0.0, 0.0, 40.0, 40.0), CornerRadii::all(12.0));
        r.end_draw();
        assert_eq!(r.backend().pixel(0, 0), EMPTY);
        assert_eq!(r.backend().pixel(39, 39), EMPTY);
        assert_eq!(r.backend().pixel(20, 0), WHITE);
        assert_eq!(r.backend().pixel(20, 20), WHITE);
    }

    #[test]
    fn oversized_radii_are_clamped() {
        let mut r = fill_only();
        r.rect(Rect::new(0.0, 0.0, 40.0, 20.0), CornerRadii::all(100.0));
        r.end_draw();
        // a stadium: the middle is solid, the corners are empty
        assert_eq!(r.backend().pixel(20, 10), WHITE);
        assert_eq!(r.backend().pixel(1, 1), EMPTY);
    }

    #[test]
    fn ellipse_stays_inside_its_bounds() {
        let mut r = fill_only();
        r.ellipse(Rect::new(12.0, 22.0, 40.0, 20.0));
        r.end_draw();
        assert_eq!(r.backend().pixel(32, 32), WHITE);
        assert_eq!(r.backend().pixel(14, 32), WHITE);
        assert_eq!(r.backend().pixel(13, 23), EMPTY);
        assert_eq!(r.backend().pixel(32, 20), EMPTY);
    }

    #[test]
    fn quarter_pie_fills_one_quadrant() {
        let mut r = fill_only();
        r.arc(Rect::new(0.0, 0.0, 64.0, 64.0), 0.0, FRAC_PI_2, ArcMode::Pie);
        r.end_draw();
        // y grows downward, so 0..pi/2 is the lower-right quadrant
        assert_eq!(r.backend().pixel(40, 40), WHITE);
        assert_eq!(r.backend().pixel(20, 20), EMPTY);
        assert_eq!(r.backend().pixel(40, 20), EMPTY);
    }

    #[test]
    fn chord_leaves_the_center_empty() {
        let mut r = fill_only();
        r.arc(Rect::new(0.0, 0.0, 64.0, 64.0), 0.0, PI, ArcMode::Chord);
        r.end_draw();
        assert_eq!(r.backend().pixel(32, 50), WHITE);
        assert_eq!(r.backend().pixel(32, 20), EMPTY);
    }

    #[test]
    fn reversed_arc_draws_nothing() {
        let mut r = renderer();
        r.arc(Rect::new(0.0, 0.0, 64.0, 64.0), PI, 0.0, ArcMode::Pie);
        assert_eq!(r.pending_vertices(), 0);
    }

    #[test]
    fn negative_start_is_normalized() {
        let mut r = fill_only();
        r.arc(Rect::new(0.0, 0.0, 64.0, 64.0), -FRAC_PI_2, 0.0, ArcMode::Pie);
        r.end_draw();
        assert_eq!(r.backend().pixel(40, 20), WHITE);
        assert_eq!(r.backend().pixel(40, 40), EMPTY);
    }

    #[test]
    fn huge_negative_start_is_shifted_in_one_step() {
        let mut r = fill_only();
        r.arc(Rect::new(0.0, 0.0, 64.0, 64.0), -2.0e8, -2.0e8 + 1.0, ArcMode::Pie);
        r.arc(Rect::new(0.0, 0.0, 64.0, 64.0), -2.0e8 - 8.0, 0.0, ArcMode::Pie);
        r.end_draw();
        assert_eq!(r.backend().pixel(32, 32), WHITE);
    }

    #[test]
    fn non_finite_angles_draw_nothing() {
        let mut r = renderer();
        let bounds = Rect::new(0.0, 0.0, 64.0, 64.0);
        r.arc(bounds, f32::NEG_INFINITY, 0.0, ArcMode::Pie);
        r.arc(bounds, 0.0, f32::INFINITY, ArcMode::Pie);
        r.arc(bounds, f32::NAN, PI, ArcMode::Chord);
        r.arc(bounds, 0.0, f32::NAN, ArcMode::Open);
        assert_eq!(r.pending_vertices(), 0);
    }

    #[test]
    fn open_pie_strokes_only_the_curve() {
        let mut r = renderer();
        r.no_fill();
        r.stroke(RED);
        r.stroke_weight(2.0);
        r.arc(Rect::new(0.0, 0.0, 64.0, 64.0), 0.0, FRAC_PI_2, ArcMode::OpenPie);
        r.end_draw();
        // no radius is stroked from the center to the start of the curve
        assert_eq!(r.backend().pixel(48, 32), EMPTY);

        let mut r = renderer();
        r.no_fill();
        r.stroke(RED);
        r.stroke_weight(2.0);
        r.arc(Rect::new(0.0, 0.0, 64.0, 64.0), 0.0, FRAC_PI_2, ArcMode::Pie);
        r.end_draw();
        assert_eq!(r.backend().pixel(48, 32), [255, 0, 0, 255]);
    }
}
