//! Shape assembly: collects the vertices and contour boundaries of one begin/end cycle.

use crate::coords::Vec2;
use crate::paint::PackedColor;

use super::curve::{elevate_quadratic, CurveStepper};
use super::vertex::TessVertex;

/// Primitive topology requested by `begin_shape`.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// Arbitrary (possibly concave, multi-contour) polygon.
    #[default]
    Polygon,
    Points,
    Lines,
    Triangles,
    TriangleStrip,
    TriangleFan,
    Quads,
    QuadStrip,
}

/// How `end_shape` treats the outline.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum EndMode {
    #[default]
    Open,
    Close,
}

/// A finished shape: vertices, contour starts, kind and the convexity hint.
///
/// Invariants:
/// - no two vertices share an identical position
/// - contour starts are strictly increasing and lie in `1..vertices.len()`
#[derive(Debug, Clone, Default)]
pub struct Shape {
    kind: ShapeKind,
    vertices: Vec<TessVertex>,
    contour_starts: Vec<usize>,
    known_convex: bool,
}

impl Shape {
    #[inline]
    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    #[inline]
    pub fn vertices(&self) -> &[TessVertex] {
        &self.vertices
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Set by primitives that are constructed convex (ellipse, rounded rect, arc).
    #[inline]
    pub fn is_known_convex(&self) -> bool {
        self.known_convex
    }

    /// Indices at which a new contour begins (the implicit first contour at 0 excluded).
    #[inline]
    pub fn contour_starts(&self) -> &[usize] {
        &self.contour_starts
    }

    /// Non-empty contours in order.
    pub fn contours(&self) -> impl Iterator<Item = &[TessVertex]> + '_ {
        let n = self.vertices.len();
        let bounds = core::iter::once(0)
            .chain(self.contour_starts.iter().copied().filter(move |&s| s < n))
            .chain(core::iter::once(n));
        let mut prev = None;
        bounds.filter_map(move |b| {
            let start = prev.replace(b)?;
            (b > start).then(|| &self.vertices[start..b])
        })
    }

    fn reset(&mut self, kind: ShapeKind) {
        self.kind = kind;
        self.vertices.clear();
        self.contour_starts.clear();
        self.known_convex = false;
    }
}

/// Builds one [`Shape`] per begin/end cycle.
///
/// Storage is reused across cycles.
#[derive(Debug, Clone)]
pub struct ShapeAssembler {
    shape: Shape,
    bezier: CurveStepper,
    curve: CurveStepper,
    curve_window: [Vec2; 4],
    curve_count: u32,
}

impl Default for ShapeAssembler {
    fn default() -> Self {
        Self::new(20, 20, 0.0)
    }
}

impl ShapeAssembler {
    pub fn new(bezier_detail: u32, curve_detail: u32, curve_tightness: f32) -> Self {
        Self {
            shape: Shape::default(),
            bezier: CurveStepper::bezier(bezier_detail),
            curve: CurveStepper::catmull_rom(curve_detail, curve_tightness),
            curve_window: [Vec2::zero(); 4],
            curve_count: 0,
        }
    }

    pub fn set_bezier_detail(&mut self, detail: u32) {
        self.bezier = CurveStepper::bezier(detail);
    }

    pub fn set_curve_detail(&mut self, detail: u32, tightness: f32) {
        self.curve = CurveStepper::catmull_rom(detail, tightness);
    }

    /// Starts a new shape, discarding whatever was collected before.
    pub fn begin(&mut self, kind: ShapeKind) {
        self.shape.reset(kind);
        self.curve_count = 0;
    }

    /// Appends a vertex unless one already exists at the exact same position.
    ///
    /// Returns `false` when the vertex was rejected as a duplicate.
    pub fn vertex(&mut self, v: TessVertex) -> bool {
        self.curve_count = 0;
        self.push(v)
    }

    /// Marks the start of a new contour at the current vertex count.
    pub fn begin_contour(&mut self) {
        let at = self.shape.vertices.len();
        let last = self.shape.contour_starts.last().copied().unwrap_or(0);
        if at > last {
            self.shape.contour_starts.push(at);
        }
    }

    /// Flags the current shape as convex so filling can use a fan.
    pub fn mark_convex(&mut self) {
        self.shape.known_convex = true;
    }

    /// Cubic Bezier from the last vertex through `c1`, `c2` to `end`.
    pub fn bezier_vertex(&mut self, c1: Vec2, c2: Vec2, end: Vec2, color: PackedColor) {
        let Some(start) = self.shape.vertices.last().map(|v| v.pos) else {
            log::debug!("bezier_vertex ignored: shape has no starting vertex");
            return;
        };
        self.curve_count = 0;
        self.emit_cubic([start, c1, c2, end], color);
    }

    /// Quadratic Bezier from the last vertex, degree-elevated to a cubic.
    pub fn quadratic_vertex(&mut self, control: Vec2, end: Vec2, color: PackedColor) {
        let Some(start) = self.shape.vertices.last().map(|v| v.pos) else {
            log::debug!("quadratic_vertex ignored: shape has no starting vertex");
            return;
        };
        self.curve_count = 0;
        self.emit_cubic(elevate_quadratic(start, control, end), color);
    }

    /// Catmull-Rom spline vertex; segments appear once four points are known.
    pub fn curve_vertex(&mut self, p: Vec2, color: PackedColor) {
        self.curve_window.rotate_left(1);
        self.curve_window[3] = p;
        self.curve_count += 1;

        if self.curve_count < 4 {
            return;
        }

        if self.curve_count == 4 {
            self.push(TessVertex::flat(self.curve_window[1], color));
        }
        let points: Vec<Vec2> = self.curve.expand(self.curve_window).collect();
        for q in points {
            self.push(TessVertex::flat(q, color));
        }
    }

    /// Read-only view of the shape collected so far.
    #[inline]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    fn emit_cubic(&mut self, points: [Vec2; 4], color: PackedColor) {
        let generated: Vec<Vec2> = self.bezier.expand(points).collect();
        for q in generated {
            self.push(TessVertex::flat(q, color));
        }
    }

    fn push(&mut self, v: TessVertex) -> bool {
        // Exact duplicates break polygon tessellation; a linear scan keeps the check exact
        // (including +0.0 == -0.0) and shapes stay small.
        if self.shape.vertices.iter().any(|e| e.pos == v.pos) {
            return false;
        }
        self.shape.vertices.push(v);
        true
    }
}
