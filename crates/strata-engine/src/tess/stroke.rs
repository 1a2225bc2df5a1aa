//! Stroke geometry for polylines, segments and points.
//!
//! Angles follow the `atan2(dx, dy)` convention of [`Vec2::angle`]: zero points along +Y
//! and `Vec2::from_angle(a, r)` is the inverse.

use core::f32::consts::{FRAC_PI_2, PI, TAU};

use crate::coords::Vec2;
use crate::paint::PackedColor;

use super::detail::ArcDetail;
use super::shape::{EndMode, Shape, ShapeKind};
use super::vertex::Mesh;

/// Below this half-width strokes are drawn as plain quads per segment.
pub const THIN_STROKE_LIMIT: f32 = 1.0;

/// Turns closer than this to straight (or to a full reversal) always get a bevel.
const STRAIGHT_EPSILON: f32 = PI / 15.0;
const REVERSAL_EPSILON: f32 = 0.001;

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum StrokeJoin {
    /// Unclamped: sharp turns produce long spikes.
    #[default]
    Miter,
    Bevel,
    Round,
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum StrokeCap {
    /// Ends flush with the terminal vertex.
    Butt,
    /// Extends the terminal segment by half the stroke weight.
    Project,
    #[default]
    Round,
}

/// Stroke parameters for one primitive.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct StrokeStyle {
    pub weight: f32,
    pub join: StrokeJoin,
    pub cap: StrokeCap,
    pub color: PackedColor,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            weight: 1.0,
            join: StrokeJoin::default(),
            cap: StrokeCap::default(),
            color: PackedColor::BLACK,
        }
    }
}

/// Walk state of the polyline currently being stroked.
#[derive(Debug, Copy, Clone, Default)]
enum Walk {
    #[default]
    Idle,
    Started {
        first: Vec2,
    },
    /// Thin strokes draw every segment as soon as it is known.
    Thin {
        first: Vec2,
        last: Vec2,
        count: usize,
    },
    /// Two vertices seen; no geometry emitted yet.
    Leg {
        first: Vec2,
        second: Vec2,
    },
    /// At least three vertices seen; the segment ending at `last` is still pending.
    Joined {
        first: Vec2,
        second: Vec2,
        second_offset: Vec2,
        prev: Vec2,
        prev_offset: Vec2,
        last: Vec2,
    },
}

/// Generates stroke triangles into a [`Mesh`].
///
/// A polyline is fed with [`begin`](Self::begin), [`vertex`](Self::vertex) and
/// [`end`](Self::end). Each segment becomes a quad (two triangles); interior vertices get a
/// join and open ends get caps.
#[derive(Debug, Clone)]
pub struct Stroker {
    style: StrokeStyle,
    detail: ArcDetail,
    radius: f32,
    walk: Walk,
}

impl Stroker {
    pub fn new(style: StrokeStyle, detail: ArcDetail) -> Self {
        Self {
            style,
            detail,
            radius: style.weight * 0.5,
            walk: Walk::Idle,
        }
    }

    #[inline]
    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }

    #[inline]
    fn is_thin(&self) -> bool {
        self.radius < THIN_STROKE_LIMIT
    }

    /// Starts a new polyline, dropping any unfinished one.
    pub fn begin(&mut self) {
        self.walk = Walk::Idle;
    }

    /// Adds a polyline vertex. Consecutive duplicates are ignored.
    pub fn vertex(&mut self, x: Vec2, out: &mut Mesh) {
        self.walk = match self.walk {
            Walk::Idle => Walk::Started { first: x },
            Walk::Started { first } if x == first => return,
            Walk::Started { first } if self.is_thin() => {
                self.single_line(first, x, out);
                Walk::Thin { first, last: x, count: 2 }
            }
            Walk::Started { first } => Walk::Leg { first, second: x },
            Walk::Thin { last, .. } if x == last => return,
            Walk::Thin { first, last, count } => {
                self.single_line(last, x, out);
                Walk::Thin { first, last: x, count: count + 1 }
            }
            Walk::Leg { second, .. } if x == second => return,
            Walk::Leg { first, second } => {
                let (incoming, outgoing) = self.join(first, second, x, out);
                Walk::Joined {
                    first,
                    second,
                    second_offset: incoming,
                    prev: second,
                    prev_offset: outgoing,
                    last: x,
                }
            }
            Walk::Joined { last, .. } if x == last => return,
            Walk::Joined { first, second, second_offset, prev, prev_offset, last } => {
                let (incoming, outgoing) = self.join(prev, last, x, out);
                self.quad(prev, prev_offset, last, incoming, out);
                Walk::Joined {
                    first,
                    second,
                    second_offset,
                    prev: last,
                    prev_offset: outgoing,
                    last: x,
                }
            }
        };
    }

    /// Finishes the polyline, closing it back to the first vertex or capping both ends.
    pub fn end(&mut self, closed: bool, out: &mut Mesh) {
        match core::mem::take(&mut self.walk) {
            Walk::Idle | Walk::Started { .. } => {}
            Walk::Thin { first, last, count } => {
                // Two-point thin lines were already drawn segment by segment.
                if closed && count > 2 {
                    self.single_line(last, first, out);
                }
            }
            Walk::Leg { first, second } => self.single_line(first, second, out),
            walk @ Walk::Joined { first, second, .. } if closed => {
                self.walk = walk;
                self.vertex(first, out);
                self.vertex(second, out);
                if let Walk::Joined { second_offset, prev, prev_offset, .. } = self.walk {
                    self.quad(prev, prev_offset, second, second_offset, out);
                }
                self.walk = Walk::Idle;
            }
            Walk::Joined { first, second, second_offset, prev, prev_offset, last } => {
                let r = self.radius;
                let t = normal(prev, last, r);
                let end = match self.style.cap {
                    StrokeCap::Project => last + forward(t),
                    _ => last,
                };
                self.quad(prev, prev_offset, end, t, out);
                if self.style.cap == StrokeCap::Round {
                    self.line_cap(end, (last - prev).angle(), out);
                }

                let t = normal(second, first, r);
                let start = match self.style.cap {
                    StrokeCap::Project => first + forward(t),
                    _ => first,
                };
                self.quad(second, second_offset, start, -t, out);
                if self.style.cap == StrokeCap::Round {
                    self.line_cap(start, (first - second).angle(), out);
                }
            }
        }
    }

    /// Strokes a whole shape according to its kind.
    ///
    /// Polygons stroke every contour; the other kinds stroke each primitive as a closed
    /// outline, lines as individual segments and points as dots.
    pub fn stroke_shape(&mut self, shape: &Shape, mode: EndMode, out: &mut Mesh) {
        let v = shape.vertices();
        match shape.kind() {
            ShapeKind::Polygon => {
                if v.len() < 3 {
                    return;
                }
                for contour in shape.contours() {
                    self.begin();
                    for p in contour {
                        self.vertex(p.pos, out);
                    }
                    self.end(mode == EndMode::Close, out);
                }
            }
            ShapeKind::QuadStrip => {
                for i in (0..v.len().saturating_sub(3)).step_by(2) {
                    let pts = [v[i].pos, v[i + 1].pos, v[i + 3].pos, v[i + 2].pos];
                    self.closed_loop(&pts, out);
                }
            }
            ShapeKind::Quads => {
                for q in v.chunks_exact(4) {
                    self.closed_loop(&[q[0].pos, q[1].pos, q[2].pos, q[3].pos], out);
                }
            }
            ShapeKind::TriangleStrip => {
                for w in v.windows(3) {
                    self.closed_loop(&[w[0].pos, w[1].pos, w[2].pos], out);
                }
            }
            ShapeKind::TriangleFan => {
                for w in v.get(1..).unwrap_or_default().windows(2) {
                    self.closed_loop(&[v[0].pos, w[0].pos, w[1].pos], out);
                }
                if v.len() >= 3 {
                    self.closed_loop(&[v[0].pos, v[v.len() - 1].pos, v[1].pos], out);
                }
            }
            ShapeKind::Triangles => {
                for t in v.chunks_exact(3) {
                    self.closed_loop(&[t[0].pos, t[1].pos, t[2].pos], out);
                }
            }
            ShapeKind::Lines => {
                for pair in v.chunks_exact(2) {
                    self.single_line(pair[0].pos, pair[1].pos, out);
                }
            }
            ShapeKind::Points => {
                for p in v {
                    self.single_point(p.pos, out);
                }
            }
        }
    }

    fn closed_loop(&mut self, pts: &[Vec2], out: &mut Mesh) {
        self.begin();
        for &p in pts {
            self.vertex(p, out);
        }
        self.end(true, out);
    }

    /// One capped segment, independent of any polyline state.
    pub fn single_line(&self, a: Vec2, b: Vec2, out: &mut Mesh) {
        if a == b {
            return;
        }
        let r = self.radius;
        let n = normal(a, b, r);
        let (a, b) = match self.style.cap {
            StrokeCap::Project => (a - forward(n), b + forward(n)),
            _ => (a, b),
        };

        let c = self.style.color;
        out.push_flat(a - n, a + n, b - n, c);
        out.push_flat(b + n, b - n, a + n, c);

        if r >= THIN_STROKE_LIMIT && self.style.cap == StrokeCap::Round {
            self.line_cap(b, (b - a).angle(), out);
            self.line_cap(a, (a - b).angle(), out);
        }
    }

    /// A dot of the stroke weight: a disc for round caps, a square otherwise.
    pub fn single_point(&self, p: Vec2, out: &mut Mesh) {
        let r = self.radius;
        let c = self.style.color;
        match self.style.cap {
            StrokeCap::Round => {
                let rim = p + Vec2::from_angle(0.0, r);
                self.arc_join(p, 0.0, TAU, rim, rim, out);
            }
            StrokeCap::Butt | StrokeCap::Project => {
                let (lo, hi) = (p - Vec2::new(r, r), p + Vec2::new(r, r));
                out.push_flat(lo, Vec2::new(hi.x, lo.y), Vec2::new(lo.x, hi.y), c);
                out.push_flat(Vec2::new(hi.x, lo.y), Vec2::new(lo.x, hi.y), hi, c);
            }
        }
    }

    /// Emits the join at `l` between legs `p -> l` and `l -> x`.
    ///
    /// Returns the offsets at `l` to use for the incoming and outgoing segment quads.
    fn join(&self, p: Vec2, l: Vec2, x: Vec2, out: &mut Mesh) -> (Vec2, Vec2) {
        let r = self.radius;
        let angle1 = (l - p).angle();
        let angle2 = (l - x).angle();
        let diff = wrap_angle(angle1 - angle2);

        let flat = matches!(self.style.join, StrokeJoin::Bevel | StrokeJoin::Round)
            || diff.abs() < STRAIGHT_EPSILON
            || diff.abs() > PI - REVERSAL_EPSILON;

        if !flat {
            let offset = r / (FRAC_PI_2 - diff / 2.0).cos();
            let mut bisector = Vec2::from_angle((angle1 + angle2) / 2.0, offset);
            if (angle1 - angle2).abs() < PI {
                bisector = -bisector;
            }
            return (bisector, bisector);
        }

        let t = normal(p, l, r);
        let n = normal(l, x, r);
        let c = self.style.color;
        if self.style.join == StrokeJoin::Round {
            let (theta1, theta2) = if diff > 0.0 {
                (angle1 - FRAC_PI_2, angle2 + FRAC_PI_2)
            } else {
                (angle1 + FRAC_PI_2, angle2 - FRAC_PI_2)
            };
            let delta = wrap_angle(theta2 - theta1);
            let (from, to) = if diff < 0.0 { (l + t, l + n) } else { (l - t, l - n) };
            self.arc_join(l, theta1, delta, from, to, out);
        } else if diff < 0.0 {
            out.push_flat(l, l + t, l + n, c);
        } else {
            out.push_flat(l, l - t, l - n, c);
        }
        (t, n)
    }

    /// Segment body from `p` (offset `pd`) to `l` (offset `ld`).
    fn quad(&self, p: Vec2, pd: Vec2, l: Vec2, ld: Vec2, out: &mut Mesh) {
        let c = self.style.color;
        out.push_flat(p - pd, p + pd, l - ld, c);
        out.push_flat(p + pd, l - ld, l + ld, c);
    }

    /// Fan around `center` from `from` to `to`, sweeping `delta` radians from `start`.
    ///
    /// Emits exactly `segments(radius, delta)` triangles.
    fn arc_join(&self, center: Vec2, start: f32, delta: f32, from: Vec2, to: Vec2, out: &mut Mesh) {
        let r = self.radius;
        let segments = self.detail.segments(r, delta);
        let step = delta / segments as f32;
        let c = self.style.color;

        let mut angle = start;
        let mut p1 = from;
        for _ in 1..segments {
            angle += step;
            let p2 = center + Vec2::from_angle(angle, r);
            out.push_flat(center, p1, p2, c);
            p1 = p2;
        }
        out.push_flat(center, p1, to, c);
    }

    /// Half-disc facing `angle`.
    fn line_cap(&self, center: Vec2, angle: f32, out: &mut Mesh) {
        let r = self.radius;
        let start = angle - FRAC_PI_2;
        let from = center + Vec2::from_angle(start, r);
        let to = center + Vec2::from_angle(start + PI, r);
        self.arc_join(center, start, PI, from, to, out);
    }
}

/// Perpendicular of `a -> b` scaled to `r`.
#[inline]
fn normal(a: Vec2, b: Vec2, r: f32) -> Vec2 {
    let d = b - a;
    Vec2::new(d.y, -d.x) * (r / d.length())
}

/// Direction of travel recovered from a [`normal`].
#[inline]
fn forward(n: Vec2) -> Vec2 {
    Vec2::new(-n.y, n.x)
}

/// Maps an angle difference into `[-pi, pi]`.
#[inline]
fn wrap_angle(a: f32) -> f32 {
    if a > PI {
        a - TAU
    } else if a < -PI {
        a + TAU
    } else {
        a
    }
}

#[cfg(test)]
mod tests {
    use crate::tess::shape::ShapeAssembler;
    use crate::tess::vertex::TessVertex;

    use super::*;

    fn style(weight: f32, join: StrokeJoin, cap: StrokeCap) -> StrokeStyle {
        StrokeStyle { weight, join, cap, color: PackedColor::BLACK }
    }

    fn polyline(stroker: &mut Stroker, pts: &[Vec2], closed: bool) -> Mesh {
        let mut mesh = Mesh::new();
        stroker.begin();
        for &p in pts {
            stroker.vertex(p, &mut mesh);
        }
        stroker.end(closed, &mut mesh);
        mesh
    }

    fn decagon() -> Vec<Vec2> {
        (0..10)
            .map(|i| {
                let a = i as f32 * TAU / 10.0;
                Vec2::new(100.0 + 40.0 * a.cos(), 100.0 + 40.0 * a.sin())
            })
            .collect()
    }

    /// Triangle count of the round join at `pts[i]` of a closed loop.
    fn round_join_segments(detail: ArcDetail, r: f32, pts: &[Vec2], i: usize) -> u32 {
        let n = pts.len();
        let (p, l, x) = (pts[(i + n - 1) % n], pts[i], pts[(i + 1) % n]);
        let angle1 = (l - p).angle();
        let angle2 = (l - x).angle();
        let diff = wrap_angle(angle1 - angle2);
        let (t1, t2) = if diff > 0.0 {
            (angle1 - FRAC_PI_2, angle2 + FRAC_PI_2)
        } else {
            (angle1 + FRAC_PI_2, angle2 - FRAC_PI_2)
        };
        detail.segments(r, wrap_angle(t2 - t1))
    }

    // ── polylines ────────────────────────────────────────────────────────

    #[test]
    fn closed_round_join_count_matches_formula() {
        let pts = decagon();
        let detail = ArcDetail::default();
        let mut stroker = Stroker::new(style(8.0, StrokeJoin::Round, StrokeCap::Round), detail);
        let mesh = polyline(&mut stroker, &pts, true);

        let joins: u32 = (0..pts.len()).map(|i| round_join_segments(detail, 4.0, &pts, i)).sum();
        assert_eq!(mesh.triangle_count(), 2 * 10 + joins as usize);
    }

    #[test]
    fn closed_bevel_emits_one_triangle_per_join() {
        let mut stroker = Stroker::new(style(6.0, StrokeJoin::Bevel, StrokeCap::Butt), ArcDetail::default());
        let mesh = polyline(&mut stroker, &decagon(), true);
        assert_eq!(mesh.triangle_count(), 2 * 10 + 10);
    }

    #[test]
    fn closed_miter_square_has_only_segment_quads() {
        let square = [
            Vec2::new(0.0, 0.0),
            Vec2::new(50.0, 0.0),
            Vec2::new(50.0, 50.0),
            Vec2::new(0.0, 50.0),
        ];
        let mut stroker = Stroker::new(style(10.0, StrokeJoin::Miter, StrokeCap::Round), ArcDetail::default());
        let mesh = polyline(&mut stroker, &square, true);
        assert_eq!(mesh.triangle_count(), 8);
        // outer ring 60x60 minus inner 40x40
        assert!((mesh.area() - 2000.0).abs() < 0.5, "area {}", mesh.area());
    }

    #[test]
    fn miter_corner_reaches_offset_point() {
        let pts = [Vec2::new(0.0, 0.0), Vec2::new(50.0, 0.0), Vec2::new(50.0, 50.0)];
        let mut stroker = Stroker::new(style(10.0, StrokeJoin::Miter, StrokeCap::Butt), ArcDetail::default());
        let mesh = polyline(&mut stroker, &pts, false);
        assert_eq!(mesh.triangle_count(), 4);
        let corner = Vec2::new(55.0, -5.0);
        assert!(mesh.vertices().iter().any(|v| (v.pos - corner).length() < 1e-3));
    }

    #[test]
    fn open_butt_polyline_covers_exact_area() {
        let pts = [Vec2::new(0.0, 0.0), Vec2::new(40.0, 0.0), Vec2::new(80.0, 0.0), Vec2::new(120.0, 0.0)];
        let mut stroker = Stroker::new(style(4.0, StrokeJoin::Miter, StrokeCap::Butt), ArcDetail::default());
        let mesh = polyline(&mut stroker, &pts, false);
        // straight joins fall back to bevel triangles of zero area
        assert_eq!(mesh.triangle_count(), 2 * 3 + 2);
        assert!((mesh.area() - 480.0).abs() < 1e-2);
    }

    #[test]
    fn projecting_caps_extend_both_ends() {
        let pts = [Vec2::new(0.0, 0.0), Vec2::new(40.0, 0.0), Vec2::new(40.0, 40.0)];
        let mut butt = Stroker::new(style(4.0, StrokeJoin::Bevel, StrokeCap::Butt), ArcDetail::default());
        let mut proj = Stroker::new(style(4.0, StrokeJoin::Bevel, StrokeCap::Project), ArcDetail::default());
        let a = polyline(&mut butt, &pts, false).area();
        let b = polyline(&mut proj, &pts, false).area();
        // two extra 2x4 rectangles
        assert!((b - a - 16.0).abs() < 1e-2, "{a} vs {b}");
    }

    #[test]
    fn open_round_caps_add_half_discs() {
        let pts = [Vec2::new(0.0, 0.0), Vec2::new(40.0, 0.0), Vec2::new(40.0, 40.0)];
        let detail = ArcDetail::default();
        let mut round = Stroker::new(style(10.0, StrokeJoin::Bevel, StrokeCap::Round), detail);
        let mut butt = Stroker::new(style(10.0, StrokeJoin::Bevel, StrokeCap::Butt), detail);
        let with_caps = polyline(&mut round, &pts, false).triangle_count();
        let without = polyline(&mut butt, &pts, false).triangle_count();
        assert_eq!(with_caps - without, 2 * detail.segments(5.0, PI) as usize);
    }

    #[test]
    fn consecutive_duplicates_are_ignored() {
        let pts = [Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0)];
        let mut stroker = Stroker::new(style(4.0, StrokeJoin::Bevel, StrokeCap::Butt), ArcDetail::default());
        let with_dup = polyline(&mut stroker, &pts, false).triangle_count();
        let clean = [pts[0], pts[1], pts[3]];
        assert_eq!(with_dup, polyline(&mut stroker, &clean, false).triangle_count());
    }

    #[test]
    fn two_point_polyline_is_a_single_line() {
        let mut stroker = Stroker::new(style(4.0, StrokeJoin::Miter, StrokeCap::Butt), ArcDetail::default());
        let mesh = polyline(&mut stroker, &[Vec2::new(0.0, 0.0), Vec2::new(0.0, 30.0)], true);
        assert_eq!(mesh.triangle_count(), 2);
        assert!((mesh.area() - 120.0).abs() < 1e-3);
    }

    // ── thin strokes ─────────────────────────────────────────────────────

    #[test]
    fn thin_stroke_has_no_join_or_cap_geometry() {
        let pts = decagon();
        for join in [StrokeJoin::Miter, StrokeJoin::Bevel, StrokeJoin::Round] {
            for cap in [StrokeCap::Butt, StrokeCap::Project, StrokeCap::Round] {
                let mut stroker = Stroker::new(style(1.5, join, cap), ArcDetail::default());
                let closed = polyline(&mut stroker, &pts, true).triangle_count();
                let open = polyline(&mut stroker, &pts, false).triangle_count();
                assert_eq!(closed, 2 * 10, "closed {join:?}/{cap:?}");
                assert_eq!(open, 2 * 9, "open {join:?}/{cap:?}");
            }
        }
    }

    #[test]
    fn thin_two_point_line_is_drawn_once() {
        let mut stroker = Stroker::new(style(1.0, StrokeJoin::Miter, StrokeCap::Round), ArcDetail::default());
        let mesh = polyline(&mut stroker, &[Vec2::new(0.0, 0.0), Vec2::new(5.0, 0.0)], true);
        assert_eq!(mesh.triangle_count(), 2);
    }

    // ── single primitives ────────────────────────────────────────────────

    #[test]
    fn single_line_round_caps() {
        let detail = ArcDetail::default();
        let stroker = Stroker::new(style(6.0, StrokeJoin::Miter, StrokeCap::Round), detail);
        let mut mesh = Mesh::new();
        stroker.single_line(Vec2::new(0.0, 0.0), Vec2::new(20.0, 0.0), &mut mesh);
        assert_eq!(mesh.triangle_count(), 2 + 2 * detail.segments(3.0, PI) as usize);

        mesh.clear();
        stroker.single_line(Vec2::new(1.0, 1.0), Vec2::new(1.0, 1.0), &mut mesh);
        assert!(mesh.is_empty());
    }

    #[test]
    fn single_point_shapes() {
        let detail = ArcDetail::default();
        let mut mesh = Mesh::new();
        Stroker::new(style(10.0, StrokeJoin::Miter, StrokeCap::Round), detail)
            .single_point(Vec2::new(0.0, 0.0), &mut mesh);
        assert_eq!(mesh.triangle_count(), detail.segments(5.0, TAU) as usize);
        let disc = core::f32::consts::PI * 25.0;
        assert!(mesh.area() < disc && mesh.area() > disc * 0.9);

        mesh.clear();
        Stroker::new(style(10.0, StrokeJoin::Miter, StrokeCap::Project), detail)
            .single_point(Vec2::new(0.0, 0.0), &mut mesh);
        assert_eq!(mesh.triangle_count(), 2);
        assert!((mesh.area() - 100.0).abs() < 1e-3);
    }

    // ── shape kinds ──────────────────────────────────────────────────────

    #[test]
    fn shape_kinds_stroke_their_primitives() {
        let mut asm = ShapeAssembler::default();
        let thin = Stroker::new(style(1.0, StrokeJoin::Miter, StrokeCap::Butt), ArcDetail::default());
        let six = [(0.0, 0.0), (10.0, 0.0), (0.0, 10.0), (10.0, 10.0), (0.0, 20.0), (10.0, 20.0)];
        let count = |asm: &mut ShapeAssembler, kind| {
            asm.begin(kind);
            for (x, y) in six {
                asm.vertex(TessVertex::flat(Vec2::new(x, y), PackedColor::BLACK));
            }
            let mut mesh = Mesh::new();
            thin.clone().stroke_shape(asm.shape(), EndMode::Open, &mut mesh);
            mesh.triangle_count()
        };
        // thin strokes: two triangles per drawn segment
        assert_eq!(count(&mut asm, ShapeKind::Lines), 3 * 2);
        assert_eq!(count(&mut asm, ShapeKind::Triangles), 6 * 2);
        assert_eq!(count(&mut asm, ShapeKind::Quads), 4 * 2);
        assert_eq!(count(&mut asm, ShapeKind::QuadStrip), 8 * 2);
        assert_eq!(count(&mut asm, ShapeKind::Polygon), 5 * 2);
        assert_eq!(count(&mut asm, ShapeKind::Points), 6 * 2);
    }

    #[test]
    fn polygon_strokes_each_contour() {
        let mut asm = ShapeAssembler::default();
        asm.begin(ShapeKind::Polygon);
        for (x, y) in [(0.0, 0.0), (30.0, 0.0), (30.0, 30.0)] {
            asm.vertex(TessVertex::flat(Vec2::new(x, y), PackedColor::BLACK));
        }
        asm.begin_contour();
        for (x, y) in [(10.0, 10.0), (20.0, 10.0), (20.0, 20.0)] {
            asm.vertex(TessVertex::flat(Vec2::new(x, y), PackedColor::BLACK));
        }
        let mut stroker = Stroker::new(style(1.0, StrokeJoin::Miter, StrokeCap::Butt), ArcDetail::default());
        let mut mesh = Mesh::new();
        stroker.stroke_shape(asm.shape(), EndMode::Close, &mut mesh);
        assert_eq!(mesh.triangle_count(), 2 * 3 * 2);
    }
}
