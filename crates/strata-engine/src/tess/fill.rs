//! Fill triangulation.
//!
//! Convex shapes and the fixed-topology kinds are expanded with index patterns. General
//! polygons go through lyon's sweep-line tessellator with the nonzero winding rule.

use lyon::math::point;
use lyon::path::{EndpointId, Path};
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillRule, FillTessellator as LyonFill, FillVertex, VertexBuffers,
    VertexSource,
};

use crate::coords::Vec2;
use crate::error::FillError;

use super::shape::{Shape, ShapeKind};
use super::vertex::{Mesh, TessVertex};

/// Triangulates the interior of assembled shapes.
///
/// Holds the lyon tessellator and its scratch buffers so they are reused between shapes.
pub struct FillTessellator {
    lyon: LyonFill,
    options: FillOptions,
    buffers: VertexBuffers<TessVertex, u32>,
    endpoints: Vec<TessVertex>,
}

impl Default for FillTessellator {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for FillTessellator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FillTessellator").finish_non_exhaustive()
    }
}

impl FillTessellator {
    pub fn new() -> Self {
        Self {
            lyon: LyonFill::new(),
            options: FillOptions::default().with_fill_rule(FillRule::NonZero),
            buffers: VertexBuffers::new(),
            endpoints: Vec::new(),
        }
    }

    /// Appends the fill triangles of `shape` to `out`.
    ///
    /// Points and lines have no interior and produce nothing.
    pub fn fill(&mut self, shape: &Shape, out: &mut Mesh) -> Result<(), FillError> {
        let v = shape.vertices();
        match shape.kind() {
            ShapeKind::Points | ShapeKind::Lines => {}
            ShapeKind::Triangles => {
                for t in v.chunks_exact(3) {
                    out.push_triangle(t[0], t[1], t[2]);
                }
            }
            ShapeKind::TriangleStrip => {
                for w in v.windows(3) {
                    out.push_triangle(w[0], w[1], w[2]);
                }
            }
            ShapeKind::TriangleFan => {
                fan(v, out);
                // wrap the last rim vertex back to the first one
                if v.len() >= 3 {
                    out.push_triangle(v[0], v[v.len() - 1], v[1]);
                }
            }
            ShapeKind::Quads => {
                for q in v.chunks_exact(4) {
                    out.push_triangle(q[0], q[1], q[2]);
                    out.push_triangle(q[0], q[2], q[3]);
                }
            }
            ShapeKind::QuadStrip => {
                for i in (0..v.len().saturating_sub(3)).step_by(2) {
                    out.push_triangle(v[i], v[i + 1], v[i + 2]);
                    out.push_triangle(v[i + 1], v[i + 3], v[i + 2]);
                }
            }
            ShapeKind::Polygon if shape.is_known_convex() => fan(v, out),
            ShapeKind::Polygon => self.tessellate(shape, out)?,
        }
        Ok(())
    }

    fn tessellate(&mut self, shape: &Shape, out: &mut Mesh) -> Result<(), FillError> {
        if shape.len() < 3 {
            return Ok(());
        }

        self.endpoints.clear();
        let mut builder = Path::builder();
        for contour in shape.contours() {
            let Some((first, rest)) = contour.split_first() else {
                continue;
            };
            record(&mut self.endpoints, builder.begin(point(first.pos.x, first.pos.y)), *first);
            for v in rest {
                record(&mut self.endpoints, builder.line_to(point(v.pos.x, v.pos.y)), *v);
            }
            builder.end(true);
        }
        let path = builder.build();

        self.buffers.vertices.clear();
        self.buffers.indices.clear();
        let endpoints = &self.endpoints;
        let result = self.lyon.tessellate_path(
            &path,
            &self.options,
            &mut BuffersBuilder::new(&mut self.buffers, |fv: FillVertex| merge(endpoints, fv)),
        );
        if let Err(e) = result {
            return Err(FillError(format!("{e:?}")));
        }

        for tri in self.buffers.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| self.buffers.vertices[i as usize]);
            out.push_triangle(a, b, c);
        }
        Ok(())
    }
}

/// `(v0, v[i-1], v[i])` for `i` in `2..n`.
fn fan(v: &[TessVertex], out: &mut Mesh) {
    for i in 2..v.len() {
        out.push_triangle(v[0], v[i - 1], v[i]);
    }
}

fn record(endpoints: &mut Vec<TessVertex>, id: EndpointId, v: TessVertex) {
    let slot = id.to_usize();
    if endpoints.len() <= slot {
        endpoints.resize(slot + 1, TessVertex::default());
    }
    endpoints[slot] = v;
}

/// Output vertex for one tessellator vertex.
///
/// Intersections and merged endpoints blend their sources with [`TessVertex::combine`].
fn merge(endpoints: &[TessVertex], fv: FillVertex) -> TessVertex {
    let p = fv.position();
    let pos = Vec2::new(p.x, p.y);
    let lookup = |id: EndpointId| endpoints.get(id.to_usize()).copied().unwrap_or_default();

    let mut weighted: Vec<(TessVertex, f32)> = Vec::new();
    for source in fv.sources() {
        match source {
            VertexSource::Endpoint { id } => weighted.push((lookup(id), 1.0)),
            VertexSource::Edge { from, to, t } => {
                weighted.push((lookup(from), 1.0 - t));
                weighted.push((lookup(to), t));
            }
        }
    }

    match weighted.as_slice() {
        [(only, _)] => TessVertex { pos, ..*only },
        _ => TessVertex::combine(pos, &weighted),
    }
}
