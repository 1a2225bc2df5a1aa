use std::collections::HashSet;

use crate::backend::{BufferId, GpuBackend, TextureRef, Uniforms};
use crate::batch::{DepthAllocator, GpuVertex, VertexBatch};
use crate::coords::{Affine2, Vec2, Viewport};
use crate::error::{BackendError, ShaderError};
use crate::paint::PackedColor;
use crate::shader::{ShaderBindings, ShaderSource};
use crate::tess::{
    ArcDetail, EndMode, FillTessellator, Mesh, ShapeAssembler, ShapeKind, StrokeCap, StrokeJoin,
    Stroker, TessVertex,
};

use super::config::RendererConfig;
use super::strategy::SubmitStrategy;
use super::style::Style;

/// Immediate-mode 2D renderer.
///
/// Shapes are assembled from `begin_shape` / `vertex` / `end_shape` calls, tessellated on
/// the CPU and appended to one vertex batch. The batch reaches the backend when it is
/// full, when the texture or shader changes, when the transform changes in deferred mode,
/// and on `flush` / `end_draw` / `read_pixels`. A shape's triangles are appended as one
/// unit, so a flush never splits a shape that fits in the batch.
pub struct Renderer<B: GpuBackend> {
    backend: B,
    config: RendererConfig,
    strategy: Box<dyn SubmitStrategy>,

    batch: VertexBatch,
    vbo: BufferId,
    depth: DepthAllocator,

    assembler: ShapeAssembler,
    filler: FillTessellator,
    scratch: Mesh,

    style: Style,

    matrix: Affine2,
    stack: Vec<Affine2>,
    viewport: Viewport,
    projection: Affine2,
    detail: ArcDetail,

    default_program: Option<(B::Program, ShaderBindings)>,
    default_failed: bool,
    custom_program: Option<(B::Program, ShaderBindings)>,

    /// Image selected by [`Renderer::texture`].
    image: Option<TextureRef>,
    /// Image the pending batch samples from.
    bound_image: Option<TextureRef>,

    warned: HashSet<&'static str>,
}

impl<B: GpuBackend> Renderer<B> {
    pub fn new(mut backend: B, config: RendererConfig) -> Self {
        let strategy = config.submit.strategy();
        let batch = VertexBatch::with_capacity(config.batch_capacity);
        let vbo = backend.create_buffer(batch.byte_capacity());
        backend.set_depth_test(strategy.depth_test());

        let viewport = if config.viewport.is_valid() {
            config.viewport
        } else {
            log::warn!("invalid viewport {:?}; using the default", config.viewport);
            Viewport::default()
        };
        let projection = Affine2::pixel_to_ndc(viewport);

        log::debug!(
            "renderer: {} submission, {} vertex batch, premultiply={}",
            strategy.name(),
            batch.capacity(),
            config.premultiply_matrices
        );

        Self {
            backend,
            strategy,
            batch,
            vbo,
            depth: DepthAllocator::new(config.depth_step, config.depth_floor),
            assembler: ShapeAssembler::new(config.bezier_detail, config.curve_detail, config.curve_tightness),
            filler: FillTessellator::new(),
            scratch: Mesh::new(),
            style: Style::default(),
            matrix: Affine2::IDENTITY,
            stack: Vec::new(),
            viewport,
            projection,
            detail: ArcDetail::from_transform(&projection, viewport),
            default_program: None,
            default_failed: false,
            custom_program: None,
            image: None,
            bound_image: None,
            warned: HashSet::new(),
            config,
        }
    }

    #[inline]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    #[inline]
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Flushes pending geometry and returns the backend.
    pub fn into_backend(mut self) -> B {
        self.flush();
        self.backend
    }

    #[inline]
    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    #[inline]
    pub fn arc_detail(&self) -> ArcDetail {
        self.detail
    }

    /// Vertices waiting in the batch.
    #[inline]
    pub fn pending_vertices(&self) -> usize {
        self.batch.len()
    }

    // ── frame ────────────────────────────────────────────────────────────

    /// Starts a frame: fresh depth layers, cleared depth buffer, identity transform.
    pub fn begin_draw(&mut self) {
        self.flush();
        self.depth.reset();
        self.backend.set_depth_test(self.strategy.depth_test());
        self.backend.clear_depth_buffer();
        self.stack.clear();
        self.reset_matrix();
    }

    pub fn end_draw(&mut self) {
        self.flush();
    }

    /// Clears the color target; pending geometry is drawn first.
    pub fn background(&mut self, color: PackedColor) {
        self.flush();
        self.backend.clear(color);
    }

    /// RGBA8 contents of the target after drawing everything pending.
    pub fn read_pixels(&mut self) -> Result<Vec<u8>, BackendError> {
        self.flush();
        self.backend.read_pixels()
    }

    /// Replaces the target contents with `rgba` after drawing everything pending.
    pub fn write_pixels(&mut self, rgba: &[u8]) -> Result<(), BackendError> {
        self.flush();
        self.backend.write_pixels(rgba)
    }

    /// Draws the pending batch, if any.
    pub fn flush(&mut self) {
        if self.batch.is_empty() {
            return;
        }
        let Some((program, bindings)) = self.active_program() else {
            log::error!("no usable shader; dropping {} vertices", self.batch.len());
            self.batch.clear();
            return;
        };

        let transform = if self.config.premultiply_matrices {
            Affine2::IDENTITY
        } else {
            self.projmodelview()
        };
        let uniforms = Uniforms {
            transform: transform.to_mat4(),
            tex_scale: self.bound_image.map_or([1.0, 1.0], |t| t.tex_scale()),
        };

        let count = self.batch.len() as u32;
        self.backend.upload_buffer_data(self.vbo, self.batch.as_bytes());
        self.backend.bind_program(&program, &bindings, &uniforms);
        self.backend.bind_texture(self.bound_image.map(|t| t.id));
        self.backend.draw_triangles(self.vbo, count);
        self.backend.unbind_program();
        log::debug!("flush: {count} vertices");

        self.batch.clear();
    }

    // ── style ────────────────────────────────────────────────────────────

    #[inline]
    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn set_style(&mut self, style: Style) {
        self.style = style;
    }

    pub fn fill(&mut self, color: PackedColor) {
        self.style.fill = Some(color);
    }

    pub fn no_fill(&mut self) {
        self.style.fill = None;
    }

    pub fn stroke(&mut self, color: PackedColor) {
        self.style.stroke = Some(color);
    }

    pub fn no_stroke(&mut self) {
        self.style.stroke = None;
    }

    pub fn stroke_weight(&mut self, weight: f32) {
        self.style.weight = weight;
    }

    pub fn stroke_join(&mut self, join: StrokeJoin) {
        self.style.join = join;
    }

    pub fn stroke_cap(&mut self, cap: StrokeCap) {
        self.style.cap = cap;
    }

    pub fn tint(&mut self, color: PackedColor) {
        self.style.tint = Some(color);
    }

    pub fn no_tint(&mut self) {
        self.style.tint = None;
    }

    pub fn bezier_detail(&mut self, detail: u32) {
        self.config.bezier_detail = detail;
        self.assembler.set_bezier_detail(detail);
    }

    pub fn curve_detail(&mut self, detail: u32) {
        self.config.curve_detail = detail;
        self.assembler.set_curve_detail(detail, self.config.curve_tightness);
    }

    pub fn curve_tightness(&mut self, tightness: f32) {
        self.config.curve_tightness = tightness;
        self.assembler.set_curve_detail(self.config.curve_detail, tightness);
    }

    // ── shapes ───────────────────────────────────────────────────────────

    pub fn begin_shape(&mut self, kind: ShapeKind) {
        self.assembler.begin(kind);
    }

    /// Adds a vertex in the fill color. Exact duplicates of earlier vertices are skipped.
    pub fn vertex(&mut self, p: Vec2) {
        self.assembler.vertex(TessVertex::flat(p, self.style.fill_color()));
    }

    /// Adds a textured vertex; `uv` is in image pixels.
    ///
    /// Binds the current image (flushing if it differs from the batch's) and colors the
    /// vertex with the tint.
    pub fn vertex_uv(&mut self, p: Vec2, uv: Vec2) {
        self.bind_image(self.image);
        self.assembler
            .vertex(TessVertex::new(p, uv, self.style.tint_color(), 1.0));
    }

    pub fn bezier_vertex(&mut self, c1: Vec2, c2: Vec2, end: Vec2) {
        self.assembler.bezier_vertex(c1, c2, end, self.style.fill_color());
    }

    pub fn quadratic_vertex(&mut self, control: Vec2, end: Vec2) {
        self.assembler.quadratic_vertex(control, end, self.style.fill_color());
    }

    pub fn curve_vertex(&mut self, p: Vec2) {
        self.assembler.curve_vertex(p, self.style.fill_color());
    }

    /// Starts a new contour (a hole or a separate outline) within a polygon.
    pub fn begin_contour(&mut self) {
        self.assembler.begin_contour();
    }

    /// Contours end implicitly at the next `begin_contour` or at `end_shape`.
    pub fn end_contour(&mut self) {}

    /// Tessellates and batches the current shape: fill first, then stroke, each on its
    /// own depth layer.
    pub fn end_shape(&mut self, mode: EndMode) {
        if self.style.fill.is_some() {
            self.draw_mesh(|r, mesh| {
                if let Err(e) = r.filler.fill(r.assembler.shape(), mesh) {
                    log::error!("{e}; shape dropped");
                    mesh.clear();
                }
            });
        }
        if let Some(style) = self.style.stroke_style() {
            self.draw_mesh(|r, mesh| {
                Stroker::new(style, r.detail).stroke_shape(r.assembler.shape(), mode, mesh);
            });
        }
        self.end_primitive();
    }

    /// Mark the shape under construction as convex (fan fill).
    pub(crate) fn mark_convex(&mut self) {
        self.assembler.mark_convex();
    }

    /// Allocates a depth layer, builds a mesh and appends it to the batch.
    pub(crate) fn draw_mesh(&mut self, build: impl FnOnce(&mut Self, &mut Mesh)) {
        let depth = self.next_depth();
        let mut mesh = std::mem::take(&mut self.scratch);
        mesh.clear();
        build(self, &mut mesh);
        self.submit(&mesh, depth);
        self.scratch = mesh;
    }

    /// Called once per finished primitive.
    pub(crate) fn end_primitive(&mut self) {
        if self.strategy.flush_after_primitive() {
            self.flush();
        }
    }

    fn next_depth(&mut self) -> f32 {
        let layer = self.depth.next();
        if layer.wrapped {
            log::debug!("depth layers exhausted; clearing depth buffer");
            self.flush();
            self.backend.clear_depth_buffer();
        }
        layer.depth
    }

    fn submit(&mut self, mesh: &Mesh, depth: f32) {
        if mesh.is_empty() {
            return;
        }
        let to_ndc = self.config.premultiply_matrices.then(|| self.projmodelview());

        // Meshes larger than the whole batch are split on triangle boundaries.
        for chunk in mesh.vertices().chunks(self.batch.capacity()) {
            self.ensure_room(chunk.len());
            let vertices: Vec<GpuVertex> = chunk
                .iter()
                .map(|v| {
                    let pos = to_ndc.map_or(v.pos, |m| m.transform_point(v.pos));
                    GpuVertex::new(pos, depth, v.uv, v.color, v.tex_factor)
                })
                .collect();
            if !self.batch.extend(&vertices) {
                log::error!("batch rejected {} vertices", vertices.len());
            }
        }
    }

    fn ensure_room(&mut self, n: usize) {
        if !self.batch.has_room(n) {
            self.flush();
        }
    }

    // ── textures ─────────────────────────────────────────────────────────

    /// Uploads an RGBA8 image for use with [`Renderer::texture`].
    pub fn create_texture(&mut self, width: u32, height: u32, rgba: &[u8]) -> Result<TextureRef, BackendError> {
        self.backend.create_texture(width, height, rgba)
    }

    /// Selects the image sampled by subsequent textured vertices.
    pub fn texture(&mut self, image: Option<TextureRef>) {
        self.image = image;
        if image.is_some() {
            self.bind_image(image);
        }
    }

    fn bind_image(&mut self, image: Option<TextureRef>) {
        if self.bound_image == image {
            return;
        }
        self.flush();
        self.bound_image = image;
    }

    // ── shaders ──────────────────────────────────────────────────────────

    pub fn compile_shader(&mut self, source: &ShaderSource) -> Result<B::Program, ShaderError> {
        self.backend.compile(source).inspect_err(|e| log::error!("{e}"))
    }

    /// Activates `program` for subsequent batches.
    ///
    /// A program missing any binding of the 2D vertex layout is rejected and the active
    /// program stays bound.
    pub fn set_shader(&mut self, program: B::Program) -> Result<(), ShaderError> {
        self.flush();
        match ShaderBindings::resolve(&program) {
            Ok(bindings) => {
                self.custom_program = Some((program, bindings));
                Ok(())
            }
            Err(e) => {
                log::warn!("shader rejected, keeping the active one: {e}");
                Err(e)
            }
        }
    }

    /// Returns to the bundled default program.
    pub fn reset_shader(&mut self) {
        self.flush();
        self.custom_program = None;
    }

    fn active_program(&mut self) -> Option<(B::Program, ShaderBindings)> {
        if let Some(custom) = &self.custom_program {
            return Some(custom.clone());
        }
        if self.default_program.is_none() && !self.default_failed {
            let compiled = self
                .backend
                .compile(&ShaderSource::default_2d())
                .and_then(|p| ShaderBindings::resolve(&p).map(|b| (p, b)));
            match compiled {
                Ok(pair) => {
                    log::debug!("default shader compiled");
                    self.default_program = Some(pair);
                }
                Err(e) => {
                    log::error!("default shader unusable: {e}");
                    self.default_failed = true;
                }
            }
        }
        self.default_program.clone()
    }

    // ── transform ────────────────────────────────────────────────────────

    /// Current model-view matrix.
    #[inline]
    pub fn matrix(&self) -> Affine2 {
        self.matrix
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Projection followed by model-view: model space to NDC.
    #[inline]
    pub fn projmodelview(&self) -> Affine2 {
        self.projection.then_apply(self.matrix)
    }

    pub fn push_matrix(&mut self) {
        self.stack.push(self.matrix);
    }

    pub fn pop_matrix(&mut self) {
        match self.stack.pop() {
            Some(m) => self.change_matrix(|cur| *cur = m),
            None => log::debug!("pop_matrix: stack is empty"),
        }
    }

    pub fn reset_matrix(&mut self) {
        self.change_matrix(|m| *m = Affine2::IDENTITY);
    }

    pub fn translate(&mut self, x: f32, y: f32) {
        self.apply_matrix(Affine2::translation(x, y));
    }

    pub fn rotate(&mut self, angle: f32) {
        self.apply_matrix(Affine2::rotation(angle));
    }

    pub fn scale(&mut self, sx: f32, sy: f32) {
        self.apply_matrix(Affine2::scaling(sx, sy));
    }

    pub fn shear_x(&mut self, angle: f32) {
        self.apply_matrix(Affine2::shear_x(angle));
    }

    pub fn shear_y(&mut self, angle: f32) {
        self.apply_matrix(Affine2::shear_y(angle));
    }

    /// Post-multiplies `m`: it applies to coordinates before the current matrix.
    pub fn apply_matrix(&mut self, m: Affine2) {
        self.change_matrix(|cur| *cur = cur.then_apply(m));
    }

    pub fn set_matrix(&mut self, m: Affine2) {
        self.change_matrix(|cur| *cur = m);
    }

    /// Resizes the logical drawing area.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        if !viewport.is_valid() {
            log::warn!("set_viewport ignored: invalid viewport {viewport:?}");
            return;
        }
        self.before_transform_change();
        self.viewport = viewport;
        self.projection = Affine2::pixel_to_ndc(viewport);
        self.after_transform_change();
    }

    fn change_matrix(&mut self, f: impl FnOnce(&mut Affine2)) {
        self.before_transform_change();
        f(&mut self.matrix);
        self.after_transform_change();
    }

    fn before_transform_change(&mut self) {
        if !self.config.premultiply_matrices {
            self.flush();
        }
    }

    fn after_transform_change(&mut self) {
        self.detail = ArcDetail::from_transform(&self.projmodelview(), self.viewport);
    }

    // ── unsupported 3D calls ─────────────────────────────────────────────

    /// Logs a warning the first time `op` is called; returns whether it warned.
    fn unsupported(&mut self, op: &'static str) -> bool {
        let first = self.warned.insert(op);
        if first {
            log::warn!("{op}() is not available in 2D rendering; call ignored");
        }
        first
    }

    pub fn camera(&mut self) {
        self.unsupported("camera");
    }

    pub fn perspective(&mut self) {
        self.unsupported("perspective");
    }

    pub fn ortho(&mut self) {
        self.unsupported("ortho");
    }

    pub fn frustum(&mut self, _left: f32, _right: f32, _bottom: f32, _top: f32, _near: f32, _far: f32) {
        self.unsupported("frustum");
    }

    pub fn lights(&mut self) {
        self.unsupported("lights");
    }

    pub fn no_lights(&mut self) {
        self.unsupported("no_lights");
    }

    pub fn rotate_x(&mut self, _angle: f32) {
        self.unsupported("rotate_x");
    }

    pub fn rotate_y(&mut self, _angle: f32) {
        self.unsupported("rotate_y");
    }

    pub fn rotate_z(&mut self, _angle: f32) {
        self.unsupported("rotate_z");
    }

    pub fn translate_3d(&mut self, _x: f32, _y: f32, _z: f32) {
        self.unsupported("translate_3d");
    }

    pub fn scale_3d(&mut self, _x: f32, _y: f32, _z: f32) {
        self.unsupported("scale_3d");
    }

    pub fn vertex_3d(&mut self, _x: f32, _y: f32, _z: f32) {
        self.unsupported("vertex_3d");
    }

    pub fn box_3d(&mut self, _w: f32, _h: f32, _d: f32) {
        self.unsupported("box_3d");
    }

    pub fn sphere(&mut self, _r: f32) {
        self.unsupported("sphere");
    }
}

#[cfg(test)]
mod tests {
    use crate::backend::{DepthTest, SoftwareBackend};
    use crate::coords::{CornerRadii, Rect};
    use crate::render::SubmitMode;

    use super::*;

    const RED: PackedColor = PackedColor::rgb(255, 0, 0);
    const BLUE: PackedColor = PackedColor::rgb(0, 0, 255);

    fn renderer(config: RendererConfig) -> Renderer<SoftwareBackend> {
        let config = RendererConfig {
            viewport: Viewport::new(64.0, 64.0),
            ..config
        };
        let mut r = Renderer::new(SoftwareBackend::new(64, 64), config);
        r.begin_draw();
        r
    }

    fn square(r: &mut Renderer<SoftwareBackend>, x: f32, y: f32, size: f32) {
        r.rect(Rect::new(x, y, size, size), CornerRadii::zero());
    }

    const NO_TEX_FACTOR_VS: &str = r#"
        @group(0) @binding(0) var<uniform> transform: mat4x4<f32>;
        @group(0) @binding(1) var<uniform> texScale: vec2<f32>;

        struct VsOut {
            @builtin(position) clip: vec4<f32>,
            @location(0) color: vec4<f32>,
        };

        @vertex
        fn vs_main(
            @location(0) position: vec3<f32>,
            @location(1) texCoord: vec2<f32>,
            @location(2) color: vec4<f32>,
        ) -> VsOut {
            var out: VsOut;
            out.clip = transform * vec4<f32>(position.xy + texCoord * texScale * 0.0, position.z, 1.0);
            out.color = color;
            return out;
        }
    "#;

    const PASS_FS: &str = r#"
        @fragment
        fn fs_main(@location(0) color: vec4<f32>) -> @location(0) vec4<f32> {
            return color;
        }
    "#;

    // ── batching ─────────────────────────────────────────────────────────

    #[test]
    fn later_primitive_wins_where_overlapping() {
        let mut r = renderer(RendererConfig::default());
        r.no_stroke();
        r.fill(RED);
        square(&mut r, 10.0, 10.0, 30.0);
        r.fill(BLUE);
        square(&mut r, 10.0, 10.0, 30.0);
        r.end_draw();

        let b = r.backend();
        assert_eq!(b.draws().len(), 1, "both rects share one batch");
        assert_eq!(b.pixel(20, 20), [0, 0, 255, 255]);
        assert_eq!(b.pixel(5, 5), [0, 0, 0, 0]);
    }

    #[test]
    fn stroke_is_drawn_over_fill() {
        let mut r = renderer(RendererConfig::default());
        r.fill(RED);
        r.stroke(BLUE);
        r.stroke_weight(4.0);
        square(&mut r, 10.0, 10.0, 30.0);
        r.end_draw();

        assert_eq!(r.backend().pixel(25, 10), [0, 0, 255, 255]);
        assert_eq!(r.backend().pixel(25, 25), [255, 0, 0, 255]);
    }

    #[test]
    fn depth_wrap_flushes_and_clears_once() {
        let mut r = renderer(RendererConfig {
            depth_step: 0.25,
            ..RendererConfig::default()
        });
        r.no_stroke();
        assert_eq!(r.backend().depth_clears(), 1);

        for i in 0..8 {
            square(&mut r, i as f32, 0.0, 4.0);
        }
        assert!(r.backend().draws().is_empty());

        square(&mut r, 40.0, 40.0, 4.0);
        assert_eq!(r.backend().draws().len(), 1);
        assert_eq!(r.backend().draws()[0].vertex_count, 8 * 6);
        assert_eq!(r.backend().depth_clears(), 2);
        assert_eq!(r.pending_vertices(), 6);

        r.end_draw();
        assert_eq!(r.backend().draws().len(), 2);
        assert_eq!(r.backend().pixel(41, 41), [255, 255, 255, 255]);
    }

    #[test]
    fn full_batch_is_flushed_before_the_next_shape() {
        let mut r = renderer(RendererConfig {
            batch_capacity: 12,
            ..RendererConfig::default()
        });
        r.no_stroke();
        for i in 0..3 {
            square(&mut r, i as f32 * 10.0, 0.0, 5.0);
        }
        assert_eq!(r.backend().draws().len(), 1);
        assert_eq!(r.backend().draws()[0].vertex_count, 12);
        assert_eq!(r.pending_vertices(), 6);
    }

    #[test]
    fn oversized_shape_is_split_on_triangles() {
        let mut r = renderer(RendererConfig {
            batch_capacity: 9,
            ..RendererConfig::default()
        });
        r.no_stroke();
        r.ellipse(Rect::new(0.0, 0.0, 60.0, 60.0));
        r.end_draw();

        let draws = r.backend().draws();
        assert!(draws.len() > 1);
        assert!(draws.iter().all(|d| d.vertex_count <= 9 && d.vertex_count % 3 == 0));
    }

    #[test]
    fn immediate_mode_draws_every_primitive() {
        let mut r = renderer(RendererConfig {
            submit: SubmitMode::Immediate,
            ..RendererConfig::default()
        });
        r.no_stroke();
        for i in 0..3 {
            square(&mut r, i as f32 * 10.0, 0.0, 5.0);
        }
        let b = r.backend();
        assert_eq!(b.draws().len(), 3);
        assert!(b.draws().iter().all(|d| d.depth_test == DepthTest::LessEqual));
    }

    #[test]
    fn flush_without_geometry_draws_nothing() {
        let mut r = renderer(RendererConfig::default());
        r.flush();
        r.end_draw();
        assert!(r.backend().draws().is_empty());
    }

    // ── transforms ───────────────────────────────────────────────────────

    #[test]
    fn deferred_mode_flushes_on_transform_change() {
        let mut r = renderer(RendererConfig {
            premultiply_matrices: false,
            ..RendererConfig::default()
        });
        r.no_stroke();
        square(&mut r, 0.0, 0.0, 10.0);
        r.translate(20.0, 0.0);
        assert_eq!(r.backend().draws().len(), 1);

        square(&mut r, 0.0, 0.0, 10.0);
        r.end_draw();
        assert_eq!(r.backend().draws().len(), 2);
        assert_eq!(r.backend().pixel(25, 5), [255, 255, 255, 255]);
    }

    #[test]
    fn premultiplied_mode_keeps_batching_across_transforms() {
        let mut r = renderer(RendererConfig::default());
        r.no_stroke();
        square(&mut r, 0.0, 0.0, 10.0);
        r.translate(20.0, 0.0);
        r.rotate(0.3);
        square(&mut r, 0.0, 0.0, 10.0);
        assert!(r.backend().draws().is_empty());
        r.end_draw();
        assert_eq!(r.backend().draws().len(), 1);
    }

    #[test]
    fn both_transform_modes_render_the_same_image() {
        let draw = |premultiply| {
            let mut r = renderer(RendererConfig {
                premultiply_matrices: premultiply,
                ..RendererConfig::default()
            });
            r.fill(RED);
            r.stroke(BLUE);
            r.stroke_weight(3.0);
            r.translate(32.0, 32.0);
            r.push_matrix();
            r.rotate(0.5);
            square(&mut r, -10.0, -10.0, 20.0);
            r.pop_matrix();
            r.scale(2.0, 1.0);
            r.line(Vec2::new(-10.0, 20.0), Vec2::new(10.0, 20.0));
            r.read_pixels().unwrap()
        };
        assert_eq!(draw(true), draw(false));
    }

    #[test]
    fn matrix_stack_restores_and_tolerates_underflow() {
        let mut r = renderer(RendererConfig::default());
        r.translate(5.0, 6.0);
        r.push_matrix();
        r.scale(3.0, 3.0);
        r.pop_matrix();
        assert_eq!(r.matrix(), Affine2::translation(5.0, 6.0));
        r.pop_matrix();
        assert_eq!(r.matrix(), Affine2::translation(5.0, 6.0));
    }

    #[test]
    fn zooming_raises_arc_detail() {
        let mut r = renderer(RendererConfig::default());
        let before = r.arc_detail().segments(10.0, core::f32::consts::TAU);
        r.scale(8.0, 8.0);
        let after = r.arc_detail().segments(10.0, core::f32::consts::TAU);
        assert!(after > before, "{after} <= {before}");
    }

    // ── shaders ──────────────────────────────────────────────────────────

    #[test]
    fn default_shader_is_compiled_lazily() {
        let mut r = renderer(RendererConfig::default());
        assert!(r.default_program.is_none());
        square(&mut r, 0.0, 0.0, 4.0);
        r.end_draw();
        assert!(r.default_program.is_some());
    }

    #[test]
    fn incompatible_shader_keeps_the_active_one() {
        let mut r = renderer(RendererConfig::default());
        let good = r.compile_shader(&ShaderSource::default_2d()).unwrap();
        r.set_shader(good.clone()).unwrap();

        let bad = r.compile_shader(&ShaderSource::new(NO_TEX_FACTOR_VS, PASS_FS)).unwrap();
        match r.set_shader(bad) {
            Err(ShaderError::Incompatible { missing }) => assert_eq!(missing, vec!["texFactor"]),
            other => panic!("unexpected: {other:?}"),
        }

        square(&mut r, 0.0, 0.0, 4.0);
        r.end_draw();
        assert_eq!(r.backend().draws()[0].program, good.id());
    }

    #[test]
    fn shader_change_flushes_and_reset_restores_default() {
        let mut r = renderer(RendererConfig::default());
        let custom = r.compile_shader(&ShaderSource::default_2d()).unwrap();

        square(&mut r, 0.0, 0.0, 4.0);
        r.set_shader(custom.clone()).unwrap();
        assert_eq!(r.backend().draws().len(), 1);

        square(&mut r, 0.0, 0.0, 4.0);
        r.reset_shader();
        square(&mut r, 0.0, 0.0, 4.0);
        r.end_draw();

        let programs: Vec<u32> = r.backend().draws().iter().map(|d| d.program).collect();
        assert_eq!(programs.len(), 3);
        assert_eq!(programs[1], custom.id());
        assert_eq!(programs[0], programs[2]);
        assert_ne!(programs[0], custom.id());
    }

    #[test]
    fn broken_source_reports_compile_error() {
        let mut r = renderer(RendererConfig::default());
        let err = r.compile_shader(&ShaderSource::new("fn broken(", PASS_FS)).unwrap_err();
        assert!(matches!(err, ShaderError::Compile { .. }));
    }

    // ── textures ─────────────────────────────────────────────────────────

    fn textured_quad(r: &mut Renderer<SoftwareBackend>, x: f32) {
        r.begin_shape(ShapeKind::Quads);
        r.vertex_uv(Vec2::new(x, 0.0), Vec2::new(0.0, 0.0));
        r.vertex_uv(Vec2::new(x + 8.0, 0.0), Vec2::new(2.0, 0.0));
        r.vertex_uv(Vec2::new(x + 8.0, 8.0), Vec2::new(2.0, 2.0));
        r.vertex_uv(Vec2::new(x, 8.0), Vec2::new(0.0, 2.0));
        r.end_shape(EndMode::Close);
    }

    #[test]
    fn texture_change_flushes() {
        let mut r = renderer(RendererConfig::default());
        r.no_stroke();
        let green = r.create_texture(2, 2, &[0, 255, 0, 255].repeat(4)).unwrap();
        let blue = r.create_texture(2, 2, &[0, 0, 255, 255].repeat(4)).unwrap();

        r.texture(Some(green));
        textured_quad(&mut r, 0.0);
        assert!(r.backend().draws().is_empty());

        r.texture(Some(blue));
        assert_eq!(r.backend().draws().len(), 1);
        assert_eq!(r.backend().draws()[0].texture, Some(green.id));
        assert_eq!(r.backend().draws()[0].uniforms.tex_scale, [0.5, 0.5]);

        textured_quad(&mut r, 20.0);
        r.end_draw();
        assert_eq!(r.backend().pixel(4, 4), [0, 255, 0, 255]);
        assert_eq!(r.backend().pixel(24, 4), [0, 0, 255, 255]);
    }

    #[test]
    fn tint_colors_textured_vertices() {
        let mut r = renderer(RendererConfig::default());
        r.no_stroke();
        let white = r.create_texture(1, 1, &[255; 4]).unwrap();
        r.texture(Some(white));
        r.tint(RED);
        textured_quad(&mut r, 0.0);
        r.end_draw();
        assert_eq!(r.backend().pixel(4, 4), [255, 0, 0, 255]);
    }

    // ── misc ─────────────────────────────────────────────────────────────

    #[test]
    fn unsupported_operations_warn_once() {
        let mut r = renderer(RendererConfig::default());
        assert!(r.unsupported("rotate_x"));
        r.rotate_x(1.0);
        r.sphere(2.0);
        r.sphere(3.0);
        r.camera();
        assert_eq!(r.warned.len(), 3);
        assert!(!r.unsupported("camera"));
        assert!(r.backend().draws().is_empty());
    }

    #[test]
    fn background_draws_pending_geometry_first() {
        let mut r = renderer(RendererConfig::default());
        r.no_stroke();
        square(&mut r, 0.0, 0.0, 10.0);
        r.background(RED);
        assert_eq!(r.backend().draws().len(), 1);
        assert_eq!(r.backend().pixel(5, 5), [255, 0, 0, 255]);
    }

    #[test]
    fn read_pixels_flushes() {
        let mut r = renderer(RendererConfig::default());
        r.no_stroke();
        square(&mut r, 0.0, 0.0, 10.0);
        let pixels = r.read_pixels().unwrap();
        assert_eq!(pixels.len(), 64 * 64 * 4);
        assert_eq!(&pixels[..4], &[255, 255, 255, 255]);
    }

    #[test]
    fn written_pixels_land_over_the_pending_batch() {
        let mut r = renderer(RendererConfig::default());
        r.no_stroke();
        square(&mut r, 0.0, 0.0, 10.0);
        let red: Vec<u8> = [255, 0, 0, 255].repeat(64 * 64);
        r.write_pixels(&red).unwrap();
        assert_eq!(r.backend().draws().len(), 1);
        assert_eq!(r.pending_vertices(), 0);
        assert_eq!(r.backend().pixel(5, 5), [255, 0, 0, 255]);
        assert_eq!(r.read_pixels().unwrap(), red);
    }

    #[test]
    fn no_fill_no_stroke_draws_nothing() {
        let mut r = renderer(RendererConfig::default());
        r.no_fill();
        r.no_stroke();
        square(&mut r, 0.0, 0.0, 10.0);
        assert_eq!(r.pending_vertices(), 0);
    }
}
