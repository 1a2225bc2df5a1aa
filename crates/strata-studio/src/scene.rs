//! The animated demo drawing, shared by the window and offscreen modes.

use core::f32::consts::{FRAC_PI_2, PI, TAU};

use strata_engine::backend::{GpuBackend, TextureRef};
use strata_engine::coords::{CornerRadii, Rect, Vec2};
use strata_engine::paint::PackedColor;
use strata_engine::render::{ArcMode, EndMode, Renderer, ShapeKind, StrokeCap, StrokeJoin};

const INK: PackedColor = PackedColor::rgb(24, 26, 33);
const PAPER: PackedColor = PackedColor::rgb(242, 238, 228);
const CORAL: PackedColor = PackedColor::rgb(238, 108, 77);
const TEAL: PackedColor = PackedColor::rgb(42, 157, 143);
const GOLD: PackedColor = PackedColor::rgb(233, 196, 106);
const SKY: PackedColor = PackedColor::from_rgba8(69, 123, 157, 200);

/// Logical size the scene is laid out for.
pub const SCENE_SIZE: (f32, f32) = (820.0, 560.0);

pub struct Scene {
    checker: Option<TextureRef>,
}

impl Scene {
    pub fn new<B: GpuBackend>(renderer: &mut Renderer<B>) -> Self {
        let checker = match renderer.create_texture(8, 8, &checkerboard(8)) {
            Ok(t) => Some(t),
            Err(e) => {
                log::warn!("checker texture unavailable: {e}");
                None
            }
        };
        Self { checker }
    }

    /// Draws one frame at time `t` (seconds).
    pub fn draw<B: GpuBackend>(&self, r: &mut Renderer<B>, t: f32) {
        r.begin_draw();
        r.background(PAPER);

        self.tiles(r, t);
        self.pies(r, t);
        self.outline_with_hole(r);
        self.spline(r, t);
        self.strokes(r);
        self.textured(r, t);

        r.end_draw();
    }

    fn tiles<B: GpuBackend>(&self, r: &mut Renderer<B>, t: f32) {
        r.stroke(INK);
        r.stroke_weight(3.0);
        r.stroke_join(StrokeJoin::Round);
        for i in 0..5 {
            let phase = t + i as f32 * 0.4;
            r.push_matrix();
            r.translate(90.0 + i as f32 * 80.0, 90.0);
            r.rotate(phase.sin() * 0.6);
            r.fill(if i % 2 == 0 { CORAL } else { TEAL });
            let radius = 4.0 + 10.0 * (0.5 + 0.5 * phase.cos());
            r.rect(Rect::new(-28.0, -28.0, 56.0, 56.0), CornerRadii::all(radius));
            r.pop_matrix();
        }
    }

    fn pies<B: GpuBackend>(&self, r: &mut Renderer<B>, t: f32) {
        let sweep = FRAC_PI_2 + (t * 0.8).sin().abs() * PI;
        let modes = [ArcMode::OpenPie, ArcMode::Open, ArcMode::Chord, ArcMode::Pie];
        r.fill(GOLD);
        r.stroke(INK);
        r.stroke_weight(2.0);
        for (i, mode) in modes.into_iter().enumerate() {
            let bounds = Rect::new(40.0 + i as f32 * 110.0, 170.0, 90.0, 90.0);
            r.arc(bounds, t, t + sweep, mode);
        }

        r.no_stroke();
        r.fill(SKY);
        let pulse = 1.0 + 0.15 * (t * 2.0).sin();
        r.ellipse(Rect::new(520.0, 150.0, 120.0 * pulse, 80.0));
        r.ellipse(Rect::new(600.0, 190.0, 90.0, 90.0 * pulse));
    }

    fn outline_with_hole<B: GpuBackend>(&self, r: &mut Renderer<B>) {
        r.fill(TEAL);
        r.stroke(INK);
        r.stroke_weight(2.0);
        r.begin_shape(ShapeKind::Polygon);
        r.vertex(Vec2::new(60.0, 300.0));
        r.bezier_vertex(Vec2::new(160.0, 270.0), Vec2::new(220.0, 330.0), Vec2::new(240.0, 420.0));
        r.quadratic_vertex(Vec2::new(150.0, 480.0), Vec2::new(60.0, 420.0));
        r.begin_contour();
        r.vertex(Vec2::new(110.0, 340.0));
        r.vertex(Vec2::new(110.0, 400.0));
        r.vertex(Vec2::new(170.0, 400.0));
        r.vertex(Vec2::new(170.0, 340.0));
        r.end_contour();
        r.end_shape(EndMode::Close);
    }

    fn spline<B: GpuBackend>(&self, r: &mut Renderer<B>, t: f32) {
        r.no_fill();
        r.stroke(CORAL);
        r.stroke_weight(5.0);
        r.stroke_cap(StrokeCap::Round);
        r.begin_shape(ShapeKind::Polygon);
        for i in 0..9 {
            let x = 280.0 + i as f32 * 30.0;
            let y = 380.0 + (t * 1.5 + i as f32 * 0.9).sin() * 50.0;
            r.curve_vertex(Vec2::new(x, y));
        }
        r.end_shape(EndMode::Open);
    }

    fn strokes<B: GpuBackend>(&self, r: &mut Renderer<B>) {
        let caps = [StrokeCap::Butt, StrokeCap::Project, StrokeCap::Round];
        r.stroke(INK);
        r.stroke_weight(10.0);
        for (i, cap) in caps.into_iter().enumerate() {
            r.stroke_cap(cap);
            let y = 470.0 + i as f32 * 25.0;
            r.line(Vec2::new(300.0, y), Vec2::new(460.0, y));
        }

        r.stroke_weight(6.0);
        for i in 0..12 {
            let a = i as f32 / 12.0 * TAU;
            r.point(Vec2::new(560.0 + a.cos() * 40.0, 460.0 + a.sin() * 40.0));
        }
    }

    fn textured<B: GpuBackend>(&self, r: &mut Renderer<B>, t: f32) {
        let Some(checker) = self.checker else {
            return;
        };
        r.no_stroke();
        r.push_matrix();
        r.translate(700.0, 440.0);
        r.rotate(t * 0.5);
        r.texture(Some(checker));
        r.tint(PackedColor::from_rgba8(255, 255, 255, 230));
        r.begin_shape(ShapeKind::Quads);
        let (w, h) = (checker.width as f32, checker.height as f32);
        r.vertex_uv(Vec2::new(-50.0, -50.0), Vec2::new(0.0, 0.0));
        r.vertex_uv(Vec2::new(50.0, -50.0), Vec2::new(w, 0.0));
        r.vertex_uv(Vec2::new(50.0, 50.0), Vec2::new(w, h));
        r.vertex_uv(Vec2::new(-50.0, 50.0), Vec2::new(0.0, h));
        r.end_shape(EndMode::Close);
        r.texture(None);
        r.no_tint();
        r.pop_matrix();
    }
}

fn checkerboard(n: u32) -> Vec<u8> {
    (0..n * n)
        .flat_map(|i| {
            let (x, y) = (i % n, i / n);
            if (x + y) % 2 == 0 { [255, 255, 255, 255] } else { [40, 40, 48, 255] }
        })
        .collect()
}
