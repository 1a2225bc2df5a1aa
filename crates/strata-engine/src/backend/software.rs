use std::rc::Rc;

use crate::batch::GpuVertex;
use crate::error::{BackendError, ShaderError};
use crate::paint::PackedColor;
use crate::shader::{ProgramInterface, ShaderBindings, ShaderSource, UniformType};

use super::{
    BufferId, DepthTest, GpuBackend, ShaderCompiler, ShaderProgram, TextureId, TextureRef, Uniforms,
};

/// Program compiled by [`SoftwareBackend`].
///
/// Sources are parsed, validated and linked for real; rasterization then follows the
/// fixed behavior of the bundled program regardless of the WGSL body.
#[derive(Debug, Clone)]
pub struct SoftwareProgram {
    id: u32,
    interface: Rc<ProgramInterface>,
}

impl SoftwareProgram {
    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }
}

impl ShaderProgram for SoftwareProgram {
    fn attribute_location(&self, name: &str) -> Option<u32> {
        self.interface.attribute_location(name)
    }

    fn uniform_location(&self, name: &str) -> Option<u32> {
        self.interface.uniform_location(name)
    }

    fn uniform_type(&self, name: &str) -> Option<UniformType> {
        self.interface.uniform_type(name)
    }
}

/// One recorded `draw_triangles` call.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    pub program: u32,
    pub vertex_count: u32,
    pub texture: Option<TextureId>,
    pub depth_test: DepthTest,
    pub bindings: ShaderBindings,
    pub uniforms: Uniforms,
}

#[derive(Debug, Clone)]
struct Image {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

#[derive(Debug, Clone)]
struct Bound {
    program: u32,
    bindings: ShaderBindings,
    uniforms: Uniforms,
}

/// CPU rasterizer implementing [`GpuBackend`].
///
/// Keeps an RGBA8 color buffer and an `f32` depth buffer, and records every draw call so
/// tests can inspect batching decisions.
#[derive(Debug, Clone)]
pub struct SoftwareBackend {
    width: u32,
    height: u32,
    color: Vec<u8>,
    depth: Vec<f32>,
    buffers: Vec<Vec<u8>>,
    images: Vec<Image>,
    bound: Option<Bound>,
    texture: Option<TextureId>,
    depth_test: DepthTest,
    next_program: u32,
    draws: Vec<DrawCall>,
    depth_clears: usize,
}

impl SoftwareBackend {
    /// Creates a `width` x `height` target cleared to transparent black.
    pub fn new(width: u32, height: u32) -> Self {
        let pixels = width as usize * height as usize;
        Self {
            width,
            height,
            color: vec![0; pixels * 4],
            depth: vec![1.0; pixels],
            buffers: Vec::new(),
            images: Vec::new(),
            bound: None,
            texture: None,
            depth_test: DepthTest::default(),
            next_program: 0,
            draws: Vec::new(),
            depth_clears: 0,
        }
    }

    /// Every draw issued so far, in order.
    #[inline]
    pub fn draws(&self) -> &[DrawCall] {
        &self.draws
    }

    #[inline]
    pub fn depth_clears(&self) -> usize {
        self.depth_clears
    }

    #[inline]
    pub fn depth_test(&self) -> DepthTest {
        self.depth_test
    }

    /// Color at pixel `(x, y)`; out-of-range coordinates read as transparent.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        if x >= self.width || y >= self.height {
            return [0; 4];
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        [self.color[i], self.color[i + 1], self.color[i + 2], self.color[i + 3]]
    }

    fn rasterize(&mut self, tri: [GpuVertex; 3], bound: &Bound) {
        let m = &bound.uniforms.transform;
        let (w, h) = (self.width as f32, self.height as f32);

        // clip space -> pixel space, depth remapped like the bundled vertex stage
        let screen = tri.map(|v| {
            let [x, y, z] = v.position;
            let nx = m[0] * x + m[4] * y + m[12];
            let ny = m[1] * x + m[5] * y + m[13];
            [(nx + 1.0) * 0.5 * w, (1.0 - ny) * 0.5 * h, z * 0.5 + 0.5]
        });

        let edge = |a: [f32; 3], b: [f32; 3], px: f32, py: f32| {
            (b[0] - a[0]) * (py - a[1]) - (b[1] - a[1]) * (px - a[0])
        };
        let area = edge(screen[0], screen[1], screen[2][0], screen[2][1]);
        if area == 0.0 || !area.is_finite() {
            return;
        }

        let min_x = screen.iter().map(|p| p[0]).fold(f32::INFINITY, f32::min).floor().max(0.0) as u32;
        let min_y = screen.iter().map(|p| p[1]).fold(f32::INFINITY, f32::min).floor().max(0.0) as u32;
        let max_x = screen.iter().map(|p| p[0]).fold(f32::NEG_INFINITY, f32::max).ceil().min(w) as u32;
        let max_y = screen.iter().map(|p| p[1]).fold(f32::NEG_INFINITY, f32::max).ceil().min(h) as u32;

        let colors = tri.map(|v| v.packed_color().to_f32());
        // borrows only `images`; the framebuffer fields stay writable below
        let image = self.texture.and_then(|id| self.images.get(id.0 as usize));

        for py in min_y..max_y {
            for px in min_x..max_x {
                let (cx, cy) = (px as f32 + 0.5, py as f32 + 0.5);
                let b0 = edge(screen[1], screen[2], cx, cy) / area;
                let b1 = edge(screen[2], screen[0], cx, cy) / area;
                let b2 = edge(screen[0], screen[1], cx, cy) / area;
                if b0 < 0.0 || b1 < 0.0 || b2 < 0.0 {
                    continue;
                }

                let idx = py as usize * self.width as usize + px as usize;
                let z = b0 * screen[0][2] + b1 * screen[1][2] + b2 * screen[2][2];
                if !self.depth_test.passes(z, self.depth[idx]) {
                    continue;
                }
                self.depth[idx] = z;

                let lerp = |f: &dyn Fn(&GpuVertex) -> f32| b0 * f(&tri[0]) + b1 * f(&tri[1]) + b2 * f(&tri[2]);
                let mut src = [0.0f32; 4];
                for (c, out) in src.iter_mut().enumerate() {
                    *out = b0 * colors[0][c] + b1 * colors[1][c] + b2 * colors[2][c];
                }

                let factor = lerp(&|v| v.tex_factor);
                if factor > 0.0 {
                    let u = lerp(&|v| v.uv[0]) * bound.uniforms.tex_scale[0];
                    let v = lerp(&|v| v.uv[1]) * bound.uniforms.tex_scale[1];
                    let texel = sample(image, u, v);
                    for c in 0..4 {
                        src[c] += (texel[c] * src[c] - src[c]) * factor;
                    }
                }

                blend(&mut self.color[idx * 4..idx * 4 + 4], src);
            }
        }
    }
}

/// Nearest-neighbour sample with clamp-to-edge; no image samples white.
fn sample(image: Option<&Image>, u: f32, v: f32) -> [f32; 4] {
    let Some(img) = image else {
        return [1.0; 4];
    };
    let x = ((u * img.width as f32).floor().max(0.0) as u32).min(img.width.saturating_sub(1));
    let y = ((v * img.height as f32).floor().max(0.0) as u32).min(img.height.saturating_sub(1));
    let i = (y as usize * img.width as usize + x as usize) * 4;
    match img.rgba.get(i..i + 4) {
        Some(px) => [px[0], px[1], px[2], px[3]].map(|c| c as f32 / 255.0),
        None => [1.0; 4],
    }
}

/// Straight-alpha "over" blend into an RGBA8 pixel.
fn blend(dst: &mut [u8], src: [f32; 4]) {
    let a = src[3].clamp(0.0, 1.0);
    for c in 0..3 {
        let d = dst[c] as f32 / 255.0;
        dst[c] = ((src[c] * a + d * (1.0 - a)).clamp(0.0, 1.0) * 255.0).round() as u8;
    }
    let da = dst[3] as f32 / 255.0;
    dst[3] = ((a + da * (1.0 - a)).clamp(0.0, 1.0) * 255.0).round() as u8;
}

impl ShaderCompiler for SoftwareBackend {
    type Program = SoftwareProgram;

    fn compile(&mut self, source: &ShaderSource) -> Result<SoftwareProgram, ShaderError> {
        let interface = ProgramInterface::from_source(source)?;
        self.next_program += 1;
        Ok(SoftwareProgram {
            id: self.next_program,
            interface: Rc::new(interface),
        })
    }
}

impl GpuBackend for SoftwareBackend {
    fn create_buffer(&mut self, size: u64) -> BufferId {
        self.buffers.push(Vec::with_capacity(size as usize));
        BufferId(self.buffers.len() as u32 - 1)
    }

    fn upload_buffer_data(&mut self, buffer: BufferId, bytes: &[u8]) {
        match self.buffers.get_mut(buffer.0 as usize) {
            Some(data) => {
                data.clear();
                data.extend_from_slice(bytes);
            }
            None => log::warn!("upload to unknown buffer {buffer:?} ignored"),
        }
    }

    fn bind_program(&mut self, program: &SoftwareProgram, bindings: &ShaderBindings, uniforms: &Uniforms) {
        self.bound = Some(Bound {
            program: program.id,
            bindings: *bindings,
            uniforms: *uniforms,
        });
    }

    fn unbind_program(&mut self) {
        self.bound = None;
    }

    fn bind_texture(&mut self, texture: Option<TextureId>) {
        self.texture = texture;
    }

    fn set_depth_test(&mut self, test: DepthTest) {
        self.depth_test = test;
    }

    fn draw_triangles(&mut self, buffer: BufferId, vertex_count: u32) {
        let Some(bound) = self.bound.clone() else {
            log::warn!("draw without a bound program ignored");
            return;
        };
        let Some(bytes) = self.buffers.get(buffer.0 as usize) else {
            log::warn!("draw from unknown buffer {buffer:?} ignored");
            return;
        };

        let vertices: Vec<GpuVertex> = bytes
            .chunks_exact(GpuVertex::STRIDE as usize)
            .take(vertex_count as usize)
            .map(bytemuck::pod_read_unaligned::<GpuVertex>)
            .collect();

        self.draws.push(DrawCall {
            program: bound.program,
            vertex_count,
            texture: self.texture,
            depth_test: self.depth_test,
            bindings: bound.bindings,
            uniforms: bound.uniforms,
        });

        for tri in vertices.chunks_exact(3) {
            self.rasterize([tri[0], tri[1], tri[2]], &bound);
        }
    }

    fn clear_depth_buffer(&mut self) {
        self.depth.fill(1.0);
        self.depth_clears += 1;
    }

    fn clear(&mut self, color: PackedColor) {
        let rgba = color.to_rgba8();
        for px in self.color.chunks_exact_mut(4) {
            px.copy_from_slice(&rgba);
        }
    }

    fn create_texture(&mut self, width: u32, height: u32, rgba: &[u8]) -> Result<TextureRef, BackendError> {
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(BackendError::Gpu(format!(
                "texture data is {} bytes, expected {expected} for {width}x{height}",
                rgba.len()
            )));
        }
        self.images.push(Image {
            width,
            height,
            rgba: rgba.to_vec(),
        });
        Ok(TextureRef {
            id: TextureId(self.images.len() as u32 - 1),
            width,
            height,
        })
    }

    fn target_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn read_pixels(&mut self) -> Result<Vec<u8>, BackendError> {
        Ok(self.color.clone())
    }

    fn write_pixels(&mut self, rgba: &[u8]) -> Result<(), BackendError> {
        if rgba.len() != self.color.len() {
            return Err(BackendError::Gpu(format!(
                "pixel data is {} bytes, expected {} for {}x{}",
                rgba.len(),
                self.color.len(),
                self.width,
                self.height
            )));
        }
        self.color.copy_from_slice(rgba);
        Ok(())
    }
}
