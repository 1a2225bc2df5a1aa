use std::collections::HashMap;
use std::rc::Rc;

use crate::batch::GpuVertex;
use crate::error::{BackendError, ShaderError};
use crate::paint::PackedColor;
use crate::shader::{ProgramInterface, ShaderBindings, ShaderSource, UniformType, UNIFORM_GROUP};

use super::{
    BufferId, DepthTest, GpuBackend, ShaderCompiler, ShaderProgram, TextureId, TextureRef, Uniforms,
};

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
const OFFSCREEN_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

// 4x4 f32 matrix, vec2 padded to 16 bytes.
const TRANSFORM_SIZE: u64 = 64;
const TEX_SCALE_SIZE: u64 = 16;

#[derive(Debug)]
struct Modules {
    vertex: wgpu::ShaderModule,
    fragment: wgpu::ShaderModule,
}

/// Program compiled by [`WgpuBackend`]: naga-reflected interface plus both shader modules.
#[derive(Debug, Clone)]
pub struct WgpuProgram {
    id: u32,
    interface: Rc<ProgramInterface>,
    modules: Rc<Modules>,
}

impl WgpuProgram {
    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }
}

impl ShaderProgram for WgpuProgram {
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

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
struct PipelineKey {
    program: u32,
    bindings: ShaderBindings,
    depth_test: DepthTest,
    format: wgpu::TextureFormat,
}

struct UniformGroup {
    layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
}

enum Target {
    Detached,
    View(wgpu::TextureView),
    Offscreen {
        texture: wgpu::Texture,
        view: wgpu::TextureView,
    },
}

impl Target {
    fn view(&self) -> Option<&wgpu::TextureView> {
        match self {
            Target::Detached => None,
            Target::View(view) | Target::Offscreen { view, .. } => Some(view),
        }
    }
}

struct Image {
    _texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
}

/// [`GpuBackend`] on top of wgpu.
///
/// Every draw is recorded into its own render pass and submitted immediately, which keeps
/// command order identical to call order. Color and depth are loaded, never discarded, so
/// consecutive flushes composite into the same frame.
pub struct WgpuBackend {
    device: wgpu::Device,
    queue: wgpu::Queue,
    format: wgpu::TextureFormat,
    target: Target,
    size: (u32, u32),
    depth: Option<(wgpu::TextureView, (u32, u32))>,

    buffers: Vec<wgpu::Buffer>,
    transform_ubo: wgpu::Buffer,
    tex_scale_ubo: wgpu::Buffer,

    sampler: wgpu::Sampler,
    texture_layout: wgpu::BindGroupLayout,
    white: wgpu::BindGroup,
    _white_texture: wgpu::Texture,
    images: Vec<Image>,

    uniform_groups: HashMap<(u32, u32), UniformGroup>,
    pipelines: HashMap<PipelineKey, wgpu::RenderPipeline>,

    bound: Option<(WgpuProgram, ShaderBindings)>,
    texture: Option<TextureId>,
    depth_test: DepthTest,
    next_program: u32,
    warned_detached: bool,
}

impl WgpuBackend {
    /// Creates a backend drawing into views of `format`.
    ///
    /// No target is attached; call [`WgpuBackend::set_target`] before each frame.
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue, format: wgpu::TextureFormat) -> Self {
        let uniform_buffer = |label, size| {
            device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(label),
                size,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            })
        };
        let transform_ubo = uniform_buffer("strata transform ubo", TRANSFORM_SIZE);
        let tex_scale_ubo = uniform_buffer("strata tex scale ubo", TEX_SCALE_SIZE);

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("strata image sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });

        let texture_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("strata image bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let white_texture = upload_rgba(device, queue, "strata white texel", 1, 1, &[255; 4]);
        let white = image_bind_group(device, &texture_layout, &sampler, &white_texture);

        Self {
            device: device.clone(),
            queue: queue.clone(),
            format,
            target: Target::Detached,
            size: (0, 0),
            depth: None,
            buffers: Vec::new(),
            transform_ubo,
            tex_scale_ubo,
            sampler,
            texture_layout,
            white,
            _white_texture: white_texture,
            images: Vec::new(),
            uniform_groups: HashMap::new(),
            pipelines: HashMap::new(),
            bound: None,
            texture: None,
            depth_test: DepthTest::default(),
            next_program: 0,
            warned_detached: false,
        }
    }

    /// Creates a backend with its own `width` x `height` RGBA8 target that supports
    /// [`GpuBackend::read_pixels`] and [`GpuBackend::write_pixels`].
    pub fn offscreen(device: &wgpu::Device, queue: &wgpu::Queue, width: u32, height: u32) -> Self {
        let mut backend = Self::new(device, queue, OFFSCREEN_FORMAT);
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("strata offscreen target"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: OFFSCREEN_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT
                | wgpu::TextureUsages::COPY_SRC
                | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        backend.target = Target::Offscreen { texture, view };
        backend.size = (width.max(1), height.max(1));
        backend
    }

    /// Attaches a color view (typically the current surface texture) of the format given
    /// to [`WgpuBackend::new`].
    pub fn set_target(&mut self, view: wgpu::TextureView, width: u32, height: u32) {
        self.target = Target::View(view);
        self.size = (width, height);
    }

    /// Releases the attached view so the surface texture can be presented.
    pub fn detach_target(&mut self) {
        self.target = Target::Detached;
    }

    #[inline]
    pub fn format(&self) -> wgpu::TextureFormat {
        self.format
    }

    fn ensure_depth(&mut self) {
        if matches!(&self.depth, Some((_, size)) if *size == self.size) {
            return;
        }
        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("strata depth"),
            size: wgpu::Extent3d {
                width: self.size.0.max(1),
                height: self.size.1.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        self.depth = Some((view, self.size));

        // A fresh depth texture has undefined contents until cleared.
        self.run_pass("strata depth init", None, Some(1.0), None);
    }

    fn ensure_uniform_group(&mut self, bindings: &ShaderBindings) {
        let key = (bindings.transform, bindings.tex_scale);
        if self.uniform_groups.contains_key(&key) {
            return;
        }

        let entry = |binding, size| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: wgpu::BufferSize::new(size),
            },
            count: None,
        };
        let layout = self.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("strata uniform bgl"),
            entries: &[
                entry(bindings.transform, TRANSFORM_SIZE),
                entry(bindings.tex_scale, 8),
            ],
        });
        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("strata uniform bind group"),
            layout: &layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: bindings.transform,
                    resource: self.transform_ubo.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: bindings.tex_scale,
                    resource: self.tex_scale_ubo.as_entire_binding(),
                },
            ],
        });
        self.uniform_groups.insert(key, UniformGroup { layout, bind_group });
    }

    fn ensure_pipeline(&mut self, key: PipelineKey, program: &WgpuProgram) {
        if self.pipelines.contains_key(&key) {
            return;
        }
        self.ensure_uniform_group(&key.bindings);
        let Some(uniforms) = self.uniform_groups.get(&(key.bindings.transform, key.bindings.tex_scale)) else {
            return;
        };

        let layout = self.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("strata pipeline layout"),
            bind_group_layouts: &[&uniforms.layout, &self.texture_layout],
            immediate_size: 0,
        });

        let attributes = vertex_attributes(&key.bindings);
        let vertex_layout = wgpu::VertexBufferLayout {
            array_stride: GpuVertex::STRIDE,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &attributes,
        };

        let pipeline = self.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("strata pipeline"),
            layout: Some(&layout),

            vertex: wgpu::VertexState {
                module: &program.modules.vertex,
                entry_point: Some(program.interface.vertex_entry.as_str()),
                compilation_options: Default::default(),
                buffers: &[vertex_layout],
            },

            fragment: Some(wgpu::FragmentState {
                module: &program.modules.fragment,
                entry_point: Some(program.interface.fragment_entry.as_str()),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: key.format,
                    blend: Some(straight_alpha_blend()),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: match key.depth_test {
                    DepthTest::Less => wgpu::CompareFunction::Less,
                    DepthTest::LessEqual => wgpu::CompareFunction::LessEqual,
                },
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        log::debug!("created pipeline for program {} ({:?})", key.program, key.depth_test);
        self.pipelines.insert(key, pipeline);
    }

    /// Records and submits one pass that optionally clears color, clears depth, or draws.
    fn run_pass(
        &mut self,
        label: &str,
        clear_color: Option<wgpu::Color>,
        clear_depth: Option<f32>,
        draw: Option<(PipelineKey, BufferId, u32)>,
    ) {
        let Some(color_view) = self.target.view() else {
            if !self.warned_detached {
                log::warn!("no render target attached; GPU commands are dropped");
                self.warned_detached = true;
            }
            return;
        };
        let Some((depth_view, _)) = self.depth.as_ref() else { return };

        let mut encoder = self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some(label),
        });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some(label),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: color_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: clear_color.map_or(wgpu::LoadOp::Load, wgpu::LoadOp::Clear),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: clear_depth.map_or(wgpu::LoadOp::Load, wgpu::LoadOp::Clear),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            if let Some((key, buffer, vertex_count)) = draw {
                let pipeline = self.pipelines.get(&key);
                let uniforms = self.uniform_groups.get(&(key.bindings.transform, key.bindings.tex_scale));
                let vbo = self.buffers.get(buffer.0 as usize);
                let image = match self.texture {
                    Some(id) => self.images.get(id.0 as usize).map(|i| &i.bind_group),
                    None => Some(&self.white),
                };
                if let (Some(pipeline), Some(uniforms), Some(vbo), Some(image)) = (pipeline, uniforms, vbo, image) {
                    rpass.set_pipeline(pipeline);
                    rpass.set_bind_group(0, &uniforms.bind_group, &[]);
                    rpass.set_bind_group(1, image, &[]);
                    rpass.set_vertex_buffer(0, vbo.slice(..));
                    rpass.draw(0..vertex_count, 0..1);
                } else {
                    log::warn!("draw skipped: missing GPU resources for {buffer:?}");
                }
            }
        }
        self.queue.submit(std::iter::once(encoder.finish()));
    }
}

fn vertex_attributes(b: &ShaderBindings) -> [wgpu::VertexAttribute; 4] {
    [
        wgpu::VertexAttribute {
            format: wgpu::VertexFormat::Float32x3,
            offset: GpuVertex::POSITION_OFFSET,
            shader_location: b.position,
        },
        wgpu::VertexAttribute {
            format: wgpu::VertexFormat::Float32x2,
            offset: GpuVertex::UV_OFFSET,
            shader_location: b.tex_coord,
        },
        wgpu::VertexAttribute {
            format: wgpu::VertexFormat::Unorm8x4,
            offset: GpuVertex::COLOR_OFFSET,
            shader_location: b.color,
        },
        wgpu::VertexAttribute {
            format: wgpu::VertexFormat::Float32,
            offset: GpuVertex::TEX_FACTOR_OFFSET,
            shader_location: b.tex_factor,
        },
    ]
}

fn straight_alpha_blend() -> wgpu::BlendState {
    wgpu::BlendState {
        color: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::SrcAlpha,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
        alpha: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
    }
}

fn to_wgpu_color(color: PackedColor) -> wgpu::Color {
    let [r, g, b, a] = color.to_f32();
    wgpu::Color {
        r: r as f64,
        g: g as f64,
        b: b as f64,
        a: a as f64,
    }
}

/// Row pitch of a texture-to-buffer copy.
fn padded_bytes_per_row(width: u32) -> u32 {
    let unpadded = width * 4;
    let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
    unpadded.div_ceil(align) * align
}

fn upload_rgba(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    label: &str,
    width: u32,
    height: u32,
    rgba: &[u8],
) -> wgpu::Texture {
    let size = wgpu::Extent3d {
        width,
        height,
        depth_or_array_layers: 1,
    };
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8Unorm,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });
    write_rgba(queue, &texture, width, height, rgba);
    texture
}

/// Overwrites the whole of a `width` x `height` RGBA8 texture; rows are tightly packed.
fn write_rgba(queue: &wgpu::Queue, texture: &wgpu::Texture, width: u32, height: u32, rgba: &[u8]) {
    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        rgba,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(width * 4),
            rows_per_image: Some(height),
        },
        wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
    );
}

fn image_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    sampler: &wgpu::Sampler,
    texture: &wgpu::Texture,
) -> wgpu::BindGroup {
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("strata image bind group"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    })
}

/// Uniforms outside group 0, or not fed by the renderer, would have no buffer bound.
fn check_uniforms(interface: &ProgramInterface) -> Result<(), ShaderError> {
    for (name, slot) in interface.uniforms() {
        if slot.group != UNIFORM_GROUP {
            return Err(ShaderError::Link(format!(
                "uniform `{name}` must live in @group({UNIFORM_GROUP}), found @group({})",
                slot.group
            )));
        }
        if !ShaderBindings::feeds_uniform(name) {
            return Err(ShaderError::Link(format!("uniform `{name}` is not supplied by the renderer")));
        }
    }
    Ok(())
}

impl ShaderCompiler for WgpuBackend {
    type Program = WgpuProgram;

    fn compile(&mut self, source: &ShaderSource) -> Result<WgpuProgram, ShaderError> {
        // naga validation runs first so wgpu never sees an invalid module.
        let interface = ProgramInterface::from_source(source)?;
        check_uniforms(&interface)?;

        let module = |label, code: &str| {
            self.device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some(label),
                source: wgpu::ShaderSource::Wgsl(code.to_owned().into()),
            })
        };
        let modules = Modules {
            vertex: module("strata vertex shader", &*source.vertex),
            fragment: module("strata fragment shader", &*source.fragment),
        };

        self.next_program += 1;
        log::debug!(
            "compiled program {} ({} / {})",
            self.next_program,
            interface.vertex_entry,
            interface.fragment_entry
        );
        Ok(WgpuProgram {
            id: self.next_program,
            interface: Rc::new(interface),
            modules: Rc::new(modules),
        })
    }
}

impl GpuBackend for WgpuBackend {
    fn create_buffer(&mut self, size: u64) -> BufferId {
        let buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("strata vertex buffer"),
            size: size.max(GpuVertex::STRIDE),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        self.buffers.push(buffer);
        BufferId(self.buffers.len() as u32 - 1)
    }

    fn upload_buffer_data(&mut self, buffer: BufferId, bytes: &[u8]) {
        match self.buffers.get(buffer.0 as usize) {
            Some(vbo) if bytes.len() as u64 <= vbo.size() => self.queue.write_buffer(vbo, 0, bytes),
            Some(_) => log::warn!("upload of {} bytes overflows {buffer:?}; dropped", bytes.len()),
            None => log::warn!("upload to unknown buffer {buffer:?} ignored"),
        }
    }

    fn bind_program(&mut self, program: &WgpuProgram, bindings: &ShaderBindings, uniforms: &Uniforms) {
        self.queue
            .write_buffer(&self.transform_ubo, 0, bytemuck::cast_slice(&uniforms.transform));
        self.queue
            .write_buffer(&self.tex_scale_ubo, 0, bytemuck::cast_slice(&uniforms.tex_scale));
        self.bound = Some((program.clone(), *bindings));
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
        if vertex_count == 0 {
            return;
        }
        let Some((program, bindings)) = self.bound.clone() else {
            log::warn!("draw without a bound program ignored");
            return;
        };

        let key = PipelineKey {
            program: program.id,
            bindings,
            depth_test: self.depth_test,
            format: self.format,
        };
        self.ensure_depth();
        self.ensure_pipeline(key, &program);
        self.run_pass("strata draw", None, None, Some((key, buffer, vertex_count)));
    }

    fn clear_depth_buffer(&mut self) {
        self.ensure_depth();
        self.run_pass("strata clear depth", None, Some(1.0), None);
    }

    fn clear(&mut self, color: PackedColor) {
        self.ensure_depth();
        self.run_pass("strata clear", Some(to_wgpu_color(color)), None, None);
    }

    fn create_texture(&mut self, width: u32, height: u32, rgba: &[u8]) -> Result<TextureRef, BackendError> {
        let expected = width as usize * height as usize * 4;
        if width == 0 || height == 0 || rgba.len() != expected {
            return Err(BackendError::Gpu(format!(
                "texture data is {} bytes, expected {expected} for {width}x{height}",
                rgba.len()
            )));
        }
        let texture = upload_rgba(&self.device, &self.queue, "strata image", width, height, rgba);
        let bind_group = image_bind_group(&self.device, &self.texture_layout, &self.sampler, &texture);
        self.images.push(Image {
            _texture: texture,
            bind_group,
        });
        Ok(TextureRef {
            id: TextureId(self.images.len() as u32 - 1),
            width,
            height,
        })
    }

    fn target_size(&self) -> (u32, u32) {
        self.size
    }

    fn read_pixels(&mut self) -> Result<Vec<u8>, BackendError> {
        let Target::Offscreen { texture, .. } = &self.target else {
            return Err(BackendError::UnsupportedReadback("only offscreen targets can be read back"));
        };
        let (width, height) = self.size;
        let padded = padded_bytes_per_row(width);

        let readback = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("strata readback"),
            size: padded as u64 * height as u64,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        let mut encoder = self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("strata readback encoder"),
        });
        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &readback,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(padded),
                    rows_per_image: Some(height),
                },
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );
        self.queue.submit(std::iter::once(encoder.finish()));

        let slice = readback.slice(..);
        let (tx, rx) = std::sync::mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |res| {
            let _ = tx.send(res);
        });
        self.device
            .poll(wgpu::PollType::wait_indefinitely())
            .map_err(|e| BackendError::Gpu(format!("poll failed: {e:?}")))?;
        rx.recv()
            .map_err(|_| BackendError::Gpu("readback channel closed".into()))?
            .map_err(|e| BackendError::Gpu(format!("readback map failed: {e:?}")))?;

        let mapped = slice.get_mapped_range();
        let row = width as usize * 4;
        let mut out = Vec::with_capacity(row * height as usize);
        for y in 0..height as usize {
            let start = y * padded as usize;
            out.extend_from_slice(&mapped[start..start + row]);
        }
        drop(mapped);
        readback.unmap();
        Ok(out)
    }

    fn write_pixels(&mut self, rgba: &[u8]) -> Result<(), BackendError> {
        let Target::Offscreen { texture, .. } = &self.target else {
            return Err(BackendError::UnsupportedWriteback("only offscreen targets can be written"));
        };
        let (width, height) = self.size;
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(BackendError::Gpu(format!(
                "pixel data is {} bytes, expected {expected} for {width}x{height}",
                rgba.len()
            )));
        }
        write_rgba(&self.queue, texture, width, height, rgba);
        Ok(())
    }
}
