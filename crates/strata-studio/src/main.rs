//! Strata studio: renders an animated demo scene with the strata engine.
//!
//! `strata-studio` opens a window; `strata-studio --offscreen` renders one frame into an
//! offscreen texture, reads it back and logs a summary.

mod scene;

use std::time::Instant;

use anyhow::{Context, Result};
use ouroboros::self_referencing;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use strata_engine::backend::{GpuBackend, WgpuBackend};
use strata_engine::coords::Viewport;
use strata_engine::device::{Gpu, GpuInit, HeadlessGpu, SurfaceErrorAction};
use strata_engine::logging::{init_logging, LoggingConfig};
use strata_engine::render::{Renderer, RendererConfig};

use scene::{Scene, SCENE_SIZE};

#[self_referencing]
struct Surface {
    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct Session {
    surface: Surface,
    renderer: Renderer<WgpuBackend>,
    scene: Scene,
}

struct Studio {
    started: Instant,
    session: Option<Session>,
}

impl Studio {
    fn new() -> Self {
        Self {
            started: Instant::now(),
            session: None,
        }
    }

    fn open(&self, event_loop: &ActiveEventLoop) -> Result<Session> {
        let attrs = Window::default_attributes()
            .with_title("strata studio")
            .with_inner_size(LogicalSize::new(SCENE_SIZE.0 as f64, SCENE_SIZE.1 as f64));
        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let surface = SurfaceTryBuilder {
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, GpuInit::default())),
        }
        .try_build()?;

        let backend = surface.with_gpu(|gpu| WgpuBackend::new(gpu.device(), gpu.queue(), gpu.surface_format()));
        let mut renderer = Renderer::new(backend, RendererConfig::default());
        let scene = Scene::new(&mut renderer);

        Ok(Session {
            surface,
            renderer,
            scene,
        })
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let t = self.started.elapsed().as_secs_f32();
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let Session {
            surface,
            renderer,
            scene,
        } = session;

        let frame = match surface.with_gpu(|gpu| gpu.begin_frame()) {
            Ok(frame) => frame,
            Err(e) => {
                log::debug!("surface error: {e}");
                let action = surface.with_gpu_mut(|gpu| gpu.handle_surface_error(e));
                if action == SurfaceErrorAction::Fatal {
                    log::error!("surface lost for good; exiting");
                    event_loop.exit();
                }
                return;
            }
        };

        let (w, h) = frame.size();
        let scale = surface.with_window(|window| window.scale_factor());
        renderer.set_viewport(Viewport::from_physical(w, h, scale));
        renderer.backend_mut().set_target(frame.view.clone(), w, h);
        scene.draw(renderer, t);
        renderer.backend_mut().detach_target();

        surface.with_gpu(|gpu| gpu.present(frame));
    }
}

impl ApplicationHandler for Studio {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.session.is_some() {
            return;
        }
        match self.open(event_loop) {
            Ok(session) => {
                session.surface.with_window(|w| w.request_redraw());
                self.session = Some(session);
            }
            Err(e) => {
                log::error!("failed to open studio window: {e:#}");
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);
        if let Some(session) = &self.session {
            session.surface.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                self.session = None;
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(session) = self.session.as_mut() {
                    session.surface.with_gpu_mut(|gpu| gpu.resize(size));
                }
            }
            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(session) = self.session.as_mut() {
                    let size = session.surface.with_window(|w| w.inner_size());
                    session.surface.with_gpu_mut(|gpu| gpu.resize(size));
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }
}

/// Renders one frame offscreen and logs what landed in the target.
fn render_offscreen() -> Result<()> {
    let gpu = pollster::block_on(HeadlessGpu::new(GpuInit::default()))?;
    let (w, h) = (SCENE_SIZE.0 as u32, SCENE_SIZE.1 as u32);
    let backend = WgpuBackend::offscreen(gpu.device(), gpu.queue(), w, h);

    let config = RendererConfig {
        viewport: Viewport::new(SCENE_SIZE.0, SCENE_SIZE.1),
        ..RendererConfig::default()
    };
    let mut renderer = Renderer::new(backend, config);
    let scene = Scene::new(&mut renderer);
    scene.draw(&mut renderer, 1.0);

    let pixels = renderer.read_pixels()?;
    let (tw, th) = renderer.backend().target_size();
    let opaque = pixels.chunks_exact(4).filter(|px| px[3] == 255).count();
    log::info!(
        "offscreen frame {tw}x{th} on {}: {} bytes, {opaque} opaque pixels",
        gpu.adapter_info().name,
        pixels.len()
    );
    Ok(())
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    if std::env::args().skip(1).any(|a| a == "--offscreen") {
        return render_offscreen();
    }

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    let mut studio = Studio::new();
    event_loop.run_app(&mut studio)?;
    Ok(())
}
