//! wgpu device acquisition for the renderer's GPU backend.
//!
//! - [`Gpu`] binds a device to a window surface and hands out one frame at a time
//! - [`HeadlessGpu`] creates a device without a surface for offscreen rendering
//!
//! Both only own wgpu objects; drawing goes through
//! [`WgpuBackend`](crate::backend::WgpuBackend).

mod error;
mod frame;
mod gpu;
mod headless;
mod init;
mod surface;

pub use error::SurfaceErrorAction;
pub use frame::GpuFrame;
pub use gpu::Gpu;
pub use headless::HeadlessGpu;
pub use init::GpuInit;
