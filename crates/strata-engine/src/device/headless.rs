use anyhow::Result;

use super::init::{self, GpuInit};

/// A wgpu device without a surface.
///
/// Pair it with [`WgpuBackend::offscreen`](crate::backend::WgpuBackend::offscreen) to
/// render into a texture that can be read back.
pub struct HeadlessGpu {
    _instance: wgpu::Instance,
    adapter: wgpu::Adapter,
    device: wgpu::Device,
    queue: wgpu::Queue,
}

impl HeadlessGpu {
    pub async fn new(init: GpuInit) -> Result<Self> {
        let instance = init::create_instance();
        let adapter = init::request_adapter(&instance, &init, None).await?;
        let (device, queue) = init::request_device(&adapter, &init).await?;
        Ok(Self {
            _instance: instance,
            adapter,
            device,
            queue,
        })
    }

    pub fn adapter_info(&self) -> wgpu::AdapterInfo {
        self.adapter.get_info()
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }
}
