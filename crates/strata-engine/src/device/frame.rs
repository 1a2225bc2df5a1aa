/// An acquired swapchain image.
///
/// The renderer's backend submits its own command buffers, so a frame carries only the
/// texture and a view of it. Hand the frame back to `Gpu::present` once drawing is done;
/// no further frame can be acquired while it is held.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
}

impl GpuFrame {
    /// Physical size of the swapchain image.
    pub fn size(&self) -> (u32, u32) {
        let texture = &self.surface_texture.texture;
        (texture.width(), texture.height())
    }
}
