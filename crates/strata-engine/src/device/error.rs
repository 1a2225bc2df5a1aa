/// What the caller should do after `Gpu::begin_frame` failed.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// The surface was configured again; the next frame should succeed.
    Reconfigured,
    /// Drop this frame and try again later.
    SkipFrame,
    /// The device cannot continue (out of memory).
    Fatal,
}
