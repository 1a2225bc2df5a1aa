/// Painter's-order depth layers.
///
/// Every primitive takes the next layer, whose depth is strictly lower than the previous
/// one. With a `Less` depth test later primitives therefore win without sorting. When the
/// next depth would fall below the floor the allocator wraps back to the top; the caller
/// must flush and clear the depth buffer before drawing with a wrapped layer.
#[derive(Debug, Clone)]
pub struct DepthAllocator {
    step: f64,
    floor: f64,
    /// Layers handed out since the last reset.
    layer: u64,
}

/// One allocated depth value.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DepthLayer {
    pub depth: f32,
    /// The counter restarted; pending geometry and the depth buffer are stale.
    pub wrapped: bool,
}

impl Default for DepthAllocator {
    fn default() -> Self {
        Self::new(1.0e-6, -1.0)
    }
}

impl DepthAllocator {
    pub fn new(step: f32, floor: f32) -> Self {
        Self {
            step: f64::from(step.abs().max(f32::MIN_POSITIVE)),
            floor: f64::from(floor),
            layer: 0,
        }
    }

    /// Depth of the most recently allocated layer (1.0 before any allocation).
    #[inline]
    pub fn current(&self) -> f32 {
        self.depth_at(self.layer)
    }

    #[inline]
    pub fn layers_used(&self) -> u64 {
        self.layer
    }

    /// Allocates the next layer.
    pub fn next(&mut self) -> DepthLayer {
        let mut wrapped = false;
        if 1.0 - (self.layer + 1) as f64 * self.step < self.floor {
            self.layer = 0;
            wrapped = true;
        }
        self.layer += 1;
        DepthLayer {
            depth: self.depth_at(self.layer),
            wrapped,
        }
    }

    /// Restarts from the top, e.g. at the start of a frame.
    #[inline]
    pub fn reset(&mut self) {
        self.layer = 0;
    }

    #[inline]
    fn depth_at(&self, layer: u64) -> f32 {
        (1.0 - layer as f64 * self.step) as f32
    }
}
