//! Vertex batching: the GPU vertex record, the staging buffer and depth layers.

mod buffer;
mod depth;
mod vertex;

pub use buffer::VertexBatch;
pub use depth::{DepthAllocator, DepthLayer};
pub use vertex::GpuVertex;
