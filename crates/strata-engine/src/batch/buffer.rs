use super::vertex::GpuVertex;

/// Fixed-capacity CPU staging area for triangle-list vertices.
///
/// Invariant: `len() <= capacity()` at all times. The capacity is a multiple of three so
/// a full batch always holds whole triangles.
#[derive(Debug, Clone)]
pub struct VertexBatch {
    vertices: Vec<GpuVertex>,
    capacity: usize,
}

impl VertexBatch {
    /// Creates a batch holding up to `capacity` vertices, rounded down to whole triangles.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = (capacity - capacity % 3).max(3);
        Self {
            vertices: Vec::with_capacity(capacity),
            capacity,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Whether `n` more vertices fit without flushing.
    #[inline]
    pub fn has_room(&self, n: usize) -> bool {
        self.vertices.len() + n <= self.capacity
    }

    /// Appends `vertices`; the caller must have checked [`has_room`](Self::has_room).
    ///
    /// Returns `false` and appends nothing when they do not fit.
    #[must_use]
    pub fn extend(&mut self, vertices: &[GpuVertex]) -> bool {
        if !self.has_room(vertices.len()) {
            return false;
        }
        self.vertices.extend_from_slice(vertices);
        true
    }

    #[inline]
    pub fn vertices(&self) -> &[GpuVertex] {
        &self.vertices
    }

    /// Used prefix as raw bytes, ready for upload.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Size of a full batch in bytes.
    #[inline]
    pub fn byte_capacity(&self) -> u64 {
        self.capacity as u64 * GpuVertex::STRIDE
    }

    #[inline]
    pub fn clear(&mut self) {
        self.vertices.clear();
    }
}
