use wgpu::util::DeviceExt;

use crate::{BufferWrapper, SplatIndexBufferUpdateError, VisibilityPermutation};

/// The draw order index buffer of a scene.
///
/// This holds the 6 indices of each splat's quad in [`VisibilityPermutation`] order, see
/// [`VisibilityPermutation::to_indices`]. It is rewritten after every sort.
#[derive(Debug, Clone)]
pub struct SplatIndexBuffer(wgpu::Buffer);

impl SplatIndexBuffer {
    /// The number of indices per splat.
    pub const INDICES_PER_SPLAT: usize = 6;

    /// Create a new index buffer.
    pub fn new(device: &wgpu::Device, permutation: &VisibilityPermutation) -> Self {
        Self::new_with_usage(device, permutation, Self::DEFAULT_USAGES)
    }

    /// Create a new index buffer with [`wgpu::BufferUsages`].
    pub fn new_with_usage(
        device: &wgpu::Device,
        permutation: &VisibilityPermutation,
        usage: wgpu::BufferUsages,
    ) -> Self {
        log::debug!("Creating index buffer of {} splats", permutation.len());

        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Splat Index Buffer"),
            contents: bytemuck::cast_slice(&permutation.to_indices()),
            usage,
        });

        Self(buffer)
    }

    /// Get the number of splats.
    pub fn len(&self) -> usize {
        self.index_count() as usize / Self::INDICES_PER_SPLAT
    }

    /// Check if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the number of indices.
    pub fn index_count(&self) -> u32 {
        (self.0.size() / std::mem::size_of::<u32>() as wgpu::BufferAddress) as u32
    }

    /// Rewrite the buffer in a new draw order.
    ///
    /// `permutation` should have the same number of splats as the buffer.
    pub fn update(
        &self,
        queue: &wgpu::Queue,
        permutation: &VisibilityPermutation,
    ) -> Result<(), SplatIndexBufferUpdateError> {
        if permutation.len() != self.len() {
            return Err(SplatIndexBufferUpdateError::CountMismatch {
                count: permutation.len(),
                expected_count: self.len(),
            });
        }

        if permutation.is_empty() {
            return Ok(());
        }

        queue.write_buffer(&self.0, 0, bytemuck::cast_slice(&permutation.to_indices()));

        Ok(())
    }
}

impl BufferWrapper for SplatIndexBuffer {
    const DEFAULT_USAGES: wgpu::BufferUsages = wgpu::BufferUsages::from_bits_retain(
        wgpu::BufferUsages::INDEX.bits()
            | wgpu::BufferUsages::COPY_DST.bits()
            | wgpu::BufferUsages::COPY_SRC.bits(),
    );

    fn buffer(&self) -> &wgpu::Buffer {
        &self.0
    }
}

impl From<SplatIndexBuffer> for wgpu::Buffer {
    fn from(wrapper: SplatIndexBuffer) -> Self {
        wrapper.0
    }
}
