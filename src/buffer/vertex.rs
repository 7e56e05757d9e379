use wgpu::util::DeviceExt;

use crate::{BufferWrapper, SplatStore, SplatVertexPod, expand_quads};

/// The quad vertex buffer of a scene.
///
/// This holds 4 [`SplatVertexPod`] per splat, see [`expand_quads`].
#[derive(Debug, Clone)]
pub struct SplatVertexBuffer(wgpu::Buffer);

impl SplatVertexBuffer {
    /// Create a new vertex buffer.
    pub fn new(device: &wgpu::Device, store: &SplatStore, pixel_scale: f32) -> Self {
        Self::new_with_pods(device, &expand_quads(store, pixel_scale))
    }

    /// Create a new vertex buffer with [`SplatVertexPod`].
    pub fn new_with_pods(device: &wgpu::Device, pods: &[SplatVertexPod]) -> Self {
        log::debug!("Creating vertex buffer of {} vertices", pods.len());

        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Splat Vertex Buffer"),
            contents: bytemuck::cast_slice(pods),
            usage: Self::DEFAULT_USAGES,
        });

        Self(buffer)
    }

    /// Get the number of vertices.
    pub fn len(&self) -> usize {
        self.0.size() as usize / std::mem::size_of::<SplatVertexPod>()
    }

    /// Check if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl BufferWrapper for SplatVertexBuffer {
    const DEFAULT_USAGES: wgpu::BufferUsages = wgpu::BufferUsages::from_bits_retain(
        wgpu::BufferUsages::VERTEX.bits() | wgpu::BufferUsages::COPY_SRC.bits(),
    );

    fn buffer(&self) -> &wgpu::Buffer {
        &self.0
    }
}

impl From<SplatVertexBuffer> for wgpu::Buffer {
    fn from(wrapper: SplatVertexBuffer) -> Self {
        wrapper.0
    }
}
