use glam::*;
use wgpu::util::DeviceExt;

use crate::{BufferWrapper, FixedSizeBufferWrapper, FixedSizeBufferWrapperError};

/// The per frame uniform buffer.
#[derive(Debug, Clone)]
pub struct FrameUniformBuffer(wgpu::Buffer);

impl FrameUniformBuffer {
    /// Create a new frame uniform buffer.
    pub fn new(device: &wgpu::Device) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Frame Uniform Buffer"),
            contents: bytemuck::bytes_of(&FrameUniformPod::default()),
            usage: Self::DEFAULT_USAGES,
        });

        Self(buffer)
    }

    /// Update the frame uniform buffer.
    pub fn update(&self, queue: &wgpu::Queue, view_proj: Mat4, viewport: Vec2) {
        self.update_with_pod(queue, &FrameUniformPod::new(view_proj, viewport));
    }

    /// Update the frame uniform buffer with [`FrameUniformPod`].
    pub fn update_with_pod(&self, queue: &wgpu::Queue, pod: &FrameUniformPod) {
        queue.write_buffer(&self.0, 0, bytemuck::bytes_of(pod));
    }
}

impl BufferWrapper for FrameUniformBuffer {
    const DEFAULT_USAGES: wgpu::BufferUsages = wgpu::BufferUsages::from_bits_retain(
        wgpu::BufferUsages::UNIFORM.bits()
            | wgpu::BufferUsages::COPY_DST.bits()
            | wgpu::BufferUsages::COPY_SRC.bits(),
    );

    fn buffer(&self) -> &wgpu::Buffer {
        &self.0
    }
}

impl From<FrameUniformBuffer> for wgpu::Buffer {
    fn from(wrapper: FrameUniformBuffer) -> Self {
        wrapper.0
    }
}

impl TryFrom<wgpu::Buffer> for FrameUniformBuffer {
    type Error = FixedSizeBufferWrapperError;

    fn try_from(buffer: wgpu::Buffer) -> Result<Self, Self::Error> {
        Self::verify_buffer_size(&buffer).map(|()| Self(buffer))
    }
}

impl FixedSizeBufferWrapper for FrameUniformBuffer {
    type Pod = FrameUniformPod;
}

/// The POD representation of the per frame uniform.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameUniformPod {
    pub view_proj: Mat4,
    /// Viewport size in pixels.
    pub viewport: Vec2,
    _padding: [f32; 2],
}

impl FrameUniformPod {
    /// Create a new frame uniform.
    pub const fn new(view_proj: Mat4, viewport: Vec2) -> Self {
        Self {
            view_proj,
            viewport,
            _padding: [0.0; 2],
        }
    }
}

impl Default for FrameUniformPod {
    fn default() -> Self {
        Self::new(Mat4::IDENTITY, Vec2::ONE)
    }
}
