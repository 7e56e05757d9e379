use glam::*;

use crate::{Splat, SplatStore};

/// The corner offsets of a billboard quad in vertex order.
///
/// Must match `corners` in `shader/splat.wgsl`.
pub const QUAD_CORNERS: [Vec2; 4] = [
    Vec2::new(-1.0, 1.0),
    Vec2::new(1.0, 1.0),
    Vec2::new(1.0, -1.0),
    Vec2::new(-1.0, -1.0),
];

/// The two triangles of a billboard quad.
pub const QUAD_INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];

/// The POD representation of a quad vertex.
///
/// All 4 vertices of a splat carry the same data, the corner is selected in the shader by
/// `vertex_index % 4`.
///
/// Fields are stored as arrays because using glam types would add padding
/// according to C alignment rules.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SplatVertexPod {
    pub pos: [f32; 3],
    pub color: [f32; 3],
    /// Radii in screen pixels.
    pub scale: [f32; 2],
    pub opacity: f32,
    pub angle: f32,
}

impl SplatVertexPod {
    /// The vertex attributes, at shader locations 0 to 4.
    pub const ATTRIBUTES: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        0 => Float32x3,
        1 => Float32x3,
        2 => Float32x2,
        3 => Float32,
        4 => Float32
    ];

    /// Create a new vertex from a splat.
    pub fn new(splat: &Splat, pixel_scale: f32) -> Self {
        Self {
            pos: splat.pos.to_array(),
            color: splat.color.to_array(),
            scale: (splat.scale * pixel_scale).to_array(),
            opacity: splat.opacity,
            angle: splat.angle,
        }
    }

    /// Get the vertex buffer layout.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Expand every splat into the 4 vertices of its quad.
///
/// The vertices of splat `i` are at `4 * i..4 * i + 4`.
pub fn expand_quads(store: &SplatStore, pixel_scale: f32) -> Vec<SplatVertexPod> {
    store
        .iter()
        .flat_map(|splat| [SplatVertexPod::new(&splat, pixel_scale); 4])
        .collect()
}
