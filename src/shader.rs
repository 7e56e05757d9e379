//! The splat shader and CPU mirrors of its stages.

use glam::*;

use crate::QUAD_CORNERS;

/// The WGSL source of the splat shader.
///
/// Entry points are [`VERTEX_ENTRY_POINT`] and [`FRAGMENT_ENTRY_POINT`], the frame uniform is
/// at group 0 binding 0.
pub const SOURCE: &str = include_str!("shader/splat.wgsl");

/// The vertex entry point.
pub const VERTEX_ENTRY_POINT: &str = "vs_main";

/// The fragment entry point.
pub const FRAGMENT_ENTRY_POINT: &str = "fs_main";

/// Create the shader module.
pub fn create_module(device: &wgpu::Device) -> wgpu::ShaderModule {
    device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("Splat Shader"),
        source: wgpu::ShaderSource::Wgsl(SOURCE.into()),
    })
}

/// Compute the clip space offset of a quad corner, as done by the vertex stage.
///
/// `scale` is in screen pixels, `w` is the clip space w of the splat center. After the
/// perspective divide the corner is `rotate(corner, angle) * scale` pixels from the center
/// regardless of depth.
pub fn billboard_offset(corner: Vec2, angle: f32, scale: Vec2, viewport: Vec2, w: f32) -> Vec2 {
    Vec2::from_angle(angle).rotate(corner) * scale * 2.0 / viewport * w
}

/// Compute the clip space position of vertex `vertex_index` of a splat quad.
pub fn billboard_position(
    view_proj: Mat4,
    pos: Vec3,
    vertex_index: u32,
    angle: f32,
    scale: Vec2,
    viewport: Vec2,
) -> Vec4 {
    let clip = view_proj * pos.extend(1.0);
    let corner = QUAD_CORNERS[vertex_index as usize % 4];
    let offset = billboard_offset(corner, angle, scale, viewport, clip.w);

    (clip.xy() + offset).extend(clip.z).extend(clip.w)
}

/// Compute the alpha of a fragment at quad-local `uv`, as done by the fragment stage.
///
/// Returns [`None`] if the fragment is discarded, i.e. outside the unit circle.
pub fn splat_alpha(uv: Vec2, opacity: f32) -> Option<f32> {
    let r2 = uv.length_squared();
    (r2 <= 1.0).then(|| opacity * (-3.0 * r2).exp())
}

/// Compute the premultiplied output color of a fragment at quad-local `uv`.
pub fn splat_fragment(uv: Vec2, color: Vec3, opacity: f32) -> Option<Vec4> {
    splat_alpha(uv, opacity).map(|alpha| (color * alpha).extend(alpha))
}

/// Blend a premultiplied source over a destination the way the pipeline does.
///
/// `dst' = src + dst * (1 - src.a)`.
pub fn blend_over(src: Vec4, dst: Vec4) -> Vec4 {
    src + dst * (1.0 - src.w)
}
