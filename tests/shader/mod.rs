use wgpu_splat_core::{
    QUAD_CORNERS, QUAD_INDICES, RenderConfig, Splat, SplatRenderer, SplatStore, SplatVertexPod,
    expand_quads, glam::*, shader,
};

use crate::common::TestContext;

const EPSILON: f32 = 1e-5;

#[test]
fn test_billboard_offset_should_have_constant_pixel_size_after_divide() {
    let viewport = Vec2::new(800.0, 600.0);
    let scale = Vec2::new(4.0, 8.0);

    for w in [0.5, 1.0, 3.5, 40.0] {
        let offset = shader::billboard_offset(Vec2::new(1.0, 1.0), 0.0, scale, viewport, w);
        let pixels = offset / w * viewport / 2.0;

        assert!(pixels.abs_diff_eq(scale, EPSILON), "w = {w}: {pixels:?}");
    }
}

#[test]
fn test_billboard_offset_should_rotate_corner_by_angle() {
    let viewport = Vec2::splat(2.0);

    let offset = shader::billboard_offset(
        Vec2::new(1.0, 0.0),
        std::f32::consts::FRAC_PI_2,
        Vec2::ONE,
        viewport,
        1.0,
    );

    assert!(offset.abs_diff_eq(Vec2::new(0.0, 1.0), EPSILON), "{offset:?}");
}

#[test]
fn test_billboard_position_should_select_corner_by_vertex_index_modulo_four() {
    let view_proj = Mat4::IDENTITY;
    let viewport = Vec2::splat(2.0);

    for vertex_index in 0..12 {
        let position =
            shader::billboard_position(view_proj, Vec3::ZERO, vertex_index, 0.0, Vec2::ONE, viewport);

        assert_eq!(
            position,
            QUAD_CORNERS[vertex_index as usize % 4].extend(0.0).extend(1.0)
        );
    }
}

#[test]
fn test_splat_alpha_should_fall_off_from_center() {
    assert_eq!(shader::splat_alpha(Vec2::ZERO, 0.7), Some(0.7));

    let edge = shader::splat_alpha(Vec2::X, 1.0).expect("alpha");
    assert!((edge - (-3f32).exp()).abs() < EPSILON);

    let near = shader::splat_alpha(Vec2::splat(0.2), 1.0).expect("alpha");
    let far = shader::splat_alpha(Vec2::splat(0.6), 1.0).expect("alpha");
    assert!(near > far);
}

#[test]
fn test_splat_alpha_outside_unit_circle_should_discard() {
    assert_eq!(shader::splat_alpha(Vec2::new(1.0, 1.0), 1.0), None);
    assert_eq!(shader::splat_alpha(Vec2::new(-1.01, 0.0), 1.0), None);
}

#[test]
fn test_splat_fragment_should_be_premultiplied() {
    let color = Vec3::new(0.2, 0.4, 1.0);

    let fragment = shader::splat_fragment(Vec2::new(0.3, -0.2), color, 0.5).expect("fragment");

    assert!(fragment.xyz().abs_diff_eq(color * fragment.w, EPSILON));
    assert!(fragment.w < 0.5);
}

#[test]
fn test_blend_over_should_composite_back_to_front() {
    let clear = Vec4::new(0.02, 0.03, 0.06, 1.0);
    let far = shader::splat_fragment(Vec2::ZERO, Vec3::X, 0.5).expect("far");
    let near = shader::splat_fragment(Vec2::ZERO, Vec3::Y, 1.0).expect("near");

    let opaque_on_top = shader::blend_over(near, shader::blend_over(far, clear));
    assert!(opaque_on_top.abs_diff_eq(Vec4::new(0.0, 1.0, 0.0, 1.0), EPSILON));

    let half_on_top = shader::blend_over(far, clear);
    assert!(half_on_top.abs_diff_eq(Vec4::new(0.51, 0.015, 0.03, 1.0), EPSILON));
}

#[test]
fn test_source_should_declare_entry_points_and_corners() {
    assert!(shader::SOURCE.contains(&format!("fn {}(", shader::VERTEX_ENTRY_POINT)));
    assert!(shader::SOURCE.contains(&format!("fn {}(", shader::FRAGMENT_ENTRY_POINT)));

    for corner in QUAD_CORNERS {
        assert!(
            shader::SOURCE.contains(&format!("vec2<f32>({:?}, {:?})", corner.x, corner.y)),
            "corner {corner} not in shader source"
        );
    }
}

#[test]
fn test_quad_indices_should_cover_quad_with_two_triangles() {
    let [a, b] = [&QUAD_INDICES[..3], &QUAD_INDICES[3..]].map(|tri| {
        let [p0, p1, p2] = [tri[0], tri[1], tri[2]].map(|i| QUAD_CORNERS[i as usize]);
        (p1 - p0).perp_dot(p2 - p0)
    });

    assert!(a.abs() + b.abs() - 8.0 < EPSILON);
    assert_eq!(a.signum(), b.signum());
}

#[test]
fn test_expand_quads_should_emit_four_vertices_per_splat() {
    let splat = Splat {
        pos: Vec3::new(1.0, 2.0, 3.0),
        color: Vec3::new(0.1, 0.2, 0.3),
        scale: Vec2::new(0.01, 0.03),
        opacity: 0.4,
        angle: 0.5,
    };
    let store = SplatStore::from(vec![Splat::default(), splat]);

    let vertices = expand_quads(&store, 200.0);

    assert_eq!(vertices.len(), 8);
    assert!(vertices[4..].iter().all(|v| *v == vertices[4]));
    assert_eq!(vertices[4].pos, [1.0, 2.0, 3.0]);
    assert_eq!(vertices[4].color, [0.1, 0.2, 0.3]);
    assert!(Vec2::from_array(vertices[4].scale).abs_diff_eq(Vec2::new(2.0, 6.0), EPSILON));
    assert_eq!(vertices[4].opacity, 0.4);
    assert_eq!(vertices[4].angle, 0.5);
    assert_eq!(vertices[0], SplatVertexPod::new(&Splat::default(), 200.0));
}

#[test]
fn test_splat_vertex_pod_layout_should_match_pod() {
    let layout = SplatVertexPod::layout();

    assert_eq!(layout.array_stride, 40);
    assert_eq!(layout.step_mode, wgpu::VertexStepMode::Vertex);
    assert_eq!(
        layout
            .attributes
            .iter()
            .map(|a| (a.shader_location, a.offset))
            .collect::<Vec<_>>(),
        vec![(0, 0), (1, 12), (2, 24), (3, 32), (4, 36)]
    );
}

#[test]
#[cfg_attr(not(feature = "gpu-tests"), ignore = "requires the `gpu-tests` feature")]
fn test_create_module_should_validate() {
    let ctx = TestContext::new();

    let scope = ctx.device.push_error_scope(wgpu::ErrorFilter::Validation);
    shader::create_module(&ctx.device);
    let error = pollster::block_on(scope.pop());

    assert!(error.is_none(), "{error:?}");
}

#[test]
#[cfg_attr(not(feature = "gpu-tests"), ignore = "requires the `gpu-tests` feature")]
fn test_splat_renderer_new_should_create_valid_pipeline() {
    let ctx = TestContext::new();

    let scope = ctx.device.push_error_scope(wgpu::ErrorFilter::Validation);
    let renderer = SplatRenderer::new(
        &ctx.device,
        wgpu::TextureFormat::Bgra8UnormSrgb,
        RenderConfig::default(),
    );
    let error = pollster::block_on(scope.pop());

    assert!(error.is_none(), "{error:?}");
    assert_eq!(renderer.config(), &RenderConfig::default());
}
