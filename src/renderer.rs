use glam::*;

use crate::{
    BufferWrapper, FrameUniformBuffer, RenderConfig, Scene, SplatIndexBuffer,
    SplatIndexBufferUpdateError, SplatVertexBuffer, SplatVertexPod, Viewer, shader,
};

/// The GPU buffers of a non-empty scene.
#[derive(Debug)]
struct SceneBuffers {
    vertices: SplatVertexBuffer,
    indices: SplatIndexBuffer,
}

impl SceneBuffers {
    fn new(device: &wgpu::Device, scene: &Scene, pixel_scale: f32) -> Self {
        Self {
            vertices: SplatVertexBuffer::new(device, scene.store(), pixel_scale),
            indices: SplatIndexBuffer::new(device, scene.permutation()),
        }
    }
}

/// The billboard renderer of a [`Viewer`].
///
/// Call [`SplatRenderer::prepare`] before [`SplatRenderer::render`] on every frame.
#[derive(Debug)]
pub struct SplatRenderer {
    config: RenderConfig,
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
    frame_buffer: FrameUniformBuffer,
    buffers: Option<SceneBuffers>,
    scene_generation: u64,
    sort_generation: u64,
    viewport: UVec2,
}

impl SplatRenderer {
    /// The bind group layout descriptor.
    pub const BIND_GROUP_LAYOUT_DESCRIPTOR: wgpu::BindGroupLayoutDescriptor<'static> =
        wgpu::BindGroupLayoutDescriptor {
            label: Some("Splat Renderer Bind Group Layout"),
            entries: &[
                // Frame uniform buffer
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        };

    /// The premultiplied alpha "over" blend, on both color and alpha.
    pub const BLEND_STATE: wgpu::BlendState = wgpu::BlendState {
        color: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
        alpha: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
    };

    /// Create a new renderer drawing into targets of `format`.
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat, config: RenderConfig) -> Self {
        log::debug!("Creating splat renderer bind group layout");
        let bind_group_layout =
            device.create_bind_group_layout(&Self::BIND_GROUP_LAYOUT_DESCRIPTOR);

        log::debug!("Creating splat renderer pipeline layout");
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Splat Renderer Pipeline Layout"),
            bind_group_layouts: &[Some(&bind_group_layout)],
            immediate_size: 0,
        });

        log::debug!("Creating splat renderer shader module");
        let module = shader::create_module(device);

        log::debug!("Creating splat renderer pipeline");
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Splat Renderer Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &module,
                entry_point: Some(shader::VERTEX_ENTRY_POINT),
                compilation_options: wgpu::PipelineCompilationOptions::default(),
                buffers: &[SplatVertexPod::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &module,
                entry_point: Some(shader::FRAGMENT_ENTRY_POINT),
                compilation_options: wgpu::PipelineCompilationOptions::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(Self::BLEND_STATE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let frame_buffer = FrameUniformBuffer::new(device);
        let bind_group = Self::create_bind_group_static(device, &bind_group_layout, &frame_buffer);

        log::info!("Splat renderer created");

        Self {
            config,
            pipeline,
            bind_group_layout,
            bind_group,
            frame_buffer,
            buffers: None,
            scene_generation: 0,
            sort_generation: 0,
            viewport: UVec2::ZERO,
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Get the render pipeline.
    pub fn pipeline(&self) -> &wgpu::RenderPipeline {
        &self.pipeline
    }

    /// Get the bind group layout.
    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout
    }

    /// Get the frame uniform buffer.
    pub fn frame_buffer(&self) -> &FrameUniformBuffer {
        &self.frame_buffer
    }

    /// Get the vertex buffer of the current scene.
    ///
    /// Returns [`None`] if there is no scene or it is empty.
    pub fn vertex_buffer(&self) -> Option<&SplatVertexBuffer> {
        self.buffers.as_ref().map(|buffers| &buffers.vertices)
    }

    /// Get the index buffer of the current scene.
    ///
    /// Returns [`None`] if there is no scene or it is empty.
    pub fn index_buffer(&self) -> Option<&SplatIndexBuffer> {
        self.buffers.as_ref().map(|buffers| &buffers.indices)
    }

    /// Synchronize the GPU state with `viewer` for a frame of `viewport` pixels.
    ///
    /// Scene buffers are rebuilt when a new scene was loaded, otherwise only the index buffer
    /// is rewritten when the splats were re-sorted.
    pub fn prepare(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        viewer: &Viewer,
        viewport: UVec2,
    ) -> Result<(), SplatIndexBufferUpdateError> {
        if viewer.scene_generation() != self.scene_generation {
            log::debug!("Rebuilding scene buffers");

            self.buffers = viewer
                .scene()
                .filter(|scene| !scene.store().is_empty())
                .map(|scene| SceneBuffers::new(device, scene, self.config.pixel_scale));
            self.scene_generation = viewer.scene_generation();
            self.sort_generation = viewer.sort_generation();
        } else if viewer.sort_generation() != self.sort_generation {
            if let (Some(buffers), Some(scene)) = (&self.buffers, viewer.scene()) {
                buffers.indices.update(queue, scene.permutation())?;
            }
            self.sort_generation = viewer.sort_generation();
        }

        self.viewport = viewport;

        if let Some(view_proj) = viewer.view_projection(viewport) {
            self.frame_buffer.update(queue, view_proj, viewport.as_vec2());
        }

        Ok(())
    }

    /// Clear `view` and draw the splats prepared by [`SplatRenderer::prepare`].
    ///
    /// Returns `true` if a draw was issued.
    pub fn render(&self, encoder: &mut wgpu::CommandEncoder, view: &wgpu::TextureView) -> bool {
        let clear = self.config.clear_color.as_dvec4();

        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Splat Renderer Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                depth_slice: None,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color {
                        r: clear.x,
                        g: clear.y,
                        b: clear.z,
                        a: clear.w,
                    }),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        let Some(buffers) = self.buffers.as_ref() else {
            return false;
        };

        if self.viewport.cmpeq(UVec2::ZERO).any() {
            return false;
        }

        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.set_vertex_buffer(0, buffers.vertices.buffer().slice(..));
        pass.set_index_buffer(buffers.indices.buffer().slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..buffers.indices.index_count(), 0, 0..1);

        true
    }

    fn create_bind_group_static(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        frame_buffer: &FrameUniformBuffer,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Splat Renderer Bind Group"),
            layout,
            entries: &[
                // Frame uniform buffer
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: frame_buffer.buffer().as_entire_binding(),
                },
            ],
        })
    }
}
