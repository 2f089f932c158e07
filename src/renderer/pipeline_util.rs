use crate::gpu::texture::DEPTH_FORMAT;

/// Inputs of [`create_pipeline`].
pub(crate) struct PipelineSpec<'a> {
    pub label: &'a str,
    /// Module exporting `vs_main` and `fs_main`.
    pub shader: &'a wgpu::ShaderModule,
    /// The frame renderer's uniform layout, bound at group 0.
    pub uniform_layout: &'a wgpu::BindGroupLayout,
    pub vertex_layout: wgpu::VertexBufferLayout<'a>,
    pub topology: wgpu::PrimitiveTopology,
    pub cull_mode: Option<wgpu::Face>,
    pub color_format: wgpu::TextureFormat,
}

/// Standard depth-stencil state used by all render pipelines.
pub(crate) fn depth_stencil_state() -> wgpu::DepthStencilState {
    wgpu::DepthStencilState {
        format: DEPTH_FORMAT,
        depth_write_enabled: true,
        depth_compare: wgpu::CompareFunction::Less,
        stencil: wgpu::StencilState::default(),
        bias: wgpu::DepthBiasState::default(),
    }
}

/// Render pipeline with one vertex buffer, one dynamic uniform slot and a
/// single opaque color target.
pub(crate) fn create_pipeline(
    device: &wgpu::Device,
    spec: PipelineSpec<'_>,
) -> wgpu::RenderPipeline {
    let label = spec.label;
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(&format!("{label} Pipeline Layout")),
        bind_group_layouts: &[spec.uniform_layout],
        push_constant_ranges: &[],
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(&format!("{label} Pipeline")),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: spec.shader,
            entry_point: Some("vs_main"),
            buffers: &[spec.vertex_layout],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: spec.shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: spec.color_format,
                blend: None,
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: spec.topology,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: spec.cull_mode,
            ..Default::default()
        },
        depth_stencil: Some(depth_stencil_state()),
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}
