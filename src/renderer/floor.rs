//! Ground plane drawn under the crystal.

use bytemuck::{Pod, Zeroable};

use crate::gpu::dynamic_buffer::DynamicBuffer;
use crate::gpu::RenderContext;
use crate::renderer::pipeline_util::{self, PipelineSpec};
use crate::scene::{
    DrawCommand, DrawList, DrawTransforms, Drawable, FrameContext, GpuBinding,
};

/// One floor corner in plane coordinates; the shader lifts it into 3D.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct FloorVertex {
    /// Horizontal and depth coordinate.
    pub position: [f32; 2],
}

impl FloorVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 1] =
        wgpu::vertex_attr_array![0 => Float32x2];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Floor uniform block.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct FloorUniforms {
    /// Projection * view * model, column-major.
    pub mvp: [[f32; 4]; 4],
}

/// Triangle-strip corners of an `h × v` rectangle centred on the origin.
#[must_use]
pub fn floor_vertices(size: [f32; 2]) -> [FloorVertex; 4] {
    let [h, v] = size.map(|s| 0.5 * s);
    [[-h, -v], [-h, v], [h, -v], [h, v]].map(|position| FloorVertex { position })
}

struct FloorGpu {
    pipeline: wgpu::RenderPipeline,
    vertices: DynamicBuffer,
}

/// Scene leaf drawing the floor quad.
pub struct FloorRenderable {
    size: [f32; 2],
    gpu: Option<FloorGpu>,
}

impl FloorRenderable {
    /// Upload a floor of the given extent.
    #[must_use]
    pub fn new(
        context: &RenderContext,
        shader: &wgpu::ShaderModule,
        uniform_layout: &wgpu::BindGroupLayout,
        size: [f32; 2],
    ) -> Self {
        let vertices = DynamicBuffer::new_with_data(
            &context.device,
            "Floor Vertices",
            &floor_vertices(size),
            wgpu::BufferUsages::VERTEX,
        );
        let pipeline = pipeline_util::create_pipeline(
            &context.device,
            PipelineSpec {
                label: "Floor",
                shader,
                uniform_layout,
                vertex_layout: FloorVertex::layout(),
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                cull_mode: None,
                color_format: context.format(),
            },
        );
        Self {
            size,
            gpu: Some(FloorGpu { pipeline, vertices }),
        }
    }

    /// Floor without GPU resources. Draws are recorded unbound.
    #[must_use]
    pub fn detached(size: [f32; 2]) -> Self {
        Self { size, gpu: None }
    }

    /// Extent along the two plane axes.
    #[must_use]
    pub fn size(&self) -> [f32; 2] {
        self.size
    }
}

impl Drawable for FloorRenderable {
    fn draw(
        &self,
        _frame: &FrameContext<'_>,
        transforms: &DrawTransforms,
        draws: &mut DrawList,
    ) {
        let uniforms = FloorUniforms {
            mvp: transforms
                .projection_view_model()
                .as_mat4()
                .to_cols_array_2d(),
        };
        draws.push(DrawCommand {
            label: "floor",
            binding: self.gpu.as_ref().map(|gpu| GpuBinding {
                pipeline: gpu.pipeline.clone(),
                vertex_buffer: gpu.vertices.buffer().clone(),
            }),
            uniforms: bytemuck::bytes_of(&uniforms).to_vec(),
            vertex_count: 4,
            instance_count: 1,
        });
    }

    fn release(&mut self) {
        if self.gpu.take().is_some() {
            log::debug!("released floor GPU resources");
        }
    }
}
