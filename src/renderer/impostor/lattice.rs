use super::{ImpostorVertex, LatticeUniforms};
use crate::gpu::dynamic_buffer::DynamicBuffer;
use crate::gpu::RenderContext;
use crate::options::GeometryOptions;
use crate::renderer::geometry::{GeometryError, UnitCell};
use crate::renderer::pipeline_util::{self, PipelineSpec};
use crate::scene::{
    DrawCommand, DrawList, DrawTransforms, Drawable, FrameContext, GpuBinding,
};

struct LatticeGpu {
    pipeline: wgpu::RenderPipeline,
    vertices: DynamicBuffer,
}

/// Scene leaf drawing the whole crystal as one instanced draw of the unit
/// cell.
///
/// Reads `options.lattice` every frame; the cell geometry itself is built
/// and uploaded once, at construction.
pub struct LatticeRenderable {
    cell: UnitCell,
    gpu: Option<LatticeGpu>,
}

impl LatticeRenderable {
    /// Generate the unit cell and upload it.
    ///
    /// `shader` must export `vs_main`/`fs_main` consuming
    /// [`ImpostorVertex`] and [`LatticeUniforms`] at group 0.
    ///
    /// # Errors
    ///
    /// Propagates unit-cell generation failures.
    pub fn new(
        context: &RenderContext,
        shader: &wgpu::ShaderModule,
        uniform_layout: &wgpu::BindGroupLayout,
        geometry: &GeometryOptions,
    ) -> Result<Self, GeometryError> {
        let cell = UnitCell::generate(geometry)?;
        let vertices = DynamicBuffer::new_with_data(
            &context.device,
            "Diamond Lattice Vertices",
            cell.vertices(),
            wgpu::BufferUsages::VERTEX,
        );
        let pipeline = pipeline_util::create_pipeline(
            &context.device,
            PipelineSpec {
                label: "Diamond Lattice",
                shader,
                uniform_layout,
                vertex_layout: ImpostorVertex::layout(),
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: Some(wgpu::Face::Back),
                color_format: context.format(),
            },
        );
        log::info!("uploaded unit cell ({} bytes)", cell.byte_len());
        Ok(Self {
            cell,
            gpu: Some(LatticeGpu { pipeline, vertices }),
        })
    }

    /// Generate the unit cell without GPU resources. Draws are recorded
    /// unbound.
    ///
    /// # Errors
    ///
    /// Propagates unit-cell generation failures.
    pub fn detached(geometry: &GeometryOptions) -> Result<Self, GeometryError> {
        Ok(Self {
            cell: UnitCell::generate(geometry)?,
            gpu: None,
        })
    }

    /// The generated cell.
    #[must_use]
    pub fn unit_cell(&self) -> &UnitCell {
        &self.cell
    }

    /// Whether GPU resources are held.
    #[must_use]
    pub fn is_uploaded(&self) -> bool {
        self.gpu.is_some()
    }
}

impl Drawable for LatticeRenderable {
    fn draw(
        &self,
        frame: &FrameContext<'_>,
        transforms: &DrawTransforms,
        draws: &mut DrawList,
    ) {
        let lattice = &frame.options.lattice;
        let uniforms = LatticeUniforms::new(transforms, lattice);
        draws.push(DrawCommand {
            label: "diamond_lattice",
            binding: self.gpu.as_ref().map(|gpu| GpuBinding {
                pipeline: gpu.pipeline.clone(),
                vertex_buffer: gpu.vertices.buffer().clone(),
            }),
            uniforms: bytemuck::bytes_of(&uniforms).to_vec(),
            vertex_count: self.cell.vertex_count() as u32,
            instance_count: lattice.instance_count(),
        });
    }

    fn release(&mut self) {
        if self.gpu.take().is_some() {
            log::debug!("released diamond lattice GPU resources");
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::{DMat4, DVec3};

    use super::*;
    use crate::options::Options;

    #[test]
    fn one_instanced_draw_per_frame() {
        let mut options = Options::default();
        options.lattice.cells_per_dimension = 3;
        let leaf = LatticeRenderable::detached(&options.geometry).unwrap();
        assert!(!leaf.is_uploaded());

        let transforms = DrawTransforms::new(
            DMat4::perspective_rh(0.5, 1.0, 0.5, 1000.0),
            DMat4::from_translation(DVec3::new(0.0, 0.0, -60.0)),
        );
        let mut draws = DrawList::new();
        leaf.draw(
            &FrameContext {
                time: 0.0,
                options: &options,
            },
            &transforms,
            &mut draws,
        );

        let [command] = draws.commands() else {
            panic!("expected a single draw");
        };
        assert_eq!(command.vertex_count, 1056);
        assert_eq!(command.instance_count, 27);
        assert!(command.binding.is_none());

        let uniforms: LatticeUniforms =
            bytemuck::pod_read_unaligned(&command.uniforms);
        assert_eq!(uniforms, LatticeUniforms::new(&transforms, &options.lattice));
        assert_eq!(uniforms.cells_per_dimension, 3);
    }

    #[test]
    fn invalid_geometry_fails_construction() {
        let geometry = GeometryOptions {
            bond_radius: 1.0,
            ..GeometryOptions::default()
        };
        assert!(LatticeRenderable::detached(&geometry).is_err());
    }
}
