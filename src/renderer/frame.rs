//! Replays a [`DrawList`] into a render pass.

use std::num::NonZeroU64;

use crate::gpu::dynamic_buffer::DynamicBuffer;
use crate::gpu::texture::DepthTarget;
use crate::gpu::RenderContext;
use crate::scene::DrawList;

/// Bytes reserved per draw in the uniform buffer. A multiple of every
/// adapter's `min_uniform_buffer_offset_alignment` (at most 256).
pub const UNIFORM_SLOT_SIZE: usize = 512;

/// Pack each command's uniforms into its own slot.
///
/// Returns the buffer contents and, per command, the dynamic offset of its
/// slot (`None` for blocks that do not fit a slot).
fn pack_uniforms(draws: &DrawList) -> (Vec<u8>, Vec<Option<u32>>) {
    let mut bytes = Vec::with_capacity(draws.len() * UNIFORM_SLOT_SIZE);
    let mut offsets = Vec::with_capacity(draws.len());
    for command in draws {
        if command.uniforms.len() > UNIFORM_SLOT_SIZE {
            log::warn!(
                "{}: {} uniform bytes exceed the {UNIFORM_SLOT_SIZE}-byte slot",
                command.label,
                command.uniforms.len()
            );
            offsets.push(None);
            continue;
        }
        offsets.push(Some(bytes.len() as u32));
        bytes.extend_from_slice(&command.uniforms);
        bytes.resize(bytes.len() + UNIFORM_SLOT_SIZE - command.uniforms.len(), 0);
    }
    (bytes, offsets)
}

/// Owns the per-frame uniform buffer and depth target, and issues the
/// recorded draw calls.
pub struct FrameRenderer {
    uniform_layout: wgpu::BindGroupLayout,
    uniforms: DynamicBuffer,
    bind_group: wgpu::BindGroup,
    depth: DepthTarget,
    /// Color the target is cleared to.
    pub clear_color: wgpu::Color,
}

impl FrameRenderer {
    /// Renderer for the given context.
    #[must_use]
    pub fn new(context: &RenderContext) -> Self {
        let device = &context.device;
        let uniform_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Draw Uniforms Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX
                        | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: true,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });
        let uniforms = DynamicBuffer::new(
            device,
            "Draw Uniforms",
            4 * UNIFORM_SLOT_SIZE,
            wgpu::BufferUsages::UNIFORM,
        );
        let bind_group = Self::create_bind_group(device, &uniform_layout, &uniforms);
        let (width, height) = context.size();
        Self {
            uniform_layout,
            uniforms,
            bind_group,
            depth: DepthTarget::new(device, width, height),
            clear_color: wgpu::Color::BLACK,
        }
    }

    fn create_bind_group(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        uniforms: &DynamicBuffer,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Draw Uniforms Bind Group"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: uniforms.buffer(),
                    offset: 0,
                    size: NonZeroU64::new(UNIFORM_SLOT_SIZE as u64),
                }),
            }],
        })
    }

    /// Layout every drawable's pipeline must bind at group 0.
    #[must_use]
    pub fn uniform_layout(&self) -> &wgpu::BindGroupLayout {
        &self.uniform_layout
    }

    /// Clear `target` and draw `draws` into it. Does nothing for a
    /// zero-sized framebuffer.
    pub fn render(
        &mut self,
        context: &RenderContext,
        target: &wgpu::TextureView,
        draws: &DrawList,
    ) {
        let (width, height) = context.size();
        if width == 0 || height == 0 {
            return;
        }
        if !self.depth.matches(width, height) {
            self.depth = DepthTarget::new(&context.device, width, height);
        }

        let (bytes, offsets) = pack_uniforms(draws);
        if self
            .uniforms
            .write_bytes(&context.device, &context.queue, &bytes)
        {
            self.bind_group = Self::create_bind_group(
                &context.device,
                &self.uniform_layout,
                &self.uniforms,
            );
        }

        let mut encoder = context.create_encoder();
        {
            let mut pass =
                encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Lattice Pass"),
                    color_attachments: &[Some(
                        wgpu::RenderPassColorAttachment {
                            view: target,
                            resolve_target: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Clear(self.clear_color),
                                store: wgpu::StoreOp::Store,
                            },
                            depth_slice: None,
                        },
                    )],
                    depth_stencil_attachment: Some(
                        wgpu::RenderPassDepthStencilAttachment {
                            view: &self.depth.view,
                            depth_ops: Some(wgpu::Operations {
                                load: wgpu::LoadOp::Clear(1.0),
                                store: wgpu::StoreOp::Store,
                            }),
                            stencil_ops: None,
                        },
                    ),
                    ..Default::default()
                });
            self.replay(&mut pass, draws, &offsets);
        }
        context.submit(encoder);
    }

    fn replay(
        &self,
        pass: &mut wgpu::RenderPass<'_>,
        draws: &DrawList,
        offsets: &[Option<u32>],
    ) {
        for (command, offset) in draws.iter().zip(offsets) {
            let (Some(binding), Some(offset)) = (&command.binding, offset)
            else {
                log::warn!("{}: skipped draw without GPU binding", command.label);
                continue;
            };
            if command.instance_count == 0 {
                continue;
            }
            pass.set_pipeline(&binding.pipeline);
            pass.set_bind_group(0, &self.bind_group, &[*offset]);
            pass.set_vertex_buffer(0, binding.vertex_buffer.slice(..));
            pass.draw(0..command.vertex_count, 0..command.instance_count);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::DrawCommand;

    fn command(label: &'static str, uniform_len: usize) -> DrawCommand {
        DrawCommand {
            label,
            binding: None,
            uniforms: vec![7; uniform_len],
            vertex_count: 3,
            instance_count: 1,
        }
    }

    #[test]
    fn uniforms_get_aligned_slots() {
        let mut draws = DrawList::new();
        draws.push(command("floor", 64));
        draws.push(command("too_big", UNIFORM_SLOT_SIZE + 1));
        draws.push(command("lattice", 352));

        let (bytes, offsets) = pack_uniforms(&draws);
        assert_eq!(offsets, [Some(0), None, Some(512)]);
        assert_eq!(bytes.len(), 2 * UNIFORM_SLOT_SIZE);
        assert!(bytes[..64].iter().all(|&b| b == 7));
        assert!(bytes[64..512].iter().all(|&b| b == 0));
        assert!(bytes[512..864].iter().all(|&b| b == 7));
        assert_eq!(UNIFORM_SLOT_SIZE % 256, 0);
    }

    #[test]
    fn empty_list_packs_nothing() {
        let (bytes, offsets) = pack_uniforms(&DrawList::new());
        assert!(bytes.is_empty());
        assert!(offsets.is_empty());
    }
}
