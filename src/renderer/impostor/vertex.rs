use bytemuck::{Pod, Zeroable};
use glam::{DMat4, DVec3, IVec3};

/// One hull triangle corner of the unit-cell vertex buffer.
///
/// Must match the WGSL vertex input layout: locations 0-5 in field order,
/// with the inverse placement split into three row vectors.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ImpostorVertex {
    /// Hull corner in cell coordinates.
    pub position: [f32; 3],
    /// Lattice site of the atom, or the bond's origin site.
    pub lattice_position: [i32; 3],
    /// Zero for atoms; the bond direction for bonds.
    pub lattice_delta: [i32; 3],
    /// Rows 0-2 of the inverse placement matrix. Row 3 is always
    /// `[0, 0, 0, 1]`.
    pub inverse_placement: [[f32; 4]; 3],
}

impl ImpostorVertex {
    /// Vertex attributes, one per shader location.
    pub const ATTRIBUTES: [wgpu::VertexAttribute; 6] = wgpu::vertex_attr_array![
        0 => Float32x3,
        1 => Sint32x3,
        2 => Sint32x3,
        3 => Float32x4,
        4 => Float32x4,
        5 => Float32x4,
    ];

    /// Pack a hull corner with its impostor's tags.
    #[must_use]
    pub fn new(
        position: DVec3,
        lattice_position: IVec3,
        lattice_delta: IVec3,
        inverse_placement: &DMat4,
    ) -> Self {
        Self {
            position: position.as_vec3().to_array(),
            lattice_position: lattice_position.to_array(),
            lattice_delta: lattice_delta.to_array(),
            inverse_placement: [0, 1, 2]
                .map(|i| inverse_placement.row(i).as_vec4().to_array()),
        }
    }

    /// Per-vertex buffer layout for pipeline creation.
    #[must_use]
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }

    /// Whether this vertex belongs to a bond hull.
    #[must_use]
    pub fn is_bond(&self) -> bool {
        self.lattice_delta != [0; 3]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stride_and_offsets_match_shader_layout() {
        assert_eq!(size_of::<ImpostorVertex>(), 84);
        let offsets: Vec<_> =
            ImpostorVertex::ATTRIBUTES.iter().map(|a| a.offset).collect();
        assert_eq!(offsets, [0, 12, 24, 36, 52, 68]);
        let locations: Vec<_> = ImpostorVertex::ATTRIBUTES
            .iter()
            .map(|a| a.shader_location)
            .collect();
        assert_eq!(locations, [0, 1, 2, 3, 4, 5]);
        assert_eq!(ImpostorVertex::layout().array_stride, 84);
    }

    #[test]
    fn rows_are_taken_from_the_matrix_rows() {
        let m = DMat4::from_translation(DVec3::new(1.0, 2.0, 3.0))
            * DMat4::from_scale(DVec3::splat(2.0));
        let v = ImpostorVertex::new(DVec3::ZERO, IVec3::ONE, IVec3::ZERO, &m);
        assert_eq!(v.inverse_placement[0], [2.0, 0.0, 0.0, 1.0]);
        assert_eq!(v.inverse_placement[1], [0.0, 2.0, 0.0, 2.0]);
        assert_eq!(v.inverse_placement[2], [0.0, 0.0, 2.0, 3.0]);
        assert!(!v.is_bond());
    }
}
