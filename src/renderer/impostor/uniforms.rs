use bytemuck::{Pod, Zeroable};
use glam::{DMat4, DVec3, UVec3};

use crate::lattice::UNIT_CELL_PERIOD;
use crate::options::LatticeOptions;
use crate::scene::DrawTransforms;

/// Per-draw uniforms of the lattice pipeline.
///
/// Matrices are column-major. Must match the WGSL `LatticeUniforms`
/// struct.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct LatticeUniforms {
    /// Projection matrix.
    pub projection: [[f32; 4]; 4],
    /// Projection * view * model.
    pub projection_view_model: [[f32; 4]; 4],
    /// View * model.
    pub view_model: [[f32; 4]; 4],
    /// Transposed inverse of the view matrix.
    pub transposed_inverse_view: [[f32; 4]; 4],
    /// Transposed inverse of view * model.
    pub transposed_inverse_view_model: [[f32; 4]; 4],
    /// Unit cells along each crystal axis.
    pub cells_per_dimension: u32,
    /// Crystal side length consumed by the cut rules.
    pub crystal_side_length: f32,
    /// [`CutMode`](super::CutMode) as an integer.
    pub cut_mode: u32,
    /// [`ColorMode`](super::ColorMode) as an integer.
    pub color_mode: u32,
    /// [`ImpostorMode`](super::ImpostorMode) as an integer.
    pub impostor_mode: u32,
    _pad: [u32; 3],
}

fn columns(m: &DMat4) -> [[f32; 4]; 4] {
    m.as_mat4().to_cols_array_2d()
}

impl LatticeUniforms {
    /// Uniforms for one draw with the given accumulated transforms and
    /// lattice settings.
    #[must_use]
    pub fn new(transforms: &DrawTransforms, lattice: &LatticeOptions) -> Self {
        let view_model = transforms.view * transforms.model;
        Self {
            projection: columns(&transforms.projection),
            projection_view_model: columns(
                &(transforms.projection * view_model),
            ),
            view_model: columns(&view_model),
            transposed_inverse_view: columns(
                &transforms.view.inverse().transpose(),
            ),
            transposed_inverse_view_model: columns(
                &view_model.inverse().transpose(),
            ),
            cells_per_dimension: lattice.cells(),
            crystal_side_length: lattice.crystal_side_length,
            cut_mode: lattice.cut_mode.as_u32(),
            color_mode: lattice.color_mode.as_u32(),
            impostor_mode: lattice.impostor_mode.as_u32(),
            _pad: [0; 3],
        }
    }
}

/// Cell coordinates of instance `index` in an `n`-per-axis crystal:
/// x varies fastest, then y, then z.
#[must_use]
pub fn instance_cell(index: u32, n: u32) -> UVec3 {
    let n = n.max(1);
    let layer = u64::from(n) * u64::from(n);
    let z = (u64::from(index) / layer) as u32;
    UVec3::new(index % n, (index / n) % n, z)
}

/// Translation applied to instance `index` so that the `n³` cells tile a
/// crystal centred on the model origin.
#[must_use]
pub fn instance_translation(index: u32, n: u32) -> DVec3 {
    let centre = (f64::from(n.max(1)) - 1.0) / 2.0;
    (instance_cell(index, n).as_dvec3() - DVec3::splat(centre))
        * f64::from(UNIT_CELL_PERIOD)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::impostor::{ColorMode, CutMode, ImpostorMode};

    #[test]
    fn uniform_block_is_vec4_aligned() {
        assert_eq!(size_of::<LatticeUniforms>(), 352);
        assert_eq!(size_of::<LatticeUniforms>() % 16, 0);
    }

    #[test]
    fn matrices_and_modes_are_packed() {
        let transforms = DrawTransforms {
            projection: DMat4::from_scale(DVec3::splat(2.0)),
            view: DMat4::from_translation(DVec3::new(0.0, 0.0, -10.0)),
            model: DMat4::from_rotation_y(0.5),
        };
        let lattice = LatticeOptions {
            cells_per_dimension: 7,
            crystal_side_length: 12.0,
            cut_mode: CutMode::Cut1,
            color_mode: ColorMode::Scheme2,
            impostor_mode: ImpostorMode::Hull,
        };
        let u = LatticeUniforms::new(&transforms, &lattice);

        let vm = transforms.view * transforms.model;
        assert_eq!(u.view_model, columns(&vm));
        assert_eq!(u.projection_view_model, columns(&(transforms.projection * vm)));
        // Translation lives in the last column.
        assert_eq!(u.transposed_inverse_view[2][3], 10.0);
        assert_eq!(
            (u.cells_per_dimension, u.cut_mode, u.color_mode, u.impostor_mode),
            (7, 1, 2, 1)
        );
        assert_eq!(u.crystal_side_length, 12.0);
    }

    #[test]
    fn instances_walk_x_then_y_then_z() {
        assert_eq!(instance_cell(0, 3), UVec3::ZERO);
        assert_eq!(instance_cell(1, 3), UVec3::new(1, 0, 0));
        assert_eq!(instance_cell(3, 3), UVec3::new(0, 1, 0));
        assert_eq!(instance_cell(9, 3), UVec3::new(0, 0, 1));
        assert_eq!(instance_cell(26, 3), UVec3::splat(2));
    }

    #[test]
    fn huge_crystal_index_does_not_overflow() {
        let n = 70_000;
        assert_eq!(instance_cell(n + 1, n), UVec3::new(1, 1, 0));
        assert_eq!(instance_cell(u32::MAX, u32::MAX), UVec3::new(0, 1, 0));
    }

    #[test]
    fn instance_offsets_are_centred() {
        assert_eq!(instance_translation(0, 1), DVec3::ZERO);
        assert_eq!(instance_translation(0, 3), DVec3::splat(-4.0));
        assert_eq!(instance_translation(26, 3), DVec3::splat(4.0));
        assert_eq!(instance_translation(0, 2), DVec3::splat(-2.0));

        let n = 5;
        let sum: DVec3 = (0..n * n * n).map(|i| instance_translation(i, n)).sum();
        assert!(sum.length() < 1e-9);
    }
}
