//! Procedural vertex data for one conventional diamond cell.

use glam::{DMat4, DVec3, IVec3};

use super::placement::{
    cylinder_placement, invert_placement, transform_points, trim_segment,
    GeometryError,
};
use super::primitives::{
    triangle_vertices, unit_cylinder_triangles, unit_sphere_triangles,
};
use crate::lattice::{
    unit_cell_bonds, unit_cell_sites, BondCandidate, LatticeSite,
    NEIGHBOR_OFFSETS, UNIT_CELL_PERIOD,
};
use crate::options::GeometryOptions;
use crate::renderer::impostor::ImpostorVertex;

/// Fraction of the sphere/cylinder contact depth a bond is pulled in by,
/// so the cylinder pierces each sphere slightly and no seam shows.
pub const PIERCING_FRACTION: f64 = 0.98;

/// Distance a bond endpoint is pulled in from the atom centre.
#[must_use]
pub fn bond_inset(atom_radius: f64, bond_radius: f64) -> f64 {
    let depth_squared = atom_radius * atom_radius - bond_radius * bond_radius;
    PIERCING_FRACTION * depth_squared.sqrt()
}

/// Offset applied to cell coordinates when recentering.
fn recenter_offset(recenter: bool) -> DVec3 {
    if recenter {
        DVec3::splat(-f64::from(UNIT_CELL_PERIOD - 1) / 2.0)
    } else {
        DVec3::ZERO
    }
}

/// A sphere impostor for one atom.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomImpostor {
    /// The atom's lattice site.
    pub site: LatticeSite,
    /// Sphere centre in cell coordinates.
    pub center: DVec3,
    /// Maps the unit sphere onto the true atom sphere.
    pub placement: DMat4,
}

/// A cylinder impostor for one bond.
#[derive(Debug, Clone, PartialEq)]
pub struct BondImpostor {
    /// The bond's lattice topology.
    pub bond: BondCandidate,
    /// Trimmed axis start, inside the origin atom.
    pub start: DVec3,
    /// Trimmed axis end, inside the target atom.
    pub end: DVec3,
    /// Maps the unit cylinder onto the true bond cylinder.
    pub placement: DMat4,
}

/// One periodic unit cell as a flat triangle list of impostor hulls.
///
/// Atoms come first, then bonds; every impostor contributes a contiguous
/// run of vertices. The buffer is uploaded once and drawn instanced.
#[derive(Debug, Clone)]
pub struct UnitCell {
    vertices: Vec<ImpostorVertex>,
    atoms: Vec<AtomImpostor>,
    bonds: Vec<BondImpostor>,
}

impl UnitCell {
    /// Generate the cell.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidRadii`] unless
    /// `0 < bond_radius < atom_radius` and the bond inset at both ends stays
    /// shorter than a bond, and propagates placement failures.
    pub fn generate(options: &GeometryOptions) -> Result<Self, GeometryError> {
        let GeometryOptions {
            atom_radius,
            bond_radius,
            ..
        } = *options;
        let bond_length = NEIGHBOR_OFFSETS[0].as_dvec3().length();
        let radii_valid = bond_radius.is_finite()
            && bond_radius > 0.0
            && bond_radius < atom_radius
            && 2.0 * bond_inset(atom_radius, bond_radius) < bond_length;
        if !radii_valid {
            return Err(GeometryError::InvalidRadii {
                atom: atom_radius,
                bond: bond_radius,
            });
        }

        let sphere_hull = triangle_vertices(&unit_sphere_triangles(
            options.sphere_subdivisions,
        ));
        let cylinder_hull = triangle_vertices(&unit_cylinder_triangles(
            options.cylinder_segments,
            false,
        ));
        let sphere_oversize =
            DMat4::from_scale(DVec3::splat(options.sphere_hull_scale));
        let cylinder_oversize = DMat4::from_scale(DVec3::new(
            options.cylinder_hull_radial_scale,
            options.cylinder_hull_radial_scale,
            options.cylinder_hull_axial_scale,
        ));
        let shift = recenter_offset(options.recenter);

        let sites = unit_cell_sites();
        let candidates = unit_cell_bonds(&sites);
        let mut vertices = Vec::with_capacity(
            sites.len() * sphere_hull.len()
                + candidates.len() * cylinder_hull.len(),
        );

        let mut atoms = Vec::with_capacity(sites.len());
        for site in sites {
            let center = site.to_dvec3() + shift;
            let placement = DMat4::from_translation(center)
                * DMat4::from_scale(DVec3::splat(atom_radius));
            let inverse = invert_placement(&placement)?;
            let hull = placement * sphere_oversize;
            let lattice_position = site.to_ivec3();
            vertices.extend(
                transform_points(&hull, &sphere_hull).into_iter().map(|p| {
                    ImpostorVertex::new(p, lattice_position, IVec3::ZERO, &inverse)
                }),
            );
            atoms.push(AtomImpostor {
                site,
                center,
                placement,
            });
        }

        let inset = bond_inset(atom_radius, bond_radius);
        let mut bonds = Vec::with_capacity(candidates.len());
        for bond in candidates {
            let (start, end) = trim_segment(
                bond.origin.to_dvec3() + shift,
                bond.target().to_dvec3() + shift,
                inset,
            )?;
            let placement = cylinder_placement(start, end, bond_radius)?;
            let inverse = invert_placement(&placement)?;
            let hull = placement * cylinder_oversize;
            let origin = bond.origin.to_ivec3();
            vertices.extend(
                transform_points(&hull, &cylinder_hull).into_iter().map(|p| {
                    ImpostorVertex::new(p, origin, bond.delta, &inverse)
                }),
            );
            bonds.push(BondImpostor {
                bond,
                start,
                end,
                placement,
            });
        }

        let cell = Self {
            vertices,
            atoms,
            bonds,
        };
        log::info!(
            "diamond lattice unit cell: {} triangles, {} vertices, \
             {} bytes ({} bytes per vertex)",
            cell.triangle_count(),
            cell.vertex_count(),
            cell.byte_len(),
            size_of::<ImpostorVertex>()
        );
        Ok(cell)
    }

    /// The vertex buffer contents, three vertices per triangle.
    #[must_use]
    pub fn vertices(&self) -> &[ImpostorVertex] {
        &self.vertices
    }

    /// The vertex buffer as raw bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Atom impostors, in site order.
    #[must_use]
    pub fn atoms(&self) -> &[AtomImpostor] {
        &self.atoms
    }

    /// Bond impostors, in emission order.
    #[must_use]
    pub fn bonds(&self) -> &[BondImpostor] {
        &self.bonds
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of hull triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Size of the vertex buffer in bytes.
    #[must_use]
    pub fn byte_len(&self) -> usize {
        self.as_bytes().len()
    }
}
