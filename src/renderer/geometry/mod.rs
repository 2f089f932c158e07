//! Procedural geometry for the crystal's impostor hulls.
//!
//! [`primitives`] builds coarse unit spheres and cylinders, [`placement`]
//! maps them into the cell, and [`UnitCell`] assembles one periodic cell
//! into the vertex buffer consumed by the lattice pipeline.

pub mod placement;
pub mod primitives;
mod unit_cell;

pub use placement::GeometryError;
pub use unit_cell::{
    bond_inset, AtomImpostor, BondImpostor, UnitCell, PIERCING_FRACTION,
};
