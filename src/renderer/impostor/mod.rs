//! The instanced impostor contract between the unit-cell buffer and the
//! lattice shaders.
//!
//! The vertex stage receives [`ImpostorVertex`] records (one unit cell) and
//! draws `cells_per_dimension³` instances of them; instance `i` is
//! translated by [`instance_translation`]. The fragment stage intersects
//! the view ray with the unit sphere or unit cylinder after mapping it
//! through the per-vertex inverse placement rows, and consumes the
//! [`LatticeUniforms`] selectors. Shader source is supplied by the caller.

mod lattice;
mod modes;
mod uniforms;
mod vertex;

pub use lattice::LatticeRenderable;
pub use modes::{ColorMode, CutMode, ImpostorMode};
pub use uniforms::{instance_cell, instance_translation, LatticeUniforms};
pub use vertex::ImpostorVertex;
