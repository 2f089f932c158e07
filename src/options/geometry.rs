use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Geometry", inline)]
#[serde(default)]
/// Unit-cell geometry parameters. Changing these requires regenerating the
/// unit cell.
pub struct GeometryOptions {
    /// Carbon atom sphere radius in lattice units.
    #[schemars(title = "Atom Radius", range(min = 0.05, max = 0.8), extend("step" = 0.05))]
    pub atom_radius: f64,
    /// Bond cylinder radius in lattice units.
    #[schemars(title = "Bond Radius", range(min = 0.01, max = 0.5), extend("step" = 0.01))]
    pub bond_radius: f64,
    /// Sphere hull scale relative to the atom radius.
    #[schemars(skip)]
    pub sphere_hull_scale: f64,
    /// Cylinder hull scale across the bond axis.
    #[schemars(skip)]
    pub cylinder_hull_radial_scale: f64,
    /// Cylinder hull scale along the bond axis.
    #[schemars(skip)]
    pub cylinder_hull_axial_scale: f64,
    /// Midpoint subdivisions applied to the icosahedral sphere hull.
    #[schemars(skip)]
    pub sphere_subdivisions: u32,
    /// Flat sides of the cylinder hull.
    #[schemars(skip)]
    pub cylinder_segments: u32,
    /// Shift the cell so its centroid sits at the origin.
    #[schemars(skip)]
    pub recenter: bool,
}

impl Default for GeometryOptions {
    fn default() -> Self {
        Self {
            atom_radius: 0.3,
            bond_radius: 0.1,
            sphere_hull_scale: 1.26,
            cylinder_hull_radial_scale: 1.2,
            cylinder_hull_axial_scale: 1.01,
            sphere_subdivisions: 0,
            cylinder_segments: 6,
            recenter: true,
        }
    }
}
