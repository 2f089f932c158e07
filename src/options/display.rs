use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Display", inline)]
#[serde(default)]
/// Scene visibility toggles.
pub struct DisplayOptions {
    /// Whether to draw the crystal.
    #[schemars(title = "Show Lattice")]
    pub lattice_enabled: bool,
    /// Whether to draw the ground plane.
    #[schemars(title = "Show Floor")]
    pub floor_enabled: bool,
    /// Floor extent along x and z.
    #[schemars(skip)]
    pub floor_size: [f32; 2],
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            lattice_enabled: true,
            floor_enabled: true,
            floor_size: [8.0, 8.0],
        }
    }
}
