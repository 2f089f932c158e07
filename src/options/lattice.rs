use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

use crate::renderer::impostor::{ColorMode, CutMode, ImpostorMode};

/// Bounds on the per-axis instance count.
const CELLS_RANGE: (u32, u32) = (1, 255);

fn clamp_cells(cells: u32) -> u32 {
    let (min, max) = CELLS_RANGE;
    cells.clamp(min, max)
}

fn deserialize_cells<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<u32, D::Error> {
    let cells = u32::deserialize(deserializer)?;
    let clamped = clamp_cells(cells);
    if clamped != cells {
        log::warn!("cells_per_dimension {cells} clamped to {clamped}");
    }
    Ok(clamped)
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Lattice", inline)]
#[serde(default)]
/// Crystal size and shading modes, read once per frame by the lattice
/// leaf.
pub struct LatticeOptions {
    /// Unit cells along each axis; the crystal draws this many cubed.
    #[schemars(title = "Cells per Dimension", range(min = 1, max = 255), extend("step" = 2))]
    #[serde(deserialize_with = "deserialize_cells")]
    pub cells_per_dimension: u32,
    /// Side length of the visible crystal used by the cut rules.
    #[schemars(title = "Crystal Side Length", range(min = 0.0, max = 1020.0), extend("step" = 2.0))]
    pub crystal_side_length: f32,
    /// Clipping rule applied in the fragment stage.
    #[schemars(title = "Cut Mode")]
    pub cut_mode: CutMode,
    /// Coloring scheme.
    #[schemars(title = "Color Mode")]
    pub color_mode: ColorMode,
    /// Ray-traced or flat hull shading.
    #[schemars(title = "Impostor Mode")]
    pub impostor_mode: ImpostorMode,
}

impl LatticeOptions {
    /// Add `delta` cells per axis, clamped to `[1, 255]`.
    pub fn adjust_cells(&mut self, delta: i32) {
        self.cells_per_dimension =
            clamp_cells(self.cells().saturating_add_signed(delta));
    }

    /// Cells per axis as drawn: the field clamped to `[1, 255]`, so values
    /// written directly through the public field stay drawable.
    #[must_use]
    pub fn cells(&self) -> u32 {
        clamp_cells(self.cells_per_dimension)
    }

    /// Add `delta` to the crystal side length, never below zero.
    pub fn adjust_side_length(&mut self, delta: f32) {
        self.crystal_side_length = (self.crystal_side_length + delta).max(0.0);
    }

    /// Number of unit-cell instances drawn per frame.
    #[must_use]
    pub fn instance_count(&self) -> u32 {
        self.cells().saturating_pow(3)
    }
}

impl Default for LatticeOptions {
    fn default() -> Self {
        Self {
            cells_per_dimension: 5,
            crystal_side_length: 16.0,
            cut_mode: CutMode::default(),
            color_mode: ColorMode::default(),
            impostor_mode: ImpostorMode::default(),
        }
    }
}
