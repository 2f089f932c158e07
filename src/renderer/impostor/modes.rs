//! Per-draw shading selectors passed to the lattice shaders as integers.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Geometric clipping rule evaluated in the fragment stage.
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    Default,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum CutMode {
    /// Draw the whole crystal.
    #[default]
    Off,
    /// First clipping rule.
    Cut1,
    /// Second clipping rule.
    Cut2,
    /// Third clipping rule.
    Cut3,
}

impl CutMode {
    /// Switch to `mode`, or back to [`CutMode::Off`] if it is already
    /// active.
    #[must_use]
    pub fn toggled(self, mode: Self) -> Self {
        if self == mode {
            Self::Off
        } else {
            mode
        }
    }

    /// Shader-side value (0-3).
    #[must_use]
    pub fn as_u32(self) -> u32 {
        self as u32
    }
}

/// Atom and bond coloring scheme.
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    Default,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ColorMode {
    /// Scheme 0.
    #[default]
    Scheme0,
    /// Scheme 1.
    Scheme1,
    /// Scheme 2.
    Scheme2,
}

impl ColorMode {
    /// The following scheme, wrapping after the last.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Scheme0 => Self::Scheme1,
            Self::Scheme1 => Self::Scheme2,
            Self::Scheme2 => Self::Scheme0,
        }
    }

    /// Shader-side value (0-2).
    #[must_use]
    pub fn as_u32(self) -> u32 {
        self as u32
    }
}

/// Whether hull fragments are ray traced against the true shape or shaded
/// flat.
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    Default,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ImpostorMode {
    /// Analytic ray/sphere and ray/cylinder intersection.
    #[default]
    RayTraced,
    /// Shade the hull triangles directly.
    Hull,
}

impl ImpostorMode {
    /// The other mode.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::RayTraced => Self::Hull,
            Self::Hull => Self::RayTraced,
        }
    }

    /// Shader-side value (0-1).
    #[must_use]
    pub fn as_u32(self) -> u32 {
        self as u32
    }
}
