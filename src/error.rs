//! Crate-level error types.

use std::fmt;

use crate::gpu::render_context::RenderContextError;
use crate::renderer::geometry::GeometryError;

/// Errors produced by the diamond-lattice crate.
#[derive(Debug)]
pub enum LatticeError {
    /// Unit-cell generation failed.
    Geometry(GeometryError),
    /// GPU context initialization failure.
    Gpu(RenderContextError),
    /// A scene lookup matched more than one node.
    NameConflict {
        /// The requested node name.
        name: String,
        /// How many nodes carry it.
        count: usize,
    },
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
}

impl fmt::Display for LatticeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Geometry(e) => write!(f, "geometry error: {e}"),
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::NameConflict { name, count } => {
                write!(f, "{count} scene nodes are named {name:?}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
        }
    }
}

impl std::error::Error for LatticeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Geometry(e) => Some(e),
            Self::Gpu(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GeometryError> for LatticeError {
    fn from(e: GeometryError) -> Self {
        Self::Geometry(e)
    }
}

impl From<RenderContextError> for LatticeError {
    fn from(e: RenderContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<std::io::Error> for LatticeError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
