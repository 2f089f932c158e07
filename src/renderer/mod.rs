//! GPU-side rendering: unit-cell geometry, the impostor contract, scene
//! leaves and the frame renderer.

pub mod floor;
pub mod frame;
pub mod geometry;
pub mod impostor;
pub(crate) mod pipeline_util;

pub use floor::FloorRenderable;
pub use frame::FrameRenderer;
pub use impostor::LatticeRenderable;
