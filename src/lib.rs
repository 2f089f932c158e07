// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Real-time diamond crystal lattice visualization built on wgpu.
//!
//! The crate generates one periodic unit cell of the diamond lattice as a
//! flat buffer of sphere and cylinder impostor hulls, then draws the whole
//! crystal with a single instanced draw call per frame. Fragment shading
//! (ray/sphere and ray/cylinder intersection against each hull's inverse
//! placement matrix) is supplied by the embedding application.
//!
//! # Key entry points
//!
//! - [`engine::LatticeEngine`] - per-frame orchestration and commands
//! - [`renderer::geometry::UnitCell`] - the procedural unit-cell generator
//! - [`scene::SceneNode`] - the composable scene graph
//! - [`time::WorldClock`] - virtual time with freeze and playback rate
//! - [`options::Options`] - runtime configuration with TOML presets
//!
//! # Frame model
//!
//! Each frame samples the world clock exactly once, then walks the scene
//! graph. Transform and toggle nodes evaluate their functions against an
//! explicit [`scene::FrameContext`], and leaves record
//! [`scene::DrawCommand`]s that [`renderer::FrameRenderer`] replays into a
//! `wgpu::RenderPass`.

pub mod camera;
pub mod engine;
pub mod error;
pub mod gpu;
pub mod input;
pub mod lattice;
pub mod options;
pub mod renderer;
pub mod scene;
pub mod time;

pub use engine::{LatticeEngine, ViewerCommand};
pub use error::LatticeError;
pub use options::Options;
