//! GPU resource management utilities.
//!
//! Provides wgpu device/surface initialization, growable buffers and the
//! shared depth attachment.

/// Growable GPU buffers with automatic reallocation.
pub mod dynamic_buffer;
/// wgpu device, surface, and queue initialization.
pub mod render_context;
/// Depth attachment sized to the framebuffer.
pub mod texture;

pub use render_context::{RenderContext, RenderContextError};
