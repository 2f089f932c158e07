//! Input handling: platform-agnostic key events and the processor that
//! turns them into engine commands.

/// Platform-agnostic input events.
pub mod event;
/// Converts raw events into engine commands.
pub mod processor;

pub use event::InputEvent;
pub use processor::{InputProcessor, KeyBindings, KeyCommandTag};
