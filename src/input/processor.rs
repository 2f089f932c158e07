//! Converts raw platform events into engine commands.
//!
//! The `InputProcessor` owns the transient modifier state and the
//! key-binding map. It is the only thing that sits between raw window
//! events and the engine's
//! [`execute`](crate::engine::LatticeEngine::execute) method.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::event::InputEvent;
use crate::engine::ViewerCommand;
use crate::renderer::impostor::CutMode;

/// Prefix marking a binding that requires shift.
const SHIFT_PREFIX: &str = "Shift+";

/// Maps physical key strings to [`ViewerCommand`] variants.
///
/// Key strings use the `winit::keyboard::KeyCode` debug format, optionally
/// prefixed with `"Shift+"`: `"Space"`, `"Shift+BracketRight"`, etc.
///
/// Only *discrete* commands make sense as key bindings; parameterized
/// commands like `SetPlaybackRate` are issued programmatically.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct KeyBindings {
    /// Forward map: key string → command tag.
    bindings: HashMap<String, KeyCommandTag>,
}

/// Serializable tag for the subset of [`ViewerCommand`] that can be
/// key-bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyCommandTag {
    /// Freeze or resume world time.
    ToggleFreeze,
    /// Halve the playback rate.
    HalvePlaybackRate,
    /// Double the playback rate.
    DoublePlaybackRate,
    /// Reverse playback direction.
    ReversePlayback,
    /// Disable cutting.
    ClearCut,
    /// Toggle the first cut mode.
    ToggleCut1,
    /// Toggle the second cut mode.
    ToggleCut2,
    /// Toggle the third cut mode.
    ToggleCut3,
    /// Advance the color scheme.
    CycleColorMode,
    /// Switch impostor shading.
    CycleImpostorMode,
    /// Show or hide the crystal.
    ToggleLattice,
    /// Show or hide the floor.
    ToggleFloor,
    /// Grow the crystal side length.
    GrowCrystal,
    /// Shrink the crystal side length.
    ShrinkCrystal,
    /// Draw more cells per axis.
    AddCells,
    /// Draw fewer cells per axis.
    RemoveCells,
    /// Move the eye closer.
    MoveCloser,
    /// Move the eye away.
    MoveAway,
}

impl KeyCommandTag {
    /// Convert to the corresponding [`ViewerCommand`].
    fn to_command(self) -> ViewerCommand {
        match self {
            Self::ToggleFreeze => ViewerCommand::ToggleFreeze,
            Self::HalvePlaybackRate => ViewerCommand::HalvePlaybackRate,
            Self::DoublePlaybackRate => ViewerCommand::DoublePlaybackRate,
            Self::ReversePlayback => ViewerCommand::ReversePlayback,
            Self::ClearCut => ViewerCommand::ClearCut,
            Self::ToggleCut1 => ViewerCommand::ToggleCut(CutMode::Cut1),
            Self::ToggleCut2 => ViewerCommand::ToggleCut(CutMode::Cut2),
            Self::ToggleCut3 => ViewerCommand::ToggleCut(CutMode::Cut3),
            Self::CycleColorMode => ViewerCommand::CycleColorMode,
            Self::CycleImpostorMode => ViewerCommand::CycleImpostorMode,
            Self::ToggleLattice => ViewerCommand::ToggleLattice,
            Self::ToggleFloor => ViewerCommand::ToggleFloor,
            Self::GrowCrystal => ViewerCommand::GrowCrystal,
            Self::ShrinkCrystal => ViewerCommand::ShrinkCrystal,
            Self::AddCells => ViewerCommand::AddCells,
            Self::RemoveCells => ViewerCommand::RemoveCells,
            Self::MoveCloser => ViewerCommand::MoveCloser,
            Self::MoveAway => ViewerCommand::MoveAway,
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        use KeyCommandTag as K;
        let bindings = [
            ("Space", K::ToggleFreeze),
            ("Comma", K::HalvePlaybackRate),
            ("Period", K::DoublePlaybackRate),
            ("Slash", K::ReversePlayback),
            ("Digit0", K::ClearCut),
            ("Digit1", K::ToggleCut1),
            ("Digit2", K::ToggleCut2),
            ("Digit3", K::ToggleCut3),
            ("KeyC", K::CycleColorMode),
            ("KeyI", K::CycleImpostorMode),
            ("KeyD", K::ToggleLattice),
            ("KeyL", K::ToggleFloor),
            ("BracketRight", K::GrowCrystal),
            ("BracketLeft", K::ShrinkCrystal),
            ("Shift+BracketRight", K::AddCells),
            ("Shift+BracketLeft", K::RemoveCells),
            ("ArrowUp", K::MoveCloser),
            ("ArrowDown", K::MoveAway),
        ]
        .into_iter()
        .map(|(key, tag)| (key.to_owned(), tag))
        .collect();
        Self { bindings }
    }
}

impl KeyBindings {
    /// Look up the command for a key string.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<ViewerCommand> {
        self.bindings.get(key).map(|tag| tag.to_command())
    }

    /// Bind `key` to `tag`, returning the tag it replaces.
    pub fn bind(
        &mut self,
        key: impl Into<String>,
        tag: KeyCommandTag,
    ) -> Option<KeyCommandTag> {
        self.bindings.insert(key.into(), tag)
    }

    /// Remove the binding for `key`.
    pub fn unbind(&mut self, key: &str) -> Option<KeyCommandTag> {
        self.bindings.remove(key)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// InputProcessor
// ─────────────────────────────────────────────────────────────────────────────

/// Converts raw key events into [`ViewerCommand`]s.
///
/// With shift held, `"Shift+<key>"` is looked up first and the plain key
/// is the fallback, so unshifted bindings keep working.
///
/// # Usage
///
/// ```ignore
/// if let Some(cmd) = input_processor.handle_event(event) {
///     engine.execute(cmd);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct InputProcessor {
    /// Whether the shift modifier is currently held.
    shift_pressed: bool,
    /// Key string → command mapping.
    key_bindings: KeyBindings,
}

impl InputProcessor {
    /// Create a new processor with default key bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a processor with custom key bindings.
    #[must_use]
    pub fn with_key_bindings(key_bindings: KeyBindings) -> Self {
        Self {
            shift_pressed: false,
            key_bindings,
        }
    }

    /// Whether the shift modifier is held.
    #[must_use]
    pub fn shift_pressed(&self) -> bool {
        self.shift_pressed
    }

    /// Read-only access to the key bindings.
    #[must_use]
    pub fn key_bindings(&self) -> &KeyBindings {
        &self.key_bindings
    }

    /// Mutable access to the key bindings for reconfiguration.
    pub fn key_bindings_mut(&mut self) -> &mut KeyBindings {
        &mut self.key_bindings
    }

    /// Look up a key press under the current modifier state.
    #[must_use]
    pub fn handle_key_press(&self, key: &str) -> Option<ViewerCommand> {
        if self.shift_pressed {
            let shifted = format!("{SHIFT_PREFIX}{key}");
            if let Some(cmd) = self.key_bindings.lookup(&shifted) {
                return Some(cmd);
            }
        }
        self.key_bindings.lookup(key)
    }

    /// Process a raw input event and return zero or one commands.
    pub fn handle_event(
        &mut self,
        event: InputEvent<'_>,
    ) -> Option<ViewerCommand> {
        match event {
            InputEvent::KeyPressed { key } => {
                let cmd = self.handle_key_press(key);
                if cmd.is_none() {
                    log::trace!("unbound key {key}");
                }
                cmd
            }
            InputEvent::ModifiersChanged { shift } => {
                self.shift_pressed = shift;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(processor: &mut InputProcessor, key: &str) -> Option<ViewerCommand> {
        processor.handle_event(InputEvent::KeyPressed { key })
    }

    #[test]
    fn default_bindings_cover_playback_and_shading() {
        let mut p = InputProcessor::new();
        assert_eq!(press(&mut p, "Space"), Some(ViewerCommand::ToggleFreeze));
        assert_eq!(
            press(&mut p, "Comma"),
            Some(ViewerCommand::HalvePlaybackRate)
        );
        assert_eq!(
            press(&mut p, "Digit2"),
            Some(ViewerCommand::ToggleCut(CutMode::Cut2))
        );
        assert_eq!(press(&mut p, "ArrowDown"), Some(ViewerCommand::MoveAway));
        assert_eq!(press(&mut p, "KeyQ"), None);
    }

    #[test]
    fn shift_selects_shifted_binding() {
        let mut p = InputProcessor::new();
        assert_eq!(
            press(&mut p, "BracketRight"),
            Some(ViewerCommand::GrowCrystal)
        );
        let _ = p.handle_event(InputEvent::ModifiersChanged { shift: true });
        assert!(p.shift_pressed());
        assert_eq!(press(&mut p, "BracketRight"), Some(ViewerCommand::AddCells));
        assert_eq!(
            press(&mut p, "BracketLeft"),
            Some(ViewerCommand::RemoveCells)
        );
        // No shifted binding: fall back to the plain key.
        assert_eq!(press(&mut p, "KeyL"), Some(ViewerCommand::ToggleFloor));

        let _ = p.handle_event(InputEvent::ModifiersChanged { shift: false });
        assert_eq!(
            press(&mut p, "BracketLeft"),
            Some(ViewerCommand::ShrinkCrystal)
        );
    }

    #[test]
    fn rebinding_replaces_and_removes() {
        let mut p = InputProcessor::new();
        let bindings = p.key_bindings_mut();
        assert_eq!(
            bindings.bind("KeyF", KeyCommandTag::ToggleFreeze),
            None
        );
        assert_eq!(bindings.unbind("Space"), Some(KeyCommandTag::ToggleFreeze));
        assert_eq!(press(&mut p, "KeyF"), Some(ViewerCommand::ToggleFreeze));
        assert_eq!(press(&mut p, "Space"), None);
    }

    #[test]
    fn bindings_deserialize_from_toml() {
        let bindings: KeyBindings = toml::from_str(
            r#"
[bindings]
"KeyP" = "toggle_freeze"
"Shift+KeyP" = "reverse_playback"
"#,
        )
        .unwrap();
        let p = InputProcessor::with_key_bindings(bindings);
        assert_eq!(
            p.handle_key_press("KeyP"),
            Some(ViewerCommand::ToggleFreeze)
        );
        assert_eq!(p.handle_key_press("Space"), None);
    }
}
