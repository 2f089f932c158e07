//! The engine's complete interactive vocabulary.
//!
//! Every user-facing operation, whether triggered by a key press or a
//! programmatic call, is a [`ViewerCommand`] passed to
//! [`LatticeEngine::execute`](super::LatticeEngine::execute).

use crate::renderer::impostor::CutMode;

/// A discrete or parameterized operation the engine can perform.
///
/// ```ignore
/// engine.execute(ViewerCommand::ToggleFreeze);
/// engine.execute(ViewerCommand::SetPlaybackRate { rate: 0.25 });
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewerCommand {
    // ── Playback ────────────────────────────────────────────────────
    /// Freeze or resume world time.
    ToggleFreeze,
    /// Halve the playback rate.
    HalvePlaybackRate,
    /// Double the playback rate.
    DoublePlaybackRate,
    /// Run world time the other way.
    ReversePlayback,
    /// Set an explicit playback rate.
    SetPlaybackRate {
        /// New rate; zero pauses, negative runs backwards.
        rate: f64,
    },

    // ── Lattice shading ─────────────────────────────────────────────
    /// Switch to a cut mode, or back to no cut if it is already active.
    ToggleCut(CutMode),
    /// Disable cutting.
    ClearCut,
    /// Advance to the next color scheme.
    CycleColorMode,
    /// Switch between ray-traced and hull shading.
    CycleImpostorMode,

    // ── Crystal size ────────────────────────────────────────────────
    /// Increase the crystal side length.
    GrowCrystal,
    /// Decrease the crystal side length.
    ShrinkCrystal,
    /// Draw more unit cells per axis.
    AddCells,
    /// Draw fewer unit cells per axis.
    RemoveCells,

    // ── Scene ───────────────────────────────────────────────────────
    /// Show or hide the crystal.
    ToggleLattice,
    /// Show or hide the floor.
    ToggleFloor,

    // ── Camera ──────────────────────────────────────────────────────
    /// Move the eye towards the crystal.
    MoveCloser,
    /// Move the eye away from the crystal.
    MoveAway,
}
