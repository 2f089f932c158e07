//! Virtual time: the world clock consumed by time-driven scene nodes, and
//! frame-duration bookkeeping for the render loop.

/// Wall-clock to world-time mapping with freeze and playback rate.
pub mod clock;
/// Frame duration tracking and periodic reporting.
pub mod frame_timing;

pub use clock::{SystemClock, WallClock, WorldClock};
pub use frame_timing::FrameTiming;
