use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Playback", inline)]
#[serde(default)]
/// World-clock start state and frame statistics.
pub struct PlaybackOptions {
    /// Playback rate applied when the engine starts.
    #[schemars(title = "Playback Rate", range(min = -8.0, max = 8.0), extend("step" = 0.25))]
    pub initial_rate: f64,
    /// Start with world time frozen.
    #[schemars(title = "Start Frozen")]
    pub start_frozen: bool,
    /// Frames per frame-time report (0 disables reporting).
    #[schemars(skip)]
    pub frame_report_interval: u32,
}

impl Default for PlaybackOptions {
    fn default() -> Self {
        Self {
            initial_rate: 1.0,
            start_frozen: false,
            frame_report_interval: 100,
        }
    }
}
