use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Smallest allowed viewing distance.
const MIN_RENDER_DISTANCE: f32 = 0.0;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Camera projection and viewing distance.
pub struct CameraOptions {
    /// Field of view in degrees, applied to the smaller framebuffer
    /// dimension.
    #[schemars(title = "Field of View", range(min = 10.0, max = 90.0), extend("step" = 1.0))]
    pub fov_degrees: f32,
    /// Near clipping plane distance.
    #[schemars(skip)]
    pub near: f32,
    /// Far clipping plane distance.
    #[schemars(skip)]
    pub far: f32,
    /// Distance from the eye to the model origin.
    #[schemars(title = "Render Distance", range(min = 0.0, max = 500.0), extend("step" = 5.0))]
    pub render_distance: f32,
}

impl CameraOptions {
    /// Move the eye by `delta`, never past the model origin.
    pub fn adjust_render_distance(&mut self, delta: f32) {
        self.render_distance =
            (self.render_distance + delta).max(MIN_RENDER_DISTANCE);
    }
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fov_degrees: 30.0,
            near: 0.5,
            far: 1000.0,
            render_distance: 60.0,
        }
    }
}
