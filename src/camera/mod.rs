//! Fixed perspective camera looking down `-z` at the model origin.

use glam::{DMat4, DVec3};

use crate::options::CameraOptions;
use crate::scene::DrawTransforms;

/// Vertical field of view (radians) for a field of view `fov` applied to
/// the smaller framebuffer dimension.
#[must_use]
pub fn vertical_fov(fov: f64, aspect: f64) -> f64 {
    if aspect >= 1.0 {
        fov
    } else {
        2.0 * ((0.5 * fov).tan() / aspect).atan()
    }
}

/// Perspective camera at `distance` from the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Field of view of the smaller framebuffer dimension, in degrees.
    pub fov_degrees: f64,
    /// Near clipping plane distance.
    pub near: f64,
    /// Far clipping plane distance.
    pub far: f64,
    /// Eye distance from the model origin.
    pub distance: f64,
}

impl Camera {
    /// Camera described by the options.
    #[must_use]
    pub fn from_options(options: &CameraOptions) -> Self {
        Self {
            fov_degrees: f64::from(options.fov_degrees),
            near: f64::from(options.near),
            far: f64::from(options.far),
            distance: f64::from(options.render_distance),
        }
    }

    /// Projection for a `width × height` framebuffer (wgpu depth range), or
    /// `None` if either dimension is zero.
    #[must_use]
    pub fn projection(&self, width: u32, height: u32) -> Option<DMat4> {
        if width == 0 || height == 0 {
            return None;
        }
        let aspect = f64::from(width) / f64::from(height);
        let fov_y = vertical_fov(self.fov_degrees.to_radians(), aspect);
        Some(DMat4::perspective_rh(fov_y, aspect, self.near, self.far))
    }

    /// World to eye: the model origin sits `distance` in front of the eye.
    #[must_use]
    pub fn view(&self) -> DMat4 {
        DMat4::from_translation(DVec3::new(0.0, 0.0, -self.distance))
    }

    /// Root transforms for one frame, or `None` for a zero-sized
    /// framebuffer.
    #[must_use]
    pub fn transforms(&self, width: u32, height: u32) -> Option<DrawTransforms> {
        self.projection(width, height)
            .map(|projection| DrawTransforms::new(projection, self.view()))
    }
}
