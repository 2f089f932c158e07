use glam::DMat4;

use crate::options::Options;

/// Everything a scene traversal may read, sampled once per frame.
///
/// Transform and toggle functions receive this explicitly instead of
/// capturing shared state.
#[derive(Debug, Clone, Copy)]
pub struct FrameContext<'a> {
    /// World time for this frame.
    pub time: f64,
    /// Options as of the start of the frame.
    pub options: &'a Options,
}

/// Matrices accumulated down the scene graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawTransforms {
    /// Camera projection.
    pub projection: DMat4,
    /// World to eye.
    pub view: DMat4,
    /// Accumulated model matrix.
    pub model: DMat4,
}

impl DrawTransforms {
    /// Root transforms with an identity model matrix.
    #[must_use]
    pub fn new(projection: DMat4, view: DMat4) -> Self {
        Self {
            projection,
            view,
            model: DMat4::IDENTITY,
        }
    }

    /// The same camera with `matrix` composed on the right of the model.
    #[must_use]
    pub fn then(&self, matrix: DMat4) -> Self {
        Self {
            model: self.model * matrix,
            ..*self
        }
    }

    /// Projection * view * model.
    #[must_use]
    pub fn projection_view_model(&self) -> DMat4 {
        self.projection * self.view * self.model
    }
}
