use glam::DMat4;

use super::node::{Drawable, SceneNode};

/// Name of the floor leaf in [`default_scene`].
pub const FLOOR_NODE: &str = "floor";
/// Name of the crystal leaf in [`default_scene`].
pub const LATTICE_NODE: &str = "diamond_lattice";

/// Tumbling rotation of the crystal at world time `t`.
#[must_use]
pub fn lattice_rotation(t: f64) -> DMat4 {
    DMat4::from_rotation_x(0.13 * t)
        * DMat4::from_rotation_z(0.11 * t)
        * DMat4::from_rotation_y(0.07 * t)
}

/// The viewer's scene: an optional static floor and an optional tumbling
/// crystal, gated by the display options.
#[must_use]
pub fn default_scene(
    floor: impl Drawable + 'static,
    lattice: impl Drawable + 'static,
) -> SceneNode {
    SceneNode::group(vec![
        SceneNode::toggle(
            SceneNode::transform(
                SceneNode::leaf(floor).named(FLOOR_NODE),
                |_| DMat4::IDENTITY,
            ),
            |frame| frame.options.display.floor_enabled,
        ),
        SceneNode::toggle(
            SceneNode::transform(
                SceneNode::leaf(lattice).named(LATTICE_NODE),
                |frame| lattice_rotation(frame.time),
            ),
            |frame| frame.options.display.lattice_enabled,
        ),
    ])
}
