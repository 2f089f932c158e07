//! Scene graph: groups, time-varying transforms, toggles and drawable
//! leaves.
//!
//! The graph is built once; behaviour changes frame to frame through
//! the functions held by [`NodeKind::Transform`] and [`NodeKind::Toggle`],
//! which receive the frame's [`FrameContext`]. A traversal records
//! [`DrawCommand`]s into a [`DrawList`] that the frame renderer replays.

mod default_scene;
mod draw_list;
mod frame;
pub(crate) mod node;

pub use default_scene::{
    default_scene, lattice_rotation, FLOOR_NODE, LATTICE_NODE,
};
pub use draw_list::{DrawCommand, DrawList, GpuBinding};
pub use frame::{DrawTransforms, FrameContext};
pub use node::{Drawable, MatrixFn, NodeKind, Nodes, PredicateFn, SceneNode};
