use glam::DMat4;

use super::draw_list::DrawList;
use super::frame::{DrawTransforms, FrameContext};
use crate::error::LatticeError;

/// Per-frame model matrix of a [`NodeKind::Transform`].
pub type MatrixFn = Box<dyn Fn(&FrameContext<'_>) -> DMat4>;

/// Per-frame visibility of a [`NodeKind::Toggle`].
pub type PredicateFn = Box<dyn Fn(&FrameContext<'_>) -> bool>;

/// Leaf geometry that records draw calls.
pub trait Drawable {
    /// Record this leaf's draw calls for one frame.
    fn draw(
        &self,
        frame: &FrameContext<'_>,
        transforms: &DrawTransforms,
        draws: &mut DrawList,
    );

    /// Free GPU resources. Called at most once, when the owning node
    /// closes.
    fn release(&mut self);
}

/// The four node shapes.
pub enum NodeKind {
    /// Children rendered in insertion order.
    Group(Vec<SceneNode>),
    /// Composes a per-frame matrix on the right of the model matrix.
    Transform {
        /// Transformed subtree.
        child: Box<SceneNode>,
        /// Evaluated once per traversal.
        matrix: MatrixFn,
    },
    /// Renders its child only while the predicate holds.
    Toggle {
        /// Optional subtree.
        child: Box<SceneNode>,
        /// Evaluated once per traversal.
        predicate: PredicateFn,
    },
    /// Draws geometry.
    Leaf(Box<dyn Drawable>),
}

/// A node of the scene graph. Each node exclusively owns its children.
///
/// Dropping a node closes it.
pub struct SceneNode {
    name: Option<String>,
    kind: NodeKind,
    closed: bool,
}

impl SceneNode {
    fn with_kind(kind: NodeKind) -> Self {
        Self {
            name: None,
            kind,
            closed: false,
        }
    }

    /// Group of `children`.
    #[must_use]
    pub fn group(children: Vec<Self>) -> Self {
        Self::with_kind(NodeKind::Group(children))
    }

    /// `child` under a time-varying model matrix.
    #[must_use]
    pub fn transform(
        child: Self,
        matrix: impl Fn(&FrameContext<'_>) -> DMat4 + 'static,
    ) -> Self {
        Self::with_kind(NodeKind::Transform {
            child: Box::new(child),
            matrix: Box::new(matrix),
        })
    }

    /// `child`, rendered only while `predicate` holds.
    #[must_use]
    pub fn toggle(
        child: Self,
        predicate: impl Fn(&FrameContext<'_>) -> bool + 'static,
    ) -> Self {
        Self::with_kind(NodeKind::Toggle {
            child: Box::new(child),
            predicate: Box::new(predicate),
        })
    }

    /// Leaf wrapping `drawable`.
    #[must_use]
    pub fn leaf(drawable: impl Drawable + 'static) -> Self {
        Self::with_kind(NodeKind::Leaf(Box::new(drawable)))
    }

    /// Attach a lookup name.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The node's lookup name.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The node's shape.
    #[must_use]
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Append a child to a group. Returns the child back if this node is
    /// not an open group.
    ///
    /// # Errors
    ///
    /// Returns `child` unchanged when it cannot be adopted.
    pub fn push_child(&mut self, child: Self) -> Result<(), Self> {
        match &mut self.kind {
            NodeKind::Group(children) if !self.closed => {
                children.push(child);
                Ok(())
            }
            _ => Err(child),
        }
    }

    /// Direct children in traversal order.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        match &self.kind {
            NodeKind::Group(children) => children,
            NodeKind::Transform { child, .. }
            | NodeKind::Toggle { child, .. } => std::slice::from_ref(child),
            NodeKind::Leaf(_) => &[],
        }
    }

    /// Whether [`close`](Self::close) has run.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Walk the subtree and record draw calls.
    ///
    /// Transform matrices and toggle predicates are evaluated exactly once
    /// each; a false toggle contributes nothing. Closed nodes draw nothing.
    pub fn render(
        &self,
        frame: &FrameContext<'_>,
        transforms: &DrawTransforms,
        draws: &mut DrawList,
    ) {
        if self.closed {
            return;
        }
        match &self.kind {
            NodeKind::Group(children) => {
                for child in children {
                    child.render(frame, transforms, draws);
                }
            }
            NodeKind::Transform { child, matrix } => {
                let composed = transforms.then(matrix(frame));
                child.render(frame, &composed, draws);
            }
            NodeKind::Toggle { child, predicate } => {
                if predicate(frame) {
                    child.render(frame, transforms, draws);
                }
            }
            NodeKind::Leaf(drawable) => drawable.draw(frame, transforms, draws),
        }
    }

    /// Release the subtree depth-first. Idempotent.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        match &mut self.kind {
            NodeKind::Group(children) => {
                for child in children.iter_mut() {
                    child.close();
                }
                children.clear();
            }
            NodeKind::Transform { child, .. }
            | NodeKind::Toggle { child, .. } => child.close(),
            NodeKind::Leaf(drawable) => drawable.release(),
        }
        self.closed = true;
        if let Some(name) = &self.name {
            log::debug!("closed scene node {name:?}");
        }
    }

    /// Depth-first, pre-order iterator over the subtree (including this
    /// node).
    #[must_use]
    pub fn nodes(&self) -> Nodes<'_> {
        Nodes { stack: vec![self] }
    }

    /// The unique node named `name` in this subtree.
    ///
    /// # Errors
    ///
    /// Returns [`LatticeError::NameConflict`] when several nodes share the
    /// name.
    pub fn find(&self, name: &str) -> Result<Option<&Self>, LatticeError> {
        let mut matches = self.nodes().filter(|node| node.name() == Some(name));
        let Some(first) = matches.next() else {
            return Ok(None);
        };
        let extra = matches.count();
        if extra > 0 {
            let count = extra + 1;
            log::warn!("{count} scene nodes are named {name:?}");
            return Err(LatticeError::NameConflict {
                name: name.to_owned(),
                count,
            });
        }
        Ok(Some(first))
    }
}

impl Drop for SceneNode {
    fn drop(&mut self) {
        self.close();
    }
}

/// Iterator returned by [`SceneNode::nodes`].
pub struct Nodes<'a> {
    stack: Vec<&'a SceneNode>,
}

impl<'a> Iterator for Nodes<'a> {
    type Item = &'a SceneNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::{cell::Cell, rc::Rc};

    use glam::DVec3;

    use super::*;
    use crate::options::Options;
    use crate::scene::DrawCommand;

    /// Leaf that records its model matrix as uniforms and counts releases.
    pub(crate) struct RecordingLeaf {
        pub(crate) label: &'static str,
        pub(crate) releases: Rc<Cell<u32>>,
    }

    impl RecordingLeaf {
        pub(crate) fn new(label: &'static str) -> Self {
            Self {
                label,
                releases: Rc::default(),
            }
        }
    }

    impl Drawable for RecordingLeaf {
        fn draw(
            &self,
            _frame: &FrameContext<'_>,
            transforms: &DrawTransforms,
            draws: &mut DrawList,
        ) {
            draws.push(DrawCommand {
                label: self.label,
                binding: None,
                uniforms: bytemuck::cast_slice(&transforms.model.to_cols_array())
                    .to_vec(),
                vertex_count: 3,
                instance_count: 1,
            });
        }

        fn release(&mut self) {
            self.releases.set(self.releases.get() + 1);
        }
    }

    pub(crate) fn recorded_model(command: &DrawCommand) -> DMat4 {
        model_from_bytes(&command.uniforms)
    }

    fn model_from_bytes(bytes: &[u8]) -> DMat4 {
        let cols: Vec<f64> = bytemuck::pod_collect_to_vec(bytes);
        DMat4::from_cols_slice(&cols)
    }

    #[test]
    fn recorded_model_reads_unaligned_bytes() {
        let model = DMat4::from_translation(DVec3::new(1.0, -2.0, 3.5));
        let mut bytes = vec![0_u8];
        bytes.extend_from_slice(bytemuck::cast_slice(&model.to_cols_array()));
        assert_eq!(model_from_bytes(&bytes[1..]), model);
    }

    fn draw(node: &SceneNode, options: &Options, time: f64) -> DrawList {
        let frame = FrameContext { time, options };
        let mut draws = DrawList::new();
        node.render(&frame, &DrawTransforms::new(DMat4::IDENTITY, DMat4::IDENTITY), &mut draws);
        draws
    }

    #[test]
    fn toggle_gates_its_subtree() {
        let options = Options::default();
        let node = SceneNode::toggle(SceneNode::leaf(RecordingLeaf::new("a")), |f| {
            f.time > 1.0
        });
        assert!(draw(&node, &options, 0.0).is_empty());
        assert_eq!(draw(&node, &options, 2.0).len(), 1);
    }

    #[test]
    fn toggle_reads_options_from_the_frame() {
        let mut options = Options::default();
        let node = SceneNode::toggle(SceneNode::leaf(RecordingLeaf::new("floor")), |f| {
            f.options.display.floor_enabled
        });
        assert_eq!(draw(&node, &options, 0.0).len(), 1);
        options.display.floor_enabled = false;
        assert!(draw(&node, &options, 0.0).is_empty());
    }

    #[test]
    fn transforms_compose_on_the_right() {
        let options = Options::default();
        let a = DMat4::from_translation(DVec3::X);
        let b = DMat4::from_rotation_z(0.5);
        let node = SceneNode::transform(
            SceneNode::transform(SceneNode::leaf(RecordingLeaf::new("leaf")), move |_| b),
            move |_| a,
        );
        let draws = draw(&node, &options, 0.0);
        assert!(recorded_model(&draws.commands()[0]).abs_diff_eq(a * b, 1e-12));
    }

    #[test]
    fn functions_run_once_per_traversal() {
        let options = Options::default();
        let calls = Rc::new(Cell::new(0));
        let (m, p) = (Rc::clone(&calls), Rc::clone(&calls));
        let node = SceneNode::transform(
            SceneNode::toggle(
                SceneNode::group(vec![
                    SceneNode::leaf(RecordingLeaf::new("a")),
                    SceneNode::leaf(RecordingLeaf::new("b")),
                ]),
                move |_| {
                    p.set(p.get() + 1);
                    true
                },
            ),
            move |f| {
                m.set(m.get() + 1);
                DMat4::from_rotation_x(f.time)
            },
        );
        let _ = draw(&node, &options, 1.0);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn groups_render_in_insertion_order() {
        let options = Options::default();
        let mut root = SceneNode::group(vec![SceneNode::leaf(RecordingLeaf::new("first"))]);
        root.push_child(SceneNode::leaf(RecordingLeaf::new("second"))).ok().unwrap();
        let labels: Vec<_> = draw(&root, &options, 0.0).iter().map(|c| c.label).collect();
        assert_eq!(labels, ["first", "second"]);
    }

    #[test]
    fn only_open_groups_adopt_children() {
        let mut leaf = SceneNode::leaf(RecordingLeaf::new("leaf"));
        assert!(leaf.push_child(SceneNode::group(vec![])).is_err());
        let mut group = SceneNode::group(vec![]);
        group.close();
        assert!(group.push_child(SceneNode::group(vec![])).is_err());
    }

    #[test]
    fn close_is_depth_first_and_idempotent() {
        let options = Options::default();
        let leaf = RecordingLeaf::new("leaf");
        let releases = Rc::clone(&leaf.releases);
        let mut root = SceneNode::group(vec![SceneNode::toggle(
            SceneNode::transform(SceneNode::leaf(leaf), |_| DMat4::IDENTITY),
            |_| true,
        )]);

        root.close();
        root.close();
        assert_eq!(releases.get(), 1);
        assert!(root.is_closed());
        assert!(root.children().is_empty());
        assert!(draw(&root, &options, 0.0).is_empty());
    }

    #[test]
    fn dropping_a_tree_releases_leaves() {
        let leaf = RecordingLeaf::new("leaf");
        let releases = Rc::clone(&leaf.releases);
        drop(SceneNode::group(vec![SceneNode::leaf(leaf)]));
        assert_eq!(releases.get(), 1);
    }

    #[test]
    fn find_reports_none_one_or_conflict() {
        let root = SceneNode::group(vec![
            SceneNode::leaf(RecordingLeaf::new("a")).named("atom"),
            SceneNode::toggle(
                SceneNode::leaf(RecordingLeaf::new("b")).named("dup"),
                |_| false,
            )
            .named("gate"),
            SceneNode::leaf(RecordingLeaf::new("c")).named("dup"),
        ]);

        assert!(root.find("missing").unwrap().is_none());
        assert_eq!(root.find("atom").unwrap().unwrap().name(), Some("atom"));
        // Lookup sees through toggles regardless of their predicate.
        assert!(root.find("gate").unwrap().is_some());
        match root.find("dup") {
            Err(LatticeError::NameConflict { name, count }) => {
                assert_eq!(name, "dup");
                assert_eq!(count, 2);
            }
            other => panic!("expected conflict, got {:?}", other.map(|n| n.map(SceneNode::name))),
        }
    }

    #[test]
    fn nodes_are_visited_pre_order() {
        let root = SceneNode::group(vec![
            SceneNode::transform(SceneNode::leaf(RecordingLeaf::new("x")).named("t-leaf"), |_| {
                DMat4::IDENTITY
            })
            .named("t"),
            SceneNode::leaf(RecordingLeaf::new("y")).named("last"),
        ])
        .named("root");
        let names: Vec<_> = root.nodes().filter_map(SceneNode::name).collect();
        assert_eq!(names, ["root", "t", "t-leaf", "last"]);
    }
}
