/// GPU state a draw command replays with.
#[derive(Debug, Clone)]
pub struct GpuBinding {
    /// Pipeline whose group 0 is the frame renderer's uniform slot.
    pub pipeline: wgpu::RenderPipeline,
    /// Vertex buffer bound to slot 0.
    pub vertex_buffer: wgpu::Buffer,
}

/// One recorded draw call.
#[derive(Debug, Clone)]
pub struct DrawCommand {
    /// Debug label.
    pub label: &'static str,
    /// `None` when the leaf has no GPU resources (detached or released).
    pub binding: Option<GpuBinding>,
    /// Uniform block bytes for this draw.
    pub uniforms: Vec<u8>,
    /// Vertices per instance.
    pub vertex_count: u32,
    /// Instances to draw.
    pub instance_count: u32,
}

/// Draw calls recorded during one scene traversal, in issue order.
#[derive(Debug, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    /// Empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a draw call.
    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    /// Drop all recorded calls, keeping the allocation.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Recorded calls in issue order.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Iterate recorded calls in issue order.
    pub fn iter(&self) -> std::slice::Iter<'_, DrawCommand> {
        self.commands.iter()
    }

    /// Number of recorded calls.
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl<'a> IntoIterator for &'a DrawList {
    type Item = &'a DrawCommand;
    type IntoIter = std::slice::Iter<'a, DrawCommand>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
