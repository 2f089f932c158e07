/// Platform-agnostic input events.
///
/// These are fed into an [`InputProcessor`](super::InputProcessor) which
/// converts them into [`ViewerCommand`](crate::engine::ViewerCommand)
/// values.
///
/// Key strings use the `winit::keyboard::KeyCode` debug format: `"Space"`,
/// `"KeyC"`, `"BracketRight"`, `"ArrowUp"`, etc.
///
/// # Example
///
/// ```ignore
/// let cmd = input_processor.handle_event(InputEvent::KeyPressed {
///     key: "Space",
/// });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent<'a> {
    /// A key went down.
    KeyPressed {
        /// Physical key string.
        key: &'a str,
    },
    /// Modifier key state changed.
    ModifiersChanged {
        /// Whether the shift key is held.
        shift: bool,
    },
}
