/// Notifications emitted by the session and command history. Every event is
/// handled synchronously before the emitting call returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SketchEvent {
    /// The command log changed; the canvas must be redrawn
    DrawingChanged,
    /// The pointer moved, entered or left the canvas; only the cursor preview changed
    ToolMoved,
    /// Marker, sticker, color or rotation selection changed
    ToolChanged,
}
