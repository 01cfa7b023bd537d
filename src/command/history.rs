use std::rc::Rc;

use egui::{Color32, Pos2};
use log::debug;

use super::Command;
use crate::event::{EventBus, SketchEvent};
use crate::sticker::Sticker;
use crate::stroke::Stroke;

/// Position of a command in the log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommandRef(pub usize);

/// The command log plus its redo buffer.
///
/// Undo and redo move commands between two stacks. Appending a new command
/// empties the redo stack, so there is no branching history. At most one
/// command is open at a time, and when one is, it is the last entry of the log.
pub struct CommandHistory {
    /// Committed commands, oldest first
    undo_stack: Vec<Command>,
    /// Undone commands, most recently undone last
    redo_stack: Vec<Command>,
    /// Whether the tail of `undo_stack` is a stroke still being dragged
    open: bool,
    /// Redraw notifications, possibly shared with the owning session
    event_bus: Rc<EventBus>,
}

impl std::fmt::Debug for CommandHistory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandHistory")
            .field("commands", &self.undo_stack.len())
            .field("redo", &self.redo_stack.len())
            .field("open", &self.open)
            .finish()
    }
}

impl Default for CommandHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandHistory {
    /// Creates a new empty command history
    pub fn new() -> Self {
        Self::with_event_bus(Rc::new(EventBus::new()))
    }

    /// Creates an empty history that signals on an existing bus
    pub fn with_event_bus(event_bus: Rc<EventBus>) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            open: false,
            event_bus,
        }
    }

    /// Bus that receives a `DrawingChanged` event for every mutation
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Open a new stroke at `point`. Any stroke still open is closed first.
    pub fn begin_stroke(&mut self, point: Pos2, thickness: f32, color: Color32) -> CommandRef {
        self.freeze_open();
        let id = self.append(Command::Stroke(Stroke::new(point, thickness, color)));
        self.open = true;
        debug!("Began stroke {} at {:?} ({} px, {:?})", id.0, point, thickness, color);
        self.notify();
        id
    }

    /// Place a sticker. Stickers are committed immediately and never open.
    pub fn begin_sticker(
        &mut self,
        point: Pos2,
        glyph: &str,
        font_spec: &str,
        rotation_degrees: f32,
    ) -> CommandRef {
        self.freeze_open();
        let sticker = Sticker::new(point, glyph, font_spec, rotation_degrees);
        let id = self.append(Command::Sticker(sticker));
        debug!("Placed sticker {} {:?} at {:?} rotated {}°", id.0, glyph, point, rotation_degrees);
        self.notify();
        id
    }

    /// Append a point to the open stroke. Returns false when no stroke is open.
    pub fn extend_open_stroke(&mut self, point: Pos2) -> bool {
        let Some(stroke) = self.open_stroke_mut() else {
            return false;
        };
        stroke.push_point(point);
        self.notify();
        true
    }

    /// Freeze the open command, if any. Always signals a redraw.
    pub fn close_open_command(&mut self) {
        self.freeze_open();
        self.notify();
    }

    /// Move the most recent command onto the redo stack
    pub fn undo(&mut self) -> bool {
        self.open = false;
        let Some(command) = self.undo_stack.pop() else {
            return false;
        };
        debug!("Undo {} ({} left)", command.label(), self.undo_stack.len());
        self.redo_stack.push(command);
        self.notify();
        true
    }

    /// Move the most recently undone command back onto the log
    pub fn redo(&mut self) -> bool {
        let Some(command) = self.redo_stack.pop() else {
            return false;
        };
        self.freeze_open();
        debug!("Redo {} ({} in redo buffer)", command.label(), self.redo_stack.len());
        self.undo_stack.push(command);
        self.notify();
        true
    }

    /// Empty the log. The redo buffer is kept, so redo can bring back
    /// commands that were undone before the clear.
    pub fn clear(&mut self) {
        self.open = false;
        debug!(
            "Cleared {} commands, {} kept for redo",
            self.undo_stack.len(),
            self.redo_stack.len()
        );
        self.undo_stack.clear();
        self.notify();
    }

    /// Committed commands in draw order
    pub fn commands(&self) -> &[Command] {
        &self.undo_stack
    }

    /// Undone commands, the next one to redo last
    pub fn redo_stack(&self) -> &[Command] {
        &self.redo_stack
    }

    /// The command being dragged, if any
    pub fn open_command(&self) -> Option<&Command> {
        if self.open {
            self.undo_stack.last()
        } else {
            None
        }
    }

    /// True while a stroke is open
    pub fn is_drawing(&self) -> bool {
        self.open
    }

    /// Returns true if there are commands that can be undone
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Returns true if there are commands that can be redone
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.undo_stack.is_empty()
    }

    fn append(&mut self, command: Command) -> CommandRef {
        if !self.redo_stack.is_empty() {
            debug!("Discarding {} redoable commands", self.redo_stack.len());
            self.redo_stack.clear();
        }
        self.undo_stack.push(command);
        CommandRef(self.undo_stack.len() - 1)
    }

    fn open_stroke_mut(&mut self) -> Option<&mut Stroke> {
        if !self.open {
            return None;
        }
        match self.undo_stack.last_mut() {
            Some(Command::Stroke(stroke)) => Some(stroke),
            _ => None,
        }
    }

    fn freeze_open(&mut self) {
        if std::mem::take(&mut self.open) {
            if let Some(command) = self.undo_stack.last() {
                debug!("Closed {} covering {:?}", command.label(), command.bounds());
            }
        }
    }

    fn notify(&self) {
        self.event_bus.emit(SketchEvent::DrawingChanged);
    }
}
