use egui::{Context, Key, KeyboardShortcut, Modifiers, Pos2, Rect};

use crate::session::Session;

/// Canvas input, in canvas-local coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Primary button pressed over the canvas
    PointerDown { pos: Pos2 },
    /// Pointer moved over the canvas
    PointerMove { pos: Pos2 },
    /// Primary button released, wherever the pointer is
    PointerUp,
    /// Pointer moved onto the canvas
    PointerEnter { pos: Pos2 },
    /// Pointer left the canvas or the window
    PointerLeave,
    Undo,
    Redo,
}

const UNDO: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::Z);
const REDO: KeyboardShortcut = KeyboardShortcut::new(
    Modifiers {
        shift: true,
        ..Modifiers::COMMAND
    },
    Key::Z,
);
const REDO_ALT: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::Y);

/// Handles converting raw egui input into canvas InputEvents
#[derive(Debug)]
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    canvas_rect: Rect,
}

impl InputHandler {
    pub fn new(canvas_rect: Rect) -> Self {
        Self {
            last_pointer_pos: None,
            canvas_rect,
        }
    }

    /// Update the canvas rectangle (e.g. if window is resized)
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = rect;
    }

    fn to_canvas(&self, pos: Pos2) -> Pos2 {
        (pos - self.canvas_rect.min).to_pos2()
    }

    /// Process raw egui input and generate InputEvents
    pub fn process_input(&mut self, ctx: &Context) -> Vec<InputEvent> {
        let mut events = Vec::new();

        ctx.input(|input| {
            let hover = input
                .pointer
                .hover_pos()
                .filter(|pos| self.canvas_rect.contains(*pos));

            match (self.last_pointer_pos, hover) {
                (None, Some(pos)) => {
                    events.push(InputEvent::PointerEnter { pos: self.to_canvas(pos) });
                    events.push(InputEvent::PointerMove { pos: self.to_canvas(pos) });
                }
                (Some(last), Some(pos)) if last != pos => {
                    events.push(InputEvent::PointerMove { pos: self.to_canvas(pos) });
                }
                (Some(_), None) => events.push(InputEvent::PointerLeave),
                _ => {}
            }
            self.last_pointer_pos = hover;

            if input.pointer.primary_pressed() {
                if let Some(pos) = hover {
                    events.push(InputEvent::PointerDown { pos: self.to_canvas(pos) });
                }
            }
            if input.pointer.primary_released() {
                events.push(InputEvent::PointerUp);
            }
        });

        // Check the shifted shortcut first so Ctrl+Shift+Z is not taken as undo.
        ctx.input_mut(|input| {
            if input.consume_shortcut(&REDO) || input.consume_shortcut(&REDO_ALT) {
                events.push(InputEvent::Redo);
            } else if input.consume_shortcut(&UNDO) {
                events.push(InputEvent::Undo);
            }
        });

        events
    }
}

/// Apply input events to the session in order
pub fn dispatch(events: &[InputEvent], session: &mut Session) {
    for event in events {
        match *event {
            InputEvent::PointerDown { pos } => {
                session.pointer_down(pos);
            }
            InputEvent::PointerMove { pos } => session.pointer_move(pos),
            InputEvent::PointerUp => session.pointer_up(),
            InputEvent::PointerEnter { pos } => session.pointer_enter(pos),
            InputEvent::PointerLeave => session.pointer_leave(),
            InputEvent::Undo => {
                session.undo();
            }
            InputEvent::Redo => {
                session.redo();
            }
        }
    }
}
