use std::rc::Rc;

use egui::{Color32, FontId, Pos2};
use log::{debug, info};

use crate::command::{CommandHistory, CommandRef};
use crate::config::SketchConfig;
use crate::event::{EventBus, EventHandler, SketchEvent};
use crate::renderer::{self, CursorPreview};
use crate::sticker::font_id;
use crate::surface::Surface;
use crate::tools::{ActiveTool, ToolState};

/// Everything one drawing session mutates: the command history, tool
/// selection and the last known pointer position.
///
/// Pointer handlers translate input into history operations. Every change is
/// announced on the session's event bus before the handler returns.
#[derive(Debug)]
pub struct Session {
    history: CommandHistory,
    tools: ToolState,
    event_bus: Rc<EventBus>,
    /// Last pointer position over the canvas, `None` while outside
    cursor: Option<Pos2>,
    sticker_font: String,
    preview_font: FontId,
}

impl Session {
    pub fn new(config: &SketchConfig) -> Self {
        Self::with_tools(config, ToolState::from_config(config))
    }

    pub fn with_tools(config: &SketchConfig, tools: ToolState) -> Self {
        let event_bus = Rc::new(EventBus::new());
        Self {
            history: CommandHistory::with_event_bus(event_bus.clone()),
            tools,
            event_bus,
            cursor: None,
            sticker_font: config.sticker_font.clone(),
            preview_font: font_id(&config.preview_font),
        }
    }

    /// Register a handler for drawing and tool events
    pub fn subscribe(&self, handler: impl EventHandler + 'static) {
        self.event_bus.subscribe(handler);
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    pub fn tools(&self) -> &ToolState {
        &self.tools
    }

    pub fn cursor(&self) -> Option<Pos2> {
        self.cursor
    }

    pub fn is_drawing(&self) -> bool {
        self.history.is_drawing()
    }

    /// Press: start a stroke, or stamp a sticker in placement mode
    pub fn pointer_down(&mut self, pos: Pos2) -> CommandRef {
        self.cursor = Some(pos);
        match self.tools.active_tool() {
            ActiveTool::Sticker(sticker) => self.history.begin_sticker(
                pos,
                sticker.glyph(),
                &self.sticker_font,
                self.tools.rotation_degrees() as f32,
            ),
            ActiveTool::Marker(marker) => {
                self.history
                    .begin_stroke(pos, marker.thickness(), self.tools.color())
            }
        }
    }

    /// Move: extend the open stroke, otherwise only the preview moves
    pub fn pointer_move(&mut self, pos: Pos2) {
        self.cursor = Some(pos);
        if !self.history.extend_open_stroke(pos) {
            self.event_bus.emit(SketchEvent::ToolMoved);
        }
    }

    /// Release: freeze whatever is open
    pub fn pointer_up(&mut self) {
        self.history.close_open_command();
    }

    pub fn pointer_enter(&mut self, pos: Pos2) {
        self.cursor = Some(pos);
        self.event_bus.emit(SketchEvent::ToolMoved);
    }

    /// The pointer left the canvas; the preview disappears. A stroke in
    /// progress stays open until the button is released.
    pub fn pointer_leave(&mut self) {
        self.cursor = None;
        self.event_bus.emit(SketchEvent::ToolMoved);
    }

    pub fn undo(&mut self) -> bool {
        self.history.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.history.redo()
    }

    pub fn clear(&mut self) {
        info!("Clearing canvas");
        self.history.clear();
    }

    pub fn select_marker(&mut self, index: usize) {
        if self.tools.select_marker(index) {
            self.event_bus.emit(SketchEvent::ToolChanged);
        }
    }

    pub fn select_sticker(&mut self, index: usize) {
        if self.tools.select_sticker(index) {
            self.event_bus.emit(SketchEvent::ToolChanged);
        }
    }

    /// Add a user-typed sticker. Blank or cancelled input creates nothing.
    pub fn add_custom_sticker(&mut self, text: Option<&str>) -> Option<usize> {
        let Some(text) = text else {
            debug!("Custom sticker prompt cancelled");
            return None;
        };
        let index = self.tools.add_custom_sticker(text)?;
        self.event_bus.emit(SketchEvent::ToolChanged);
        Some(index)
    }

    pub fn set_color(&mut self, color: Color32) {
        if self.tools.color() != color {
            self.tools.set_color(color);
            self.event_bus.emit(SketchEvent::ToolChanged);
        }
    }

    pub fn set_color_hex(&mut self, hex: &str) -> bool {
        let changed = self.tools.set_color_hex(hex);
        if changed {
            self.event_bus.emit(SketchEvent::ToolChanged);
        }
        changed
    }

    pub fn set_rotation(&mut self, degrees: i32) {
        if self.tools.rotation_degrees() != degrees {
            self.tools.set_rotation(degrees);
            self.event_bus.emit(SketchEvent::ToolChanged);
        }
    }

    /// Indicator to draw at the pointer, if the pointer is over the canvas
    /// and no stroke is being dragged
    pub fn preview(&self) -> Option<CursorPreview> {
        let cursor = self.cursor?;
        if self.history.is_drawing() {
            return None;
        }
        Some(match self.tools.active_tool() {
            ActiveTool::Marker(marker) => CursorPreview::Marker {
                position: cursor + marker.cursor_offset(),
                color: self.tools.color(),
                font: self.preview_font.clone(),
            },
            ActiveTool::Sticker(sticker) => CursorPreview::Sticker {
                position: cursor,
                glyph: sticker.glyph().to_owned(),
                font: font_id(&self.sticker_font),
                rotation_degrees: self.tools.rotation_degrees() as f32,
            },
        })
    }

    /// Repaint `surface` from the command log plus the cursor preview
    pub fn render(&self, surface: &mut impl Surface) {
        let preview = self.preview();
        renderer::render(surface, self.history.commands(), preview.as_ref());
    }
}
