use egui::Rect;

use crate::sticker::Sticker;
use crate::stroke::Stroke;

/// One recorded drawing action. Log order is both z-order and chronological order.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// A freehand line
    Stroke(Stroke),
    /// A stamped, rotated glyph
    Sticker(Sticker),
}

impl Command {
    /// Short label used by the history listing in the tools panel
    pub fn label(&self) -> &'static str {
        match self {
            Command::Stroke(_) => "Stroke",
            Command::Sticker(_) => "Sticker",
        }
    }

    pub fn as_stroke(&self) -> Option<&Stroke> {
        match self {
            Command::Stroke(stroke) => Some(stroke),
            Command::Sticker(_) => None,
        }
    }

    pub fn as_sticker(&self) -> Option<&Sticker> {
        match self {
            Command::Sticker(sticker) => Some(sticker),
            Command::Stroke(_) => None,
        }
    }

    /// Rough area touched by the command, used for logging
    pub fn bounds(&self) -> Rect {
        match self {
            Command::Stroke(stroke) => stroke.bounds(),
            Command::Sticker(sticker) => {
                Rect::from_center_size(sticker.position(), egui::Vec2::splat(sticker.font_px()))
            }
        }
    }
}

impl From<Stroke> for Command {
    fn from(stroke: Stroke) -> Self {
        Command::Stroke(stroke)
    }
}

impl From<Sticker> for Command {
    fn from(sticker: Sticker) -> Self {
        Command::Sticker(sticker)
    }
}
