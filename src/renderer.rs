use egui::{Color32, FontId, Pos2};

use crate::command::Command;
use crate::sticker::{degrees_to_radians, Sticker};
use crate::stroke::Stroke;
use crate::surface::Surface;

/// Ink used for stickers and the sticker preview
pub const STICKER_COLOR: Color32 = Color32::BLACK;

/// Glyph drawn at the pointer while a marker is active
pub const MARKER_PREVIEW_GLYPH: &str = "*";

/// Indicator drawn at the pointer. Never part of the command log.
#[derive(Debug, Clone, PartialEq)]
pub enum CursorPreview {
    /// Marker indicator, already shifted by the tool's cursor offset
    Marker {
        position: Pos2,
        color: Color32,
        font: FontId,
    },
    /// The sticker that a click would place, at the current slider angle
    Sticker {
        position: Pos2,
        glyph: String,
        font: FontId,
        rotation_degrees: f32,
    },
}

/// Clear `surface` and replay every command in order, then draw the preview.
///
/// The result depends only on the arguments, so calling it again with the
/// same log and preview repaints the same image.
pub fn render(surface: &mut impl Surface, commands: &[Command], preview: Option<&CursorPreview>) {
    surface.clear();
    for command in commands {
        match command {
            Command::Stroke(stroke) => draw_stroke(surface, stroke),
            Command::Sticker(sticker) => draw_sticker(surface, sticker),
        }
    }
    if let Some(preview) = preview {
        draw_preview(surface, preview);
    }
}

fn draw_stroke(surface: &mut impl Surface, stroke: &Stroke) {
    // A single point has no segment to trace.
    if !stroke.has_segments() {
        return;
    }
    surface.stroke_polyline(stroke.points(), stroke.thickness(), stroke.color());
}

fn draw_sticker(surface: &mut impl Surface, sticker: &Sticker) {
    draw_rotated_glyph(
        surface,
        sticker.position(),
        sticker.glyph(),
        &sticker.font_id(),
        sticker.rotation_radians(),
        STICKER_COLOR,
    );
}

fn draw_preview(surface: &mut impl Surface, preview: &CursorPreview) {
    match preview {
        CursorPreview::Marker {
            position,
            color,
            font,
        } => draw_rotated_glyph(surface, *position, MARKER_PREVIEW_GLYPH, font, 0.0, *color),
        CursorPreview::Sticker {
            position,
            glyph,
            font,
            rotation_degrees,
        } => draw_rotated_glyph(
            surface,
            *position,
            glyph,
            font,
            degrees_to_radians(*rotation_degrees),
            STICKER_COLOR,
        ),
    }
}

fn draw_rotated_glyph(
    surface: &mut impl Surface,
    position: Pos2,
    glyph: &str,
    font: &FontId,
    radians: f32,
    color: Color32,
) {
    surface.save();
    surface.translate(position.to_vec2());
    surface.rotate(radians);
    surface.fill_glyph(glyph, font, color);
    surface.restore();
}
