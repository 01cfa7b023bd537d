use egui::emath::Rot2;
use egui::epaint::TextShape;
use egui::{Color32, FontId, Painter, Pos2, Rect, Shape};

use super::{Surface, TransformStack};
use crate::geometry::{rotation, scale_factor, transform_pos, to_vec, Affine};

/// Live canvas surface drawing through an egui painter.
///
/// Local coordinates are canvas pixels; the base transform moves them to the
/// canvas rect on screen.
pub struct PainterSurface<'a> {
    painter: &'a Painter,
    rect: Rect,
    background: Color32,
    transforms: TransformStack,
}

impl<'a> PainterSurface<'a> {
    pub fn new(painter: &'a Painter, rect: Rect, background: Color32) -> Self {
        Self {
            painter,
            rect,
            background,
            transforms: TransformStack::new(Affine::translate(to_vec(rect.min.to_vec2()))),
        }
    }
}

impl Surface for PainterSurface<'_> {
    fn clear(&mut self) {
        self.painter.rect_filled(self.rect, 0.0, self.background);
    }

    fn transforms(&self) -> &TransformStack {
        &self.transforms
    }

    fn transforms_mut(&mut self) -> &mut TransformStack {
        &mut self.transforms
    }

    fn stroke_polyline(&mut self, points: &[Pos2], width: f32, color: Color32) {
        if points.len() < 2 {
            return;
        }
        let transform = self.transforms.current();
        let screen: Vec<Pos2> = points.iter().map(|p| transform_pos(transform, *p)).collect();
        let width = width * scale_factor(transform);
        self.painter.add(Shape::line(screen, egui::Stroke::new(width, color)));
    }

    fn fill_glyph(&mut self, text: &str, font: &FontId, color: Color32) {
        let transform = self.transforms.current();
        let font = FontId::new(font.size * scale_factor(transform), font.family.clone());
        let galley = self
            .painter
            .layout_no_wrap(text.to_owned(), font, color);
        let angle = rotation(transform);

        // TextShape rotates about its top-left corner, so move that corner so
        // the galley's center lands on the local origin.
        let half = galley.size() / 2.0;
        let top_left = transform_pos(transform, Pos2::ZERO) + Rot2::from_angle(angle) * -half;
        self.painter
            .add(TextShape::new(top_left, galley, color).with_angle(angle));
    }
}
