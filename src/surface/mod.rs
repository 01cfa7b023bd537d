//! Drawing surfaces the renderer replays commands onto.
//!
//! A [`Surface`] behaves like a 2D canvas context: it owns a current
//! transform that `save`/`restore` push and pop, and all geometry passed to
//! it is in local coordinates.

mod glyphs;
mod painter;
mod raster;

pub use glyphs::GlyphSet;
pub use painter::PainterSurface;
pub use raster::{MAX_SURFACE_SIDE, RasterSurface};

use egui::{Color32, FontId, Pos2, Vec2};

use crate::geometry::{to_vec, Affine};

pub trait Surface {
    /// Erase everything to the background color
    fn clear(&mut self);

    /// Stack of saved transforms
    fn transforms(&self) -> &TransformStack;

    fn transforms_mut(&mut self) -> &mut TransformStack;

    /// Trace a connected polyline. Fewer than two points draw nothing.
    fn stroke_polyline(&mut self, points: &[Pos2], width: f32, color: Color32);

    /// Draw `text` centered on the local origin. `font.size` is in local units.
    fn fill_glyph(&mut self, text: &str, font: &FontId, color: Color32);

    fn transform(&self) -> Affine {
        self.transforms().current()
    }

    fn save(&mut self) {
        self.transforms_mut().save();
    }

    fn restore(&mut self) {
        self.transforms_mut().restore();
    }

    // The operations below compose on the right, so each one acts in the
    // local space left by the previous ones.

    fn translate(&mut self, offset: Vec2) {
        self.transforms_mut().apply(|t| t * Affine::translate(to_vec(offset)));
    }

    fn rotate(&mut self, radians: f32) {
        self.transforms_mut().apply(|t| t * Affine::rotate(radians as f64));
    }

    fn scale(&mut self, factor: f32) {
        self.transforms_mut().apply(|t| t * Affine::scale(factor as f64));
    }
}

/// Current transform plus the ones saved beneath it
#[derive(Debug, Clone)]
pub struct TransformStack {
    current: Affine,
    saved: Vec<Affine>,
}

impl Default for TransformStack {
    fn default() -> Self {
        Self::new(Affine::IDENTITY)
    }
}

impl TransformStack {
    pub fn new(base: Affine) -> Self {
        Self {
            current: base,
            saved: Vec::new(),
        }
    }

    pub fn current(&self) -> Affine {
        self.current
    }

    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    pub fn save(&mut self) {
        self.saved.push(self.current);
    }

    /// Pop the last saved transform. An unbalanced restore is ignored.
    pub fn restore(&mut self) {
        if let Some(previous) = self.saved.pop() {
            self.current = previous;
        }
    }

    pub fn apply(&mut self, op: impl FnOnce(Affine) -> Affine) {
        self.current = op(self.current);
    }
}
