use egui::Vec2;

use crate::config::MarkerPreset;

/// A pen preset. Its thickness is captured by each new stroke.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerTool {
    name: String,
    thickness: f32,
    cursor_offset: Vec2,
}

impl MarkerTool {
    pub fn new(name: impl Into<String>, thickness: f32, cursor_offset: Vec2) -> Self {
        Self {
            name: name.into(),
            thickness,
            cursor_offset,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn thickness(&self) -> f32 {
        self.thickness
    }

    /// Where the cursor indicator sits relative to the pointer
    pub fn cursor_offset(&self) -> Vec2 {
        self.cursor_offset
    }
}

impl From<&MarkerPreset> for MarkerTool {
    fn from(preset: &MarkerPreset) -> Self {
        let [x, y] = preset.cursor_offset;
        Self::new(preset.name.clone(), preset.thickness, Vec2::new(x, y))
    }
}
