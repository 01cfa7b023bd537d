//! Marker and sticker selection.
//!
//! One marker is always active and supplies the thickness of new strokes.
//! Selecting a sticker enters placement mode, where a click stamps the
//! sticker instead of starting a stroke. Placement mode is left only by
//! selecting the active sticker a second time; picking a marker while placing
//! stickers changes the highlighted button and the next stroke's thickness,
//! but clicks keep placing stickers.

mod marker;
mod sticker;

pub use marker::MarkerTool;
pub use sticker::StickerTool;

use egui::{Color32, Vec2};
use log::{info, warn};

use crate::config::SketchConfig;
use crate::util::parse_hex_color;

/// Highest value of the rotation slider, in degrees
pub const MAX_ROTATION: i32 = 360;

const DEFAULT_THICKNESS: f32 = 2.0;

/// Which button the tools panel shows as selected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    Marker(usize),
    Sticker(usize),
}

/// The tool that decides what a pointer press does
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActiveTool<'a> {
    Marker(&'a MarkerTool),
    Sticker(&'a StickerTool),
}

#[derive(Debug, Clone)]
pub struct ToolState {
    markers: Vec<MarkerTool>,
    stickers: Vec<StickerTool>,
    active_marker: usize,
    /// Sticker being placed, if in placement mode
    placing: Option<usize>,
    highlighted: Highlight,
    color: Color32,
    rotation_degrees: i32,
}

impl ToolState {
    /// Build the tool set from the configured presets. An empty marker list
    /// gets a single default marker.
    pub fn new(mut markers: Vec<MarkerTool>, stickers: Vec<StickerTool>, color: Color32) -> Self {
        if markers.is_empty() {
            warn!("No marker presets, adding a default marker");
            markers.push(MarkerTool::new("Marker", DEFAULT_THICKNESS, Vec2::ZERO));
        }
        Self {
            markers,
            stickers,
            active_marker: 0,
            placing: None,
            highlighted: Highlight::Marker(0),
            color,
            rotation_degrees: 0,
        }
    }

    pub fn from_config(config: &SketchConfig) -> Self {
        let markers = config.markers.iter().map(MarkerTool::from).collect();
        let stickers = config.stickers.iter().map(StickerTool::new).collect();
        Self::new(markers, stickers, config.initial_color())
    }

    pub fn markers(&self) -> &[MarkerTool] {
        &self.markers
    }

    pub fn stickers(&self) -> &[StickerTool] {
        &self.stickers
    }

    pub fn active_marker(&self) -> &MarkerTool {
        &self.markers[self.active_marker]
    }

    pub fn active_marker_index(&self) -> usize {
        self.active_marker
    }

    /// The sticker being placed, if in placement mode
    pub fn placing_sticker(&self) -> Option<&StickerTool> {
        self.placing.and_then(|index| self.stickers.get(index))
    }

    pub fn is_placing_sticker(&self) -> bool {
        self.placing.is_some()
    }

    pub fn active_tool(&self) -> ActiveTool<'_> {
        match self.placing_sticker() {
            Some(sticker) => ActiveTool::Sticker(sticker),
            None => ActiveTool::Marker(self.active_marker()),
        }
    }

    pub fn highlighted(&self) -> Highlight {
        self.highlighted
    }

    /// Make a marker the source of thickness and cursor offset.
    /// Returns false for an unknown index.
    pub fn select_marker(&mut self, index: usize) -> bool {
        let Some(marker) = self.markers.get(index) else {
            warn!("No marker at index {index}");
            return false;
        };
        info!("Selected marker {} ({} px)", marker.name(), marker.thickness());
        self.active_marker = index;
        self.highlighted = Highlight::Marker(index);
        true
    }

    /// Enter placement mode for a sticker, or leave it when the sticker is
    /// already being placed. Returns false for an unknown index.
    pub fn select_sticker(&mut self, index: usize) -> bool {
        let Some(sticker) = self.stickers.get(index) else {
            warn!("No sticker at index {index}");
            return false;
        };
        if self.placing == Some(index) {
            info!("Stopped placing sticker {:?}", sticker.glyph());
            self.placing = None;
            self.highlighted = Highlight::Marker(self.active_marker);
        } else {
            info!("Placing sticker {:?}", sticker.glyph());
            self.placing = Some(index);
            self.highlighted = Highlight::Sticker(index);
        }
        true
    }

    /// Add a sticker from user text. Blank text is discarded.
    pub fn add_custom_sticker(&mut self, text: &str) -> Option<usize> {
        let glyph = text.trim();
        if glyph.is_empty() {
            warn!("Ignoring empty custom sticker");
            return None;
        }
        info!("Added custom sticker {glyph:?}");
        self.stickers.push(StickerTool::custom(glyph));
        Some(self.stickers.len() - 1)
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn set_color(&mut self, color: Color32) {
        self.color = color;
    }

    /// Set the color from a `#rrggbb` string. Returns false if it does not parse.
    pub fn set_color_hex(&mut self, hex: &str) -> bool {
        match parse_hex_color(hex) {
            Some(color) => {
                self.color = color;
                true
            }
            None => {
                warn!("Ignoring invalid color {hex:?}");
                false
            }
        }
    }

    pub fn rotation_degrees(&self) -> i32 {
        self.rotation_degrees
    }

    /// Set the sticker rotation, clamped to the slider range
    pub fn set_rotation(&mut self, degrees: i32) {
        self.rotation_degrees = degrees.clamp(0, MAX_ROTATION);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tools() -> ToolState {
        ToolState::new(
            vec![
                MarkerTool::new("Thin", 2.0, Vec2::new(1.0, 1.0)),
                MarkerTool::new("Thick", 6.0, Vec2::new(3.0, 3.0)),
            ],
            vec![StickerTool::new("🐸"), StickerTool::new("★")],
            Color32::BLACK,
        )
    }

    #[test]
    fn test_defaults_to_first_marker() {
        let tools = tools();
        assert_eq!(tools.active_marker().name(), "Thin");
        assert_eq!(tools.highlighted(), Highlight::Marker(0));
        assert!(matches!(tools.active_tool(), ActiveTool::Marker(_)));
    }

    #[test]
    fn test_empty_marker_list_gets_default() {
        let tools = ToolState::new(Vec::new(), Vec::new(), Color32::BLACK);
        assert_eq!(tools.markers().len(), 1);
        assert_eq!(tools.active_marker().thickness(), DEFAULT_THICKNESS);
    }

    #[test]
    fn test_select_marker_sets_thickness() {
        let mut tools = tools();
        assert!(tools.select_marker(1));
        assert_eq!(tools.active_marker().thickness(), 6.0);
        assert_eq!(tools.active_marker().cursor_offset(), Vec2::new(3.0, 3.0));
        assert!(!tools.select_marker(7));
        assert_eq!(tools.active_marker_index(), 1);
    }

    #[test]
    fn test_reselecting_sticker_exits_placement() {
        let mut tools = tools();
        tools.select_sticker(0);
        assert_eq!(tools.placing_sticker().map(StickerTool::glyph), Some("🐸"));
        assert_eq!(tools.highlighted(), Highlight::Sticker(0));

        tools.select_sticker(1);
        assert_eq!(tools.placing_sticker().map(StickerTool::glyph), Some("★"));

        tools.select_sticker(1);
        assert!(!tools.is_placing_sticker());
        assert_eq!(tools.highlighted(), Highlight::Marker(0));
    }

    #[test]
    fn test_marker_does_not_exit_placement() {
        let mut tools = tools();
        tools.select_sticker(0);
        tools.select_marker(1);

        assert!(tools.is_placing_sticker());
        assert_eq!(tools.highlighted(), Highlight::Marker(1));
        assert!(matches!(tools.active_tool(), ActiveTool::Sticker(_)));
    }

    #[test]
    fn test_custom_sticker() {
        let mut tools = tools();
        assert_eq!(tools.add_custom_sticker("   "), None);
        assert_eq!(tools.add_custom_sticker(""), None);
        assert_eq!(tools.add_custom_sticker(" hi "), Some(2));
        assert_eq!(tools.stickers()[2].glyph(), "hi");
        assert!(tools.stickers()[2].is_custom());
    }

    #[test]
    fn test_rotation_is_clamped() {
        let mut tools = tools();
        tools.set_rotation(400);
        assert_eq!(tools.rotation_degrees(), 360);
        tools.set_rotation(-5);
        assert_eq!(tools.rotation_degrees(), 0);
        tools.set_rotation(90);
        assert_eq!(tools.rotation_degrees(), 90);
    }

    #[test]
    fn test_color_hex() {
        let mut tools = tools();
        assert!(tools.set_color_hex("#ff0000"));
        assert_eq!(tools.color(), Color32::RED);
        assert!(!tools.set_color_hex("red"));
        assert_eq!(tools.color(), Color32::RED);
    }
}
