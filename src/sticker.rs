use egui::{FontFamily, FontId, Pos2};

/// Glyph size used when a font spec carries no readable pixel size
pub const DEFAULT_FONT_PX: f32 = 32.0;

/// A glyph stamped once at a position with a fixed rotation.
#[derive(Debug, Clone, PartialEq)]
pub struct Sticker {
    position: Pos2,
    glyph: String,
    font_spec: String,
    rotation_degrees: f32,
}

impl Sticker {
    pub fn new(
        position: Pos2,
        glyph: impl Into<String>,
        font_spec: impl Into<String>,
        rotation_degrees: f32,
    ) -> Self {
        Self {
            position,
            glyph: glyph.into(),
            font_spec: font_spec.into(),
            rotation_degrees,
        }
    }

    pub fn position(&self) -> Pos2 {
        self.position
    }

    pub fn glyph(&self) -> &str {
        &self.glyph
    }

    pub fn font_spec(&self) -> &str {
        &self.font_spec
    }

    pub fn rotation_degrees(&self) -> f32 {
        self.rotation_degrees
    }

    pub fn rotation_radians(&self) -> f32 {
        degrees_to_radians(self.rotation_degrees)
    }

    /// Pixel size taken from the font spec
    pub fn font_px(&self) -> f32 {
        font_px(&self.font_spec)
    }

    pub fn font_id(&self) -> FontId {
        font_id(&self.font_spec)
    }
}

pub fn degrees_to_radians(degrees: f32) -> f32 {
    degrees * std::f32::consts::PI / 180.0
}

/// Extract the pixel size from a CSS-like font spec such as `"32px monospace"`.
pub fn font_px(spec: &str) -> f32 {
    spec.split_whitespace()
        .find_map(|token| token.strip_suffix("px"))
        .and_then(|size| size.parse::<f32>().ok())
        .filter(|size| size.is_finite() && *size > 0.0)
        .unwrap_or(DEFAULT_FONT_PX)
}

/// Family named in a font spec. `monospace` selects egui's monospace fonts,
/// anything else the proportional ones.
pub fn font_family(spec: &str) -> FontFamily {
    if spec.split_whitespace().any(|token| token.eq_ignore_ascii_case("monospace")) {
        FontFamily::Monospace
    } else {
        FontFamily::Proportional
    }
}

/// Size and family of a font spec as an egui font
pub fn font_id(spec: &str) -> FontId {
    FontId::new(font_px(spec), font_family(spec))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_px_parsing() {
        assert_eq!(font_px("32px monospace"), 32.0);
        assert_eq!(font_px("bold 12.5px serif"), 12.5);
        assert_eq!(font_px("monospace"), DEFAULT_FONT_PX);
        assert_eq!(font_px("-4px monospace"), DEFAULT_FONT_PX);
        assert_eq!(font_px(""), DEFAULT_FONT_PX);
    }

    #[test]
    fn test_font_family_parsing() {
        assert_eq!(font_id("32px monospace"), FontId::monospace(32.0));
        assert_eq!(font_id("20px sans-serif"), FontId::proportional(20.0));
        assert_eq!(font_family("bold 12px Monospace"), FontFamily::Monospace);
        assert_eq!(font_family(""), FontFamily::Proportional);
    }

    #[test]
    fn test_rotation_conversion() {
        let sticker = Sticker::new(Pos2::ZERO, "*", "16px monospace", 90.0);
        assert!((sticker.rotation_radians() - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        assert!((degrees_to_radians(180.0) - std::f32::consts::PI).abs() < 1e-6);
    }
}
