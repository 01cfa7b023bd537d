/// A sticker button. Clicking the canvas in placement mode stamps its glyph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StickerTool {
    glyph: String,
    custom: bool,
}

impl StickerTool {
    pub fn new(glyph: impl Into<String>) -> Self {
        Self {
            glyph: glyph.into(),
            custom: false,
        }
    }

    /// A sticker typed in by the user
    pub fn custom(glyph: impl Into<String>) -> Self {
        Self {
            glyph: glyph.into(),
            custom: true,
        }
    }

    pub fn glyph(&self) -> &str {
        &self.glyph
    }

    pub fn is_custom(&self) -> bool {
        self.custom
    }
}
