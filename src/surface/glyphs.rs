use std::collections::BTreeMap;

use ab_glyph::{point, Font as _, FontArc, GlyphId, PxScale, ScaleFont as _};
use egui::{FontDefinitions, FontFamily, Pos2};

use crate::error::{SketchError, SketchResult};

/// Fonts used to rasterize glyphs off screen. Loaded from the fonts egui
/// bundles, in egui's fallback order, so exported stickers match the canvas.
#[derive(Clone)]
pub struct GlyphSet {
    fonts: Vec<FontArc>,
    /// Fallback chain per family, as indices into `fonts`
    families: BTreeMap<FontFamily, Vec<usize>>,
}

impl std::fmt::Debug for GlyphSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlyphSet")
            .field("fonts", &self.fonts.len())
            .finish()
    }
}

/// Anti-aliased coverage of a laid out string, in the string's local pixel grid
#[derive(Debug, Clone)]
pub struct GlyphMask {
    /// Local position of the mask's top-left pixel corner
    pub origin: Pos2,
    pub width: usize,
    pub height: usize,
    /// Row-major coverage in 0..=1
    pub coverage: Vec<f32>,
}

impl GlyphMask {
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Coverage at a local position, zero outside the mask
    pub fn sample(&self, local: Pos2) -> f32 {
        let x = (local.x - self.origin.x).floor();
        let y = (local.y - self.origin.y).floor();
        if x < 0.0 || y < 0.0 {
            return 0.0;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return 0.0;
        }
        self.coverage[y * self.width + x]
    }
}

impl GlyphSet {
    /// Parse egui's default font set
    pub fn load_default() -> SketchResult<Self> {
        let definitions = FontDefinitions::default();
        let mut loaded: BTreeMap<String, Option<usize>> = BTreeMap::new();
        let mut fonts = Vec::new();
        let mut families = BTreeMap::new();

        for (family, names) in &definitions.families {
            let mut chain = Vec::new();
            for name in names {
                let index = *loaded.entry(name.clone()).or_insert_with(|| {
                    let data = definitions.font_data.get(name)?;
                    match FontArc::try_from_vec(data.font.to_vec()) {
                        Ok(font) => {
                            fonts.push(font);
                            Some(fonts.len() - 1)
                        }
                        Err(err) => {
                            log::warn!("Skipping bundled font {name}: {err}");
                            None
                        }
                    }
                });
                chain.extend(index);
            }
            families.insert(family.clone(), chain);
        }

        if fonts.is_empty() {
            return Err(SketchError::FontUnavailable);
        }
        log::debug!("Loaded {} glyph fonts for {} families", fonts.len(), families.len());
        Ok(Self { fonts, families })
    }

    pub fn font_count(&self) -> usize {
        self.fonts.len()
    }

    /// Fallback order for `family`, proportional when the family is unknown
    fn chain(&self, family: &FontFamily) -> &[usize] {
        self.families
            .get(family)
            .or_else(|| self.families.get(&FontFamily::Proportional))
            .map(Vec::as_slice)
            .filter(|chain| !chain.is_empty())
            .unwrap_or(&[0])
    }

    /// First font in the family's chain with a glyph for `ch`. Falls back to
    /// the chain's primary font, which draws its missing-glyph box.
    fn resolve(&self, ch: char, family: &FontFamily) -> (usize, GlyphId) {
        let chain = self.chain(family);
        chain
            .iter()
            .map(|&index| (index, self.fonts[index].glyph_id(ch)))
            .find(|(_, id)| id.0 != 0)
            .unwrap_or((chain[0], GlyphId(0)))
    }

    /// Whether any bundled font draws `ch`
    pub fn has_glyph(&self, ch: char) -> bool {
        self.fonts.iter().any(|font| font.glyph_id(ch).0 != 0)
    }

    /// Characters of `text` no bundled font can draw, whitespace excluded
    pub fn missing_glyphs(&self, text: &str) -> Vec<char> {
        text.chars()
            .filter(|ch| !ch.is_whitespace() && !self.has_glyph(*ch))
            .collect()
    }

    fn scale_for(font: &FontArc, px_size: f32) -> PxScale {
        font.pt_to_px_scale(px_size)
            .unwrap_or_else(|| PxScale::from(px_size))
    }

    /// Lay out `text` on one line centered on the local origin and rasterize it.
    pub fn rasterize(&self, text: &str, px_size: f32, family: &FontFamily) -> GlyphMask {
        let primary = &self.fonts[self.chain(family)[0]];
        let primary = primary.as_scaled(Self::scale_for(primary, px_size));
        let baseline = (primary.ascent() + primary.descent()) / 2.0;

        let mut placed = Vec::new();
        let mut caret = 0.0f32;
        let mut previous: Option<(usize, GlyphId)> = None;
        for ch in text.chars() {
            let (index, id) = self.resolve(ch, family);
            let font = &self.fonts[index];
            let scaled = font.as_scaled(Self::scale_for(font, px_size));
            if let Some((prev_index, prev_id)) = previous {
                if prev_index == index {
                    caret += scaled.kern(prev_id, id);
                }
            }
            placed.push((index, id, caret, Self::scale_for(font, px_size)));
            caret += scaled.h_advance(id);
            previous = Some((index, id));
        }

        let shift = -caret / 2.0;
        let outlines: Vec<_> = placed
            .into_iter()
            .filter_map(|(index, id, x, scale)| {
                let glyph = id.with_scale_and_position(scale, point(x + shift, baseline));
                self.fonts[index].outline_glyph(glyph)
            })
            .collect();

        let Some(bounds) = outlines
            .iter()
            .map(|outlined| outlined.px_bounds())
            .reduce(|acc, b| ab_glyph::Rect {
                min: point(acc.min.x.min(b.min.x), acc.min.y.min(b.min.y)),
                max: point(acc.max.x.max(b.max.x), acc.max.y.max(b.max.y)),
            })
        else {
            return GlyphMask {
                origin: Pos2::ZERO,
                width: 0,
                height: 0,
                coverage: Vec::new(),
            };
        };

        let width = (bounds.max.x - bounds.min.x).ceil() as usize;
        let height = (bounds.max.y - bounds.min.y).ceil() as usize;
        let mut coverage = vec![0.0f32; width * height];
        for outlined in &outlines {
            let glyph_bounds = outlined.px_bounds();
            let dx = (glyph_bounds.min.x - bounds.min.x) as usize;
            let dy = (glyph_bounds.min.y - bounds.min.y) as usize;
            outlined.draw(|x, y, c| {
                let (x, y) = (x as usize + dx, y as usize + dy);
                if x < width && y < height {
                    let cell = &mut coverage[y * width + x];
                    *cell = cell.max(c.clamp(0.0, 1.0));
                }
            });
        }

        GlyphMask {
            origin: Pos2::new(bounds.min.x, bounds.min.y),
            width,
            height,
            coverage,
        }
    }
}
