use egui::{Color32, FontId, Pos2, Vec2};
use image::{Rgba, RgbaImage};

use super::{GlyphSet, Surface, TransformStack};
use crate::error::{SketchError, SketchResult};
use crate::geometry::{checked_inverse, distance_to_segment, scale_factor, transform_pos};

/// Largest side, in pixels, an offscreen surface may have
pub const MAX_SURFACE_SIDE: u32 = 16_384;

/// Software surface backed by an RGBA image.
///
/// Strokes are drawn with round caps and joins. All blending is plain
/// source-over on straight alpha, so the same replay always yields the same bytes.
pub struct RasterSurface {
    image: RgbaImage,
    background: Rgba<u8>,
    transforms: TransformStack,
    glyphs: GlyphSet,
}

impl std::fmt::Debug for RasterSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterSurface")
            .field("width", &self.image.width())
            .field("height", &self.image.height())
            .field("transform", &self.transforms.current())
            .finish()
    }
}

impl RasterSurface {
    /// Create a surface filled with `background`
    pub fn new(width: u32, height: u32, background: Color32, glyphs: GlyphSet) -> SketchResult<Self> {
        if width == 0 || height == 0 || width > MAX_SURFACE_SIDE || height > MAX_SURFACE_SIDE {
            return Err(SketchError::SurfaceUnavailable { width, height });
        }
        let background = Rgba(background.to_srgba_unmultiplied());
        Ok(Self {
            image: RgbaImage::from_pixel(width, height, background),
            background,
            transforms: TransformStack::default(),
            glyphs,
        })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Pixel bounds covering a device-space box, clipped to the image
    fn clip(&self, min: Pos2, max: Pos2) -> Option<(u32, u32, u32, u32)> {
        let x0 = min.x.floor().max(0.0);
        let y0 = min.y.floor().max(0.0);
        let x1 = max.x.ceil().min(self.image.width() as f32);
        let y1 = max.y.ceil().min(self.image.height() as f32);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }

    fn blend(&mut self, x: u32, y: u32, color: [u8; 4], coverage: f32) {
        let source_alpha = color[3] as f32 / 255.0 * coverage;
        if source_alpha <= 0.0 {
            return;
        }
        let pixel = self.image.get_pixel_mut(x, y);
        let dest_alpha = pixel[3] as f32 / 255.0;
        let out_alpha = source_alpha + dest_alpha * (1.0 - source_alpha);
        for channel in 0..3 {
            let source = color[channel] as f32 * source_alpha;
            let dest = pixel[channel] as f32 * dest_alpha * (1.0 - source_alpha);
            pixel[channel] = ((source + dest) / out_alpha).round().clamp(0.0, 255.0) as u8;
        }
        pixel[3] = (out_alpha * 255.0).round().clamp(0.0, 255.0) as u8;
    }
}

impl Surface for RasterSurface {
    fn clear(&mut self) {
        let background = self.background;
        self.image.pixels_mut().for_each(|pixel| *pixel = background);
    }

    fn transforms(&self) -> &TransformStack {
        &self.transforms
    }

    fn transforms_mut(&mut self) -> &mut TransformStack {
        &mut self.transforms
    }

    fn stroke_polyline(&mut self, points: &[Pos2], width: f32, color: Color32) {
        if points.len() < 2 || width <= 0.0 {
            return;
        }
        let transform = self.transforms.current();
        let device: Vec<Pos2> = points.iter().map(|p| transform_pos(transform, *p)).collect();
        let radius = width * scale_factor(transform) / 2.0;

        let margin = Vec2::splat(radius + 1.0);
        let min = device.iter().fold(Pos2::new(f32::MAX, f32::MAX), |acc, p| acc.min(*p)) - margin;
        let max = device.iter().fold(Pos2::new(f32::MIN, f32::MIN), |acc, p| acc.max(*p)) + margin;
        let Some((x0, y0, x1, y1)) = self.clip(min, max) else {
            return;
        };

        // Coverage is merged per stroke so overlapping segments do not double-blend.
        let span = (x1 - x0) as usize;
        let mut coverage = vec![0.0f32; span * (y1 - y0) as usize];
        for segment in device.windows(2) {
            let (a, b) = (segment[0], segment[1]);
            let seg_min = a.min(b) - margin;
            let seg_max = a.max(b) + margin;
            let Some((sx0, sy0, sx1, sy1)) = self.clip(seg_min, seg_max) else {
                continue;
            };
            for y in sy0..sy1 {
                for x in sx0..sx1 {
                    let center = Pos2::new(x as f32 + 0.5, y as f32 + 0.5);
                    let c = (radius + 0.5 - distance_to_segment(center, a, b)).clamp(0.0, 1.0);
                    let cell = &mut coverage[(y - y0) as usize * span + (x - x0) as usize];
                    *cell = cell.max(c);
                }
            }
        }

        let rgba = color.to_srgba_unmultiplied();
        for y in y0..y1 {
            for x in x0..x1 {
                let c = coverage[(y - y0) as usize * span + (x - x0) as usize];
                if c > 0.0 {
                    self.blend(x, y, rgba, c);
                }
            }
        }
    }

    fn fill_glyph(&mut self, text: &str, font: &FontId, color: Color32) {
        let transform = self.transforms.current();
        let Some(inverse) = checked_inverse(transform) else {
            return;
        };
        // Rasterize at device resolution, then map device pixels back into the mask.
        let resolution = scale_factor(transform);
        let mask = self.glyphs.rasterize(text, font.size * resolution, &font.family);
        if mask.is_empty() {
            return;
        }

        let extent = Vec2::new(mask.width as f32, mask.height as f32);
        let local_min = (mask.origin.to_vec2() / resolution).to_pos2();
        let local_max = ((mask.origin.to_vec2() + extent) / resolution).to_pos2();
        let corners = [
            local_min,
            Pos2::new(local_max.x, local_min.y),
            local_max,
            Pos2::new(local_min.x, local_max.y),
        ]
        .map(|corner| transform_pos(transform, corner));
        let min = corners.iter().fold(Pos2::new(f32::MAX, f32::MAX), |acc, p| acc.min(*p));
        let max = corners.iter().fold(Pos2::new(f32::MIN, f32::MIN), |acc, p| acc.max(*p));
        let Some((x0, y0, x1, y1)) = self.clip(min, max) else {
            return;
        };

        let rgba = color.to_srgba_unmultiplied();
        for y in y0..y1 {
            for x in x0..x1 {
                let local = transform_pos(inverse, Pos2::new(x as f32 + 0.5, y as f32 + 0.5));
                let c = mask.sample((local.to_vec2() * resolution).to_pos2());
                if c > 0.0 {
                    self.blend(x, y, rgba, c);
                }
            }
        }
    }
}
