use std::f32::consts::FRAC_PI_2;

use egui::{Color32, FontId, Pos2};
use sketchpad::command::Command;
use sketchpad::config::SketchConfig;
use sketchpad::export;
use sketchpad::geometry::{Affine, rotation, transform_pos};
use sketchpad::renderer::{self, CursorPreview};
use sketchpad::sticker::Sticker;
use sketchpad::stroke::Stroke;
use sketchpad::surface::{GlyphSet, RasterSurface, Surface, TransformStack};

/// Surface that records draw calls together with the transform in effect
#[derive(Default)]
struct RecordingSurface {
    transforms: TransformStack,
    clears: usize,
    polylines: Vec<(Vec<Pos2>, Affine)>,
    glyphs: Vec<(String, FontId, Affine)>,
}

fn assert_same_transform(actual: Affine, expected: Affine) {
    let close = actual
        .as_coeffs()
        .iter()
        .zip(expected.as_coeffs())
        .all(|(a, e)| (a - e).abs() < 1e-6);
    assert!(close, "expected {expected:?}, got {actual:?}");
}

impl Surface for RecordingSurface {
    fn clear(&mut self) {
        self.clears += 1;
    }

    fn transforms(&self) -> &TransformStack {
        &self.transforms
    }

    fn transforms_mut(&mut self) -> &mut TransformStack {
        &mut self.transforms
    }

    fn stroke_polyline(&mut self, points: &[Pos2], _width: f32, _color: Color32) {
        self.polylines.push((points.to_vec(), self.transform()));
    }

    fn fill_glyph(&mut self, text: &str, font: &FontId, _color: Color32) {
        self.glyphs.push((text.to_owned(), font.clone(), self.transform()));
    }
}

fn raster(width: u32, height: u32) -> RasterSurface {
    let glyphs = GlyphSet::load_default().unwrap();
    RasterSurface::new(width, height, Color32::WHITE, glyphs).unwrap()
}

fn sample_log() -> Vec<Command> {
    vec![
        Command::Stroke(Stroke::from_points(
            vec![Pos2::new(4.0, 4.0), Pos2::new(40.0, 12.0), Pos2::new(60.0, 50.0)],
            3.0,
            Color32::from_rgb(200, 30, 30),
        )),
        Command::Sticker(Sticker::new(Pos2::new(32.0, 32.0), "★", "24px monospace", 30.0)),
        Command::Stroke(Stroke::from_points(
            vec![Pos2::new(0.0, 60.0), Pos2::new(64.0, 0.0)],
            6.0,
            Color32::from_rgba_unmultiplied(0, 0, 255, 128),
        )),
    ]
}

#[test]
fn test_rendering_twice_is_bit_identical() {
    let log = sample_log();
    let preview = CursorPreview::Marker {
        position: Pos2::new(20.0, 20.0),
        color: Color32::GREEN,
        font: FontId::monospace(16.0),
    };
    let mut surface = raster(64, 64);

    renderer::render(&mut surface, &log, Some(&preview));
    let first = surface.image().clone();
    renderer::render(&mut surface, &log, Some(&preview));

    assert_eq!(first.as_raw(), surface.image().as_raw());
}

#[test]
fn test_render_clears_before_replaying() {
    let mut surface = raster(32, 32);
    let log = vec![Command::Stroke(Stroke::from_points(
        vec![Pos2::new(0.0, 16.0), Pos2::new(32.0, 16.0)],
        4.0,
        Color32::BLACK,
    ))];
    renderer::render(&mut surface, &log, None);
    assert_ne!(*surface.image().get_pixel(16, 16), image::Rgba([255, 255, 255, 255]));

    renderer::render(&mut surface, &[], None);
    assert!(surface.image().pixels().all(|p| p.0 == [255, 255, 255, 255]));
}

#[test]
fn test_single_point_stroke_draws_nothing() {
    let log = vec![Command::Stroke(Stroke::new(Pos2::new(10.0, 10.0), 8.0, Color32::RED))];

    let mut surface = raster(20, 20);
    renderer::render(&mut surface, &log, None);
    assert!(surface.image().pixels().all(|p| p.0 == [255, 255, 255, 255]));

    let mut recording = RecordingSurface::default();
    renderer::render(&mut recording, &log, None);
    assert!(recording.polylines.is_empty());
}

#[test]
fn test_export_is_four_times_the_canvas() {
    let config = SketchConfig {
        canvas_width: 40,
        canvas_height: 25,
        ..SketchConfig::default()
    };
    assert_eq!(config.export_scale, 4);
    let glyphs = GlyphSet::load_default().unwrap();

    let image = export::render_scaled(&sample_log(), &config, &glyphs, config.export_scale).unwrap();
    assert_eq!(image.width(), 160);
    assert_eq!(image.height(), 100);
}

#[test]
fn test_export_scales_strokes_with_the_canvas() {
    let config = SketchConfig {
        canvas_width: 16,
        canvas_height: 16,
        ..SketchConfig::default()
    };
    let glyphs = GlyphSet::load_default().unwrap();
    let log = vec![Command::Stroke(Stroke::from_points(
        vec![Pos2::new(0.0, 8.0), Pos2::new(16.0, 8.0)],
        2.0,
        Color32::BLACK,
    ))];

    let image = export::render_scaled(&log, &config, &glyphs, 4).unwrap();
    // Line centered on y=32 with a width of 8 device pixels
    assert_eq!(image.get_pixel(32, 32).0, [0, 0, 0, 255]);
    assert_eq!(image.get_pixel(32, 30).0, [0, 0, 0, 255]);
    assert_eq!(image.get_pixel(32, 40).0, [255, 255, 255, 255]);
}

#[test]
fn test_rotated_sticker_turns_about_its_point() {
    let placed = Pos2::new(100.0, 60.0);
    let log = vec![
        Command::Sticker(Sticker::new(placed, "🐸", "32px monospace", 90.0)),
        Command::Stroke(Stroke::from_points(
            vec![Pos2::new(0.0, 0.0), Pos2::new(10.0, 0.0)],
            2.0,
            Color32::BLACK,
        )),
    ];

    let mut surface = RecordingSurface::default();
    let before = surface.transform();
    renderer::render(&mut surface, &log, None);

    assert_eq!(surface.clears, 1);
    let (glyph, font, transform) = &surface.glyphs[0];
    assert_eq!(glyph, "🐸");
    assert_eq!(*font, FontId::monospace(32.0));
    assert!((rotation(*transform) - FRAC_PI_2).abs() < 1e-5);
    assert!((transform_pos(*transform, Pos2::ZERO) - placed).length() < 1e-4);

    // Local +x points down the canvas after a quarter turn
    let along = transform_pos(*transform, Pos2::new(10.0, 0.0));
    assert!((along - Pos2::new(100.0, 70.0)).length() < 1e-4);

    // Nothing leaks into the next command or out of render
    let (_, stroke_transform) = &surface.polylines[0];
    assert_same_transform(*stroke_transform, before);
    assert_same_transform(surface.transform(), before);
    assert_eq!(surface.transforms().depth(), 0);
}

#[test]
fn test_sticker_preview_uses_slider_angle() {
    let preview = CursorPreview::Sticker {
        position: Pos2::new(50.0, 50.0),
        glyph: "🍕".to_owned(),
        font: FontId::monospace(32.0),
        rotation_degrees: 180.0,
    };
    let mut surface = RecordingSurface::default();
    renderer::render(&mut surface, &[], Some(&preview));

    let (glyph, _, transform) = &surface.glyphs[0];
    assert_eq!(glyph, "🍕");
    assert!((rotation(*transform).abs() - std::f32::consts::PI).abs() < 1e-5);
    assert_same_transform(surface.transform(), Affine::IDENTITY);
}
