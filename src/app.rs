use crate::config::SketchConfig;
use crate::error::{SketchError, SketchResult};
use crate::event::SketchEvent;
use crate::export;
use crate::input::InputHandler;
use crate::panels::{central_panel, tools_panel};
use crate::session::Session;
use crate::surface::{GlyphSet, MAX_SURFACE_SIDE};

/// The eframe application: one session, its canvas and the tool panel.
/// Nothing is persisted between runs.
pub struct SketchApp {
    pub(crate) config: SketchConfig,
    pub(crate) session: Session,
    pub(crate) glyphs: GlyphSet,
    pub(crate) input: InputHandler,
    /// Text of the custom sticker prompt while it is open
    pub(crate) sticker_prompt: Option<String>,
    /// Outcome of the last export, shown under the buttons
    pub(crate) status: Option<String>,
}

impl std::fmt::Debug for SketchApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SketchApp")
            .field("session", &self.session)
            .field("status", &self.status)
            .finish()
    }
}

impl SketchApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, config: SketchConfig) -> SketchResult<Self> {
        let app = Self::from_config(config)?;

        // Every drawing or tool event asks egui for another frame.
        let ctx = cc.egui_ctx.clone();
        app.session
            .subscribe(move |_: &SketchEvent| ctx.request_repaint());

        log::info!(
            "Sketchpad ready: {}x{} canvas, export x{}",
            app.config.canvas_width,
            app.config.canvas_height,
            app.config.export_scale
        );
        Ok(app)
    }

    /// Validate the config and set up everything that does not need a window.
    ///
    /// Fails when the canvas, or its export at the configured scale, cannot
    /// be backed by a surface.
    pub fn from_config(config: SketchConfig) -> SketchResult<Self> {
        config.validate()?;

        let (width, height) = (config.canvas_width, config.canvas_height);
        let export_fits = width
            .checked_mul(config.export_scale)
            .zip(height.checked_mul(config.export_scale))
            .is_some_and(|(w, h)| w <= MAX_SURFACE_SIDE && h <= MAX_SURFACE_SIDE);
        if !export_fits {
            return Err(SketchError::SurfaceUnavailable { width, height });
        }

        let glyphs = GlyphSet::load_default()?;
        let session = Session::new(&config);
        Ok(Self {
            config,
            session,
            glyphs,
            input: InputHandler::new(egui::Rect::NOTHING),
            sticker_prompt: None,
            status: None,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn config(&self) -> &SketchConfig {
        &self.config
    }

    /// Render the log at the export scale and hand the PNG to the platform
    pub fn export(&mut self) -> SketchResult<String> {
        let png = export::export_png(self.session.history().commands(), &self.config, &self.glyphs)?;
        let target = export::deliver_png(&png, &self.config)?;
        Ok(target)
    }

    pub(crate) fn export_with_status(&mut self) {
        self.status = Some(match self.export() {
            Ok(target) => format!("Saved {target}"),
            Err(err) => {
                log::error!("{err}");
                err.to_string()
            }
        });
    }

    /// Open the custom sticker prompt
    pub(crate) fn open_sticker_prompt(&mut self) {
        self.sticker_prompt = Some(String::new());
    }

    /// Add a sticker typed into the prompt. Characters no bundled font can
    /// draw still make a sticker, but are reported since they show as boxes.
    pub fn add_custom_sticker(&mut self, text: &str) -> Option<usize> {
        let index = self.session.add_custom_sticker(Some(text))?;
        let missing = self.glyphs.missing_glyphs(text);
        if !missing.is_empty() {
            log::warn!("Custom sticker {text:?} has characters without a glyph: {missing:?}");
            self.status = Some(format!("No glyph for {}", missing.iter().collect::<String>()));
        }
        Some(index)
    }

    fn sticker_prompt_window(&mut self, ctx: &egui::Context) {
        let Some(text) = self.sticker_prompt.as_mut() else {
            return;
        };

        let mut submitted = false;
        let mut cancelled = false;
        egui::Window::new("Custom sticker")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label("Sticker text:");
                let response = ui.text_edit_singleline(text);
                response.request_focus();
                if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    submitted = true;
                }
                ui.horizontal(|ui| {
                    if ui.button("Add").clicked() {
                        submitted = true;
                    }
                    if ui.button("Cancel").clicked() {
                        cancelled = true;
                    }
                });
            });

        if submitted {
            if let Some(text) = self.sticker_prompt.take() {
                self.add_custom_sticker(&text);
            }
        } else if cancelled {
            self.sticker_prompt = None;
            self.session.add_custom_sticker(None);
        }
    }
}

impl eframe::App for SketchApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        tools_panel(self, ctx);
        central_panel(self, ctx);
        self.sticker_prompt_window(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_starts() {
        let app = SketchApp::from_config(SketchConfig::default()).unwrap();
        assert!(app.session().history().is_empty());
        assert_eq!(app.config().canvas_width, 256);
    }

    #[test]
    fn test_unusable_canvas_aborts_startup() {
        let config = SketchConfig {
            canvas_width: 8_000,
            ..SketchConfig::default()
        };
        let result = SketchApp::from_config(config);
        assert!(matches!(
            result,
            Err(SketchError::SurfaceUnavailable { width: 8_000, height: 256 })
        ));
    }

    #[test]
    fn test_custom_sticker_without_glyph_is_reported() {
        let mut app = SketchApp::from_config(SketchConfig::default()).unwrap();
        let presets = app.session().tools().stickers().len();

        assert_eq!(app.add_custom_sticker("hi"), Some(presets));
        assert_eq!(app.status, None);

        assert_eq!(app.add_custom_sticker("\u{10FFFD}"), Some(presets + 1));
        assert!(app.status.as_deref().is_some_and(|s| s.starts_with("No glyph")));

        assert_eq!(app.add_custom_sticker("  "), None);
    }

    #[test]
    fn test_invalid_config_aborts_startup() {
        let config = SketchConfig {
            canvas_height: 0,
            ..SketchConfig::default()
        };
        assert!(matches!(SketchApp::from_config(config), Err(SketchError::Config(_))));
    }
}
