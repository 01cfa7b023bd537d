use crate::SketchApp;
use crate::input::dispatch;
use crate::surface::PainterSurface;

pub fn central_panel(app: &mut SketchApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let size = egui::vec2(app.config.canvas_width as f32, app.config.canvas_height as f32);
        let (response, painter) = ui.allocate_painter(size, egui::Sense::click_and_drag());
        let canvas_rect = response.rect;

        // Leave pointer input to the prompt while it is open
        if app.sticker_prompt.is_none() {
            app.input.set_canvas_rect(canvas_rect);
            let events = app.input.process_input(ctx);
            dispatch(&events, &mut app.session);
        }

        if response.hovered() && !app.session.tools().is_placing_sticker() {
            ctx.set_cursor_icon(egui::CursorIcon::Crosshair);
        }

        let mut surface = PainterSurface::new(&painter, canvas_rect, app.config.background_color());
        app.session.render(&mut surface);
    });
}
