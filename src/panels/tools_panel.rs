use egui::color_picker::{self, Alpha};

use crate::SketchApp;
use crate::components::ToolButton;
use crate::tools::{Highlight, MAX_ROTATION};
use crate::util::to_hex_color;

pub fn tools_panel(app: &mut SketchApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(false)
        .default_width(200.0)
        .show(ctx, |ui| {
            ui.heading("Sketchpad");

            ui.horizontal(|ui| {
                if ui.button("Clear").clicked() {
                    app.session.clear();
                }

                let can_undo = app.session.history().can_undo();
                let can_redo = app.session.history().can_redo();
                if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
                    app.session.undo();
                }
                if ui.add_enabled(can_redo, egui::Button::new("Redo")).clicked() {
                    app.session.redo();
                }
            });

            if ui.button("Export PNG").clicked() {
                app.export_with_status();
            }
            if let Some(status) = &app.status {
                ui.small(status.as_str());
            }
            ui.separator();

            let highlighted = app.session.tools().highlighted();

            ui.label("Markers");
            let mut picked_marker = None;
            ui.horizontal_wrapped(|ui| {
                for (index, marker) in app.session.tools().markers().iter().enumerate() {
                    let selected = highlighted == Highlight::Marker(index);
                    let tooltip = format!("{} ({}px)", marker.name(), marker.thickness());
                    if ToolButton::new(marker.name(), &tooltip, selected).show(ui).clicked() {
                        picked_marker = Some(index);
                    }
                }
            });
            if let Some(index) = picked_marker {
                log::info!("Marker selected from UI: {index}");
                app.session.select_marker(index);
            }

            ui.label("Stickers");
            let mut picked_sticker = None;
            ui.horizontal_wrapped(|ui| {
                for (index, sticker) in app.session.tools().stickers().iter().enumerate() {
                    let selected = highlighted == Highlight::Sticker(index);
                    let tooltip = if sticker.is_custom() {
                        "Custom sticker"
                    } else {
                        "Sticker"
                    };
                    if ToolButton::new(sticker.glyph(), tooltip, selected).show(ui).clicked() {
                        picked_sticker = Some(index);
                    }
                }
            });
            if let Some(index) = picked_sticker {
                log::info!("Sticker selected from UI: {index}");
                app.session.select_sticker(index);
            }
            if ui.button("Custom sticker…").clicked() {
                app.open_sticker_prompt();
            }
            ui.separator();

            ui.horizontal(|ui| {
                ui.label("Color");
                let mut color = app.session.tools().color();
                if color_picker::color_edit_button_srgba(ui, &mut color, Alpha::Opaque).changed() {
                    app.session.set_color(color);
                }
                ui.monospace(to_hex_color(app.session.tools().color()));
            });

            ui.horizontal(|ui| {
                ui.label("Rotation");
                let mut degrees = app.session.tools().rotation_degrees();
                let slider = egui::Slider::new(&mut degrees, 0..=MAX_ROTATION)
                    .step_by(1.0)
                    .suffix("°");
                if ui.add(slider).changed() {
                    app.session.set_rotation(degrees);
                }
            });
            ui.separator();

            // Undo and redo stacks side by side, newest at the bottom
            ui.heading("History");
            let history = app.session.history();
            let undo_stack = history.commands();
            let redo_stack = history.redo_stack();
            egui::ScrollArea::vertical().max_height(240.0).show(ui, |ui| {
                egui::Grid::new("history_grid")
                    .num_columns(2)
                    .striped(true)
                    .show(ui, |ui| {
                        ui.strong("Undo");
                        ui.strong("Redo");
                        ui.end_row();

                        let rows = undo_stack.len().max(redo_stack.len());
                        for i in 0..rows {
                            ui.label(undo_stack.get(i).map_or("", |cmd| cmd.label()));
                            ui.label(redo_stack.get(i).map_or("", |cmd| cmd.label()));
                            ui.end_row();
                        }
                    });
            });
        });
}
