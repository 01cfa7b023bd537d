use std::cell::RefCell;
use std::rc::Rc;

use egui::{Color32, FontId, Pos2};
use sketchpad::config::SketchConfig;
use sketchpad::event::SketchEvent;
use sketchpad::renderer::CursorPreview;
use sketchpad::session::Session;

fn session_with_log() -> (Session, Rc<RefCell<Vec<SketchEvent>>>) {
    let session = Session::new(&SketchConfig::default());
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = events.clone();
    session.subscribe(move |event: &SketchEvent| sink.borrow_mut().push(*event));
    (session, events)
}

#[test]
fn test_drag_draws_one_stroke_with_current_tool() {
    let (mut session, _) = session_with_log();
    session.select_marker(1);
    session.set_color(Color32::from_rgb(10, 20, 30));

    session.pointer_down(Pos2::new(5.0, 5.0));
    assert!(session.is_drawing());
    session.pointer_move(Pos2::new(15.0, 5.0));
    session.pointer_move(Pos2::new(25.0, 10.0));
    session.pointer_up();

    assert!(!session.is_drawing());
    assert_eq!(session.history().len(), 1);
    let stroke = session.history().commands()[0].as_stroke().unwrap();
    assert_eq!(
        stroke.points(),
        &[Pos2::new(5.0, 5.0), Pos2::new(15.0, 5.0), Pos2::new(25.0, 10.0)]
    );
    assert_eq!(stroke.thickness(), 6.0);
    assert_eq!(stroke.color(), Color32::from_rgb(10, 20, 30));
}

#[test]
fn test_moving_without_a_press_only_moves_the_preview() {
    let (mut session, events) = session_with_log();
    session.pointer_enter(Pos2::new(1.0, 1.0));
    session.pointer_move(Pos2::new(2.0, 2.0));

    assert!(session.history().is_empty());
    assert_eq!(*events.borrow(), vec![SketchEvent::ToolMoved, SketchEvent::ToolMoved]);
    assert_eq!(session.cursor(), Some(Pos2::new(2.0, 2.0)));
}

#[test]
fn test_sticker_mode_places_stickers_on_click() {
    let (mut session, _) = session_with_log();
    session.set_rotation(90);
    session.select_sticker(1);

    session.pointer_down(Pos2::new(40.0, 40.0));
    assert!(!session.is_drawing(), "stickers are committed on press");
    session.pointer_move(Pos2::new(50.0, 50.0));
    session.pointer_up();

    assert_eq!(session.history().len(), 1);
    let sticker = session.history().commands()[0].as_sticker().unwrap();
    assert_eq!(sticker.glyph(), "🍕");
    assert_eq!(sticker.position(), Pos2::new(40.0, 40.0));
    assert_eq!(sticker.rotation_degrees(), 90.0);
    assert_eq!(sticker.font_spec(), "32px monospace");
}

#[test]
fn test_selecting_the_same_sticker_again_leaves_placement_mode() {
    let (mut session, _) = session_with_log();
    session.select_sticker(0);
    assert!(session.tools().is_placing_sticker());

    session.select_sticker(0);
    assert!(!session.tools().is_placing_sticker());

    session.pointer_down(Pos2::new(3.0, 3.0));
    assert!(session.history().commands()[0].as_stroke().is_some());
}

#[test]
fn test_picking_a_marker_keeps_placing_stickers() {
    let (mut session, _) = session_with_log();
    session.select_sticker(2);
    session.select_marker(1);

    session.pointer_down(Pos2::new(3.0, 3.0));
    session.pointer_up();
    assert!(session.history().commands()[0].as_sticker().is_some());
    assert_eq!(session.tools().active_marker().thickness(), 6.0);
}

#[test]
fn test_custom_sticker_prompt() {
    let (mut session, events) = session_with_log();
    let presets = session.tools().stickers().len();

    assert_eq!(session.add_custom_sticker(None), None);
    assert_eq!(session.add_custom_sticker(Some("   ")), None);
    assert_eq!(session.tools().stickers().len(), presets);
    assert!(events.borrow().is_empty());

    let index = session.add_custom_sticker(Some(" hi! ")).unwrap();
    assert_eq!(index, presets);
    assert_eq!(session.tools().stickers()[index].glyph(), "hi!");
    assert_eq!(*events.borrow(), vec![SketchEvent::ToolChanged]);
}

#[test]
fn test_tool_changes_are_announced_once() {
    let (mut session, events) = session_with_log();
    session.set_rotation(45);
    session.set_rotation(45);
    session.set_color(Color32::RED);
    session.set_color(Color32::RED);
    assert!(session.set_color_hex("#00ff00"));
    assert!(!session.set_color_hex("green"));
    session.select_marker(7);

    assert_eq!(events.borrow().len(), 3);
    assert!(events.borrow().iter().all(|e| *e == SketchEvent::ToolChanged));
    assert_eq!(session.tools().color(), Color32::from_rgb(0, 255, 0));
}

#[test]
fn test_rotation_is_clamped_to_slider_range() {
    let (mut session, _) = session_with_log();
    session.set_rotation(400);
    assert_eq!(session.tools().rotation_degrees(), 360);
    session.set_rotation(-5);
    assert_eq!(session.tools().rotation_degrees(), 0);
}

#[test]
fn test_preview_follows_the_pointer() {
    let (mut session, _) = session_with_log();
    assert_eq!(session.preview(), None);

    session.pointer_enter(Pos2::new(20.0, 20.0));
    assert_eq!(
        session.preview(),
        Some(CursorPreview::Marker {
            position: Pos2::new(24.0, 16.0),
            color: Color32::BLACK,
            font: FontId::monospace(16.0),
        })
    );

    session.pointer_down(Pos2::new(20.0, 20.0));
    assert_eq!(session.preview(), None, "no preview while dragging");
    session.pointer_up();

    session.select_sticker(0);
    session.set_rotation(30);
    session.pointer_move(Pos2::new(30.0, 30.0));
    assert_eq!(
        session.preview(),
        Some(CursorPreview::Sticker {
            position: Pos2::new(30.0, 30.0),
            glyph: "🐸".to_owned(),
            font: FontId::monospace(32.0),
            rotation_degrees: 30.0,
        })
    );

    session.pointer_leave();
    assert_eq!(session.preview(), None);
}

#[test]
fn test_leaving_mid_stroke_keeps_it_open_until_release() {
    let (mut session, _) = session_with_log();
    session.pointer_down(Pos2::new(0.0, 0.0));
    session.pointer_move(Pos2::new(10.0, 0.0));
    session.pointer_leave();
    assert!(session.is_drawing());

    session.pointer_up();
    assert!(!session.is_drawing());
    assert_eq!(session.history().commands()[0].as_stroke().unwrap().points().len(), 2);
}

#[test]
fn test_undo_mid_stroke_closes_it() {
    let (mut session, _) = session_with_log();
    session.pointer_down(Pos2::new(0.0, 0.0));
    session.pointer_move(Pos2::new(10.0, 0.0));

    assert!(session.undo());
    assert!(!session.is_drawing());
    session.pointer_move(Pos2::new(20.0, 0.0));
    assert!(session.history().is_empty());

    assert!(session.redo());
    assert_eq!(session.history().commands()[0].as_stroke().unwrap().points().len(), 2);
}
