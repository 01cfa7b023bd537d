#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod command;
pub mod components;
pub mod config;
pub mod error;
pub mod event;
pub mod export;
pub mod geometry;
pub mod input;
pub mod panels;
pub mod renderer;
pub mod session;
pub mod sticker;
pub mod stroke;
pub mod surface;
pub mod tools;
pub mod util;

pub use app::SketchApp;
pub use command::{Command, CommandHistory, CommandRef};
pub use config::{ConfigError, SketchConfig};
pub use error::{SketchError, SketchResult};
pub use event::{EventBus, EventHandler, SketchEvent};
pub use export::ExportError;
pub use input::{InputEvent, InputHandler};
pub use renderer::{CursorPreview, render};
pub use session::Session;
pub use sticker::Sticker;
pub use stroke::Stroke;
pub use surface::{GlyphSet, PainterSurface, RasterSurface, Surface};
pub use tools::ToolState;
