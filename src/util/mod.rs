pub mod color;

pub use color::{parse_hex_color, to_hex_color};
