//! Scene (draw stream) types.
//!
//! Responsibilities:
//! - store renderer-agnostic draw commands in paint order
//! - scope clip rects and drawing state (transform, color, stroke width)
//! - keep shape-specific payloads isolated per file under `scene::shapes`

mod canvas;
mod cmd;
mod list;

pub mod shapes;

pub use canvas::{Canvas, DrawState};
pub use cmd::DrawCmd;
pub use list::{DrawItem, DrawList};
pub use shapes::{FillCmd, StrokeCmd, TextCmd};
