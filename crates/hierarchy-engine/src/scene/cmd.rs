use crate::scene::shapes::path::{FillCmd, StrokeCmd};
use crate::scene::shapes::text::TextCmd;

/// Renderer-agnostic draw command stream.
///
/// Extending the scene:
/// - add a payload module under `scene::shapes::*`
/// - add a new variant here
/// - teach `render::tessellate` or a dedicated renderer to consume it
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Fill(FillCmd),
    Stroke(StrokeCmd),
    Text(TextCmd),
}
