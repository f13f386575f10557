//! Immediate-mode chrome widgets.

mod checkbox;

pub use checkbox::Checkbox;

use hierarchy_engine::coords::Vec2;
use hierarchy_engine::input::{InputFrame, InputState, Key, MouseButton};

/// Pointer and keyboard input for one frame, in logical pixels.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiInput {
    /// `None` while the cursor is outside the window.
    pub mouse_pos: Option<Vec2>,
    /// `true` while the primary button is held down.
    pub mouse_pressed: bool,
    /// `true` for exactly one frame when the primary button goes down.
    pub mouse_down: bool,
    /// `true` for exactly one frame when the primary button is released.
    pub mouse_clicked: bool,
    /// Keys pressed this frame, repeats excluded.
    pub keys_pressed: Vec<Key>,
}

impl UiInput {
    pub fn from_frame(input: &InputState, frame: &InputFrame) -> Self {
        Self {
            mouse_pos: input.pointer_pos.map(|(x, y)| Vec2::new(x, y)),
            mouse_pressed: input.button_down(MouseButton::Left),
            mouse_down: frame.buttons_pressed.contains(&MouseButton::Left),
            mouse_clicked: frame.buttons_released.contains(&MouseButton::Left),
            keys_pressed: frame.keys_pressed.iter().copied().collect(),
        }
    }

    #[inline]
    pub fn key_pressed(&self, key: Key) -> bool {
        self.keys_pressed.contains(&key)
    }
}
