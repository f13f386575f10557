use hierarchy_engine::coords::{Rect, Vec2};
use hierarchy_engine::input::Key;
use hierarchy_engine::paint::Color;
use hierarchy_engine::scene::Canvas;
use hierarchy_engine::text::{FontId, FontSystem};

use super::UiInput;

/// Checkmark polyline in box-relative units.
const CHECK_MARK: [Vec2; 3] = [Vec2::new(0.22, 0.50), Vec2::new(0.42, 0.72), Vec2::new(0.80, 0.26)];

/// A checkbox toggle with an optional text label.
///
/// The whole widget rect (box and label) is the hit area. A left click
/// toggles when both the press and the release land inside it. Space also
/// toggles, since the checkbox is the panel's only focusable control.
///
/// ```
/// # use hierarchy_engine::coords::{Rect, Vec2};
/// # use hierarchy_studio::widgets::{Checkbox, UiInput};
/// let mut cb = Checkbox::new("Run Animation");
/// let rect = Rect::new(0.0, 0.0, 120.0, 20.0);
/// let click = UiInput {
///     mouse_pos: Some(Vec2::new(5.0, 5.0)),
///     mouse_down: true,
///     mouse_clicked: true,
///     ..UiInput::default()
/// };
/// assert!(cb.update(rect, &click));
/// assert!(cb.is_checked());
/// ```
pub struct Checkbox {
    checked: bool,
    /// Left button went down inside the rect and has not been released.
    armed: bool,
    label: String,
    font: Option<FontId>,
    font_size: f32,
    label_color: Color,
    box_size: f32,
    gap: f32,
    bg: Color,
    hover_bg: Color,
    border_color: Color,
    hover_border_color: Color,
    mark_color: Color,
    border_width: f32,
    mark_width: f32,
}

impl Checkbox {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            checked: false,
            armed: false,
            label: label.into(),
            font: None,
            font_size: 13.0,
            label_color: Color::from_srgb_u8(51, 51, 51, 255),
            box_size: 13.0,
            gap: 6.0,
            bg: Color::WHITE,
            hover_bg: Color::from_srgb_u8(230, 238, 246, 255),
            border_color: Color::from_srgb_u8(122, 138, 153, 255),
            hover_border_color: Color::from_srgb_u8(99, 130, 191, 255),
            mark_color: Color::BLACK,
            border_width: 1.0,
            mark_width: 2.0,
        }
    }

    pub fn font(mut self, v: Option<FontId>) -> Self { self.font = v; self }
    pub fn font_size(mut self, v: f32) -> Self { self.font_size = v; self }

    #[inline]
    pub fn is_checked(&self) -> bool {
        self.checked
    }

    pub fn set_checked(&mut self, v: bool) {
        self.checked = v;
    }

    /// Natural size: box, gap and label side by side.
    pub fn measure(&self, fonts: &FontSystem) -> Vec2 {
        let text = match self.font {
            Some(f) if !self.label.is_empty() => fonts.measure_text(&self.label, f, self.font_size),
            _ => Vec2::zero(),
        };
        if text.x > 0.0 {
            Vec2::new(self.box_size + self.gap + text.x, self.box_size.max(text.y))
        } else {
            Vec2::new(self.box_size, self.box_size)
        }
    }

    /// Rect of natural size centered in `area`, snapped to whole pixels.
    pub fn centered_in(&self, area: Rect, fonts: &FontSystem) -> Rect {
        let size = self.measure(fonts);
        let c = area.center();
        Rect::new((c.x - size.x * 0.5).round(), (c.y - size.y * 0.5).round(), size.x, size.y)
    }

    /// Applies this frame's input. Returns `true` if the checked state changed.
    pub fn update(&mut self, rect: Rect, input: &UiInput) -> bool {
        let inside = input.mouse_pos.is_some_and(|p| rect.contains(p));
        if input.mouse_down {
            self.armed = inside;
        }
        let clicked = input.mouse_clicked && self.armed && inside;
        if input.mouse_clicked {
            self.armed = false;
        }

        if clicked || input.key_pressed(Key::Space) {
            self.checked = !self.checked;
            return true;
        }
        false
    }

    pub fn paint(&self, canvas: &mut Canvas<'_>, rect: Rect, input: &UiInput) {
        let hovered = input.mouse_pos.is_some_and(|p| rect.contains(p));

        let box_y = rect.origin.y + ((rect.size.y - self.box_size) * 0.5).round();
        let box_rect = Rect::new(rect.origin.x, box_y, self.box_size, self.box_size);

        canvas.scoped(|c| {
            c.set_color(if hovered { self.hover_bg } else { self.bg });
            c.fill_rect(box_rect);

            // Inset by half the width so the outline stays inside the box.
            c.set_color(if hovered { self.hover_border_color } else { self.border_color });
            c.set_stroke_width(self.border_width);
            c.stroke_rect(box_rect.inset(self.border_width * 0.5));

            if self.checked {
                let mark: Vec<Vec2> = CHECK_MARK
                    .iter()
                    .map(|p| Vec2::new(box_rect.origin.x + p.x * self.box_size, box_rect.origin.y + p.y * self.box_size))
                    .collect();
                c.set_color(self.mark_color);
                c.set_stroke_width(self.mark_width);
                c.stroke_polyline(&mark);
            }

            if let Some(font) = self.font.filter(|_| !self.label.is_empty()) {
                let text_x = rect.origin.x + self.box_size + self.gap;
                let text_y = rect.origin.y + ((rect.size.y - self.font_size * 1.2) * 0.5).round();
                c.set_color(self.label_color);
                c.text(self.label.clone(), font, self.font_size, Vec2::new(text_x, text_y));
            }
        });
    }
}
