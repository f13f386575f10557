use crate::coords::{Rect, Transform, Vec2};
use crate::paint::Color;
use crate::text::FontId;

use super::DrawList;

/// Mutable drawing state carried by a [`Canvas`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DrawState {
    /// Local → logical-pixel transform.
    pub transform: Transform,
    /// Color used by every fill and stroke.
    pub color: Color,
    /// Stroke width in local units.
    pub stroke_width: f32,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            transform: Transform::identity(),
            color: Color::BLACK,
            stroke_width: 1.0,
        }
    }
}

/// Stateful drawing context over a [`DrawList`].
///
/// Works like a retained 2D graphics context: transform calls concatenate onto
/// the current transform, and shapes are recorded with whatever state is
/// current. [`save`](Self::save) / [`restore`](Self::restore) push and pop the
/// whole [`DrawState`]; [`scoped`](Self::scoped) pairs them around a closure.
///
/// ```
/// # use hierarchy_engine::scene::{Canvas, DrawList};
/// # use hierarchy_engine::paint::Color;
/// let mut list = DrawList::new();
/// let mut canvas = Canvas::new(&mut list);
/// let before = canvas.state();
/// canvas.scoped(|c| {
///     c.translate(1.0, 2.0);
///     c.set_color(Color::RED);
///     c.fill_rect_local(-0.5, -0.5, 1.0, 1.0);
/// });
/// assert_eq!(canvas.state(), before);
/// ```
pub struct Canvas<'a> {
    list: &'a mut DrawList,
    state: DrawState,
    saved: Vec<DrawState>,
}

impl<'a> Canvas<'a> {
    #[inline]
    pub fn new(list: &'a mut DrawList) -> Self {
        Self { list, state: DrawState::default(), saved: Vec::new() }
    }

    // ── state ─────────────────────────────────────────────────────────────

    #[inline]
    pub fn state(&self) -> DrawState {
        self.state
    }

    #[inline]
    pub fn transform(&self) -> Transform {
        self.state.transform
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.state.color
    }

    #[inline]
    pub fn set_color(&mut self, c: Color) {
        self.state.color = c;
    }

    #[inline]
    pub fn stroke_width(&self) -> f32 {
        self.state.stroke_width
    }

    #[inline]
    pub fn set_stroke_width(&mut self, w: f32) {
        self.state.stroke_width = w;
    }

    /// Number of currently unmatched [`save`](Self::save) calls.
    #[inline]
    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    #[inline]
    pub fn save(&mut self) {
        self.saved.push(self.state);
    }

    /// Restores the state captured by the matching [`save`](Self::save).
    ///
    /// Unbalanced calls are ignored (debug builds assert).
    #[inline]
    pub fn restore(&mut self) {
        debug_assert!(!self.saved.is_empty(), "Canvas::restore without matching save");
        if let Some(s) = self.saved.pop() {
            self.state = s;
        }
    }

    /// Runs `f` between `save` and `restore`.
    pub fn scoped<R>(&mut self, f: impl FnOnce(&mut Canvas<'a>) -> R) -> R {
        self.save();
        let out = f(self);
        self.restore();
        out
    }

    // ── transform ─────────────────────────────────────────────────────────

    #[inline]
    pub fn translate(&mut self, tx: f32, ty: f32) {
        self.state.transform.translate(tx, ty);
    }

    #[inline]
    pub fn scale(&mut self, sx: f32, sy: f32) {
        self.state.transform.scale(sx, sy);
    }

    #[inline]
    pub fn rotate(&mut self, radians: f32) {
        self.state.transform.rotate(radians);
    }

    #[inline]
    pub fn concat(&mut self, t: Transform) {
        self.state.transform.concat(t);
    }

    // ── drawing ───────────────────────────────────────────────────────────

    /// Fills the polygon outlined by `points` (local coordinates).
    pub fn fill_polygon(&mut self, points: &[Vec2]) {
        if points.len() < 3 {
            return;
        }
        self.list.push_fill(points.to_vec(), self.state.transform, self.state.color);
    }

    /// Strokes the closed outline through `points`.
    pub fn stroke_polygon(&mut self, points: &[Vec2]) {
        self.stroke(points, true);
    }

    /// Strokes the open polyline through `points`.
    pub fn stroke_polyline(&mut self, points: &[Vec2]) {
        self.stroke(points, false);
    }

    /// Fills an axis-aligned rectangle given in local coordinates.
    pub fn fill_rect_local(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.fill_polygon(&Rect::new(x, y, w, h).corners());
    }

    /// Fills `rect` in local coordinates.
    pub fn fill_rect(&mut self, rect: Rect) {
        self.fill_polygon(&rect.corners());
    }

    /// Strokes the outline of `rect` in local coordinates.
    pub fn stroke_rect(&mut self, rect: Rect) {
        self.stroke_polygon(&rect.corners());
    }

    /// Records `text` with its top-left at `origin` (local coordinates).
    pub fn text(&mut self, text: impl Into<String>, font: FontId, size: f32, origin: Vec2) {
        let origin = self.state.transform.apply(origin);
        self.list.push_text(text, font, size, self.state.color, origin);
    }

    // ── clipping ──────────────────────────────────────────────────────────

    /// Begins a scissor region. `rect` is in logical pixels, the transform does not apply.
    #[inline]
    pub fn push_clip(&mut self, rect: Rect) {
        self.list.push_clip(rect);
    }

    #[inline]
    pub fn pop_clip(&mut self) {
        self.list.pop_clip();
    }

    // ── internal ──────────────────────────────────────────────────────────

    fn stroke(&mut self, points: &[Vec2], closed: bool) {
        if points.len() < 2 {
            return;
        }
        self.list.push_stroke(
            points.to_vec(),
            closed,
            self.state.stroke_width,
            self.state.transform,
            self.state.color,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::DrawCmd;

    #[test]
    fn restore_returns_to_saved_state() {
        let mut list = DrawList::new();
        let mut c = Canvas::new(&mut list);
        c.translate(1.0, 1.0);
        let before = c.state();

        c.save();
        c.rotate(1.0);
        c.scale(3.0, 3.0);
        c.set_color(Color::RED);
        c.set_stroke_width(7.0);
        c.restore();

        assert_eq!(c.state(), before);
        assert_eq!(c.depth(), 0);
    }

    #[test]
    fn nested_scopes_unwind_in_order() {
        let mut list = DrawList::new();
        let mut c = Canvas::new(&mut list);
        c.scoped(|c| {
            c.translate(5.0, 0.0);
            let outer = c.state();
            c.scoped(|c| {
                c.scale(2.0, 2.0);
                assert_eq!(c.depth(), 2);
            });
            assert_eq!(c.state(), outer);
        });
        assert_eq!(c.state(), DrawState::default());
    }

    #[test]
    fn shapes_capture_current_state() {
        let mut list = DrawList::new();
        {
            let mut c = Canvas::new(&mut list);
            c.translate(2.0, 3.0);
            c.set_color(Color::BLUE);
            c.set_stroke_width(4.0);
            c.fill_rect_local(0.0, 0.0, 1.0, 1.0);
            c.stroke_polyline(&[Vec2::zero(), Vec2::new(1.0, 0.0)]);
        }

        let DrawCmd::Fill(fill) = &list.items()[0].cmd else { panic!("expected fill") };
        assert_eq!(fill.color, Color::BLUE);
        assert_eq!(fill.transform.apply(Vec2::zero()), Vec2::new(2.0, 3.0));

        let DrawCmd::Stroke(stroke) = &list.items()[1].cmd else { panic!("expected stroke") };
        assert_eq!(stroke.width, 4.0);
        assert!(!stroke.closed);
    }

    #[test]
    fn degenerate_shapes_are_dropped() {
        let mut list = DrawList::new();
        {
            let mut c = Canvas::new(&mut list);
            c.fill_polygon(&[Vec2::zero(), Vec2::new(1.0, 0.0)]);
            c.stroke_polygon(&[Vec2::zero()]);
        }
        assert!(list.is_empty());
    }
}
