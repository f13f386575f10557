use super::{Transform, Viewport};

/// Requested logical coordinate bounds for a viewport.
///
/// `y_bottom` may be less than `y_top`; the mapping then flips the y-axis so
/// that positive y points up on screen. The same holds for `x_right < x_left`.
///
/// Spans must be non-zero. Zero-width or zero-height windows are a contract
/// violation (debug-asserted), not a handled error.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LogicalWindow {
    pub x_left: f32,
    pub x_right: f32,
    pub y_top: f32,
    pub y_bottom: f32,
    /// When `false` the requested rectangle exactly fills the viewport and the
    /// horizontal and vertical units may differ. When `true` one axis is
    /// widened symmetrically so that the displayed aspect ratio matches the
    /// viewport's.
    pub preserve_aspect: bool,
}

/// Result of mapping a [`LogicalWindow`] onto a [`Viewport`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Mapping {
    /// Logical → viewport-pixel transform.
    pub transform: Transform,
    /// Logical units covered by one pixel (minimum of both axes).
    pub pixel_size: f32,
    /// Bounds actually displayed, after aspect adjustment.
    pub displayed: LogicalWindow,
}

impl LogicalWindow {
    #[inline]
    pub const fn new(x_left: f32, x_right: f32, y_top: f32, y_bottom: f32) -> Self {
        Self { x_left, x_right, y_top, y_bottom, preserve_aspect: false }
    }

    #[inline]
    pub const fn preserving_aspect(mut self, v: bool) -> Self {
        self.preserve_aspect = v;
        self
    }

    #[inline]
    pub fn span_x(self) -> f32 {
        self.x_right - self.x_left
    }

    #[inline]
    pub fn span_y(self) -> f32 {
        self.y_bottom - self.y_top
    }

    /// Height/width ratio of the window in logical units, unsigned.
    #[inline]
    pub fn aspect(self) -> f32 {
        (self.span_y() / self.span_x()).abs()
    }

    /// Computes the transform that makes this window visible in `viewport`.
    ///
    /// The transform is `scale(w / span_x, h / span_y)` followed by
    /// `translate(-x_left, -y_top)`, applied in that order so the translation
    /// happens in the pre-scale logical frame.
    pub fn map_to(self, viewport: Viewport) -> Mapping {
        debug_assert!(self.span_x() != 0.0, "LogicalWindow: zero horizontal span");
        debug_assert!(self.span_y() != 0.0, "LogicalWindow: zero vertical span");
        debug_assert!(viewport.is_valid(), "LogicalWindow: invalid viewport {viewport:?}");

        let mut w = self;
        if w.preserve_aspect {
            let display_aspect = viewport.aspect();
            let requested_aspect = w.aspect();
            if display_aspect > requested_aspect {
                let excess = w.span_y() * (display_aspect / requested_aspect - 1.0);
                w.y_bottom += excess / 2.0;
                w.y_top -= excess / 2.0;
            } else if display_aspect < requested_aspect {
                let excess = w.span_x() * (requested_aspect / display_aspect - 1.0);
                w.x_right += excess / 2.0;
                w.x_left -= excess / 2.0;
            }
        }

        let pixel_width = (w.span_x() / viewport.width).abs();
        let pixel_height = (w.span_y() / viewport.height).abs();

        let mut transform = Transform::identity();
        transform.scale(viewport.width / w.span_x(), viewport.height / w.span_y());
        transform.translate(-w.x_left, -w.y_top);

        Mapping {
            transform,
            pixel_size: pixel_width.min(pixel_height),
            displayed: w,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;

    const EPS: f32 = 1e-4;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a.x - b.x).abs() < EPS && (a.y - b.y).abs() < EPS
    }

    fn demo_window() -> LogicalWindow {
        LogicalWindow::new(-4.0, 4.0, 3.0, -3.0)
    }

    #[test]
    fn pixel_size_is_min_of_axes() {
        let m = demo_window().map_to(Viewport::new(800.0, 600.0));
        assert!((m.pixel_size - 0.01).abs() < 1e-6);

        let m = LogicalWindow::new(0.0, 10.0, 0.0, 2.0).map_to(Viewport::new(100.0, 100.0));
        assert!((m.pixel_size - 0.02).abs() < 1e-6);
    }

    #[test]
    fn unpreserved_window_fills_viewport_exactly() {
        let vp = Viewport::new(800.0, 500.0);
        let m = LogicalWindow::new(-1.0, 3.0, 2.0, -2.0).map_to(vp);

        assert!(close(m.transform.apply(Vec2::new(-1.0, 2.0)), Vec2::new(0.0, 0.0)));
        assert!(close(m.transform.apply(Vec2::new(3.0, -2.0)), Vec2::new(800.0, 500.0)));
        assert_eq!(m.displayed, LogicalWindow::new(-1.0, 3.0, 2.0, -2.0));
    }

    #[test]
    fn flipped_y_points_up() {
        let m = demo_window().map_to(Viewport::new(800.0, 600.0));
        let origin = m.transform.apply(Vec2::new(0.0, 0.0));
        let up = m.transform.apply(Vec2::new(0.0, 1.0));
        assert!(close(origin, Vec2::new(400.0, 300.0)));
        assert!(up.y < origin.y);
    }

    #[test]
    fn preserved_aspect_widens_x_when_viewport_is_wide() {
        let vp = Viewport::new(800.0, 600.0);
        let m = LogicalWindow::new(-1.0, 1.0, 1.0, -1.0).preserving_aspect(true).map_to(vp);

        assert!((m.displayed.aspect() - vp.aspect()).abs() < EPS);
        assert!((m.displayed.x_right - 4.0 / 3.0).abs() < EPS);
        assert!((m.displayed.x_left + 4.0 / 3.0).abs() < EPS);
        assert_eq!(m.displayed.y_top, 1.0);
        assert_eq!(m.displayed.y_bottom, -1.0);
    }

    #[test]
    fn preserved_aspect_widens_y_when_viewport_is_tall() {
        let vp = Viewport::new(300.0, 600.0);
        let m = LogicalWindow::new(0.0, 4.0, 0.0, 4.0).preserving_aspect(true).map_to(vp);

        assert!((m.displayed.aspect() - vp.aspect()).abs() < EPS);
        assert!((m.displayed.y_top + 2.0).abs() < EPS);
        assert!((m.displayed.y_bottom - 6.0).abs() < EPS);
        // Equal units on both axes.
        let a = m.transform.apply(Vec2::new(0.0, 0.0));
        let b = m.transform.apply(Vec2::new(1.0, 1.0));
        assert!(((b.x - a.x) - (b.y - a.y)).abs() < EPS);
    }

    #[test]
    fn preserved_aspect_is_noop_when_ratios_match() {
        let vp = Viewport::new(800.0, 600.0);
        let m = demo_window().preserving_aspect(true).map_to(vp);
        assert_eq!(m.displayed.x_left, -4.0);
        assert_eq!(m.displayed.y_bottom, -3.0);
    }
}
