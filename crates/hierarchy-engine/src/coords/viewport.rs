/// Size of a drawing surface in logical pixels.
///
/// Renderers upload the window viewport to their uniform buffer for NDC
/// conversion; the application also uses it for the canvas area handed to
/// [`LogicalWindow::map_to`](super::LogicalWindow::map_to).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Height divided by width.
    #[inline]
    pub fn aspect(self) -> f32 {
        (self.height / self.width).abs()
    }
}
