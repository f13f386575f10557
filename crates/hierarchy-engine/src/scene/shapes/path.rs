use crate::coords::{Transform, Vec2};
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList};

/// Filled polygon payload.
///
/// `points` are in local coordinates; `transform` maps them to logical pixels.
/// Self-intersecting outlines are filled with the even-odd rule.
#[derive(Debug, Clone, PartialEq)]
pub struct FillCmd {
    pub points: Vec<Vec2>,
    pub transform: Transform,
    pub color: Color,
}

/// Stroked outline payload.
///
/// `width` is measured in local units, so it scales with `transform`
/// exactly like the geometry does.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeCmd {
    pub points: Vec<Vec2>,
    pub closed: bool,
    pub width: f32,
    pub transform: Transform,
    pub color: Color,
}

impl DrawList {
    /// Records a filled polygon.
    #[inline]
    pub fn push_fill(&mut self, points: Vec<Vec2>, transform: Transform, color: Color) {
        self.push(DrawCmd::Fill(FillCmd { points, transform, color }));
    }

    /// Records a stroked outline.
    #[inline]
    pub fn push_stroke(
        &mut self,
        points: Vec<Vec2>,
        closed: bool,
        width: f32,
        transform: Transform,
        color: Color,
    ) {
        self.push(DrawCmd::Stroke(StrokeCmd { points, closed, width, transform, color }));
    }
}
