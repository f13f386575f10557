//! Shape subroutines of the hierarchical model.
//!
//! Every routine draws in its own local frame inside `Canvas::scoped`, so the
//! caller's transform, color and stroke width are untouched on return.

use std::f64::consts::TAU;
use std::f32::consts::FRAC_PI_8;

use hierarchy_engine::coords::Vec2;
use hierarchy_engine::paint::Color;
use hierarchy_engine::scene::Canvas;

/// Spokes of a rotating flower.
pub const FLOWER_VERTICES: usize = 13;

/// Unscaled flower radius is in these units; 0.005 of them make one world unit.
const FLOWER_SCALE: f32 = 0.005;
const FLOWER_STROKE_WIDTH: f32 = 2.0;

const BAR_LENGTH: f32 = 2.3;
const BAR_THICKNESS: f32 = 0.15;

const TRIANGLE: [Vec2; 3] = [Vec2::new(0.0, 3.0), Vec2::new(1.0, 0.0), Vec2::new(-1.0, 0.0)];

/// Fills the unit square centered at the origin with the current color.
pub fn filled_square(canvas: &mut Canvas<'_>) {
    canvas.fill_rect_local(-0.5, -0.5, 1.0, 1.0);
}

/// Outline of a flower with [`FLOWER_VERTICES`] petals around the origin.
///
/// Vertices sit on integer coordinates, truncated toward zero. The outline
/// visits `p0, O`, then `p(i-1), p(i), O` for every later vertex, and ends
/// with `p0, p12`, so each petal is a triangle sharing the center.
pub fn flower_outline(radius: f64) -> Vec<Vec2> {
    let step = TAU / FLOWER_VERTICES as f64;
    let vertex = |i: usize| {
        let a = i as f64 * step;
        Vec2::new((radius * a.sin()) as i32 as f32, (radius * a.cos()) as i32 as f32)
    };

    let mut points = Vec::with_capacity(3 * FLOWER_VERTICES + 1);
    points.push(vertex(0));
    points.push(Vec2::zero());
    for i in 1..FLOWER_VERTICES {
        points.push(vertex(i - 1));
        points.push(vertex(i));
        points.push(Vec2::zero());
    }
    points.push(vertex(0));
    points.push(vertex(FLOWER_VERTICES - 1));
    points
}

/// Rotation of the flowers at `frame`, in radians. One degree per frame.
pub fn rotation_at(frame: u64) -> f32 {
    ((frame % 360) as f32).to_radians()
}

/// Strokes a black flower of `radius` centered at `offset`, turned by the frame count.
pub fn rotating_shape(canvas: &mut Canvas<'_>, frame: u64, radius: f64, offset: Vec2) {
    let outline = flower_outline(radius);
    canvas.scoped(|c| {
        c.set_stroke_width(FLOWER_STROKE_WIDTH);
        c.translate(offset.x, offset.y);
        c.set_color(Color::BLACK);
        c.rotate(rotation_at(frame));
        c.scale(FLOWER_SCALE, FLOWER_SCALE);
        c.stroke_polygon(&outline);
    });
}

/// Fills a red bar tilted by -π/8 at `offset`, in a frame pre-scaled by `scale`.
pub fn bar(canvas: &mut Canvas<'_>, scale: Vec2, offset: Vec2) {
    canvas.scoped(|c| {
        c.scale(scale.x, scale.y);
        c.set_color(Color::RED);
        c.translate(offset.x, offset.y);
        c.rotate(-FRAC_PI_8);
        c.scale(BAR_LENGTH, BAR_THICKNESS);
        filled_square(c);
    });
}

/// Fills the triangle `(0,3) (1,0) (-1,0)` in `color`, scaled and placed at `offset`.
pub fn triangle(canvas: &mut Canvas<'_>, scale: Vec2, offset: Vec2, color: Color) {
    canvas.scoped(|c| {
        c.set_color(color);
        c.translate(offset.x, offset.y);
        c.scale(scale.x, scale.y);
        c.fill_polygon(&TRIANGLE);
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use hierarchy_engine::coords::Transform;
    use hierarchy_engine::scene::{DrawCmd, DrawList};

    fn base_canvas(list: &mut DrawList) -> Canvas<'_> {
        let mut c = Canvas::new(list);
        c.translate(400.0, 300.0);
        c.scale(100.0, -100.0);
        c.set_stroke_width(0.01);
        c.set_color(Color::pink());
        c
    }

    fn close(a: Vec2, b: Vec2) -> bool {
        (a.x - b.x).abs() < 1e-3 && (a.y - b.y).abs() < 1e-3
    }

    #[test]
    fn flower_outline_interleaves_center() {
        let pts = flower_outline(100.0);
        assert_eq!(pts.len(), 40);

        let p0 = Vec2::new(0.0, 100.0);
        assert_eq!(pts[0], p0);
        assert_eq!(pts[1], Vec2::zero());
        // i = 1: p0, p1, O
        assert_eq!(pts[2], p0);
        assert_eq!(pts[4], Vec2::zero());
        assert_eq!(pts[5], pts[3]);
        // closing pair: p0, p12
        assert_eq!(pts[38], p0);
        assert_eq!(pts[39], pts[36]);
        for i in 0..12 {
            assert_eq!(pts[4 + 3 * i], Vec2::zero());
        }
    }

    #[test]
    fn flower_vertices_truncate_toward_zero() {
        let pts = flower_outline(100.0);
        // p1: 100·sin(2π/13) = 46.47.., 100·cos(2π/13) = 88.54..
        assert_eq!(pts[3], Vec2::new(46.0, 88.0));
        // p7: 100·sin(14π/13) = -23.93.., 100·cos(14π/13) = -97.09..
        assert_eq!(pts[21], Vec2::new(-23.0, -97.0));
        assert!(pts.iter().all(|p| p.x.fract() == 0.0 && p.y.fract() == 0.0));
    }

    #[test]
    fn rotation_is_frame_degrees_mod_360() {
        for f in [0u64, 1, 45, 359, 360, 361, 719, 1_000_003, u64::MAX] {
            let expected = ((f % 360) as f32).to_radians();
            assert_eq!(rotation_at(f), expected, "frame {f}");
        }
        assert_eq!(rotation_at(360), rotation_at(0));
        assert_eq!(rotation_at(725), rotation_at(5));
    }

    #[test]
    fn primitives_restore_caller_state() {
        let mut list = DrawList::new();
        let mut c = base_canvas(&mut list);
        let before = c.state();
        let depth = c.depth();

        rotating_shape(&mut c, 77, 80.0, Vec2::new(-1.379, 1.4));
        assert_eq!(c.state(), before);
        bar(&mut c, Vec2::new(0.85, 0.95), Vec2::new(-2.65, 1.9));
        assert_eq!(c.state(), before);
        triangle(&mut c, Vec2::new(0.35, 0.35), Vec2::new(-2.25, 0.75), Color::BLUE);
        assert_eq!(c.state(), before);
        filled_square(&mut c);
        assert_eq!(c.state(), before);
        assert_eq!(c.depth(), depth);
    }

    #[test]
    fn rotating_shape_strokes_black_with_local_width() {
        let mut list = DrawList::new();
        {
            let mut c = base_canvas(&mut list);
            rotating_shape(&mut c, 90, 100.0, Vec2::new(1.0, 0.0));
        }
        let DrawCmd::Stroke(s) = &list.items()[0].cmd else { panic!("expected stroke") };
        assert_eq!(s.color, Color::BLACK);
        assert_eq!(s.width, FLOWER_STROKE_WIDTH);
        assert!(s.closed);
        assert_eq!(s.points.len(), 40);

        // Center lands on the offset; p0 = (0, 100) ends a quarter turn later at offset + (-0.5, 0).
        let mut world = Transform::identity();
        world.translate(400.0, 300.0);
        world.scale(100.0, -100.0);
        assert!(close(s.transform.apply(Vec2::zero()), world.apply(Vec2::new(1.0, 0.0))));
        assert!(close(s.transform.apply(Vec2::new(0.0, 100.0)), world.apply(Vec2::new(0.5, 0.0))));
    }

    #[test]
    fn bar_is_red_and_tilted() {
        let mut list = DrawList::new();
        {
            let mut c = Canvas::new(&mut list);
            bar(&mut c, Vec2::new(1.0, 1.0), Vec2::new(0.0, 0.0));
        }
        let DrawCmd::Fill(f) = &list.items()[0].cmd else { panic!("expected fill") };
        assert_eq!(f.color, Color::RED);
        let (scale, angle, _) = f.transform.to_scale_angle_translation();
        assert!((angle + FRAC_PI_8).abs() < 1e-5);
        assert!(close(scale, Vec2::new(BAR_LENGTH, BAR_THICKNESS)));
    }

    #[test]
    fn triangle_apex_is_scaled_and_offset() {
        let mut list = DrawList::new();
        {
            let mut c = Canvas::new(&mut list);
            triangle(&mut c, Vec2::new(0.5, 0.5), Vec2::new(0.0, -2.0), Color::GREEN);
        }
        let DrawCmd::Fill(f) = &list.items()[0].cmd else { panic!("expected fill") };
        assert_eq!(f.color, Color::GREEN);
        assert!(close(f.transform.apply(f.points[0]), Vec2::new(0.0, -0.5)));
        assert!(close(f.transform.apply(f.points[2]), Vec2::new(-0.5, -2.0)));
    }
}
