//! The fixed scene: six flowers, three bars and three triangles.

use hierarchy_engine::coords::{LogicalWindow, Rect, Vec2, Viewport};
use hierarchy_engine::paint::Color;
use hierarchy_engine::scene::Canvas;

use crate::primitives::{bar, rotating_shape, triangle};

/// `(radius, center)` of every flower, back to front.
pub const FLOWERS: [(f64, Vec2); 6] = [
    (100.0, Vec2::new(-1.02, -0.05)),
    (100.0, Vec2::new(1.04, -0.98)),
    (80.0, Vec2::new(-1.379, 1.40)),
    (80.0, Vec2::new(-3.13, 2.23)),
    (60.0, Vec2::new(0.9, 2.05)),
    (60.0, Vec2::new(2.12, 1.45)),
];

/// `(scale, offset)` of every bar.
pub const BARS: [(Vec2, Vec2); 3] = [
    (Vec2::new(1.0, 1.05), Vec2::new(0.0, -0.5)),
    (Vec2::new(0.85, 0.95), Vec2::new(-2.65, 1.90)),
    (Vec2::new(0.6, 0.70), Vec2::new(2.5, 2.5)),
];

/// `(scale, offset)` of every triangle; colors are in [`triangle_colors`].
pub const TRIANGLES: [(Vec2, Vec2); 3] = [
    (Vec2::new(0.5, 0.5), Vec2::new(0.0, -2.0)),
    (Vec2::new(0.35, 0.35), Vec2::new(-2.25, 0.75)),
    (Vec2::new(0.25, 0.25), Vec2::new(1.5, 1.0)),
];

pub fn triangle_colors() -> [Color; 3] {
    [Color::BLUE, Color::pink(), Color::GREEN]
}

/// Draws the whole scene in world coordinates at animation `frame`.
///
/// Later shapes paint over earlier ones.
pub fn draw_world(canvas: &mut Canvas<'_>, frame: u64) {
    for (radius, offset) in FLOWERS {
        rotating_shape(canvas, frame, radius, offset);
    }
    for (scale, offset) in BARS {
        bar(canvas, scale, offset);
    }
    for ((scale, offset), color) in TRIANGLES.into_iter().zip(triangle_colors()) {
        triangle(canvas, scale, offset, color);
    }
}

/// Paints the drawing area at `rect` (logical pixels): background, then the
/// scene mapped from `world` onto the area and clipped to it.
pub fn paint_display(
    canvas: &mut Canvas<'_>,
    rect: Rect,
    world: LogicalWindow,
    background: Color,
    frame: u64,
) {
    canvas.push_clip(rect);
    canvas.scoped(|c| {
        c.set_color(background);
        c.fill_rect(rect);

        let mapping = world.map_to(Viewport::new(rect.size.x, rect.size.y));
        c.translate(rect.origin.x, rect.origin.y);
        c.concat(mapping.transform);
        c.set_stroke_width(mapping.pixel_size);
        draw_world(c, frame);
    });
    canvas.pop_clip();
}

#[cfg(test)]
mod tests {
    use super::*;
    use hierarchy_engine::scene::{DrawCmd, DrawList};

    #[test]
    fn world_emits_strokes_then_bars_then_triangles() {
        let mut list = DrawList::new();
        {
            let mut c = Canvas::new(&mut list);
            draw_world(&mut c, 0);
        }

        let kinds: Vec<&str> = list
            .items()
            .iter()
            .map(|i| match &i.cmd {
                DrawCmd::Stroke(_) => "stroke",
                DrawCmd::Fill(_) => "fill",
                DrawCmd::Text(_) => "text",
            })
            .collect();
        let mut expected = vec!["stroke"; 6];
        expected.extend(["fill"; 6]);
        assert_eq!(kinds, expected);

        let colors: Vec<Color> = list.items()[6..]
            .iter()
            .map(|i| match &i.cmd {
                DrawCmd::Fill(f) => f.color,
                _ => Color::TRANSPARENT,
            })
            .collect();
        let [blue, pink, green] = triangle_colors();
        assert_eq!(colors, vec![Color::RED, Color::RED, Color::RED, blue, pink, green]);
    }

    #[test]
    fn display_maps_world_origin_to_rect_center() {
        let rect = Rect::new(4.0, 37.0, 800.0, 600.0);
        let world = LogicalWindow::new(-4.0, 4.0, 3.0, -3.0);

        let mut list = DrawList::new();
        {
            let mut c = Canvas::new(&mut list);
            paint_display(&mut c, rect, world, Color::WHITE, 0);
            assert_eq!(c.depth(), 0);
        }

        let DrawCmd::Fill(bg) = &list.items()[0].cmd else { panic!("expected background") };
        assert_eq!(bg.color, Color::WHITE);
        assert!(list.items().iter().all(|i| i.clip_rect == Some(rect)));

        // First flower center (-1.02, -0.05) → 100 px per unit, y up, plus the rect origin.
        let DrawCmd::Stroke(s) = &list.items()[1].cmd else { panic!("expected flower") };
        let p = s.transform.apply(Vec2::zero());
        assert!((p.x - (4.0 + 400.0 - 102.0)).abs() < 1e-2);
        assert!((p.y - (37.0 + 300.0 + 5.0)).abs() < 1e-2);
    }

    #[test]
    fn frames_only_change_flower_rotation() {
        let record = |frame| {
            let mut list = DrawList::new();
            {
                let mut c = Canvas::new(&mut list);
                draw_world(&mut c, frame);
            }
            list
        };
        let a = record(10);
        let b = record(370);
        let c = record(11);
        assert_eq!(a.items(), b.items());
        assert_ne!(a.items()[0], c.items()[0]);
        assert_eq!(a.items()[6..], c.items()[6..]);
    }
}
