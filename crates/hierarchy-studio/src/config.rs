use std::time::Duration;

use hierarchy_engine::coords::{LogicalWindow, Rect, Vec2, Viewport};
use hierarchy_engine::paint::Color;
use hierarchy_engine::window::RuntimeConfig;
use winit::dpi::{LogicalPosition, LogicalSize};

/// Layout, timing and look of the panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelConfig {
    pub title: String,
    /// Outer window position on screen.
    pub position: Vec2,

    /// Size of the drawing area in logical pixels.
    pub display_size: Viewport,
    /// World coordinates shown in the drawing area.
    pub world: LogicalWindow,
    pub tick_period: Duration,

    /// Border around the whole content.
    pub border: f32,
    /// Height of the strip holding the checkbox.
    pub top_strip_height: f32,
    /// Gap between the strip and the drawing area.
    pub gap: f32,

    /// Border and gap.
    pub chrome_color: Color,
    /// Behind the checkbox.
    pub strip_color: Color,
    /// Drawing area background.
    pub background: Color,

    pub checkbox_label: String,
    pub font_size: f32,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            title: "Subroutine Hierarchy".to_string(),
            position: Vec2::new(100.0, 60.0),
            display_size: Viewport::new(800.0, 600.0),
            world: LogicalWindow::new(-4.0, 4.0, 3.0, -3.0),
            tick_period: Duration::from_millis(17),
            border: 4.0,
            top_strip_height: 28.0,
            gap: 5.0,
            chrome_color: Color::dark_gray(),
            strip_color: Color::from_srgb_u8(238, 238, 238, 255),
            background: Color::WHITE,
            checkbox_label: "Run Animation".to_string(),
            font_size: 13.0,
        }
    }
}

impl PanelConfig {
    /// Inner window size that fits the chrome around the drawing area exactly.
    pub fn window_size(&self) -> Vec2 {
        Vec2::new(
            self.display_size.width + 2.0 * self.border,
            self.display_size.height + self.top_strip_height + self.gap + 2.0 * self.border,
        )
    }

    pub fn strip_rect(&self) -> Rect {
        Rect::new(self.border, self.border, self.display_size.width, self.top_strip_height)
    }

    pub fn display_rect(&self) -> Rect {
        Rect::new(
            self.border,
            self.border + self.top_strip_height + self.gap,
            self.display_size.width,
            self.display_size.height,
        )
    }

    /// Fixed-size window sized to the panel.
    pub fn runtime_config(&self) -> RuntimeConfig {
        let size = self.window_size();
        RuntimeConfig {
            title: self.title.clone(),
            initial_size: LogicalSize::new(size.x as f64, size.y as f64),
            position: Some(LogicalPosition::new(self.position.x as f64, self.position.y as f64)),
            resizable: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_sits_below_strip_and_gap() {
        let cfg = PanelConfig::default();
        assert_eq!(cfg.strip_rect(), Rect::new(4.0, 4.0, 800.0, 28.0));
        assert_eq!(cfg.display_rect(), Rect::new(4.0, 37.0, 800.0, 600.0));
        assert_eq!(cfg.window_size(), Vec2::new(808.0, 641.0));
        assert_eq!(cfg.display_rect().max().y + cfg.border, cfg.window_size().y);
    }

    #[test]
    fn runtime_window_is_fixed_size() {
        let rc = PanelConfig::default().runtime_config();
        assert_eq!(rc.title, "Subroutine Hierarchy");
        assert!(!rc.resizable);
        assert_eq!(rc.initial_size, LogicalSize::new(808.0, 641.0));
        assert_eq!(rc.position, Some(LogicalPosition::new(100.0, 60.0)));
    }
}
