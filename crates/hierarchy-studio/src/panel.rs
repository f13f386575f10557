use std::time::Instant;

use hierarchy_engine::coords::Rect;
use hierarchy_engine::core::{App, AppControl, FrameCtx, Wake};
use hierarchy_engine::render::shapes::{MeshRenderer, TextRenderer};
use hierarchy_engine::scene::{Canvas, DrawList};
use hierarchy_engine::text::{FontId, FontSystem};

use crate::config::PanelConfig;
use crate::driver::FrameDriver;
use crate::widgets::{Checkbox, UiInput};
use crate::world::paint_display;

/// The application window: a checkbox strip above the animated drawing area.
pub struct Panel {
    config: PanelConfig,
    driver: FrameDriver,
    checkbox: Checkbox,
    fonts: FontSystem,

    draw_list: DrawList,
    mesh_renderer: MeshRenderer,
    text_renderer: TextRenderer,
}

impl Panel {
    /// `font` labels the checkbox; without one only the box is shown.
    pub fn new(config: PanelConfig, fonts: FontSystem, font: Option<FontId>) -> Self {
        let checkbox = Checkbox::new(config.checkbox_label.clone())
            .font(font)
            .font_size(config.font_size);
        Self {
            driver: FrameDriver::new(config.tick_period),
            config,
            checkbox,
            fonts,
            draw_list: DrawList::new(),
            mesh_renderer: MeshRenderer::new(),
            text_renderer: TextRenderer::new(),
        }
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    pub fn driver(&self) -> &FrameDriver {
        &self.driver
    }

    pub fn is_animating(&self) -> bool {
        self.checkbox.is_checked()
    }

    pub fn checkbox_rect(&self) -> Rect {
        self.checkbox.centered_in(self.config.strip_rect(), &self.fonts)
    }

    /// Applies `input` and records the whole window into the draw list.
    pub fn build_frame(&mut self, input: &UiInput, now: Instant) -> &DrawList {
        let cb_rect = self.checkbox_rect();
        if self.checkbox.update(cb_rect, input) {
            self.driver.set_running(self.checkbox.is_checked(), now);
        }

        let size = self.config.window_size();
        self.draw_list.clear();
        let mut canvas = Canvas::new(&mut self.draw_list);

        canvas.set_color(self.config.chrome_color);
        canvas.fill_rect(Rect::new(0.0, 0.0, size.x, size.y));
        canvas.set_color(self.config.strip_color);
        canvas.fill_rect(self.config.strip_rect());

        paint_display(
            &mut canvas,
            self.config.display_rect(),
            self.config.world,
            self.config.background,
            self.driver.frame(),
        );

        self.checkbox.paint(&mut canvas, cb_rect, input);

        &self.draw_list
    }
}

impl App for Panel {
    fn on_wake(&mut self, now: Instant) -> Wake {
        Wake {
            redraw: self.driver.poll(now),
            deadline: self.driver.next_deadline(),
        }
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let input = UiInput::from_frame(ctx.input, ctx.input_frame);
        self.build_frame(&input, Instant::now());

        let dl = &self.draw_list;
        let fonts = &self.fonts;
        let mesh = &mut self.mesh_renderer;
        let text = &mut self.text_renderer;

        ctx.render(self.config.chrome_color, |rctx, target| {
            mesh.render(rctx, target, dl);
            text.render(rctx, target, dl, fonts);
        })
    }
}
