use std::time::Instant;

use winit::event::WindowEvent;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// What the application wants from the event loop before it sleeps.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Wake {
    /// Request one redraw now.
    pub redraw: bool,
    /// Wake the loop no later than this instant. `None` sleeps until the next event.
    pub deadline: Option<Instant>,
}

impl Wake {
    /// Nothing to do until the next platform event.
    #[inline]
    pub const fn idle() -> Self {
        Self { redraw: false, deadline: None }
    }
}

/// Application contract implemented by higher layers.
///
/// The runtime redraws on input, resize and window creation. Anything else
/// (timers, animation) is driven through [`on_wake`](Self::on_wake).
pub trait App {
    /// Called for window events, before the runtime handles them.
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Called each time the event loop is about to wait.
    fn on_wake(&mut self, now: Instant) -> Wake {
        let _ = now;
        Wake::idle()
    }

    /// Called once per rendered frame.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
