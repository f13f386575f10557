//! Hierarchy engine crate.
//!
//! Platform + GPU runtime pieces for a single-window 2D canvas: a winit
//! event loop, a wgpu surface, a retained transform-stack canvas and the
//! renderers that draw it.

pub mod core;
pub mod device;
pub mod input;
pub mod time;
pub mod window;

pub mod coords;
pub mod logging;
pub mod paint;
pub mod render;
pub mod scene;
pub mod text;
