//! Subroutine Hierarchy: a 2D scene built from nested transforms, animated
//! by a frame timer that a "Run Animation" checkbox starts and stops.

pub mod config;
pub mod driver;
pub mod panel;
pub mod primitives;
pub mod widgets;
pub mod world;

pub use config::PanelConfig;
pub use panel::Panel;
