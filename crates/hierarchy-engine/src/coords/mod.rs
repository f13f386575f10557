//! Coordinate and geometry types shared across the scene, renderers and UI.
//!
//! Canonical CPU space:
//! - Logical pixels (DPI-aware)
//! - Origin top-left
//! - +X right, +Y down
//!
//! Application geometry may live in any logical window; [`LogicalWindow`]
//! produces the [`Transform`] that maps it onto a pixel viewport.
//! Renderers convert pixels to NDC in shaders using a viewport uniform.

mod limits;
mod rect;
mod transform;
mod vec2;
mod viewport;

pub use limits::{LogicalWindow, Mapping};
pub use rect::Rect;
pub use transform::Transform;
pub use vec2::Vec2;
pub use viewport::Viewport;
