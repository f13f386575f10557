//! Shape renderers.

mod common;

pub mod mesh;
pub mod text;

pub use mesh::MeshRenderer;
pub use text::TextRenderer;
