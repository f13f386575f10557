//! GPU rendering subsystem.
//!
//! Renderers consume `scene` draw streams and issue GPU commands via wgpu.
//! Each renderer is responsible for its own GPU resources (pipelines, buffers).
//!
//! Convention:
//! - CPU geometry is in logical pixels (top-left origin, +Y down).
//! - Vertex shader converts to NDC using a viewport uniform.
//! - Every pipeline is built for the frame's MSAA sample count.

mod ctx;
pub mod shapes;
pub(crate) mod tessellate;

pub use ctx::{RenderCtx, RenderTarget};
