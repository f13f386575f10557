pub(crate) mod path;
pub(crate) mod text;

pub use path::{FillCmd, StrokeCmd};
pub use text::TextCmd;
