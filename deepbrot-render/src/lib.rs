pub mod buffer;
pub mod context;
pub mod error;
pub mod iteration_buffer;
pub mod palette;
pub mod renderer;
pub mod smooth;

pub use buffer::RenderBuffer;
pub use context::{FrameOutput, FrameRequest, RenderContext};
pub use error::RenderError;
pub use iteration_buffer::IterationBuffer;
pub use palette::{builtin_palettes, ColorStop, Palette, PaletteTable, PALETTE_CYCLES};
pub use renderer::{render, render_generation, RenderCancel, RenderResult};
pub use smooth::smooth_iteration;

/// Convenience result type for the render crate.
pub type Result<T> = std::result::Result<T, RenderError>;
