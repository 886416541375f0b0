pub mod complex;
pub mod complex_df;
pub mod config;
pub mod double_float;
pub mod engine;
pub mod error;
pub mod fractal;
pub mod viewport;

// Re-export primary types for convenience.
pub use complex::Complex;
pub use complex_df::ComplexDF;
pub use config::FrameConfig;
pub use double_float::DoubleFloat;
pub use engine::{IterationEngine, ESCAPE_RADIUS_SQ};
pub use error::CoreError;
pub use fractal::{FractalParams, FractalVariant, IterationResult};
pub use viewport::Viewport;

/// Convenience result type for the core crate.
pub type Result<T> = std::result::Result<T, CoreError>;
