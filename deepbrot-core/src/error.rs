use thiserror::Error;

/// Errors originating from the core fractal engine.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown fractal variant index: {0} (expected 0..=3)")]
    UnknownVariantIndex(u32),

    #[error("unknown fractal variant name: {0:?}")]
    UnknownVariantName(String),

    #[error("invalid viewport: {reason}")]
    InvalidViewport { reason: String },
}
