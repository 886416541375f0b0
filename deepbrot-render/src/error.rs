use thiserror::Error;

/// Errors originating from the rendering pipeline.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The parallel kernel could not be brought up. Rendering is unavailable;
    /// there is no degraded fallback.
    #[error("render kernel unavailable: {0}")]
    KernelUnavailable(#[from] rayon::ThreadPoolBuildError),

    #[error("invalid image dimensions: {width}×{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("unknown palette: {0:?}")]
    UnknownPalette(String),

    #[error("render cancelled")]
    Cancelled,

    #[error(transparent)]
    Core(#[from] deepbrot_core::CoreError),
}
