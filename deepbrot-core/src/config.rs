//! Frame description supplied by a host: everything needed to render one image.

use serde::{Deserialize, Serialize};

use crate::complex_df::ComplexDF;
use crate::fractal::FractalParams;
use crate::viewport::Viewport;

/// One frame's worth of inputs.
///
/// Missing fields fall back to the default overview of the Mandelbrot set,
/// so a partial JSON file is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameConfig {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default = "default_center")]
    pub center: ComplexDF,
    #[serde(default = "default_zoom")]
    pub zoom: f64,
    #[serde(default)]
    pub fractal: FractalParams,
    /// Built-in palette id (`classic`, `fire`, …).
    #[serde(default = "default_palette")]
    pub palette: String,
}

fn default_width() -> u32 {
    800
}

fn default_height() -> u32 {
    600
}

fn default_center() -> ComplexDF {
    ComplexDF::from_f64(-0.5, 0.0)
}

fn default_zoom() -> f64 {
    Viewport::DEFAULT_ZOOM
}

fn default_palette() -> String {
    "classic".to_string()
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            center: default_center(),
            zoom: default_zoom(),
            fractal: FractalParams::default(),
            palette: default_palette(),
        }
    }
}

impl FrameConfig {
    /// Validated viewport for this frame.
    pub fn viewport(&self) -> crate::Result<Viewport> {
        Viewport::new(self.center, self.zoom, self.width, self.height)
    }
}
