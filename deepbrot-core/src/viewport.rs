use crate::complex::Complex;
use crate::complex_df::ComplexDF;
use crate::error::CoreError;

/// Defines the visible region of the complex plane and maps pixels into it.
///
/// The viewport is centred on `center` (double-float), and `zoom` fixes the
/// vertical span of the frame at `1 / zoom` plane units. The horizontal span
/// follows from the aspect ratio.
///
/// Absolute positions carry double-float precision; the offset of a pixel
/// from the center only spans a frame's worth of plane distance and is
/// computed in `f32`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Centre of the viewport in the complex plane.
    pub center: ComplexDF,

    /// Magnification; the frame is `1 / zoom` plane units tall.
    pub zoom: f64,

    /// Viewport width in pixels.
    pub width: u32,

    /// Viewport height in pixels.
    pub height: u32,
}

impl Viewport {
    pub const DEFAULT_ZOOM: f64 = 0.35;

    /// Default view: the whole Mandelbrot set, centred at `-0.5 + 0i`.
    pub fn default_mandelbrot(width: u32, height: u32) -> Self {
        Self {
            center: ComplexDF::from_f64(-0.5, 0.0),
            zoom: Self::DEFAULT_ZOOM,
            width,
            height,
        }
    }

    /// Default view for Julia sets, centred on the origin with `|z| < 2` visible.
    pub fn default_julia(width: u32, height: u32) -> Self {
        Self {
            center: ComplexDF::ZERO,
            zoom: 0.24,
            width,
            height,
        }
    }

    /// Create a viewport with explicit parameters.
    pub fn new(center: ComplexDF, zoom: f64, width: u32, height: u32) -> crate::Result<Self> {
        if width == 0 || height == 0 {
            return Err(CoreError::InvalidViewport {
                reason: format!("dimensions must be > 0, got {width}×{height}"),
            });
        }
        if zoom <= 0.0 || !zoom.is_finite() {
            return Err(CoreError::InvalidViewport {
                reason: format!("zoom must be positive and finite, got {zoom}"),
            });
        }
        Ok(Self {
            center,
            zoom,
            width,
            height,
        })
    }

    /// Native-precision offset of a pixel centre from the viewport centre.
    ///
    /// `(0, 0)` is the top-left pixel; increasing `py` moves toward negative
    /// imaginary values.
    #[inline]
    pub fn pixel_offset(&self, px: u32, py: u32) -> Complex {
        let w = self.width as f32;
        let h = self.height as f32;
        let zoom = self.zoom as f32;
        let u = (px as f32 + 0.5) / w;
        let v = 1.0 - (py as f32 + 0.5) / h;
        let aspect = w / h;
        Complex::new((u - 0.5) * aspect / zoom, (v - 0.5) / zoom)
    }

    /// Map a pixel to its point on the complex plane in double-float.
    #[inline]
    pub fn pixel_to_complex(&self, px: u32, py: u32) -> ComplexDF {
        self.center + ComplexDF::from(self.pixel_offset(px, py))
    }

    /// The aspect ratio of the viewport (width / height).
    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    /// Horizontal extent in complex-plane units.
    pub fn complex_width(&self) -> f64 {
        self.aspect_ratio() / self.zoom
    }

    /// Vertical extent in complex-plane units.
    pub fn complex_height(&self) -> f64 {
        1.0 / self.zoom
    }

    /// Plane distance between adjacent pixels.
    pub fn pixel_spacing(&self) -> f64 {
        1.0 / (self.zoom * self.height as f64)
    }

    /// Shift the centre so the content moves by `(dx, dy)` pixels.
    ///
    /// Positive `dx` drags the image right, positive `dy` drags it down.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        let spacing = self.pixel_spacing();
        self.center = self.center + ComplexDF::from_f64(-dx * spacing, dy * spacing);
    }

    /// Multiply the zoom by `factor`, keeping the plane point under pixel
    /// `(px, py)` fixed on screen.
    pub fn zoom_about(&mut self, px: f64, py: f64, factor: f64) {
        let (before_re, before_im) = self.offset_f64(px, py);
        self.zoom *= factor;
        let (after_re, after_im) = self.offset_f64(px, py);
        self.center = self.center + ComplexDF::from_f64(before_re - after_re, before_im - after_im);
    }

    /// Host-side offset of a fractional pixel position, in `f64`.
    fn offset_f64(&self, px: f64, py: f64) -> (f64, f64) {
        let u = (px + 0.5) / self.width as f64;
        let v = 1.0 - (py + 0.5) / self.height as f64;
        (
            (u - 0.5) * self.aspect_ratio() / self.zoom,
            (v - 0.5) / self.zoom,
        )
    }
}
