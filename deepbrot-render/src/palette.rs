use deepbrot_core::IterationResult;
use rayon::prelude::*;

use crate::buffer::RenderBuffer;
use crate::error::RenderError;
use crate::iteration_buffer::IterationBuffer;
use crate::smooth::smooth_iteration;

/// Number of entries in a [`PaletteTable`].
pub const TABLE_SIZE: usize = 256;

/// How many times the palette repeats across the iteration range.
pub const PALETTE_CYCLES: f32 = 4.0;

/// Color used for points that never escaped.
pub const INSIDE_COLOR: [u8; 4] = [0, 0, 0, 255];

// ---------------------------------------------------------------------------
// Palette
// ---------------------------------------------------------------------------

/// A control point of a piecewise-linear gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    /// Position along the gradient, `0.0..=1.0`.
    pub position: f64,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ColorStop {
    pub const fn new(position: f64, r: u8, g: u8, b: u8) -> Self {
        Self { position, r, g, b }
    }

    #[inline]
    fn channels(&self) -> [f64; 3] {
        [self.r as f64, self.g as f64, self.b as f64]
    }
}

/// A named gradient defined by sparse color stops.
///
/// Stops are expected in non-decreasing position order, the first at `0.0`
/// and the last at `1.0`. This is not checked.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub id: String,
    pub stops: Vec<ColorStop>,
}

impl Palette {
    pub fn new(id: impl Into<String>, stops: Vec<ColorStop>) -> Self {
        Self {
            id: id.into(),
            stops,
        }
    }

    /// Look up a built-in palette by id.
    pub fn builtin(id: &str) -> crate::Result<Self> {
        builtin_palettes()
            .into_iter()
            .find(|p| p.id == id)
            .ok_or_else(|| RenderError::UnknownPalette(id.to_string()))
    }
}

impl Default for Palette {
    fn default() -> Self {
        classic()
    }
}

// ---------------------------------------------------------------------------
// Palette table
// ---------------------------------------------------------------------------

/// A 256-entry RGBA lookup table precomputed from a [`Palette`].
///
/// The table is a snapshot: it does not follow later edits to the palette
/// it was built from. Rebuild it whenever the palette changes.
#[derive(Debug, Clone, PartialEq)]
pub struct PaletteTable {
    palette_id: String,
    entries: [[u8; 4]; TABLE_SIZE],
}

impl PaletteTable {
    /// Interpolate the palette's stops into the table.
    ///
    /// Slot `i` samples the gradient at `t = i / 255`. The first stop pair
    /// bracketing `t` wins; a zero-width pair yields its left color.
    pub fn build(palette: &Palette) -> Self {
        let mut entries = [INSIDE_COLOR; TABLE_SIZE];
        let stops = &palette.stops;
        let (Some(first), Some(last)) = (stops.first(), stops.last()) else {
            return Self {
                palette_id: palette.id.clone(),
                entries,
            };
        };

        for (i, entry) in entries.iter_mut().enumerate() {
            let t = i as f64 / (TABLE_SIZE - 1) as f64;
            let (s0, s1) = stops
                .windows(2)
                .find(|w| t >= w[0].position && t <= w[1].position)
                .map_or((first, last), |w| (&w[0], &w[1]));

            let range = s1.position - s0.position;
            let f = if range > 0.0 {
                (t - s0.position) / range
            } else {
                0.0
            };

            let (c0, c1) = (s0.channels(), s1.channels());
            for ch in 0..3 {
                entry[ch] = (c0[ch] + (c1[ch] - c0[ch]) * f).round() as u8;
            }
            entry[3] = 255;
        }

        Self {
            palette_id: palette.id.clone(),
            entries,
        }
    }

    /// Id of the palette this table was built from.
    pub fn palette_id(&self) -> &str {
        &self.palette_id
    }

    pub fn entries(&self) -> &[[u8; 4]; TABLE_SIZE] {
        &self.entries
    }

    /// Sample the table at `u ∈ [0, 1]` with linear filtering.
    ///
    /// Behaves like a clamp-to-edge 1-D texture: entry `i` is centred at
    /// `(i + 0.5) / 256`.
    #[inline]
    pub fn sample(&self, u: f32) -> [u8; 4] {
        let x = (u * TABLE_SIZE as f32 - 0.5).clamp(0.0, (TABLE_SIZE - 1) as f32);
        let lo = x.floor() as usize;
        let hi = (lo + 1).min(TABLE_SIZE - 1);
        let frac = x - x.floor();
        lerp_color(self.entries[lo], self.entries[hi], frac)
    }

    /// Map a single iteration result to an RGBA color.
    ///
    /// Bounded points are [`INSIDE_COLOR`]. Escaped points sample the table
    /// at `frac(smooth / max_iterations · 4)`.
    #[inline]
    pub fn color(&self, result: IterationResult, max_iterations: u32) -> [u8; 4] {
        if !result.escaped() {
            return INSIDE_COLOR;
        }
        let smooth = smooth_iteration(result, max_iterations);
        self.sample(palette_position(smooth, max_iterations))
    }

    /// Colorize an entire iteration buffer into an RGBA pixel buffer.
    pub fn colorize(&self, iter_buf: &IterationBuffer) -> RenderBuffer {
        let max_iterations = iter_buf.max_iterations;
        let mut pixels = vec![0u8; iter_buf.data.len() * 4];
        pixels
            .par_chunks_mut(4)
            .zip(iter_buf.data.par_iter())
            .for_each(|(pixel, &result)| {
                pixel.copy_from_slice(&self.color(result, max_iterations));
            });
        RenderBuffer {
            width: iter_buf.width,
            height: iter_buf.height,
            pixels,
        }
    }
}

impl Default for PaletteTable {
    fn default() -> Self {
        Self::build(&Palette::default())
    }
}

/// Normalized lookup position `frac(smooth / max_iterations · PALETTE_CYCLES)`.
#[inline]
pub fn palette_position(smooth: f32, max_iterations: u32) -> f32 {
    (smooth / max_iterations as f32 * PALETTE_CYCLES).rem_euclid(1.0)
}

fn lerp_color(a: [u8; 4], b: [u8; 4], t: f32) -> [u8; 4] {
    let mix = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
    [mix(a[0], b[0]), mix(a[1], b[1]), mix(a[2], b[2]), 255]
}

// ---------------------------------------------------------------------------
// Builtin palettes
// ---------------------------------------------------------------------------

pub fn builtin_palettes() -> Vec<Palette> {
    vec![classic(), fire(), rainbow(), ocean(), mono(), neon()]
}

fn classic() -> Palette {
    Palette::new(
        "classic",
        vec![
            ColorStop::new(0.0, 0, 7, 100),
            ColorStop::new(0.16, 32, 107, 203),
            ColorStop::new(0.42, 237, 255, 255),
            ColorStop::new(0.6425, 255, 170, 0),
            ColorStop::new(0.8575, 0, 2, 0),
            ColorStop::new(1.0, 0, 7, 100),
        ],
    )
}

fn fire() -> Palette {
    Palette::new(
        "fire",
        vec![
            ColorStop::new(0.0, 0, 0, 0),
            ColorStop::new(0.25, 128, 0, 0),
            ColorStop::new(0.5, 255, 80, 0),
            ColorStop::new(0.75, 255, 220, 50),
            ColorStop::new(1.0, 255, 255, 255),
        ],
    )
}

fn rainbow() -> Palette {
    Palette::new(
        "rainbow",
        vec![
            ColorStop::new(0.0, 255, 0, 0),
            ColorStop::new(0.167, 255, 165, 0),
            ColorStop::new(0.333, 255, 255, 0),
            ColorStop::new(0.5, 0, 200, 0),
            ColorStop::new(0.667, 0, 100, 255),
            ColorStop::new(0.833, 128, 0, 255),
            ColorStop::new(1.0, 255, 0, 0),
        ],
    )
}

fn ocean() -> Palette {
    Palette::new(
        "ocean",
        vec![
            ColorStop::new(0.0, 0, 0, 40),
            ColorStop::new(0.3, 0, 40, 120),
            ColorStop::new(0.6, 0, 140, 200),
            ColorStop::new(0.8, 140, 220, 255),
            ColorStop::new(1.0, 230, 250, 255),
        ],
    )
}

fn mono() -> Palette {
    Palette::new(
        "mono",
        vec![ColorStop::new(0.0, 0, 0, 0), ColorStop::new(1.0, 255, 255, 255)],
    )
}

fn neon() -> Palette {
    Palette::new(
        "neon",
        vec![
            ColorStop::new(0.0, 10, 0, 20),
            ColorStop::new(0.2, 180, 0, 255),
            ColorStop::new(0.4, 0, 255, 200),
            ColorStop::new(0.6, 255, 255, 0),
            ColorStop::new(0.8, 255, 0, 100),
            ColorStop::new(1.0, 10, 0, 20),
        ],
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn rgb(entry: [u8; 4]) -> [u8; 3] {
        [entry[0], entry[1], entry[2]]
    }

    #[test]
    fn table_hits_stop_colors_exactly() {
        // 51/255 == 0.2, so slot 51 lands exactly on the second stop.
        let p = Palette::new(
            "test",
            vec![
                ColorStop::new(0.0, 10, 20, 30),
                ColorStop::new(0.2, 200, 100, 50),
                ColorStop::new(1.0, 0, 255, 128),
            ],
        );
        let table = PaletteTable::build(&p);
        assert_eq!(rgb(table.entries()[0]), [10, 20, 30]);
        assert_eq!(rgb(table.entries()[51]), [200, 100, 50]);
        assert_eq!(rgb(table.entries()[255]), [0, 255, 128]);
    }

    #[test]
    fn table_midpoint_is_mean_of_stops() {
        // Slot 51 (t = 0.2) is halfway between stops at 0.0 and 0.4.
        let p = Palette::new(
            "test",
            vec![
                ColorStop::new(0.0, 0, 100, 255),
                ColorStop::new(0.4, 200, 0, 55),
                ColorStop::new(1.0, 0, 0, 0),
            ],
        );
        let table = PaletteTable::build(&p);
        let mid = rgb(table.entries()[51]);
        for (got, want) in mid.iter().zip([100u8, 50, 155]) {
            assert!((*got as i32 - want as i32).abs() <= 1, "{mid:?}");
        }
    }

    #[test]
    fn zero_width_interval_takes_left_color() {
        let p = Palette::new(
            "step",
            vec![
                ColorStop::new(0.0, 255, 0, 0),
                ColorStop::new(0.0, 0, 255, 0),
                ColorStop::new(1.0, 0, 0, 255),
            ],
        );
        let table = PaletteTable::build(&p);
        assert_eq!(rgb(table.entries()[0]), [255, 0, 0]);
    }

    #[test]
    fn single_stop_fills_table() {
        let p = Palette::new("flat", vec![ColorStop::new(0.0, 9, 8, 7)]);
        let table = PaletteTable::build(&p);
        assert!(table.entries().iter().all(|&e| e == [9, 8, 7, 255]));
    }

    #[test]
    fn build_is_deterministic() {
        for pal in builtin_palettes() {
            assert_eq!(PaletteTable::build(&pal), PaletteTable::build(&pal));
        }
    }

    #[test]
    fn entries_are_opaque() {
        for pal in builtin_palettes() {
            let table = PaletteTable::build(&pal);
            assert!(table.entries().iter().all(|e| e[3] == 255), "{}", pal.id);
        }
    }

    #[test]
    fn sample_at_texel_centre_returns_entry() {
        let table = PaletteTable::default();
        for i in [0usize, 17, 128, 254, 255] {
            let u = (i as f32 + 0.5) / TABLE_SIZE as f32;
            assert_eq!(table.sample(u), table.entries()[i]);
        }
    }

    #[test]
    fn sample_clamps_to_edges() {
        let table = PaletteTable::default();
        assert_eq!(table.sample(0.0), table.entries()[0]);
        assert_eq!(table.sample(1.0), table.entries()[255]);
    }

    #[test]
    fn sample_interpolates_between_entries() {
        let table = PaletteTable::build(&mono());
        // Halfway between slots 100 and 101.
        let c = table.sample(101.0 / TABLE_SIZE as f32);
        let (a, b) = (table.entries()[100][0], table.entries()[101][0]);
        assert!(c[0] >= a.min(b) && c[0] <= a.max(b));
    }

    #[test]
    fn bounded_is_inside_color() {
        let table = PaletteTable::default();
        let r = IterationResult::Bounded {
            iterations: 500,
            norm_sq: 1.0,
        };
        assert_eq!(table.color(r, 500), INSIDE_COLOR);
    }

    #[test]
    fn escaped_is_not_black() {
        let table = PaletteTable::default();
        let c = table.color(
            IterationResult::Escaped {
                iterations: 10,
                norm_sq: 5.0,
            },
            500,
        );
        assert!(c[0] > 0 || c[1] > 0 || c[2] > 0);
        assert_eq!(c[3], 255);
    }

    #[test]
    fn palette_repeats_four_times() {
        assert!((palette_position(125.0, 500) - 0.0).abs() < 1e-6);
        assert!((palette_position(62.5, 500) - 0.5).abs() < 1e-6);
        assert!((palette_position(187.5, 500) - 0.5).abs() < 1e-6);
        // Negative smooth values wrap into [0, 1).
        let u = palette_position(-1.0, 500);
        assert!((0.0..1.0).contains(&u));
    }

    #[test]
    fn builtin_lookup() {
        let ids: Vec<_> = builtin_palettes().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, ["classic", "fire", "rainbow", "ocean", "mono", "neon"]);
        assert_eq!(Palette::builtin("ocean").unwrap().stops.len(), 5);
        assert!(matches!(
            Palette::builtin("sepia"),
            Err(RenderError::UnknownPalette(_))
        ));
    }

    #[test]
    fn colorize_produces_correct_size() {
        let table = PaletteTable::default();
        let buf = IterationBuffer::new(64, 48, 256);
        let rb = table.colorize(&buf);
        assert_eq!(rb.width, 64);
        assert_eq!(rb.height, 48);
        assert_eq!(rb.pixels.len(), 64 * 48 * 4);
        assert!(rb.pixels.chunks_exact(4).all(|px| px == INSIDE_COLOR));
    }
}
