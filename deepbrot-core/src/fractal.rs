use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::complex::Complex;
use crate::error::CoreError;

/// The escape-time formula family to iterate.
///
/// Discriminants match the wire indices used by hosts (`0..=3`). Serialized
/// by lowercase name; deserialized through [`FromStr`], so config files get
/// the same trimming and case folding as command-line input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum FractalVariant {
    #[default]
    Mandelbrot = 0,
    Julia = 1,
    BurningShip = 2,
    Tricorn = 3,
}

impl FractalVariant {
    pub const ALL: [Self; 4] = [
        Self::Mandelbrot,
        Self::Julia,
        Self::BurningShip,
        Self::Tricorn,
    ];

    /// Lowercase identifier, as used in config files and shared links.
    pub fn name(self) -> &'static str {
        match self {
            Self::Mandelbrot => "mandelbrot",
            Self::Julia => "julia",
            Self::BurningShip => "burningship",
            Self::Tricorn => "tricorn",
        }
    }
}

impl fmt::Display for FractalVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u32> for FractalVariant {
    type Error = CoreError;

    fn try_from(index: u32) -> Result<Self, Self::Error> {
        Self::ALL
            .get(index as usize)
            .copied()
            .ok_or(CoreError::UnknownVariantIndex(index))
    }
}

impl TryFrom<String> for FractalVariant {
    type Error = CoreError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        name.parse()
    }
}

impl FromStr for FractalVariant {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::UnknownVariantName(s.to_string()))
    }
}

/// The terminal state of iterating a single point.
///
/// The engine stores only raw iteration data. The smooth coloring formula is
/// deferred to the coloring pass in `deepbrot-render`, keeping the hot loop
/// lean. `norm_sq` is `re.hi² + im.hi²` of the final orbit value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IterationResult {
    /// The orbit left the radius-2 disc before step `iterations` was applied.
    Escaped { iterations: u32, norm_sq: f32 },

    /// The orbit stayed bounded for the whole budget; `iterations` equals
    /// the cap.
    Bounded { iterations: u32, norm_sq: f32 },
}

impl IterationResult {
    #[inline]
    pub fn iterations(&self) -> u32 {
        match *self {
            Self::Escaped { iterations, .. } | Self::Bounded { iterations, .. } => iterations,
        }
    }

    #[inline]
    pub fn norm_sq(&self) -> f32 {
        match *self {
            Self::Escaped { norm_sq, .. } | Self::Bounded { norm_sq, .. } => norm_sq,
        }
    }

    #[inline]
    pub fn escaped(&self) -> bool {
        matches!(self, Self::Escaped { .. })
    }
}

/// Per-frame iteration parameters.
///
/// `max_iterations` is always inside
/// [`MIN_ITERATIONS`](Self::MIN_ITERATIONS)..=[`MAX_ITERATIONS`](Self::MAX_ITERATIONS);
/// the clamp is re-applied on deserialization so hand-edited configs stay in range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FractalParams {
    pub variant: FractalVariant,

    /// Iteration budget per pixel.
    max_iterations: u32,

    /// Fixed `c` for Julia renders. Ignored by the other variants.
    pub julia_seed: Complex,
}

/// Re-applies the iteration clamp on load.
impl<'de> Deserialize<'de> for FractalParams {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            #[serde(default)]
            variant: FractalVariant,
            #[serde(default = "default_max_iterations")]
            max_iterations: u32,
            #[serde(default = "default_julia_seed")]
            julia_seed: Complex,
        }
        let raw = Raw::deserialize(deserializer)?;
        Ok(Self::new(raw.variant, raw.max_iterations, raw.julia_seed))
    }
}

fn default_max_iterations() -> u32 {
    FractalParams::DEFAULT_MAX_ITERATIONS
}

fn default_julia_seed() -> Complex {
    FractalParams::DEFAULT_JULIA_SEED
}

impl FractalParams {
    pub const MIN_ITERATIONS: u32 = 50;
    pub const MAX_ITERATIONS: u32 = 5000;
    pub const DEFAULT_MAX_ITERATIONS: u32 = 500;
    pub const DEFAULT_JULIA_SEED: Complex = Complex {
        re: -0.7,
        im: 0.27015,
    };

    /// Build parameters, clamping `max_iterations` into the supported range.
    pub fn new(variant: FractalVariant, max_iterations: u32, julia_seed: Complex) -> Self {
        let clamped = max_iterations.clamp(Self::MIN_ITERATIONS, Self::MAX_ITERATIONS);
        if clamped != max_iterations {
            debug!(requested = max_iterations, clamped, "Iteration cap out of range");
        }
        Self {
            variant,
            max_iterations: clamped,
            julia_seed,
        }
    }

    #[inline]
    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    /// Return a copy with a different (clamped) iteration cap.
    pub fn with_max_iterations(self, max_iterations: u32) -> Self {
        Self::new(self.variant, max_iterations, self.julia_seed)
    }

    /// Return a copy rendering a different variant.
    pub fn with_variant(self, variant: FractalVariant) -> Self {
        Self { variant, ..self }
    }
}

impl Default for FractalParams {
    fn default() -> Self {
        Self::new(
            FractalVariant::Mandelbrot,
            Self::DEFAULT_MAX_ITERATIONS,
            Self::DEFAULT_JULIA_SEED,
        )
    }
}
