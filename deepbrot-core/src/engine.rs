use crate::complex_df::ComplexDF;
use crate::fractal::{FractalParams, FractalVariant, IterationResult};

/// Squared bailout radius (`|z| > 2`).
pub const ESCAPE_RADIUS_SQ: f32 = 4.0;

/// Escape-time iteration for all four variants in double-float.
///
/// Mandelbrot, Burning Ship and Tricorn start from `z₀ = 0` with `c` set to
/// the point; Julia starts from `z₀ = point` with `c` set to the seed.
/// Each step runs the bailout test, the variant's pre-transform, then
/// `z ← z² + c`.
///
/// The bailout test reads only the `hi` components of `z`. The update uses
/// full double-float precision. Switching the test to full precision would
/// change rendered output at extreme depth.
#[derive(Debug, Clone)]
pub struct IterationEngine {
    params: FractalParams,
}

impl IterationEngine {
    pub fn new(params: FractalParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &FractalParams {
        &self.params
    }

    /// Iterate a single plane coordinate to its terminal state.
    pub fn iterate(&self, point: ComplexDF) -> IterationResult {
        let max_iter = self.params.max_iterations();
        match self.params.variant {
            FractalVariant::Mandelbrot => escape_loop::<Identity>(ComplexDF::ZERO, point, max_iter),
            FractalVariant::Julia => {
                // The seed is a small constant, so it is widened from f32.
                let c = ComplexDF::from(self.params.julia_seed);
                escape_loop::<Identity>(point, c, max_iter)
            }
            FractalVariant::BurningShip => escape_loop::<AbsFold>(ComplexDF::ZERO, point, max_iter),
            FractalVariant::Tricorn => escape_loop::<Conjugate>(ComplexDF::ZERO, point, max_iter),
        }
    }
}

// ---------------------------------------------------------------------------
// Pre-transforms
// ---------------------------------------------------------------------------

/// Transform applied to `z` before squaring.
///
/// Dispatched statically so each variant gets its own monomorphized loop.
trait PreTransform {
    fn apply(z: ComplexDF) -> ComplexDF;
}

struct Identity;
struct AbsFold;
struct Conjugate;

impl PreTransform for Identity {
    #[inline(always)]
    fn apply(z: ComplexDF) -> ComplexDF {
        z
    }
}

/// Burning Ship: `(|re|, |im|)`.
impl PreTransform for AbsFold {
    #[inline(always)]
    fn apply(z: ComplexDF) -> ComplexDF {
        z.abs_components()
    }
}

/// Tricorn: complex conjugate.
impl PreTransform for Conjugate {
    #[inline(always)]
    fn apply(z: ComplexDF) -> ComplexDF {
        z.conj()
    }
}

#[inline(always)]
fn escape_loop<T: PreTransform>(mut z: ComplexDF, c: ComplexDF, max_iter: u32) -> IterationResult {
    for n in 0..max_iter {
        let norm_sq = z.norm_sq_hi();
        if norm_sq > ESCAPE_RADIUS_SQ {
            return IterationResult::Escaped {
                iterations: n,
                norm_sq,
            };
        }
        z = T::apply(z).square_add(c);
    }

    IterationResult::Bounded {
        iterations: max_iter,
        norm_sq: z.norm_sq_hi(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::complex::Complex;
    use crate::double_float::DoubleFloat;

    fn engine(variant: FractalVariant, max_iterations: u32) -> IterationEngine {
        IterationEngine::new(FractalParams::new(
            variant,
            max_iterations,
            FractalParams::DEFAULT_JULIA_SEED,
        ))
    }

    fn julia(seed: Complex) -> IterationEngine {
        IterationEngine::new(FractalParams::new(FractalVariant::Julia, 500, seed))
    }

    fn pt(re: f32, im: f32) -> ComplexDF {
        ComplexDF::from(Complex::new(re, im))
    }

    #[test]
    fn main_cardioid_point_is_bounded() {
        let r = engine(FractalVariant::Mandelbrot, 500).iterate(pt(-0.5, 0.0));
        assert!(matches!(r, IterationResult::Bounded { iterations: 500, .. }));
        assert!(r.norm_sq() <= ESCAPE_RADIUS_SQ);
    }

    #[test]
    fn one_plus_i_escapes_within_two_steps() {
        // 0 → 1+i → 1+3i, |1+3i|² = 10.
        let r = engine(FractalVariant::Mandelbrot, 500).iterate(pt(1.0, 1.0));
        assert_eq!(
            r,
            IterationResult::Escaped {
                iterations: 2,
                norm_sq: 10.0
            }
        );
    }

    #[test]
    fn tip_of_the_needle_never_escapes() {
        // 0 → -2 → 2 → 2 → …, |z|² sits exactly on the radius.
        let r = engine(FractalVariant::Mandelbrot, 200).iterate(pt(-2.0, 0.0));
        assert_eq!(
            r,
            IterationResult::Bounded {
                iterations: 200,
                norm_sq: 4.0
            }
        );
    }

    #[test]
    fn far_point_escapes_after_first_step() {
        let r = engine(FractalVariant::Mandelbrot, 500).iterate(pt(10.0, 0.0));
        assert_eq!(
            r,
            IterationResult::Escaped {
                iterations: 1,
                norm_sq: 100.0
            }
        );
    }

    #[test]
    fn julia_far_start_escapes_immediately() {
        let r = julia(FractalParams::DEFAULT_JULIA_SEED).iterate(pt(10.0, 0.0));
        assert_eq!(
            r,
            IterationResult::Escaped {
                iterations: 0,
                norm_sq: 100.0
            }
        );
    }

    #[test]
    fn julia_uses_seed_as_c() {
        let j = julia(Complex::ZERO);
        // z ↦ z²: inside the unit disc stays, outside diverges.
        assert!(!j.iterate(pt(0.5, 0.0)).escaped());
        assert_eq!(
            j.iterate(pt(1.5, 0.0)),
            IterationResult::Escaped {
                iterations: 1,
                norm_sq: 5.0625
            }
        );
    }

    #[test]
    fn escape_count_never_exceeds_cap() {
        let e = engine(FractalVariant::Mandelbrot, 50);
        for i in 0..40 {
            let re = -2.2 + i as f32 * 0.07;
            let r = e.iterate(pt(re, 0.31));
            assert!(r.iterations() <= 50);
            if r.escaped() {
                assert!(r.norm_sq() > ESCAPE_RADIUS_SQ);
            }
        }
    }

    #[test]
    fn real_axis_variants_match_mandelbrot() {
        let mandel = engine(FractalVariant::Mandelbrot, 500);
        let ship = engine(FractalVariant::BurningShip, 500);
        let tricorn = engine(FractalVariant::Tricorn, 500);
        let points = [-2.1, -1.9, -1.7548, -1.5, -1.0, -0.75, -0.5, 0.0, 0.25, 0.26, 0.3, 1.0];
        for &re in &points {
            let c = pt(re, 0.0);
            let m = mandel.iterate(c);
            assert_eq!(m, ship.iterate(c), "burning ship differs on real axis at {re}");
            assert_eq!(m, tricorn.iterate(c), "tricorn differs on real axis at {re}");
        }
    }

    #[test]
    fn off_axis_variants_differ() {
        let mandel = engine(FractalVariant::Mandelbrot, 200);
        let ship = engine(FractalVariant::BurningShip, 200);
        let tricorn = engine(FractalVariant::Tricorn, 200);
        let mut ship_differs = false;
        let mut tricorn_differs = false;
        for i in 0..20 {
            for j in 1..20 {
                let c = pt(-2.0 + i as f32 * 0.125, j as f32 * 0.1);
                let m = mandel.iterate(c).iterations();
                ship_differs |= ship.iterate(c).iterations() != m;
                tricorn_differs |= tricorn.iterate(c).iterations() != m;
            }
        }
        assert!(ship_differs, "burning ship should diverge from mandelbrot off-axis");
        assert!(tricorn_differs, "tricorn should diverge from mandelbrot off-axis");
    }

    #[test]
    fn low_components_feed_the_update() {
        // Points sharing every hi part still follow different orbits.
        let e = engine(FractalVariant::Mandelbrot, 5000);
        let re_hi = -0.743_643_9_f32;
        let im = DoubleFloat::new(0.131_825_9, 0.0);
        let results: Vec<_> = (0..8)
            .map(|k| {
                let re = DoubleFloat::new(re_hi, k as f32 * 2e-9);
                e.iterate(ComplexDF::new(re, im))
            })
            .collect();
        assert!(
            results.windows(2).any(|w| w[0] != w[1]),
            "low components were ignored: {results:?}"
        );
    }

    #[test]
    fn deterministic_results() {
        let e = engine(FractalVariant::Tricorn, 300);
        let points = [pt(0.0, 0.0), pt(-0.75, 0.1), pt(0.3, 0.5)];
        let run1: Vec<_> = points.iter().map(|&c| e.iterate(c)).collect();
        let run2: Vec<_> = points.iter().map(|&c| e.iterate(c)).collect();
        assert_eq!(run1, run2);
    }
}
