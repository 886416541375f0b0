use std::f32::consts::LN_2;

use deepbrot_core::{IterationResult, ESCAPE_RADIUS_SQ};

/// Compute the smooth (continuous) iteration count.
///
/// Bounded orbits map to `max_iterations` exactly. Escaped orbits use the
/// standard renormalization
///   ν = n + 1 − log₂(log₂|zₙ|)
/// which estimates the fractional step at which the orbit crossed the
/// escape radius and removes integer banding.
pub fn smooth_iteration(result: IterationResult, max_iterations: u32) -> f32 {
    match result {
        IterationResult::Bounded { .. } => max_iterations as f32,
        IterationResult::Escaped {
            iterations,
            norm_sq,
        } => {
            if norm_sq <= ESCAPE_RADIUS_SQ {
                return iterations as f32;
            }
            let log_zn = norm_sq.ln() / 2.0; // ln|z_n|
            let nu = (log_zn / LN_2).ln() / LN_2;
            iterations as f32 + 1.0 - nu
        }
    }
}
