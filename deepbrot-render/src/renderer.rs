use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use rayon::prelude::*;
use tracing::{debug, info};

use deepbrot_core::{IterationEngine, Viewport};

use crate::iteration_buffer::IterationBuffer;

// ---------------------------------------------------------------------------
// Cancellation
// ---------------------------------------------------------------------------

/// Tracks the current render generation for cancellation and progress.
///
/// Incrementing the generation signals all in-flight rows to stop early.
/// The progress counters let a host display a progress bar.
#[derive(Debug)]
pub struct RenderCancel {
    generation: AtomicU64,
    progress_done: AtomicUsize,
    progress_total: AtomicUsize,
}

impl RenderCancel {
    pub fn new() -> Self {
        Self {
            generation: AtomicU64::new(0),
            progress_done: AtomicUsize::new(0),
            progress_total: AtomicUsize::new(0),
        }
    }

    /// Cancel the current render by advancing the generation.
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    /// Advance the generation for a new frame and return it. Any frame
    /// still running under an older generation stops at its next row.
    pub fn begin_frame(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Read the current generation.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Reset progress for a new frame with `total` rows.
    pub fn reset_progress(&self, total: usize) {
        self.progress_total.store(total, Ordering::Relaxed);
        self.progress_done.store(0, Ordering::Relaxed);
    }

    fn inc_progress(&self) {
        self.progress_done.fetch_add(1, Ordering::Relaxed);
    }

    /// Read the current progress as `(done, total)` rows.
    pub fn progress(&self) -> (usize, usize) {
        (
            self.progress_done.load(Ordering::Relaxed),
            self.progress_total.load(Ordering::Relaxed),
        )
    }
}

impl Default for RenderCancel {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Result
// ---------------------------------------------------------------------------

/// The result of a full-frame iteration pass.
///
/// Contains raw iteration data (no coloring). Rows skipped after a
/// cancellation keep the buffer's initial bounded fill.
#[derive(Debug)]
pub struct RenderResult {
    pub iterations: IterationBuffer,
    pub elapsed: Duration,
    pub cancelled: bool,
    pub rows_rendered: usize,
}

// ---------------------------------------------------------------------------
// Full-frame render
// ---------------------------------------------------------------------------

/// Iterate every pixel of the viewport, rows in parallel via Rayon.
///
/// Every pixel is evaluated independently, so the output does not depend on
/// thread count or scheduling. Runs on the current Rayon pool; wrap the call
/// in `ThreadPool::install` to pick a specific one. The `cancel` handle can
/// be used from another thread to abort between rows.
pub fn render(engine: &IterationEngine, viewport: &Viewport, cancel: &RenderCancel) -> RenderResult {
    render_generation(engine, viewport, cancel, cancel.generation())
}

/// Like [`render`], but bound to an explicit generation, usually the one
/// returned by [`RenderCancel::begin_frame`].
pub fn render_generation(
    engine: &IterationEngine,
    viewport: &Viewport,
    cancel: &RenderCancel,
    gen: u64,
) -> RenderResult {
    let start = Instant::now();
    let max_iter = engine.params().max_iterations();
    let rows_done = AtomicUsize::new(0);

    debug!(
        width = viewport.width,
        height = viewport.height,
        variant = %engine.params().variant,
        max_iter,
        "Starting render"
    );
    cancel.reset_progress(viewport.height as usize);

    let mut iterations = IterationBuffer::new(viewport.width, viewport.height, max_iter);
    if viewport.width > 0 {
        iterations
            .data
            .par_chunks_mut(viewport.width as usize)
            .enumerate()
            .for_each(|(py, row)| {
                if cancel.generation() != gen {
                    return;
                }
                for (px, out) in row.iter_mut().enumerate() {
                    *out = engine.iterate(viewport.pixel_to_complex(px as u32, py as u32));
                }
                rows_done.fetch_add(1, Ordering::Relaxed);
                // A superseded frame must not count toward the new one.
                if cancel.generation() == gen {
                    cancel.inc_progress();
                }
            });
    }

    let rows_rendered = rows_done.into_inner();
    let cancelled = cancel.generation() != gen;
    let elapsed = start.elapsed();
    info!(
        elapsed_ms = elapsed.as_millis(),
        rows_rendered, cancelled, "Render complete"
    );

    RenderResult {
        iterations,
        elapsed,
        cancelled,
        rows_rendered,
    }
}
