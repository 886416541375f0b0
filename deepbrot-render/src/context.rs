use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, info};

use deepbrot_core::{FractalParams, FrameConfig, IterationEngine, Viewport};

use crate::buffer::RenderBuffer;
use crate::error::RenderError;
use crate::iteration_buffer::IterationBuffer;
use crate::palette::{Palette, PaletteTable};
use crate::renderer::{render_generation, RenderCancel};

/// Everything needed to iterate one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameRequest {
    pub viewport: Viewport,
    pub params: FractalParams,
}

impl FrameRequest {
    pub fn new(viewport: Viewport, params: FractalParams) -> Self {
        Self { viewport, params }
    }

    /// Build a request from a loaded config. The palette id is not part of
    /// the request; select it with [`RenderContext::set_palette`].
    pub fn from_config(config: &FrameConfig) -> crate::Result<Self> {
        Ok(Self {
            viewport: config.viewport()?,
            params: config.fractal,
        })
    }
}

/// A finished frame: colored pixels plus the iteration data they came from.
#[derive(Debug, Clone)]
pub struct FrameOutput {
    pub image: RenderBuffer,
    pub iterations: IterationBuffer,
    pub elapsed: Duration,
}

/// Owns the worker pool, the cancel handle and the active palette table.
///
/// The table is held behind `RwLock<Arc<_>>`: [`set_palette`](Self::set_palette)
/// builds the replacement before taking the lock, and every frame clones the
/// `Arc` once at its start, so a frame always colors with one whole table.
pub struct RenderContext {
    pool: ThreadPool,
    cancel: Arc<RenderCancel>,
    table: RwLock<Arc<PaletteTable>>,
}

impl RenderContext {
    /// Create a context with `threads` workers (`0` lets Rayon pick).
    pub fn new(threads: usize, palette: &Palette) -> crate::Result<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("deepbrot-render-{i}"))
            .build()?;
        info!(threads = pool.current_num_threads(), palette = %palette.id, "Render context ready");
        Ok(Self {
            pool,
            cancel: Arc::new(RenderCancel::new()),
            table: RwLock::new(Arc::new(PaletteTable::build(palette))),
        })
    }

    /// Rebuild the palette table and swap it in.
    pub fn set_palette(&self, palette: &Palette) {
        let table = Arc::new(PaletteTable::build(palette));
        *self.table.write().unwrap_or_else(PoisonError::into_inner) = table;
        debug!(palette = %palette.id, "Palette table swapped");
    }

    /// Snapshot of the current palette table.
    pub fn palette_table(&self) -> Arc<PaletteTable> {
        Arc::clone(&*self.table.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Handle for cancelling in-flight frames from another thread.
    pub fn cancel_handle(&self) -> Arc<RenderCancel> {
        Arc::clone(&self.cancel)
    }

    pub fn num_threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Iterate and color one frame.
    ///
    /// Starting a frame supersedes any frame still running on this context.
    /// Returns [`RenderError::Cancelled`] if a newer frame started or the
    /// cancel handle fired while this one was in flight.
    pub fn render_frame(&self, request: &FrameRequest) -> crate::Result<FrameOutput> {
        let viewport = &request.viewport;
        if viewport.width == 0 || viewport.height == 0 {
            return Err(RenderError::InvalidDimensions {
                width: viewport.width,
                height: viewport.height,
            });
        }

        let gen = self.cancel.begin_frame();
        let table = self.palette_table();
        let engine = IterationEngine::new(request.params);
        let cancel = &self.cancel;

        let result = self.pool.install(|| render_generation(&engine, viewport, cancel, gen));
        if result.cancelled {
            debug!(rows_rendered = result.rows_rendered, "Frame abandoned");
            return Err(RenderError::Cancelled);
        }

        let image = self.pool.install(|| table.colorize(&result.iterations));
        info!(
            elapsed_ms = result.elapsed.as_millis(),
            palette = table.palette_id(),
            "Frame ready"
        );
        Ok(FrameOutput {
            image,
            iterations: result.iterations,
            elapsed: result.elapsed,
        })
    }

    /// Color existing iteration data with the current palette table.
    pub fn recolor(&self, iterations: &IterationBuffer) -> RenderBuffer {
        let table = self.palette_table();
        self.pool.install(|| table.colorize(iterations))
    }
}
