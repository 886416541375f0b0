mod app_dir;
mod config_file;
mod preview;

use std::io::Write;
use std::path::PathBuf;

use tracing::{info, warn};

use deepbrot_render::{FrameRequest, Palette, RenderContext};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Starting Deepbrot");

    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(app_dir::default_config_path);
    let config = config_file::load(&path);

    let palette = Palette::builtin(&config.palette).unwrap_or_else(|e| {
        warn!("{e}, using classic");
        Palette::default()
    });

    let ctx = RenderContext::new(0, &palette)?;
    let request = FrameRequest::from_config(&config)?;
    info!(
        width = config.width,
        height = config.height,
        center = %config.center,
        zoom = config.zoom,
        variant = %config.fractal.variant,
        max_iterations = config.fractal.max_iterations(),
        "Rendering frame"
    );
    let frame = ctx.render_frame(&request)?;

    let text = preview::render_ansi(&frame.image, preview::terminal_columns());
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
