//! 24-bit ANSI terminal preview of a rendered frame.
//!
//! Each character cell shows two image rows with the upper half block
//! (`▀`): the foreground carries the top pixel, the background the bottom.

use std::fmt::Write;

use deepbrot_render::RenderBuffer;

const UPPER_HALF: char = '\u{2580}';
const RESET: &str = "\x1b[0m";

/// Terminal width used when `COLUMNS` is not set.
pub const DEFAULT_COLUMNS: u32 = 80;

/// Preview width in character cells, from `COLUMNS` if present.
pub fn terminal_columns() -> u32 {
    std::env::var("COLUMNS")
        .ok()
        .and_then(|c| c.trim().parse::<u32>().ok())
        .filter(|&c| c > 0)
        .unwrap_or(DEFAULT_COLUMNS)
}

/// Render `image` as ANSI text at most `columns` cells wide.
///
/// The image is nearest-neighbour downsampled, keeping its aspect ratio
/// with two pixel rows per text line.
pub fn render_ansi(image: &RenderBuffer, columns: u32) -> String {
    if image.width == 0 || image.height == 0 || columns == 0 {
        return String::new();
    }
    let cols = columns.min(image.width);
    let scale = image.width as f64 / cols as f64;
    let rows = ((image.height as f64 / scale).round() as u32).max(1);
    let sample = |c: u32, r: u32| {
        let px = ((c as f64 + 0.5) * scale) as u32;
        let py = ((r as f64 + 0.5) * image.height as f64 / rows as f64) as u32;
        image.pixel(px.min(image.width - 1), py.min(image.height - 1))
    };

    let mut out = String::new();
    for line in (0..rows).step_by(2) {
        for c in 0..cols {
            let top = sample(c, line);
            let _ = write!(out, "\x1b[38;2;{};{};{}m", top[0], top[1], top[2]);
            if line + 1 < rows {
                let bottom = sample(c, line + 1);
                let _ = write!(out, "\x1b[48;2;{};{};{}m", bottom[0], bottom[1], bottom[2]);
            }
            out.push(UPPER_HALF);
        }
        out.push_str(RESET);
        out.push('\n');
    }
    out
}
