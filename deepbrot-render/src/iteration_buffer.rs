use deepbrot_core::IterationResult;

/// Stores per-pixel `IterationResult` data for a full frame.
///
/// This is the raw output of the renderer before coloring. Keeping iteration
/// data separate from colored pixels lets a palette swap recolor the frame
/// without re-iterating.
#[derive(Debug, Clone, PartialEq)]
pub struct IterationBuffer {
    pub width: u32,
    pub height: u32,
    pub max_iterations: u32,
    /// Row-major, row 0 at the top of the image.
    pub data: Vec<IterationResult>,
}

impl IterationBuffer {
    /// Create a buffer with every pixel marked bounded at the cap.
    pub fn new(width: u32, height: u32, max_iterations: u32) -> Self {
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            max_iterations,
            data: vec![
                IterationResult::Bounded {
                    iterations: max_iterations,
                    norm_sq: 0.0,
                };
                size
            ],
        }
    }

    #[inline]
    pub fn get(&self, px: u32, py: u32) -> IterationResult {
        self.data[py as usize * self.width as usize + px as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_buffer_is_all_bounded() {
        let buf = IterationBuffer::new(5, 3, 200);
        assert_eq!(buf.data.len(), 15);
        assert!(buf.data.iter().all(|r| !r.escaped() && r.iterations() == 200));
    }

    #[test]
    fn get_is_row_major() {
        let mut buf = IterationBuffer::new(4, 2, 100);
        let marker = IterationResult::Escaped {
            iterations: 9,
            norm_sq: 5.0,
        };
        buf.data[4 + 3] = marker;
        assert_eq!(buf.get(3, 1), marker);
        assert!(!buf.get(3, 0).escaped());
    }
}
