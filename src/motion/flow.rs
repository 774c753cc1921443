// Flow estimator seam
// Reduces a consecutive frame pair to one mean motion magnitude. The default
// is block-matching over luminance; a model-backed dense estimator can be
// plugged in through the same trait.

use crate::constants::{FLOW_BLOCK_SIZE, FLOW_SEARCH_RADIUS};
use crate::frame::Frame;

/// Estimates mean per-pixel motion magnitude between two consecutive frames.
pub trait FlowEstimator: Sync {
    fn mean_magnitude(&self, prev: &Frame, curr: &Frame) -> f64;
}

/// Block-matching estimator: for each block of the previous frame, search a
/// small displacement window in the current frame for the minimum sum of
/// absolute luminance differences, and take the displacement magnitude.
/// The frame-level value is the mean over all blocks.
#[derive(Debug, Clone)]
pub struct BlockFlowEstimator {
    pub block_size: u32,
    pub search_radius: i32,
}

impl Default for BlockFlowEstimator {
    fn default() -> Self {
        Self {
            block_size: FLOW_BLOCK_SIZE,
            search_radius: FLOW_SEARCH_RADIUS,
        }
    }
}

impl FlowEstimator for BlockFlowEstimator {
    fn mean_magnitude(&self, prev: &Frame, curr: &Frame) -> f64 {
        if prev.width() != curr.width() || prev.height() != curr.height() {
            log::warn!(
                "frame size changed mid-stream ({}x{} -> {}x{}), motion sample skipped",
                prev.width(),
                prev.height(),
                curr.width(),
                curr.height()
            );
            return 0.0;
        }

        let width = prev.width() as usize;
        let height = prev.height() as usize;
        let block = self.block_size as usize;

        let prev_luma = prev.luminance();
        let curr_luma = curr.luminance();

        // Frames too small for block matching fall back to the mean absolute
        // temporal difference scaled into pixel units.
        if width < block || height < block {
            return mean_abs_diff(&prev_luma, &curr_luma) / 255.0 * self.search_radius as f64;
        }

        let mut magnitudes = Vec::new();
        let mut by = 0;
        while by + block <= height {
            let mut bx = 0;
            while bx + block <= width {
                magnitudes.push(self.block_displacement(
                    &prev_luma, &curr_luma, width, height, bx, by, block,
                ));
                bx += block;
            }
            by += block;
        }

        crate::stats::mean(&magnitudes)
    }
}

impl BlockFlowEstimator {
    fn block_displacement(
        &self,
        prev: &[f64],
        curr: &[f64],
        width: usize,
        height: usize,
        bx: usize,
        by: usize,
        block: usize,
    ) -> f64 {
        let sad_at = |dx: i32, dy: i32, cutoff: f64| -> Option<f64> {
            let tx = bx as i32 + dx;
            let ty = by as i32 + dy;
            if tx < 0
                || ty < 0
                || tx as usize + block > width
                || ty as usize + block > height
            {
                return None;
            }
            let mut sad = 0.0;
            for row in 0..block {
                let p = (by + row) * width + bx;
                let c = (ty as usize + row) * width + tx as usize;
                for col in 0..block {
                    sad += (prev[p + col] - curr[c + col]).abs();
                }
                if sad >= cutoff {
                    return Some(sad);
                }
            }
            Some(sad)
        };

        // Seed with the zero displacement so ties read as zero motion for
        // static content.
        let mut best_sad = sad_at(0, 0, f64::INFINITY).unwrap_or(f64::INFINITY);
        let mut best_dx = 0i32;
        let mut best_dy = 0i32;

        for dy in -self.search_radius..=self.search_radius {
            for dx in -self.search_radius..=self.search_radius {
                if dx == 0 && dy == 0 {
                    continue;
                }
                if let Some(sad) = sad_at(dx, dy, best_sad) {
                    if sad < best_sad {
                        best_sad = sad;
                        best_dx = dx;
                        best_dy = dy;
                    }
                }
            }
        }

        ((best_dx * best_dx + best_dy * best_dy) as f64).sqrt()
    }
}

fn mean_abs_diff(a: &[f64], b: &[f64]) -> f64 {
    if a.is_empty() || a.len() != b.len() {
        return 0.0;
    }
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).abs())
        .sum::<f64>()
        / a.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame_with_square(size: u32, x0: u32, y0: u32) -> Frame {
        let mut data = vec![20u8; size as usize * size as usize * 3];
        for y in y0..(y0 + 8).min(size) {
            for x in x0..(x0 + 8).min(size) {
                let i = (y as usize * size as usize + x as usize) * 3;
                data[i] = 230;
                data[i + 1] = 230;
                data[i + 2] = 230;
            }
        }
        Frame::new(size, size, data).unwrap()
    }

    #[test]
    fn test_identical_frames_have_zero_motion() {
        let frame = frame_with_square(64, 10, 10);
        let estimator = BlockFlowEstimator::default();
        assert_eq!(estimator.mean_magnitude(&frame, &frame.clone()), 0.0);
    }

    #[test]
    fn test_shifted_square_registers_motion() {
        let prev = frame_with_square(64, 10, 10);
        let curr = frame_with_square(64, 13, 10);
        let estimator = BlockFlowEstimator::default();
        let magnitude = estimator.mean_magnitude(&prev, &curr);
        assert!(magnitude > 0.0, "shifted content should register motion");
    }

    #[test]
    fn test_mismatched_sizes_skip_sample() {
        let prev = Frame::solid(64, 64, [0, 0, 0]);
        let curr = Frame::solid(32, 32, [0, 0, 0]);
        let estimator = BlockFlowEstimator::default();
        assert_eq!(estimator.mean_magnitude(&prev, &curr), 0.0);
    }

    #[test]
    fn test_tiny_frames_use_temporal_difference() {
        let prev = Frame::solid(8, 8, [0, 0, 0]);
        let curr = Frame::solid(8, 8, [255, 255, 255]);
        let estimator = BlockFlowEstimator::default();
        let magnitude = estimator.mean_magnitude(&prev, &curr);
        assert!(magnitude > 0.0);
    }
}
