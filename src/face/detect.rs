// Face detector seam
// The real detector is an external capability. The default implementation is a
// deterministic sliding-window heuristic good enough to drive the pipeline and
// its tests without a model.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DETECT_BRIGHTNESS_MAX, DETECT_BRIGHTNESS_MIN, DETECT_VARIANCE_MAX, DETECT_VARIANCE_MIN,
    DETECT_WINDOW_SIZE, DETECT_WINDOW_STRIDE,
};
use crate::error::Result;
use crate::frame::Frame;
use crate::stats;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    fn overlaps(&self, other: &BoundingBox) -> bool {
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }
}

/// Locates candidate facial regions in a single frame.
pub trait FaceDetector: Sync {
    fn detect(&self, frame: &Frame) -> Result<Vec<BoundingBox>>;
}

/// Sliding-window detector that accepts windows whose luminance statistics fall
/// in a face-like band: moderate variance (textured but not noisy) and mid-range
/// brightness. Overlapping hits are suppressed greedily in scan order.
#[derive(Debug, Clone)]
pub struct LuminanceWindowDetector {
    pub window: u32,
    pub stride: u32,
    pub variance_min: f64,
    pub variance_max: f64,
    pub brightness_min: f64,
    pub brightness_max: f64,
}

impl Default for LuminanceWindowDetector {
    fn default() -> Self {
        Self {
            window: DETECT_WINDOW_SIZE,
            stride: DETECT_WINDOW_STRIDE,
            variance_min: DETECT_VARIANCE_MIN,
            variance_max: DETECT_VARIANCE_MAX,
            brightness_min: DETECT_BRIGHTNESS_MIN,
            brightness_max: DETECT_BRIGHTNESS_MAX,
        }
    }
}

impl FaceDetector for LuminanceWindowDetector {
    fn detect(&self, frame: &Frame) -> Result<Vec<BoundingBox>> {
        let mut hits: Vec<BoundingBox> = Vec::new();

        if frame.width() < self.window || frame.height() < self.window {
            return Ok(hits);
        }

        let luma = frame.luminance();
        let frame_width = frame.width() as usize;

        let mut y = 0;
        while y + self.window <= frame.height() {
            let mut x = 0;
            while x + self.window <= frame.width() {
                let bbox = BoundingBox {
                    x,
                    y,
                    width: self.window,
                    height: self.window,
                };
                if !hits.iter().any(|h| h.overlaps(&bbox))
                    && self.window_matches(&luma, frame_width, &bbox)
                {
                    hits.push(bbox);
                }
                x += self.stride;
            }
            y += self.stride;
        }

        Ok(hits)
    }
}

impl LuminanceWindowDetector {
    fn window_matches(&self, luma: &[f64], frame_width: usize, bbox: &BoundingBox) -> bool {
        let mut values = Vec::with_capacity(bbox.width as usize * bbox.height as usize);
        for row in bbox.y..bbox.y + bbox.height {
            let start = row as usize * frame_width + bbox.x as usize;
            values.extend_from_slice(&luma[start..start + bbox.width as usize]);
        }

        let mean = stats::mean(&values);
        let sd = stats::std_dev(&values);
        let variance = sd * sd;

        variance >= self.variance_min
            && variance <= self.variance_max
            && mean >= self.brightness_min
            && mean <= self.brightness_max
    }
}
