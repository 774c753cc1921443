// Face region heuristics
// Scores a single facial region for blur, contrast, and brightness anomalies.
// These are compositing-artifact proxies, not a trained detector.

use serde::{Deserialize, Serialize};

use crate::constants::{
    FACE_BLUR_THRESHOLD, FACE_BRIGHTNESS_HIGH, FACE_BRIGHTNESS_LOW, FACE_CONTRAST_THRESHOLD,
    FACE_MIN_SUSPICIOUS_REASONS, REASON_LOW_CONTRAST, REASON_LOW_DETAIL,
    REASON_UNUSUAL_BRIGHTNESS,
};
use crate::frame::FrameRegion;
use crate::stats;

/// Thresholds for the per-region rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaceConfig {
    pub blur_threshold: f64,
    pub contrast_threshold: f64,
    pub brightness_low: f64,
    pub brightness_high: f64,
    /// Minimum triggered rules before a region is called suspicious
    pub min_reasons: usize,
}

impl Default for FaceConfig {
    fn default() -> Self {
        Self {
            blur_threshold: FACE_BLUR_THRESHOLD,
            contrast_threshold: FACE_CONTRAST_THRESHOLD,
            brightness_low: FACE_BRIGHTNESS_LOW,
            brightness_high: FACE_BRIGHTNESS_HIGH,
            min_reasons: FACE_MIN_SUSPICIOUS_REASONS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaceMetrics {
    /// Variance of the Laplacian response; low means flat/over-smoothed
    pub blur_score: f64,
    /// Standard deviation of luminance
    pub contrast: f64,
    /// Mean luminance, 0-255
    pub brightness: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaceAnalysisResult {
    pub suspicious: bool,
    pub reasons: Vec<String>,
    pub metrics: Option<FaceMetrics>,
}

impl FaceAnalysisResult {
    fn clean() -> Self {
        Self {
            suspicious: false,
            reasons: Vec::new(),
            metrics: None,
        }
    }
}

/// Analyze one facial region. Empty regions short-circuit with no metrics.
pub fn analyze_region(region: &FrameRegion<'_>, config: &FaceConfig) -> FaceAnalysisResult {
    if region.is_empty() {
        return FaceAnalysisResult::clean();
    }

    let luma = region.luminance();

    let blur_score = laplacian_variance(&luma, region.width as usize, region.height as usize);
    let contrast = stats::std_dev(&luma);
    let brightness = stats::mean(&luma);

    let mut reasons = Vec::new();
    if blur_score < config.blur_threshold {
        reasons.push(REASON_LOW_DETAIL.to_string());
    }
    if contrast < config.contrast_threshold {
        reasons.push(REASON_LOW_CONTRAST.to_string());
    }
    if brightness < config.brightness_low || brightness > config.brightness_high {
        reasons.push(REASON_UNUSUAL_BRIGHTNESS.to_string());
    }

    FaceAnalysisResult {
        suspicious: reasons.len() >= config.min_reasons,
        reasons,
        metrics: Some(FaceMetrics {
            blur_score,
            contrast,
            brightness,
        }),
    }
}

/// Variance of the 4-neighbor Laplacian over the interior of a luminance grid.
/// Regions too small for a 3x3 stencil are treated as flat (variance 0).
fn laplacian_variance(luma: &[f64], width: usize, height: usize) -> f64 {
    if width < 3 || height < 3 {
        return 0.0;
    }

    let mut responses = Vec::with_capacity((width - 2) * (height - 2));
    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let center = luma[y * width + x];
            let response = luma[(y - 1) * width + x]
                + luma[(y + 1) * width + x]
                + luma[y * width + x - 1]
                + luma[y * width + x + 1]
                - 4.0 * center;
            responses.push(response);
        }
    }

    let sd = stats::std_dev(&responses);
    sd * sd
}
