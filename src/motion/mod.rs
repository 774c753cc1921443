// Motion anomaly analysis
// Samples frame pairs at a fixed cadence, reduces each pair to a mean motion
// magnitude, and flags statistical outliers against the sample population.

pub mod flow;

use serde::{Deserialize, Serialize};

use crate::constants::{MOTION_OUTLIER_MULTIPLIER, MOTION_SAMPLE_STEP};
use crate::frame::{Frame, FrameSource};
use crate::stats;
use self::flow::FlowEstimator;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MotionConfig {
    /// Keep every Nth frame when sampling the stream
    pub sample_step: usize,
    /// Outlier multiplier k in the mean + k*std rule
    pub outlier_multiplier: f64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            sample_step: MOTION_SAMPLE_STEP,
            outlier_multiplier: MOTION_OUTLIER_MULTIPLIER,
        }
    }
}

/// Mean motion magnitude for one sampled frame pair. `frame_index` is the
/// stream index of the later frame of the pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MotionSample {
    pub frame_index: usize,
    pub mean_motion: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MotionReport {
    /// Number of sampled frame pairs actually measured. With partial-stream
    /// input this is the processed count, not the nominal video length.
    pub total_frames: usize,
    pub samples: Vec<MotionSample>,
    /// Samples at or above mean + k*std, in stream order
    pub anomalies: Vec<MotionSample>,
    /// anomalies / max(total_frames, 1)
    pub anomaly_ratio: f64,
}

impl MotionReport {
    /// Zero element: nothing measured, nothing anomalous.
    pub fn empty() -> Self {
        Self {
            total_frames: 0,
            samples: Vec::new(),
            anomalies: Vec::new(),
            anomaly_ratio: 0.0,
        }
    }
}

/// Analyze motion over a pull-based frame source.
///
/// A decode failure mid-stream ends sampling and the report covers the frames
/// read so far; the caller decides whether partial coverage is acceptable.
pub fn analyze_motion(
    source: &mut dyn FrameSource,
    config: &MotionConfig,
    estimator: &dyn FlowEstimator,
) -> MotionReport {
    let step = config.sample_step.max(1);
    let mut samples = Vec::new();
    let mut prev: Option<Frame> = None;
    let mut index = 0usize;

    loop {
        let frame = match source.next_frame() {
            Ok(Some(frame)) => frame,
            Ok(None) => break,
            Err(e) => {
                log::warn!("frame decode failed at index {}: {}; returning partial motion report", index, e);
                break;
            }
        };

        if index % step == 0 {
            if let Some(prev_frame) = &prev {
                samples.push(MotionSample {
                    frame_index: index,
                    mean_motion: estimator.mean_magnitude(prev_frame, &frame),
                });
            }
            prev = Some(frame);
        }
        index += 1;
    }

    build_report(samples, config.outlier_multiplier)
}

/// Analyze motion over an in-memory frame sequence.
pub fn analyze_frame_sequence(
    frames: &[Frame],
    config: &MotionConfig,
    estimator: &dyn FlowEstimator,
) -> MotionReport {
    let step = config.sample_step.max(1);
    let sampled: Vec<(usize, &Frame)> = frames.iter().enumerate().step_by(step).collect();

    let samples: Vec<MotionSample> = sampled
        .windows(2)
        .map(|pair| MotionSample {
            frame_index: pair[1].0,
            mean_motion: estimator.mean_magnitude(pair[0].1, pair[1].1),
        })
        .collect();

    build_report(samples, config.outlier_multiplier)
}

/// Flag outliers and assemble the report. A sample is anomalous at or above
/// mean + k*std of the whole sample population (ties included).
fn build_report(samples: Vec<MotionSample>, k: f64) -> MotionReport {
    if samples.is_empty() {
        return MotionReport::empty();
    }

    let values: Vec<f64> = samples.iter().map(|s| s.mean_motion).collect();
    let spread = stats::std_dev(&values);
    let threshold = stats::mean(&values) + k * spread;

    // Zero spread means every sample ties with the threshold; a population
    // with no variation has no outliers.
    let anomalies: Vec<MotionSample> = if spread == 0.0 {
        Vec::new()
    } else {
        samples
            .iter()
            .filter(|s| s.mean_motion >= threshold)
            .cloned()
            .collect()
    };

    let total_frames = samples.len();
    let anomaly_ratio = anomalies.len() as f64 / total_frames.max(1) as f64;

    log::debug!(
        "motion: {} samples, threshold {:.3}, {} anomalies (ratio {:.3})",
        total_frames,
        threshold,
        anomalies.len(),
        anomaly_ratio
    );

    MotionReport {
        total_frames,
        samples,
        anomalies,
        anomaly_ratio,
    }
}
