// Face analysis pipeline
// Detects facial regions per frame, scores each with the region heuristics,
// and reduces the per-face results into a suspicious-ratio summary.

pub mod detect;
pub mod region;

use std::collections::BTreeSet;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::constants::FACE_DEEPFAKE_RATIO;
use crate::frame::Frame;
use self::detect::{BoundingBox, FaceDetector};
use self::region::{analyze_region, FaceAnalysisResult, FaceConfig};

/// One detected face and its region verdict.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaceObservation {
    pub bbox: BoundingBox,
    pub analysis: FaceAnalysisResult,
}

/// Per-frame face detection and analysis results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameFaceReport {
    pub frame_index: usize,
    pub face_count: usize,
    pub faces: Vec<FaceObservation>,
}

/// Aggregate face verdict across all frames.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaceSummary {
    pub total_faces: usize,
    pub suspicious_faces: usize,
    /// suspicious_faces / max(total_faces, 1)
    pub suspicious_ratio: f64,
    /// Union of all triggered reason strings, deduplicated
    pub common_issues: BTreeSet<String>,
    pub likely_deepfake: bool,
}

impl FaceSummary {
    /// Zero element of the reduction: no faces, nothing suspicious.
    pub fn empty() -> Self {
        Self {
            total_faces: 0,
            suspicious_faces: 0,
            suspicious_ratio: 0.0,
            common_issues: BTreeSet::new(),
            likely_deepfake: false,
        }
    }
}

/// Detect and analyze faces in a single frame.
///
/// Detector failure degrades this frame to zero faces rather than failing the
/// batch; the miss only shows up as a reduced count in the summary.
pub fn analyze_frame(
    frame: &Frame,
    frame_index: usize,
    detector: &dyn FaceDetector,
    config: &FaceConfig,
) -> FrameFaceReport {
    let boxes = match detector.detect(frame) {
        Ok(boxes) => boxes,
        Err(e) => {
            log::warn!("face detection failed on frame {}: {}", frame_index, e);
            Vec::new()
        }
    };

    let faces: Vec<FaceObservation> = boxes
        .into_iter()
        .map(|bbox| {
            let view = frame.region(frame_index, bbox.x, bbox.y, bbox.width, bbox.height);
            FaceObservation {
                bbox,
                analysis: analyze_region(&view, config),
            }
        })
        .collect();

    FrameFaceReport {
        frame_index,
        face_count: faces.len(),
        faces,
    }
}

/// Map every frame to a [`FrameFaceReport`] in parallel, then reduce to a
/// [`FaceSummary`]. Frames are independent, so the map carries no shared state.
pub fn summarize_frames(
    frames: &[Frame],
    detector: &dyn FaceDetector,
    config: &FaceConfig,
) -> FaceSummary {
    let reports: Vec<FrameFaceReport> = frames
        .par_iter()
        .enumerate()
        .map(|(i, frame)| analyze_frame(frame, i, detector, config))
        .collect();

    summarize_reports(&reports)
}

/// Reduce per-frame reports into the aggregate summary.
pub fn summarize_reports(reports: &[FrameFaceReport]) -> FaceSummary {
    let mut summary = FaceSummary::empty();

    for report in reports {
        summary.total_faces += report.face_count;
        for face in &report.faces {
            if face.analysis.suspicious {
                summary.suspicious_faces += 1;
                summary
                    .common_issues
                    .extend(face.analysis.reasons.iter().cloned());
            }
        }
    }

    summary.suspicious_ratio = summary.suspicious_faces as f64 / summary.total_faces.max(1) as f64;
    summary.likely_deepfake = summary.suspicious_ratio > FACE_DEEPFAKE_RATIO;
    summary
}
