// Analysis pipeline
// Runs the independent face and motion passes over a frame sequence, scores
// the combined signals, and optionally attaches a narrative and feasibility
// verdict. Every stage degrades to a zero-signal placeholder rather than
// failing the whole run.

use serde::{Deserialize, Serialize};

use crate::face::detect::FaceDetector;
use crate::face::region::FaceConfig;
use crate::face::{self, FaceSummary};
use crate::feasibility::{self, FeasibilityAssessment, FeasibilityOracle};
use crate::frame::Frame;
use crate::motion::flow::FlowEstimator;
use crate::motion::{self, MotionConfig, MotionReport};
use crate::narrative::{self, FrameCaptioner, NarrativeSummarizer};
use crate::scoring::{self, AuthenticityReport, ScoreConfig};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub face: FaceConfig,
    pub motion: MotionConfig,
    pub score: ScoreConfig,
}

/// Full assessment of one video: authenticity plus the optional narrative
/// track and feasibility verdict.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoAssessment {
    pub authenticity: AuthenticityReport,
    pub narrative: Option<String>,
    pub feasibility: Option<FeasibilityAssessment>,
}

/// External collaborators, all optional. Missing ones degrade: no captioner
/// means no narrative, no oracle means the keyword heuristic.
#[derive(Default)]
pub struct Collaborators<'a> {
    pub captioner: Option<&'a dyn FrameCaptioner>,
    pub summarizer: Option<&'a dyn NarrativeSummarizer>,
    pub oracle: Option<&'a dyn FeasibilityOracle>,
}

/// Compute the authenticity report for an in-memory frame sequence.
///
/// The face and motion passes are independent; an empty frame sequence yields
/// the explicit zero report so downstream consumers never need null handling.
pub fn analyze_video(
    frames: &[Frame],
    config: &AnalysisConfig,
    detector: &dyn FaceDetector,
    flow: &dyn FlowEstimator,
) -> AuthenticityReport {
    if frames.is_empty() {
        log::debug!("empty frame sequence; returning zero report");
        return scoring::score(
            FaceSummary::empty(),
            MotionReport::empty(),
            &config.score,
        );
    }

    let faces = face::summarize_frames(frames, detector, &config.face);
    let motion = motion::analyze_frame_sequence(frames, &config.motion, flow);

    scoring::score(faces, motion, &config.score)
}

/// Authenticity plus narrative and feasibility in one pass.
pub fn assess_video(
    frames: &[Frame],
    config: &AnalysisConfig,
    detector: &dyn FaceDetector,
    flow: &dyn FlowEstimator,
    collaborators: &Collaborators<'_>,
) -> VideoAssessment {
    let authenticity = analyze_video(frames, config, detector, flow);

    let narrative = collaborators.captioner.map(|captioner| {
        let captions = narrative::caption_frames(frames, captioner);
        narrative::narrative_from_captions(&captions, collaborators.summarizer)
    });

    let feasibility = narrative.as_deref().map(|story| {
        feasibility::assess_with_fallback(
            collaborators.oracle,
            story,
            Some(&authenticity.motion),
        )
    });

    VideoAssessment {
        authenticity,
        narrative,
        feasibility,
    }
}
