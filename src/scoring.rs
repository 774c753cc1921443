// Authenticity scoring
// Combines the face and motion signals into a single bounded score via
// additive penalties. Additive on purpose: each subtraction traces back to one
// concrete signal, and more suspicious evidence never raises the score.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::constants::{
    ANALYSIS_VERSION, LABEL_AUTHENTIC_THRESHOLD, LABEL_QUESTIONABLE_THRESHOLD,
    PENALTY_FACE_SUSPICION, PENALTY_LIKELY_DEEPFAKE, PENALTY_MOTION_ANOMALY,
    SCORE_FACE_SUSPICION_RATIO, SCORE_MOTION_ANOMALY_RATIO,
};
use crate::face::FaceSummary;
use crate::motion::MotionReport;

/// Penalty weights and trigger thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreConfig {
    pub deepfake_penalty: f64,
    pub motion_penalty: f64,
    pub face_penalty: f64,
    /// Motion anomaly ratio above which the motion penalty applies
    pub motion_anomaly_threshold: f64,
    /// Face suspicious ratio above which the face penalty applies
    pub face_suspicion_threshold: f64,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            deepfake_penalty: PENALTY_LIKELY_DEEPFAKE,
            motion_penalty: PENALTY_MOTION_ANOMALY,
            face_penalty: PENALTY_FACE_SUSPICION,
            motion_anomaly_threshold: SCORE_MOTION_ANOMALY_RATIO,
            face_suspicion_threshold: SCORE_FACE_SUSPICION_RATIO,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthenticityLabel {
    LikelyAuthentic,
    QuestionableAuthenticity,
    LikelyManipulated,
}

impl AuthenticityLabel {
    /// Exclusive thresholds, evaluated in order: a score of exactly 0.7 is
    /// questionable, not authentic.
    pub fn from_score(score: f64) -> Self {
        if score > LABEL_AUTHENTIC_THRESHOLD {
            AuthenticityLabel::LikelyAuthentic
        } else if score > LABEL_QUESTIONABLE_THRESHOLD {
            AuthenticityLabel::QuestionableAuthenticity
        } else {
            AuthenticityLabel::LikelyManipulated
        }
    }
}

impl std::fmt::Display for AuthenticityLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            AuthenticityLabel::LikelyAuthentic => "Likely authentic",
            AuthenticityLabel::QuestionableAuthenticity => "Questionable authenticity",
            AuthenticityLabel::LikelyManipulated => "Likely manipulated/fake",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticityReport {
    /// Bounded [0, 1]; higher means more plausible content
    pub score: f64,
    pub label: AuthenticityLabel,
    pub motion: MotionReport,
    pub faces: FaceSummary,
    pub analysis_version: u32,
    pub generated_at: String,
}

/// Score face and motion signals into an authenticity report.
///
/// Starts at 1.0 and subtracts each triggered penalty independently, then
/// clamps. All three penalties together leave 0.1, never a negative score.
pub fn score(faces: FaceSummary, motion: MotionReport, config: &ScoreConfig) -> AuthenticityReport {
    let mut value = 1.0;

    if faces.likely_deepfake {
        value -= config.deepfake_penalty;
    }
    if motion.anomaly_ratio > config.motion_anomaly_threshold {
        value -= config.motion_penalty;
    }
    if faces.suspicious_ratio > config.face_suspicion_threshold {
        value -= config.face_penalty;
    }

    let value = value.clamp(0.0, 1.0);
    let label = AuthenticityLabel::from_score(value);

    log::debug!(
        "authenticity: score {:.2} ({}) from face_ratio {:.2}, anomaly_ratio {:.2}",
        value,
        label,
        faces.suspicious_ratio,
        motion.anomaly_ratio
    );

    AuthenticityReport {
        score: value,
        label,
        motion,
        faces,
        analysis_version: ANALYSIS_VERSION,
        generated_at: Utc::now().to_rfc3339(),
    }
}
