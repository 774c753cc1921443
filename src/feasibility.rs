// Feasibility verdicts
// The real oracle is a hosted model behind the FeasibilityOracle trait. The
// heuristic below is the designed degraded mode: a pure keyword scan that
// always produces some verdict when the oracle is missing or errors out.

use serde::{Deserialize, Serialize};

use crate::constants::{
    FEASIBILITY_MOTION_RATIO, FEASIBILITY_QUESTIONABLE_MIN, IMPOSSIBLE_KEYWORDS,
    QUESTIONABLE_KEYWORDS,
};
use crate::error::Result;
use crate::motion::MotionReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeasibilityVerdict {
    Feasible,
    NotFeasible,
    Questionable,
}

impl std::fmt::Display for FeasibilityVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            FeasibilityVerdict::Feasible => "Feasible",
            FeasibilityVerdict::NotFeasible => "Not Feasible",
            FeasibilityVerdict::Questionable => "Questionable",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeasibilityAssessment {
    pub verdict: FeasibilityVerdict,
    pub explanation: String,
    pub looks_real: String,
    pub looks_fake: String,
}

/// External capability judging whether a described scene is physically
/// plausible. Implementations may call a hosted model; errors fall back to
/// the local heuristic.
pub trait FeasibilityOracle {
    fn assess(
        &self,
        narrative: &str,
        motion: Option<&MotionReport>,
    ) -> Result<FeasibilityAssessment>;
}

/// Keyword fallback verdict. Pure function: identical inputs always yield the
/// identical assessment.
pub fn heuristic_assessment(
    narrative: &str,
    motion: Option<&MotionReport>,
) -> FeasibilityAssessment {
    let lowered = narrative.to_lowercase();

    let impossible_hits = IMPOSSIBLE_KEYWORDS
        .iter()
        .filter(|word| lowered.contains(*word))
        .count();
    let questionable_hits = QUESTIONABLE_KEYWORDS
        .iter()
        .filter(|word| lowered.contains(*word))
        .count();

    let motion_suspicious = motion
        .map(|m| m.anomaly_ratio > FEASIBILITY_MOTION_RATIO)
        .unwrap_or(false);

    let (verdict, explanation) = if impossible_hits > 0 || motion_suspicious {
        (
            FeasibilityVerdict::NotFeasible,
            "Contains elements that appear physically impossible or have suspicious motion patterns.",
        )
    } else if questionable_hits >= FEASIBILITY_QUESTIONABLE_MIN {
        (
            FeasibilityVerdict::Questionable,
            "Contains elements that are unusual but potentially possible with special circumstances.",
        )
    } else {
        (
            FeasibilityVerdict::Feasible,
            "Appears to show realistic, physically possible events.",
        )
    };

    FeasibilityAssessment {
        verdict,
        explanation: explanation.to_string(),
        looks_real: "Natural lighting, consistent physics, smooth camera movement.".to_string(),
        looks_fake: "Unusual events, potential motion anomalies, or impossible scenarios."
            .to_string(),
    }
}

/// Try the oracle first; degrade transparently to the heuristic when no
/// oracle is configured or the call fails.
pub fn assess_with_fallback(
    oracle: Option<&dyn FeasibilityOracle>,
    narrative: &str,
    motion: Option<&MotionReport>,
) -> FeasibilityAssessment {
    if let Some(oracle) = oracle {
        match oracle.assess(narrative, motion) {
            Ok(assessment) => return assessment,
            Err(e) => {
                log::warn!("feasibility oracle failed: {}; using heuristic fallback", e);
            }
        }
    }
    heuristic_assessment(narrative, motion)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VeracityError;

    fn motion_with_ratio(anomaly_ratio: f64) -> MotionReport {
        MotionReport {
            total_frames: 10,
            samples: Vec::new(),
            anomalies: Vec::new(),
            anomaly_ratio,
        }
    }

    #[test]
    fn test_dragon_is_not_feasible() {
        let result = heuristic_assessment("A dragon lands on the castle roof", None);
        assert_eq!(result.verdict, FeasibilityVerdict::NotFeasible);

        // Motion data does not rescue an impossible narrative
        let calm = motion_with_ratio(0.0);
        let result = heuristic_assessment("A dragon lands on the castle roof", Some(&calm));
        assert_eq!(result.verdict, FeasibilityVerdict::NotFeasible);
    }

    #[test]
    fn test_suspicious_motion_alone_is_not_feasible() {
        let jumpy = motion_with_ratio(0.4);
        let result = heuristic_assessment("A person walks a dog in the park", Some(&jumpy));
        assert_eq!(result.verdict, FeasibilityVerdict::NotFeasible);
    }

    #[test]
    fn test_motion_ratio_boundary_is_exclusive() {
        let borderline = motion_with_ratio(0.3);
        let result = heuristic_assessment("A person walks a dog in the park", Some(&borderline));
        assert_eq!(result.verdict, FeasibilityVerdict::Feasible);
    }

    #[test]
    fn test_two_questionable_markers_downgrade() {
        let result = heuristic_assessment("A tiger leaps through fire at the circus", None);
        assert_eq!(result.verdict, FeasibilityVerdict::Questionable);
    }

    #[test]
    fn test_single_questionable_marker_stays_feasible() {
        let result = heuristic_assessment("A shark swims near the boat", None);
        assert_eq!(result.verdict, FeasibilityVerdict::Feasible);
    }

    #[test]
    fn test_scan_is_case_insensitive() {
        let result = heuristic_assessment("A UNICORN appears in the meadow", None);
        assert_eq!(result.verdict, FeasibilityVerdict::NotFeasible);
    }

    #[test]
    fn test_deterministic() {
        let a = heuristic_assessment("People jump near an explosion", None);
        let b = heuristic_assessment("People jump near an explosion", None);
        assert_eq!(a.verdict, b.verdict);
        assert_eq!(a.explanation, b.explanation);
    }

    struct FailingOracle;

    impl FeasibilityOracle for FailingOracle {
        fn assess(
            &self,
            _narrative: &str,
            _motion: Option<&MotionReport>,
        ) -> crate::error::Result<FeasibilityAssessment> {
            Err(VeracityError::Oracle("model unreachable".into()))
        }
    }

    struct FixedOracle(FeasibilityVerdict);

    impl FeasibilityOracle for FixedOracle {
        fn assess(
            &self,
            _narrative: &str,
            _motion: Option<&MotionReport>,
        ) -> crate::error::Result<FeasibilityAssessment> {
            Ok(FeasibilityAssessment {
                verdict: self.0,
                explanation: "oracle".to_string(),
                looks_real: String::new(),
                looks_fake: String::new(),
            })
        }
    }

    #[test]
    fn test_oracle_result_wins_when_available() {
        let oracle = FixedOracle(FeasibilityVerdict::Questionable);
        let result = assess_with_fallback(Some(&oracle), "a dragon", None);
        assert_eq!(result.verdict, FeasibilityVerdict::Questionable);
        assert_eq!(result.explanation, "oracle");
    }

    #[test]
    fn test_oracle_failure_falls_back_to_heuristic() {
        let result = assess_with_fallback(Some(&FailingOracle), "a dragon flies overhead", None);
        assert_eq!(result.verdict, FeasibilityVerdict::NotFeasible);
    }

    #[test]
    fn test_no_oracle_uses_heuristic() {
        let result = assess_with_fallback(None, "a calm walk on the beach", None);
        assert_eq!(result.verdict, FeasibilityVerdict::Feasible);
    }
}
