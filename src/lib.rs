// Veracity - heuristic video authenticity analysis
//
// Turns an ordered frame sequence into per-pair motion statistics with
// anomaly flags, per-face artifact heuristics, and a combined bounded
// authenticity score, with a keyword fallback for feasibility verdicts when
// no external oracle is available.

pub mod constants;
pub mod error;
pub mod face;
pub mod feasibility;
pub mod frame;
pub mod motion;
pub mod narrative;
pub mod pipeline;
pub mod scoring;
pub mod stats;

#[cfg(test)]
mod tests;

pub use error::{Result, VeracityError};
pub use frame::{Frame, FrameRegion, FrameSource};
pub use pipeline::{analyze_video, assess_video, AnalysisConfig, Collaborators, VideoAssessment};
pub use scoring::{AuthenticityLabel, AuthenticityReport};
