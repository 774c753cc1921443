// Narrative seams
// Captioning and summarization are external model calls behind traits. The
// local helpers reproduce the degraded modes: placeholder captions on
// per-frame failure, and prefix-stripped truncation when no summarizer runs.

use regex::Regex;

use crate::constants::{NARRATIVE_MAX_FALLBACK_CHARS, NARRATIVE_MIN_SUMMARY_WORDS};
use crate::error::Result;
use crate::frame::Frame;

/// Maps one frame to free-text. External model call.
pub trait FrameCaptioner {
    fn caption(&self, frame: &Frame) -> Result<String>;
}

/// Condenses combined captions into a short narrative. External model call.
pub trait NarrativeSummarizer {
    fn summarize(&self, text: &str) -> Result<String>;
}

/// Caption every frame, degrading per-frame failures to placeholder text so a
/// single model error never loses the rest of the sequence.
pub fn caption_frames(frames: &[Frame], captioner: &dyn FrameCaptioner) -> Vec<String> {
    frames
        .iter()
        .enumerate()
        .map(|(i, frame)| match captioner.caption(frame) {
            Ok(text) => format!("Frame {}: {}", i + 1, text),
            Err(e) => {
                log::warn!("captioning failed on frame {}: {}", i + 1, e);
                format!("Frame {}: caption unavailable", i + 1)
            }
        })
        .collect()
}

/// Join captions into one narrative string: strip the "Frame N:" prefixes and
/// collapse runs of whitespace.
pub fn combine_captions(captions: &[String]) -> String {
    let joined = captions.join(" ");
    let no_prefixes = Regex::new(r"Frame \d+:")
        .expect("static regex")
        .replace_all(&joined, "");
    let collapsed = Regex::new(r"\s+")
        .expect("static regex")
        .replace_all(&no_prefixes, " ");
    collapsed.trim().to_string()
}

/// Build the narrative for a caption sequence. Short texts pass through
/// unsummarized; summarizer failure degrades to the truncated combined text.
pub fn narrative_from_captions(
    captions: &[String],
    summarizer: Option<&dyn NarrativeSummarizer>,
) -> String {
    let combined = combine_captions(captions);

    if combined.split_whitespace().count() < NARRATIVE_MIN_SUMMARY_WORDS {
        return combined;
    }

    if let Some(summarizer) = summarizer {
        match summarizer.summarize(&combined) {
            Ok(summary) => return summary,
            Err(e) => {
                log::warn!("summarization failed: {}; using combined captions", e);
            }
        }
    }

    truncate_narrative(&combined)
}

fn truncate_narrative(text: &str) -> String {
    if text.len() <= NARRATIVE_MAX_FALLBACK_CHARS {
        return text.to_string();
    }
    let mut end = NARRATIVE_MAX_FALLBACK_CHARS;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &text[..end])
}
