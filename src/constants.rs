// Veracity Constants
// Heuristic thresholds and weights are reproduced reference behavior.
// Do not change without bumping ANALYSIS_VERSION.

pub const ANALYSIS_VERSION: u32 = 1;

// ----- Face region heuristics -----

// Laplacian variance below this means the region is flat/over-smoothed
pub const FACE_BLUR_THRESHOLD: f64 = 100.0;
// Luminance standard deviation below this means low contrast
pub const FACE_CONTRAST_THRESHOLD: f64 = 20.0;
// Mean luminance outside this band is unusual
pub const FACE_BRIGHTNESS_LOW: f64 = 50.0;
pub const FACE_BRIGHTNESS_HIGH: f64 = 200.0;
// A single weak signal is not enough; at least this many rules must trigger
pub const FACE_MIN_SUSPICIOUS_REASONS: usize = 2;

// A video is called likely-deepfake above this fraction of suspicious faces
pub const FACE_DEEPFAKE_RATIO: f64 = 0.5;

// ----- Face reason strings -----
// These appear verbatim in FaceSummary::common_issues.

pub const REASON_LOW_DETAIL: &str = "Low detail/blur";
pub const REASON_LOW_CONTRAST: &str = "Low contrast";
pub const REASON_UNUSUAL_BRIGHTNESS: &str = "Unusual brightness";

// ----- Sliding-window face detector defaults -----

pub const DETECT_WINDOW_SIZE: u32 = 48;
pub const DETECT_WINDOW_STRIDE: u32 = 24;
// Window luminance variance band considered face-like
pub const DETECT_VARIANCE_MIN: f64 = 150.0;
pub const DETECT_VARIANCE_MAX: f64 = 4000.0;
// Window mean luminance band considered face-like
pub const DETECT_BRIGHTNESS_MIN: f64 = 40.0;
pub const DETECT_BRIGHTNESS_MAX: f64 = 220.0;

// ----- Motion analysis -----

// Sample every Nth frame by default
pub const MOTION_SAMPLE_STEP: usize = 5;
// A sample is anomalous at mean + k*std; ties count as anomalous
pub const MOTION_OUTLIER_MULTIPLIER: f64 = 2.0;

// Block-matching flow estimator parameters
pub const FLOW_BLOCK_SIZE: u32 = 16;
pub const FLOW_SEARCH_RADIUS: i32 = 4;

// ----- Authenticity scoring -----

// Additive penalties subtracted from a starting score of 1.0
pub const PENALTY_LIKELY_DEEPFAKE: f64 = 0.4;
pub const PENALTY_MOTION_ANOMALY: f64 = 0.3;
pub const PENALTY_FACE_SUSPICION: f64 = 0.2;

// Penalty trigger thresholds
pub const SCORE_MOTION_ANOMALY_RATIO: f64 = 0.2;
pub const SCORE_FACE_SUSPICION_RATIO: f64 = 0.3;

// Label thresholds: score > AUTHENTIC is authentic, > QUESTIONABLE is questionable
pub const LABEL_AUTHENTIC_THRESHOLD: f64 = 0.7;
pub const LABEL_QUESTIONABLE_THRESHOLD: f64 = 0.4;

// ----- Feasibility heuristic -----

// Motion anomaly ratio above which a scene is called not feasible
pub const FEASIBILITY_MOTION_RATIO: f64 = 0.3;
// At least this many questionable keyword hits downgrade the verdict
pub const FEASIBILITY_QUESTIONABLE_MIN: usize = 2;

// Markers of physically impossible events
pub const IMPOSSIBLE_KEYWORDS: [&str; 7] = [
    "fly", "floating", "teleport", "magic", "supernatural", "dragon", "unicorn",
];

// Markers of unusual-but-possible events
pub const QUESTIONABLE_KEYWORDS: [&str; 5] = [
    "shark", "tiger", "explosion", "fire", "jump",
];

// ----- Narrative fallback -----

// Combined captions longer than this are truncated when no summarizer is available
pub const NARRATIVE_MAX_FALLBACK_CHARS: usize = 500;
// Below this many words a narrative is returned as-is without summarization
pub const NARRATIVE_MIN_SUMMARY_WORDS: usize = 20;
