//! Frame-level visibility confidence.
//!
//! At extreme camera angles fewer landmarks are reliably placed. Rather than
//! rejecting such frames, computed penalties are scaled down by a confidence
//! factor derived from how many critical landmarks are visible:
//!
//! | View | Visible critical | Factor |
//! |------|------------------|--------|
//! | Frontal | 9/9 | 1.00 |
//! | Semi-lateral | 7/9 | 0.78 |
//! | Lateral | 5/9 | 0.56 |
//! | Rear | ≤4/9 | 0.50 (floor) |

use posture_core::{Landmark, LandmarkFrame, PoseLandmark};

use crate::config::AnalysisConfig;

/// Default visibility threshold
pub const DEFAULT_VISIBILITY_THRESHOLD: f64 = 0.5;

/// Default lower bound of the confidence factor
pub const DEFAULT_CONFIDENCE_FLOOR: f64 = 0.5;

/// Landmarks whose visibility drives the confidence factor
pub const CRITICAL_LANDMARKS: [PoseLandmark; 9] = [
    PoseLandmark::Nose,
    PoseLandmark::LeftShoulder,
    PoseLandmark::RightShoulder,
    PoseLandmark::LeftElbow,
    PoseLandmark::RightElbow,
    PoseLandmark::LeftWrist,
    PoseLandmark::RightWrist,
    PoseLandmark::LeftHip,
    PoseLandmark::RightHip,
];

/// Whether a landmark slot holds a reliably placed point.
///
/// Absent slots are never visible. Landmarks without a visibility score are
/// always visible.
pub fn is_visible(landmark: Option<&Landmark>, threshold: f64) -> bool {
    match landmark {
        None => false,
        Some(lm) => match lm.visibility {
            Some(v) => v > threshold,
            None => true,
        },
    }
}

/// Scale a computed penalty by the frame confidence, rounding down
pub fn scale_penalty(penalty: i32, confidence: f64) -> i32 {
    if penalty == 0 {
        return 0;
    }
    (penalty as f64 * confidence).floor() as i32
}

/// Confidence estimator
#[derive(Debug, Clone, Copy)]
pub struct ConfidenceEstimator {
    threshold: f64,
    floor: f64,
}

impl ConfidenceEstimator {
    pub fn new(threshold: f64, floor: f64) -> Self {
        Self { threshold, floor }
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self::new(config.visibility_threshold, config.confidence_floor)
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn is_visible(&self, frame: &LandmarkFrame, landmark: PoseLandmark) -> bool {
        is_visible(frame.get(landmark), self.threshold)
    }

    /// Number of visible critical landmarks
    pub fn visible_critical(&self, frame: &LandmarkFrame) -> usize {
        CRITICAL_LANDMARKS
            .iter()
            .filter(|&&lm| self.is_visible(frame, lm))
            .count()
    }

    /// Confidence factor in `[floor, 1.0]`
    pub fn confidence(&self, frame: &LandmarkFrame) -> f64 {
        let ratio = self.visible_critical(frame) as f64 / CRITICAL_LANDMARKS.len() as f64;
        ratio.max(self.floor)
    }
}

impl Default for ConfidenceEstimator {
    fn default() -> Self {
        Self::new(DEFAULT_VISIBILITY_THRESHOLD, DEFAULT_CONFIDENCE_FLOOR)
    }
}
