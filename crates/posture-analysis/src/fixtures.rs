//! Landmark frames shared by the unit tests.

use posture_core::{ExerciseDefinition, Landmark, LandmarkFrame, PoseLandmark};

pub fn lm(x: f64, y: f64) -> Landmark {
    Landmark::with_visibility(x, y, 0.0, 1.0)
}

pub fn hidden(x: f64, y: f64) -> Landmark {
    Landmark::with_visibility(x, y, 0.0, 0.2)
}

pub fn exercise(name: &str) -> ExerciseDefinition {
    ExerciseDefinition::new("test", name)
}

/// Every landmark at the image center with full visibility
pub fn base_frame() -> LandmarkFrame {
    LandmarkFrame::filled(lm(0.5, 0.5))
}

/// Balanced first position: level shoulders and hips, head over the hips,
/// soft left knee (~152°), both arms ~59° from the torso, wrists and feet
/// 0.1 apart.
pub fn balanced_first_position() -> LandmarkFrame {
    base_frame()
        .with(PoseLandmark::Nose, lm(0.5, 0.2))
        .with(PoseLandmark::LeftShoulder, lm(0.4, 0.4))
        .with(PoseLandmark::RightShoulder, lm(0.6, 0.4))
        .with(PoseLandmark::LeftElbow, lm(0.3, 0.5))
        .with(PoseLandmark::RightElbow, lm(0.7, 0.5))
        .with(PoseLandmark::LeftWrist, lm(0.45, 0.62))
        .with(PoseLandmark::RightWrist, lm(0.55, 0.62))
        .with(PoseLandmark::LeftHip, lm(0.45, 0.6))
        .with(PoseLandmark::RightHip, lm(0.55, 0.6))
        .with(PoseLandmark::LeftKnee, lm(0.45, 0.75))
        .with(PoseLandmark::RightKnee, lm(0.55, 0.75))
        .with(PoseLandmark::LeftAnkle, lm(0.52, 0.88))
        .with(PoseLandmark::RightAnkle, lm(0.55, 0.9))
        .with(PoseLandmark::LeftFootIndex, lm(0.47, 0.95))
        .with(PoseLandmark::RightFootIndex, lm(0.57, 0.95))
}

/// Balanced pose with the left shoulder raised 0.22 and the head shifted
/// 0.15 to the side
pub fn raised_shoulder() -> LandmarkFrame {
    balanced_first_position()
        .with(PoseLandmark::LeftShoulder, lm(0.4, 0.18))
        .with(PoseLandmark::Nose, lm(0.65, 0.2))
}
