//! The eight posture checks.
//!
//! Each check is a pure function of the frame, the exercise and the frame
//! confidence, and always runs. Bands and messages live in the tables below;
//! only the arm checks need per-exercise branching beyond a band lookup.
//!
//! | # | Check | Measure | Max penalty |
//! |---|-------|---------|-------------|
//! | 1 | Shoulder alignment | `|Δy|` of shoulders | 10 |
//! | 2 | Hip alignment | `|Δy|` of hips | 10 |
//! | 3 | Spine alignment | `|nose.x - midHip.x|` | 15 |
//! | 4 | Knee angle | left hip-knee-ankle | 5 |
//! | 5 | Right arm height | elbow-shoulder-hip | 60 |
//! | 6 | Left arm height | elbow-shoulder-hip | 60 |
//! | 7 | Hand distance | wrist to wrist | 25 |
//! | 8 | Foot distance | foot index to foot index | 10 |

use posture_core::{
    angle, distance, midpoint, ExerciseKind, FeedbackItem, Landmark, LandmarkFrame, MetricKey,
    PoseLandmark,
};

use crate::confidence::{scale_penalty, ConfidenceEstimator};
use crate::config::RuleQuirks;
use crate::penalty::{angle_penalty, distance_penalty, severity};

/// Result of a single check
#[derive(Debug, Clone, PartialEq)]
pub struct CheckOutcome {
    pub metric: MetricKey,
    /// Points deducted, never negative
    pub penalty: i32,
    pub max_penalty: i32,
    /// Normalized penalty in [0, 1]
    pub severity: f64,
    /// `None` only when a check has no branch for the measured value
    pub feedback: Option<FeedbackItem>,
}

/// Inputs shared by every check for one frame
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub frame: &'a LandmarkFrame,
    pub exercise: Option<ExerciseKind>,
    pub confidence: f64,
    pub estimator: ConfidenceEstimator,
    pub quirks: RuleQuirks,
}

impl<'a> RuleContext<'a> {
    /// Landmark if it is present and reliably placed
    fn visible(&self, landmark: PoseLandmark) -> Option<&'a Landmark> {
        let lm = self.frame.get(landmark)?;
        self.estimator
            .is_visible(self.frame, landmark)
            .then_some(lm)
    }

    fn is_exercise(&self, kind: ExerciseKind) -> bool {
        self.exercise == Some(kind)
    }
}

pub type Check = fn(&RuleContext<'_>) -> CheckOutcome;

/// All checks in feedback order
pub const CHECKS: [Check; 8] = [
    shoulder_alignment,
    hip_alignment,
    spine_alignment,
    knee_angle,
    right_arm_height,
    left_arm_height,
    hand_distance,
    foot_distance,
];

/// Run every check against one frame
pub fn evaluate(ctx: &RuleContext<'_>) -> Vec<CheckOutcome> {
    CHECKS.iter().map(|check| check(ctx)).collect()
}

/// Confidence-scaled outcome for a measured value
fn scored(
    ctx: &RuleContext<'_>,
    metric: MetricKey,
    raw_penalty: i32,
    max_penalty: i32,
    success: &str,
    failure: impl Into<String>,
) -> CheckOutcome {
    let penalty = scale_penalty(raw_penalty, ctx.confidence);
    let feedback = if penalty > 0 {
        FeedbackItem::error(failure, penalty)
    } else {
        FeedbackItem::success(success)
    };

    CheckOutcome {
        metric,
        penalty,
        max_penalty,
        severity: severity(penalty, max_penalty),
        feedback: Some(feedback),
    }
}

/// Fixed outcome when a check's landmarks are not visible.
///
/// The full penalty is deducted without confidence scaling. Only computed
/// penalties are scaled; this asymmetry reproduces the established scoring
/// and is kept on purpose.
fn missing(metric: MetricKey, max_penalty: i32, message: &str) -> CheckOutcome {
    CheckOutcome {
        metric,
        penalty: max_penalty,
        max_penalty,
        severity: 1.0,
        feedback: Some(FeedbackItem::error(message, max_penalty)),
    }
}

fn silent(metric: MetricKey, max_penalty: i32) -> CheckOutcome {
    CheckOutcome {
        metric,
        penalty: 0,
        max_penalty,
        severity: 0.0,
        feedback: None,
    }
}

// ============================================================================
// 1-2. LEVEL CHECKS
// ============================================================================

/// A left/right pair that should sit at the same height
struct LevelRule {
    metric: MetricKey,
    left: PoseLandmark,
    right: PoseLandmark,
    good: f64,
    bad: f64,
    max_penalty: i32,
    success: &'static str,
    failure: &'static str,
    missing: &'static str,
}

const SHOULDER_LEVEL: LevelRule = LevelRule {
    metric: MetricKey::ShoulderAlignment,
    left: PoseLandmark::LeftShoulder,
    right: PoseLandmark::RightShoulder,
    good: 0.05,
    bad: 0.20,
    max_penalty: 10,
    success: "Shoulders aligned. Keep it up.",
    failure: "Shoulders misaligned. Keep them at the same level.",
    missing: "Shoulders not detected. Adjust the camera.",
};

const HIP_LEVEL: LevelRule = LevelRule {
    metric: MetricKey::HipAlignment,
    left: PoseLandmark::LeftHip,
    right: PoseLandmark::RightHip,
    good: 0.05,
    bad: 0.20,
    max_penalty: 10,
    success: "Hips aligned. Great job.",
    failure: "Hips misaligned. Maintain balance.",
    missing: "Hips not detected. Adjust the camera.",
};

fn level_check(ctx: &RuleContext<'_>, rule: &LevelRule) -> CheckOutcome {
    match (ctx.visible(rule.left), ctx.visible(rule.right)) {
        (Some(left), Some(right)) => {
            let diff = (left.y() - right.y()).abs();
            let raw = angle_penalty(diff, rule.good, rule.bad, rule.max_penalty);
            scored(ctx, rule.metric, raw, rule.max_penalty, rule.success, rule.failure)
        }
        _ => missing(rule.metric, rule.max_penalty, rule.missing),
    }
}

pub fn shoulder_alignment(ctx: &RuleContext<'_>) -> CheckOutcome {
    level_check(ctx, &SHOULDER_LEVEL)
}

pub fn hip_alignment(ctx: &RuleContext<'_>) -> CheckOutcome {
    level_check(ctx, &HIP_LEVEL)
}

// ============================================================================
// 3. SPINE
// ============================================================================

const SPINE_GOOD: f64 = 0.10;
const SPINE_BAD: f64 = 0.20;
const SPINE_MAX_PENALTY: i32 = 15;

pub fn spine_alignment(ctx: &RuleContext<'_>) -> CheckOutcome {
    let metric = MetricKey::SpineAlignment;
    let nose = ctx.visible(PoseLandmark::Nose);
    let left_hip = ctx.visible(PoseLandmark::LeftHip);
    let right_hip = ctx.visible(PoseLandmark::RightHip);

    match (nose, left_hip, right_hip) {
        (Some(nose), Some(lh), Some(rh)) => {
            let mid_hip = midpoint(&lh.position, &rh.position);
            let offset = (nose.x() - mid_hip.x).abs();
            let raw = angle_penalty(offset, SPINE_GOOD, SPINE_BAD, SPINE_MAX_PENALTY);
            scored(
                ctx,
                metric,
                raw,
                SPINE_MAX_PENALTY,
                "Straight posture. Keep it up.",
                "Slouched posture. Keep your spine straight.",
            )
        }
        _ => missing(
            metric,
            SPINE_MAX_PENALTY,
            "Posture not detected. Adjust the camera.",
        ),
    }
}

// ============================================================================
// 4. KNEE
// ============================================================================

const KNEE_PASS_MIN: f64 = 140.0;
const KNEE_PASS_MAX: f64 = 160.0;
const KNEE_BAD: f64 = 80.0;
const KNEE_MAX_PENALTY: i32 = 5;
const KNEE_SUCCESS: &str = "Great knee angle!";

/// Left knee bend.
///
/// Angles of 160° and above, and exactly 140°, fall outside every branch and
/// produce neither penalty nor feedback unless
/// [`RuleQuirks::knee_extension_feedback`] is set.
pub fn knee_angle(ctx: &RuleContext<'_>) -> CheckOutcome {
    let metric = MetricKey::KneeAngle;
    let hip = ctx.visible(PoseLandmark::LeftHip);
    let knee = ctx.visible(PoseLandmark::LeftKnee);
    let ankle = ctx.visible(PoseLandmark::LeftAnkle);

    let (Some(hip), Some(knee), Some(ankle)) = (hip, knee, ankle) else {
        return missing(metric, KNEE_MAX_PENALTY, "Knees not visible in the camera.");
    };

    let bend = angle(&hip.position, &knee.position, &ankle.position);

    if bend > KNEE_PASS_MIN && bend < KNEE_PASS_MAX {
        scored(ctx, metric, 0, KNEE_MAX_PENALTY, KNEE_SUCCESS, "")
    } else if bend < KNEE_PASS_MIN {
        let raw = angle_penalty(bend, KNEE_PASS_MIN, KNEE_BAD, KNEE_MAX_PENALTY);
        scored(
            ctx,
            metric,
            raw,
            KNEE_MAX_PENALTY,
            KNEE_SUCCESS,
            "Knees too bent. Straighten slightly.",
        )
    } else if bend >= KNEE_PASS_MAX && ctx.quirks.knee_extension_feedback {
        scored(ctx, metric, 0, KNEE_MAX_PENALTY, KNEE_SUCCESS, "")
    } else {
        silent(metric, KNEE_MAX_PENALTY)
    }
}

// ============================================================================
// 5-6. ARM HEIGHT
// ============================================================================

const ARM_MAX_PENALTY: i32 = 60;

/// Target arm carriage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArmProfile {
    /// Hand in front of the navel: arm 40-80° from the torso
    Navel,
    /// Arm raised overhead: more than 150° from the torso
    Raised,
}

struct ArmSide {
    metric: MetricKey,
    shoulder: PoseLandmark,
    elbow: PoseLandmark,
    hip: PoseLandmark,
    navel_success: &'static str,
    navel_failure: &'static str,
    raised_success: &'static str,
    raised_failure: &'static str,
    missing: &'static str,
}

const RIGHT_ARM: ArmSide = ArmSide {
    metric: MetricKey::RightArmHeight,
    shoulder: PoseLandmark::RightShoulder,
    elbow: PoseLandmark::RightElbow,
    hip: PoseLandmark::RightHip,
    navel_success: "Right arm well extended!",
    navel_failure: "Right hand should be in front of your navel!",
    raised_success: "Right arm in the correct position!",
    raised_failure: "Right arm higher up!",
    missing: "Right side of the body not visible in the camera.",
};

const LEFT_ARM: ArmSide = ArmSide {
    metric: MetricKey::LeftArmHeight,
    shoulder: PoseLandmark::LeftShoulder,
    elbow: PoseLandmark::LeftElbow,
    hip: PoseLandmark::LeftHip,
    navel_success: "Left arm well extended!",
    navel_failure: "Left hand should be in front of your navel!",
    raised_success: "Left arm in the correct position!",
    raised_failure: "Left arm should be at shoulder height!",
    missing: "Left side of the body not visible in the camera.",
};

fn arm_check(ctx: &RuleContext<'_>, side: &ArmSide, profile: ArmProfile) -> CheckOutcome {
    let shoulder = ctx.visible(side.shoulder);
    let elbow = ctx.visible(side.elbow);
    let hip = ctx.visible(side.hip);

    let (Some(shoulder), Some(elbow), Some(hip)) = (shoulder, elbow, hip) else {
        return missing(side.metric, ARM_MAX_PENALTY, side.missing);
    };

    let lift = angle(&elbow.position, &shoulder.position, &hip.position);

    match profile {
        ArmProfile::Navel => {
            let raw = if lift > 40.0 && lift < 80.0 {
                0
            } else if lift < 40.0 {
                angle_penalty(lift, 40.0, 10.0, ARM_MAX_PENALTY)
            } else {
                angle_penalty(lift, 80.0, 150.0, ARM_MAX_PENALTY)
            };
            scored(
                ctx,
                side.metric,
                raw,
                ARM_MAX_PENALTY,
                side.navel_success,
                side.navel_failure,
            )
        }
        ArmProfile::Raised => {
            let raw = if lift > 150.0 {
                0
            } else {
                angle_penalty(lift, 150.0, 90.0, ARM_MAX_PENALTY)
            };
            scored(
                ctx,
                side.metric,
                raw,
                ARM_MAX_PENALTY,
                side.raised_success,
                side.raised_failure,
            )
        }
    }
}

pub fn right_arm_height(ctx: &RuleContext<'_>) -> CheckOutcome {
    let profile = if ctx.is_exercise(ExerciseKind::FifthPosition) {
        ArmProfile::Raised
    } else {
        ArmProfile::Navel
    };
    arm_check(ctx, &RIGHT_ARM, profile)
}

/// Left arm height.
///
/// The established exercise gate for this side reads "not Fifth Position or
/// not Fourth Position", which holds for every name, so the navel band is
/// always used. [`RuleQuirks::left_arm_exercise_gate`] routes Fourth and
/// Fifth Position through the raised profile instead.
pub fn left_arm_height(ctx: &RuleContext<'_>) -> CheckOutcome {
    let gated = ctx.is_exercise(ExerciseKind::FourthPosition)
        || ctx.is_exercise(ExerciseKind::FifthPosition);

    let profile = if ctx.quirks.left_arm_exercise_gate && gated {
        ArmProfile::Raised
    } else {
        ArmProfile::Navel
    };
    arm_check(ctx, &LEFT_ARM, profile)
}

// ============================================================================
// 7-8. DISTANCES
// ============================================================================

/// Acceptable span between a left/right pair
#[derive(Debug, Clone, Copy, PartialEq)]
struct DistanceBand {
    min: f64,
    max: f64,
    expected: &'static str,
}

const HANDS_CLOSE: DistanceBand = DistanceBand {
    min: 0.05,
    max: 0.25,
    expected: "close",
};

const HANDS_APART: DistanceBand = DistanceBand {
    min: 0.20,
    max: 0.60,
    expected: "far apart",
};

const FEET_CLOSE: DistanceBand = DistanceBand {
    min: 0.01,
    max: 0.20,
    expected: "close",
};

const FEET_APART: DistanceBand = DistanceBand {
    min: 0.25,
    max: 0.40,
    expected: "far apart",
};

const HAND_MAX_PENALTY: i32 = 25;
const FOOT_MAX_PENALTY: i32 = 10;

fn hand_band(exercise: Option<ExerciseKind>) -> DistanceBand {
    match exercise {
        Some(ExerciseKind::FirstPosition | ExerciseKind::FifthPosition) => HANDS_CLOSE,
        _ => HANDS_APART,
    }
}

fn foot_band(exercise: Option<ExerciseKind>) -> DistanceBand {
    match exercise {
        Some(ExerciseKind::SecondPosition) => FEET_APART,
        _ => FEET_CLOSE,
    }
}

pub fn hand_distance(ctx: &RuleContext<'_>) -> CheckOutcome {
    let metric = MetricKey::HandDistance;
    match (
        ctx.visible(PoseLandmark::LeftWrist),
        ctx.visible(PoseLandmark::RightWrist),
    ) {
        (Some(left), Some(right)) => {
            let band = hand_band(ctx.exercise);
            let span = distance(&left.position, &right.position);
            let raw = distance_penalty(span, band.min, band.max, HAND_MAX_PENALTY);
            scored(
                ctx,
                metric,
                raw,
                HAND_MAX_PENALTY,
                "Hand distance is correct!",
                format!("Hands should be {}. Adjust your arm position.", band.expected),
            )
        }
        _ => missing(metric, HAND_MAX_PENALTY, "Hands not visible in the camera."),
    }
}

pub fn foot_distance(ctx: &RuleContext<'_>) -> CheckOutcome {
    let metric = MetricKey::FootDistance;
    match (
        ctx.visible(PoseLandmark::LeftFootIndex),
        ctx.visible(PoseLandmark::RightFootIndex),
    ) {
        (Some(left), Some(right)) => {
            let band = foot_band(ctx.exercise);
            let span = distance(&left.position, &right.position);
            let raw = distance_penalty(span, band.min, band.max, FOOT_MAX_PENALTY);
            scored(
                ctx,
                metric,
                raw,
                FOOT_MAX_PENALTY,
                "Foot distance is correct!",
                format!("Feet should be {}. Adjust your stance.", band.expected),
            )
        }
        _ => missing(metric, FOOT_MAX_PENALTY, "Feet not visible in the camera."),
    }
}
