//! Fundamental types for the posture scoring engine.

use chrono::{DateTime, Utc};
use nalgebra::{Point2, Point3 as NaPoint3};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};

/// Session identifier linking the frames of one capture window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

/// Timestamp wrapper with nanosecond precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(pub i64);

impl Timestamp {
    pub fn now() -> Self {
        Self(Utc::now().timestamp_nanos_opt().unwrap_or(0))
    }

    pub fn from_nanos(nanos: i64) -> Self {
        Self(nanos)
    }

    pub fn as_nanos(&self) -> i64 {
        self.0
    }

    pub fn to_datetime(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_nanos(self.0)
    }
}

/// Normalized image-space point.
///
/// `x` and `y` lie roughly in [0, 1]; `z` is a relative depth whose sign and
/// scale depend on the pose model.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn origin() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    pub fn to_nalgebra(&self) -> NaPoint3<f64> {
        NaPoint3::new(self.x, self.y, self.z)
    }

    pub fn from_nalgebra(p: NaPoint3<f64>) -> Self {
        Self::new(p.x, p.y, p.z)
    }

    /// Image-plane projection, dropping depth
    pub fn xy(&self) -> Point2<f64> {
        Point2::new(self.x, self.y)
    }
}

/// One estimated body keypoint.
///
/// A missing `visibility` means the producer did not report one; such
/// landmarks are treated as visible.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    #[serde(flatten)]
    pub position: Point3,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<f64>,
}

impl Landmark {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            position: Point3::new(x, y, z),
            visibility: None,
        }
    }

    pub fn with_visibility(x: f64, y: f64, z: f64, visibility: f64) -> Self {
        Self {
            position: Point3::new(x, y, z),
            visibility: Some(visibility),
        }
    }

    pub fn x(&self) -> f64 {
        self.position.x
    }

    pub fn y(&self) -> f64 {
        self.position.y
    }
}

/// 33-point body landmark definition (MediaPipe Pose ordering)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum PoseLandmark {
    Nose = 0,
    LeftEyeInner = 1,
    LeftEye = 2,
    LeftEyeOuter = 3,
    RightEyeInner = 4,
    RightEye = 5,
    RightEyeOuter = 6,
    LeftEar = 7,
    RightEar = 8,
    MouthLeft = 9,
    MouthRight = 10,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftPinky = 17,
    RightPinky = 18,
    LeftIndex = 19,
    RightIndex = 20,
    LeftThumb = 21,
    RightThumb = 22,
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
    LeftHeel = 29,
    RightHeel = 30,
    LeftFootIndex = 31,
    RightFootIndex = 32,
}

impl PoseLandmark {
    pub const COUNT: usize = 33;

    pub const ALL: [PoseLandmark; Self::COUNT] = [
        Self::Nose,
        Self::LeftEyeInner,
        Self::LeftEye,
        Self::LeftEyeOuter,
        Self::RightEyeInner,
        Self::RightEye,
        Self::RightEyeOuter,
        Self::LeftEar,
        Self::RightEar,
        Self::MouthLeft,
        Self::MouthRight,
        Self::LeftShoulder,
        Self::RightShoulder,
        Self::LeftElbow,
        Self::RightElbow,
        Self::LeftWrist,
        Self::RightWrist,
        Self::LeftPinky,
        Self::RightPinky,
        Self::LeftIndex,
        Self::RightIndex,
        Self::LeftThumb,
        Self::RightThumb,
        Self::LeftHip,
        Self::RightHip,
        Self::LeftKnee,
        Self::RightKnee,
        Self::LeftAnkle,
        Self::RightAnkle,
        Self::LeftHeel,
        Self::RightHeel,
        Self::LeftFootIndex,
        Self::RightFootIndex,
    ];

    pub fn from_index(idx: usize) -> Option<Self> {
        Self::ALL.get(idx).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

/// One full set of landmarks captured at one instant.
///
/// Always holds exactly [`PoseLandmark::COUNT`] slots. A slot is `None` when
/// the producer delivered fewer points than the canonical layout; such
/// landmarks are never considered visible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Option<Landmark>>", into = "Vec<Option<Landmark>>")]
pub struct LandmarkFrame {
    landmarks: Vec<Option<Landmark>>,
}

impl LandmarkFrame {
    /// Frame with every slot absent
    pub fn empty() -> Self {
        Self {
            landmarks: vec![None; PoseLandmark::COUNT],
        }
    }

    /// Frame with every slot set to the same landmark
    pub fn filled(landmark: Landmark) -> Self {
        Self {
            landmarks: vec![Some(landmark); PoseLandmark::COUNT],
        }
    }

    /// Build a frame from an ordered landmark list, failing closed.
    ///
    /// Extra entries are dropped and missing trailing entries become absent.
    pub fn from_landmarks(landmarks: Vec<Landmark>) -> Self {
        if landmarks.len() != PoseLandmark::COUNT {
            tracing::warn!(
                expected = PoseLandmark::COUNT,
                actual = landmarks.len(),
                "landmark count mismatch, treating missing indices as not visible"
            );
        }
        landmarks.into_iter().map(Some).collect::<Vec<_>>().into()
    }

    /// Build a frame, rejecting anything other than exactly 33 landmarks
    pub fn try_from_landmarks(landmarks: Vec<Landmark>) -> Result<Self> {
        if landmarks.len() != PoseLandmark::COUNT {
            return Err(Error::LandmarkCount {
                expected: PoseLandmark::COUNT,
                actual: landmarks.len(),
            });
        }
        Ok(landmarks.into_iter().map(Some).collect::<Vec<_>>().into())
    }

    /// Build a frame from a flat buffer as handed over by a JS bridge.
    ///
    /// `stride` is 3 (`x, y, z`) or 4 (`x, y, z, visibility`).
    pub fn from_flat(data: &[f32], stride: usize) -> Result<Self> {
        if stride != 3 && stride != 4 {
            return Err(Error::InvalidInput(format!(
                "unsupported landmark stride {stride}, expected 3 or 4"
            )));
        }
        if data.len() % stride != 0 {
            return Err(Error::InvalidInput(format!(
                "buffer of {} values is not a multiple of stride {stride}",
                data.len()
            )));
        }
        if data.len() / stride != PoseLandmark::COUNT {
            return Err(Error::LandmarkCount {
                expected: PoseLandmark::COUNT,
                actual: data.len() / stride,
            });
        }

        let landmarks = data
            .chunks_exact(stride)
            .map(|c| {
                let mut lm = Landmark::new(c[0] as f64, c[1] as f64, c[2] as f64);
                if stride == 4 {
                    lm.visibility = Some(c[3] as f64);
                }
                lm
            })
            .collect();

        Self::try_from_landmarks(landmarks)
    }

    pub fn get(&self, landmark: PoseLandmark) -> Option<&Landmark> {
        self.landmarks[landmark.index()].as_ref()
    }

    pub fn set(&mut self, landmark: PoseLandmark, value: Landmark) {
        self.landmarks[landmark.index()] = Some(value);
    }

    pub fn clear(&mut self, landmark: PoseLandmark) {
        self.landmarks[landmark.index()] = None;
    }

    /// Builder-style [`LandmarkFrame::set`]
    pub fn with(mut self, landmark: PoseLandmark, value: Landmark) -> Self {
        self.set(landmark, value);
        self
    }

    pub fn landmarks(&self) -> &[Option<Landmark>] {
        &self.landmarks
    }

    /// Number of slots actually delivered by the producer
    pub fn present_count(&self) -> usize {
        self.landmarks.iter().flatten().count()
    }
}

impl Default for LandmarkFrame {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Vec<Option<Landmark>>> for LandmarkFrame {
    fn from(mut landmarks: Vec<Option<Landmark>>) -> Self {
        landmarks.resize(PoseLandmark::COUNT, None);
        Self { landmarks }
    }
}

impl From<LandmarkFrame> for Vec<Option<Landmark>> {
    fn from(frame: LandmarkFrame) -> Self {
        frame.landmarks
    }
}

/// Outcome category of a feedback entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackKind {
    Success,
    Error,
}

/// One human-readable feedback entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackItem {
    pub kind: FeedbackKind,
    pub message: String,
    /// `0` for successes, the negated penalty for errors
    pub score_delta: i32,
}

impl FeedbackItem {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: FeedbackKind::Success,
            message: message.into(),
            score_delta: 0,
        }
    }

    pub fn error(message: impl Into<String>, penalty: i32) -> Self {
        Self {
            kind: FeedbackKind::Error,
            message: message.into(),
            score_delta: -penalty,
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == FeedbackKind::Error
    }
}

/// Per-check severity metric identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MetricKey {
    ShoulderAlignment,
    HipAlignment,
    SpineAlignment,
    KneeAngle,
    RightArmHeight,
    LeftArmHeight,
    HandDistance,
    FootDistance,
}

impl MetricKey {
    pub const ALL: [MetricKey; 8] = [
        MetricKey::ShoulderAlignment,
        MetricKey::HipAlignment,
        MetricKey::SpineAlignment,
        MetricKey::KneeAngle,
        MetricKey::RightArmHeight,
        MetricKey::LeftArmHeight,
        MetricKey::HandDistance,
        MetricKey::FootDistance,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            MetricKey::ShoulderAlignment => "shoulderAlignment",
            MetricKey::HipAlignment => "hipAlignment",
            MetricKey::SpineAlignment => "spineAlignment",
            MetricKey::KneeAngle => "kneeAngle",
            MetricKey::RightArmHeight => "rightArmHeight",
            MetricKey::LeftArmHeight => "leftArmHeight",
            MetricKey::HandDistance => "handDistance",
            MetricKey::FootDistance => "footDistance",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pose_landmark_roundtrip() {
        for i in 0..PoseLandmark::COUNT {
            let lm = PoseLandmark::from_index(i).unwrap();
            assert_eq!(lm.index(), i);
        }
        assert!(PoseLandmark::from_index(33).is_none());
        assert_eq!(PoseLandmark::LeftShoulder.index(), 11);
        assert_eq!(PoseLandmark::RightFootIndex.index(), 32);
    }

    #[test]
    fn test_truncated_frame_fails_closed() {
        let frame = LandmarkFrame::from_landmarks(vec![Landmark::new(0.5, 0.5, 0.0); 12]);
        assert_eq!(frame.landmarks().len(), PoseLandmark::COUNT);
        assert_eq!(frame.present_count(), 12);
        assert!(frame.get(PoseLandmark::LeftShoulder).is_some());
        assert!(frame.get(PoseLandmark::RightShoulder).is_none());
    }

    #[test]
    fn test_strict_frame_rejects_wrong_count() {
        let err = LandmarkFrame::try_from_landmarks(vec![Landmark::new(0.0, 0.0, 0.0); 17])
            .unwrap_err();
        assert!(matches!(
            err,
            Error::LandmarkCount {
                expected: 33,
                actual: 17
            }
        ));
    }

    #[test]
    fn test_from_flat_with_visibility() {
        let mut data = vec![0.5f32; 33 * 4];
        data[3] = 0.25;
        let frame = LandmarkFrame::from_flat(&data, 4).unwrap();
        let nose = frame.get(PoseLandmark::Nose).unwrap();
        assert_eq!(nose.visibility, Some(0.25));
        assert!(LandmarkFrame::from_flat(&data[..10], 4).is_err());
        assert!(LandmarkFrame::from_flat(&data, 5).is_err());
    }

    #[test]
    fn test_frame_json_shape() {
        let frame = LandmarkFrame::empty().with(
            PoseLandmark::Nose,
            Landmark::with_visibility(0.5, 0.25, 0.0, 0.9),
        );
        let json = serde_json::to_value(&frame).unwrap();
        let slots = json.as_array().unwrap();
        assert_eq!(slots.len(), 33);
        assert_eq!(slots[0]["y"], 0.25);
        assert_eq!(slots[0]["visibility"], 0.9);
        assert!(slots[1].is_null());

        // Short arrays from the wire are padded with absent slots
        let short: LandmarkFrame = serde_json::from_str(r#"[{"x":0.1,"y":0.2,"z":0.0}]"#).unwrap();
        assert_eq!(short.landmarks().len(), 33);
        assert_eq!(short.get(PoseLandmark::Nose).unwrap().visibility, None);
    }

    #[test]
    fn test_feedback_item_wire_names() {
        let item = FeedbackItem::error("Hips misaligned. Maintain balance.", 4);
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains(r#""kind":"error""#));
        assert!(json.contains(r#""scoreDelta":-4"#));
        assert_eq!(
            serde_json::to_string(&MetricKey::KneeAngle).unwrap(),
            format!("\"{}\"", MetricKey::KneeAngle.name())
        );
    }
}
