//! Session aggregation over a capture window.
//!
//! The external driver records one [`FrameResult`] per analyzed frame and
//! finalizes once the capture window closes. Finalizing never fails: an
//! empty session averages to the last observed live score, or to zero.

use posture_core::{FeedbackItem, FeedbackKind, SessionId, Timestamp};
use serde::{Deserialize, Serialize};

use crate::analyzer::FrameResult;
use crate::classifier::{classify, ScoreFeedback};
use crate::config::AnalysisConfig;

/// Default number of entries kept per feedback kind
pub const DEFAULT_TOP_FEEDBACK_LIMIT: usize = 3;

/// A feedback message and how often it occurred
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackCount {
    pub message: String,
    pub count: usize,
}

/// Most frequent feedback messages per kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopFeedback {
    pub success: Vec<FeedbackCount>,
    pub error: Vec<FeedbackCount>,
}

/// Rank feedback messages by frequency, separately for each kind.
///
/// Messages are grouped by exact text. Groups with equal counts keep the
/// order in which their message first appeared.
pub fn top_feedback(items: &[FeedbackItem], limit: usize) -> TopFeedback {
    TopFeedback {
        success: count_messages(items, FeedbackKind::Success, limit),
        error: count_messages(items, FeedbackKind::Error, limit),
    }
}

fn count_messages(items: &[FeedbackItem], kind: FeedbackKind, limit: usize) -> Vec<FeedbackCount> {
    let mut counts: Vec<FeedbackCount> = Vec::new();

    for item in items.iter().filter(|f| f.kind == kind) {
        match counts.iter_mut().find(|c| c.message == item.message) {
            Some(entry) => entry.count += 1,
            None => counts.push(FeedbackCount {
                message: item.message.clone(),
                count: 1,
            }),
        }
    }

    // sort_by is stable
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(limit);
    counts
}

/// Finalized summary of one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionAggregate {
    pub session_id: SessionId,
    pub exercise: Option<String>,
    pub score_history: Vec<u8>,
    pub feedback_history: Vec<FeedbackItem>,
    pub average_score: f64,
    pub top_feedback: TopFeedback,
    pub frame_count: usize,
    pub completed_at: Timestamp,
}

impl SessionAggregate {
    /// The last `n` recorded scores, oldest first
    pub fn recent_scores(&self, n: usize) -> &[u8] {
        let start = self.score_history.len().saturating_sub(n);
        &self.score_history[start..]
    }

    /// Classify the rounded average score
    pub fn classification(&self) -> ScoreFeedback {
        let rounded = self.average_score.round().clamp(0.0, 100.0) as u8;
        classify(rounded)
    }
}

/// Collects frame results for one session
#[derive(Debug, Clone)]
pub struct SessionAggregator {
    session_id: SessionId,
    exercise: Option<String>,
    score_history: Vec<u8>,
    feedback_history: Vec<FeedbackItem>,
    last_score: Option<u8>,
    limit: usize,
}

impl SessionAggregator {
    pub fn new() -> Self {
        Self {
            session_id: SessionId::new(),
            exercise: None,
            score_history: Vec::new(),
            feedback_history: Vec::new(),
            last_score: None,
            limit: DEFAULT_TOP_FEEDBACK_LIMIT,
        }
    }

    /// Session bound to an exercise name, using the configured summary size
    pub fn for_exercise(name: impl Into<String>, config: &AnalysisConfig) -> Self {
        Self {
            exercise: Some(name.into()),
            ..Self::new()
        }
        .with_limit(config.top_feedback_limit)
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Seed the live score used when no frame gets recorded
    pub fn with_fallback_score(mut self, score: u8) -> Self {
        self.last_score = Some(score);
        self
    }

    /// Update the live score without recording a frame
    pub fn observe_score(&mut self, score: u8) {
        self.last_score = Some(score);
    }

    /// Append one frame result to the history
    pub fn record(&mut self, result: &FrameResult) {
        self.score_history.push(result.score);
        self.feedback_history.extend(result.feedback.iter().cloned());
        self.last_score = Some(result.score);
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub fn len(&self) -> usize {
        self.score_history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.score_history.is_empty()
    }

    pub fn finalize(self) -> SessionAggregate {
        let frame_count = self.score_history.len();
        let average_score = if frame_count == 0 {
            self.last_score.map(f64::from).unwrap_or(0.0)
        } else {
            let total: u64 = self.score_history.iter().map(|&s| u64::from(s)).sum();
            total as f64 / frame_count as f64
        };

        let top_feedback = top_feedback(&self.feedback_history, self.limit);

        tracing::info!(
            session = %self.session_id.0,
            exercise = self.exercise.as_deref().unwrap_or("unknown"),
            frames = frame_count,
            average_score,
            "session finalized"
        );

        SessionAggregate {
            session_id: self.session_id,
            exercise: self.exercise,
            score_history: self.score_history,
            feedback_history: self.feedback_history,
            average_score,
            top_feedback,
            frame_count,
            completed_at: Timestamp::now(),
        }
    }
}

impl Default for SessionAggregator {
    fn default() -> Self {
        Self::new()
    }
}
