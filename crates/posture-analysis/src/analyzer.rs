//! Per-frame posture analyzer: confidence, rules and score aggregation.

use std::collections::BTreeMap;

use posture_core::{ExerciseDefinition, FeedbackItem, LandmarkFrame, MetricKey};
use serde::{Deserialize, Serialize};

use crate::confidence::ConfidenceEstimator;
use crate::config::AnalysisConfig;
use crate::rules::{evaluate, CheckOutcome, RuleContext};

/// Analysis result for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameResult {
    /// Correctness score in [0, 100]
    pub score: u8,
    /// Feedback in check order
    pub feedback: Vec<FeedbackItem>,
    /// Per-check severity in [0, 1]
    pub metrics: BTreeMap<MetricKey, f64>,
}

impl FrameResult {
    pub fn errors(&self) -> impl Iterator<Item = &FeedbackItem> {
        self.feedback.iter().filter(|f| f.is_error())
    }

    pub fn metric(&self, key: MetricKey) -> f64 {
        self.metrics.get(&key).copied().unwrap_or(0.0)
    }
}

/// Fold check outcomes into a frame result.
///
/// Score is `100 - Σ penalties`, clamped to [0, 100].
pub fn aggregate(outcomes: &[CheckOutcome]) -> FrameResult {
    let total_penalty: i64 = outcomes.iter().map(|o| o.penalty as i64).sum();
    let score = (100 - total_penalty).clamp(0, 100) as u8;

    let feedback = outcomes
        .iter()
        .filter_map(|o| o.feedback.clone())
        .collect();

    let metrics = outcomes.iter().map(|o| (o.metric, o.severity)).collect();

    FrameResult {
        score,
        feedback,
        metrics,
    }
}

/// Posture analyzer.
///
/// Immutable after construction; one synchronous call per frame.
#[derive(Debug, Clone, Default)]
pub struct PostureAnalyzer {
    config: AnalysisConfig,
    estimator: ConfidenceEstimator,
}

impl PostureAnalyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        let estimator = ConfidenceEstimator::from_config(&config);
        Self { config, estimator }
    }

    /// Score one frame against an exercise
    pub fn analyze(&self, frame: &LandmarkFrame, exercise: &ExerciseDefinition) -> FrameResult {
        let confidence = self.estimator.confidence(frame);
        let ctx = RuleContext {
            frame,
            exercise: exercise.kind(),
            confidence,
            estimator: self.estimator,
            quirks: self.config.quirks,
        };

        let outcomes = evaluate(&ctx);
        let result = aggregate(&outcomes);

        tracing::debug!(
            exercise = %exercise.name,
            score = result.score,
            confidence,
            errors = result.errors().count(),
            "analyzed frame"
        );

        result
    }

    /// Frame confidence factor as used by [`PostureAnalyzer::analyze`]
    pub fn confidence(&self, frame: &LandmarkFrame) -> f64 {
        self.estimator.confidence(frame)
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }
}
