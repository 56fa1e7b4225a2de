//! # Posture-Analysis
//!
//! Rule-based posture scoring for ballet exercises.
//!
//! ## Pipeline
//!
//! Every frame runs through the same synchronous pipeline:
//!
//! 1. **Confidence** - share of visible critical landmarks, floored at 0.5
//! 2. **Rules** - eight independent checks, each yielding a penalty and feedback
//! 3. **Aggregate** - `100 - Σ penalties`, clamped to [0, 100]
//!
//! A session collects frame results and finalizes into an average score, the
//! most frequent feedback and a display classification.
//!
//! ## Example
//!
//! ```
//! use posture_analysis::{PostureAnalyzer, SessionAggregator};
//! use posture_core::{ExerciseDefinition, Landmark, LandmarkFrame};
//!
//! let analyzer = PostureAnalyzer::default();
//! let exercise = ExerciseDefinition::new("first", "First Position");
//! let frame = LandmarkFrame::filled(Landmark::new(0.5, 0.5, 0.0));
//!
//! let mut session = SessionAggregator::new();
//! session.record(&analyzer.analyze(&frame, &exercise));
//! let summary = session.finalize();
//! assert_eq!(summary.frame_count, 1);
//! ```

pub mod analyzer;
pub mod classifier;
pub mod confidence;
pub mod config;
pub mod penalty;
pub mod rules;
pub mod session;

#[cfg(test)]
mod fixtures;

pub use analyzer::*;
pub use classifier::*;
pub use confidence::*;
pub use crate::config::{AnalysisConfig, RuleQuirks};
pub use penalty::*;
pub use rules::{evaluate, CheckOutcome, RuleContext, CHECKS};
pub use session::*;
