//! Maps a session score to a headline, message and display tier.

use serde::{Deserialize, Serialize};

/// Display tier of a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FeedbackTier {
    Flawless,
    Excellent,
    Great,
    Good,
    Improving,
    KeepPracticing,
}

impl FeedbackTier {
    /// Accent color for the tier
    pub fn color(&self) -> &'static str {
        match self {
            FeedbackTier::Flawless => "green",
            FeedbackTier::Excellent => "lime",
            FeedbackTier::Great => "blue",
            FeedbackTier::Good => "yellow",
            FeedbackTier::Improving => "orange",
            FeedbackTier::KeepPracticing => "rose",
        }
    }
}

/// Headline and encouragement for a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreFeedback {
    pub title: &'static str,
    pub message: &'static str,
    pub tier: FeedbackTier,
}

/// Lower score bound of each tier, best first
const BANDS: [(u8, ScoreFeedback); 5] = [
    (
        95,
        ScoreFeedback {
            title: "Flawless Execution! 🏆",
            message: "Perfect posture! You mastered this exercise.",
            tier: FeedbackTier::Flawless,
        },
    ),
    (
        85,
        ScoreFeedback {
            title: "Excellent Execution! 🎉",
            message: "Only minor adjustments needed. Keep it up!",
            tier: FeedbackTier::Excellent,
        },
    ),
    (
        75,
        ScoreFeedback {
            title: "Great Work! 👏",
            message: "Your posture looks good. Small tweaks are still possible.",
            tier: FeedbackTier::Great,
        },
    ),
    (
        65,
        ScoreFeedback {
            title: "Good Effort! 💪",
            message: "You're on the right track. Focus on areas for improvement.",
            tier: FeedbackTier::Good,
        },
    ),
    (
        50,
        ScoreFeedback {
            title: "You Can Improve! 🧐",
            message: "Review key posture points and try again.",
            tier: FeedbackTier::Improving,
        },
    ),
];

const FALLBACK: ScoreFeedback = ScoreFeedback {
    title: "Keep Practicing! 🌟",
    message: "Don't give up. With dedication, you'll get there!",
    tier: FeedbackTier::KeepPracticing,
};

/// Classify a score in [0, 100]. Scores above 100 fall in the top band.
pub fn classify(score: u8) -> ScoreFeedback {
    BANDS
        .iter()
        .find(|(min, _)| score >= *min)
        .map(|(_, feedback)| *feedback)
        .unwrap_or(FALLBACK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_edges() {
        assert_eq!(classify(100).tier, FeedbackTier::Flawless);
        assert_eq!(classify(95).tier, FeedbackTier::Flawless);
        assert_eq!(classify(94).tier, FeedbackTier::Excellent);
        assert_eq!(classify(85).tier, FeedbackTier::Excellent);
        assert_eq!(classify(84).tier, FeedbackTier::Great);
        assert_eq!(classify(75).tier, FeedbackTier::Great);
        assert_eq!(classify(74).tier, FeedbackTier::Good);
        assert_eq!(classify(65).tier, FeedbackTier::Good);
        assert_eq!(classify(64).tier, FeedbackTier::Improving);
        assert_eq!(classify(50).tier, FeedbackTier::Improving);
        assert_eq!(classify(49).tier, FeedbackTier::KeepPracticing);
        assert_eq!(classify(0).tier, FeedbackTier::KeepPracticing);
    }

    #[test]
    fn test_every_score_has_one_tier_in_order() {
        let rank = |tier: FeedbackTier| match tier {
            FeedbackTier::KeepPracticing => 0,
            FeedbackTier::Improving => 1,
            FeedbackTier::Good => 2,
            FeedbackTier::Great => 3,
            FeedbackTier::Excellent => 4,
            FeedbackTier::Flawless => 5,
        };
        let mut previous = 0;
        for score in 0..=100u8 {
            let current = rank(classify(score).tier);
            assert!(current >= previous, "tier dropped at {score}");
            previous = current;
        }
        assert_eq!(previous, 5);
    }

    #[test]
    fn test_titles_and_colors() {
        let top = classify(97);
        assert_eq!(top.title, "Flawless Execution! 🏆");
        assert_eq!(top.tier.color(), "green");

        let low = classify(12);
        assert_eq!(low.title, "Keep Practicing! 🌟");
        assert_eq!(low.message, "Don't give up. With dedication, you'll get there!");
        assert_eq!(low.tier.color(), "rose");
        assert_eq!(classify(70).tier.color(), "yellow");
    }
}
