//! Analysis configuration.

use std::path::Path;

use posture_core::{Error, Result};
use serde::{Deserialize, Serialize};

const ENV_PREFIX: &str = "POSTURE";

/// Complete engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Visibility above which a landmark counts as reliably placed
    pub visibility_threshold: f64,

    /// Lower bound on the frame confidence factor
    pub confidence_floor: f64,

    /// How many entries per kind the session summary keeps
    pub top_feedback_limit: usize,

    /// Switches for the two known rule-table anomalies
    pub quirks: RuleQuirks,
}

/// Corrections for rule behavior that is reproduced as observed by default.
///
/// Both default to `false`. Flipping them changes scoring output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleQuirks {
    /// Emit a success entry for knee angles at or above 160 degrees instead
    /// of staying silent
    pub knee_extension_feedback: bool,

    /// Route "Fourth Position" and "Fifth Position" through the raised-arm
    /// branch of the left arm check instead of the default band
    pub left_arm_exercise_gate: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            visibility_threshold: 0.5,
            confidence_floor: 0.5,
            top_feedback_limit: 3,
            quirks: RuleQuirks::default(),
        }
    }
}

impl AnalysisConfig {
    /// Parse and validate a JSON configuration document.
    ///
    /// Missing fields take their default values.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a file, with `POSTURE_*` environment variables layered on top.
    ///
    /// The format follows the file extension. Nested quirk flags are addressed
    /// with a double underscore, e.g. `POSTURE_QUIRKS__KNEE_EXTENSION_FEEDBACK`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let settings = ::config::Config::builder()
            .add_source(::config::File::from(path.as_ref()))
            .add_source(environment())
            .build()
            .map_err(config_error)?;

        Self::from_settings(settings)
    }

    /// Load from `POSTURE_*` environment variables only
    pub fn from_env() -> Result<Self> {
        let settings = ::config::Config::builder()
            .add_source(environment())
            .build()
            .map_err(config_error)?;

        Self::from_settings(settings)
    }

    fn from_settings(settings: ::config::Config) -> Result<Self> {
        let config: Self = settings.try_deserialize().map_err(config_error)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.visibility_threshold) {
            return Err(Error::Config(format!(
                "visibility_threshold must be within [0, 1], got {}",
                self.visibility_threshold
            )));
        }
        if !(0.0..=1.0).contains(&self.confidence_floor) {
            return Err(Error::Config(format!(
                "confidence_floor must be within [0, 1], got {}",
                self.confidence_floor
            )));
        }
        if self.top_feedback_limit == 0 {
            return Err(Error::Config(
                "top_feedback_limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn environment() -> ::config::Environment {
    ::config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

fn config_error(e: ::config::ConfigError) -> Error {
    Error::Config(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = AnalysisConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.quirks.knee_extension_feedback);
        assert!(!config.quirks.left_arm_exercise_gate);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config =
            AnalysisConfig::from_json_str(r#"{"quirks":{"left_arm_exercise_gate":true}}"#)
                .unwrap();
        assert!(config.quirks.left_arm_exercise_gate);
        assert!(!config.quirks.knee_extension_feedback);
        assert_eq!(config.top_feedback_limit, 3);
        assert_eq!(config.visibility_threshold, 0.5);
    }

    #[test]
    fn test_rejects_out_of_range() {
        let err = AnalysisConfig::from_json_str(r#"{"confidence_floor":1.5}"#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err = AnalysisConfig::from_json_str(r#"{"top_feedback_limit":0}"#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_malformed_json() {
        let err = AnalysisConfig::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[test]
    fn test_from_file() {
        let path = std::env::temp_dir().join(format!(
            "posture-analysis-config-{}.json",
            std::process::id()
        ));
        std::fs::write(
            &path,
            r#"{"visibility_threshold":0.6,"quirks":{"knee_extension_feedback":true}}"#,
        )
        .unwrap();

        let config = AnalysisConfig::from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.visibility_threshold, 0.6);
        assert!(config.quirks.knee_extension_feedback);
        assert_eq!(config.confidence_floor, 0.5);
    }

    #[test]
    fn test_missing_file() {
        let err = AnalysisConfig::from_file("/nonexistent/posture.json").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
