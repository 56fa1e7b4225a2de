//! Exercise identity.
//!
//! The exercise catalog lives outside this crate, but its display names are
//! part of the scoring contract: rule tables branch on them by exact,
//! case-sensitive match. Renaming a catalog entry changes how it is scored.

use serde::{Deserialize, Serialize};

/// Exercise definition as supplied by the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseDefinition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub key_points: Vec<String>,
}

impl ExerciseDefinition {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            key_points: Vec::new(),
        }
    }

    pub fn with_key_points<I, S>(mut self, key_points: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.key_points = key_points.into_iter().map(Into::into).collect();
        self
    }

    /// Known exercise this definition names, if any
    pub fn kind(&self) -> Option<ExerciseKind> {
        ExerciseKind::from_name(&self.name)
    }
}

/// Exercises with dedicated branches in the rule tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExerciseKind {
    FirstPosition,
    SecondPosition,
    ThirdPosition,
    FourthPosition,
    FifthPosition,
    Releve,
}

impl ExerciseKind {
    pub const ALL: [ExerciseKind; 6] = [
        ExerciseKind::FirstPosition,
        ExerciseKind::SecondPosition,
        ExerciseKind::ThirdPosition,
        ExerciseKind::FourthPosition,
        ExerciseKind::FifthPosition,
        ExerciseKind::Releve,
    ];

    /// Catalog display name
    pub fn name(&self) -> &'static str {
        match self {
            ExerciseKind::FirstPosition => "First Position",
            ExerciseKind::SecondPosition => "Second Position",
            ExerciseKind::ThirdPosition => "Third Position",
            ExerciseKind::FourthPosition => "Fourth Position",
            ExerciseKind::FifthPosition => "Fifth Position",
            ExerciseKind::Releve => "Relevé",
        }
    }

    /// Exact, case-sensitive lookup. No fuzzy fallback.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_name_match() {
        assert_eq!(
            ExerciseKind::from_name("Fifth Position"),
            Some(ExerciseKind::FifthPosition)
        );
        assert_eq!(ExerciseKind::from_name("fifth position"), None);
        assert_eq!(ExerciseKind::from_name("Fifth Position "), None);
        assert_eq!(ExerciseKind::from_name("Relevé"), Some(ExerciseKind::Releve));
    }

    #[test]
    fn test_definition_kind() {
        let def = ExerciseDefinition::new("2", "Second Position")
            .with_key_points(["Hip square", "Long spine"]);
        assert_eq!(def.kind(), Some(ExerciseKind::SecondPosition));
        assert_eq!(def.key_points.len(), 2);

        let unknown = ExerciseDefinition::new("9", "Grand Jeté");
        assert_eq!(unknown.kind(), None);
    }

    #[test]
    fn test_definition_json() {
        let def: ExerciseDefinition = serde_json::from_str(
            r#"{"id":"1","name":"First Position","keyPoints":["Heels together"]}"#,
        )
        .unwrap();
        assert_eq!(def.kind(), Some(ExerciseKind::FirstPosition));
        assert_eq!(def.key_points, vec!["Heels together".to_string()]);
    }
}
