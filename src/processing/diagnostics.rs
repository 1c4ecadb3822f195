//! Non-fatal findings recorded while evaluating a candidate

use crate::processing::fields::Field;
use crate::processing::scoring::ScoreComponent;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A field could not be coerced to its expected shape and was defaulted.
    FieldCoercionDefault {
        field: Field,
        raw: String,
        default: String,
    },
    /// A score component fell back to its default because its input was missing or invalid.
    ScoringDegradation {
        component: ScoreComponent,
        reason: String,
        default: f64,
    },
}

impl Diagnostic {
    pub fn coercion(field: Field, raw: impl Into<String>, default: impl Into<String>) -> Self {
        Diagnostic::FieldCoercionDefault {
            field,
            raw: raw.into(),
            default: default.into(),
        }
    }

    pub fn degradation(component: ScoreComponent, reason: impl Into<String>, default: f64) -> Self {
        Diagnostic::ScoringDegradation {
            component,
            reason: reason.into(),
            default,
        }
    }

    pub fn is_degradation(&self) -> bool {
        matches!(self, Diagnostic::ScoringDegradation { .. })
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::FieldCoercionDefault { field, raw, default } => {
                let shown = if default.is_empty() { "empty" } else { default.as_str() };
                write!(f, "{}: could not interpret {:?}, using {}", field, truncate(raw, 60), shown)
            }
            Diagnostic::ScoringDegradation { component, reason, default } => {
                write!(f, "{} score defaulted to {}: {}", component, default, reason)
            }
        }
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let head: String = text.chars().take(max_chars).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_readable() {
        let diag = Diagnostic::coercion(Field::JobStability, "very stable", "Not Available");
        assert_eq!(
            diag.to_string(),
            "Job Stability: could not interpret \"very stable\", using Not Available"
        );

        let diag = Diagnostic::degradation(ScoreComponent::Experience, "missing", 0.0);
        assert!(diag.is_degradation());
        assert_eq!(diag.to_string(), "experience score defaulted to 0: missing");
    }
}
