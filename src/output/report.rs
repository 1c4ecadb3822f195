//! Report structures wrapping evaluations with run metadata

use crate::config::ComponentWeights;
use crate::output::summary::ShortlistSummary;
use crate::processing::evaluator::Evaluation;
use crate::processing::scoring::ScoreComponent;
use serde::Serialize;
use std::path::Path;
use std::time::SystemTime;

/// A single candidate's evaluation as handed to formatters.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationReport {
    pub evaluation: Evaluation,
    pub score_breakdown: Vec<ComponentBreakdown>,
    pub metadata: ReportMetadata,
}

/// One component's score, weight and contribution to the overall score.
#[derive(Debug, Clone, Serialize)]
pub struct ComponentBreakdown {
    pub component: ScoreComponent,
    pub score: f64,
    pub weight: f64,
    pub contribution: f64,
}

/// Ranked batch of candidates evaluated against one job description.
#[derive(Debug, Clone, Serialize)]
pub struct ShortlistReport {
    pub summary: ShortlistSummary,
    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    /// When the report was generated
    pub generated_at: SystemTime,

    /// Version of the evaluator used
    pub evaluator_version: String,

    /// Analysis files evaluated
    pub analysis_files: Vec<String>,

    /// Résumé file, when a single one was supplied
    pub resume_file: Option<String>,

    /// Job description file
    pub job_file: Option<String>,

    /// Total processing time
    pub processing_time_ms: u64,
}

impl ReportMetadata {
    pub fn new(analysis_files: Vec<String>, resume_file: Option<&Path>, job_file: Option<&Path>) -> Self {
        Self {
            generated_at: SystemTime::now(),
            evaluator_version: env!("CARGO_PKG_VERSION").to_string(),
            analysis_files,
            resume_file: resume_file.map(|p| p.display().to_string()),
            job_file: job_file.map(|p| p.display().to_string()),
            processing_time_ms: 0,
        }
    }

    pub fn with_processing_time(mut self, processing_time_ms: u64) -> Self {
        self.processing_time_ms = processing_time_ms;
        self
    }

    pub fn generated_at_display(&self) -> String {
        chrono::DateTime::<chrono::Utc>::from(self.generated_at)
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string()
    }
}

impl EvaluationReport {
    pub fn new(evaluation: Evaluation, weights: &ComponentWeights, metadata: ReportMetadata) -> Self {
        let score_breakdown = ScoreComponent::ALL
            .iter()
            .map(|component| {
                let score = evaluation.components.get(*component);
                let weight = component.weight(weights);
                ComponentBreakdown {
                    component: *component,
                    score,
                    weight,
                    contribution: score * weight,
                }
            })
            .collect();

        let metadata = metadata.with_processing_time(evaluation.processing_time_ms);

        Self {
            evaluation,
            score_breakdown,
            metadata,
        }
    }

    /// Overall score rounded to two decimals for display.
    pub fn overall_score_display(&self) -> String {
        format!("{:.2}", self.evaluation.overall_score)
    }

    /// Label plus the suggested next step, e.g. "Good Fit - Recommend interview".
    pub fn verdict(&self) -> String {
        let recommendation = self.evaluation.recommendation;
        format!("{} - {}", recommendation.label(), recommendation.action())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::processing::evaluator::{EvaluationInput, Evaluator};

    #[test]
    fn test_breakdown_sums_to_overall() {
        let config = Config::default();
        let evaluator = Evaluator::new(&config).unwrap();
        let evaluation = evaluator
            .evaluate(&EvaluationInput::new(
                "Candidate Name: Kim\nStrong Matches Score: 60\nPartial Matches Score: 40\nJob Stability: 7",
            ))
            .unwrap();
        let overall = evaluation.overall_score;

        let report = EvaluationReport::new(
            evaluation,
            &config.scoring.weights,
            ReportMetadata::new(vec!["kim.txt".to_string()], None, None),
        );

        let total: f64 = report.score_breakdown.iter().map(|c| c.contribution).sum();
        assert!((total - overall).abs() < 1e-9);
        assert_eq!(report.score_breakdown.len(), 7);
        assert!(report.verdict().ends_with(report.evaluation.recommendation.action()));
    }
}
