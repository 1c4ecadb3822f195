//! Evaluation pipeline: extract, normalize, fall back to skill matching, score

use crate::config::Config;
use crate::error::{EvaluatorError, Result};
use crate::processing::diagnostics::Diagnostic;
use crate::processing::extractor::FieldExtractor;
use crate::processing::fields::Field;
use crate::processing::normalizer::HeuristicNormalizer;
use crate::processing::record::CandidateRecord;
use crate::processing::scoring::{Recommendation, ScoreComponents, ScoringEngine};
use crate::processing::skill_matcher::{SkillMatchReport, SkillMatcher};
use crate::processing::text_cleaner::TextCleaner;
use serde::Serialize;
use std::time::Instant;

/// Owns every compiled table used by the pipeline. Build once, share freely.
pub struct Evaluator {
    extractor: FieldExtractor,
    normalizer: HeuristicNormalizer,
    skill_matcher: SkillMatcher,
    scoring: ScoringEngine,
    cleaner: TextCleaner,
}

/// Texts for one candidate. Only the analysis is required.
#[derive(Debug, Clone, Copy, Default)]
pub struct EvaluationInput<'a> {
    pub analysis_text: Option<&'a str>,
    pub resume_text: Option<&'a str>,
    pub job_description_text: Option<&'a str>,
}

impl<'a> EvaluationInput<'a> {
    pub fn new(analysis_text: &'a str) -> Self {
        Self {
            analysis_text: Some(analysis_text),
            ..Self::default()
        }
    }

    pub fn with_resume(mut self, resume_text: &'a str) -> Self {
        self.resume_text = Some(resume_text);
        self
    }

    pub fn with_job_description(mut self, job_description_text: &'a str) -> Self {
        self.job_description_text = Some(job_description_text);
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    pub record: CandidateRecord,
    pub components: ScoreComponents,
    /// Unrounded weighted score in `0..=100`.
    pub overall_score: f64,
    pub recommendation: Recommendation,
    /// Present when the skill fallback supplied the strong/partial scores.
    pub skill_fallback: Option<SkillMatchReport>,
    pub diagnostics: Vec<Diagnostic>,
    pub processing_time_ms: u64,
}

impl Evaluation {
    pub fn candidate_name(&self) -> &str {
        self.record.text(Field::CandidateName).unwrap_or("Unknown Candidate")
    }

    /// True when any score component fell back to a default.
    pub fn is_degraded(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_degradation)
    }

    pub fn used_fallback(&self) -> bool {
        self.skill_fallback.is_some()
    }

    pub fn experience_years(&self) -> Option<f64> {
        self.record.number(Field::TotalExperienceYears)
    }
}

impl Evaluator {
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            extractor: FieldExtractor::new(),
            normalizer: HeuristicNormalizer::new(&config.watchlists)?,
            skill_matcher: SkillMatcher::new()?,
            scoring: ScoringEngine::new(&config.scoring, &config.watchlists)?,
            cleaner: TextCleaner::new(),
        })
    }

    /// Run the full pipeline for one candidate.
    pub fn evaluate(&self, input: &EvaluationInput<'_>) -> Result<Evaluation> {
        let start_time = Instant::now();

        let analysis = input.analysis_text.ok_or_else(|| {
            EvaluatorError::AnalysisParseFailure("no analysis text supplied".to_string())
        })?;

        let extraction = self.extractor.extract(analysis)?;
        let mut record = extraction.record;
        let mut diagnostics = extraction.diagnostics;

        diagnostics.extend(self.normalizer.normalize(&mut record, input.resume_text));

        let skill_fallback = match (input.resume_text, input.job_description_text) {
            (Some(resume), Some(job)) if SkillMatcher::should_run(&record, Some(resume), Some(job)) => {
                log::info!("No usable match scores in analysis, falling back to skill matching");
                let report = self.skill_matcher.match_skills(resume, job);
                self.apply_fallback(&mut record, &report);
                Some(report)
            }
            _ => None,
        };

        let card = self.scoring.score(&record);
        for diagnostic in &card.diagnostics {
            log::warn!("{}", diagnostic);
        }
        diagnostics.extend(card.diagnostics);

        record.set(Field::RelevancyScore, format!("{:.1}", card.components.relevancy));

        let evaluation = Evaluation {
            record,
            components: card.components,
            overall_score: card.overall_score,
            recommendation: card.recommendation,
            skill_fallback,
            diagnostics,
            processing_time_ms: start_time.elapsed().as_millis() as u64,
        };

        log::info!(
            "Evaluated {}: {:.2} ({})",
            evaluation.candidate_name(),
            evaluation.overall_score,
            evaluation.recommendation
        );

        Ok(evaluation)
    }

    fn apply_fallback(&self, record: &mut CandidateRecord, report: &SkillMatchReport) {
        record.set(Field::StrongMatchesScore, format!("{}", report.strong_score));
        record.set(Field::PartialMatchesScore, format!("{}", report.partial_score));
        record.set(Field::StrongMatchesReasoning, self.cleaner.clean(&report.strong_reasoning));
        record.set(Field::PartialMatchesReasoning, self.cleaner.clean(&report.partial_reasoning));
    }
}
