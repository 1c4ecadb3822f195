//! Shortlist summary across a batch of evaluated candidates

use crate::processing::evaluator::Evaluation;
use crate::processing::scoring::Recommendation;
use serde::Serialize;

/// One row of the ranked shortlist.
#[derive(Debug, Clone, Serialize)]
pub struct RankedCandidate {
    pub rank: usize,
    pub source: String,
    pub candidate_name: String,
    pub overall_score: f64,
    pub recommendation: Recommendation,
    pub experience_years: Option<f64>,
    pub used_fallback: bool,
    pub degraded: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct BandCount {
    pub recommendation: Recommendation,
    pub count: usize,
}

/// Batch statistics, candidates sorted by overall score descending.
#[derive(Debug, Clone, Serialize)]
pub struct ShortlistSummary {
    pub total_candidates: usize,
    /// Strong Fit plus Good Fit.
    pub recommended_count: usize,
    pub average_score: Option<f64>,
    /// Mean over candidates whose experience is known.
    pub average_experience_years: Option<f64>,
    pub distribution: Vec<BandCount>,
    pub candidates: Vec<RankedCandidate>,
}

impl ShortlistSummary {
    /// Build from `(source, evaluation)` pairs; `source` is usually the analysis file name.
    pub fn from_evaluations<'a, I>(evaluations: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a Evaluation)>,
    {
        let mut candidates: Vec<RankedCandidate> = evaluations
            .into_iter()
            .map(|(source, evaluation)| RankedCandidate {
                rank: 0,
                source: source.to_string(),
                candidate_name: evaluation.candidate_name().to_string(),
                overall_score: evaluation.overall_score,
                recommendation: evaluation.recommendation,
                experience_years: evaluation.experience_years(),
                used_fallback: evaluation.used_fallback(),
                degraded: evaluation.is_degraded(),
            })
            .collect();

        candidates.sort_by(|a, b| {
            b.overall_score
                .total_cmp(&a.overall_score)
                .then_with(|| a.source.cmp(&b.source))
        });
        for (index, candidate) in candidates.iter_mut().enumerate() {
            candidate.rank = index + 1;
        }

        let distribution = Recommendation::ALL
            .iter()
            .map(|band| BandCount {
                recommendation: *band,
                count: candidates.iter().filter(|c| c.recommendation == *band).count(),
            })
            .collect();

        let recommended_count = candidates
            .iter()
            .filter(|c| c.recommendation.is_recommended())
            .count();

        Self {
            total_candidates: candidates.len(),
            recommended_count,
            average_score: mean(candidates.iter().map(|c| c.overall_score)),
            average_experience_years: mean(candidates.iter().filter_map(|c| c.experience_years)),
            distribution,
            candidates,
        }
    }

    pub fn count_for(&self, recommendation: Recommendation) -> usize {
        self.distribution
            .iter()
            .find(|band| band.recommendation == recommendation)
            .map_or(0, |band| band.count)
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}
