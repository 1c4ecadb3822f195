//! Weighted candidate scoring and recommendation bands

use crate::config::{ComponentWeights, ScoringConfig, WatchlistConfig};
use crate::error::Result;
use crate::processing::diagnostics::Diagnostic;
use crate::processing::fields::Field;
use crate::processing::keywords::KeywordSet;
use crate::processing::record::CandidateRecord;
use crate::processing::text_cleaner::whole_word_regex;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreComponent {
    Relevancy,
    Experience,
    Stability,
    College,
    Leadership,
    International,
    Competitor,
}

impl ScoreComponent {
    pub const ALL: [ScoreComponent; 7] = [
        ScoreComponent::Relevancy,
        ScoreComponent::Experience,
        ScoreComponent::Stability,
        ScoreComponent::College,
        ScoreComponent::Leadership,
        ScoreComponent::International,
        ScoreComponent::Competitor,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ScoreComponent::Relevancy => "relevancy",
            ScoreComponent::Experience => "experience",
            ScoreComponent::Stability => "stability",
            ScoreComponent::College => "college",
            ScoreComponent::Leadership => "leadership",
            ScoreComponent::International => "international",
            ScoreComponent::Competitor => "competitor",
        }
    }

    pub fn weight(&self, weights: &ComponentWeights) -> f64 {
        match self {
            ScoreComponent::Relevancy => weights.relevancy,
            ScoreComponent::Experience => weights.experience,
            ScoreComponent::Stability => weights.stability,
            ScoreComponent::College => weights.college,
            ScoreComponent::Leadership => weights.leadership,
            ScoreComponent::International => weights.international,
            ScoreComponent::Competitor => weights.competitor,
        }
    }
}

impl fmt::Display for ScoreComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Per-component scores, each in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreComponents {
    pub relevancy: f64,
    pub experience: f64,
    pub stability: f64,
    pub college: f64,
    pub leadership: f64,
    pub international: f64,
    pub competitor: f64,
}

impl ScoreComponents {
    pub fn get(&self, component: ScoreComponent) -> f64 {
        match component {
            ScoreComponent::Relevancy => self.relevancy,
            ScoreComponent::Experience => self.experience,
            ScoreComponent::Stability => self.stability,
            ScoreComponent::College => self.college,
            ScoreComponent::Leadership => self.leadership,
            ScoreComponent::International => self.international,
            ScoreComponent::Competitor => self.competitor,
        }
    }

    pub fn weighted_total(&self, weights: &ComponentWeights) -> f64 {
        ScoreComponent::ALL
            .iter()
            .map(|c| self.get(*c) * c.weight(weights))
            .sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Recommendation {
    #[serde(rename = "Strong Fit")]
    StrongFit,
    #[serde(rename = "Good Fit")]
    GoodFit,
    #[serde(rename = "Consider")]
    Consider,
    #[serde(rename = "Weak Fit")]
    WeakFit,
    #[serde(rename = "Reject")]
    Reject,
}

impl Recommendation {
    pub const ALL: [Recommendation; 5] = [
        Recommendation::StrongFit,
        Recommendation::GoodFit,
        Recommendation::Consider,
        Recommendation::WeakFit,
        Recommendation::Reject,
    ];

    /// Band for an unrounded overall score. Lower bounds are inclusive.
    pub fn from_score(score: f64) -> Self {
        Self::ALL
            .into_iter()
            .find(|band| score >= band.lower_bound())
            .unwrap_or(Recommendation::Reject)
    }

    pub fn lower_bound(&self) -> f64 {
        match self {
            Recommendation::StrongFit => 85.0,
            Recommendation::GoodFit => 70.0,
            Recommendation::Consider => 55.0,
            Recommendation::WeakFit => 40.0,
            Recommendation::Reject => 0.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Recommendation::StrongFit => "Strong Fit",
            Recommendation::GoodFit => "Good Fit",
            Recommendation::Consider => "Consider",
            Recommendation::WeakFit => "Weak Fit",
            Recommendation::Reject => "Reject",
        }
    }

    pub fn action(&self) -> &'static str {
        match self {
            Recommendation::StrongFit => "Priority interview",
            Recommendation::GoodFit => "Recommend interview",
            Recommendation::Consider => "Further screening needed",
            Recommendation::WeakFit => "Only interview if candidate pool is limited",
            Recommendation::Reject => "Does not meet minimum criteria",
        }
    }

    /// Strong and Good fits make the interview shortlist.
    pub fn is_recommended(&self) -> bool {
        matches!(self, Recommendation::StrongFit | Recommendation::GoodFit)
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreCard {
    pub components: ScoreComponents,
    pub overall_score: f64,
    pub recommendation: Recommendation,
    pub diagnostics: Vec<Diagnostic>,
}

/// Pure function from a normalized record to a weighted score and band.
pub struct ScoringEngine {
    config: ScoringConfig,
    premium_competitors: Vec<Regex>,
    leadership_primary: KeywordSet,
    leadership_secondary: KeywordSet,
    international: KeywordSet,
    international_depth: KeywordSet,
    negation_regex: Regex,
}

impl ScoringEngine {
    pub fn new(config: &ScoringConfig, watchlists: &WatchlistConfig) -> Result<Self> {
        let premium_competitors = watchlists
            .premium_competitors
            .iter()
            .map(|name| whole_word_regex(name))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            config: config.clone(),
            premium_competitors,
            leadership_primary: KeywordSet::new([
                "led", "managed", "directed", "leadership", "head", "team lead",
                "supervisor", "manager", "chief", "director", "lead",
            ])?,
            leadership_secondary: KeywordSet::new([
                "coordinated", "facilitated", "organized", "spearheaded", "guided",
            ])?,
            international: KeywordSet::new([
                "yes", "international", "global", "worldwide", "multinational",
                "cross-border", "overseas", "remote teams", "offshore",
            ])?,
            international_depth: KeywordSet::new([
                "led international", "managed global", "cross-cultural", "multiple countries",
            ])?,
            negation_regex: Regex::new(r"(?i)^\s*(?:no|none|not|n/a)\b")?,
        })
    }

    pub fn score(&self, record: &CandidateRecord) -> ScoreCard {
        let mut diagnostics = Vec::new();

        let components = ScoreComponents {
            relevancy: self.relevancy(record, &mut diagnostics),
            experience: self.experience(record, &mut diagnostics),
            stability: self.stability(record, &mut diagnostics),
            college: self.college(record, &mut diagnostics),
            leadership: self.leadership(record, &mut diagnostics),
            international: self.international(record, &mut diagnostics),
            competitor: self.competitor(record, &mut diagnostics),
        };

        let overall_score = clamp_score(components.weighted_total(&self.config.weights));
        let recommendation = Recommendation::from_score(overall_score);

        log::debug!(
            "Scored {}: {:.2} ({}), {} degraded components",
            record.display(Field::CandidateName),
            overall_score,
            recommendation,
            diagnostics.len()
        );

        ScoreCard {
            components,
            overall_score,
            recommendation,
            diagnostics,
        }
    }

    fn relevancy(&self, record: &CandidateRecord, diagnostics: &mut Vec<Diagnostic>) -> f64 {
        let mut sub_score = |field: Field| match record.number(field) {
            Some(score) => clamp_score(score),
            None => {
                diagnostics.push(Diagnostic::degradation(
                    ScoreComponent::Relevancy,
                    format!("{} missing, treated as 0", field),
                    0.0,
                ));
                0.0
            }
        };
        let strong = sub_score(Field::StrongMatchesScore);
        let partial = sub_score(Field::PartialMatchesScore);
        clamp_score(0.7 * strong + 0.3 * partial)
    }

    fn experience(&self, record: &CandidateRecord, diagnostics: &mut Vec<Diagnostic>) -> f64 {
        let years = match record.number(Field::TotalExperienceYears) {
            Some(years) => years.max(0.0),
            None => {
                diagnostics.push(Diagnostic::degradation(
                    ScoreComponent::Experience,
                    "total experience missing",
                    0.0,
                ));
                return 0.0;
            }
        };
        experience_score(years, self.config.required_experience_years)
    }

    fn stability(&self, record: &CandidateRecord, diagnostics: &mut Vec<Diagnostic>) -> f64 {
        match record.number(Field::JobStability) {
            Some(rating) => stability_score(rating),
            None => {
                diagnostics.push(Diagnostic::degradation(
                    ScoreComponent::Stability,
                    "job stability missing",
                    0.0,
                ));
                0.0
            }
        }
    }

    fn college(&self, record: &CandidateRecord, diagnostics: &mut Vec<Diagnostic>) -> f64 {
        let rating = match record.text(Field::CollegeRating) {
            Some(rating) => rating.to_lowercase(),
            None => {
                diagnostics.push(Diagnostic::degradation(
                    ScoreComponent::College,
                    "college rating missing",
                    20.0,
                ));
                return 20.0;
            }
        };

        if rating.contains("non-premium") {
            70.0
        } else if rating.contains("premium") && !rating.contains("non") {
            100.0
        } else {
            40.0
        }
    }

    fn leadership(&self, record: &CandidateRecord, diagnostics: &mut Vec<Diagnostic>) -> f64 {
        let value = match record.text(Field::LeadershipSkills) {
            Some(value) => value,
            None => {
                diagnostics.push(Diagnostic::degradation(
                    ScoreComponent::Leadership,
                    "leadership skills missing",
                    0.0,
                ));
                return 0.0;
            }
        };

        if self.negation_regex.is_match(value) {
            0.0
        } else if value.trim().eq_ignore_ascii_case("yes") || self.leadership_primary.contains_any(value) {
            100.0
        } else if self.leadership_secondary.contains_any(value) {
            50.0
        } else {
            0.0
        }
    }

    fn international(&self, record: &CandidateRecord, diagnostics: &mut Vec<Diagnostic>) -> f64 {
        let value = match record.text(Field::InternationalTeamExperience) {
            Some(value) => value,
            None => {
                diagnostics.push(Diagnostic::degradation(
                    ScoreComponent::International,
                    "international team experience missing",
                    0.0,
                ));
                return 0.0;
            }
        };

        if self.negation_regex.is_match(value) || !self.international.contains_any(value) {
            0.0
        } else if self.international_depth.contains_any(value) {
            100.0
        } else {
            80.0
        }
    }

    fn competitor(&self, record: &CandidateRecord, diagnostics: &mut Vec<Diagnostic>) -> f64 {
        let value = match record.get(Field::CompetitorExperience) {
            Some(value) => value.trim(),
            None => {
                diagnostics.push(Diagnostic::degradation(
                    ScoreComponent::Competitor,
                    "competitor experience missing",
                    0.0,
                ));
                return 0.0;
            }
        };

        if !value.to_lowercase().starts_with("yes") {
            0.0
        } else if self.premium_competitors.iter().any(|re| re.is_match(value)) {
            100.0
        } else {
            70.0
        }
    }
}

/// Below the requirement scales linearly up to 70; meeting it scores 80;
/// each two extra years add 20, capped at 100.
fn experience_score(years: f64, required: f64) -> f64 {
    if years < required {
        (years / required * 70.0).min(70.0)
    } else if (years - required).abs() < f64::EPSILON {
        80.0
    } else {
        80.0 + ((years - required) / 2.0 * 20.0).min(20.0)
    }
}

/// Ratings up to 10 are scaled by 10; anything larger is read as average
/// tenure in years.
fn stability_score(rating: f64) -> f64 {
    if rating <= 10.0 {
        clamp_score(rating * 10.0)
    } else {
        tenure_score(rating)
    }
}

fn tenure_score(years: f64) -> f64 {
    if years < 1.0 {
        years * 50.0
    } else if years < 2.0 {
        50.0 + (years - 1.0) * 35.0
    } else {
        85.0 + ((years - 2.0) * 7.5).min(15.0)
    }
}

fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> ScoringEngine {
        ScoringEngine::new(&ScoringConfig::default(), &WatchlistConfig::default()).unwrap()
    }

    fn record(pairs: &[(Field, &str)]) -> CandidateRecord {
        let mut record = CandidateRecord::new();
        for (field, value) in pairs {
            record.set(*field, *value);
        }
        record
    }

    #[test]
    fn test_reference_candidate() {
        let r = record(&[
            (Field::StrongMatchesScore, "80"),
            (Field::PartialMatchesScore, "60"),
            (Field::TotalExperienceYears, "5"),
            (Field::JobStability, "8"),
            (Field::CollegeRating, "Premium"),
            (Field::LeadershipSkills, "Led a team of 6 engineers"),
            (Field::InternationalTeamExperience, "Worked with global teams across multiple countries"),
            (Field::CompetitorExperience, "Yes - Anaplan"),
        ]);
        let card = engine().score(&r);

        assert_eq!(card.components.relevancy, 74.0);
        assert_eq!(card.components.experience, 100.0);
        assert_eq!(card.components.stability, 80.0);
        assert_eq!(card.components.college, 100.0);
        assert_eq!(card.components.leadership, 100.0);
        assert_eq!(card.components.international, 100.0);
        assert_eq!(card.components.competitor, 100.0);
        assert!((card.overall_score - 87.2).abs() < 0.01, "{}", card.overall_score);
        assert_eq!(card.recommendation, Recommendation::StrongFit);
        assert!(card.diagnostics.is_empty());
    }

    #[test]
    fn test_empty_record_degrades_every_component() {
        let card = engine().score(&CandidateRecord::new());

        assert_eq!(card.components.college, 20.0);
        assert!((card.overall_score - 2.0).abs() < 1e-9);
        assert_eq!(card.recommendation, Recommendation::Reject);
        // strong and partial each report separately
        assert_eq!(card.diagnostics.len(), 8);
        assert!(card.diagnostics.iter().all(Diagnostic::is_degradation));
    }

    #[test]
    fn test_experience_curve() {
        assert_eq!(experience_score(0.0, 3.0), 0.0);
        assert!((experience_score(1.5, 3.0) - 35.0).abs() < 1e-9);
        assert_eq!(experience_score(3.0, 3.0), 80.0);
        assert_eq!(experience_score(4.0, 3.0), 90.0);
        assert_eq!(experience_score(5.0, 3.0), 100.0);
        assert_eq!(experience_score(25.0, 3.0), 100.0);

        let mut previous = 0.0;
        for tenths in 0..200 {
            let score = experience_score(tenths as f64 / 10.0, 3.0);
            assert!(score >= previous, "not monotonic at {}", tenths);
            previous = score;
        }
    }

    #[test]
    fn test_required_experience_is_configurable() {
        let config = ScoringConfig {
            required_experience_years: 5.0,
            ..ScoringConfig::default()
        };
        let engine = ScoringEngine::new(&config, &WatchlistConfig::default()).unwrap();
        let card = engine.score(&record(&[(Field::TotalExperienceYears, "5")]));
        assert_eq!(card.components.experience, 80.0);
    }

    #[test]
    fn test_stability_curve() {
        assert_eq!(stability_score(7.0), 70.0);
        assert_eq!(stability_score(10.0), 100.0);
        assert_eq!(stability_score(12.0), 100.0);
        assert_eq!(stability_score(-1.0), 0.0);
        assert_eq!(tenure_score(1.5), 67.5);
        assert_eq!(tenure_score(4.0), 100.0);
    }

    #[test]
    fn test_college_rules() {
        let e = engine();
        let score = |v: &str| e.score(&record(&[(Field::CollegeRating, v)])).components.college;
        assert_eq!(score("Premium"), 100.0);
        assert_eq!(score("Non-Premium"), 70.0);
        assert_eq!(score("Tier 3"), 40.0);
    }

    #[test]
    fn test_leadership_rules() {
        let e = engine();
        let score = |v: &str| e.score(&record(&[(Field::LeadershipSkills, v)])).components.leadership;
        assert_eq!(score("Yes"), 100.0);
        assert_eq!(score("Managed the finance team"), 100.0);
        assert_eq!(score("Team lead for the EMEA close"), 100.0);
        assert_eq!(score("Coordinated vendor onboarding"), 50.0);
        assert_eq!(score("No"), 0.0);
        assert_eq!(score("None mentioned, though led standups"), 0.0);
        assert_eq!(score("Skilled analyst"), 0.0);
    }

    #[test]
    fn test_international_rules() {
        let e = engine();
        let score = |v: &str| {
            e.score(&record(&[(Field::InternationalTeamExperience, v)]))
                .components
                .international
        };
        assert_eq!(score("Yes"), 80.0);
        assert_eq!(score("Coordinated with offshore team in Manila"), 80.0);
        assert_eq!(score("Global rollout support"), 80.0);
        assert_eq!(score("Managed global teams in 4 offices"), 100.0);
        assert_eq!(score("No"), 0.0);
        assert_eq!(score("Domestic only"), 0.0);
    }

    #[test]
    fn test_competitor_rules() {
        let e = engine();
        let score = |v: &str| e.score(&record(&[(Field::CompetitorExperience, v)])).components.competitor;
        assert_eq!(score("Yes - Anaplan"), 100.0);
        assert_eq!(score("Yes - Oracle EPM"), 100.0);
        assert_eq!(score("Yes - Jedox"), 70.0);
        assert_eq!(score(""), 0.0);
    }

    #[test]
    fn test_component_monotonicity() {
        let e = engine();
        let base = |strong: &str| {
            e.score(&record(&[
                (Field::StrongMatchesScore, strong),
                (Field::PartialMatchesScore, "50"),
            ]))
            .overall_score
        };
        assert!(base("60") > base("40"));
        assert!(base("140") == base("100"));
    }

    #[test]
    fn test_weighted_total_monotonic_in_every_component() {
        fn raise(components: &mut ScoreComponents, component: ScoreComponent, by: f64) {
            let slot = match component {
                ScoreComponent::Relevancy => &mut components.relevancy,
                ScoreComponent::Experience => &mut components.experience,
                ScoreComponent::Stability => &mut components.stability,
                ScoreComponent::College => &mut components.college,
                ScoreComponent::Leadership => &mut components.leadership,
                ScoreComponent::International => &mut components.international,
                ScoreComponent::Competitor => &mut components.competitor,
            };
            *slot = (*slot + by).min(100.0);
        }

        let weights = ComponentWeights::default();
        let bases = [
            ScoreComponents::default(),
            ScoreComponents {
                relevancy: 55.0,
                experience: 80.0,
                stability: 40.0,
                college: 70.0,
                leadership: 50.0,
                international: 80.0,
                competitor: 70.0,
            },
        ];

        for base in bases {
            for component in ScoreComponent::ALL {
                let mut previous = base.weighted_total(&weights);
                let mut raised = base;
                for _ in 0..5 {
                    raise(&mut raised, component, 25.0);
                    let total = raised.weighted_total(&weights);
                    assert!(total >= previous, "{} lowered the total", component);
                    previous = total;
                }
                assert!(
                    raised.weighted_total(&weights) > base.weighted_total(&weights) || base.get(component) == 100.0,
                    "{} had no effect",
                    component
                );
            }
        }
    }

    #[test]
    fn test_band_boundaries() {
        assert_eq!(Recommendation::from_score(85.0), Recommendation::StrongFit);
        assert_eq!(Recommendation::from_score(84.999), Recommendation::GoodFit);
        assert_eq!(Recommendation::from_score(70.0), Recommendation::GoodFit);
        assert_eq!(Recommendation::from_score(69.99), Recommendation::Consider);
        assert_eq!(Recommendation::from_score(55.0), Recommendation::Consider);
        assert_eq!(Recommendation::from_score(40.0), Recommendation::WeakFit);
        assert_eq!(Recommendation::from_score(39.9), Recommendation::Reject);
        assert_eq!(Recommendation::from_score(f64::NAN), Recommendation::Reject);
        assert!(Recommendation::GoodFit.is_recommended());
        assert!(!Recommendation::Consider.is_recommended());
    }

    #[test]
    fn test_recommendation_serializes_label() {
        let json = serde_json::to_string(&Recommendation::WeakFit).unwrap();
        assert_eq!(json, "\"Weak Fit\"");
    }
}
