//! Canonical candidate fields and the label aliases that name them

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// One of the fixed attributes of a candidate evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Field {
    CandidateName,
    TotalExperienceYears,
    StrongMatchesScore,
    StrongMatchesReasoning,
    PartialMatchesScore,
    PartialMatchesReasoning,
    RelevancyScore,
    AllTechSkills,
    RelevantTechSkills,
    Degree,
    CollegeUniversity,
    JobApplyingFor,
    CollegeRating,
    JobStability,
    LatestCompany,
    LeadershipSkills,
    InternationalTeamExperience,
    NoticePeriod,
    LinkedInUrl,
    PortfolioUrl,
    WorkHistory,
    CompetitorExperience,
    PhoneNumber,
}

impl Field {
    /// Every field, in report column order.
    pub const ALL: [Field; 23] = [
        Field::CandidateName,
        Field::TotalExperienceYears,
        Field::StrongMatchesScore,
        Field::StrongMatchesReasoning,
        Field::PartialMatchesScore,
        Field::PartialMatchesReasoning,
        Field::RelevancyScore,
        Field::AllTechSkills,
        Field::RelevantTechSkills,
        Field::Degree,
        Field::CollegeUniversity,
        Field::JobApplyingFor,
        Field::CollegeRating,
        Field::JobStability,
        Field::LatestCompany,
        Field::LeadershipSkills,
        Field::InternationalTeamExperience,
        Field::NoticePeriod,
        Field::LinkedInUrl,
        Field::PortfolioUrl,
        Field::WorkHistory,
        Field::CompetitorExperience,
        Field::PhoneNumber,
    ];

    /// Fields whose value must reduce to a single number.
    pub const NUMERIC: [Field; 5] = [
        Field::TotalExperienceYears,
        Field::RelevancyScore,
        Field::StrongMatchesScore,
        Field::PartialMatchesScore,
        Field::JobStability,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Field::CandidateName => "Candidate Name",
            Field::TotalExperienceYears => "Total Experience (Years)",
            Field::StrongMatchesScore => "Strong Matches Score",
            Field::StrongMatchesReasoning => "Strong Matches Reasoning",
            Field::PartialMatchesScore => "Partial Matches Score",
            Field::PartialMatchesReasoning => "Partial Matches Reasoning",
            Field::RelevancyScore => "Relevancy Score (0-100)",
            Field::AllTechSkills => "All Tech Skills",
            Field::RelevantTechSkills => "Relevant Tech Skills",
            Field::Degree => "Degree",
            Field::CollegeUniversity => "College/University",
            Field::JobApplyingFor => "Job Applying For",
            Field::CollegeRating => "College Rating",
            Field::JobStability => "Job Stability",
            Field::LatestCompany => "Latest Company",
            Field::LeadershipSkills => "Leadership Skills",
            Field::InternationalTeamExperience => "International Team Experience",
            Field::NoticePeriod => "Notice Period",
            Field::LinkedInUrl => "LinkedIn URL",
            Field::PortfolioUrl => "Portfolio URL",
            Field::WorkHistory => "Work History",
            Field::CompetitorExperience => "Competitor Experience",
            Field::PhoneNumber => "Phone Number",
        }
    }

    pub fn is_numeric(&self) -> bool {
        Self::NUMERIC.contains(self)
    }

    fn aliases(&self) -> &'static [&'static str] {
        match self {
            Field::CandidateName => &["candidate name", "candidate's name", "name"],
            Field::TotalExperienceYears => &[
                "total experience (years)",
                "total experience",
                "experience (years)",
                "years of experience",
            ],
            Field::StrongMatchesScore => &[
                "strong matches score",
                "strong matches score (0-100)",
                "strong match score",
                "strong matches",
            ],
            Field::StrongMatchesReasoning => &["strong matches reasoning", "strong match reasoning"],
            Field::PartialMatchesScore => &[
                "partial matches score",
                "partial matches score (0-100)",
                "partial match score",
                "partial matches",
            ],
            Field::PartialMatchesReasoning => &["partial matches reasoning", "partial match reasoning"],
            Field::RelevancyScore => &["relevancy score (0-100)", "relevancy score", "relevance score"],
            Field::AllTechSkills => &["all tech skills", "all technical skills"],
            Field::RelevantTechSkills => &["relevant tech skills", "relevant technical skills"],
            Field::Degree => &["degree", "highest degree", "qualification"],
            Field::CollegeUniversity => &["college/university", "university", "college", "institution"],
            Field::JobApplyingFor => &[
                "job applying for",
                "job id",
                "position applying for",
                "role applying for",
            ],
            Field::CollegeRating => &["college rating", "university rating", "institution rating"],
            Field::JobStability => &["job stability", "employment stability"],
            Field::LatestCompany => &["latest company", "current company", "most recent company"],
            Field::LeadershipSkills => &["leadership skills", "leadership experience", "leadership"],
            Field::InternationalTeamExperience => &[
                "international team experience",
                "global team experience",
                "international experience",
            ],
            Field::NoticePeriod => &["notice period", "joining availability", "availability to join"],
            Field::LinkedInUrl => &["linkedin url", "linkedin profile", "linkedin", "linkedin link"],
            Field::PortfolioUrl => &[
                "portfolio url",
                "portfolio",
                "github url",
                "github",
                "personal website",
                "personal url",
                "website",
            ],
            Field::WorkHistory => &[
                "work history",
                "employment history",
                "companies worked for",
                "previous companies",
            ],
            Field::CompetitorExperience => &[
                "competitor experience",
                "worked for competitor",
                "competitor",
                "competition experience",
            ],
            Field::PhoneNumber => &["phone number", "phone", "contact number", "mobile"],
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Immutable lookup from a lower-cased label variant to its canonical field.
#[derive(Debug, Clone)]
pub struct AliasTable {
    by_alias: HashMap<&'static str, Field>,
}

impl AliasTable {
    pub fn new() -> Self {
        let mut by_alias = HashMap::new();
        for field in Field::ALL {
            for alias in field.aliases() {
                by_alias.insert(*alias, field);
            }
        }
        Self { by_alias }
    }

    /// Resolve a raw label (the text before a colon) to a canonical field.
    ///
    /// Matching is exact after lower-casing and stripping surrounding
    /// Markdown emphasis and bullet markers, so `**Candidate Name**` and
    /// `- candidate name` both resolve.
    pub fn resolve(&self, label: &str) -> Option<Field> {
        let key = normalize_label(label);
        if key.is_empty() {
            return None;
        }
        self.by_alias.get(key.as_str()).copied()
    }

    pub fn aliases_for(&self, field: Field) -> &'static [&'static str] {
        field.aliases()
    }

    pub fn len(&self) -> usize {
        self.by_alias.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_alias.is_empty()
    }
}

impl Default for AliasTable {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize_label(label: &str) -> String {
    let trimmed = label.trim_matches(|c: char| {
        c.is_whitespace() || matches!(c, '*' | '_' | '#' | '-' | '•' | '`' | '>')
    });
    trimmed
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_field_has_its_label_as_alias() {
        let table = AliasTable::new();
        for field in Field::ALL {
            assert_eq!(table.resolve(field.label()), Some(field), "{}", field);
        }
    }

    #[test]
    fn test_resolution_is_case_and_alias_insensitive() {
        let table = AliasTable::new();
        assert_eq!(table.resolve("relevance score"), Some(Field::RelevancyScore));
        assert_eq!(table.resolve("Relevancy Score (0-100)"), Some(Field::RelevancyScore));
        assert_eq!(table.resolve("  RELEVANCY   SCORE "), Some(Field::RelevancyScore));
    }

    #[test]
    fn test_markdown_markers_are_ignored() {
        let table = AliasTable::new();
        assert_eq!(table.resolve("**Candidate Name"), Some(Field::CandidateName));
        assert_eq!(table.resolve("- Job Stability"), Some(Field::JobStability));
        assert_eq!(table.resolve("### Work History"), Some(Field::WorkHistory));
    }

    #[test]
    fn test_unknown_labels_do_not_resolve() {
        let table = AliasTable::new();
        assert_eq!(table.resolve("Meeting time"), None);
        assert_eq!(table.resolve("https"), None);
        assert_eq!(table.resolve("**"), None);
    }

    #[test]
    fn test_aliases_are_unique_across_fields() {
        let total: usize = Field::ALL.iter().map(|f| f.aliases().len()).sum();
        assert_eq!(AliasTable::new().len(), total);
    }
}
