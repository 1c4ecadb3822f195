//! Heuristic cleanup of extracted candidate fields

use crate::config::WatchlistConfig;
use crate::error::Result;
use crate::processing::contact::ContactExtractor;
use crate::processing::diagnostics::Diagnostic;
use crate::processing::fields::Field;
use crate::processing::record::{CandidateRecord, NOT_AVAILABLE};
use crate::processing::text_cleaner::{whole_word_regex, TextCleaner};
use regex::Regex;

pub const PREMIUM: &str = "Premium";
pub const NON_PREMIUM: &str = "Non-Premium";

/// Reclassifies ratings, yes/no flags, URLs, competitor mentions and phone
/// numbers into their closed vocabularies.
///
/// Normalizing an already-normalized record is a no-op.
pub struct HeuristicNormalizer {
    cleaner: TextCleaner,
    contacts: ContactExtractor,
    competitors: Vec<(String, Regex)>,
    premium_institutions: Vec<Regex>,
    negation_regex: Regex,
    not_provided_regex: Regex,
    stated_company_regex: Regex,
}

impl HeuristicNormalizer {
    pub fn new(watchlists: &WatchlistConfig) -> Result<Self> {
        let competitors = watchlists
            .competitors
            .iter()
            .map(|name| Ok((name.trim().to_string(), whole_word_regex(name)?)))
            .collect::<Result<Vec<_>>>()?;

        let premium_institutions = watchlists
            .premium_institutions
            .iter()
            .filter(|name| !name.trim().is_empty())
            .map(|name| whole_word_regex(name))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            cleaner: TextCleaner::new(),
            contacts: ContactExtractor::new(),
            competitors,
            premium_institutions,
            negation_regex: Regex::new(r"(?i)\b(?:no|not|none|n/a)\b")?,
            not_provided_regex: Regex::new(r"(?i)\bnot\s+(?:available|found|mentioned|provided)\b|^\s*(?:none|n/a)\s*$")?,
            stated_company_regex: Regex::new(r"(?i)^yes\s*-\s*([^\s,;.].*)$")?,
        })
    }

    /// Normalize the record in place. `resume` is the full résumé text, used
    /// for LinkedIn and phone lookups.
    pub fn normalize(&self, record: &mut CandidateRecord, resume: Option<&str>) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        self.strip_markdown(record);
        self.normalize_college_rating(record);
        for field in [Field::InternationalTeamExperience, Field::LeadershipSkills] {
            if let Some(collapsed) = record.get(field).and_then(collapse_yes_no) {
                record.set(field, collapsed);
            }
        }
        self.normalize_linkedin(record, resume);
        self.normalize_portfolio(record, &mut diagnostics);
        let competitor = self.competitor_experience(record);
        record.set(Field::CompetitorExperience, competitor);
        self.normalize_phone(record, resume, &mut diagnostics);

        diagnostics
    }

    fn strip_markdown(&self, record: &mut CandidateRecord) {
        for field in record.fields_present() {
            if let Some(value) = record.get(field) {
                let cleaned = self.cleaner.clean(value);
                if cleaned != value {
                    record.set(field, cleaned);
                }
            }
        }
    }

    fn normalize_college_rating(&self, record: &mut CandidateRecord) {
        match record.text(Field::CollegeRating).map(str::to_lowercase) {
            Some(rating) => {
                let negated = rating.contains("non") || self.negation_regex.is_match(&rating);
                if rating.contains("premium") && !negated {
                    record.set(Field::CollegeRating, PREMIUM);
                } else if negated {
                    record.set(Field::CollegeRating, NON_PREMIUM);
                }
            }
            None => {
                let institution = record.text(Field::CollegeUniversity).unwrap_or_default();
                if !institution.is_empty()
                    && self.premium_institutions.iter().any(|re| re.is_match(institution))
                {
                    log::debug!("Rated {:?} premium from the configured institution list", institution);
                    record.set(Field::CollegeRating, PREMIUM);
                }
            }
        }
    }

    fn normalize_linkedin(&self, record: &mut CandidateRecord, resume: Option<&str>) {
        let url = self.contacts.linkedin_url(record.text(Field::LinkedInUrl), resume);
        record.set(Field::LinkedInUrl, url);
    }

    fn normalize_portfolio(&self, record: &mut CandidateRecord, diagnostics: &mut Vec<Diagnostic>) {
        let value = record.text(Field::PortfolioUrl);
        let url = self.contacts.portfolio_url(value);

        if let Some(raw) = value {
            if url.is_empty() && !self.not_provided_regex.is_match(raw) {
                log::debug!("Discarding unrecognised portfolio value {:?}", raw);
                diagnostics.push(Diagnostic::coercion(Field::PortfolioUrl, raw, ""));
            }
        }
        record.set(Field::PortfolioUrl, url);
    }

    /// Competitor experience as `"Yes - <Competitor>"`, a bare `"Yes"`, or empty.
    fn competitor_experience(&self, record: &CandidateRecord) -> String {
        let value = match record.get(Field::CompetitorExperience) {
            None => return self.scan_history(record),
            Some(value) => value.trim(),
        };

        // An empty value is the normalized form of "no competitor".
        if value.is_empty() {
            return String::new();
        }

        if self.negation_regex.is_match(value) {
            return String::new();
        }

        if value.to_lowercase().starts_with("yes") {
            if let Some(name) = self.find_competitor(value) {
                return format!("Yes - {}", name);
            }
            let from_history = self.scan_history(record);
            if !from_history.is_empty() {
                return from_history;
            }
            return match self.stated_company_regex.captures(value) {
                Some(caps) => format!("Yes - {}", caps[1].trim()),
                None => "Yes".to_string(),
            };
        }

        match self.find_competitor(value) {
            Some(name) => format!("Yes - {}", name),
            None => self.scan_history(record),
        }
    }

    fn scan_history(&self, record: &CandidateRecord) -> String {
        let history = record
            .text(Field::WorkHistory)
            .or_else(|| record.text(Field::LatestCompany));

        history
            .and_then(|text| self.find_competitor(text))
            .map(|name| format!("Yes - {}", name))
            .unwrap_or_default()
    }

    fn find_competitor(&self, text: &str) -> Option<&str> {
        self.competitors
            .iter()
            .find(|(_, re)| re.is_match(text))
            .map(|(name, _)| name.as_str())
    }

    fn normalize_phone(
        &self,
        record: &mut CandidateRecord,
        resume: Option<&str>,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        let value = record.text(Field::PhoneNumber).map(str::to_string);
        match self.contacts.phone_number(resume, value.as_deref()) {
            Some(phone) => record.set(Field::PhoneNumber, phone),
            None => {
                if let Some(raw) = value {
                    diagnostics.push(Diagnostic::coercion(Field::PhoneNumber, raw, NOT_AVAILABLE));
                }
                record.clear(Field::PhoneNumber);
            }
        }
    }
}

/// Collapse a very short answer to "Yes" or "No"; longer text is kept as reasoning.
fn collapse_yes_no(value: &str) -> Option<&'static str> {
    let trimmed = value.trim();
    if trimmed.chars().count() >= 5 {
        return None;
    }
    let lower = trimmed.to_lowercase();
    if ["yes", "has", "worked"].iter().any(|w| lower.contains(w)) {
        Some("Yes")
    } else if ["no", "not", "none"].iter().any(|w| lower.contains(w)) {
        Some("No")
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer() -> HeuristicNormalizer {
        HeuristicNormalizer::new(&WatchlistConfig::default()).unwrap()
    }

    fn record(pairs: &[(Field, &str)]) -> CandidateRecord {
        let mut record = CandidateRecord::new();
        for (field, value) in pairs {
            record.set(*field, *value);
        }
        record
    }

    #[test]
    fn test_college_rating() {
        let n = normalizer();
        let cases = [
            ("premium institute", Some(PREMIUM)),
            ("**Premium**", Some(PREMIUM)),
            ("Non-Premium", Some(NON_PREMIUM)),
            ("non premium", Some(NON_PREMIUM)),
            ("Not a premium college", Some(NON_PREMIUM)),
            ("Tier 2", Some("Tier 2")),
        ];
        for (input, expected) in cases {
            let mut r = record(&[(Field::CollegeRating, input)]);
            n.normalize(&mut r, None);
            assert_eq!(r.get(Field::CollegeRating), expected, "{}", input);
        }
    }

    #[test]
    fn test_premium_institution_list() {
        let mut watchlists = WatchlistConfig::default();
        watchlists.premium_institutions = vec!["IIT Bombay".to_string()];
        let n = HeuristicNormalizer::new(&watchlists).unwrap();

        let mut r = record(&[(Field::CollegeUniversity, "Indian Institute of Technology (IIT Bombay)")]);
        n.normalize(&mut r, None);
        assert_eq!(r.get(Field::CollegeRating), Some(PREMIUM));

        let mut r = record(&[(Field::CollegeUniversity, "IIT Bombay")]);
        normalizer().normalize(&mut r, None);
        assert_eq!(r.get(Field::CollegeRating), None);
    }

    #[test]
    fn test_yes_no_collapse() {
        let n = normalizer();
        let mut r = record(&[
            (Field::InternationalTeamExperience, "Yes."),
            (Field::LeadershipSkills, "None"),
        ]);
        n.normalize(&mut r, None);
        assert_eq!(r.get(Field::InternationalTeamExperience), Some("Yes"));
        assert_eq!(r.get(Field::LeadershipSkills), Some("No"));

        let detailed = "Yes, worked with teams across 4 countries";
        let mut r = record(&[(Field::InternationalTeamExperience, detailed)]);
        n.normalize(&mut r, None);
        assert_eq!(r.get(Field::InternationalTeamExperience), Some(detailed));
    }

    #[test]
    fn test_linkedin_and_portfolio() {
        let n = normalizer();
        let resume = "Jane Doe\nlinkedin.com/in/jane-doe\n(555) 987-6543";
        let mut r = record(&[
            (Field::LinkedInUrl, "Not mentioned"),
            (Field::PortfolioUrl, "Not available"),
        ]);
        let diagnostics = n.normalize(&mut r, Some(resume));

        assert_eq!(r.get(Field::LinkedInUrl), Some("https://www.linkedin.com/in/jane-doe"));
        assert_eq!(r.get(Field::PortfolioUrl), Some(""));
        assert_eq!(r.get(Field::PhoneNumber), Some("(555) 987-6543"));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_unrecognised_portfolio_is_flagged() {
        let n = normalizer();
        let mut r = record(&[(Field::PortfolioUrl, "Has a personal blog")]);
        let diagnostics = n.normalize(&mut r, None);
        assert_eq!(r.get(Field::PortfolioUrl), Some(""));
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_competitor_rules() {
        let n = normalizer();
        let cases: [(&[(Field, &str)], &str); 9] = [
            (&[(Field::WorkHistory, "Analyst at Anaplan (2019-2022)")], "Yes - Anaplan"),
            (&[(Field::LatestCompany, "OneStream Software")], "Yes - OneStream"),
            (&[(Field::CompetitorExperience, "No")], ""),
            (&[(Field::CompetitorExperience, "Worked at Jedox for 2 years")], "Yes - Jedox"),
            (&[(Field::CompetitorExperience, "Yes - Prophix")], "Yes - Prophix"),
            (&[(Field::CompetitorExperience, "Yes - Acme Planning")], "Yes - Acme Planning"),
            (&[(Field::CompetitorExperience, "Yes, but not at any listed competitor")], ""),
            (&[(Field::CompetitorExperience, "Yes, at a planning software vendor")], "Yes"),
            (
                &[
                    (Field::CompetitorExperience, "Unclear from resume"),
                    (Field::WorkHistory, "Consultant, Vena Solutions"),
                ],
                "Yes - Vena Solutions",
            ),
        ];

        for (pairs, expected) in cases {
            let mut r = record(pairs);
            n.normalize(&mut r, None);
            assert_eq!(r.get(Field::CompetitorExperience), Some(expected), "{:?}", pairs);
        }
    }

    #[test]
    fn test_competitor_whole_word_only() {
        let n = normalizer();
        let mut r = record(&[(Field::WorkHistory, "Billboard Media; Resolvers Inc")]);
        n.normalize(&mut r, None);
        assert_eq!(r.get(Field::CompetitorExperience), Some(""));
    }

    #[test]
    fn test_phone_missing_everywhere() {
        let n = normalizer();
        let mut r = record(&[(Field::PhoneNumber, "call me")]);
        let diagnostics = n.normalize(&mut r, Some("no numbers"));
        assert_eq!(r.get(Field::PhoneNumber), None);
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let n = normalizer();
        let resume = "Sam Lee | +1 555-010-2000 | LinkedIn: linkedin.com/in/samlee";
        let mut r = record(&[
            (Field::CandidateName, "**Sam Lee**"),
            (Field::CollegeRating, "premium (IIT)"),
            (Field::LeadershipSkills, "- Led a team of 5 engineers"),
            (Field::InternationalTeamExperience, "no"),
            (Field::PortfolioUrl, "https://github.com/samlee"),
            (Field::CompetitorExperience, "Not that I can see"),
            (Field::WorkHistory, "Acme Corp; Host Analytics"),
        ]);

        n.normalize(&mut r, Some(resume));
        let once = r.clone();
        n.normalize(&mut r, Some(resume));
        assert_eq!(r, once);

        assert_eq!(once.get(Field::CandidateName), Some("Sam Lee"));
        assert_eq!(once.get(Field::CollegeRating), Some(PREMIUM));
        assert_eq!(once.get(Field::LeadershipSkills), Some("Led a team of 5 engineers"));
        assert_eq!(once.get(Field::InternationalTeamExperience), Some("No"));
        assert_eq!(once.get(Field::CompetitorExperience), Some(""));
        assert_eq!(once.get(Field::PhoneNumber), Some("+1 555-010-2000"));
    }

    #[test]
    fn test_normalization_is_idempotent_without_resume() {
        let n = normalizer();
        let mut r = record(&[
            (Field::LinkedInUrl, "www.linkedin.com/company/acme"),
            (Field::CompetitorExperience, "Yes, worked with a planning vendor"),
            (Field::PortfolioUrl, "https://github.com/samlee"),
        ]);

        n.normalize(&mut r, None);
        let once = r.clone();
        n.normalize(&mut r, None);
        assert_eq!(r, once);

        assert_eq!(once.get(Field::LinkedInUrl), Some(""));
        assert_eq!(once.get(Field::CompetitorExperience), Some("Yes"));
    }
}
