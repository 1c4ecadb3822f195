//! Fallback skill matching between a résumé and a job description
//!
//! Used only when the analysis text carried no usable strong/partial scores.

use crate::error::Result;
use crate::processing::fields::Field;
use crate::processing::record::CandidateRecord;
use crate::processing::text_cleaner::whole_word_regex;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Strong score used when the job description names no known skill.
pub const NEUTRAL_STRONG_SCORE: f64 = 50.0;

/// Vocabulary plus related-skill graph, with one compiled whole-word regex per term.
pub struct SkillMatcher {
    vocabulary: Vec<String>,
    related_skills: HashMap<String, Vec<String>>,
    term_patterns: HashMap<String, Regex>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    /// The résumé skill is listed as related to a missing job skill.
    Related,
    /// The résumé skill lists the missing job skill as related to it.
    Transferable,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedMatch {
    pub skill: String,
    pub source: String,
    pub relation: Relation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillMatchReport {
    pub job_skills: Vec<String>,
    pub exact_matches: Vec<String>,
    pub missing_skills: Vec<String>,
    pub related_matches: Vec<RelatedMatch>,
    pub strong_score: f64,
    pub partial_score: f64,
    pub strong_reasoning: String,
    pub partial_reasoning: String,
}

impl SkillMatcher {
    pub fn new() -> Result<Self> {
        let vocabulary: Vec<String> = Self::default_vocabulary()
            .into_iter()
            .map(String::from)
            .collect();

        let related_skills: HashMap<String, Vec<String>> = Self::default_related_skills()
            .into_iter()
            .map(|(skill, related)| {
                (skill.to_string(), related.into_iter().map(String::from).collect())
            })
            .collect();

        let mut term_patterns = HashMap::new();
        let terms = vocabulary
            .iter()
            .chain(related_skills.keys())
            .chain(related_skills.values().flatten());
        for term in terms {
            if !term_patterns.contains_key(term) {
                term_patterns.insert(term.clone(), whole_word_regex(term)?);
            }
        }

        log::debug!(
            "Skill matcher ready: {} vocabulary terms, {} patterns",
            vocabulary.len(),
            term_patterns.len()
        );

        Ok(Self {
            vocabulary,
            related_skills,
            term_patterns,
        })
    }

    /// The fallback runs only when both scores are absent or zero and both
    /// source texts are available.
    pub fn should_run(record: &CandidateRecord, resume: Option<&str>, job: Option<&str>) -> bool {
        let unusable = |field: Field| record.number(field).map_or(true, |score| score == 0.0);
        let has_text = |text: Option<&str>| text.map_or(false, |t| !t.trim().is_empty());

        unusable(Field::StrongMatchesScore)
            && unusable(Field::PartialMatchesScore)
            && has_text(resume)
            && has_text(job)
    }

    fn mentions(&self, term: &str, text: &str) -> bool {
        self.term_patterns
            .get(term)
            .map_or(false, |pattern| pattern.is_match(text))
    }

    fn related_to(&self, skill: &str) -> &[String] {
        self.related_skills.get(skill).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Compare the résumé against the job description.
    pub fn match_skills(&self, resume: &str, job: &str) -> SkillMatchReport {
        let job_skills: Vec<String> = self
            .vocabulary
            .iter()
            .filter(|skill| self.mentions(skill, job))
            .cloned()
            .collect();

        let (exact_matches, missing_skills): (Vec<String>, Vec<String>) = job_skills
            .iter()
            .cloned()
            .partition(|skill| self.mentions(skill, resume));

        let related_matches = self.find_related(resume, &job_skills, &exact_matches, &missing_skills);

        let strong_score = if job_skills.is_empty() {
            NEUTRAL_STRONG_SCORE
        } else {
            exact_matches.len() as f64 / job_skills.len() as f64 * 100.0
        };

        let covered: HashSet<&str> = related_matches.iter().map(|m| m.source.as_str()).collect();
        let partial_score = partial_score(strong_score, missing_skills.len(), covered.len());

        let strong_reasoning = strong_reasoning(&job_skills, &exact_matches, &missing_skills, strong_score);
        let partial_reasoning = partial_reasoning(&related_matches, &missing_skills);

        log::info!(
            "Skill fallback: {}/{} exact, {} related, strong {:.0}, partial {:.0}",
            exact_matches.len(),
            job_skills.len(),
            related_matches.len(),
            strong_score,
            partial_score
        );

        SkillMatchReport {
            job_skills,
            exact_matches,
            missing_skills,
            related_matches,
            strong_score: strong_score.round(),
            partial_score: partial_score.round(),
            strong_reasoning,
            partial_reasoning,
        }
    }

    fn find_related(
        &self,
        resume: &str,
        job_skills: &[String],
        exact_matches: &[String],
        missing_skills: &[String],
    ) -> Vec<RelatedMatch> {
        let mut seen: HashSet<(String, String)> = HashSet::new();
        let mut matches = Vec::new();
        let mut push = |skill: &str, source: &str, relation: Relation| {
            if seen.insert((skill.to_string(), source.to_string())) {
                matches.push(RelatedMatch {
                    skill: skill.to_string(),
                    source: source.to_string(),
                    relation,
                });
            }
        };

        for missing in missing_skills {
            for related in self.related_to(missing) {
                if !exact_matches.contains(related) && self.mentions(related, resume) {
                    push(related, missing, Relation::Related);
                }
            }
        }

        // Résumé skills the job never asked for, linked back to a missing job skill.
        for skill in &self.vocabulary {
            if job_skills.contains(skill) || !self.mentions(skill, resume) {
                continue;
            }
            for missing in missing_skills {
                let linked = self.related_to(missing).contains(skill)
                    || self.related_to(skill).contains(missing);
                if linked {
                    push(skill, missing, Relation::Transferable);
                }
            }
        }

        matches
    }

    fn default_vocabulary() -> Vec<&'static str> {
        vec![
            // Languages
            "python", "java", "javascript", "c++", "c#", ".net", "php", "ruby", "swift",
            // Data stores
            "sql", "mysql", "postgresql", "mongodb", "oracle", "database",
            // Cloud and operations
            "aws", "azure", "gcp", "cloud", "docker", "kubernetes", "devops",
            // Web
            "html", "css", "react", "angular", "vue", "node.js", "django",
            // Data and ML
            "machine learning", "ai", "data science", "tensorflow", "pytorch",
            "excel", "powerbi", "tableau", "power bi", "data visualization",
            // Delivery
            "agile", "scrum", "jira", "project management", "pmp",
            "linux", "unix", "windows", "git", "github", "gitlab",
            "api", "rest", "graphql", "microservices", "serverless",
            // Finance and business
            "financial analysis", "budgeting", "forecasting", "accounting",
            "strategic planning", "business development", "marketing", "sales",
            "customer relationship management", "crm", "sap", "erp",
            // Soft skills
            "communication", "leadership", "teamwork", "problem solving",
            "critical thinking", "time management", "organization",
        ]
    }

    fn default_related_skills() -> Vec<(&'static str, Vec<&'static str>)> {
        vec![
            ("python", vec!["django", "flask", "pandas", "numpy", "data science", "machine learning", "ai"]),
            ("java", vec!["spring", "hibernate", "j2ee", "android"]),
            ("javascript", vec!["typescript", "node.js", "react", "angular", "vue", "front-end"]),
            ("sql", vec!["mysql", "postgresql", "oracle", "database", "data analysis"]),
            ("aws", vec!["cloud", "azure", "gcp", "devops", "infrastructure"]),
            ("docker", vec!["kubernetes", "containers", "devops", "microservices"]),
            ("tableau", vec!["power bi", "data visualization", "analytics", "reporting"]),
            ("excel", vec!["spreadsheets", "data analysis", "financial modeling"]),
            ("agile", vec!["scrum", "kanban", "jira", "project management"]),
            ("machine learning", vec!["ai", "data science", "deep learning", "nlp"]),
        ]
    }
}

/// Interpolate between a floor and ceiling derived from the strong score by
/// the share of missing skills that have at least one related match.
fn partial_score(strong_score: f64, missing: usize, covered: usize) -> f64 {
    let floor = (strong_score * 0.6).max(30.0);
    let ceiling = (strong_score + 20.0).min(80.0).max(floor);

    if missing == 0 {
        return ceiling;
    }
    let coverage = (covered as f64 / missing as f64).min(1.0);
    floor + (ceiling - floor) * coverage
}

fn strong_reasoning(job_skills: &[String], exact: &[String], missing: &[String], score: f64) -> String {
    if job_skills.is_empty() {
        return format!(
            "No specific skills identified in the job description. Using neutral score of {:.0}.",
            NEUTRAL_STRONG_SCORE
        );
    }

    let mut lines = vec![
        format!(
            "Found {} exact matches out of {} required skills ({:.1}%).",
            exact.len(),
            job_skills.len(),
            score
        ),
        String::new(),
    ];

    if !exact.is_empty() {
        lines.push("Exact skill matches:".to_string());
        lines.extend(
            exact
                .iter()
                .map(|skill| format!("- {}: found in both resume and job description", skill.to_uppercase())),
        );
    }
    if !missing.is_empty() {
        lines.push("Missing skills from job description:".to_string());
        lines.extend(missing.iter().map(|skill| format!("- {}", skill)));
    }

    lines.join("\n")
}

fn partial_reasoning(related: &[RelatedMatch], missing: &[String]) -> String {
    let share = if missing.is_empty() {
        0.0
    } else {
        related.len() as f64 / missing.len() as f64 * 100.0
    };

    let mut lines = vec![
        format!("Found {} related/transferable skills ({:.1}%).", related.len(), share),
        String::new(),
        "Related skill matches:".to_string(),
    ];

    if related.is_empty() {
        lines.push("- No related skill matches found".to_string());
    } else {
        lines.extend(related.iter().map(|m| match m.relation {
            Relation::Related => format!("- {} (related to {})", m.skill, m.source),
            Relation::Transferable => format!("- {} (transferable to {})", m.skill, m.source),
        }));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_and_related_matches() {
        let matcher = SkillMatcher::new().unwrap();
        let report = matcher.match_skills(
            "Built dashboards in Power BI. Python and Django developer, MySQL admin.",
            "Requirements: Python, SQL, Docker, AWS, Tableau.",
        );

        assert_eq!(report.job_skills, vec!["python", "sql", "aws", "docker", "tableau"]);
        assert_eq!(report.exact_matches, vec!["python"]);
        assert_eq!(report.missing_skills, vec!["sql", "aws", "docker", "tableau"]);
        assert_eq!(
            report.related_matches,
            vec![
                RelatedMatch { skill: "mysql".into(), source: "sql".into(), relation: Relation::Related },
                RelatedMatch { skill: "power bi".into(), source: "tableau".into(), relation: Relation::Related },
            ]
        );
        // strong 20; floor 30, ceiling 40, half the missing skills covered
        assert_eq!(report.strong_score, 20.0);
        assert_eq!(report.partial_score, 35.0);
        assert!(report.strong_reasoning.starts_with("Found 1 exact matches out of 5 required skills (20.0%)."));
        assert!(report.strong_reasoning.contains("- PYTHON: found in both resume and job description"));
        assert!(report.partial_reasoning.contains("- mysql (related to sql)"));
    }

    #[test]
    fn test_whole_word_matching() {
        let matcher = SkillMatcher::new().unwrap();
        let report = matcher.match_skills("MySQL and JavaScript", "Need SQL and Java");
        assert!(report.exact_matches.is_empty());
        assert_eq!(report.missing_skills, vec!["java", "sql"]);
    }

    #[test]
    fn test_transferable_direction() {
        let matcher = SkillMatcher::new().unwrap();
        let report = matcher.match_skills("Hands-on Kubernetes and Azure", "Docker experience required");
        assert_eq!(
            report.related_matches,
            vec![RelatedMatch { skill: "kubernetes".into(), source: "docker".into(), relation: Relation::Related }]
        );

        let report = matcher.match_skills("Ten years of python", "Machine learning engineer");
        assert_eq!(
            report.related_matches,
            vec![RelatedMatch {
                skill: "python".into(),
                source: "machine learning".into(),
                relation: Relation::Transferable,
            }]
        );
    }

    #[test]
    fn test_no_job_skills_uses_neutral_score() {
        let matcher = SkillMatcher::new().unwrap();
        let report = matcher.match_skills("Python developer", "We want a friendly person");
        assert_eq!(report.strong_score, 50.0);
        assert_eq!(report.partial_score, 70.0);
        assert!(report.strong_reasoning.starts_with("No specific skills"));
        assert!(report.partial_reasoning.contains("No related skill matches found"));
    }

    #[test]
    fn test_all_skills_matched() {
        let matcher = SkillMatcher::new().unwrap();
        let report = matcher.match_skills("python, sql", "Python and SQL");
        assert_eq!(report.strong_score, 100.0);
        assert_eq!(report.partial_score, 80.0);
    }

    #[test]
    fn test_partial_bounds() {
        for strong in [0.0, 10.0, 33.3, 50.0, 75.0, 100.0] {
            for covered in 0..=4 {
                let partial = partial_score(strong, 4, covered);
                assert!((30.0..=80.0).contains(&partial), "{} {}", strong, partial);
                assert!(partial >= (strong * 0.6).max(30.0));
            }
        }
        assert!(partial_score(40.0, 4, 4) > partial_score(40.0, 4, 1));
    }

    #[test]
    fn test_should_run() {
        let mut record = CandidateRecord::new();
        assert!(SkillMatcher::should_run(&record, Some("resume"), Some("job")));
        assert!(!SkillMatcher::should_run(&record, Some("resume"), Some("  ")));
        assert!(!SkillMatcher::should_run(&record, None, Some("job")));

        record.set(Field::StrongMatchesScore, "0");
        record.set(Field::PartialMatchesScore, "0.0");
        assert!(SkillMatcher::should_run(&record, Some("resume"), Some("job")));

        record.set(Field::PartialMatchesScore, "12");
        assert!(!SkillMatcher::should_run(&record, Some("resume"), Some("job")));
    }
}
