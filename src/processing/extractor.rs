//! Field extraction from loosely structured model output

use crate::error::{EvaluatorError, Result};
use crate::processing::diagnostics::Diagnostic;
use crate::processing::fields::{AliasTable, Field};
use crate::processing::record::{CandidateRecord, NOT_AVAILABLE};
use crate::processing::text_cleaner::TextCleaner;
use regex::Regex;

/// Turns `Label: value` style analysis text into a [`CandidateRecord`].
pub struct FieldExtractor {
    aliases: AliasTable,
    cleaner: TextCleaner,
    strong_score_regex: Regex,
    partial_score_regex: Regex,
}

/// Extracted record plus any fields that had to be defaulted.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub record: CandidateRecord,
    pub diagnostics: Vec<Diagnostic>,
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor {
    pub fn new() -> Self {
        Self {
            aliases: AliasTable::new(),
            cleaner: TextCleaner::new(),
            strong_score_regex: Self::score_regex("strong"),
            partial_score_regex: Self::score_regex("partial"),
        }
    }

    fn score_regex(kind: &str) -> Regex {
        let pattern = format!(
            r"(?i){}\s+match(?:es)?\s+score(?:\s*\(\s*0\s*-\s*100\s*\))?[ \t*]*:[ \t*]*(\d+(?:\.\d+)?)",
            kind
        );
        Regex::new(&pattern).expect("Invalid score regex")
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    /// Extract every canonical field from the analysis text.
    ///
    /// Blank input is an [`EvaluatorError::AnalysisParseFailure`]: "no result"
    /// is distinct from a record whose fields are all absent.
    pub fn extract(&self, analysis: &str) -> Result<Extraction> {
        if analysis.trim().is_empty() {
            return Err(EvaluatorError::AnalysisParseFailure(
                "analysis text is empty".to_string(),
            ));
        }

        let mut record = self.assemble_fields(analysis);
        self.apply_score_overrides(analysis, &mut record);
        let diagnostics = self.coerce_numeric_fields(&mut record);

        log::debug!(
            "Extracted {} of {} fields ({} coerced to default)",
            record.present_count(),
            Field::ALL.len(),
            diagnostics.len()
        );

        Ok(Extraction { record, diagnostics })
    }

    /// Line-oriented pass: a line whose pre-colon text is a known alias starts
    /// a new field; every other non-empty line continues the current one.
    fn assemble_fields(&self, analysis: &str) -> CandidateRecord {
        let mut record = CandidateRecord::new();
        let mut current_field: Option<Field> = None;
        let mut current_value: Vec<String> = Vec::new();

        for line in analysis.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let new_field = line
                .split_once(':')
                .and_then(|(key, value)| self.aliases.resolve(key).map(|field| (field, value.trim())));

            match new_field {
                Some((field, value)) => {
                    if let Some(previous) = current_field.take() {
                        flush(&mut record, previous, &mut current_value);
                    }
                    current_field = Some(field);
                    if !value.is_empty() {
                        current_value.push(value.to_string());
                    }
                }
                None if current_field.is_some() => current_value.push(line.to_string()),
                None => {}
            }
        }

        if let Some(field) = current_field {
            flush(&mut record, field, &mut current_value);
        }

        record
    }

    /// Scores stated inline anywhere in the text win over the structured pass,
    /// which can be misled by reasoning sections reusing the same labels.
    fn apply_score_overrides(&self, analysis: &str, record: &mut CandidateRecord) {
        let overrides = [
            (Field::StrongMatchesScore, &self.strong_score_regex),
            (Field::PartialMatchesScore, &self.partial_score_regex),
        ];

        for (field, regex) in overrides {
            if let Some(score) = regex.captures(analysis).and_then(|cap| cap.get(1)) {
                record.set(field, score.as_str());
            }
        }
    }

    fn coerce_numeric_fields(&self, record: &mut CandidateRecord) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        for field in Field::NUMERIC {
            let raw = match record.get(field) {
                Some(raw) => raw.to_string(),
                None => continue,
            };
            if self.cleaner.is_plain_number(&raw) {
                record.set(field, raw.trim());
                continue;
            }

            let token = if field == Field::JobStability {
                self.cleaner.rating_out_of_ten(&raw)
            } else {
                self.cleaner.first_number(&raw)
            };

            match token {
                Some(number) => record.set(field, number),
                None => {
                    log::debug!("No number in {} value {:?}", field, raw);
                    record.clear(field);
                    diagnostics.push(Diagnostic::coercion(field, raw, NOT_AVAILABLE));
                }
            }
        }

        diagnostics
    }
}

fn flush(record: &mut CandidateRecord, field: Field, value: &mut Vec<String>) {
    if !value.is_empty() {
        record.set(field, value.join("\n"));
        value.clear();
    }
}
