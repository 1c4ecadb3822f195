//! Per-candidate field record

use crate::processing::fields::Field;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeMap;

/// Rendered in place of a field the analysis never supplied.
pub const NOT_AVAILABLE: &str = "Not Available";

/// Canonical field values for one candidate.
///
/// A field is either absent (`None`) or present with some text, which may be
/// empty. Absent fields render as [`NOT_AVAILABLE`] at the output boundary,
/// so the sentinel can never collide with genuine data inside the engine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateRecord {
    values: BTreeMap<Field, String>,
}

impl CandidateRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }

    /// Present and non-blank.
    pub fn text(&self, field: Field) -> Option<&str> {
        self.get(field).filter(|v| !v.trim().is_empty())
    }

    pub fn is_present(&self, field: Field) -> bool {
        self.values.contains_key(&field)
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    pub fn clear(&mut self, field: Field) -> Option<String> {
        self.values.remove(&field)
    }

    /// Parse a numeric field. `None` when absent or not a finite number.
    pub fn number(&self, field: Field) -> Option<f64> {
        self.get(field)
            .and_then(|v| v.trim().parse::<f64>().ok())
            .filter(|n| n.is_finite())
    }

    /// Value as shown in reports.
    pub fn display(&self, field: Field) -> &str {
        self.get(field).unwrap_or(NOT_AVAILABLE)
    }

    /// Iterate every canonical field in report order, absent ones included.
    pub fn iter(&self) -> impl Iterator<Item = (Field, Option<&str>)> + '_ {
        Field::ALL.iter().map(move |f| (*f, self.get(*f)))
    }

    pub fn present_count(&self) -> usize {
        self.values.len()
    }

    pub(crate) fn fields_present(&self) -> Vec<Field> {
        self.values.keys().copied().collect()
    }
}

impl Serialize for CandidateRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Field::ALL.len()))?;
        for (field, value) in self.iter() {
            map.serialize_entry(field.label(), value.unwrap_or(NOT_AVAILABLE))?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_fields_render_sentinel() {
        let mut record = CandidateRecord::new();
        record.set(Field::LinkedInUrl, "");

        assert_eq!(record.display(Field::CandidateName), NOT_AVAILABLE);
        assert_eq!(record.display(Field::LinkedInUrl), "");
        assert!(record.is_present(Field::LinkedInUrl));
        assert!(record.text(Field::LinkedInUrl).is_none());
    }

    #[test]
    fn test_numbers_parse_or_are_none() {
        let mut record = CandidateRecord::new();
        record.set(Field::JobStability, " 7.5 ");
        record.set(Field::TotalExperienceYears, "five");

        assert_eq!(record.number(Field::JobStability), Some(7.5));
        assert_eq!(record.number(Field::TotalExperienceYears), None);
        assert_eq!(record.number(Field::RelevancyScore), None);
    }

    #[test]
    fn test_serializes_every_field_with_labels() {
        let mut record = CandidateRecord::new();
        record.set(Field::CandidateName, "Jane Roe");

        let json = serde_json::to_value(&record).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), Field::ALL.len());
        assert_eq!(object["Candidate Name"], "Jane Roe");
        assert_eq!(object["Degree"], NOT_AVAILABLE);
    }
}
