//! Suggestion candidates
//!
//! A `Candidate` is one result row from the suggestion source. Candidates are
//! decoded once and only ever read afterwards; empty strings in the payload are
//! treated the same as missing attributes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One suggested medication returned by the suggestion source
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCandidate")]
pub struct Candidate {
    /// Canonical (generic) name
    pub name: String,
    /// Name shown in the dropdown, falls back to `name`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Secondary/brand name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dosage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Form or category, e.g. "tablet"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub common_uses: Option<String>,
}

/// Payload row as sent on the wire
///
/// `value` and `label` are the older endpoint's names for `name` and
/// `display_name`. Sources may send both spellings in one row.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawCandidate {
    name: Option<String>,
    value: Option<String>,
    display_name: Option<String>,
    label: Option<String>,
    brand_name: Option<String>,
    dosage: Option<String>,
    frequency: Option<String>,
    notes: Option<String>,
    form: Option<String>,
    common_uses: Option<String>,
}

impl TryFrom<RawCandidate> for Candidate {
    type Error = String;

    fn try_from(raw: RawCandidate) -> Result<Self, Self::Error> {
        let name = match (raw.name, raw.value) {
            (Some(name), Some(value)) if name.trim().is_empty() => value,
            (Some(name), _) => name,
            (None, Some(value)) => value,
            (None, None) => return Err("missing field `name`".to_string()),
        };

        Ok(Candidate {
            name,
            display_name: raw.display_name.filter(|d| !d.trim().is_empty()).or(raw.label),
            brand_name: raw.brand_name,
            dosage: raw.dosage,
            frequency: raw.frequency,
            notes: raw.notes,
            form: raw.form,
            common_uses: raw.common_uses,
        })
    }
}

/// Candidate attributes that can be bound to a form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CandidateField {
    Name,
    DisplayName,
    BrandName,
    Dosage,
    Frequency,
    Notes,
    Form,
    CommonUses,
}

impl CandidateField {
    pub const ALL: [CandidateField; 8] = [
        CandidateField::Name,
        CandidateField::DisplayName,
        CandidateField::BrandName,
        CandidateField::Dosage,
        CandidateField::Frequency,
        CandidateField::Notes,
        CandidateField::Form,
        CandidateField::CommonUses,
    ];
}

impl fmt::Display for CandidateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = match self {
            CandidateField::Name => "name",
            CandidateField::DisplayName => "display_name",
            CandidateField::BrandName => "brand_name",
            CandidateField::Dosage => "dosage",
            CandidateField::Frequency => "frequency",
            CandidateField::Notes => "notes",
            CandidateField::Form => "form",
            CandidateField::CommonUses => "common_uses",
        };
        f.write_str(key)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

impl Candidate {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn with_brand_name(mut self, brand_name: impl Into<String>) -> Self {
        self.brand_name = Some(brand_name.into());
        self
    }

    pub fn with_dosage(mut self, dosage: impl Into<String>) -> Self {
        self.dosage = Some(dosage.into());
        self
    }

    pub fn with_frequency(mut self, frequency: impl Into<String>) -> Self {
        self.frequency = Some(frequency.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_form(mut self, form: impl Into<String>) -> Self {
        self.form = Some(form.into());
        self
    }

    pub fn with_common_uses(mut self, common_uses: impl Into<String>) -> Self {
        self.common_uses = Some(common_uses.into());
        self
    }

    /// Non-empty value of an attribute, `None` when absent or blank
    pub fn attribute(&self, field: CandidateField) -> Option<&str> {
        match field {
            CandidateField::Name => Some(self.name.as_str()).filter(|v| !v.trim().is_empty()),
            CandidateField::DisplayName => Some(self.display_label()),
            CandidateField::BrandName => non_empty(&self.brand_name),
            CandidateField::Dosage => non_empty(&self.dosage),
            CandidateField::Frequency => non_empty(&self.frequency),
            CandidateField::Notes => non_empty(&self.notes),
            CandidateField::Form => non_empty(&self.form),
            CandidateField::CommonUses => non_empty(&self.common_uses),
        }
    }

    /// Label for the dropdown row: display name, else canonical name
    pub fn display_label(&self) -> &str {
        non_empty(&self.display_name).unwrap_or(&self.name)
    }

    /// Whether applying this candidate writes the brand name into the search input
    pub fn uses_brand_name(&self) -> bool {
        non_empty(&self.brand_name).is_some_and(|brand| brand != self.name)
    }

    /// Value written into the search input when this candidate is applied
    pub fn applied_name(&self) -> &str {
        non_empty(&self.brand_name).unwrap_or_else(|| self.display_label())
    }
}

/// Decode a suggestion payload (a JSON array of candidates)
pub fn parse_candidates(body: &str) -> Result<Vec<Candidate>, serde_json::Error> {
    serde_json::from_str(body)
}

#[cfg(test)]
#[path = "candidate_tests.rs"]
mod candidate_tests;
