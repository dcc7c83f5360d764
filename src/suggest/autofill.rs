//! Selection-driven autofill
//!
//! Copies attributes of an applied candidate into the host form. The host is
//! abstracted behind `FormHost` so the same logic drives the terminal form
//! and the in-memory `FormFields` used in tests and headless embedding.

use std::collections::HashMap;

use crate::candidate::{Candidate, CandidateField};

/// Access to the input elements of the page hosting a widget
pub trait FormHost {
    /// Whether an element with this identifier exists
    fn has_element(&self, id: &str) -> bool;

    /// Current value of an input, `None` if the element does not exist
    fn value(&self, id: &str) -> Option<String>;

    /// Overwrite an input's value. Returns false if the element does not exist.
    fn set_value(&mut self, id: &str, value: &str) -> bool;
}

/// In-memory form: element identifier → current value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    values: HashMap<String, String>,
}

impl FormFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an element with an initial value
    pub fn with_field(mut self, id: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(id.into(), value.into());
        self
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.values.get(id).map(String::as_str)
    }
}

impl FormHost for FormFields {
    fn has_element(&self, id: &str) -> bool {
        self.values.contains_key(id)
    }

    fn value(&self, id: &str) -> Option<String> {
        self.values.get(id).cloned()
    }

    fn set_value(&mut self, id: &str, value: &str) -> bool {
        match self.values.get_mut(id) {
            Some(slot) => {
                *slot = value.to_string();
                true
            }
            None => false,
        }
    }
}

/// Static mapping from candidate attribute to destination input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldBindings {
    bindings: Vec<(CandidateField, String)>,
}

impl FieldBindings {
    /// Bindings with no targets
    pub fn empty() -> Self {
        Self::default()
    }

    /// Bind `field` to the input `target`, replacing an earlier binding of `field`
    pub fn bind(mut self, field: CandidateField, target: impl Into<String>) -> Self {
        let target = target.into();
        match self.bindings.iter_mut().find(|(f, _)| *f == field) {
            Some((_, existing)) => *existing = target,
            None => self.bindings.push((field, target)),
        }
        self
    }

    pub fn target(&self, field: CandidateField) -> Option<&str> {
        self.bindings
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, target)| target.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (CandidateField, &str)> {
        self.bindings.iter().map(|(f, t)| (*f, t.as_str()))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// What `apply_candidate` changed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AutofillReport {
    /// Value written into the search input
    pub search_value: String,
    /// Target inputs that were overwritten
    pub filled: Vec<String>,
    /// Bound targets missing from the host
    pub missing: Vec<String>,
}

/// Apply a candidate to the host form
///
/// Writes the candidate's applied name into `input_id`, then overwrites every
/// bound target whose source attribute is non-empty. Blank attributes leave the
/// target untouched. When the brand name replaced the generic name in the
/// search input, the notes target is annotated with the generic name.
pub fn apply_candidate<H: FormHost + ?Sized>(
    candidate: &Candidate,
    input_id: &str,
    bindings: &FieldBindings,
    host: &mut H,
) -> AutofillReport {
    let search_value = candidate.applied_name().to_string();
    host.set_value(input_id, &search_value);

    let mut report = AutofillReport {
        search_value,
        ..AutofillReport::default()
    };

    for (field, target) in bindings.iter() {
        let value = match field {
            CandidateField::Notes => notes_value(candidate, host.value(target)),
            _ => candidate.attribute(field).map(str::to_string),
        };
        let Some(value) = value else {
            continue;
        };

        if host.set_value(target, &value) {
            report.filled.push(target.to_string());
        } else {
            log::warn!("Autofill target '{}' not found for {}", target, field);
            report.missing.push(target.to_string());
        }
    }

    report
}

fn notes_value(candidate: &Candidate, current: Option<String>) -> Option<String> {
    let notes = candidate.attribute(CandidateField::Notes);
    if !candidate.uses_brand_name() {
        return notes.map(str::to_string);
    }

    let base = match notes {
        Some(notes) => notes.to_string(),
        None => current.unwrap_or_default(),
    };
    Some(annotate_generic(&base, &candidate.name))
}

fn annotate_generic(notes: &str, generic: &str) -> String {
    let tag = format!("Generic: {}", generic);
    if notes.contains(&tag) {
        notes.to_string()
    } else if notes.trim().is_empty() {
        tag
    } else {
        format!("{} ({})", notes.trim_end(), tag)
    }
}

#[cfg(test)]
#[path = "autofill_tests.rs"]
mod autofill_tests;
