//! Tests for candidate autofill

use super::*;
use proptest::prelude::*;

fn medication_form() -> FormFields {
    FormFields::new()
        .with_field("search", "ib")
        .with_field("dosage", "")
        .with_field("frequency", "")
        .with_field("notes", "")
}

fn default_bindings() -> FieldBindings {
    FieldBindings::empty()
        .bind(CandidateField::Dosage, "dosage")
        .bind(CandidateField::Frequency, "frequency")
        .bind(CandidateField::Notes, "notes")
}

#[test]
fn test_apply_fills_search_and_bound_fields() {
    let mut form = medication_form();
    let candidate = Candidate::new("ibuprofen")
        .with_dosage("200mg")
        .with_frequency("Every 6 hours")
        .with_notes("Take with food");

    let report = apply_candidate(&candidate, "search", &default_bindings(), &mut form);

    assert_eq!(report.search_value, "ibuprofen");
    assert_eq!(form.get("search"), Some("ibuprofen"));
    assert_eq!(form.get("dosage"), Some("200mg"));
    assert_eq!(form.get("frequency"), Some("Every 6 hours"));
    assert_eq!(form.get("notes"), Some("Take with food"));
    assert_eq!(report.filled, vec!["dosage", "frequency", "notes"]);
    assert!(report.missing.is_empty());
}

#[test]
fn test_apply_leaves_field_unchanged_for_blank_attribute() {
    let mut form = medication_form()
        .with_field("frequency", "Twice daily")
        .with_field("dosage", "100mg");
    let candidate = Candidate::new("ibuprofen")
        .with_dosage("")
        .with_frequency("");

    let report = apply_candidate(&candidate, "search", &default_bindings(), &mut form);

    assert_eq!(form.get("dosage"), Some("100mg"));
    assert_eq!(form.get("frequency"), Some("Twice daily"));
    assert!(report.filled.is_empty());
}

#[test]
fn test_apply_brand_name_goes_to_search() {
    let mut form = medication_form();
    let candidate = Candidate::new("acetaminophen").with_brand_name("Tylenol");

    apply_candidate(&candidate, "search", &default_bindings(), &mut form);

    assert_eq!(form.get("search"), Some("Tylenol"));
}

#[test]
fn test_brand_selection_annotates_notes_with_generic() {
    let mut form = medication_form();
    let candidate = Candidate::new("acetaminophen")
        .with_brand_name("Tylenol")
        .with_notes("Max 4g/day");

    apply_candidate(&candidate, "search", &default_bindings(), &mut form);

    assert_eq!(
        form.get("notes"),
        Some("Max 4g/day (Generic: acetaminophen)")
    );
}

#[test]
fn test_brand_selection_without_notes_annotates_existing_notes() {
    let mut form = medication_form().with_field("notes", "Patient prefers liquid");
    let candidate = Candidate::new("acetaminophen").with_brand_name("Tylenol");

    apply_candidate(&candidate, "search", &default_bindings(), &mut form);

    assert_eq!(
        form.get("notes"),
        Some("Patient prefers liquid (Generic: acetaminophen)")
    );
}

#[test]
fn test_brand_annotation_not_duplicated() {
    let mut form = medication_form();
    let candidate = Candidate::new("acetaminophen").with_brand_name("Tylenol");

    apply_candidate(&candidate, "search", &default_bindings(), &mut form);
    apply_candidate(&candidate, "search", &default_bindings(), &mut form);

    assert_eq!(form.get("notes"), Some("Generic: acetaminophen"));
}

#[test]
fn test_generic_selection_does_not_annotate() {
    let mut form = medication_form().with_field("notes", "keep me");
    let candidate = Candidate::new("ibuprofen");

    apply_candidate(&candidate, "search", &default_bindings(), &mut form);

    assert_eq!(form.get("notes"), Some("keep me"));
}

#[test]
fn test_missing_target_is_reported_not_created() {
    let mut form = FormFields::new().with_field("search", "");
    let bindings = FieldBindings::empty().bind(CandidateField::Form, "route");
    let candidate = Candidate::new("insulin").with_form("injection");

    let report = apply_candidate(&candidate, "search", &bindings, &mut form);

    assert_eq!(report.missing, vec!["route"]);
    assert!(!form.has_element("route"));
}

#[test]
fn test_bind_replaces_existing_target() {
    let bindings = FieldBindings::empty()
        .bind(CandidateField::Dosage, "dose_a")
        .bind(CandidateField::Dosage, "dose_b");
    assert_eq!(bindings.len(), 1);
    assert_eq!(bindings.target(CandidateField::Dosage), Some("dose_b"));
}

#[test]
fn test_form_fields_set_value_requires_element() {
    let mut form = FormFields::new().with_field("a", "1");
    assert!(form.set_value("a", "2"));
    assert!(!form.set_value("b", "2"));
    assert_eq!(form.value("a"), Some("2".to_string()));
    assert_eq!(form.value("b"), None);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // A blank dosage never erases an existing dosage; a non-blank one always overwrites
    #[test]
    fn prop_dosage_overwrite_rules(
        existing in "[a-z0-9 ]{0,10}",
        incoming in prop::option::of("[a-z0-9 ]{0,10}"),
    ) {
        let mut form = medication_form().with_field("dosage", existing.clone());
        let mut candidate = Candidate::new("drug");
        candidate.dosage = incoming.clone();

        apply_candidate(&candidate, "search", &default_bindings(), &mut form);

        let expected = match incoming.as_deref() {
            Some(v) if !v.trim().is_empty() => v.to_string(),
            _ => existing,
        };
        prop_assert_eq!(form.get("dosage"), Some(expected.as_str()));
    }
}
