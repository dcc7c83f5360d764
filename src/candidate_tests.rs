//! Tests for candidate decoding and display rules

use super::*;

#[test]
fn test_parse_full_candidate() {
    let body = r#"[{
        "name": "ibuprofen",
        "display_name": "Ibuprofen",
        "brand_name": "Advil",
        "dosage": "200mg",
        "frequency": "Every 6 hours",
        "notes": "Take with food",
        "form": "tablet",
        "common_uses": "pain relief"
    }]"#;

    let candidates = parse_candidates(body).unwrap();
    assert_eq!(candidates.len(), 1);
    let c = &candidates[0];
    assert_eq!(c.name, "ibuprofen");
    assert_eq!(c.brand_name.as_deref(), Some("Advil"));
    assert_eq!(c.attribute(CandidateField::Form), Some("tablet"));
    assert_eq!(c.attribute(CandidateField::CommonUses), Some("pain relief"));
}

#[test]
fn test_parse_label_value_payload() {
    // Shape produced by the medication-suggestions endpoint
    let body = r#"[{"label": "Metformin", "value": "metformin", "dosage": "500mg", "frequency": "", "notes": ""}]"#;

    let candidates = parse_candidates(body).unwrap();
    let c = &candidates[0];
    assert_eq!(c.name, "metformin");
    assert_eq!(c.display_label(), "Metformin");
    assert_eq!(c.attribute(CandidateField::Dosage), Some("500mg"));
    assert_eq!(c.attribute(CandidateField::Frequency), None);
    assert_eq!(c.attribute(CandidateField::Notes), None);
}

#[test]
fn test_parse_row_with_both_name_spellings() {
    let body = r#"[{"name": "ibuprofen", "label": "Ibuprofen", "value": "ibuprofen", "dosage": "200mg"}]"#;

    let candidates = parse_candidates(body).unwrap();
    let c = &candidates[0];
    assert_eq!(c.name, "ibuprofen");
    assert_eq!(c.display_label(), "Ibuprofen");
    assert_eq!(c.attribute(CandidateField::Dosage), Some("200mg"));
}

#[test]
fn test_parse_prefers_name_over_value() {
    let body = r#"[
        {"name": "metformin", "value": "Metformin ER", "display_name": "Metformin", "label": "Glucophage"},
        {"name": "", "value": "aspirin"}
    ]"#;

    let candidates = parse_candidates(body).unwrap();
    assert_eq!(candidates[0].name, "metformin");
    assert_eq!(candidates[0].display_label(), "Metformin");
    assert_eq!(candidates[1].name, "aspirin");
}

#[test]
fn test_parse_ignores_unknown_keys() {
    let body = r#"[{"name": "aspirin", "id": 7, "score": 0.9}]"#;
    let candidates = parse_candidates(body).unwrap();
    assert_eq!(candidates, vec![Candidate::new("aspirin")]);
}

#[test]
fn test_parse_preserves_order() {
    let body = r#"[{"name": "b"}, {"name": "a"}, {"name": "c"}]"#;
    let names: Vec<_> = parse_candidates(body)
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["b", "a", "c"]);
}

#[test]
fn test_parse_empty_array() {
    assert!(parse_candidates("[]").unwrap().is_empty());
}

#[test]
fn test_parse_rejects_non_array() {
    assert!(parse_candidates(r#"{"error": "boom"}"#).is_err());
    assert!(parse_candidates("<html>").is_err());
}

#[test]
fn test_parse_rejects_missing_name() {
    assert!(parse_candidates(r#"[{"dosage": "1mg"}]"#).is_err());
}

#[test]
fn test_display_label_falls_back_to_name() {
    assert_eq!(Candidate::new("ibuprofen").display_label(), "ibuprofen");
    assert_eq!(
        Candidate::new("ibuprofen")
            .with_display_name("")
            .display_label(),
        "ibuprofen"
    );
    assert_eq!(
        Candidate::new("ibuprofen")
            .with_display_name("Ibuprofen 200")
            .display_label(),
        "Ibuprofen 200"
    );
}

#[test]
fn test_applied_name_prefers_brand() {
    let c = Candidate::new("acetaminophen").with_brand_name("Tylenol");
    assert_eq!(c.applied_name(), "Tylenol");
    assert!(c.uses_brand_name());

    let c = Candidate::new("acetaminophen").with_brand_name("  ");
    assert_eq!(c.applied_name(), "acetaminophen");
    assert!(!c.uses_brand_name());
}

#[test]
fn test_brand_equal_to_name_is_not_a_brand_swap() {
    let c = Candidate::new("Lipitor").with_brand_name("Lipitor");
    assert_eq!(c.applied_name(), "Lipitor");
    assert!(!c.uses_brand_name());
}

#[test]
fn test_attribute_blank_is_absent() {
    let c = Candidate::new("x").with_dosage("   ").with_notes("");
    assert_eq!(c.attribute(CandidateField::Dosage), None);
    assert_eq!(c.attribute(CandidateField::Notes), None);
}

#[test]
fn test_candidate_field_display() {
    let keys: Vec<String> = CandidateField::ALL.iter().map(|f| f.to_string()).collect();
    assert_eq!(
        keys,
        vec![
            "name",
            "display_name",
            "brand_name",
            "dosage",
            "frequency",
            "notes",
            "form",
            "common_uses"
        ]
    );
}
