//! Wire-format checks for the catalog data the web layer fetches.

use dcr_sim::{Achievement, AchievementKind, Catalog, CatalogError, CircleSize, Reservists};
use serde_json::{Value, json};

#[test]
fn kind_and_enum_fields_use_form_value_encodings() {
    let achievement = Achievement {
        id: 42,
        title: "Certification circle".to_string(),
        points: 236,
        kind: AchievementKind::CertificationCircle,
        selected_certification: Some(10),
        circle_size: Some(CircleSize::Five),
        reservists: Reservists::TwoPlus,
        ..Achievement::default()
    };
    let value = serde_json::to_value(&achievement).unwrap();
    assert_eq!(value["kind"], json!("certification-circle"));
    assert_eq!(value["circle_size"], json!("5"));
    assert_eq!(value["reservists"], json!("2"));
}

#[test]
fn catalog_round_trips_through_json() {
    let source = include_str!("fixtures/achievements.json");
    let catalog = Catalog::from_json(source).unwrap();
    let serialized = serde_json::to_string(&catalog).unwrap();
    let restored = Catalog::from_json(&serialized).unwrap();
    assert_eq!(catalog, restored);

    // The transparent encoding stays a plain category-to-items mapping.
    let value: Value = serde_json::from_str(&serialized).unwrap();
    assert!(value.is_object());
    assert!(value["tech"].is_array());
}

#[test]
fn unknown_kind_values_fail_parsing() {
    let json = r#"{
        "extra": [{ "id": 1, "title": "Mystery", "points": 5, "kind": "mystery" }]
    }"#;
    assert!(matches!(
        Catalog::from_json(json),
        Err(CatalogError::Parse(_))
    ));
}

#[test]
fn minimal_records_rely_on_defaults() {
    let json = r#"{ "tech": [{ "id": 1, "title": "CKA", "points": 180 }] }"#;
    let catalog = Catalog::from_json(json).unwrap();
    let cert = catalog.find(1).unwrap();
    assert_eq!(cert.kind, AchievementKind::Standard);
    assert!(!cert.promoted);
    assert!(!cert.mandatory);
    assert!(cert.skills.is_empty());
    assert_eq!(cert.provider, None);
    assert_eq!(cert.reservists, Reservists::Zero);
}
