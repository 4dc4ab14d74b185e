use super::*;
use serde_json::{Value, json};
use std::path::Path;

fn raga(id: &str, name: &str, category: &str, period: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "category": category,
        "period": period,
        "ascendingPattern": "Sa Re Ga Ma Pa Dha Ni Sa'",
        "descendingPattern": "Sa' Ni Dha Pa Ma Ga Re Sa",
        "mood": "Serene",
        "notes": "Test raga",
        "mediaRef": null
    })
}

#[test]
fn load_records_keeps_valid_records_in_input_order() {
    let raw = vec![
        raga("x", "Yaman", "Kalyan", "Evening"),
        raga("y", "Bhairav", "Bhairav", "Morning"),
    ];
    let loaded = load_records(&raw).unwrap();
    assert_eq!(loaded.rejected, 0);
    let ids: Vec<&str> = loaded.catalog.records().iter().map(|r| r.id()).collect();
    assert_eq!(ids, vec!["x", "y"]);
}

#[test]
fn load_records_drops_and_counts_invalid_items() {
    let mut missing_name = raga("a", "A", "Kalyan", "Evening");
    missing_name.as_object_mut().unwrap().remove("name");
    let mut blank_mood = raga("b", "B", "Kalyan", "Evening");
    blank_mood["mood"] = json!("   ");
    let mut numeric_period = raga("c", "C", "Kalyan", "Evening");
    numeric_period["period"] = json!(7);
    let mut empty_media = raga("d", "D", "Kalyan", "Evening");
    empty_media["mediaRef"] = json!("");

    let raw = vec![
        missing_name,
        blank_mood,
        numeric_period,
        empty_media,
        json!("not an object"),
        json!(null),
        raga("ok", "Yaman", "Kalyan", "Evening"),
    ];

    let loaded = load_records(&raw).unwrap();
    assert_eq!(loaded.rejected, 6);
    assert_eq!(loaded.catalog.len(), 1);
    assert_eq!(loaded.catalog.records()[0].id(), "ok");
}

#[test]
fn load_records_fails_when_nothing_is_valid() {
    let raw = vec![json!({}), json!({"id": "x"})];
    match load_records(&raw) {
        Err(CatalogError::Empty { rejected }) => assert_eq!(rejected, 2),
        other => panic!("expected Empty, got {other:?}"),
    }

    assert!(matches!(
        load_records(&[]),
        Err(CatalogError::Empty { rejected: 0 })
    ));
}

#[test]
fn load_records_rejects_duplicate_ids_keeping_the_first() {
    let raw = vec![
        raga("x", "Yaman", "Kalyan", "Evening"),
        raga("x", "Other", "Kafi", "Night"),
    ];
    let loaded = load_records(&raw).unwrap();
    assert_eq!(loaded.rejected, 1);
    assert_eq!(loaded.catalog.get_by_id("x").unwrap().name(), "Yaman");
}

#[test]
fn record_validation_reports_the_failing_field() {
    let mut v = raga("a", "A", "Kalyan", "Evening");
    v["notes"] = json!("");
    assert_eq!(Record::try_from(&v), Err(RecordError::EmptyField("notes")));

    let mut v = raga("a", "A", "Kalyan", "Evening");
    v.as_object_mut().unwrap().remove("category");
    assert_eq!(Record::try_from(&v), Err(RecordError::MissingField("category")));

    let mut v = raga("a", "A", "Kalyan", "Evening");
    v["mediaRef"] = json!(42);
    assert!(matches!(
        Record::try_from(&v),
        Err(RecordError::WrongType { field: "mediaRef", .. })
    ));

    assert_eq!(Record::try_from(&json!([1, 2])), Err(RecordError::NotAnObject));
}

#[test]
fn record_accepts_legacy_field_names_and_trims() {
    let v = json!({
        "id": " yaman ",
        "name": "Yaman",
        "thaat": "Kalyan",
        "timeOfDay": "Evening",
        "aroha": "Ni Re Ga",
        "avaroha": "Ga Re Sa",
        "mood": "Serene",
        "characteristics": "Teevra Ma",
        "audioFile": " audio/yaman.mp3 "
    });
    let r = Record::try_from(&v).unwrap();
    assert_eq!(r.id(), "yaman");
    assert_eq!(r.category(), "Kalyan");
    assert_eq!(r.period(), "Evening");
    assert_eq!(r.ascending_pattern(), "Ni Re Ga");
    assert_eq!(r.descending_pattern(), "Ga Re Sa");
    assert_eq!(r.notes(), "Teevra Ma");
    assert_eq!(r.media_ref(), Some("audio/yaman.mp3"));
}

#[test]
fn get_by_id_miss_is_none() {
    let loaded = load_records(&[raga("x", "Yaman", "Kalyan", "Evening")]).unwrap();
    assert!(loaded.catalog.get_by_id("x").is_some());
    assert!(loaded.catalog.get_by_id("missing").is_none());
    assert!(loaded.catalog.get_by_id("").is_none());
}

#[test]
fn list_distinct_values_is_sorted_and_unique() {
    let raw = vec![
        raga("a", "A", "Kalyan", "Evening"),
        raga("b", "B", "Bhairav", "Morning"),
        raga("c", "C", "Kalyan", "Night"),
        raga("d", "D", "Asavari", "Evening"),
    ];
    let catalog = load_records(&raw).unwrap().catalog;
    assert_eq!(
        catalog.list_distinct_values(Field::Category),
        vec!["Asavari", "Bhairav", "Kalyan"]
    );
    assert_eq!(
        catalog.list_distinct_values(Field::Period),
        vec!["Evening", "Morning", "Night"]
    );
}

#[test]
fn parse_document_accepts_json_array_and_ragas_object() {
    let arr = r#"[{"id": "x"}]"#;
    assert_eq!(parse_document(arr, DocumentFormat::Json).unwrap().len(), 1);

    let obj = r#"{"ragas": [{"id": "x"}, {"id": "y"}]}"#;
    assert_eq!(parse_document(obj, DocumentFormat::Json).unwrap().len(), 2);

    assert!(matches!(
        parse_document(r#"{"other": []}"#, DocumentFormat::Json),
        Err(CatalogError::Shape)
    ));
    assert!(matches!(
        parse_document("42", DocumentFormat::Json),
        Err(CatalogError::Shape)
    ));
    assert!(matches!(
        parse_document("[", DocumentFormat::Json),
        Err(CatalogError::Parse(_))
    ));
}

#[test]
fn parse_document_accepts_toml_table_array() {
    let text = r#"
[[ragas]]
id = "yaman"
name = "Yaman"
thaat = "Kalyan"
timeOfDay = "Evening"
aroha = "Ni Re Ga"
avaroha = "Ga Re Sa"
mood = "Serene"
characteristics = "Teevra Ma"
audioFile = "yaman.ogg"
"#;
    let raw = parse_document(text, DocumentFormat::Toml).unwrap();
    let loaded = load_records(&raw).unwrap();
    let r = loaded.catalog.get_by_id("yaman").unwrap();
    assert_eq!(r.media_ref(), Some("yaman.ogg"));
}

#[test]
fn document_format_is_picked_from_extension() {
    assert_eq!(
        DocumentFormat::from_path(Path::new("/tmp/ragas.TOML")),
        DocumentFormat::Toml
    );
    assert_eq!(
        DocumentFormat::from_path(Path::new("/tmp/ragas.json")),
        DocumentFormat::Json
    );
    assert_eq!(
        DocumentFormat::from_path(Path::new("/tmp/ragas")),
        DocumentFormat::Json
    );
}

#[test]
fn load_from_path_reads_file_and_reports_io_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ragas.json");
    let doc = Value::Array(vec![raga("x", "Yaman", "Kalyan", "Evening")]);
    std::fs::write(&path, doc.to_string()).unwrap();

    let loaded = load_from_path(&path).unwrap();
    assert_eq!(loaded.catalog.len(), 1);

    let missing = dir.path().join("missing.json");
    assert!(matches!(
        load_from_path(&missing),
        Err(CatalogError::Io { .. })
    ));
}

#[test]
fn builtin_dataset_is_fully_valid() {
    let loaded = builtin().unwrap();
    assert_eq!(loaded.rejected, 0);
    assert_eq!(loaded.catalog.len(), 20);
    assert!(loaded.catalog.get_by_id("yaman").is_some());
    assert!(
        loaded
            .catalog
            .list_distinct_values(Field::Period)
            .contains(&"Late Night".to_string())
    );
}
