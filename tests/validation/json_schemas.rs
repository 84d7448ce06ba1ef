//! Schemas and snapshots loaded from JSON documents.

use crate::common::date;
use attr_schema::{
    AttributeValue, ErrorKind, Schema, SchemaValidator, Snapshot, TypeRegistry,
};
use serde_json::json;

#[test]
fn test_json_schema_validates_json_snapshot() {
    let schema = Schema::from_json(&json!({
        "collectAllErrors": true,
        "strict": true,
        "userName": { "type": "string", "required": true },
        "status": { "choices": ["online", "offline", "away"] },
        "age": "number"
    }))
    .unwrap();

    let attributes = Snapshot::from_json(json!({
        "status": "busy",
        "age": "42",
        "nickname": "bj"
    }))
    .unwrap();

    let error = SchemaValidator::new().validate(&schema, &attributes).unwrap_err();
    assert_eq!(
        error.kinds(),
        vec![
            ErrorKind::Required,
            ErrorKind::Choices,
            ErrorKind::Type,
            ErrorKind::Strict,
        ]
    );
    assert_eq!(
        error.messages(),
        vec![
            "\"userName\" is required.",
            "\"status\" must be one of online, offline, away",
            "\"age\" must be a number",
            "nickname are not in the schema",
        ]
    );
}

#[test]
fn test_legacy_flag_names() {
    let schema = Schema::from_json(&json!({
        "_allErrors": true,
        "_isStrict": true,
        "typeField": "string"
    }))
    .unwrap();

    let attributes = Snapshot::from_json(json!({ "typeField": 125, "other": 1 })).unwrap();
    let error = SchemaValidator::new().validate(&schema, &attributes).unwrap_err();
    assert_eq!(error.kinds(), vec![ErrorKind::Type, ErrorKind::Strict]);
}

#[test]
fn test_registered_date_type_with_attached_validator() {
    let mut schema = Schema::from_json_with(
        &json!({ "startDate": "Date", "endDate": { "type": "Date" } }),
        &TypeRegistry::with_defaults(),
    )
    .unwrap();

    schema
        .add_validator("endDate", |value: &AttributeValue, attrs: &Snapshot| -> Option<String> {
            let end = value.downcast_ref::<chrono::DateTime<chrono::Utc>>()?;
            let start = attrs
                .get_present("startDate")?
                .downcast_ref::<chrono::DateTime<chrono::Utc>>()?;
            (start > end).then(|| "End date cannot be before start date".to_string())
        })
        .unwrap();

    let validator = SchemaValidator::new();
    let reversed = Snapshot::new()
        .with("startDate", date(2012, 1, 1))
        .with("endDate", date(2011, 1, 1));
    crate::assert_violation_message!(
        validator.validate(&schema, &reversed),
        "End date cannot be before start date"
    );

    let wrong_type = Snapshot::new().with("startDate", "2012-01-01");
    crate::assert_violation_message!(
        validator.validate(&schema, &wrong_type),
        "\"startDate\" must be a Date"
    );
}

#[test]
fn test_schema_file_round_trip_through_disk() {
    let dir = std::env::temp_dir().join(format!("attr-schema-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("schema.json");
    std::fs::write(&path, r#"{ "name": { "type": "string", "required": true } }"#).unwrap();

    let schema = Schema::from_json_file_with(&path, &TypeRegistry::new()).unwrap();
    assert!(schema.field("name").unwrap().is_required());

    std::fs::remove_dir_all(&dir).unwrap();
}
