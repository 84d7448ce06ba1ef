//! Custom validator tests, including cross-field rules.

use crate::common::date;
use crate::common::fixtures::{END_BEFORE_START, START_AFTER_END, date_range_schema};
use attr_schema::{AttributeValue, ErrorKind, FieldSpec, Schema, SchemaValidator, Snapshot};

#[test]
fn test_fails_when_start_date_after_end_date() {
    let attributes = Snapshot::new()
        .with("startDate", date(2012, 1, 1))
        .with("endDate", date(2011, 1, 1));

    let result = SchemaValidator::new().validate(&date_range_schema(), &attributes);
    crate::assert_violation_message!(result, START_AFTER_END);
}

#[test]
fn test_passes_when_start_date_before_end_date() {
    let attributes = Snapshot::new()
        .with("startDate", date(2012, 1, 1))
        .with("endDate", date(2013, 1, 1));

    crate::assert_validation_success!(
        SchemaValidator::new().validate(&date_range_schema(), &attributes)
    );
}

#[test]
fn test_cross_field_rule_detected_from_both_sides() {
    let attributes = Snapshot::new()
        .with("startDate", date(2012, 1, 1))
        .with("endDate", date(2011, 1, 1));

    let error = SchemaValidator::builder()
        .collect_all_errors()
        .build()
        .validate(&date_range_schema(), &attributes)
        .unwrap_err();

    assert_eq!(error.kinds(), vec![ErrorKind::Validator, ErrorKind::Validator]);
    assert_eq!(error.messages(), vec![START_AFTER_END, END_BEFORE_START]);
    assert!(error.records()[0].key.contains("startDate"));
    assert!(error.records()[1].key.contains("endDate"));
}

#[test]
fn test_cross_field_rule_ignores_missing_sibling() {
    let attributes = Snapshot::new().with("startDate", date(2012, 1, 1));
    crate::assert_validation_success!(
        SchemaValidator::new().validate(&date_range_schema(), &attributes)
    );
}

#[test]
fn test_type_violation_reported_before_validators() {
    let attributes = Snapshot::new()
        .with("startDate", "2012-01-01")
        .with("endDate", date(2011, 1, 1));

    let result = SchemaValidator::new().validate(&date_range_schema(), &attributes);
    crate::assert_violation_message!(result, "\"startDate\" must be a DateTime");
}

#[test]
fn test_last_declared_validator_reported_first() {
    let schema = Schema::builder()
        .field(
            "password",
            FieldSpec::new()
                .validator(|value: &AttributeValue, _: &Snapshot| -> Option<String> {
                    (value.as_str()?.len() < 8).then(|| "password is too short".to_string())
                })
                .validator(|value: &AttributeValue, _: &Snapshot| -> Option<String> {
                    (!value.as_str()?.chars().any(|c| c.is_ascii_digit()))
                        .then(|| "password needs a digit".to_string())
                }),
        )
        .build();

    let result = SchemaValidator::new().validate(&schema, &Snapshot::new().with("password", "abc"));
    crate::assert_violation_message!(result, "password needs a digit");

    let result =
        SchemaValidator::new().validate(&schema, &Snapshot::new().with("password", "abc1"));
    crate::assert_violation_message!(result, "password is too short");
}

#[test]
fn test_validator_sees_sibling_attributes() {
    let schema = Schema::builder()
        .field(
            "confirm",
            FieldSpec::new().validator(|value: &AttributeValue, attrs: &Snapshot| -> Option<String> {
                (attrs.get("password") != Some(value)).then(|| "passwords differ".to_string())
            }),
        )
        .build();

    let matching = Snapshot::new().with("password", "s3cret!!").with("confirm", "s3cret!!");
    crate::assert_validation_success!(SchemaValidator::new().validate(&schema, &matching));

    let differing = Snapshot::new().with("password", "s3cret!!").with("confirm", "other");
    crate::assert_violation_message!(
        SchemaValidator::new().validate(&schema, &differing),
        "passwords differ"
    );
}
