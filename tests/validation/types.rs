//! Type validation tests.
//!
//! Fields can declare a type in shorthand form (`field: type`) or in the
//! structured form (`field: { type }`), and the type can be a primitive
//! category or a nominal Rust type.

use crate::common::date;
use attr_schema::{
    AttributeValue, FieldSpec, NominalType, PrimitiveType, Schema, SchemaValidator, Snapshot,
    TypeDescriptor,
};
use serde_json::json;

#[derive(Debug, PartialEq)]
struct Label(String);

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, PartialEq)]
struct Quantity(f64);

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// type1/type5 are primitive shorthand, type2/type6 nominal shorthand,
/// type3/type7 primitive structured, type4/type8 nominal structured.
fn typed_schema() -> Schema {
    Schema::builder()
        .field("type1", PrimitiveType::String)
        .field("type2", TypeDescriptor::nominal::<Label>())
        .field("type3", FieldSpec::new().of_type(PrimitiveType::String))
        .field("type4", FieldSpec::new().of_type(TypeDescriptor::nominal::<Label>()))
        .field("type5", PrimitiveType::Number)
        .field("type6", TypeDescriptor::nominal::<Quantity>())
        .field("type7", FieldSpec::new().of_type(PrimitiveType::Number))
        .field("type8", FieldSpec::new().of_type(TypeDescriptor::nominal::<Quantity>()))
        .build()
}

fn check(pairs: Vec<(&str, AttributeValue)>) -> attr_schema::ValidationResult<()> {
    let snapshot: Snapshot = pairs.into_iter().collect();
    SchemaValidator::new().validate(&typed_schema(), &snapshot)
}

#[test]
fn test_rejects_invalid_primitive_shorthand() {
    crate::assert_violation_message!(
        check(vec![("type1", 12345678.into()), ("type5", "foobar".into())]),
        "\"type1\" must be a string"
    );
}

#[test]
fn test_rejects_invalid_nominal_shorthand() {
    crate::assert_violation_message!(
        check(vec![("type2", 12345678.into()), ("type6", "foobar".into())]),
        "\"type2\" must be a Label"
    );
}

#[test]
fn test_rejects_invalid_primitive_structured() {
    crate::assert_violation_message!(
        check(vec![("type3", 12345678.into()), ("type7", "foobar".into())]),
        "\"type3\" must be a string"
    );
}

#[test]
fn test_rejects_invalid_nominal_structured() {
    crate::assert_violation_message!(
        check(vec![("type4", 12345678.into()), ("type8", "foobar".into())]),
        "\"type4\" must be a Label"
    );
}

#[test]
fn test_accepts_valid_primitive_shorthand() {
    crate::assert_validation_success!(check(vec![
        ("type1", "foobar".into()),
        ("type5", 12345678.into()),
    ]));
}

#[test]
fn test_accepts_valid_nominal_shorthand() {
    crate::assert_validation_success!(check(vec![
        ("type2", AttributeValue::instance(Label("foobar".into()))),
        ("type6", AttributeValue::instance(Quantity(12345678.0))),
    ]));
}

#[test]
fn test_accepts_valid_primitive_structured() {
    crate::assert_validation_success!(check(vec![
        ("type3", "foobar".into()),
        ("type7", 12345678.into()),
    ]));
}

#[test]
fn test_accepts_valid_nominal_structured() {
    crate::assert_validation_success!(check(vec![
        ("type4", AttributeValue::instance(Label("foobar".into()))),
        ("type8", AttributeValue::instance(Quantity(12345678.0))),
    ]));
}

#[test]
fn test_number_field_rejects_string_and_second_field_is_reported() {
    crate::assert_violation_message!(
        check(vec![("type1", "ok".into()), ("type5", "foobar".into())]),
        "\"type5\" must be a number"
    );
}

#[test]
fn test_nominal_type_rejects_other_nominal_type() {
    crate::assert_violation_message!(
        check(vec![("type2", AttributeValue::instance(Quantity(1.0)))]),
        "\"type2\" must be a Label"
    );
}

#[test]
fn test_object_category_accepts_containers_and_instances() {
    let schema = Schema::builder().field("meta", PrimitiveType::Object).build();
    let validator = SchemaValidator::new();

    for value in [
        AttributeValue::from(json!({ "a": 1 })),
        AttributeValue::from(json!([1, 2])),
        date(2020, 5, 1),
    ] {
        let snapshot = Snapshot::new().with("meta", value);
        crate::assert_validation_success!(validator.validate(&schema, &snapshot));
    }

    crate::assert_violation_message!(
        validator.validate(&schema, &Snapshot::new().with("meta", "text")),
        "\"meta\" must be a object"
    );
}

#[test]
fn test_boolean_and_function_categories() {
    let schema = Schema::builder()
        .field("flag", PrimitiveType::Boolean)
        .field("callback", PrimitiveType::Function)
        .build();
    let validator = SchemaValidator::new();
    let callback = attr_schema::value::Callable::new("noop", |v: &AttributeValue| v.clone());

    crate::assert_validation_success!(validator.validate(
        &schema,
        &Snapshot::new().with("flag", false).with("callback", callback)
    ));
    crate::assert_violation_message!(
        validator.validate(&schema, &Snapshot::new().with("callback", "noop")),
        "\"callback\" must be a function"
    );
}

/// Built-in constructor types, as a JSON schema names them.
fn constructor_schema() -> Schema {
    Schema::builder()
        .field("type2", TypeDescriptor::nominal::<String>())
        .field("type6", NominalType::named::<f64>("Number"))
        .field("type4", FieldSpec::new().of_type(TypeDescriptor::nominal::<String>()))
        .field("type8", FieldSpec::new().of_type(NominalType::named::<f64>("Number")))
        .build()
}

#[test]
fn test_constructor_types_accept_plain_values() {
    let snapshot: Snapshot = [
        ("type2", AttributeValue::from("foobar")),
        ("type6", AttributeValue::from(12345678)),
        ("type4", AttributeValue::from("foobar")),
        ("type8", AttributeValue::from(12.5)),
    ]
    .into_iter()
    .collect();
    crate::assert_validation_success!(
        SchemaValidator::new().validate(&constructor_schema(), &snapshot)
    );
}

#[test]
fn test_constructor_types_reject_other_values() {
    let validator = SchemaValidator::new();
    let snapshot: Snapshot = [
        ("type2", AttributeValue::from(12345678)),
        ("type6", AttributeValue::from("foobar")),
    ]
    .into_iter()
    .collect();
    crate::assert_violation_message!(
        validator.validate(&constructor_schema(), &snapshot),
        "\"type2\" must be a String"
    );

    let snapshot = Snapshot::new().with("type6", "foobar");
    crate::assert_violation_message!(
        validator.validate(&constructor_schema(), &snapshot),
        "\"type6\" must be a Number"
    );
}

#[test]
fn test_constructor_type_names_in_json_schema() {
    let schema = Schema::from_json(&json!({
        "type2": "String",
        "type6": { "type": "Number" },
        "flag": "Boolean",
        "tags": "Array",
        "meta": { "type": "Object" }
    }))
    .unwrap();
    let validator = SchemaValidator::new();

    let valid = Snapshot::from_json(json!({
        "type2": "foobar",
        "type6": 12345678,
        "flag": false,
        "tags": ["a"],
        "meta": { "a": 1 }
    }))
    .unwrap();
    crate::assert_validation_success!(validator.validate(&schema, &valid));

    let arrays_are_not_objects = Snapshot::new().with("meta", json!([1]));
    crate::assert_violation_message!(
        validator.validate(&schema, &arrays_are_not_objects),
        "\"meta\" must be a Object"
    );

    let wrong = Snapshot::new().with("type2", 12345678);
    crate::assert_violation_message!(
        validator.validate(&schema, &wrong),
        "\"type2\" must be a String"
    );
}
