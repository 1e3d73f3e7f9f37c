//! Conditional schemas resolved against siblings and the validation context.

mod common;

use contour_schema::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;

fn check(schema: &ObjectSchema, input: serde_json::Value) -> Result<Value, ValidationError> {
    schema.validate(&input.into())
}

#[rstest]
#[case::then_branch(json!({ "kind": "wide", "size": 3 }), false)]
#[case::then_branch_passes(json!({ "kind": "wide", "size": 12 }), true)]
#[case::otherwise_branch(json!({ "kind": "narrow", "size": 12 }), false)]
#[case::otherwise_branch_passes(json!({ "kind": "narrow", "size": 3 }), true)]
fn is_then_otherwise(#[case] input: serde_json::Value, #[case] valid: bool) {
    common::init_tracing();
    let schema = object()
        .shape([
            ("kind", string().into()),
            (
                "size",
                number()
                    .when(
                        "kind",
                        When::is("wide").then(number().min(10)).otherwise(number().max(5)),
                    )
                    .into(),
            ),
        ])
        .unwrap();

    assert_eq!(schema.is_valid(&input.into()), valid);
}

#[test]
fn matches_compares_against_the_cast_sibling() {
    common::init_tracing();
    let schema = object()
        .shape([
            ("count", number().into()),
            (
                "label",
                string()
                    .when("count", When::matches(number().min(2)).then(string().required()))
                    .into(),
            ),
        ])
        .unwrap();

    // `count` is cast before `label` resolves, so "3" already reads as 3.
    let err = check(&schema, json!({ "count": "3" })).unwrap_err();
    assert_eq!(err.paths(), ["label"]);
    assert!(check(&schema, json!({ "count": 1 })).is_ok());
}

#[test]
fn check_sees_absent_siblings() {
    common::init_tracing();
    let schema = object()
        .shape([
            ("nickname", string().into()),
            (
                "name",
                string()
                    .when("nickname", When::check(|value| value.is_none()).then(string().required()))
                    .into(),
            ),
        ])
        .unwrap();

    assert!(!schema.is_valid(&json!({}).into()));
    assert!(schema.is_valid(&json!({ "nickname": "ada" }).into()));
}

#[test]
fn map_derives_the_schema_from_the_value() {
    common::init_tracing();
    let schema = object()
        .shape([
            ("limit", number().into()),
            (
                "used",
                number()
                    .when(
                        "limit",
                        When::map(|limit, schema: &NumberSchema| match limit {
                            Some(Value::Number(n)) => schema.max(*n),
                            _ => schema.clone(),
                        }),
                    )
                    .into(),
            ),
        ])
        .unwrap();

    assert!(schema.is_valid(&json!({ "limit": 5, "used": 5 }).into()));
    let err = check(&schema, json!({ "limit": 5, "used": 6 })).unwrap_err();
    assert_eq!(
        err.messages(),
        ["used must be less than or equal to 5"]
    );
}

#[test]
fn context_references_read_validation_options() {
    common::init_tracing();
    let schema = number().when(
        "$minimum",
        When::map(|minimum, schema: &NumberSchema| match minimum {
            Some(Value::Number(n)) => schema.min(*n),
            _ => schema.clone(),
        }),
    );

    let strict = ValidateOptions::new().with_context(json!({ "minimum": 10 }));
    assert!(!schema.is_valid_with(&Value::Number(4.0), &strict));
    assert!(schema.is_valid_with(&Value::Number(12.0), &strict));

    assert!(schema.is_valid(&Value::Number(4.0)));
}

#[test]
fn context_references_do_not_order_fields() {
    common::init_tracing();
    let schema = object()
        .shape([
            ("b", number().when("$a", When::is(1).then(number().required())).into()),
            ("a", number().into()),
        ])
        .unwrap();

    assert_eq!(schema.order(), ["b", "a"]);
}

#[test]
fn chained_dependencies_are_cast_in_order() {
    common::init_tracing();
    let follow = |sibling: &'static str| -> AnySchema {
        string()
            .when(
                sibling,
                When::map(|value, schema: &StringSchema| match value {
                    Some(Value::String(s)) if s.is_empty() => schema.required(),
                    _ => schema.clone(),
                }),
            )
            .into()
    };
    let schema = object()
        .shape([
            ("c", follow("b")),
            ("b", follow("a")),
            ("a", string().trim().into()),
        ])
        .unwrap();

    assert_eq!(schema.order(), ["a", "b", "c"]);
    assert_eq!(
        schema.cast(&json!({ "c": 1, "b": 2, "a": " x " }).into()),
        Value::from(json!({ "a": "x", "b": "2", "c": "1" }))
    );
}

#[test]
fn later_conditions_see_earlier_results() {
    common::init_tracing();
    let schema = number()
        .when("$big", When::is(true).then(number().min(100)))
        .when("$big", When::is(true).then(number().max(50)));

    let options = ValidateOptions::new().with_context(json!({ "big": true }));
    let err = schema.validate_with(&Value::Number(75.0), &options).unwrap_err();
    assert_eq!(err.flatten()[0].code, "min");

    let err = schema.validate_with(&Value::Number(150.0), &options).unwrap_err();
    assert_eq!(err.flatten()[0].code, "max");
}
