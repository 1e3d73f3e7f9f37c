//! The schema contract shared by every kind.
//!
//! Each concrete schema is a [`SchemaBase`] plus variant data. Two traits sit
//! on top:
//!
//! - [`Schema`]: object safe, used through [`AnySchema`] for object fields
//!   and array elements. Carries the public `cast` / `validate` entry points.
//! - [`TypedSchema`]: the builder surface. Every builder takes `&self` and
//!   returns a new node; the receiver is never modified.
//!
//! The cast and validate algorithms live here once and are parameterized by
//! the variant hooks ([`TypedSchema::coerce`], [`Schema::check_type`],
//! [`TypedSchema::validate_inner`]).

use std::borrow::Cow;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use serde::Serialize;

use crate::condition::{Condition, When};
use crate::describe::SchemaDescription;
use crate::error::{SchemaError, ValidationError};
use crate::locale;
use crate::options::ValidateOptions;
use crate::path::{self, Segment};
use crate::test::{self, REQUIRED, Test};
use crate::value::{Map, Value};

// ============================================================================
// KIND
// ============================================================================

/// The concrete kind of a schema node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaKind {
    Mixed,
    String,
    Number,
    Boolean,
    Date,
    Array,
    Object,
}

impl SchemaKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mixed => "mixed",
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// CONTEXT
// ============================================================================

/// Where a value sits while it is being cast or validated.
#[derive(Debug, Clone)]
pub struct Context<'a> {
    path: Option<String>,
    parent: Option<&'a Map>,
    options: &'a ValidateOptions,
    strict: bool,
}

impl<'a> Context<'a> {
    /// Context for a value at the root of a call.
    #[must_use]
    pub fn new(options: &'a ValidateOptions) -> Self {
        Self {
            path: None,
            parent: None,
            options,
            strict: false,
        }
    }

    /// Context for field `key` of `parent`.
    #[must_use]
    pub fn field<'b>(&self, key: &str, parent: &'b Map) -> Context<'b>
    where
        'a: 'b,
    {
        Context {
            path: Some(path::join_field(self.path.as_deref(), key)),
            parent: Some(parent),
            options: self.options,
            strict: self.strict,
        }
    }

    /// Context for member `index` of an array.
    #[must_use]
    pub fn index(&self, index: usize) -> Self {
        Self {
            path: Some(path::join_index(self.path.as_deref(), index)),
            parent: None,
            options: self.options,
            strict: self.strict,
        }
    }

    /// Forces strict validation below this point.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    #[must_use]
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// The path, or [`path::ROOT`] at the top of a call.
    #[must_use]
    pub fn path_or_root(&self) -> &str {
        self.path.as_deref().unwrap_or(path::ROOT)
    }

    /// The object holding this value, if any.
    #[must_use]
    pub fn parent(&self) -> Option<&'a Map> {
        self.parent
    }

    #[must_use]
    pub fn options(&self) -> &'a ValidateOptions {
        self.options
    }

    #[must_use]
    pub fn is_strict(&self) -> bool {
        self.strict || self.options.strict
    }
}

// ============================================================================
// SCHEMA BASE
// ============================================================================

/// A value-to-value function applied after coercion and defaulting.
pub type Transform = Arc<dyn Fn(Value) -> Value + Send + Sync>;

/// The value substituted for absent input.
#[derive(Clone)]
pub enum DefaultValue {
    Value(Value),
    /// Invoked on every use.
    Fn(Arc<dyn Fn() -> Value + Send + Sync>),
}

impl DefaultValue {
    #[must_use]
    pub fn get(&self) -> Value {
        match self {
            Self::Value(value) => value.clone(),
            Self::Fn(producer) => producer(),
        }
    }
}

impl fmt::Debug for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::Fn(_) => f.write_str("Fn(..)"),
        }
    }
}

/// State shared by every schema kind.
#[derive(Clone, Default)]
pub struct SchemaBase {
    nullable: bool,
    default: Option<DefaultValue>,
    transforms: Vec<Transform>,
    tests: Vec<Test>,
    whitelist: Vec<Value>,
    blacklist: Vec<Value>,
    strict: bool,
    type_error: Option<Cow<'static, str>>,
}

impl SchemaBase {
    #[must_use]
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    #[must_use]
    pub fn default_value(&self) -> Option<&DefaultValue> {
        self.default.as_ref()
    }

    #[must_use]
    pub fn tests(&self) -> &[Test] {
        &self.tests
    }

    #[must_use]
    pub fn has_test(&self, name: &str) -> bool {
        self.tests.iter().any(|test| test.name() == name)
    }

    #[must_use]
    pub fn whitelist(&self) -> &[Value] {
        &self.whitelist
    }

    #[must_use]
    pub fn blacklist(&self) -> &[Value] {
        &self.blacklist
    }

    #[must_use]
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    #[must_use]
    pub fn type_error(&self) -> Option<&str> {
        self.type_error.as_deref()
    }

    /// Tests other than the presence check.
    fn has_rules(&self) -> bool {
        self.tests.iter().any(|test| test.name() != REQUIRED)
    }

    fn add_test(&mut self, test: Test) {
        if test.name() != REQUIRED && !self.whitelist.is_empty() {
            panic!("{}", SchemaError::WhitelistConflict);
        }
        self.insert_test(test);
    }

    fn insert_test(&mut self, test: Test) {
        if test.is_exclusive() {
            self.tests.retain(|existing| existing.name() != test.name());
        }
        self.tests.push(test);
    }

    fn allow(&mut self, value: Value) {
        if self.has_rules() {
            panic!("{}", SchemaError::WhitelistConflict);
        }
        self.blacklist.retain(|v| *v != value);
        if !self.whitelist.contains(&value) {
            self.whitelist.push(value);
        }
    }

    fn deny(&mut self, value: Value) {
        self.whitelist.retain(|v| *v != value);
        if !self.blacklist.contains(&value) {
            self.blacklist.push(value);
        }
    }

    fn merge(&mut self, other: &Self) {
        self.nullable |= other.nullable;
        self.strict |= other.strict;
        if other.default.is_some() {
            self.default.clone_from(&other.default);
        }
        if other.type_error.is_some() {
            self.type_error.clone_from(&other.type_error);
        }
        self.transforms.extend(other.transforms.iter().cloned());
        for test in &other.tests {
            self.add_test(test.clone());
        }
        for value in &other.whitelist {
            self.allow(value.clone());
        }
        for value in &other.blacklist {
            self.deny(value.clone());
        }
    }
}

impl fmt::Debug for SchemaBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaBase")
            .field("nullable", &self.nullable)
            .field("default", &self.default)
            .field("transforms", &self.transforms.len())
            .field("tests", &self.tests)
            .field("whitelist", &self.whitelist)
            .field("blacklist", &self.blacklist)
            .field("strict", &self.strict)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// SCHEMA
// ============================================================================

/// The object-safe schema contract.
///
/// `cast_at` / `validate_at` take `Option<&Value>` so an absent value (a
/// missing object field) stays distinct from `null`. The convenience methods
/// treat their input as present.
pub trait Schema: fmt::Debug + Send + Sync {
    fn kind(&self) -> SchemaKind;

    fn base(&self) -> &SchemaBase;

    /// The kind's own type predicate; `null` is handled by [`Schema::is_type`].
    fn check_type(&self, value: &Value) -> bool;

    /// Sibling fields this schema's conditions read.
    fn dependencies(&self) -> Vec<String>;

    /// Casts a possibly absent value.
    fn cast_at(&self, value: Option<&Value>, ctx: &Context<'_>) -> Option<Value>;

    /// Validates a possibly absent value, returning the cast value.
    fn validate_at(
        &self,
        value: Option<&Value>,
        ctx: &Context<'_>,
    ) -> Result<Option<Value>, ValidationError>;

    /// The value used in place of absent input.
    fn default_value(&self) -> Option<Value> {
        self.base().default_value().map(DefaultValue::get)
    }

    /// The schema one path step below this one.
    fn child(&self, _segment: &Segment) -> Option<AnySchema> {
        None
    }

    fn describe(&self) -> SchemaDescription {
        SchemaDescription::new(self.kind(), self.base(), self.default_value())
    }

    /// `null` matches nullable schemas; anything else goes to the kind's
    /// predicate.
    fn is_type(&self, value: &Value) -> bool {
        if value.is_null() {
            self.base().is_nullable()
        } else {
            self.check_type(value)
        }
    }

    fn cast(&self, value: &Value) -> Value {
        self.cast_with(value, &ValidateOptions::default())
    }

    fn cast_with(&self, value: &Value, options: &ValidateOptions) -> Value {
        self.cast_at(Some(value), &Context::new(options))
            .unwrap_or_default()
    }

    fn validate(&self, value: &Value) -> Result<Value, ValidationError> {
        self.validate_with(value, &ValidateOptions::default())
    }

    fn validate_with(
        &self,
        value: &Value,
        options: &ValidateOptions,
    ) -> Result<Value, ValidationError> {
        self.validate_at(Some(value), &Context::new(options))
            .map(Option::unwrap_or_default)
    }

    fn is_valid(&self, value: &Value) -> bool {
        self.validate(value).is_ok()
    }

    fn is_valid_with(&self, value: &Value, options: &ValidateOptions) -> bool {
        self.validate_with(value, options).is_ok()
    }
}

/// A shared, type-erased schema.
#[derive(Clone)]
pub struct AnySchema(Arc<dyn Schema>);

impl<S: Schema + 'static> From<S> for AnySchema {
    fn from(schema: S) -> Self {
        Self(Arc::new(schema))
    }
}

impl Deref for AnySchema {
    type Target = dyn Schema;

    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}

impl fmt::Debug for AnySchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

// ============================================================================
// TYPED SCHEMA
// ============================================================================

/// Builders and variant hooks for concrete schema types.
pub trait TypedSchema: Schema + Clone + Sized + 'static {
    fn base_mut(&mut self) -> &mut SchemaBase;

    fn conditions(&self) -> &[Condition<Self>];

    fn conditions_mut(&mut self) -> &mut Vec<Condition<Self>>;

    /// Converts a present, non-null value towards this kind. Never fails;
    /// unconvertible input becomes the kind's sentinel.
    fn coerce(&self, value: Value, ctx: &Context<'_>) -> Value;

    /// Validates nested members after the node's own checks. `own_ok` is
    /// false when the node itself already failed.
    fn validate_inner(
        &self,
        _value: &Value,
        _ctx: &Context<'_>,
        _own_ok: bool,
    ) -> Vec<ValidationError> {
        Vec::new()
    }

    /// Merges variant data during [`concat`](TypedSchema::concat).
    fn merge_variant(&mut self, _other: &Self) {}

    /// Adds the exclusive `required` test.
    fn required(&self) -> Self {
        modified(self, |s| s.base_mut().insert_test(Test::required()))
    }

    fn not_required(&self) -> Self {
        modified(self, |s| {
            s.base_mut().tests.retain(|test| test.name() != REQUIRED);
        })
    }

    fn nullable(&self) -> Self {
        modified(self, |s| s.base_mut().nullable = true)
    }

    fn not_nullable(&self) -> Self {
        modified(self, |s| s.base_mut().nullable = false)
    }

    fn with_default(&self, value: impl Into<Value>) -> Self {
        let value = value.into();
        modified(self, |s| s.base_mut().default = Some(DefaultValue::Value(value)))
    }

    fn with_default_fn<F>(&self, producer: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        modified(self, |s| {
            s.base_mut().default = Some(DefaultValue::Fn(Arc::new(producer)));
        })
    }

    /// Restricts values to `values`; membership replaces the tests. Array
    /// members and object fields of a listed value are still validated.
    ///
    /// # Panics
    ///
    /// If the schema already has tests other than `required`.
    fn one_of(&self, values: impl IntoIterator<Item = impl Into<Value>>) -> Self {
        modified(self, |s| {
            for value in values {
                s.base_mut().allow(value.into());
            }
        })
    }

    fn not_one_of(&self, values: impl IntoIterator<Item = impl Into<Value>>) -> Self {
        modified(self, |s| {
            for value in values {
                s.base_mut().deny(value.into());
            }
        })
    }

    fn transform<F>(&self, transform: F) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        modified(self, |s| s.base_mut().transforms.push(Arc::new(transform)))
    }

    /// Adds a test.
    ///
    /// # Panics
    ///
    /// If the schema has a value whitelist and `test` is not `required`.
    fn test(&self, test: Test) -> Self {
        modified(self, |s| s.base_mut().add_test(test))
    }

    /// Replaces the message of the most recently added test.
    fn with_message(&self, message: impl Into<Cow<'static, str>>) -> Self {
        let message = message.into();
        modified(self, |s| {
            if let Some(last) = s.base_mut().tests.last_mut() {
                last.set_message(message);
            }
        })
    }

    /// Replaces the type mismatch message.
    fn type_error(&self, message: impl Into<Cow<'static, str>>) -> Self {
        let message = message.into();
        modified(self, |s| s.base_mut().type_error = Some(message))
    }

    /// Validates without casting first.
    fn strict(&self, strict: bool) -> Self {
        modified(self, |s| s.base_mut().strict = strict)
    }

    /// Derives the effective schema from a sibling (`a.b`) or context
    /// (`$name`) value at every cast and validate.
    fn when(&self, reference: impl Into<String>, when: When<Self>) -> Self {
        let condition = Condition::new(reference, when);
        modified(self, |s| s.conditions_mut().push(condition))
    }

    /// Merges `other` onto a copy of this schema.
    ///
    /// Flags are or-ed, `other`'s default and type message win, transforms,
    /// tests and conditions are appended (exclusive tests replace), value
    /// lists are unioned.
    ///
    /// # Panics
    ///
    /// If the merge combines a whitelist with tests, or if the merged object
    /// fields depend on each other in a cycle.
    fn concat(&self, other: &Self) -> Self {
        let mut next = self.clone();
        next.base_mut().merge(other.base());
        next.conditions_mut()
            .extend(other.conditions().iter().cloned());
        next.merge_variant(other);
        next
    }
}

fn modified<S: Clone>(schema: &S, update: impl FnOnce(&mut S)) -> S {
    let mut next = schema.clone();
    update(&mut next);
    next
}

// ============================================================================
// CAST / VALIDATE
// ============================================================================

/// Applies every condition until none remain.
fn resolve<'s, S: TypedSchema>(schema: &'s S, ctx: &Context<'_>) -> Cow<'s, S> {
    if schema.conditions().is_empty() {
        return Cow::Borrowed(schema);
    }
    let mut current = schema.clone();
    loop {
        let conditions = std::mem::take(current.conditions_mut());
        if conditions.is_empty() {
            break;
        }
        current = conditions
            .iter()
            .fold(current, |acc, condition| condition.resolve(&acc, ctx));
    }
    Cow::Owned(current)
}

fn cast_resolved<S: TypedSchema>(
    schema: &S,
    value: Option<&Value>,
    ctx: &Context<'_>,
) -> Option<Value> {
    let base = schema.base();
    let mut result = match value {
        Some(value) if !value.is_null() => Some(schema.coerce(value.clone(), ctx)),
        other => other.cloned(),
    };

    // Only a literal null survives on a nullable node; a coercion that
    // produced null still falls back to the default.
    let keep_null = base.nullable && matches!(value, Some(Value::Null));
    if !keep_null
        && result.as_ref().is_none_or(Value::is_null)
        && let Some(default) = schema.default_value()
    {
        result = Some(default);
    }

    match result {
        Some(value) if !value.is_null() => Some(
            base.transforms
                .iter()
                .fold(value, |acc, transform| transform(acc)),
        ),
        other => other,
    }
}

pub(crate) fn cast_node<S: TypedSchema>(
    schema: &S,
    value: Option<&Value>,
    ctx: &Context<'_>,
) -> Option<Value> {
    cast_resolved(&*resolve(schema, ctx), value, ctx)
}

pub(crate) fn validate_node<S: TypedSchema>(
    schema: &S,
    value: Option<&Value>,
    ctx: &Context<'_>,
) -> Result<Option<Value>, ValidationError> {
    let schema = resolve(schema, ctx);
    let base = schema.base();
    let value = if ctx.is_strict() || base.strict {
        value.cloned()
    } else {
        cast_resolved(&*schema, value, ctx)
    };
    let path = ctx.path_or_root();

    if let Some(present) = &value {
        if !schema.is_type(present) {
            let message = base.type_error().unwrap_or(locale::mixed::NOT_TYPE);
            let violation = test::violation(
                "typeError".into(),
                message,
                path,
                Some(present),
                vec![("type".into(), schema.kind().as_str().into())],
            );
            return Err(ValidationError::new(path, value.clone()).with_violation(violation));
        }

        if !base.whitelist.is_empty() && !base.whitelist.contains(present) {
            let violation = test::violation(
                "oneOf".into(),
                locale::mixed::ONE_OF,
                path,
                Some(present),
                vec![("values".into(), join_values(&base.whitelist).into())],
            );
            return Err(ValidationError::new(path, value.clone()).with_violation(violation));
        }

        if base.blacklist.contains(present) {
            let violation = test::violation(
                "notOneOf".into(),
                locale::mixed::NOT_ONE_OF,
                path,
                Some(present),
                vec![("values".into(), join_values(&base.blacklist).into())],
            );
            return Err(ValidationError::new(path, value.clone()).with_violation(violation));
        }
    }

    // A whitelisted value skips the tests; members and fields are still
    // validated below.
    let whitelisted = value
        .as_ref()
        .is_some_and(|present| base.whitelist.contains(present));
    let tests: &[Test] = if whitelisted { &[] } else { &base.tests };

    let abort_early = ctx.options().abort_early;
    let mut violations = Vec::new();
    for test in tests {
        if let Err(violation) = test.run(value.as_ref(), ctx) {
            violations.push(violation);
            if abort_early {
                break;
            }
        }
    }

    let inner = match &value {
        Some(present) if !(abort_early && !violations.is_empty()) => {
            schema.validate_inner(present, ctx, violations.is_empty())
        }
        _ => Vec::new(),
    };

    if violations.is_empty() && inner.is_empty() {
        return Ok(value);
    }
    Err(ValidationError::new(path, value)
        .with_violations(violations)
        .with_inner(inner))
}

fn join_values(values: &[Value]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Implements the [`Schema`] methods every concrete kind shares. The type
/// needs `base` and `conditions` fields and a [`TypedSchema`] impl.
macro_rules! impl_schema_common {
    () => {
        fn base(&self) -> &$crate::base::SchemaBase {
            &self.base
        }

        fn dependencies(&self) -> Vec<String> {
            $crate::condition::dependencies(&self.conditions)
        }

        fn cast_at(
            &self,
            value: Option<&$crate::value::Value>,
            ctx: &$crate::base::Context<'_>,
        ) -> Option<$crate::value::Value> {
            $crate::base::cast_node(self, value, ctx)
        }

        fn validate_at(
            &self,
            value: Option<&$crate::value::Value>,
            ctx: &$crate::base::Context<'_>,
        ) -> Result<Option<$crate::value::Value>, $crate::error::ValidationError> {
            $crate::base::validate_node(self, value, ctx)
        }
    };
}

pub(crate) use impl_schema_common;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{array, mixed, number, string};
    use pretty_assertions::assert_eq;

    #[test]
    fn builders_leave_the_receiver_untouched() {
        let base = string();
        let required = base.required();
        let nullable = base.nullable();

        assert!(!base.base().has_test(REQUIRED));
        assert!(required.base().has_test(REQUIRED));
        assert!(!base.base().is_nullable());
        assert!(nullable.base().is_nullable());
        assert!(base.is_valid(&Value::from("")));
    }

    #[test]
    fn exclusive_tests_replace_earlier_ones() {
        let schema = string().min(2).min(5);
        let names: Vec<_> = schema.base().tests().iter().map(Test::name).collect();
        assert_eq!(names, ["min"]);
        assert!(!schema.is_valid(&Value::from("abc")));
    }

    #[test]
    fn default_fills_absent_and_null_but_not_nullable_null() {
        let schema = number().with_default(7);
        let options = ValidateOptions::default();
        let ctx = Context::new(&options);

        assert_eq!(schema.cast_at(None, &ctx), Some(Value::Number(7.0)));
        assert_eq!(schema.cast(&Value::Null), Value::Number(7.0));
        assert_eq!(schema.nullable().cast(&Value::Null), Value::Null);
    }

    #[test]
    fn defaults_pass_through_transforms() {
        let schema = string().with_default("  Ada ").trim();
        assert_eq!(schema.cast(&Value::Null), Value::from("Ada"));

        let tags = array().nullable().with_default(Value::Array(Vec::new()));
        assert_eq!(tags.cast(&Value::from("not json")), Value::Array(Vec::new()));
        assert_eq!(tags.cast(&Value::Null), Value::Null);
    }

    #[test]
    fn default_producer_runs_on_every_use() {
        let counter = Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let seen = Arc::clone(&counter);
        let schema = mixed().with_default_fn(move || {
            Value::from(seen.fetch_add(1, std::sync::atomic::Ordering::SeqCst) as f64)
        });
        assert_eq!(schema.default_value(), Some(Value::Number(0.0)));
        assert_eq!(schema.default_value(), Some(Value::Number(1.0)));
    }

    #[test]
    fn whitelist_is_the_sole_check() {
        let schema = mixed().one_of(["a", "b"]);
        assert!(schema.is_valid(&Value::from("a")));

        let err = schema.validate(&Value::from("c")).unwrap_err();
        assert_eq!(
            err.messages(),
            ["this must be one of the following values: \"a\", \"b\""]
        );

        let options = ValidateOptions::default();
        assert!(schema.validate_at(None, &Context::new(&options)).is_ok());
        assert!(
            schema
                .required()
                .validate_at(None, &Context::new(&options))
                .is_err()
        );
    }

    #[test]
    fn one_of_and_not_one_of_are_mutually_exclusive_per_value() {
        let schema = mixed().one_of([1, 2]).not_one_of([2]);
        assert_eq!(schema.base().whitelist(), [Value::Number(1.0)]);
        assert_eq!(schema.base().blacklist(), [Value::Number(2.0)]);

        let schema = schema.one_of([2]);
        assert!(schema.base().blacklist().is_empty());
    }

    #[test]
    fn blacklisted_values_fail() {
        let schema = string().not_one_of(["admin"]);
        let err = schema.validate(&Value::from("admin")).unwrap_err();
        assert_eq!(err.flatten()[0].code, "notOneOf");
        assert!(schema.is_valid(&Value::from("alice")));
    }

    #[test]
    #[should_panic(expected = "value whitelist")]
    fn test_after_whitelist_panics() {
        let _ = string().one_of(["a"]).min(1);
    }

    #[test]
    fn with_message_overrides_the_last_test() {
        let schema = string().min(3).with_message("${path} is too short");
        let err = schema.validate(&Value::from("ab")).unwrap_err();
        assert_eq!(err.messages(), ["this is too short"]);
    }

    #[test]
    fn type_error_message_can_be_replaced() {
        let schema = number().type_error("${path} needs a ${type}");
        let err = schema.validate(&Value::from("abc")).unwrap_err();
        assert_eq!(err.messages(), ["this needs a number"]);
    }

    #[test]
    fn transforms_run_after_coercion() {
        let schema = number().transform(|v| match v {
            Value::Number(n) => Value::Number(n * 2.0),
            other => other,
        });
        assert_eq!(schema.cast(&Value::from("4")), Value::Number(8.0));
    }

    #[test]
    fn abort_early_stops_at_the_first_failure() {
        let schema = string().min(10).matches_pattern("^[0-9]+$").unwrap();
        let value = Value::from("abc");

        let all = schema.validate(&value).unwrap_err();
        assert_eq!(all.len(), 2);

        let options = ValidateOptions::new().abort_early(true);
        let first = schema.validate_with(&value, &options).unwrap_err();
        assert_eq!(first.len(), 1);
        assert_eq!(first.flatten()[0].code, "min");
    }

    #[test]
    fn concat_merges_flags_and_tests() {
        let merged = number().min(1).concat(&number().nullable().max(5).with_default(3));
        assert!(merged.base().is_nullable());
        assert!(merged.base().has_test("min"));
        assert!(merged.base().has_test("max"));
        assert_eq!(merged.default_value(), Some(Value::Number(3.0)));
    }

    #[test]
    fn context_joins_paths() {
        let options = ValidateOptions::default();
        let root = Context::new(&options);
        assert_eq!(root.path_or_root(), "this");

        let parent = Map::new();
        let field = root.field("items", &parent);
        assert_eq!(field.index(2).path(), Some("items[2]"));
        assert!(!field.is_strict());
        assert!(field.with_strict(true).is_strict());
    }
}
