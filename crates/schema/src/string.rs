//! Text schema.
//!
//! Lengths are measured in Unicode scalar values, not bytes.

use std::sync::LazyLock;

use regex::Regex;

use crate::base::{Context, SchemaBase, SchemaKind, TypedSchema, impl_schema_common};
use crate::condition::Condition;
use crate::error::SchemaError;
use crate::locale;
use crate::test::Test;
use crate::value::{format_date, format_number};
use crate::{Schema, Value};

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$"
    ).expect("email pattern compiles")
});

static URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://[^\s/$.?#].[^\s]*$").expect("url pattern compiles")
});

#[derive(Debug, Clone, Default)]
pub struct StringSchema {
    base: SchemaBase,
    conditions: Vec<Condition<Self>>,
}

/// A test over text values; other values pass and are left to the type check.
fn text_test<F>(name: &'static str, message: &'static str, check: F) -> Test
where
    F: Fn(&str) -> bool + Send + Sync + 'static,
{
    Test::new(name, message, move |value| value.as_str().is_none_or(&check))
}

/// Like [`text_test`], but the empty string passes too.
fn non_empty_text_test<F>(name: &'static str, message: &'static str, check: F) -> Test
where
    F: Fn(&str) -> bool + Send + Sync + 'static,
{
    text_test(name, message, move |s| s.is_empty() || check(s))
}

fn map_text(value: Value, map: impl FnOnce(&str) -> String) -> Value {
    match value {
        Value::String(s) => Value::String(map(&s)),
        other => other,
    }
}

impl StringSchema {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // LENGTH
    // ========================================================================

    /// At least `min` characters.
    pub fn min(&self, min: usize) -> Self {
        self.test(
            text_test("min", locale::string::MIN, move |s| s.chars().count() >= min)
                .with_param("min", min.to_string())
                .exclusive(),
        )
    }

    /// At most `max` characters.
    pub fn max(&self, max: usize) -> Self {
        self.test(
            text_test("max", locale::string::MAX, move |s| s.chars().count() <= max)
                .with_param("max", max.to_string())
                .exclusive(),
        )
    }

    /// Exactly `length` characters.
    pub fn length(&self, length: usize) -> Self {
        self.test(
            text_test("length", locale::string::LENGTH, move |s| {
                s.chars().count() == length
            })
            .with_param("length", length.to_string())
            .exclusive(),
        )
    }

    // ========================================================================
    // PATTERNS
    // ========================================================================

    /// Must match `regex`. Several patterns may be combined.
    pub fn matches(&self, regex: Regex) -> Self {
        let pattern = regex.as_str().to_owned();
        self.test(
            text_test("matches", locale::string::MATCHES, move |s| regex.is_match(s))
                .with_param("regex", pattern),
        )
    }

    /// Like [`matches`](Self::matches), compiling `pattern` first.
    pub fn matches_pattern(&self, pattern: &str) -> Result<Self, SchemaError> {
        let regex = Regex::new(pattern).map_err(|err| SchemaError::InvalidPattern {
            pattern: pattern.to_owned(),
            reason: err.to_string(),
        })?;
        Ok(self.matches(regex))
    }

    /// An email address; the empty string passes.
    pub fn email(&self) -> Self {
        self.test(
            non_empty_text_test("email", locale::string::EMAIL, |s| EMAIL_REGEX.is_match(s))
                .exclusive(),
        )
    }

    /// An `http(s)` URL; the empty string passes.
    pub fn url(&self) -> Self {
        self.test(
            non_empty_text_test("url", locale::string::URL, |s| URL_REGEX.is_match(s))
                .exclusive(),
        )
    }

    // ========================================================================
    // NORMALIZATION
    // ========================================================================
    //
    // Each normalizer transforms during cast and tests that the value is
    // already normalized, which only fails under strict validation.

    pub fn trim(&self) -> Self {
        self.transform(|v| map_text(v, |s| s.trim().to_owned()))
            .test(text_test("trim", locale::string::TRIM, |s| s.trim() == s).exclusive())
    }

    pub fn lowercase(&self) -> Self {
        self.transform(|v| map_text(v, str::to_lowercase)).test(
            text_test("lowercase", locale::string::LOWERCASE, |s| {
                s.to_lowercase() == s
            })
            .exclusive(),
        )
    }

    pub fn uppercase(&self) -> Self {
        self.transform(|v| map_text(v, str::to_uppercase)).test(
            text_test("uppercase", locale::string::UPPERCASE, |s| {
                s.to_uppercase() == s
            })
            .exclusive(),
        )
    }
}

impl Schema for StringSchema {
    impl_schema_common!();

    fn kind(&self) -> SchemaKind {
        SchemaKind::String
    }

    fn check_type(&self, value: &Value) -> bool {
        matches!(value, Value::String(_))
    }
}

impl TypedSchema for StringSchema {
    fn base_mut(&mut self) -> &mut SchemaBase {
        &mut self.base
    }

    fn conditions(&self) -> &[Condition<Self>] {
        &self.conditions
    }

    fn conditions_mut(&mut self) -> &mut Vec<Condition<Self>> {
        &mut self.conditions
    }

    fn coerce(&self, value: Value, _ctx: &Context<'_>) -> Value {
        match value {
            Value::Null | Value::String(_) => value,
            Value::Number(n) => Value::String(format_number(n)),
            Value::Bool(b) => Value::String(b.to_string()),
            Value::Date(d) => Value::String(format_date(&d)),
            Value::InvalidDate => Value::String(value.to_string()),
            Value::Array(_) | Value::Object(_) => Value::String(value.to_json().to_string()),
        }
    }
}
