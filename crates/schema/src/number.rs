//! Numeric schema.
//!
//! Numbers are `f64`. Input that cannot be read as a number casts to `NaN`,
//! which the type check rejects along with the infinities.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::base::{Context, SchemaBase, SchemaKind, TypedSchema, impl_schema_common};
use crate::condition::Condition;
use crate::error::SchemaError;
use crate::locale;
use crate::test::Test;
use crate::value::format_number;
use crate::{Schema, Value};

/// Longest numeric prefix, after leading whitespace.
static NUMERIC_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:Infinity|(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)")
        .expect("numeric prefix pattern compiles")
});

/// Reads the longest numeric prefix of `text`: `"5gg"` is `5`, `" 1e3x"` is
/// `1000`, `"abc"` and `""` are `NaN`.
pub(crate) fn parse_float(text: &str) -> f64 {
    NUMERIC_PREFIX
        .find(text.trim_start())
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

// ============================================================================
// ROUNDING MODE
// ============================================================================

/// Direction used by [`NumberSchema::round`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RoundingMode {
    /// Towards positive infinity.
    Ceil,
    /// Towards negative infinity.
    Floor,
    /// To the nearest integer, halves away from zero.
    #[default]
    Round,
    /// Towards zero.
    Trunc,
}

impl RoundingMode {
    #[must_use]
    pub fn apply(self, n: f64) -> f64 {
        match self {
            Self::Ceil => n.ceil(),
            Self::Floor => n.floor(),
            Self::Round => n.round(),
            Self::Trunc => n.trunc(),
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ceil => "ceil",
            Self::Floor => "floor",
            Self::Round => "round",
            Self::Trunc => "trunc",
        }
    }
}

impl FromStr for RoundingMode {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ceil" => Ok(Self::Ceil),
            "floor" => Ok(Self::Floor),
            "round" => Ok(Self::Round),
            "trunc" => Ok(Self::Trunc),
            _ => Err(SchemaError::InvalidRoundingMode { mode: s.to_owned() }),
        }
    }
}

impl fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// NUMBER SCHEMA
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct NumberSchema {
    base: SchemaBase,
    conditions: Vec<Condition<Self>>,
}

fn number_test<F>(name: &'static str, message: &'static str, check: F) -> Test
where
    F: Fn(f64) -> bool + Send + Sync + 'static,
{
    Test::new(name, message, move |value| value.as_f64().is_none_or(&check))
}

impl NumberSchema {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Greater than or equal to `min`.
    pub fn min(&self, min: impl Into<f64>) -> Self {
        let min = min.into();
        self.test(
            number_test("min", locale::number::MIN, move |n| n >= min)
                .with_param("min", format_number(min))
                .exclusive(),
        )
    }

    /// Less than or equal to `max`.
    pub fn max(&self, max: impl Into<f64>) -> Self {
        let max = max.into();
        self.test(
            number_test("max", locale::number::MAX, move |n| n <= max)
                .with_param("max", format_number(max))
                .exclusive(),
        )
    }

    /// Strictly greater than `more`. Replaces any lower bound.
    pub fn more_than(&self, more: impl Into<f64>) -> Self {
        let more = more.into();
        self.test(
            number_test("min", locale::number::MORE_THAN, move |n| n > more)
                .with_param("more", format_number(more))
                .exclusive(),
        )
    }

    /// Strictly less than `less`. Replaces any upper bound.
    pub fn less_than(&self, less: impl Into<f64>) -> Self {
        let less = less.into();
        self.test(
            number_test("max", locale::number::LESS_THAN, move |n| n < less)
                .with_param("less", format_number(less))
                .exclusive(),
        )
    }

    /// `min(0)` with its own message.
    pub fn positive(&self) -> Self {
        self.min(0).with_message(locale::number::POSITIVE)
    }

    /// `max(0)` with its own message.
    pub fn negative(&self) -> Self {
        self.max(0).with_message(locale::number::NEGATIVE)
    }

    pub fn integer(&self) -> Self {
        self.test(
            number_test("integer", locale::number::INTEGER, |n| n.fract() == 0.0).exclusive(),
        )
    }

    /// Drops the fractional part during cast.
    pub fn truncate(&self) -> Self {
        self.round(RoundingMode::Trunc)
    }

    /// Rounds during cast.
    pub fn round(&self, mode: RoundingMode) -> Self {
        self.transform(move |value| match value {
            Value::Number(n) => Value::Number(mode.apply(n)),
            other => other,
        })
    }
}

impl Schema for NumberSchema {
    impl_schema_common!();

    fn kind(&self) -> SchemaKind {
        SchemaKind::Number
    }

    fn check_type(&self, value: &Value) -> bool {
        matches!(value, Value::Number(n) if n.is_finite())
    }
}

impl TypedSchema for NumberSchema {
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
            Value::Null | Value::Number(_) => value,
            Value::Bool(b) => Value::Number(if b { 1.0 } else { 0.0 }),
            Value::Date(d) => Value::Number(d.timestamp_millis() as f64),
            Value::String(s) => Value::Number(parse_float(&s)),
            Value::InvalidDate | Value::Array(_) | Value::Object(_) => Value::Number(f64::NAN),
        }
    }
}
