//! Date schema.
//!
//! Dates are UTC instants. Text is read as RFC 3339 / ISO 8601 first (a date
//! or a naive date-time is taken as UTC), then as RFC 2822, then against a
//! small table of common layouts. Numbers are epoch milliseconds. Anything
//! else casts to [`Value::InvalidDate`].

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::base::{Context, SchemaBase, SchemaKind, TypedSchema, impl_schema_common};
use crate::condition::Condition;
use crate::error::SchemaError;
use crate::locale;
use crate::test::Test;
use crate::value::format_date;
use crate::{Schema, Value};

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
];

/// Parses `text` into a UTC instant.
pub(crate) fn parse_date(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();

    if let Ok(date) = DateTime::parse_from_rfc3339(text) {
        return Some(date.with_timezone(&Utc));
    }
    if let Some(naive) = DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
    {
        return Some(naive.and_utc());
    }
    if let Ok(date) = DateTime::parse_from_rfc2822(text) {
        return Some(date.with_timezone(&Utc));
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn from_millis(millis: f64) -> Option<DateTime<Utc>> {
    if !millis.is_finite() {
        return None;
    }
    Utc.timestamp_millis_opt(millis as i64).single()
}

#[derive(Debug, Clone, Default)]
pub struct DateSchema {
    base: SchemaBase,
    conditions: Vec<Condition<Self>>,
}

impl DateSchema {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Not earlier than `min`, which may be anything a date schema casts.
    pub fn min(&self, min: impl Into<Value>) -> Result<Self, SchemaError> {
        let min = bound("min", min.into())?;
        Ok(self.test(
            date_test("min", locale::date::MIN, move |d| d >= min)
                .with_param("min", format_date(&min))
                .exclusive(),
        ))
    }

    /// Not later than `max`, which may be anything a date schema casts.
    pub fn max(&self, max: impl Into<Value>) -> Result<Self, SchemaError> {
        let max = bound("max", max.into())?;
        Ok(self.test(
            date_test("max", locale::date::MAX, move |d| d <= max)
                .with_param("max", format_date(&max))
                .exclusive(),
        ))
    }
}

fn bound(name: &'static str, value: Value) -> Result<DateTime<Utc>, SchemaError> {
    DateSchema::new()
        .cast(&value)
        .as_date()
        .ok_or_else(|| SchemaError::InvalidBound {
            name,
            value: value.to_string(),
        })
}

fn date_test<F>(name: &'static str, message: &'static str, check: F) -> Test
where
    F: Fn(DateTime<Utc>) -> bool + Send + Sync + 'static,
{
    Test::new(name, message, move |value| value.as_date().is_none_or(&check))
}

impl Schema for DateSchema {
    impl_schema_common!();

    fn kind(&self) -> SchemaKind {
        SchemaKind::Date
    }

    fn check_type(&self, value: &Value) -> bool {
        matches!(value, Value::Date(_))
    }
}

impl TypedSchema for DateSchema {
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
        let date = match value {
            Value::String(ref s) => parse_date(s),
            Value::Number(n) => from_millis(n),
            Value::Bool(_) | Value::Array(_) | Value::Object(_) => None,
            Value::Null | Value::Date(_) | Value::InvalidDate => return value,
        };
        date.map_or(Value::InvalidDate, Value::Date)
    }
}
