//! Array schema.
//!
//! Members are cast through the element schema at `path[index]`. During
//! validation the members are checked only after the array itself passed,
//! and every failing member is reported.

use crate::base::{AnySchema, Context, SchemaBase, SchemaKind, TypedSchema, impl_schema_common};
use crate::condition::Condition;
use crate::describe::SchemaDescription;
use crate::error::ValidationError;
use crate::locale;
use crate::path::Segment;
use crate::test::Test;
use crate::value::parse_json;
use crate::{Schema, Value};

#[derive(Debug, Clone, Default)]
pub struct ArraySchema {
    base: SchemaBase,
    conditions: Vec<Condition<Self>>,
    element: Option<AnySchema>,
}

fn length_test<F>(name: &'static str, message: &'static str, check: F) -> Test
where
    F: Fn(usize) -> bool + Send + Sync + 'static,
{
    Test::new(name, message, move |value| {
        value.as_array().is_none_or(|items| check(items.len()))
    })
}

impl ArraySchema {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the schema every member must satisfy.
    pub fn of(&self, element: impl Into<AnySchema>) -> Self {
        let mut next = self.clone();
        next.element = Some(element.into());
        next
    }

    #[must_use]
    pub fn element(&self) -> Option<&AnySchema> {
        self.element.as_ref()
    }

    /// At least `min` members.
    pub fn min(&self, min: usize) -> Self {
        self.test(
            length_test("min", locale::array::MIN, move |len| len >= min)
                .with_param("min", min.to_string())
                .exclusive(),
        )
    }

    /// At most `max` members.
    pub fn max(&self, max: usize) -> Self {
        self.test(
            length_test("max", locale::array::MAX, move |len| len <= max)
                .with_param("max", max.to_string())
                .exclusive(),
        )
    }
}

impl Schema for ArraySchema {
    impl_schema_common!();

    fn kind(&self) -> SchemaKind {
        SchemaKind::Array
    }

    fn check_type(&self, value: &Value) -> bool {
        matches!(value, Value::Array(_))
    }

    fn child(&self, segment: &Segment) -> Option<AnySchema> {
        match segment {
            Segment::Index(_) => self.element.clone(),
            Segment::Key(_) => None,
        }
    }

    fn describe(&self) -> SchemaDescription {
        let mut description =
            SchemaDescription::new(self.kind(), &self.base, self.default_value());
        description.element = self
            .element
            .as_ref()
            .map(|element| Box::new(element.describe()));
        description
    }
}

impl TypedSchema for ArraySchema {
    fn base_mut(&mut self) -> &mut SchemaBase {
        &mut self.base
    }

    fn conditions(&self) -> &[Condition<Self>] {
        &self.conditions
    }

    fn conditions_mut(&mut self) -> &mut Vec<Condition<Self>> {
        &mut self.conditions
    }

    fn coerce(&self, value: Value, ctx: &Context<'_>) -> Value {
        let value = match value {
            Value::String(ref text) => parse_json(text).unwrap_or(Value::Null),
            other => other,
        };
        let Value::Array(items) = value else {
            return Value::Null;
        };
        let Some(element) = &self.element else {
            return Value::Array(items);
        };

        let cast = items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                element
                    .cast_at(Some(item), &ctx.index(index))
                    .unwrap_or_default()
            })
            .collect();
        Value::Array(cast)
    }

    fn validate_inner(
        &self,
        value: &Value,
        ctx: &Context<'_>,
        own_ok: bool,
    ) -> Vec<ValidationError> {
        let (true, Some(element), Some(items)) = (own_ok, &self.element, value.as_array()) else {
            return Vec::new();
        };

        let mut errors = Vec::new();
        for (index, item) in items.iter().enumerate() {
            let member = ctx.index(index).with_strict(true);
            if let Err(error) = element.validate_at(Some(item), &member) {
                errors.push(error);
                if ctx.options().abort_early {
                    break;
                }
            }
        }
        errors
    }

    fn merge_variant(&mut self, other: &Self) {
        if other.element.is_some() {
            self.element.clone_from(&other.element);
        }
    }
}
