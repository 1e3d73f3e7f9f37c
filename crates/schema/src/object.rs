//! Object schema.
//!
//! Fields are cast in dependency order: a field whose conditions read a
//! sibling is cast after that sibling, and sees the sibling's cast value.
//! The order is computed whenever the field set changes; a dependency cycle
//! is rejected when the fields are declared.

use indexmap::IndexMap;

use crate::base::{AnySchema, Context, SchemaBase, SchemaKind, TypedSchema, impl_schema_common};
use crate::condition::Condition;
use crate::describe::SchemaDescription;
use crate::error::{SchemaError, ValidationError};
use crate::path::Segment;
use crate::sort::TopologicalSort;
use crate::value::{Map, parse_json};
use crate::{Schema, Value};

#[derive(Debug, Clone, Default)]
pub struct ObjectSchema {
    base: SchemaBase,
    conditions: Vec<Condition<Self>>,
    fields: IndexMap<String, AnySchema>,
    order: Vec<String>,
}

/// Orders `fields` so every field follows the siblings it depends on.
fn field_order(fields: &IndexMap<String, AnySchema>) -> Result<Vec<String>, SchemaError> {
    let mut sort = TopologicalSort::new();
    for (name, schema) in fields {
        sort.add(name.as_str(), schema.dependencies());
    }
    let order = sort.sort()?;
    tracing::debug!(?order, "computed object field order");
    Ok(order)
}

impl ObjectSchema {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces fields.
    ///
    /// # Errors
    ///
    /// [`SchemaError::CyclicDependency`] when the resulting fields depend on
    /// each other in a cycle.
    ///
    /// # Examples
    ///
    /// ```
    /// use contour_schema::prelude::*;
    ///
    /// let user = object()
    ///     .shape([
    ///         ("name", string().required().into()),
    ///         ("age", number().integer().into()),
    ///     ])
    ///     .unwrap();
    /// assert!(user.is_valid(&serde_json::json!({ "name": "Ada", "age": "36" }).into()));
    /// ```
    pub fn shape<K>(
        &self,
        fields: impl IntoIterator<Item = (K, AnySchema)>,
    ) -> Result<Self, SchemaError>
    where
        K: Into<String>,
    {
        let mut next = self.clone();
        next.fields
            .extend(fields.into_iter().map(|(name, schema)| (name.into(), schema)));
        next.order = field_order(&next.fields)?;
        Ok(next)
    }

    #[must_use]
    pub fn fields(&self) -> &IndexMap<String, AnySchema> {
        &self.fields
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&AnySchema> {
        self.fields.get(name)
    }

    /// Field names in cast order.
    #[must_use]
    pub fn order(&self) -> &[String] {
        &self.order
    }

    fn cast_fields(&self, input: &Map, ctx: &Context<'_>) -> Map {
        let mut result = Map::with_capacity(input.len());
        for name in &self.order {
            let Some(field) = self.fields.get(name) else {
                continue;
            };
            let cast = field.cast_at(input.get(name), &ctx.field(name, &result));
            if let Some(value) = cast {
                result.insert(name.clone(), value);
            }
        }

        if !ctx.options().strip_unknown {
            for (key, value) in input {
                if !self.fields.contains_key(key) {
                    result.insert(key.clone(), value.clone());
                }
            }
        }
        result
    }
}

impl Schema for ObjectSchema {
    impl_schema_common!();

    fn kind(&self) -> SchemaKind {
        SchemaKind::Object
    }

    fn check_type(&self, value: &Value) -> bool {
        matches!(value, Value::Object(_))
    }

    /// The explicit default, or one assembled from the fields' defaults.
    fn default_value(&self) -> Option<Value> {
        if let Some(default) = self.base.default_value() {
            return Some(default.get());
        }
        let defaults: Map = self
            .fields
            .iter()
            .filter_map(|(name, field)| Some((name.clone(), field.default_value()?)))
            .collect();
        (!defaults.is_empty()).then_some(Value::Object(defaults))
    }

    fn child(&self, segment: &Segment) -> Option<AnySchema> {
        match segment {
            Segment::Key(key) => self.fields.get(key).cloned(),
            Segment::Index(_) => None,
        }
    }

    fn describe(&self) -> SchemaDescription {
        let mut description =
            SchemaDescription::new(self.kind(), &self.base, self.default_value());
        description.fields = self
            .fields
            .iter()
            .map(|(name, field)| (name.clone(), field.describe()))
            .collect();
        description
    }
}

impl TypedSchema for ObjectSchema {
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
        match value {
            Value::Object(map) => Value::Object(self.cast_fields(&map, ctx)),
            _ => Value::Null,
        }
    }

    fn validate_inner(
        &self,
        value: &Value,
        ctx: &Context<'_>,
        _own_ok: bool,
    ) -> Vec<ValidationError> {
        let Some(map) = value.as_object() else {
            return Vec::new();
        };

        let mut errors = Vec::new();
        for (name, field) in &self.fields {
            let child = ctx.field(name, map).with_strict(true);
            if let Err(error) = field.validate_at(map.get(name), &child) {
                errors.push(error);
                if ctx.options().abort_early {
                    break;
                }
            }
        }
        errors
    }

    fn merge_variant(&mut self, other: &Self) {
        if other.fields.is_empty() {
            return;
        }
        self.fields.extend(
            other
                .fields
                .iter()
                .map(|(name, field)| (name.clone(), field.clone())),
        );
        self.order = match field_order(&self.fields) {
            Ok(order) => order,
            Err(err) => panic!("{err}"),
        };
    }
}
