//! Boolean schema.

use crate::base::{Context, SchemaBase, SchemaKind, TypedSchema, impl_schema_common};
use crate::condition::Condition;
use crate::{Schema, Value};

/// Schema for `true` / `false`.
///
/// Text `"true"` / `"1"` (trimmed, any case) and the number `1` cast to
/// `true`; every other value casts to `false`.
#[derive(Debug, Clone, Default)]
pub struct BooleanSchema {
    base: SchemaBase,
    conditions: Vec<Condition<Self>>,
}

impl BooleanSchema {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Schema for BooleanSchema {
    impl_schema_common!();

    fn kind(&self) -> SchemaKind {
        SchemaKind::Boolean
    }

    fn check_type(&self, value: &Value) -> bool {
        matches!(value, Value::Bool(_))
    }
}

impl TypedSchema for BooleanSchema {
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
        let truthy = match value {
            Value::Bool(b) => b,
            Value::String(s) => {
                let s = s.trim();
                s.eq_ignore_ascii_case("true") || s == "1"
            }
            Value::Number(n) => n == 1.0,
            _ => false,
        };
        Value::Bool(truthy)
    }
}
