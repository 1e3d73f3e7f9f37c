//! The untyped schema: accepts any value and never coerces.

use crate::base::{Context, SchemaBase, SchemaKind, TypedSchema, impl_schema_common};
use crate::condition::Condition;
use crate::{Schema, Value};

#[derive(Debug, Clone, Default)]
pub struct MixedSchema {
    base: SchemaBase,
    conditions: Vec<Condition<Self>>,
}

impl MixedSchema {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Schema for MixedSchema {
    impl_schema_common!();

    fn kind(&self) -> SchemaKind {
        SchemaKind::Mixed
    }

    fn check_type(&self, _value: &Value) -> bool {
        true
    }
}

impl TypedSchema for MixedSchema {
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
        value
    }
}
