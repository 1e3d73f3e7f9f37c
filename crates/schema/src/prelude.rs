//! Prelude module for convenient imports.
//!
//! ```
//! use contour_schema::prelude::*;
//!
//! let schema = object()
//!     .shape([("age", number().required().min(0).into())])
//!     .unwrap();
//! assert!(schema.is_valid(&serde_json::json!({ "age": 4 }).into()));
//! ```

// ============================================================================
// CONTRACT
// ============================================================================

pub use crate::base::{AnySchema, Context, Schema, SchemaKind, TypedSchema};
pub use crate::condition::When;
pub use crate::error::{SchemaError, ValidationError, Violation};
pub use crate::options::ValidateOptions;
pub use crate::test::Test;
pub use crate::value::{Map, Value};

// ============================================================================
// SCHEMAS
// ============================================================================

pub use crate::array::ArraySchema;
pub use crate::boolean::BooleanSchema;
pub use crate::date::DateSchema;
pub use crate::mixed::MixedSchema;
pub use crate::number::{NumberSchema, RoundingMode};
pub use crate::object::ObjectSchema;
pub use crate::string::StringSchema;

// ============================================================================
// FACTORIES
// ============================================================================

pub use crate::reach::reach;
pub use crate::{array, boolean, date, mixed, number, object, string};
