//! # contour-schema
//!
//! Immutable schema descriptors that coerce loosely-typed input (such as
//! parsed JSON) into typed values and validate them, reporting every
//! violation with the path where it occurred.
//!
//! ## Quick Start
//!
//! ```
//! use contour_schema::prelude::*;
//! use serde_json::json;
//!
//! let schema = object()
//!     .shape([
//!         ("name", string().required().min(2).into()),
//!         ("age", number().required().integer().min(0).into()),
//!         ("tags", array().of(string().trim()).max(3).into()),
//!     ])
//!     .unwrap();
//!
//! let value = schema
//!     .validate(&json!({ "name": "Ada", "age": "36", "tags": [" math "] }).into())
//!     .unwrap();
//! assert_eq!(value, Value::from(json!({ "name": "Ada", "age": 36, "tags": ["math"] })));
//!
//! let err = schema.validate(&json!({ "name": "A", "age": -1 }).into()).unwrap_err();
//! assert_eq!(
//!     err.messages(),
//!     [
//!         "name must be at least 2 characters",
//!         "age must be greater than or equal to 0",
//!     ]
//! );
//! ```
//!
//! ## Schemas
//!
//! - [`mixed`], [`string`], [`number`], [`boolean`], [`date`]: primitives
//! - [`array`], [`object`]: composites, cast and validated recursively
//!
//! Every builder returns a new schema; schemas are `Send + Sync` and can be
//! shared freely. [`Schema`] is the object-safe contract used for nested
//! schemas ([`AnySchema`]); [`TypedSchema`] carries the shared builders
//! (`required`, `nullable`, `one_of`, `when`, ...).
//!
//! ## Conditions
//!
//! [`TypedSchema::when`] derives a schema from a sibling field or, with a
//! `$` prefix, from [`ValidateOptions::context`]. Object fields are cast in
//! dependency order and a cycle between fields is a [`SchemaError`].

// ValidationError is returned by value from every validation call; boxing it
// would add an allocation per call.
#![allow(clippy::result_large_err)]

pub mod array;
pub mod base;
pub mod boolean;
pub mod condition;
pub mod date;
pub mod describe;
pub mod error;
pub mod interpolate;
pub mod locale;
pub mod mixed;
pub mod number;
pub mod object;
pub mod options;
pub mod path;
pub mod prelude;
pub mod reach;
pub mod sort;
pub mod string;
pub mod test;
pub mod value;

pub use array::ArraySchema;
pub use base::{AnySchema, Context, Schema, SchemaKind, TypedSchema};
pub use boolean::BooleanSchema;
pub use condition::When;
pub use date::DateSchema;
pub use describe::SchemaDescription;
pub use error::{SchemaError, ValidationError, Violation};
pub use mixed::MixedSchema;
pub use number::{NumberSchema, RoundingMode};
pub use object::ObjectSchema;
pub use options::ValidateOptions;
pub use reach::reach;
pub use string::StringSchema;
pub use test::Test;
pub use value::{Map, Value};

// ============================================================================
// FACTORIES
// ============================================================================

/// A schema accepting any value.
#[must_use]
pub fn mixed() -> MixedSchema {
    MixedSchema::new()
}

#[must_use]
pub fn string() -> StringSchema {
    StringSchema::new()
}

#[must_use]
pub fn number() -> NumberSchema {
    NumberSchema::new()
}

#[must_use]
pub fn boolean() -> BooleanSchema {
    BooleanSchema::new()
}

#[must_use]
pub fn date() -> DateSchema {
    DateSchema::new()
}

/// An array schema; set the member schema with [`ArraySchema::of`].
#[must_use]
pub fn array() -> ArraySchema {
    ArraySchema::new()
}

/// An object schema; declare fields with [`ObjectSchema::shape`].
#[must_use]
pub fn object() -> ObjectSchema {
    ObjectSchema::new()
}
