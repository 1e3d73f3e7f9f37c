//! Schema lookup by path.

use crate::base::AnySchema;
use crate::path;

/// Finds the schema at `path` below `schema`.
///
/// Object fields are addressed by key, array elements by any index (`[0]`
/// and `[]` both lead to the element schema). An empty path returns
/// `schema` itself.
///
/// # Examples
///
/// ```
/// use contour_schema::prelude::*;
///
/// let schema: AnySchema = object()
///     .shape([("tags", array().of(string().min(2)).into())])
///     .unwrap()
///     .into();
/// let tag = reach(&schema, "tags[0]").unwrap();
/// assert_eq!(tag.kind(), SchemaKind::String);
/// assert!(reach(&schema, "missing").is_none());
/// ```
#[must_use]
pub fn reach(schema: &AnySchema, path: &str) -> Option<AnySchema> {
    path::parse(path)
        .iter()
        .try_fold(schema.clone(), |current, segment| current.child(segment))
}
