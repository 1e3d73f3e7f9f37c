//! Serializable schema introspection.

use indexmap::IndexMap;
use serde::Serialize;

use crate::base::{SchemaBase, SchemaKind};
use crate::value::Value;

/// A snapshot of a schema's configuration.
///
/// Closures (transforms, custom checks, conditions) cannot be described; only
/// test names and their parameters are reported.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaDescription {
    #[serde(rename = "type")]
    pub kind: SchemaKind,
    pub nullable: bool,
    pub strict: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    pub tests: Vec<TestDescription>,
    #[serde(rename = "oneOf", skip_serializing_if = "Vec::is_empty")]
    pub one_of: Vec<Value>,
    #[serde(rename = "notOneOf", skip_serializing_if = "Vec::is_empty")]
    pub not_one_of: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element: Option<Box<SchemaDescription>>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub fields: IndexMap<String, SchemaDescription>,
}

/// A test's name and parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestDescription {
    pub name: String,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub params: IndexMap<String, String>,
}

impl SchemaDescription {
    pub(crate) fn new(kind: SchemaKind, base: &SchemaBase, default: Option<Value>) -> Self {
        Self {
            kind,
            nullable: base.is_nullable(),
            strict: base.is_strict(),
            default,
            tests: base
                .tests()
                .iter()
                .map(|test| TestDescription {
                    name: test.name().to_owned(),
                    params: test
                        .params()
                        .iter()
                        .map(|(k, v)| (k.to_string(), v.to_string()))
                        .collect(),
                })
                .collect(),
            one_of: base.whitelist().to_vec(),
            not_one_of: base.blacklist().to_vec(),
            element: None,
            fields: IndexMap::new(),
        }
    }

    /// Whether a test named `name` is configured.
    #[must_use]
    pub fn has_test(&self, name: &str) -> bool {
        self.tests.iter().any(|test| test.name == name)
    }
}
