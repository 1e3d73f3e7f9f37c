//! Error types.
//!
//! Two families live here:
//!
//! - [`SchemaError`]: caller misuse detected while building a schema. These
//!   are returned from fallible builders and never collected.
//! - [`Violation`] / [`ValidationError`]: a value failing a schema. Every
//!   failing test contributes one [`Violation`]; nested schemas aggregate
//!   their children's errors, children first.

use std::borrow::Cow;
use std::fmt;

use crate::interpolate::Params;
use crate::value::Value;

// ============================================================================
// SCHEMA ERROR
// ============================================================================

/// A schema was configured incorrectly.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// Object fields depend on each other in a cycle.
    #[error("cyclic dependency between fields: {}", fields.join(", "))]
    CyclicDependency { fields: Vec<String> },

    /// A bound could not be cast to the schema's type.
    #[error("`{value}` is not a valid {name} bound")]
    InvalidBound { name: &'static str, value: String },

    /// A regular expression failed to compile.
    #[error("invalid pattern `{pattern}`: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// An unknown rounding mode name.
    #[error("invalid rounding mode `{mode}`, expected one of: ceil, floor, round, trunc")]
    InvalidRoundingMode { mode: String },

    /// A value whitelist combined with validation tests on one schema.
    #[error("a schema cannot have both a value whitelist and validation tests")]
    WhitelistConflict,
}

impl SchemaError {
    /// Machine-readable error code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::CyclicDependency { .. } => "SCHEMA_CYCLIC_DEPENDENCY",
            Self::InvalidBound { .. } => "SCHEMA_INVALID_BOUND",
            Self::InvalidPattern { .. } => "SCHEMA_INVALID_PATTERN",
            Self::InvalidRoundingMode { .. } => "SCHEMA_INVALID_ROUNDING_MODE",
            Self::WhitelistConflict => "SCHEMA_WHITELIST_CONFLICT",
        }
    }
}

// ============================================================================
// VIOLATION
// ============================================================================

/// One failed test at one location.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// Name of the failed test, e.g. `"min"`, `"required"`, `"typeError"`.
    pub code: Cow<'static, str>,

    /// The interpolated, human-readable message.
    pub message: String,

    /// Where the value sits in the input, e.g. `"items[2].name"`.
    pub path: String,

    /// Parameters the message was rendered with.
    pub params: Params,
}

impl Violation {
    pub fn new(
        code: impl Into<Cow<'static, str>>,
        message: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            path: path.into(),
            params: Vec::new(),
        }
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    /// Looks up a parameter value by key.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .rev()
            .find(|(k, _)| k.as_ref() == key)
            .map(|(_, v)| v.as_ref())
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.path, self.code, self.message)
    }
}

// ============================================================================
// VALIDATION ERROR
// ============================================================================

/// Every violation found below one location.
///
/// `inner` holds one aggregate per failing child (object field or array
/// member), `violations` the failures of the location itself. Flattening
/// always yields the children's violations before the parent's own.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Location of the rejected value.
    pub path: String,

    /// The rejected value after casting; `None` when it was absent.
    pub value: Option<Value>,

    /// Failures of this location.
    pub violations: Vec<Violation>,

    /// Failures of nested locations.
    pub inner: Vec<ValidationError>,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, value: Option<Value>) -> Self {
        Self {
            path: path.into(),
            value,
            violations: Vec::new(),
            inner: Vec::new(),
        }
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_violation(mut self, violation: Violation) -> Self {
        self.violations.push(violation);
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_violations(mut self, violations: Vec<Violation>) -> Self {
        self.violations.extend(violations);
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_inner(mut self, errors: Vec<ValidationError>) -> Self {
        self.inner.extend(errors);
        self
    }

    /// Returns true when nothing below this location failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty() && self.inner.iter().all(ValidationError::is_empty)
    }

    /// Number of violations including nested ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.violations.len() + self.inner.iter().map(ValidationError::len).sum::<usize>()
    }

    /// All violations, depth-first, children before the parent's own.
    #[must_use]
    pub fn flatten(&self) -> Vec<&Violation> {
        let mut out = Vec::with_capacity(self.len());
        self.collect_into(&mut out);
        out
    }

    fn collect_into<'a>(&'a self, out: &mut Vec<&'a Violation>) {
        for child in &self.inner {
            child.collect_into(out);
        }
        out.extend(&self.violations);
    }

    /// All messages in [`flatten`](Self::flatten) order.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.flatten()
            .into_iter()
            .map(|v| v.message.clone())
            .collect()
    }

    /// Paths of all violations in [`flatten`](Self::flatten) order.
    #[must_use]
    pub fn paths(&self) -> Vec<&str> {
        self.flatten().into_iter().map(|v| v.path.as_str()).collect()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let violations = self.flatten();
        if let [only] = violations.as_slice() {
            return f.write_str(&only.message);
        }
        write!(f, "{} errors occurred", violations.len())?;
        for (i, violation) in violations.iter().enumerate() {
            write!(f, "\n  {}. {}", i + 1, violation.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn violation(path: &str, message: &str) -> Violation {
        Violation::new("custom", message, path)
    }

    #[test]
    fn schema_error_messages() {
        let err = SchemaError::CyclicDependency {
            fields: vec!["a".into(), "b".into()],
        };
        assert_eq!(err.to_string(), "cyclic dependency between fields: a, b");
        assert_eq!(err.code(), "SCHEMA_CYCLIC_DEPENDENCY");

        let err = SchemaError::InvalidBound {
            name: "min",
            value: "\"soon\"".into(),
        };
        assert_eq!(err.to_string(), "`\"soon\"` is not a valid min bound");
    }

    #[test]
    fn flatten_reports_children_first() {
        let error = ValidationError::new("this", None)
            .with_violation(violation("this", "parent"))
            .with_inner(vec![
                ValidationError::new("a", None)
                    .with_violation(violation("a", "a own"))
                    .with_inner(vec![
                        ValidationError::new("a.x", None).with_violation(violation("a.x", "a.x")),
                    ]),
                ValidationError::new("b", None).with_violation(violation("b", "b")),
            ]);

        assert_eq!(error.messages(), ["a.x", "a own", "b", "parent"]);
        assert_eq!(error.paths(), ["a.x", "a", "b", "this"]);
        assert_eq!(error.len(), 4);
        assert!(!error.is_empty());
    }

    #[test]
    fn display_single_and_multiple() {
        let single = ValidationError::new("a", None).with_violation(violation("a", "a is bad"));
        assert_eq!(single.to_string(), "a is bad");

        let multiple = single
            .clone()
            .with_violation(violation("a", "a is worse"));
        assert_eq!(
            multiple.to_string(),
            "2 errors occurred\n  1. a is bad\n  2. a is worse"
        );
    }

    #[test]
    fn violation_param_lookup() {
        let v = violation("age", "too small")
            .with_params(vec![("min".into(), "4".into()), ("path".into(), "age".into())]);
        assert_eq!(v.param("min"), Some("4"));
        assert_eq!(v.param("max"), None);
        assert_eq!(v.to_string(), "[age] custom: too small");
    }
}
