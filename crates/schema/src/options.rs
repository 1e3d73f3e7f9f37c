//! Call-level configuration for `cast` and `validate`.

use serde::Deserialize;

use crate::path;
use crate::value::Value;

/// Options for a single `cast_with` / `validate_with` call.
///
/// Deserializable with every field optional, so it can be embedded in a
/// larger configuration file:
///
/// ```
/// use contour_schema::ValidateOptions;
///
/// let options: ValidateOptions =
///     serde_json::from_str(r#"{ "abort_early": true, "context": { "max": 3 } }"#).unwrap();
/// assert!(options.abort_early);
/// assert!(!options.strict);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ValidateOptions {
    /// Skip casting; validate the input exactly as given.
    pub strict: bool,

    /// Stop at the first violation instead of collecting all of them.
    pub abort_early: bool,

    /// Drop object keys that have no field schema.
    pub strip_unknown: bool,

    /// External values available to conditions through `$name` references.
    pub context: Option<Value>,
}

impl ValidateOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn abort_early(mut self, abort_early: bool) -> Self {
        self.abort_early = abort_early;
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn strip_unknown(mut self, strip_unknown: bool) -> Self {
        self.strip_unknown = strip_unknown;
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_context(mut self, context: impl Into<Value>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Looks up `key` (a path such as `limits.max`) in the context value.
    #[must_use]
    pub fn context_value(&self, key: &str) -> Option<&Value> {
        path::lookup(self.context.as_ref()?, &path::parse(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn defaults_are_exhaustive_and_lenient() {
        let options = ValidateOptions::default();
        assert!(!options.strict);
        assert!(!options.abort_early);
        assert!(!options.strip_unknown);
        assert_eq!(options.context, None);
    }

    #[test]
    fn deserializes_partial_config() {
        let options: ValidateOptions =
            serde_json::from_value(json!({ "strip_unknown": true })).unwrap();
        assert_eq!(options, ValidateOptions::new().strip_unknown(true));
    }

    #[test]
    fn looks_up_nested_context() {
        let options = ValidateOptions::new().with_context(json!({ "limits": { "max": 3 } }));
        assert_eq!(
            options.context_value("limits.max"),
            Some(&Value::Number(3.0))
        );
        assert_eq!(options.context_value("limits.min"), None);
        assert_eq!(ValidateOptions::new().context_value("limits"), None);
    }
}
