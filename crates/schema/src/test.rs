//! Named validation predicates.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::base::Context;
use crate::error::Violation;
use crate::interpolate::{Params, interpolate};
use crate::locale;
use crate::value::Value;

/// Name of the presence test added by `required()`.
pub const REQUIRED: &str = "required";

type ValueCheck = Arc<dyn Fn(&Value) -> bool + Send + Sync>;
type ContextCheck = Arc<dyn Fn(Option<&Value>, &Context<'_>) -> bool + Send + Sync>;

#[derive(Clone)]
enum Check {
    /// Sees present, non-null values only.
    Value(ValueCheck),
    /// Sees every value, absent and null included, plus the call context.
    Context(ContextCheck),
}

/// A named predicate with a message template.
///
/// Tests built with [`Test::new`] pass for absent and `null` values, so
/// `string().min(3)` accepts a missing field unless it is also `required()`.
/// Use [`Test::with_context`] for checks that must see those values or need
/// the sibling object and call context.
///
/// An [exclusive](Test::exclusive) test replaces any earlier test with the
/// same name when added to a schema.
///
/// # Examples
///
/// ```
/// use contour_schema::prelude::*;
///
/// let even = Test::new("even", "${path} must be even", |v| {
///     v.as_f64().is_some_and(|n| n % 2.0 == 0.0)
/// });
/// let schema = number().test(even);
/// assert!(schema.is_valid(&4.into()));
/// assert!(!schema.is_valid(&3.into()));
/// ```
#[derive(Clone)]
pub struct Test {
    name: Cow<'static, str>,
    message: Cow<'static, str>,
    params: Params,
    exclusive: bool,
    check: Check,
}

impl Test {
    pub fn new<F>(
        name: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
        check: F,
    ) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            message: message.into(),
            params: Vec::new(),
            exclusive: false,
            check: Check::Value(Arc::new(check)),
        }
    }

    pub fn with_context<F>(
        name: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
        check: F,
    ) -> Self
    where
        F: Fn(Option<&Value>, &Context<'_>) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            message: message.into(),
            params: Vec::new(),
            exclusive: false,
            check: Check::Context(Arc::new(check)),
        }
    }

    /// Present, non-null and, for strings, non-empty.
    pub(crate) fn required() -> Self {
        Self::with_context(REQUIRED, locale::mixed::REQUIRED, |value, _| match value {
            None | Some(Value::Null) => false,
            Some(Value::String(s)) => !s.is_empty(),
            Some(_) => true,
        })
        .exclusive()
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn exclusive(mut self) -> Self {
        self.exclusive = true;
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_param(
        mut self,
        key: impl Into<Cow<'static, str>>,
        value: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = message.into();
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn params(&self) -> &Params {
        &self.params
    }

    #[must_use]
    pub fn is_exclusive(&self) -> bool {
        self.exclusive
    }

    pub(crate) fn set_message(&mut self, message: Cow<'static, str>) {
        self.message = message;
    }

    /// Runs the predicate, rendering a [`Violation`] on failure.
    pub(crate) fn run(&self, value: Option<&Value>, ctx: &Context<'_>) -> Result<(), Violation> {
        let passed = match &self.check {
            Check::Value(check) => match value {
                Some(value) if !value.is_null() => check(value),
                _ => true,
            },
            Check::Context(check) => check(value, ctx),
        };
        if passed {
            return Ok(());
        }

        let path = ctx.path_or_root();
        tracing::trace!(test = %self.name, path, "test failed");
        Err(violation(
            self.name.clone(),
            &self.message,
            path,
            value,
            self.params.clone(),
        ))
    }
}

/// Renders `template` into a [`Violation`] with the standard `path` and
/// `value` parameters in front of `params`.
pub(crate) fn violation(
    code: Cow<'static, str>,
    template: &str,
    path: &str,
    value: Option<&Value>,
    params: Params,
) -> Violation {
    let mut all: Params = Vec::with_capacity(params.len() + 2);
    all.push(("path".into(), path.to_owned().into()));
    all.push((
        "value".into(),
        value
            .map_or_else(|| "undefined".to_owned(), ToString::to_string)
            .into(),
    ));
    all.extend(params);

    Violation::new(code, interpolate(template, &all), path).with_params(all)
}

impl fmt::Debug for Test {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Test")
            .field("name", &self.name)
            .field("message", &self.message)
            .field("params", &self.params)
            .field("exclusive", &self.exclusive)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::ValidateOptions;
    use pretty_assertions::assert_eq;

    fn positive() -> Test {
        Test::new("positive", "${path} must be above ${min}, got ${value}", |v| {
            v.as_f64().is_some_and(|n| n > 0.0)
        })
        .with_param("min", "0")
    }

    #[test]
    fn value_checks_skip_absent_and_null() {
        let options = ValidateOptions::default();
        let ctx = Context::new(&options);
        let test = positive();
        assert!(test.run(None, &ctx).is_ok());
        assert!(test.run(Some(&Value::Null), &ctx).is_ok());
        assert!(test.run(Some(&Value::Number(1.0)), &ctx).is_ok());
    }

    #[test]
    fn failure_renders_message_with_path_and_value() {
        let options = ValidateOptions::default();
        let ctx = Context::new(&options);
        let violation = positive().run(Some(&Value::Number(-2.0)), &ctx).unwrap_err();

        assert_eq!(violation.code, "positive");
        assert_eq!(violation.path, "this");
        assert_eq!(violation.message, "this must be above 0, got -2");
        assert_eq!(violation.param("value"), Some("-2"));
    }

    #[test]
    fn required_rejects_missing_null_and_empty_text() {
        let options = ValidateOptions::default();
        let ctx = Context::new(&options);
        let required = Test::required();

        assert!(required.is_exclusive());
        assert!(required.run(None, &ctx).is_err());
        assert!(required.run(Some(&Value::Null), &ctx).is_err());
        assert!(required.run(Some(&Value::from("")), &ctx).is_err());
        assert!(required.run(Some(&Value::from(" ")), &ctx).is_ok());
        assert!(required.run(Some(&Value::Bool(false)), &ctx).is_ok());

        let violation = required.run(None, &ctx).unwrap_err();
        assert_eq!(violation.message, "this is a required field");
        assert_eq!(violation.param("value"), Some("undefined"));
    }

    #[test]
    fn context_checks_see_options() {
        let options = ValidateOptions::new().with_context(Value::Number(2.0));
        let ctx = Context::new(&options);
        let matches_context = Test::with_context("ctx", "${path} differs", |v, ctx| {
            v == ctx.options().context.as_ref()
        });
        assert!(matches_context.run(Some(&Value::Number(2.0)), &ctx).is_ok());
        assert!(matches_context.run(None, &ctx).is_err());
    }
}
