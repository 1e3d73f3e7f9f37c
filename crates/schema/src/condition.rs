//! Conditional schemas.
//!
//! A [`Condition`] pairs a [`Reference`] (a sibling field or a `$context`
//! entry) with a [`When`] rule that derives a new schema from the referenced
//! value. Conditions are resolved in registration order every time a schema
//! is cast or validated.

use std::fmt;
use std::sync::Arc;

use crate::base::{AnySchema, Context, TypedSchema};
use crate::options::ValidateOptions;
use crate::path::{self, Segment};
use crate::value::Value;

// ============================================================================
// REFERENCE
// ============================================================================

/// Prefix selecting the call-level context instead of the sibling object.
pub const CONTEXT_PREFIX: char = '$';

/// Where a condition reads its input from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    key: String,
    is_context: bool,
    segments: Vec<Segment>,
}

impl Reference {
    /// Parses `a`, `a.b[0]` (sibling paths) or `$name` (context paths).
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        let (is_context, rest) = match key.strip_prefix(CONTEXT_PREFIX) {
            Some(rest) => (true, rest),
            None => (false, key.as_str()),
        };
        let segments = path::parse(rest);
        Self {
            key,
            is_context,
            segments,
        }
    }

    /// The reference as written.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn is_context(&self) -> bool {
        self.is_context
    }

    /// The sibling field this reference reads, if any.
    #[must_use]
    pub fn dependency(&self) -> Option<&str> {
        if self.is_context {
            return None;
        }
        match self.segments.first() {
            Some(Segment::Key(key)) => Some(key),
            _ => None,
        }
    }

    /// Reads the referenced value.
    #[must_use]
    pub fn resolve<'c>(&self, ctx: &'c Context<'_>) -> Option<&'c Value> {
        if self.is_context {
            return path::lookup(ctx.options().context.as_ref()?, &self.segments);
        }
        let (Segment::Key(first), rest) = self.segments.split_first()? else {
            return None;
        };
        path::lookup(ctx.parent()?.get(first)?, rest)
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

// ============================================================================
// WHEN
// ============================================================================

type Predicate = Arc<dyn Fn(Option<&Value>) -> bool + Send + Sync>;
type Mapper<S> = Arc<dyn Fn(Option<&Value>, &S) -> S + Send + Sync>;

enum Rule<S> {
    Branch {
        predicate: Predicate,
        then: Option<S>,
        otherwise: Option<S>,
    },
    Map(Mapper<S>),
}

/// How a referenced value changes a schema.
///
/// # Examples
///
/// ```
/// use contour_schema::prelude::*;
///
/// let schema = object()
///     .shape([
///         ("is_big", boolean().into()),
///         ("count", number().when("is_big", When::is(true).then(number().min(5))).into()),
///     ])
///     .unwrap();
///
/// assert!(schema.is_valid(&serde_json::json!({ "is_big": false, "count": 1 }).into()));
/// assert!(!schema.is_valid(&serde_json::json!({ "is_big": true, "count": 1 }).into()));
/// ```
pub struct When<S> {
    rule: Rule<S>,
}

impl<S: TypedSchema> When<S> {
    /// Matches when the referenced value equals `value`.
    #[must_use]
    pub fn is(value: impl Into<Value>) -> Self {
        let expected = value.into();
        Self::check(move |value| value == Some(&expected))
    }

    /// Matches when the referenced value passes `schema`.
    #[must_use]
    pub fn matches(schema: impl Into<AnySchema>) -> Self {
        let schema = schema.into();
        Self::check(move |value| {
            let options = ValidateOptions::default();
            schema.validate_at(value, &Context::new(&options)).is_ok()
        })
    }

    /// Matches when `predicate` returns true for the referenced value.
    #[must_use]
    pub fn check<F>(predicate: F) -> Self
    where
        F: Fn(Option<&Value>) -> bool + Send + Sync + 'static,
    {
        Self {
            rule: Rule::Branch {
                predicate: Arc::new(predicate),
                then: None,
                otherwise: None,
            },
        }
    }

    /// Derives the schema directly from the referenced value.
    #[must_use]
    pub fn map<F>(mapper: F) -> Self
    where
        F: Fn(Option<&Value>, &S) -> S + Send + Sync + 'static,
    {
        Self {
            rule: Rule::Map(Arc::new(mapper)),
        }
    }

    /// Schema merged onto the node when the predicate holds.
    ///
    /// Has no effect on a [`When::map`] rule.
    #[must_use = "builder methods must be chained or built"]
    pub fn then(mut self, schema: S) -> Self {
        if let Rule::Branch { then, .. } = &mut self.rule {
            *then = Some(schema);
        }
        self
    }

    /// Schema merged onto the node when the predicate does not hold.
    ///
    /// Has no effect on a [`When::map`] rule.
    #[must_use = "builder methods must be chained or built"]
    pub fn otherwise(mut self, schema: S) -> Self {
        if let Rule::Branch { otherwise, .. } = &mut self.rule {
            *otherwise = Some(schema);
        }
        self
    }

    /// Sibling fields read by the conditions of the `then` / `otherwise`
    /// schemas. A [`When::map`] result is unknown until it runs.
    fn dependencies(&self) -> Vec<String> {
        match &self.rule {
            Rule::Branch {
                then, otherwise, ..
            } => then
                .iter()
                .chain(otherwise)
                .flat_map(|schema| schema.dependencies())
                .collect(),
            Rule::Map(_) => Vec::new(),
        }
    }

    fn apply(&self, value: Option<&Value>, schema: &S) -> S {
        match &self.rule {
            Rule::Branch {
                predicate,
                then,
                otherwise,
            } => {
                let branch = if predicate(value) { then } else { otherwise };
                branch
                    .as_ref()
                    .map_or_else(|| schema.clone(), |branch| schema.concat(branch))
            }
            Rule::Map(mapper) => mapper(value, schema),
        }
    }
}

impl<S: Clone> Clone for When<S> {
    fn clone(&self) -> Self {
        let rule = match &self.rule {
            Rule::Branch {
                predicate,
                then,
                otherwise,
            } => Rule::Branch {
                predicate: Arc::clone(predicate),
                then: then.clone(),
                otherwise: otherwise.clone(),
            },
            Rule::Map(mapper) => Rule::Map(Arc::clone(mapper)),
        };
        Self { rule }
    }
}

impl<S: fmt::Debug> fmt::Debug for When<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.rule {
            Rule::Branch {
                then, otherwise, ..
            } => f
                .debug_struct("When")
                .field("then", then)
                .field("otherwise", otherwise)
                .finish_non_exhaustive(),
            Rule::Map(_) => f.debug_struct("When").finish_non_exhaustive(),
        }
    }
}

// ============================================================================
// CONDITION
// ============================================================================

/// A [`When`] rule bound to the [`Reference`] it reads.
pub struct Condition<S> {
    reference: Reference,
    when: When<S>,
}

impl<S: TypedSchema> Condition<S> {
    pub fn new(reference: impl Into<String>, when: When<S>) -> Self {
        Self {
            reference: Reference::new(reference),
            when,
        }
    }

    #[must_use]
    pub fn reference(&self) -> &Reference {
        &self.reference
    }

    /// Applies the rule to `schema` using the value the reference points at.
    #[must_use]
    pub fn resolve(&self, schema: &S, ctx: &Context<'_>) -> S {
        let value = self.reference.resolve(ctx);
        tracing::trace!(
            reference = %self.reference,
            found = value.is_some(),
            path = ctx.path_or_root(),
            "resolving condition"
        );
        self.when.apply(value, schema)
    }
}

impl<S: Clone> Clone for Condition<S> {
    fn clone(&self) -> Self {
        Self {
            reference: self.reference.clone(),
            when: self.when.clone(),
        }
    }
}

impl<S: fmt::Debug> fmt::Debug for Condition<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Condition")
            .field("reference", &self.reference)
            .field("when", &self.when)
            .finish()
    }
}

/// Sibling fields referenced by `conditions` and by the schemas their
/// branches merge in, without duplicates.
pub(crate) fn dependencies<S: TypedSchema>(conditions: &[Condition<S>]) -> Vec<String> {
    let mut deps: Vec<String> = Vec::new();
    for condition in conditions {
        let own = condition.reference.dependency().map(str::to_owned);
        for dep in own.into_iter().chain(condition.when.dependencies()) {
            if !deps.contains(&dep) {
                deps.push(dep);
            }
        }
    }
    deps
}
