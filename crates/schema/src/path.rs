//! Paths into nested values.
//!
//! Object fields join with dots (`user.address`), array members with brackets
//! (`items[2]`). A value with no known location is reported at [`ROOT`].

use crate::value::Value;

/// Path used for the value a schema was invoked on directly.
pub const ROOT: &str = "this";

/// Path of field `key` below `parent`.
#[must_use]
pub fn join_field(parent: Option<&str>, key: &str) -> String {
    match parent {
        Some(parent) if !parent.is_empty() => format!("{parent}.{key}"),
        _ => key.to_owned(),
    }
}

/// Path of member `index` below `parent`.
#[must_use]
pub fn join_index(parent: Option<&str>, index: usize) -> String {
    format!("{}[{index}]", parent.unwrap_or_default())
}

/// One step of a parsed path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// An object key.
    Key(String),
    /// An array position; `[]` parses to `Index(None)` (any member).
    Index(Option<usize>),
}

/// Parses `a.b[0].c`, `a["b"]` or `list[]` into segments.
///
/// Empty segments are skipped, so `.a..b` parses like `a.b`.
#[must_use]
pub fn parse(path: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut key = String::new();
    let mut chars = path.chars();

    while let Some(c) = chars.next() {
        match c {
            '.' => flush(&mut key, &mut segments),
            '[' => {
                flush(&mut key, &mut segments);
                let inner: String = chars.by_ref().take_while(|&c| c != ']').collect();
                let inner = inner.trim();
                if inner.is_empty() {
                    segments.push(Segment::Index(None));
                } else if let Ok(index) = inner.parse::<usize>() {
                    segments.push(Segment::Index(Some(index)));
                } else {
                    let unquoted = inner.trim_matches(|c| c == '"' || c == '\'');
                    segments.push(Segment::Key(unquoted.to_owned()));
                }
            }
            _ => key.push(c),
        }
    }
    flush(&mut key, &mut segments);
    segments
}

fn flush(key: &mut String, segments: &mut Vec<Segment>) {
    if !key.is_empty() {
        segments.push(Segment::Key(std::mem::take(key)));
    }
}

/// Follows `segments` through `value`.
///
/// `Index(None)` never matches a concrete member.
#[must_use]
pub fn lookup<'a>(value: &'a Value, segments: &[Segment]) -> Option<&'a Value> {
    segments.iter().try_fold(value, |current, segment| match segment {
        Segment::Key(key) => current.get(key),
        Segment::Index(Some(index)) => current.as_array()?.get(*index),
        Segment::Index(None) => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn joins_paths() {
        assert_eq!(join_field(None, "a"), "a");
        assert_eq!(join_field(Some(""), "a"), "a");
        assert_eq!(join_field(Some("a"), "b"), "a.b");
        assert_eq!(join_index(Some("a.b"), 2), "a.b[2]");
        assert_eq!(join_index(None, 0), "[0]");
    }

    #[test]
    fn parses_mixed_paths() {
        assert_eq!(
            parse("a.b[0].c"),
            vec![
                Segment::Key("a".into()),
                Segment::Key("b".into()),
                Segment::Index(Some(0)),
                Segment::Key("c".into()),
            ]
        );
        assert_eq!(
            parse("list[][\"x\"]"),
            vec![
                Segment::Key("list".into()),
                Segment::Index(None),
                Segment::Key("x".into()),
            ]
        );
        assert!(parse("").is_empty());
    }

    #[test]
    fn looks_up_nested_values() {
        let value = Value::from(json!({"a": {"b": [{"c": 1}, {"c": 2}]}}));
        assert_eq!(
            lookup(&value, &parse("a.b[1].c")),
            Some(&Value::Number(2.0))
        );
        assert_eq!(lookup(&value, &parse("a.x")), None);
        assert_eq!(lookup(&value, &parse("a.b[]")), None);
        assert_eq!(lookup(&value, &[]), Some(&value));
    }
}
