//! `${name}` message templates.
//!
//! Placeholders are resolved against an ordered parameter bag. A placeholder
//! with no matching parameter renders as the empty string; an opening `${`
//! without a closing brace is kept verbatim.

use std::borrow::Cow;

/// Ordered message parameters, e.g. `[("min", "5"), ("path", "age")]`.
///
/// Later entries win when a key appears more than once.
pub type Params = Vec<(Cow<'static, str>, Cow<'static, str>)>;

/// Renders `template` against `params`.
///
/// # Examples
///
/// ```
/// use contour_schema::interpolate::{Params, interpolate};
///
/// let params: Params = vec![("path".into(), "age".into()), ("min".into(), "4".into())];
/// assert_eq!(
///     interpolate("${path} must be >= ${min}${unit}", &params),
///     "age must be >= 4",
/// );
/// ```
#[must_use]
pub fn interpolate(template: &str, params: &[(Cow<'static, str>, Cow<'static, str>)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];

        let Some(end) = after.find('}') else {
            out.push_str(&rest[start..]);
            return out;
        };

        let name = after[..end].trim();
        if let Some(value) = lookup(params, name) {
            out.push_str(value);
        }
        rest = &after[end + 1..];
    }

    out.push_str(rest);
    out
}

fn lookup<'a>(params: &'a [(Cow<'static, str>, Cow<'static, str>)], name: &str) -> Option<&'a str> {
    params
        .iter()
        .rev()
        .find(|(key, _)| key.as_ref() == name)
        .map(|(_, value)| value.as_ref())
}
