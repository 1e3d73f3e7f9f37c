//! Default English message templates.
//!
//! Every template is rendered with [`interpolate`](crate::interpolate::interpolate);
//! `${path}` and `${value}` are always available, the rest depend on the test.

/// Templates shared by every schema kind.
pub mod mixed {
    pub const DEFAULT: &str = "${path} is invalid";
    pub const REQUIRED: &str = "${path} is a required field";
    pub const ONE_OF: &str = "${path} must be one of the following values: ${values}";
    pub const NOT_ONE_OF: &str = "${path} must not be one of the following values: ${values}";
    pub const NOT_TYPE: &str =
        "${path} must be a `${type}` type, but the final value was: `${value}`";
}

pub mod string {
    pub const LENGTH: &str = "${path} must be exactly ${length} characters";
    pub const MIN: &str = "${path} must be at least ${min} characters";
    pub const MAX: &str = "${path} must be at most ${max} characters";
    pub const MATCHES: &str = "${path} must match the following: \"${regex}\"";
    pub const EMAIL: &str = "${path} must be a valid email";
    pub const URL: &str = "${path} must be a valid URL";
    pub const TRIM: &str = "${path} must be a trimmed string";
    pub const LOWERCASE: &str = "${path} must be a lowercase string";
    pub const UPPERCASE: &str = "${path} must be an uppercase string";
}

pub mod number {
    pub const MIN: &str = "${path} must be greater than or equal to ${min}";
    pub const MAX: &str = "${path} must be less than or equal to ${max}";
    pub const MORE_THAN: &str = "${path} must be greater than ${more}";
    pub const LESS_THAN: &str = "${path} must be less than ${less}";
    pub const POSITIVE: &str = "${path} must be a positive number";
    pub const NEGATIVE: &str = "${path} must be a negative number";
    pub const INTEGER: &str = "${path} must be an integer";
}

pub mod date {
    pub const MIN: &str = "${path} field must be later than ${min}";
    pub const MAX: &str = "${path} field must be earlier than ${max}";
}

pub mod array {
    pub const MIN: &str = "${path} field must have at least ${min} items";
    pub const MAX: &str = "${path} field must have less than or equal to ${max} items";
}
