//! Environment reference interpolation.
//!
//! Substitutes `${env.NAME}` tokens with the value of the process
//! environment variable `NAME`. Tokens that do not carry the exact `env.`
//! prefix are left verbatim; an unset variable substitutes to the empty
//! string. There is no escape syntax.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static ENV_REFERENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{env\.([_A-Za-z0-9]+)\}").expect("valid pattern"));

/// Replaces every `${env.NAME}` reference in `value` with the environment
/// value of `NAME`, or the empty string when `NAME` is unset.
pub fn replace_env_references(value: &str) -> Cow<'_, str> {
    ENV_REFERENCE.replace_all(value, |caps: &Captures| {
        std::env::var(&caps[1]).unwrap_or_default()
    })
}
