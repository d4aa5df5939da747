//! Pure string predicates shared by WomenConnect Hub form rulesets.
//!
//! Every function here is side-effect free and operates on borrowed input so
//! rulesets can evaluate the whole form in one pass without cloning values.
//!
//! # Examples
//! ```
//! use field_rules::{is_blank, is_email, meets_min_length};
//!
//! assert!(is_blank("   "));
//! assert!(is_email("ada@example.com"));
//! assert!(!meets_min_length("abc", 6));
//! ```

mod link;

use std::sync::OnceLock;

use regex::Regex;

pub use link::{LinkShapeError, SharedImageLink};

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // local@domain.tld with no whitespace and a single @.
        let pattern = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Return `true` when the value is empty once surrounding whitespace is
/// removed.
#[must_use]
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Return `true` when the value has the `local@domain.tld` shape.
///
/// Surrounding whitespace is ignored so pasted addresses are not rejected
/// for a trailing newline.
#[must_use]
pub fn is_email(value: &str) -> bool {
    email_regex().is_match(value.trim())
}

/// Return `true` when the value holds at least `min` characters.
///
/// Length is counted in Unicode scalar values, not bytes.
#[must_use]
pub fn meets_min_length(value: &str, min: usize) -> bool {
    value.chars().count() >= min
}

/// Return `true` when the value equals `expected` exactly.
#[must_use]
pub fn is_exactly(value: &str, expected: &str) -> bool {
    value == expected
}

/// Return `true` when the value is one of `allowed`.
#[must_use]
pub fn is_one_of(value: &str, allowed: &[&str]) -> bool {
    allowed.contains(&value)
}

/// Return `true` when the value parses as a recognised shared-image link.
#[must_use]
pub fn is_shared_image_link(value: &str) -> bool {
    SharedImageLink::parse(value).is_ok()
}
