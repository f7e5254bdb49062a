//! Fenced code blocks and backslash escapes.
//!
//! Both run on the raw document before any inline or block rule, so their
//! output is tokenized straight away and never reinterpreted.
//!
//! A fence is a line holding only `@`, the code, and another line holding
//! only `@`:
//!
//! ```text
//! @
//! *not emphasis*
//! @
//! ```

use std::sync::LazyLock;

use regex::Regex;

use crate::{grammar::Context, replacer::RuleMatch};

pub(crate) static FENCE_RE: LazyLock<Regex> =
    lazy_regex!(r"(?m)^@\n((?s:.+?))\n@$", "fence pattern regex should compile");

pub(crate) static ESCAPE_RE: LazyLock<Regex> =
    lazy_regex!(r"\\([^\sA-Za-z0-9_])", "escape pattern regex should compile");

/// Render a fenced block as `<pre>` with its content untouched.
pub(crate) fn fenced_code(cx: &mut Context<'_>, m: &RuleMatch) -> Option<String> {
    let code = m.group(1)?;
    Some(cx.tokenize(format!("<pre>{code}</pre>")))
}

/// Keep an escaped punctuation character literal.
pub(crate) fn escaped_char(cx: &mut Context<'_>, m: &RuleMatch) -> Option<String> {
    Some(cx.tokenize(m.group(1)?))
}
