//! Helper macros used across the crate.

/// Lazily compile a [`Regex`] with a custom panic message.
///
/// Built-in rules keep their patterns in `LazyLock` statics so every grammar
/// shares one compiled copy.
///
/// # Examples
///
/// ```
/// use std::sync::LazyLock;
///
/// use regex::Regex;
/// static RULE_RE: LazyLock<Regex> = expressiv::lazy_regex!(r"(?m)^-{3,}$", "rule");
/// assert!(RULE_RE.is_match("a\n---"));
/// ```
#[macro_export]
macro_rules! lazy_regex {
    ($pattern:expr, $msg:expr $(,)?) => {
        LazyLock::new(|| Regex::new($pattern).expect($msg))
    };
}
