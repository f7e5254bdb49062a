//! Top-level document pipeline.
//!
//! Trailing whitespace is stripped, fenced code and escapes are shielded,
//! inline constructs are converted across the whole document, block
//! constructs second, and finally every placeholder is resolved.

use std::sync::LazyLock;

use regex::Regex;

use crate::{
    fences::{ESCAPE_RE, FENCE_RE, escaped_char, fenced_code},
    grammar::Stage,
    replacer::RuleStack,
};

static TRAILING_SPACE_RE: LazyLock<Regex> =
    lazy_regex!(r"(?m)[^\S\n]+$", "trailing space regex should compile");

pub(crate) fn register(stack: &mut RuleStack) {
    stack
        .add_pattern("trailing-whitespace", &*TRAILING_SPACE_RE, |_, _| {
            Some(String::new())
        })
        .add_pattern("fenced-code", &*FENCE_RE, fenced_code)
        .add_pattern("escape", &*ESCAPE_RE, escaped_char)
        .add_stage("inline", Stage::Line)
        .add_stage("blocks", Stage::Block)
        .add_transform("detokenize", |cx, text| Some(cx.detokenize(text)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Context, Grammar};

    #[test]
    fn strips_trailing_whitespace_per_line() {
        let mut stack = RuleStack::new("test");
        register(&mut stack);
        let grammar = Grammar::empty();
        let mut cx = Context::new(&grammar);
        assert_eq!(stack.exec("a  \nb\t\n  \nc ", &mut cx), "a\nb\n\nc");
    }

    #[test]
    fn carriage_returns_are_stripped() {
        assert_eq!(crate::convert("one\r\ntwo\r\n"), "<p>\none<br>two\n</p>\n");
    }

    #[test]
    fn inline_runs_before_blocks() {
        // `#tag` becomes a hashtag link before the heading rule could see it.
        let out = crate::convert("#tag");
        assert!(out.starts_with("<p>\n<a href=\"http://twitter.com/search?q=%23tag"));
    }

    #[test]
    fn empty_document_stays_empty() {
        assert_eq!(crate::convert(""), "");
    }
}
