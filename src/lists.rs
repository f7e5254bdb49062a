//! List and definition-list items.
//!
//! An item is `* text` or `N. text`. Lines directly below it that are indented
//! by at least two spaces continue the item; the indentation of the first such
//! line is the item's indent, and later lines must repeat it. A continued
//! item is rendered through the block rules after removing the indent, so it
//! can hold paragraphs and nested lists. A single-line item only gets inline
//! rules.
//!
//! A definition is a `term:` line followed by an indented body:
//!
//! ```text
//! Term:
//!   Body, rendered with the block rules.
//! ```

use std::{ops::Range, sync::LazyLock};

use regex::Regex;

use crate::{
    grammar::{Context, Stage},
    replacer::{Matcher, RuleMatch, RuleStack},
    textproc::{horizontal_space_len, line_end, strip_indent},
};

static ITEM_HEAD_RE: LazyLock<Regex> = lazy_regex!(
    r"(?m)^(?:[0-9]+\.|\*)\s+([^\n]+)",
    "list item regex should compile"
);

static TERM_RE: LazyLock<Regex> = lazy_regex!(
    r"(?m)^(\S[^:.\\\n]*)\s*:",
    "definition term regex should compile"
);

pub(crate) fn register(stack: &mut RuleStack) {
    stack
        .add_pattern("item", ListItem, list_item)
        .add_pattern("definition", Definitions::Single, definition);
}

/// Scanner for one list item.
///
/// Group 1 is the item content, group 2 its continuation lines (still
/// indented) and group 3 the indent.
#[derive(Debug, Clone, Copy)]
pub struct ListItem;

impl Matcher for ListItem {
    fn find_at(&self, text: &str, start: usize) -> Option<RuleMatch> {
        let caps = ITEM_HEAD_RE.captures_at(text, start)?;
        let whole = caps.get(0)?;
        let content = caps.get(1)?;
        let Some((indent, end)) = continuation(text, content.end()) else {
            return Some(RuleMatch::from_spans(
                text,
                whole.range(),
                [Some(content.range())],
            ));
        };
        Some(RuleMatch::from_spans(
            text,
            whole.start()..end,
            [
                Some(content.start()..end),
                Some(content.end()..end),
                Some(indent),
            ],
        ))
    }
}

/// Extend an item whose first line ends at `eol` over its indented lines.
///
/// Returns the indent range and the end of the last continuation line.
fn continuation(text: &str, eol: usize) -> Option<(Range<usize>, usize)> {
    if !text[eol..].starts_with('\n') {
        return None;
    }
    let line = eol + 1;
    let indent = line..line + horizontal_space_len(text, line);
    if text[indent.clone()].chars().count() < 2 {
        return None;
    }
    let prefix = &text[indent.clone()];
    let mut end = line_end(text, indent.end);
    while text[end..].starts_with('\n') && text[end + 1..].starts_with(prefix) {
        end = line_end(text, end + 1);
    }
    Some((indent, end))
}

/// Scanner for definitions.
///
/// [`Definitions::Single`] matches one definition, capturing the term
/// (group 1), the indented body (group 2) and the indent (group 3).
/// [`Definitions::List`] matches a run of consecutive definitions as one
/// block. A list head is stricter than a single one: the colon sits on the
/// term's line and exactly one line break separates it from the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Definitions {
    Single,
    List,
}

struct Definition {
    range: Range<usize>,
    term: Range<usize>,
    body: Range<usize>,
    indent: Range<usize>,
}

impl Matcher for Definitions {
    fn find_at(&self, text: &str, start: usize) -> Option<RuleMatch> {
        let mut from = start;
        while from <= text.len() {
            let head = TERM_RE.captures_at(text, from)?;
            let head_start = head.get(0)?.start();
            let strict = *self == Definitions::List;
            let Some(first) = definition_at(text, &head, strict) else {
                from = head_start + text[head_start..].chars().next()?.len_utf8();
                continue;
            };
            if *self == Definitions::Single {
                return Some(RuleMatch::from_spans(
                    text,
                    first.range,
                    [Some(first.term), Some(first.body), Some(first.indent)],
                ));
            }
            let mut end = first.range.end;
            while let Some(next) = TERM_RE
                .captures_at(text, end)
                .filter(|caps| caps.get(0).is_some_and(|m| m.start() == end))
                .and_then(|caps| definition_at(text, &caps, true))
            {
                end = next.range.end;
            }
            return Some(RuleMatch::from_spans(text, head_start..end, []));
        }
        None
    }
}

/// Match the body following a term head, if there is one.
///
/// With `strict`, the term, colon and body may only be separated by
/// horizontal space and a single line break.
fn definition_at(text: &str, head: &regex::Captures<'_>, strict: bool) -> Option<Definition> {
    let whole = head.get(0)?;
    let term = head.get(1)?;
    let after_colon = whole.end();
    let space = text[after_colon..]
        .find(|c: char| !c.is_whitespace())
        .unwrap_or(text.len() - after_colon);
    if after_colon + space == text.len() {
        return None;
    }
    let gap = &text[after_colon..after_colon + space];
    let term_breaks = text[term.end()..after_colon].contains('\n');
    if strict && (term_breaks || gap.matches('\n').count() != 1) {
        return None;
    }
    let newline = gap.rfind('\n')?;
    let indent = after_colon + newline + 1..after_colon + space;
    if text[indent.clone()].chars().count() < 2 {
        return None;
    }
    let prefix = &text[indent.clone()];
    let mut end = with_newline(text, line_end(text, indent.end));
    while text[..end].ends_with('\n')
        && text[end..].starts_with(prefix)
        && !text[end + prefix.len()..].starts_with('\n')
        && end + prefix.len() < text.len()
    {
        end = with_newline(text, line_end(text, end + prefix.len()));
    }
    Some(Definition {
        range: whole.start()..end,
        term: term.range(),
        body: indent.start..end,
        indent,
    })
}

fn with_newline(text: &str, eol: usize) -> usize {
    if text[eol..].starts_with('\n') { eol + 1 } else { eol }
}

fn list_item(cx: &mut Context<'_>, m: &RuleMatch) -> Option<String> {
    let content = m.group(1)?;
    let inner = match m.group(3) {
        Some(indent) => cx.run(Stage::Block, &strip_indent(content, indent)),
        None => cx.run(Stage::Line, content),
    };
    Some(format!("<li>\n{inner}\n</li>"))
}

fn definition(cx: &mut Context<'_>, m: &RuleMatch) -> Option<String> {
    let term = m.group(1)?;
    let body = strip_indent(m.group(2)?, m.group(3)?);
    let body = cx.run(Stage::Block, &body);
    let token = cx.tokenize(format!("<dt>{term}</dt>\n<dd>\n{body}</dd>"));
    Some(format!("{token}\n"))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::{Grammar, convert};

    #[test]
    fn item_collects_indented_lines() {
        let text = "* a\n  b\n  c\n* d";
        let found = ListItem.find_at(text, 0).expect("item");
        assert_eq!(found.as_str(), "* a\n  b\n  c");
        assert_eq!(found.group(1), Some("a\n  b\n  c"));
        assert_eq!(found.group(2), Some("\n  b\n  c"));
        assert_eq!(found.group(3), Some("  "));
    }

    #[test]
    fn deeper_indent_must_be_repeated() {
        let text = "1. a\n    b\n  c";
        let found = ListItem.find_at(text, 0).expect("item");
        assert_eq!(found.group(1), Some("a\n    b"));
        assert_eq!(found.group(3), Some("    "));
    }

    #[test]
    fn single_line_item_has_no_indent() {
        let found = ListItem.find_at("1. one\n2. two", 0).expect("item");
        assert_eq!(found.as_str(), "1. one");
        assert_eq!(found.group(2), None);
        assert_eq!(found.group(3), None);
    }

    #[test]
    fn definition_captures_term_body_and_indent() {
        let text = "Term:\n  Body\n  more\nNext:\n  x";
        let found = Definitions::Single.find_at(text, 0).expect("definition");
        assert_eq!(found.as_str(), "Term:\n  Body\n  more\n");
        assert_eq!(found.group(1), Some("Term"));
        assert_eq!(found.group(2), Some("  Body\n  more\n"));
        assert_eq!(found.group(3), Some("  "));

        let list = Definitions::List.find_at(text, 0).expect("definition list");
        assert_eq!(list.as_str(), text);
    }

    #[test]
    fn definition_requires_indented_body() {
        assert!(Definitions::Single.find_at("Term:\nBody", 0).is_none());
        assert!(Definitions::Single.find_at("Term:\n \tx", 0).is_some());
        assert!(Definitions::Single.find_at("Term:", 0).is_none());
        assert!(Definitions::Single.find_at("a.b:\n  x", 0).is_none());
    }

    #[rstest]
    #[case("Term:\n\n  Body")]
    #[case("Term\n:\n  Body")]
    fn list_head_needs_one_line_break(#[case] text: &str) {
        assert!(Definitions::List.find_at(text, 0).is_none());
        assert!(Definitions::Single.find_at(text, 0).is_some());
    }

    #[rstest]
    #[case("Term:\n\n  Body", "<p>\nTerm:\n</p>\n\n<p>\n  Body\n</p>")]
    #[case("Term\n:\n  Body", "<p>\nTerm<br>:<br>  Body\n</p>")]
    #[case("Term :  \n  Body", "<dl>\n<dt>Term </dt>\n<dd>\n<p>\nBody\n</p></dd>\n\n</dl>")]
    fn block_level_definition_heads(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(convert(input), expected);
    }

    #[test]
    fn definition_list_stops_at_loose_term() {
        let text = "A:\n  one\nB:\n\n  two";
        let list = Definitions::List.find_at(text, 0).expect("definition list");
        assert_eq!(list.as_str(), "A:\n  one\n");
    }

    #[test]
    fn definition_skips_failed_heads() {
        let text = "No:\nbody\nYes:\n  body";
        let found = Definitions::Single.find_at(text, 0).expect("definition");
        assert_eq!(found.group(1), Some("Yes"));
    }

    #[test]
    fn continued_item_is_rendered_as_blocks() {
        let grammar = Grammar::new();
        let mut cx = Context::new(&grammar);
        let out = cx.run(Stage::List, "* one\n  two\n* three");
        assert_eq!(
            cx.detokenize(&out),
            "<li>\n<p>\none<br>two\n</p>\n</li>\n<li>\nthree\n</li>"
        );
    }

    #[test]
    fn definition_list_renders_terms() {
        assert_eq!(
            convert("Term:\n  Body text"),
            "<dl>\n<dt>Term</dt>\n<dd>\n<p>\nBody text\n</p></dd>\n\n</dl>"
        );
    }
}
