//! Block rules, tried in order on the whole document after the inline pass.
//!
//! Every block renders to a single placeholder so later rules, and the
//! paragraph rule in particular, see it as already handled.

use std::sync::LazyLock;

use regex::Regex;

use crate::{
    grammar::{Context, Stage},
    headings,
    lists::Definitions,
    replacer::{Matcher, RuleMatch, RuleStack},
    textproc::{line_end, next_line_start, nl2br},
    tokens::starts_with_token,
};

static BLOCKQUOTE_RE: LazyLock<Regex> =
    lazy_regex!(r#"(?m)^"\n((?s:.+?))\n"$"#, "blockquote regex should compile");

static RULE_RE: LazyLock<Regex> =
    lazy_regex!(r"(?m)^(-{3,})$", "horizontal rule regex should compile");

static TABLE_RE: LazyLock<Regex> =
    lazy_regex!(r"(?m)^(?:\|[^\n]+\|\n?)+$", "table regex should compile");

static UNORDERED_RE: LazyLock<Regex> = lazy_regex!(
    r"(?m)^(?:^\*[^\S\n]+[^\n]+\n?)(?:^\*[^\S\n]+[^\n]+\n?|^[^\S\n]{2,}[^\n]+\n?)*$",
    "unordered list regex should compile"
);

// The first item must end in a newline.
static ORDERED_RE: LazyLock<Regex> = lazy_regex!(
    r"(?m)^(?:^[0-9]+\.(?:[^\S\n]+)[^\n]+\n)(?:^[0-9]+\.(?:[^\S\n]+)+[^\n]+\n?|^[^\S\n]{2,}[^\n]+\n?)*$",
    "ordered list regex should compile"
);

pub(crate) fn register(stack: &mut RuleStack) {
    stack
        .add_pattern("blockquote", &*BLOCKQUOTE_RE, blockquote)
        .add_pattern("horizontal-rule", &*RULE_RE, |cx, _| {
            Some(cx.tokenize("<hr>"))
        })
        .add_pattern(
            "title-with-subtitle",
            &*headings::TITLE_WITH_SUBTITLE_RE,
            headings::title_with_subtitle,
        )
        .add_pattern("title", &*headings::TITLE_RE, headings::title)
        .add_pattern("heading", &*headings::HEADING_RE, headings::heading)
        .add_pattern("table", &*TABLE_RE, table)
        .add_pattern("unordered-list", &*UNORDERED_RE, |cx, m| {
            Some(list_block(cx, "ul", m.as_str()))
        })
        .add_pattern("ordered-list", &*ORDERED_RE, |cx, m| {
            Some(list_block(cx, "ol", m.as_str()))
        })
        .add_pattern("definition-list", Definitions::List, |cx, m| {
            Some(list_block(cx, "dl", m.as_str()))
        })
        .add_pattern("paragraph", Paragraph, paragraph);
}

/// Scanner for paragraphs: the longest run of consecutive non-empty lines,
/// none of which starts with a placeholder.
#[derive(Debug, Clone, Copy)]
pub struct Paragraph;

impl Matcher for Paragraph {
    fn find_at(&self, text: &str, start: usize) -> Option<RuleMatch> {
        let mut line = next_line_start(text, start)?;
        while !opens_paragraph(text, line) {
            line = line_end(text, line) + 1;
            if line > text.len() {
                return None;
            }
        }
        let mut end = line_end(text, line);
        while end < text.len() && opens_paragraph(text, end + 1) {
            end = line_end(text, end + 1);
        }
        Some(RuleMatch::from_spans(text, line..end, []))
    }
}

fn opens_paragraph(text: &str, line: usize) -> bool {
    let rest = &text[line..];
    !rest.is_empty() && !rest.starts_with('\n') && !starts_with_token(rest)
}

fn blockquote(cx: &mut Context<'_>, m: &RuleMatch) -> Option<String> {
    let quote = nl2br(m.group(1)?);
    Some(cx.tokenize(format!("<blockquote>\n{quote}\n</blockquote>")))
}

fn table(cx: &mut Context<'_>, m: &RuleMatch) -> Option<String> {
    let rows = cx.run(Stage::Table, m.as_str());
    Some(cx.tokenize(format!("<table>\n{rows}</table>")))
}

fn list_block(cx: &mut Context<'_>, tag: &str, block: &str) -> String {
    let items = cx.run(Stage::List, block);
    cx.tokenize(format!("<{tag}>\n{items}\n</{tag}>"))
}

fn paragraph(cx: &mut Context<'_>, m: &RuleMatch) -> Option<String> {
    let body = nl2br(m.as_str());
    Some(cx.tokenize(format!("<p>\n{body}\n</p>")))
}
