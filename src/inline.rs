//! Inline rules: emphasis, links, images, e-mail addresses, mentions,
//! hashtags and superscript.
//!
//! Text the rules produce (URLs, names, nested content) is tokenized so that
//! later inline rules leave it alone; surrounding HTML stays visible so block
//! rules still see ordinary text.

use std::sync::LazyLock;

use regex::Regex;

use crate::{
    grammar::{Context, Stage},
    replacer::{Matcher, RuleMatch, RuleStack},
};

// `->url`, `->./path`, `->/path` or `->label(url)`.
static LINK_RE: LazyLock<Regex> = lazy_regex!(
    r"(?i)(?:->([a-z]+://[a-z0-9][a-z0-9\-._~:/?#\[\]@!$&'()*+,;=]*|\.?/[a-z0-9\-._~:/?#\[\]@!$&'()*+,;=]+)|->([^\n(]+)\(([a-z0-9\-._~:/?#\[\]@!$&'()*+,;=]+)\))",
    "link regex should compile"
);

static IMAGE_RE: LazyLock<Regex> = lazy_regex!(
    r"\[\[([^|\[\]<>\n]+)(?:\|([^|\[\]<>\n]*))?\]\]",
    "image regex should compile"
);

static EMAIL_RE: LazyLock<Regex> = lazy_regex!(
    r"(?i)\b[a-z0-9_.]+@[a-z0-9_.-]+\.[a-z]{2,10}\b",
    "email regex should compile"
);

static MENTION_RE: LazyLock<Regex> =
    lazy_regex!(r"(?i)@([a-z0-9_]+)", "mention regex should compile");

static HASHTAG_RE: LazyLock<Regex> =
    lazy_regex!(r"(?i)#([a-z0-9_]+)", "hashtag regex should compile");

static SUPERSCRIPT_RE: LazyLock<Regex> =
    lazy_regex!(r"\^(\([^\n]+?\)|\S+)", "superscript regex should compile");

pub(crate) fn register(stack: &mut RuleStack) {
    stack
        .add_pattern("emphasis", Emphasis, emphasis)
        .add_pattern("link", &*LINK_RE, link)
        .add_pattern("image", &*IMAGE_RE, image)
        .add_pattern("email", &*EMAIL_RE, email)
        .add_pattern("mention", &*MENTION_RE, mention)
        .add_pattern("hashtag", &*HASHTAG_RE, hashtag)
        .add_pattern("superscript", &*SUPERSCRIPT_RE, superscript);
}

/// Delimiters tried at each position, in priority order.
const DELIMITERS: [&str; 3] = ["_", "**", "*"];

/// Scanner for `_x_`, `**x**` and `*x*`.
///
/// Group 1 is the delimiter and group 2 the content. Content lies on a single
/// line, starts and ends with a non-space character, and the shortest
/// candidate wins, except that one `*` directly before the closing delimiter
/// is taken into the content when that still closes. An underscore only opens
/// emphasis at the start of a word.
#[derive(Debug, Clone, Copy)]
pub struct Emphasis;

impl Matcher for Emphasis {
    fn find_at(&self, text: &str, start: usize) -> Option<RuleMatch> {
        for (pos, ch) in text[start..].char_indices() {
            if ch != '_' && ch != '*' {
                continue;
            }
            let pos = start + pos;
            for delim in DELIMITERS {
                if !text[pos..].starts_with(delim) || (delim == "_" && !opens_word(text, pos)) {
                    continue;
                }
                let content = pos + delim.len();
                if let Some(end) = closing(text, content, delim) {
                    return Some(RuleMatch::from_spans(
                        text,
                        pos..end + delim.len(),
                        [Some(pos..content), Some(content..end)],
                    ));
                }
            }
        }
        None
    }
}

fn is_word_char(ch: char) -> bool { ch.is_ascii_alphanumeric() || ch == '_' }

fn opens_word(text: &str, pos: usize) -> bool {
    !text[..pos].chars().next_back().is_some_and(is_word_char)
}

/// Find where the content opened at `content` ends, returning the offset of
/// the closing delimiter.
fn closing(text: &str, content: usize, delim: &str) -> Option<usize> {
    let line = &text[content..crate::textproc::line_end(text, content)];
    let first = line.chars().next()?;
    if first.is_whitespace() {
        return None;
    }
    line.char_indices()
        .skip(1)
        .filter(|(_, ch)| !ch.is_whitespace())
        .find_map(|(i, ch)| close_after(line, i + ch.len_utf8(), delim))
        .or_else(|| close_after(line, first.len_utf8(), delim))
        .map(|end| content + end)
}

fn close_after(line: &str, after: usize, delim: &str) -> Option<usize> {
    let rest = &line[after..];
    if rest.starts_with('*') && rest[1..].starts_with(delim) {
        return Some(after + 1);
    }
    rest.starts_with(delim).then_some(after)
}

fn emphasis(cx: &mut Context<'_>, m: &RuleMatch) -> Option<String> {
    let tag = match m.group(1)? {
        "*" => "em",
        "**" => "strong",
        _ => "u",
    };
    let inner = cx.run(Stage::Line, m.group(2)?);
    let inner = cx.tokenize(inner);
    Some(format!("<{tag}>{inner}</{tag}>"))
}

fn link(cx: &mut Context<'_>, m: &RuleMatch) -> Option<String> {
    if let (Some(label), Some(url)) = (m.group(2), m.group(3)) {
        let url = cx.tokenize(url);
        return Some(format!("<a href=\"{url}\">{label}</a>"));
    }
    let url = cx.tokenize(m.group(1)?);
    Some(format!("<a href=\"{url}\">{url}</a>"))
}

// `[[alt|src]]` or `[[src]]`.
fn image(cx: &mut Context<'_>, m: &RuleMatch) -> Option<String> {
    let first = cx.tokenize(m.group(1)?);
    match m.group(2).filter(|src| !src.is_empty()) {
        Some(src) => {
            let src = cx.tokenize(src);
            Some(format!("<img src=\"{src}\" alt=\"{first}\" title=\"{first}\">"))
        }
        None => Some(format!("<img src=\"{first}\" alt=\"\">")),
    }
}

fn email(cx: &mut Context<'_>, m: &RuleMatch) -> Option<String> {
    let address = cx.tokenize(m.as_str());
    Some(format!("<a href=\"mailto:{address}\">{address}</a>"))
}

fn mention(cx: &mut Context<'_>, m: &RuleMatch) -> Option<String> {
    let name = cx.tokenize(m.group(1)?);
    Some(format!("<a href=\"http://twitter.com/{name}\">@{name}</a>"))
}

fn hashtag(cx: &mut Context<'_>, m: &RuleMatch) -> Option<String> {
    let tag = cx.tokenize(m.group(1)?);
    Some(format!(
        "<a href=\"http://twitter.com/search?q=%23{tag}&src=hash\">#{tag}</a>"
    ))
}

fn superscript(cx: &mut Context<'_>, m: &RuleMatch) -> Option<String> {
    let inner = cx.run(Stage::Line, m.group(1)?);
    let inner = cx.tokenize(inner);
    Some(format!("<sup>{inner}</sup>"))
}
