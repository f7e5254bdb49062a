//! Document titles and section headings.
//!
//! A title is a line underlined with three or more `=`; the line right after
//! the underline, when present, becomes its subtitle. Section headings start
//! with one to five `#` and render one level deeper than the number of hashes,
//! leaving `<h1>` to the title.

use std::sync::LazyLock;

use regex::Regex;

use crate::{grammar::Context, replacer::RuleMatch};

pub(crate) static TITLE_WITH_SUBTITLE_RE: LazyLock<Regex> = lazy_regex!(
    r"(?m)^([^\n]+)\n={3,}\n[^\S\n]*([^\n]+)$",
    "title with subtitle regex should compile"
);

pub(crate) static TITLE_RE: LazyLock<Regex> =
    lazy_regex!(r"(?m)^([^\n]+)\n={3,}$", "title regex should compile");

pub(crate) static HEADING_RE: LazyLock<Regex> =
    lazy_regex!(r"(?m)^(#{1,5})\s+(.+?)\s*$", "heading regex should compile");

pub(crate) fn title_with_subtitle(cx: &mut Context<'_>, m: &RuleMatch) -> Option<String> {
    let (title, subtitle) = (m.group(1)?, m.group(2)?);
    Some(cx.tokenize(format!(
        "<header><h1>{title}</h1><strong>{subtitle}</strong></header>"
    )))
}

pub(crate) fn title(cx: &mut Context<'_>, m: &RuleMatch) -> Option<String> {
    let title = m.group(1)?;
    Some(cx.tokenize(format!("<header><h1>{title}</h1></header>")))
}

pub(crate) fn heading(cx: &mut Context<'_>, m: &RuleMatch) -> Option<String> {
    let level = m.group(1)?.len() + 1;
    let text = m.group(2)?;
    Some(cx.tokenize(format!("<h{level}>{text}</h{level}>")))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use crate::convert;

    #[rstest]
    #[case("# Title", "<h2>Title</h2>")]
    #[case("## Title", "<h3>Title</h3>")]
    #[case("### Title", "<h4>Title</h4>")]
    #[case("#### Title", "<h5>Title</h5>")]
    #[case("##### Title", "<h6>Title</h6>")]
    #[case("#  Spaced out  ", "<h2>Spaced out</h2>")]
    fn heading_level_is_hashes_plus_one(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(convert(input), expected);
    }

    #[test]
    fn six_hashes_are_not_a_heading() {
        assert_eq!(convert("###### Six"), "<p>\n###### Six\n</p>");
    }

    #[rstest]
    #[case("Main\n===", "<header><h1>Main</h1></header>")]
    #[case("Main\n=====\n  Sub", "<header><h1>Main</h1><strong>Sub</strong></header>")]
    #[case("Main\n===\nSub", "<header><h1>Main</h1><strong>Sub</strong></header>")]
    #[case(
        "Main\n===\n\nBody",
        "<header><h1>Main</h1></header>\n\n<p>\nBody\n</p>"
    )]
    fn renders_titles(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(convert(input), expected);
    }

    #[test]
    fn heading_text_keeps_inline_markup() {
        assert_eq!(convert("# A *b*"), "<h2>A <em>b</em></h2>");
    }
}
