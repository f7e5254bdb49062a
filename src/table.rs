//! Table rows.
//!
//! A row is a line of the form `|cell|cell|`. When the next line consists
//! only of `|` and `=` characters the row is a header and renders `<th>`
//! cells. Runs of extra pipes before a cell widen it: `|a|||b|` gives `b` a
//! colspan of three. Spacing inside a cell sets its alignment:
//!
//! | Cell         | Alignment |
//! |--------------|-----------|
//! | `"text"`     | left      |
//! | `"text "`    | left      |
//! | `" text"`    | right     |
//! | `" text "`   | center    |

use std::sync::LazyLock;

use regex::Regex;

use crate::{
    grammar::Context,
    replacer::{RuleMatch, RuleStack},
};

static ROW_RE: LazyLock<Regex> = lazy_regex!(
    r"(?m)^(?:(\|[^\n]+)\|(\n\|[|=]+\|)?)$",
    "table row regex should compile"
);

pub(crate) fn register(stack: &mut RuleStack) { stack.add_pattern("row", &*ROW_RE, row); }

/// Horizontal alignment derived from a cell's surrounding spaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Right,
    Center,
}

impl Alignment {
    /// Classify an untrimmed cell.
    #[must_use]
    pub fn of(cell: &str) -> Self {
        let mut chars = cell.chars();
        let (Some(first), Some(last)) = (chars.next(), chars.next_back()) else {
            return Alignment::Left;
        };
        match (first.is_whitespace(), last.is_whitespace()) {
            (true, true) => Alignment::Center,
            (true, false) => Alignment::Right,
            (false, _) => Alignment::Left,
        }
    }

    fn style(self) -> &'static str {
        match self {
            Alignment::Left => "",
            Alignment::Right => " style=\"text-align:right\"",
            Alignment::Center => " style=\"text-align:center\"",
        }
    }
}

/// A cell of a table row before rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell<'a> {
    pub text: &'a str,
    pub colspan: usize,
}

/// Split the body of a row (everything before its closing pipe) into cells.
///
/// # Examples
///
/// ```
/// use expressiv::table::split_cells;
///
/// let cells = split_cells("|a||b");
/// assert_eq!(cells.len(), 2);
/// assert_eq!((cells[0].text, cells[0].colspan), ("a", 1));
/// assert_eq!((cells[1].text, cells[1].colspan), ("b", 2));
/// ```
#[must_use]
pub fn split_cells(body: &str) -> Vec<Cell<'_>> {
    let mut cells = Vec::new();
    let mut rest = body;
    while let Some(after_pipe) = rest.strip_prefix('|') {
        let pipes = after_pipe.len() - after_pipe.trim_start_matches('|').len();
        let after_pipes = &after_pipe[pipes..];
        let end = after_pipes.find('|').unwrap_or(after_pipes.len());
        cells.push(Cell {
            text: &after_pipes[..end],
            colspan: pipes + 1,
        });
        rest = &after_pipes[end..];
    }
    cells
}

fn render_cell(cell: &Cell<'_>, tag: &str) -> String {
    let colspan = if cell.colspan > 1 {
        format!(" colspan=\"{}\"", cell.colspan)
    } else {
        String::new()
    };
    let style = Alignment::of(cell.text).style();
    format!("<{tag}{colspan}{style}>{}</{tag}>", cell.text.trim())
}

fn row(_cx: &mut Context<'_>, m: &RuleMatch) -> Option<String> {
    let tag = if m.group(2).is_some() { "th" } else { "td" };
    let cells: String = split_cells(m.group(1)?)
        .iter()
        .map(|cell| render_cell(cell, tag))
        .collect();
    Some(format!("<tr>{cells}</tr>"))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::{Grammar, grammar::Stage};

    fn rows(text: &str) -> String {
        let grammar = Grammar::new();
        let mut cx = Context::new(&grammar);
        cx.run(Stage::Table, text)
    }

    #[rstest]
    #[case("x", Alignment::Left)]
    #[case("x ", Alignment::Left)]
    #[case(" x", Alignment::Right)]
    #[case(" x ", Alignment::Center)]
    #[case("  ", Alignment::Center)]
    #[case(" ", Alignment::Left)]
    #[case("", Alignment::Left)]
    fn classifies_alignment(#[case] cell: &str, #[case] expected: Alignment) {
        assert_eq!(Alignment::of(cell), expected);
    }

    #[test]
    fn splits_trailing_empty_cell() {
        let cells = split_cells("|a|");
        assert_eq!(
            cells,
            vec![
                Cell { text: "a", colspan: 1 },
                Cell { text: "", colspan: 1 },
            ]
        );
    }

    #[test]
    fn renders_data_row() {
        assert_eq!(
            rows("|a| right| center |"),
            concat!(
                "<tr><td>a</td>",
                r#"<td style="text-align:right">right</td>"#,
                r#"<td style="text-align:center">center</td></tr>"#
            )
        );
    }

    #[test]
    fn separator_marks_header_row() {
        assert_eq!(
            rows("|A|B|\n|===|===|\n|1|2|"),
            "<tr><th>A</th><th>B</th></tr>\n<tr><td>1</td><td>2</td></tr>"
        );
    }

    #[test]
    fn extra_pipes_widen_following_cell() {
        assert_eq!(
            rows("|a|||b|"),
            r#"<tr><td>a</td><td colspan="3">b</td></tr>"#
        );
    }
}
