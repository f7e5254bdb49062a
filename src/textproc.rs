//! Small string helpers shared by the rule catalogs.

/// Replace every newline with an HTML line break.
#[must_use]
pub fn nl2br(text: &str) -> String { text.replace('\n', "<br>") }

/// Remove `indent` from the start of every line that begins with it.
///
/// # Examples
///
/// ```
/// use expressiv::textproc::strip_indent;
///
/// assert_eq!(strip_indent("a\n  b\n c", "  "), "a\nb\n c");
/// ```
#[must_use]
pub fn strip_indent(text: &str, indent: &str) -> String {
    text.split('\n')
        .map(|line| line.strip_prefix(indent).unwrap_or(line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Byte offset of the end of the line containing `pos` (the next `\n`, or the
/// end of `text`).
#[must_use]
pub fn line_end(text: &str, pos: usize) -> usize {
    text[pos..].find('\n').map_or(text.len(), |i| pos + i)
}

/// Byte offset of the first line start at or after `pos`.
#[must_use]
pub fn next_line_start(text: &str, pos: usize) -> Option<usize> {
    if pos == 0 || text[..pos].ends_with('\n') {
        return Some(pos);
    }
    text[pos..].find('\n').map(|i| pos + i + 1)
}

/// Length in bytes of the run of non-newline whitespace starting at `pos`.
#[must_use]
pub fn horizontal_space_len(text: &str, pos: usize) -> usize {
    text[pos..]
        .find(|c: char| c == '\n' || !c.is_whitespace())
        .unwrap_or(text.len() - pos)
}
