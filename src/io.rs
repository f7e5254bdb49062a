//! File helpers for converting documents on disk.

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::grammar::convert;

/// Read `path` and return its HTML rendering.
///
/// # Errors
/// Returns an error if the file cannot be read as UTF-8 text.
pub fn convert_file(path: &Path) -> std::io::Result<String> {
    let text = fs::read_to_string(path)?;
    Ok(convert(&text))
}

/// Path of the HTML file written for `path`: the same name with an `.html`
/// extension.
#[must_use]
pub fn html_path(path: &Path) -> PathBuf { path.with_extension("html") }

/// Convert `path` and write the result next to it, returning the written path.
///
/// # Errors
/// Returns an error if reading the source or writing the output fails.
pub fn write_html(path: &Path) -> std::io::Result<PathBuf> {
    let html = convert_file(path)?;
    let target = html_path(path);
    fs::write(&target, html + "\n")?;
    Ok(target)
}
