//! Exact output shapes, pinned with inline snapshots.

use expressiv::convert;
use insta::assert_debug_snapshot;

#[test]
fn paragraph_shape() {
    assert_debug_snapshot!(convert("Hello\nworld"), @r#""<p>\nHello<br>world\n</p>""#);
}

#[test]
fn unordered_list_shape() {
    assert_debug_snapshot!(
        convert("* one\n  two\n* three"),
        @r#""<ul>\n<li>\n<p>\none<br>two\n</p>\n</li>\n<li>\nthree\n</li>\n</ul>""#
    );
}

#[test]
fn ordered_list_shape() {
    assert_debug_snapshot!(
        convert("1. one\n2. two\n"),
        @r#""<ol>\n<li>\none\n</li>\n<li>\ntwo\n</li>\n\n</ol>""#
    );
}

#[test]
fn table_shape() {
    assert_debug_snapshot!(
        convert("|a|||b|"),
        @r#""<table>\n<tr><td>a</td><td colspan=\"3\">b</td></tr></table>""#
    );
}

#[test]
fn title_shape() {
    assert_debug_snapshot!(
        convert("Doc\n===\nsub"),
        @r#""<header><h1>Doc</h1><strong>sub</strong></header>""#
    );
}

#[test]
fn image_shape() {
    assert_debug_snapshot!(
        convert("[[A cat|cat.png]]"),
        @r#""<p>\n<img src=\"cat.png\" alt=\"A cat\" title=\"A cat\">\n</p>""#
    );
}

#[test]
fn superscript_shape() {
    assert_debug_snapshot!(convert("2^(10)"), @r#""<p>\n2<sup>(10)</sup>\n</p>""#);
}
