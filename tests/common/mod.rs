//! Utility helpers shared across integration tests.

use std::{
    fs,
    path::{Path, PathBuf},
};

use html5ever::{driver::ParseOpts, parse_document, tendril::TendrilSink};
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// Build a document from a list of lines joined with `\n`.
///
/// This macro keeps multi-line inputs readable in test bodies.
macro_rules! doc {
    ($($line:expr),* $(,)?) => {
        [$($line),*].join("\n")
    };
}

/// Remove all whitespace, the way fixture outputs are compared.
pub fn squash(text: &str) -> String { text.chars().filter(|c| !c.is_whitespace()).collect() }

/// Parse an HTML fragment and list the path of every element below `<body>`,
/// in document order, as `parent>child` tag chains.
pub fn element_paths(html: &str) -> Vec<String> {
    let dom: RcDom = parse_document(RcDom::default(), ParseOpts::default()).one(html);
    let mut paths = Vec::new();
    if let Some(body) = find_element(&dom.document, "body") {
        for child in body.children.borrow().iter() {
            collect_paths(child, "", &mut paths);
        }
    }
    paths
}

fn find_element(handle: &Handle, tag: &str) -> Option<Handle> {
    if let NodeData::Element { name, .. } = &handle.data {
        if name.local.as_ref() == tag {
            return Some(handle.clone());
        }
    }
    handle
        .children
        .borrow()
        .iter()
        .find_map(|child| find_element(child, tag))
}

fn collect_paths(handle: &Handle, prefix: &str, paths: &mut Vec<String>) {
    let NodeData::Element { name, .. } = &handle.data else {
        return;
    };
    let path = if prefix.is_empty() {
        name.local.to_string()
    } else {
        format!("{prefix}>{}", name.local.as_ref())
    };
    paths.push(path.clone());
    for child in handle.children.borrow().iter() {
        collect_paths(child, &path, paths);
    }
}

/// Write `content` to `name` inside `dir`, returning the full path.
pub fn write_doc(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("failed to write test document");
    path
}

/// Run the `expressiv` binary with `args` and capture its output.
pub fn run_cli_with_args(args: &[&str]) -> std::process::Output {
    assert_cmd::Command::cargo_bin("expressiv")
        .expect("failed to create cargo command for expressiv")
        .args(args)
        .output()
        .expect("failed to run expressiv")
}
