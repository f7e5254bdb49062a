//! Converter from the expressiv markup dialect to HTML fragments.
//!
//! A document passes through five ordered rule stacks. Each rule rewrites
//! one match at a time until the text stops changing, and converted output is
//! parked behind `;;xsv;N;` placeholders so later rules cannot re-match it.
//! The placeholders are resolved once at the end of the run.
//!
//! ```
//! let html = expressiv::convert("# Hello\n\nSome *emphasis*.");
//! assert_eq!(html, "<h2>Hello</h2>\n<p>\nSome <em>emphasis</em>.\n</p>");
//! ```

#[macro_use]
mod macros;

mod block;
mod document;
mod fences;
pub mod grammar;
mod headings;
pub mod inline;
pub mod io;
pub mod lists;
pub mod replacer;
pub mod table;
pub mod textproc;
pub mod tokens;

pub use grammar::{Context, Grammar, Stage, convert, default_grammar};
pub use replacer::{Matcher, Rule, RuleKind, RuleMatch, RuleStack};
pub use tokens::TokenStore;
