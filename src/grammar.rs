//! The five rule stacks and the per-conversion context threaded through them.

use std::sync::LazyLock;

use tracing::debug;

use crate::{
    block,
    document,
    inline,
    lists,
    replacer::RuleStack,
    table,
    tokens::TokenStore,
};

/// Identifies one of the grammar's rule stacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Top-level pipeline: whitespace, code, escapes, then inline and block passes.
    Document,
    /// Structural constructs spanning whole lines.
    Block,
    /// Rows inside a matched table.
    Table,
    /// Items inside a matched list or definition list.
    List,
    /// Constructs within a line.
    Line,
}

impl Stage {
    pub const ALL: [Stage; 5] = [
        Stage::Document,
        Stage::Block,
        Stage::Table,
        Stage::List,
        Stage::Line,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Stage::Document => "document",
            Stage::Block => "block",
            Stage::Table => "table",
            Stage::List => "list",
            Stage::Line => "line",
        }
    }
}

/// A complete set of rule stacks.
///
/// Build one with [`Grammar::new`], append custom rules through
/// [`Grammar::stack_mut`], then share it freely: conversions only borrow the
/// grammar immutably and keep their placeholders in a per-call [`Context`].
///
/// # Examples
///
/// ```
/// use expressiv::{Grammar, Stage};
///
/// let mut grammar = Grammar::new();
/// grammar
///     .stack_mut(Stage::Line)
///     .add_regex("strike", r"~~([^~\n]+)~~", |_, m| {
///         Some(format!("<del>{}</del>", m.group(1)?))
///     })
///     .expect("valid pattern");
/// assert_eq!(grammar.convert("~~gone~~"), "<p>\n<del>gone</del>\n</p>");
/// ```
#[derive(Debug)]
pub struct Grammar {
    document: RuleStack,
    block: RuleStack,
    table: RuleStack,
    list: RuleStack,
    line: RuleStack,
}

impl Grammar {
    /// Build the default expressiv grammar.
    #[must_use]
    pub fn new() -> Self {
        let mut grammar = Self::empty();
        document::register(&mut grammar.document);
        block::register(&mut grammar.block);
        table::register(&mut grammar.table);
        lists::register(&mut grammar.list);
        inline::register(&mut grammar.line);
        grammar
    }

    /// Build a grammar whose five stacks hold no rules.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            document: RuleStack::new(Stage::Document.name()),
            block: RuleStack::new(Stage::Block.name()),
            table: RuleStack::new(Stage::Table.name()),
            list: RuleStack::new(Stage::List.name()),
            line: RuleStack::new(Stage::Line.name()),
        }
    }

    #[must_use]
    pub fn stack(&self, stage: Stage) -> &RuleStack {
        match stage {
            Stage::Document => &self.document,
            Stage::Block => &self.block,
            Stage::Table => &self.table,
            Stage::List => &self.list,
            Stage::Line => &self.line,
        }
    }

    pub fn stack_mut(&mut self, stage: Stage) -> &mut RuleStack {
        match stage {
            Stage::Document => &mut self.document,
            Stage::Block => &mut self.block,
            Stage::Table => &mut self.table,
            Stage::List => &mut self.list,
            Stage::Line => &mut self.line,
        }
    }

    /// Convert an expressiv document into an HTML fragment.
    #[must_use]
    pub fn convert(&self, input: &str) -> String {
        let mut cx = Context::new(self);
        let output = cx.run(Stage::Document, input);
        debug!(
            input_len = input.len(),
            output_len = output.len(),
            tokens = cx.tokens().len(),
            "converted document"
        );
        output
    }
}

impl Default for Grammar {
    fn default() -> Self { Self::new() }
}

static DEFAULT_GRAMMAR: LazyLock<Grammar> = LazyLock::new(Grammar::new);

/// The process-wide default grammar, built on first use.
#[must_use]
pub fn default_grammar() -> &'static Grammar { &DEFAULT_GRAMMAR }

/// Convert an expressiv document with the default grammar.
///
/// # Examples
///
/// ```
/// assert_eq!(expressiv::convert("# Title"), "<h2>Title</h2>");
/// ```
#[must_use]
pub fn convert(input: &str) -> String { DEFAULT_GRAMMAR.convert(input) }

/// State for one conversion: the grammar in use and the placeholder arena.
#[derive(Debug)]
pub struct Context<'g> {
    grammar: &'g Grammar,
    tokens: TokenStore,
}

impl<'g> Context<'g> {
    #[must_use]
    pub fn new(grammar: &'g Grammar) -> Self {
        Self {
            grammar,
            tokens: TokenStore::new(),
        }
    }

    /// Run the stack for `stage` over `text`.
    pub fn run(&mut self, stage: Stage, text: &str) -> String {
        let grammar = self.grammar;
        grammar.stack(stage).exec(text, self)
    }

    /// Hide `value` behind a fresh placeholder token.
    pub fn tokenize(&mut self, value: impl Into<String>) -> String { self.tokens.tokenize(value) }

    /// Resolve every placeholder in `text`.
    #[must_use]
    pub fn detokenize(&self, text: &str) -> String { self.tokens.detokenize(text) }

    #[must_use]
    pub fn tokens(&self) -> &TokenStore { &self.tokens }

    #[must_use]
    pub fn grammar(&self) -> &'g Grammar { self.grammar }
}
