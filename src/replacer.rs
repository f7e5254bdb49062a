//! Ordered rewrite rules and the stack that executes them.
//!
//! A [`RuleStack`] runs its rules strictly in registration order. Pattern
//! rules rewrite one match at a time and re-scan from the start of the text
//! until the pattern no longer matches; transform rules rewrite the whole text
//! in a single call. Every built-in pattern rule replaces its match with text
//! the same pattern cannot match again, which is what makes the
//! repeat-until-stable loop terminate.

use std::ops::Range;

use regex::Regex;
use tracing::trace;

use crate::grammar::{Context, Stage};

/// Callback producing the replacement for one match.
///
/// Returning `None` leaves the matched text in place.
pub type ReplaceFn = dyn Fn(&mut Context<'_>, &RuleMatch) -> Option<String> + Send + Sync;

/// Callback rewriting the whole text at once.
///
/// Returning `None` or an empty string keeps the previous text.
pub type TransformFn = dyn Fn(&mut Context<'_>, &str) -> Option<String> + Send + Sync;

/// A located match together with its capture groups.
///
/// Group `0` is the whole match; groups that did not participate are `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMatch {
    range: Range<usize>,
    groups: Vec<Option<String>>,
}

impl RuleMatch {
    /// Build a match over `text` from byte ranges.
    ///
    /// `groups` lists capture groups starting at group `1`.
    #[must_use]
    pub fn from_spans<I>(text: &str, range: Range<usize>, groups: I) -> Self
    where
        I: IntoIterator<Item = Option<Range<usize>>>,
    {
        let mut all = vec![Some(text[range.clone()].to_string())];
        all.extend(
            groups
                .into_iter()
                .map(|span| span.map(|span| text[span].to_string())),
        );
        Self { range, groups: all }
    }

    /// Byte range of the whole match in the scanned text.
    #[must_use]
    pub fn range(&self) -> Range<usize> { self.range.clone() }

    /// The whole matched text.
    #[must_use]
    pub fn as_str(&self) -> &str { self.groups[0].as_deref().unwrap_or_default() }

    /// Capture group `index`, if it participated in the match.
    #[must_use]
    pub fn group(&self, index: usize) -> Option<&str> {
        self.groups.get(index).and_then(Option::as_deref)
    }
}

/// Locates the leftmost match at or after a byte offset.
///
/// Implemented for [`Regex`] and for hand-written scanners covering patterns
/// that need back-references or look-ahead.
pub trait Matcher: Send + Sync {
    /// Find the leftmost match starting at or after `start`.
    ///
    /// `start` is always a char boundary no greater than `text.len()`.
    fn find_at(&self, text: &str, start: usize) -> Option<RuleMatch>;
}

impl Matcher for Regex {
    fn find_at(&self, text: &str, start: usize) -> Option<RuleMatch> {
        let caps = self.captures_at(text, start)?;
        let whole = caps.get(0)?;
        Some(RuleMatch::from_spans(
            text,
            whole.range(),
            caps.iter().skip(1).map(|group| group.map(|m| m.range())),
        ))
    }
}

impl<M: Matcher + ?Sized> Matcher for &M {
    fn find_at(&self, text: &str, start: usize) -> Option<RuleMatch> {
        (**self).find_at(text, start)
    }
}

/// What a rule does when its stack runs.
pub enum RuleKind {
    /// Rewrite each match of `matcher`, one per pass, until none remain.
    Pattern {
        matcher: Box<dyn Matcher>,
        replace: Box<ReplaceFn>,
    },
    /// Rewrite the whole text once.
    Transform(Box<TransformFn>),
}

/// A named rewrite rule. Names only appear in diagnostics.
pub struct Rule {
    name: &'static str,
    kind: RuleKind,
}

impl Rule {
    #[must_use]
    pub fn name(&self) -> &'static str { self.name }

    #[must_use]
    pub fn kind(&self) -> &RuleKind { &self.kind }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self.kind {
            RuleKind::Pattern { .. } => "pattern",
            RuleKind::Transform(_) => "transform",
        };
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("kind", &kind)
            .finish()
    }
}

/// Append-only, ordered list of rules.
#[derive(Debug, Default)]
pub struct RuleStack {
    name: &'static str,
    rules: Vec<Rule>,
}

impl RuleStack {
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            rules: Vec::new(),
        }
    }

    /// Append a pattern rule.
    pub fn add_pattern<M, F>(&mut self, name: &'static str, matcher: M, replace: F) -> &mut Self
    where
        M: Matcher + 'static,
        F: Fn(&mut Context<'_>, &RuleMatch) -> Option<String> + Send + Sync + 'static,
    {
        self.rules.push(Rule {
            name,
            kind: RuleKind::Pattern {
                matcher: Box::new(matcher),
                replace: Box::new(replace),
            },
        });
        self
    }

    /// Compile `pattern` and append it as a pattern rule.
    ///
    /// # Errors
    /// Returns an error if `pattern` is not a valid regular expression.
    pub fn add_regex<F>(
        &mut self,
        name: &'static str,
        pattern: &str,
        replace: F,
    ) -> Result<&mut Self, regex::Error>
    where
        F: Fn(&mut Context<'_>, &RuleMatch) -> Option<String> + Send + Sync + 'static,
    {
        let regex = Regex::new(pattern)?;
        Ok(self.add_pattern(name, regex, replace))
    }

    /// Append a whole-text transform.
    pub fn add_transform<F>(&mut self, name: &'static str, transform: F) -> &mut Self
    where
        F: Fn(&mut Context<'_>, &str) -> Option<String> + Send + Sync + 'static,
    {
        self.rules.push(Rule {
            name,
            kind: RuleKind::Transform(Box::new(transform)),
        });
        self
    }

    /// Append a transform that runs another stack over the whole text.
    pub fn add_stage(&mut self, name: &'static str, stage: Stage) -> &mut Self {
        self.add_transform(name, move |cx, text| Some(cx.run(stage, text)))
    }

    #[must_use]
    pub fn name(&self) -> &'static str { self.name }

    #[must_use]
    pub fn rules(&self) -> &[Rule] { &self.rules }

    #[must_use]
    pub fn len(&self) -> usize { self.rules.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.rules.is_empty() }

    /// Run every rule, in order, over `text`.
    #[must_use]
    pub fn exec(&self, text: &str, cx: &mut Context<'_>) -> String {
        let mut text = text.to_string();
        for rule in &self.rules {
            match &rule.kind {
                RuleKind::Transform(transform) => {
                    if let Some(next) = transform(cx, &text).filter(|next| !next.is_empty()) {
                        text = next;
                    }
                }
                RuleKind::Pattern { matcher, replace } => {
                    let rewrites =
                        rewrite_until_stable(&mut text, matcher.as_ref(), replace.as_ref(), cx);
                    if rewrites > 0 {
                        trace!(stack = self.name, rule = rule.name, rewrites, "rule applied");
                    }
                }
            }
        }
        text
    }
}

/// Rewrite the first match of `matcher` until no match remains.
///
/// Declined matches (a `None` replacement, or one equal to the matched text)
/// are skipped so the loop cannot spin on them.
fn rewrite_until_stable(
    text: &mut String,
    matcher: &dyn Matcher,
    replace: &ReplaceFn,
    cx: &mut Context<'_>,
) -> usize {
    let mut rewrites = 0;
    let mut from = 0;
    while from <= text.len() {
        let Some(found) = matcher.find_at(text, from) else {
            break;
        };
        match replace(cx, &found) {
            Some(replacement) if replacement != found.as_str() => {
                text.replace_range(found.range(), &replacement);
                rewrites += 1;
                from = 0;
            }
            _ => from = resume_after(text, &found.range()),
        }
    }
    rewrites
}

fn resume_after(text: &str, range: &Range<usize>) -> usize {
    if range.end > range.start {
        return range.end;
    }
    text[range.start..]
        .chars()
        .next()
        .map_or(text.len() + 1, |ch| range.start + ch.len_utf8())
}
