//! Placeholder tokens shielding converted text from later rules.
//!
//! A token is the string `;;xsv;<n>;`, where `n` is the sequence number the
//! [`TokenStore`] handed out. Rules replace finished HTML (or text that must
//! stay literal) with a token, and the document stage resolves every token
//! once all rules have run.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Prefix shared by every placeholder token.
pub const TOKEN_MARKER: &str = ";;xsv;";

static TOKEN_RE: LazyLock<Regex> =
    lazy_regex!(r";;xsv;(\d+);", "token pattern regex should compile");

/// Append-only arena mapping placeholder tokens to the text they replaced.
///
/// One store lives for exactly one conversion, so concurrent conversions never
/// observe each other's placeholders.
///
/// # Examples
///
/// ```
/// use expressiv::TokenStore;
///
/// let mut store = TokenStore::new();
/// let inner = store.tokenize("<em>hi</em>");
/// let outer = store.tokenize(format!("<p>{inner}</p>"));
/// assert_eq!(store.detokenize(&outer), "<p><em>hi</em></p>");
/// ```
#[derive(Debug, Default, Clone)]
pub struct TokenStore {
    values: Vec<String>,
}

impl TokenStore {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Store `value` and return the freshly minted token standing in for it.
    pub fn tokenize(&mut self, value: impl Into<String>) -> String {
        let id = self.values.len();
        self.values.push(value.into());
        format!("{TOKEN_MARKER}{id};")
    }

    /// Replace every known token in `text` with its fully resolved value.
    ///
    /// Values may contain further tokens; those are resolved first. Text that
    /// merely looks like a token but was never minted is left untouched.
    #[must_use]
    pub fn detokenize(&self, text: &str) -> String { self.resolve(text, self.values.len()) }

    /// Look up the raw value stored for `token`, without resolving it.
    #[must_use]
    pub fn get(&self, token: &str) -> Option<&str> {
        let id = parse_token(token)?;
        self.values.get(id).map(String::as_str)
    }

    /// Number of tokens minted so far.
    #[must_use]
    pub fn len(&self) -> usize { self.values.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.values.is_empty() }

    // A value stored under token `n` can only embed tokens minted before it,
    // so resolution below `limit` always terminates.
    fn resolve(&self, text: &str, limit: usize) -> String {
        if !text.contains(TOKEN_MARKER) {
            return text.to_string();
        }
        TOKEN_RE
            .replace_all(text, |caps: &Captures<'_>| {
                match caps[1].parse::<usize>() {
                    Ok(id) if id < limit => self.resolve(&self.values[id], id),
                    _ => caps[0].to_string(),
                }
            })
            .into_owned()
    }
}

fn parse_token(token: &str) -> Option<usize> {
    token
        .strip_prefix(TOKEN_MARKER)?
        .strip_suffix(';')
        .filter(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))?
        .parse()
        .ok()
}

/// Returns `true` when `text` begins with a placeholder token.
#[must_use]
pub fn starts_with_token(text: &str) -> bool {
    let Some(rest) = text.strip_prefix(TOKEN_MARKER) else {
        return false;
    };
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    digits > 0 && rest.as_bytes().get(digits) == Some(&b';')
}
