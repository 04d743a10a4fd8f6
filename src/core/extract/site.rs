//! Where a usage key lives in its source text, so that it can be renamed in place.

use std::ops::Range;

use crate::core::data::UsageKey;
use crate::core::rewrite::edit::{TextEdit, escape_in_quotes};

/// Quote of the string literals a rename creates.
pub const DEFAULT_QUOTE: char = '\'';

/// Location of the text that produced a usage key.
///
/// Offsets are byte offsets into the text the key was extracted from (an expression, an
/// attribute value, a script file). `shifted` rebases them onto an enclosing text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySite {
    /// A string or number literal token, quotes included. A number is rewritten as a string
    /// literal quoted with `quote`.
    Literal { range: Range<usize>, quote: char },
    /// A bare identifier used as a key by a directive attribute.
    Identifier { range: Range<usize> },
    /// Raw attribute text used verbatim as a key.
    Text { range: Range<usize> },
    /// A pattern whose first literal chunk starts at `offset`, inside a literal quoted with
    /// `quote`.
    PrefixInside { offset: usize, quote: char },
    /// A pattern whose leftmost operand is dynamic and starts at `offset`. The prefix is
    /// inserted as a string literal quoted with `quote`.
    PrefixBefore { offset: usize, quote: char },
}

/// A usage key together with its site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyUsage {
    pub key: UsageKey,
    pub site: KeySite,
}

impl KeyUsage {
    pub fn new(key: UsageKey, site: KeySite) -> Self {
        Self { key, site }
    }

    pub fn shifted(self, base: usize) -> Self {
        Self {
            key: self.key,
            site: self.site.shifted(base),
        }
    }

    pub fn quoted_with(self, quote: char) -> Self {
        Self {
            key: self.key,
            site: self.site.quoted_with(quote),
        }
    }
}

impl KeySite {
    pub fn shifted(self, base: usize) -> Self {
        let shift = |range: Range<usize>| range.start + base..range.end + base;
        match self {
            KeySite::Literal { range, quote } => KeySite::Literal {
                range: shift(range),
                quote,
            },
            KeySite::Identifier { range } => KeySite::Identifier {
                range: shift(range),
            },
            KeySite::Text { range } => KeySite::Text {
                range: shift(range),
            },
            KeySite::PrefixInside { offset, quote } => KeySite::PrefixInside {
                offset: offset + base,
                quote,
            },
            KeySite::PrefixBefore { offset, quote } => KeySite::PrefixBefore {
                offset: offset + base,
                quote,
            },
        }
    }

    /// Use `quote` for the string literals this site creates, e.g. inside an attribute
    /// value delimited by the default quote.
    pub fn quoted_with(self, quote: char) -> Self {
        match self {
            KeySite::Literal { range, .. } => KeySite::Literal { range, quote },
            KeySite::PrefixBefore { offset, .. } => KeySite::PrefixBefore { offset, quote },
            site => site,
        }
    }

    /// Build the edit turning `old` into `new` at this site of `source`.
    ///
    /// Patterns can only be renamed by prefixing, so `new` must end with `old`.
    pub fn edit(&self, source: &str, old: &UsageKey, new: &UsageKey) -> Option<TextEdit> {
        if old == new {
            return None;
        }
        match self {
            KeySite::Literal { range, quote } => {
                let quote = source
                    .get(range.clone())
                    .and_then(|text| text.chars().next())
                    .filter(|c| matches!(c, '\'' | '"' | '`'))
                    .unwrap_or(*quote);
                let replacement = format!(
                    "{}{}{}",
                    quote,
                    escape_in_quotes(new.as_str(), quote),
                    quote
                );
                Some(TextEdit::replace(range.clone(), replacement))
            }
            KeySite::Identifier { range } | KeySite::Text { range } => {
                Some(TextEdit::replace(range.clone(), new.as_str()))
            }
            KeySite::PrefixInside { offset, quote } => {
                let prefix = new.as_str().strip_suffix(old.as_str())?;
                Some(TextEdit::insert(*offset, escape_in_quotes(prefix, *quote)))
            }
            KeySite::PrefixBefore { offset, quote } => {
                let prefix = new.as_str().strip_suffix(old.as_str())?;
                Some(TextEdit::insert(
                    *offset,
                    format!("{}{}{} + ", quote, escape_in_quotes(prefix, *quote), quote),
                ))
            }
        }
    }
}
