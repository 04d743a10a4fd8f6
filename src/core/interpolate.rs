//! Interpolation scanner for `{{ expression }}` markers in templates.

use std::ops::Range;

pub const START_SYMBOL: &str = "{{";
pub const END_SYMBOL: &str = "}}";

const ESCAPED_START_SYMBOL: &str = r"\{\{";
const ESCAPED_END_SYMBOL: &str = r"\}\}";

/// One `{{ ... }}` span found in a text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expression {
    /// Raw text between the markers.
    pub text: String,
    /// Byte range of `text` inside the scanned input.
    pub range: Range<usize>,
}

/// Result of scanning a text for interpolations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interpolation {
    /// Unescaped literal runs, with an empty placeholder at each expression position.
    pub segments: Vec<String>,
    pub expressions: Vec<Expression>,
}

impl Interpolation {
    /// The literal value of a text without any interpolation.
    pub fn literal(&self) -> Option<&str> {
        if self.expressions.is_empty() {
            self.segments.first().map(String::as_str)
        } else {
            None
        }
    }
}

/// Replace escaped markers (`\{\{`, `\}\}`) by the markers themselves.
pub fn unescape_text(text: &str) -> String {
    text.replace(ESCAPED_START_SYMBOL, START_SYMBOL)
        .replace(ESCAPED_END_SYMBOL, END_SYMBOL)
}

/// Split `text` into literal segments and embedded expressions.
///
/// An unterminated start marker is kept as trailing literal text.
pub fn scan(text: &str) -> Interpolation {
    if !text.contains(START_SYMBOL) {
        return Interpolation {
            segments: vec![unescape_text(text)],
            expressions: Vec::new(),
        };
    }

    let mut segments = Vec::new();
    let mut expressions = Vec::new();
    let mut index = 0;

    while index < text.len() {
        let Some(start) = text[index..].find(START_SYMBOL).map(|pos| index + pos) else {
            segments.push(unescape_text(&text[index..]));
            break;
        };
        let expr_start = start + START_SYMBOL.len();
        let Some(end) = text[expr_start..].find(END_SYMBOL).map(|pos| expr_start + pos) else {
            segments.push(unescape_text(&text[index..]));
            break;
        };

        if index != start {
            segments.push(unescape_text(&text[index..start]));
        }
        expressions.push(Expression {
            text: text[expr_start..end].to_string(),
            range: expr_start..end,
        });
        segments.push(String::new());
        index = end + END_SYMBOL.len();
    }

    Interpolation {
        segments,
        expressions,
    }
}
