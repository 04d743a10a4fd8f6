//! Classification of template expressions into usage keys.
//!
//! A key is recognised when the translate function is applied to a value, either as a call
//! (`translate('key')`) or as a filter (`'key' | translate`). Concatenations of literals and
//! runtime values produce wildcard patterns.

use crate::core::data::{KeyPart, UsageKey};
use crate::core::extract::site::{DEFAULT_QUOTE, KeySite, KeyUsage};
use crate::core::parsers::expression::{Expr, ExprKind, Literal, parse_program};

pub const DEFAULT_FILTER: &str = "translate";

/// `ng-repeat`-style bindings (`item in items`) never hold keys.
const LOOP_BINDING: &str = " in ";

pub struct ExpressionClassifier<'a> {
    filter_name: &'a str,
}

impl Default for ExpressionClassifier<'static> {
    fn default() -> Self {
        Self::new(DEFAULT_FILTER)
    }
}

impl<'a> ExpressionClassifier<'a> {
    pub fn new(filter_name: &'a str) -> Self {
        Self { filter_name }
    }

    /// Keys and their sites for one expression. Sites are relative to `expression`.
    ///
    /// An expression that fails to parse yields nothing.
    pub fn classify(&self, expression: &str, is_directive: bool) -> Vec<KeyUsage> {
        if expression.contains(LOOP_BINDING) {
            return Vec::new();
        }
        let Ok(program) = parse_program(expression) else {
            return Vec::new();
        };

        let mut usages = Vec::new();
        for statement in &program {
            if is_directive && let ExprKind::Identifier(name) = &statement.kind {
                usages.push(KeyUsage::new(
                    UsageKey::new(name.as_str()),
                    KeySite::Identifier {
                        range: statement.span.clone(),
                    },
                ));
            }
            self.visit(expression, statement, &mut usages);
        }
        usages
    }

    fn visit(&self, source: &str, expr: &Expr, usages: &mut Vec<KeyUsage>) {
        if let ExprKind::Call { callee, args, .. } = &expr.kind
            && callee.as_identifier() == Some(self.filter_name)
            && let Some(usage) = args.first().and_then(|arg| key_from_argument(source, arg))
        {
            usages.push(usage);
        }
        for child in expr.children() {
            self.visit(source, child, usages);
        }
    }
}

/// Keys referenced by `expression`, using the default filter name.
pub fn classify(expression: &str, is_directive: bool) -> Vec<UsageKey> {
    ExpressionClassifier::default()
        .classify(expression, is_directive)
        .into_iter()
        .map(|usage| usage.key)
        .collect()
}

fn key_from_argument(source: &str, arg: &Expr) -> Option<KeyUsage> {
    match &arg.kind {
        ExprKind::Literal(Literal::String(value)) | ExprKind::Literal(Literal::Number(value)) => {
            Some(KeyUsage::new(
                UsageKey::new(value.as_str()),
                KeySite::Literal {
                    range: literal_range(source, arg),
                    quote: DEFAULT_QUOTE,
                },
            ))
        }
        _ if arg.is_concatenation() => {
            let mut parts = Vec::new();
            collect_parts(arg, &mut parts);
            let key = UsageKey::from_parts(&parts);
            if key.is_empty() {
                return None;
            }
            Some(KeyUsage::new(key, prefix_site(source, arg)))
        }
        _ => None,
    }
}

/// Flatten a `+` chain into key parts. Only literal operands keep their text.
fn collect_parts(expr: &Expr, parts: &mut Vec<KeyPart>) {
    match &expr.kind {
        ExprKind::Binary {
            op: "+",
            left,
            right,
        } => {
            collect_parts(left, parts);
            collect_parts(right, parts);
        }
        ExprKind::Literal(Literal::String(value)) | ExprKind::Literal(Literal::Number(value)) => {
            parts.push(KeyPart::Literal(value.clone()))
        }
        _ => parts.push(KeyPart::Dynamic),
    }
}

/// Where a prefix goes for a concatenation: inside its leftmost string literal when there is
/// one, otherwise in front of the whole chain.
fn prefix_site(source: &str, concatenation: &Expr) -> KeySite {
    let mut leftmost = concatenation;
    while let ExprKind::Binary {
        op: "+", left, ..
    } = &leftmost.kind
    {
        leftmost = &**left;
    }

    if let ExprKind::Literal(Literal::String(_)) = &leftmost.kind
        && let Some(text) = source.get(leftmost.span.clone())
        && let Some((pos, quote)) = text.char_indices().find(|(_, c)| *c == '\'' || *c == '"')
    {
        return KeySite::PrefixInside {
            offset: leftmost.span.start + pos + quote.len_utf8(),
            quote,
        };
    }

    KeySite::PrefixBefore {
        offset: concatenation.span.start,
        quote: DEFAULT_QUOTE,
    }
}

/// Range of the literal token itself, without enclosing parentheses.
fn literal_range(source: &str, literal: &Expr) -> std::ops::Range<usize> {
    let Some(text) = source.get(literal.span.clone()) else {
        return literal.span.clone();
    };
    let inner = text.trim_start_matches(|c: char| c == '(' || c.is_whitespace());
    let start = literal.span.start + (text.len() - inner.len());
    let inner = inner.trim_end_matches(|c: char| c == ')' || c.is_whitespace());
    start..start + inner.len()
}
