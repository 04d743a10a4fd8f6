//! Tokenizer for AngularJS template expressions.

use std::ops::Range;

use anyhow::{Result, bail};

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Identifier(String),
    /// String literal with escapes resolved.
    String(String),
    /// Number literal source text.
    Number(String),
    Operator(&'static str),
    Character(char),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Range<usize>,
}

impl Token {
    pub fn is_character(&self, ch: char) -> bool {
        self.kind == TokenKind::Character(ch)
    }

    pub fn is_operator(&self, op: &str) -> bool {
        matches!(self.kind, TokenKind::Operator(o) if o == op)
    }
}

/// Longest operators first so that `===` wins over `==` and `=`.
const OPERATORS: &[&str] = &[
    "===", "!==", "==", "!=", "<=", ">=", "&&", "||", "+", "-", "*", "/", "%", "<", ">", "!",
    "=", "|",
];

const CHARACTERS: &[char] = &['(', ')', '[', ']', '{', '}', '.', ',', ';', ':', '?'];

fn is_identifier_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_' || ch == '$'
}

fn is_identifier_part(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || ch == '$'
}

pub fn tokenize(text: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let bytes = text.as_bytes();
    let mut index = 0;

    while index < text.len() {
        let Some(ch) = text[index..].chars().next() else {
            break;
        };

        if ch.is_whitespace() {
            index += ch.len_utf8();
            continue;
        }

        let start = index;

        if ch == '\'' || ch == '"' {
            let (value, end) = read_string(text, index, ch)?;
            tokens.push(Token {
                kind: TokenKind::String(value),
                span: start..end,
            });
            index = end;
            continue;
        }

        let next_is_digit = bytes.get(index + 1).is_some_and(|b| b.is_ascii_digit());
        if ch.is_ascii_digit() || (ch == '.' && next_is_digit) {
            let end = read_number(text, index);
            tokens.push(Token {
                kind: TokenKind::Number(text[start..end].to_string()),
                span: start..end,
            });
            index = end;
            continue;
        }

        if is_identifier_start(ch) {
            let end = text[index..]
                .char_indices()
                .find(|(_, c)| !is_identifier_part(*c))
                .map(|(pos, _)| index + pos)
                .unwrap_or(text.len());
            tokens.push(Token {
                kind: TokenKind::Identifier(text[start..end].to_string()),
                span: start..end,
            });
            index = end;
            continue;
        }

        if CHARACTERS.contains(&ch) {
            tokens.push(Token {
                kind: TokenKind::Character(ch),
                span: start..start + 1,
            });
            index += 1;
            continue;
        }

        if let Some(op) = OPERATORS.iter().find(|op| text[index..].starts_with(**op)) {
            tokens.push(Token {
                kind: TokenKind::Operator(*op),
                span: start..start + op.len(),
            });
            index += op.len();
            continue;
        }

        bail!("Unexpected character '{}' at column {}", ch, index);
    }

    Ok(tokens)
}

/// Read a quoted string starting at `start`, returning its value and the index after the
/// closing quote.
fn read_string(text: &str, start: usize, quote: char) -> Result<(String, usize)> {
    let mut value = String::new();
    let mut chars = text[start + 1..].char_indices();

    while let Some((pos, ch)) = chars.next() {
        if ch == quote {
            return Ok((value, start + 1 + pos + ch.len_utf8()));
        }
        if ch != '\\' {
            value.push(ch);
            continue;
        }
        let Some((_, escaped)) = chars.next() else {
            break;
        };
        match escaped {
            'n' => value.push('\n'),
            'f' => value.push('\u{000C}'),
            'r' => value.push('\r'),
            't' => value.push('\t'),
            'v' => value.push('\u{000B}'),
            'u' => {
                let hex: String = chars.by_ref().take(4).map(|(_, c)| c).collect();
                let code = u32::from_str_radix(&hex, 16)
                    .ok()
                    .and_then(char::from_u32);
                match code {
                    Some(c) => value.push(c),
                    None => bail!("Invalid unicode escape [\\u{}]", hex),
                }
            }
            other => value.push(other),
        }
    }

    bail!("Unterminated quote starting at column {}", start)
}

fn read_number(text: &str, start: usize) -> usize {
    let bytes = text.as_bytes();
    let mut index = start;
    let mut seen_exponent = false;

    while index < bytes.len() {
        let b = bytes[index];
        if b.is_ascii_digit() || b == b'.' {
            index += 1;
        } else if (b == b'e' || b == b'E') && !seen_exponent {
            seen_exponent = true;
            index += 1;
            if index < bytes.len() && (bytes[index] == b'+' || bytes[index] == b'-') {
                index += 1;
            }
        } else {
            break;
        }
    }

    index
}

#[cfg(test)]
mod tests {
    use crate::core::parsers::expression::lexer::*;

    fn kinds(text: &str) -> Vec<TokenKind> {
        tokenize(text)
            .unwrap()
            .into_iter()
            .map(|token| token.kind)
            .collect()
    }

    #[test]
    fn test_tokenize_filter_expression() {
        assert_eq!(
            kinds("'link' | translate"),
            vec![
                TokenKind::String("link".to_string()),
                TokenKind::Operator("|"),
                TokenKind::Identifier("translate".to_string()),
            ]
        );
    }

    #[test]
    fn test_tokenize_longest_operator() {
        assert_eq!(
            kinds("a === b || !c"),
            vec![
                TokenKind::Identifier("a".to_string()),
                TokenKind::Operator("==="),
                TokenKind::Identifier("b".to_string()),
                TokenKind::Operator("||"),
                TokenKind::Operator("!"),
                TokenKind::Identifier("c".to_string()),
            ]
        );
    }

    #[test]
    fn test_tokenize_string_escapes() {
        assert_eq!(
            kinds(r#""it\'s \"x\" é""#),
            vec![TokenKind::String("it's \"x\" é".to_string())]
        );
    }

    #[test]
    fn test_tokenize_spans() {
        let tokens = tokenize(" $ctrl.title ").unwrap();
        assert_eq!(tokens[0].span, 1..6);
        assert!(tokens[1].is_character('.'));
        assert_eq!(tokens[2].span, 7..12);
    }

    #[test]
    fn test_tokenize_numbers() {
        assert_eq!(
            kinds("404 + .5 + 1e3"),
            vec![
                TokenKind::Number("404".to_string()),
                TokenKind::Operator("+"),
                TokenKind::Number(".5".to_string()),
                TokenKind::Operator("+"),
                TokenKind::Number("1e3".to_string()),
            ]
        );
    }

    #[test]
    fn test_tokenize_unterminated_string() {
        assert!(tokenize("'open").is_err());
    }

    #[test]
    fn test_tokenize_unexpected_character() {
        assert!(tokenize("a # b").is_err());
    }
}
