//! Recursive-descent parser for AngularJS template expressions.
//!
//! Grammar, lowest precedence first:
//! program := filterChain (';' filterChain)*
//! filterChain := expression ('|' filter)*
//! expression := ternary ('=' expression)?
//! ternary := or ('?' expression ':' expression)?
//! then `||`, `&&`, equality, relational, additive, multiplicative, unary, primary.

use anyhow::{Result, bail};

use super::ast::{Expr, ExprKind, Literal};
use super::lexer::{Token, TokenKind, tokenize};

/// Parse an expression text into its top-level statements.
pub fn parse_program(text: &str) -> Result<Vec<Expr>> {
    let tokens = tokenize(text)?;
    let mut parser = Parser {
        tokens,
        index: 0,
        text_len: text.len(),
    };
    parser.program()
}

struct Parser {
    tokens: Vec<Token>,
    index: usize,
    text_len: usize,
}

impl Parser {
    fn program(&mut self) -> Result<Vec<Expr>> {
        let mut statements = Vec::new();
        loop {
            if self.peek().is_some() && !self.peek_character(';') {
                statements.push(self.filter_chain()?);
            }
            if !self.eat_character(';') {
                break;
            }
        }
        if let Some(token) = self.peek() {
            bail!("Unexpected token {:?} at column {}", token.kind, token.span.start);
        }
        Ok(statements)
    }

    fn filter_chain(&mut self) -> Result<Expr> {
        let mut left = self.expression()?;
        while self.eat_operator("|") {
            left = self.filter(left)?;
        }
        Ok(left)
    }

    /// `input | name:arg1:arg2` becomes `name(input, arg1, arg2)`.
    fn filter(&mut self, input: Expr) -> Result<Expr> {
        let callee = self.identifier()?;
        let mut end = callee.span.end;
        let start = input.span.start;
        let mut args = vec![input];
        while self.eat_character(':') {
            let arg = self.expression()?;
            end = arg.span.end;
            args.push(arg);
        }
        Ok(Expr::new(
            ExprKind::Call {
                callee: Box::new(callee),
                args,
                filter: true,
            },
            start..end,
        ))
    }

    fn expression(&mut self) -> Result<Expr> {
        let target = self.ternary()?;
        if self.eat_operator("=") {
            let value = self.expression()?;
            let span = target.span.start..value.span.end;
            return Ok(Expr::new(
                ExprKind::Assign {
                    target: Box::new(target),
                    value: Box::new(value),
                },
                span,
            ));
        }
        Ok(target)
    }

    fn ternary(&mut self) -> Result<Expr> {
        let test = self.binary(0)?;
        if !self.eat_character('?') {
            return Ok(test);
        }
        let consequent = self.expression()?;
        self.expect_character(':')?;
        let alternate = self.expression()?;
        let span = test.span.start..alternate.span.end;
        Ok(Expr::new(
            ExprKind::Conditional {
                test: Box::new(test),
                consequent: Box::new(consequent),
                alternate: Box::new(alternate),
            },
            span,
        ))
    }

    /// Left-associative binary operators by precedence level.
    fn binary(&mut self, level: usize) -> Result<Expr> {
        const LEVELS: &[&[&str]] = &[
            &["||"],
            &["&&"],
            &["==", "!=", "===", "!=="],
            &["<", ">", "<=", ">="],
            &["+", "-"],
            &["*", "/", "%"],
        ];

        let Some(operators) = LEVELS.get(level) else {
            return self.unary();
        };

        let mut left = self.binary(level + 1)?;
        while let Some(op) = self.eat_any_operator(operators) {
            let right = self.binary(level + 1)?;
            let span = left.span.start..right.span.end;
            left = Expr::new(
                ExprKind::Binary {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                span,
            );
        }
        Ok(left)
    }

    fn unary(&mut self) -> Result<Expr> {
        let start = self.peek().map(|t| t.span.start).unwrap_or(self.text_len);
        if let Some(op) = self.eat_any_operator(&["+", "-", "!"]) {
            let argument = self.unary()?;
            let span = start..argument.span.end;
            return Ok(Expr::new(
                ExprKind::Unary {
                    op,
                    argument: Box::new(argument),
                },
                span,
            ));
        }
        self.primary()
    }

    fn primary(&mut self) -> Result<Expr> {
        let Some(token) = self.next() else {
            bail!("Unexpected end of expression");
        };
        let start = token.span.start;

        let mut expr = match token.kind {
            TokenKind::Character('(') => {
                let inner = self.filter_chain()?;
                let end = self.expect_character(')')?;
                Expr::new(inner.kind, start..end)
            }
            TokenKind::Character('[') => self.array(start)?,
            TokenKind::Character('{') => self.object(start)?,
            TokenKind::String(value) => {
                Expr::new(ExprKind::Literal(Literal::String(value)), token.span)
            }
            TokenKind::Number(raw) => {
                Expr::new(ExprKind::Literal(Literal::Number(raw)), token.span)
            }
            TokenKind::Identifier(name) => {
                let kind = match name.as_str() {
                    "true" => ExprKind::Literal(Literal::Bool(true)),
                    "false" => ExprKind::Literal(Literal::Bool(false)),
                    "null" => ExprKind::Literal(Literal::Null),
                    "undefined" => ExprKind::Literal(Literal::Undefined),
                    "this" => ExprKind::This,
                    _ => ExprKind::Identifier(name),
                };
                Expr::new(kind, token.span)
            }
            other => bail!("Unexpected token {:?} at column {}", other, start),
        };

        loop {
            if self.eat_character('(') {
                let args = self.arguments()?;
                let end = self.expect_character(')')?;
                let span = expr.span.start..end;
                expr = Expr::new(
                    ExprKind::Call {
                        callee: Box::new(expr),
                        args,
                        filter: false,
                    },
                    span,
                );
            } else if self.eat_character('[') {
                let property = self.expression()?;
                let end = self.expect_character(']')?;
                let span = expr.span.start..end;
                expr = Expr::new(
                    ExprKind::Member {
                        object: Box::new(expr),
                        property: Box::new(property),
                        computed: true,
                    },
                    span,
                );
            } else if self.eat_character('.') {
                let property = self.identifier()?;
                let span = expr.span.start..property.span.end;
                expr = Expr::new(
                    ExprKind::Member {
                        object: Box::new(expr),
                        property: Box::new(property),
                        computed: false,
                    },
                    span,
                );
            } else {
                return Ok(expr);
            }
        }
    }

    fn arguments(&mut self) -> Result<Vec<Expr>> {
        let mut args = Vec::new();
        if self.peek_character(')') {
            return Ok(args);
        }
        loop {
            args.push(self.filter_chain()?);
            if !self.eat_character(',') {
                return Ok(args);
            }
        }
    }

    fn array(&mut self, start: usize) -> Result<Expr> {
        let mut items = Vec::new();
        while !self.peek_character(']') {
            items.push(self.expression()?);
            if !self.eat_character(',') {
                break;
            }
        }
        let end = self.expect_character(']')?;
        Ok(Expr::new(ExprKind::Array(items), start..end))
    }

    fn object(&mut self, start: usize) -> Result<Expr> {
        let mut properties = Vec::new();
        while !self.peek_character('}') {
            let key = match self.next() {
                Some(Token {
                    kind: TokenKind::Identifier(name),
                    span,
                }) => Expr::new(ExprKind::Identifier(name), span),
                Some(Token {
                    kind: TokenKind::String(value),
                    span,
                }) => Expr::new(ExprKind::Literal(Literal::String(value)), span),
                Some(Token {
                    kind: TokenKind::Number(raw),
                    span,
                }) => Expr::new(ExprKind::Literal(Literal::Number(raw)), span),
                Some(Token {
                    kind: TokenKind::Character('['),
                    ..
                }) => {
                    let key = self.expression()?;
                    self.expect_character(']')?;
                    key
                }
                Some(token) => bail!("Invalid object key at column {}", token.span.start),
                None => bail!("Unterminated object literal"),
            };

            let value = if self.eat_character(':') {
                self.expression()?
            } else {
                key.clone()
            };
            properties.push((key, value));

            if !self.eat_character(',') {
                break;
            }
        }
        let end = self.expect_character('}')?;
        Ok(Expr::new(ExprKind::Object(properties), start..end))
    }

    fn identifier(&mut self) -> Result<Expr> {
        match self.next() {
            Some(Token {
                kind: TokenKind::Identifier(name),
                span,
            }) => Ok(Expr::new(ExprKind::Identifier(name), span)),
            Some(token) => bail!("Expected identifier at column {}", token.span.start),
            None => bail!("Expected identifier, found end of expression"),
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.index)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.index).cloned();
        if token.is_some() {
            self.index += 1;
        }
        token
    }

    fn peek_character(&self, ch: char) -> bool {
        self.peek().is_some_and(|t| t.is_character(ch))
    }

    fn eat_character(&mut self, ch: char) -> bool {
        if self.peek_character(ch) {
            self.index += 1;
            true
        } else {
            false
        }
    }

    /// Consume `ch` and return the index after it.
    fn expect_character(&mut self, ch: char) -> Result<usize> {
        match self.peek() {
            Some(token) if token.is_character(ch) => {
                let end = token.span.end;
                self.index += 1;
                Ok(end)
            }
            Some(token) => bail!("Expected '{}' at column {}", ch, token.span.start),
            None => bail!("Expected '{}', found end of expression", ch),
        }
    }

    fn eat_operator(&mut self, op: &str) -> bool {
        if self.peek().is_some_and(|t| t.is_operator(op)) {
            self.index += 1;
            true
        } else {
            false
        }
    }

    fn eat_any_operator(&mut self, operators: &[&str]) -> Option<&'static str> {
        let op = match self.peek()?.kind {
            TokenKind::Operator(op) if operators.contains(&op) => op,
            _ => return None,
        };
        self.index += 1;
        Some(op)
    }
}
