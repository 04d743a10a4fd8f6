//! AngularJS template expression language (the text inside `{{ }}` and directive values).
//!
//! - `lexer`: tokens with byte spans
//! - `parser`: recursive-descent parser producing `ast::Expr`
//! - `ast`: expression tree; filters are represented as calls

pub mod ast;
pub mod lexer;
pub mod parser;

pub use ast::{Expr, ExprKind, Literal};
pub use parser::parse_program;
