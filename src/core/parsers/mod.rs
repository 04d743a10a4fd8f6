//! File parsers for source code and catalog files.
//!
//! - `expression`: AngularJS template expressions
//! - `markup`: HTML templates (text nodes and attributes)
//! - `script`: JavaScript/TypeScript modules (uses swc for AST generation)
//! - `json`, `xml`: catalog files

pub mod expression;
pub mod json;
pub mod markup;
pub mod script;
pub mod xml;
