//! Lexer and parser for the embedded expression language.
//!
//! Snippets are parsed as exactly one expression. Module files are parsed
//! one definition per line.

pub mod expression;
pub mod lexer;
pub mod parser;
pub mod position;
pub mod precedence;
pub mod token;
pub mod token_type;

pub use parser::{SyntaxError, parse_module, parse_snippet};
