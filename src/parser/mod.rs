//! TINY source code parser
//!
//! This module transforms TINY source text into a [`tree::SyntaxTree`]:
//! - [`token`]: Token and token kind definitions
//! - [`lexer`]: Tokenization (characters → tokens) with one character of pushback
//! - [`tree`]: Arena-backed syntax tree and its layout queries
//! - [`parse`]: Parsing (tokens → tree)
//!
//! # Supported Language
//!
//! - Statements: `if`/`then`/`else`/`end`, `repeat`/`until`, `:=`, `read`, `write`
//! - Expressions: `+ - * /`, comparisons `<` and `=`, parentheses
//! - Integer literals and identifiers
//! - `{ ... }` comments (not nested)
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser with one token of lookahead. The
//! tree is grown through an insertion cursor: placeholder nodes reserve slots
//! before a production runs, and binary operators are added by rotating the
//! already-built left operand under a new node.

mod builder;
mod expressions;
mod statements;

pub mod lexer;
pub mod parse;
pub mod token;
pub mod tree;

pub use parse::{parse, ParseError, Parser};
pub use tree::{NodeId, NodeLabel, SyntaxTree};
