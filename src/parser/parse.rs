//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct, the error type, and the token
//! helpers shared by the grammar productions.
//!
//! # Parser Architecture
//!
//! - This module: Parser struct, token helpers, the `program` entry point
//! - `statements`: statement sequences and the five statement forms
//! - `expressions`: `exp`, `simple-exp`, `term`, `factor` and operator rotation
//!
//! Parser methods are split across these files using `impl Parser` blocks.
//! The tree under construction and its cursor live in a separate
//! [`TreeBuilder`]; the parser itself only tracks the token stream.
//!
//! # Diagnostics
//!
//! Entering a production emits an `info` event (`"term is found"`), every
//! consumed token a `trace` event, and a fatal error an `error` event before
//! it is returned.

use super::builder::TreeBuilder;
use super::lexer::{LexError, Lexer};
use super::token::{SourceLocation, Token, TokenKind};
use super::tree::{SyntaxTree, TreeError};
use std::fmt;
use std::str::Chars;
use tracing::{error, info, trace};

/// Parser error type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error(transparent)]
    Lexical(#[from] LexError),

    #[error("Unexpected token: [{found}], expected: [{expected}] at {location}")]
    Grammar {
        found: String,
        expected: String,
        location: SourceLocation,
    },

    #[error("malformed syntax tree: {0}")]
    Tree(#[from] TreeError),
}

/// Grammar rules, named as they appear in diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Production {
    Program,
    StmtSequence,
    Statement,
    IfStmt,
    RepeatStmt,
    AssignStmt,
    ReadStmt,
    WriteStmt,
    Exp,
    SimpleExp,
    Term,
    Factor,
    ComparisonOp,
    AddOp,
    MulOp,
}

impl Production {
    pub fn as_str(self) -> &'static str {
        match self {
            Production::Program => "program",
            Production::StmtSequence => "stmt-sequence",
            Production::Statement => "statement",
            Production::IfStmt => "if-stmt",
            Production::RepeatStmt => "repeat-stmt",
            Production::AssignStmt => "assign-stmt",
            Production::ReadStmt => "read-stmt",
            Production::WriteStmt => "write-stmt",
            Production::Exp => "exp",
            Production::SimpleExp => "simple-exp",
            Production::Term => "term",
            Production::Factor => "factor",
            Production::ComparisonOp => "comparison-op",
            Production::AddOp => "addop",
            Production::MulOp => "mulop",
        }
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse a complete program.
///
/// A line terminator is appended before scanning, as every caller of the
/// parser is expected to do.
pub fn parse(source: &str) -> Result<SyntaxTree, ParseError> {
    let mut text = String::with_capacity(source.len() + 1);
    text.push_str(source);
    text.push('\n');

    Parser::new(&text)?.parse_program()
}

/// Recursive descent parser for TINY with one token of lookahead
pub struct Parser<I: Iterator<Item = char>> {
    lexer: Lexer<I>,
    pub(crate) current: Token,
    pub(crate) builder: TreeBuilder,
}

impl<'a> Parser<Chars<'a>> {
    pub fn new(source: &'a str) -> Result<Self, ParseError> {
        Self::from_lexer(Lexer::new(source))
    }
}

impl<I: Iterator<Item = char>> Parser<I> {
    /// Wrap an existing lexer and read the first lookahead token.
    pub fn from_lexer(mut lexer: Lexer<I>) -> Result<Self, ParseError> {
        let current = lexer.next_token().inspect_err(|e| error!("{e}"))?;
        Ok(Self {
            lexer,
            current,
            builder: TreeBuilder::new(),
        })
    }

    /// Parse the entire program and return the pruned tree.
    pub fn parse_program(mut self) -> Result<SyntaxTree, ParseError> {
        self.program().inspect_err(|e| error!("{e}"))?;
        self.finish()
    }

    /// Prune the placeholders left behind by `program`.
    fn finish(self) -> Result<SyntaxTree, ParseError> {
        self.builder
            .finish()
            .map_err(ParseError::from)
            .inspect_err(|e| error!("{e}"))
    }

    /// program -> stmt-sequence
    fn program(&mut self) -> Result<(), ParseError> {
        self.found(Production::Program);
        self.stmt_sequence(true)
    }

    // ===== Helper methods =====

    pub(crate) fn found(&self, production: Production) {
        info!("{production} is found");
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.current.kind() == kind
    }

    /// Consume the lookahead token and read the next one.
    pub(crate) fn advance(&mut self) -> Result<Token, ParseError> {
        let next = self.lexer.next_token()?;
        let consumed = std::mem::replace(&mut self.current, next);
        trace!(kind = %consumed.kind(), lexeme = consumed.lexeme(), "token consumed");
        Ok(consumed)
    }

    /// Consume the lookahead token if it has the expected kind.
    pub(crate) fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        if self.check(kind) {
            self.advance()
        } else {
            Err(self.unexpected(kind.describe()))
        }
    }

    /// Grammar error for the current lookahead token.
    pub(crate) fn unexpected(&self, expected: &str) -> ParseError {
        ParseError::Grammar {
            found: self.current.to_string(),
            expected: expected.to_string(),
            location: self.current.location(),
        }
    }
}
