//! Statement parsing implementation
//!
//! # Grammar
//!
//! ```text
//! stmt-sequence ::= statement (';' statement)*
//! statement     ::= if-stmt | repeat-stmt | assign-stmt | read-stmt | write-stmt
//! if-stmt       ::= 'if' exp 'then' stmt-sequence ['else' stmt-sequence] 'end'
//! repeat-stmt   ::= 'repeat' stmt-sequence 'until' exp
//! assign-stmt   ::= identifier ':=' exp
//! read-stmt     ::= 'read' identifier
//! write-stmt    ::= 'write' exp
//! ```
//!
//! Statements of a sequence are chained through `next`, not stored as
//! children. Every statement fills the node under the cursor and finishes by
//! planting a `NIL` `next` placeholder for the statement that may follow.

use super::parse::{ParseError, Parser, Production};
use super::token::{Keyword, TokenKind};
use super::tree::NodeLabel;

impl<I: Iterator<Item = char>> Parser<I> {
    /// Parse a statement sequence.
    ///
    /// With `ensure_all_matched` set (the top-level sequence) any token left
    /// after the last statement is an error.
    pub(crate) fn stmt_sequence(&mut self, ensure_all_matched: bool) -> Result<(), ParseError> {
        self.found(Production::StmtSequence);

        self.statement()?;
        while self.check(TokenKind::Semicolon) {
            self.advance()?;
            self.statement()?;
        }

        if ensure_all_matched && !self.current.is_eof() {
            return Err(self.unexpected(TokenKind::Semicolon.describe()));
        }

        Ok(())
    }

    fn statement(&mut self) -> Result<(), ParseError> {
        self.found(Production::Statement);

        match self.current.kind() {
            TokenKind::Keyword(Keyword::If) => self.if_stmt(),
            TokenKind::Keyword(Keyword::Repeat) => self.repeat_stmt(),
            TokenKind::Identifier => self.assign_stmt(),
            TokenKind::Keyword(Keyword::Read) => self.read_stmt(),
            TokenKind::Keyword(Keyword::Write) => self.write_stmt(),
            _ => Err(self.unexpected("statement")),
        }
    }

    fn if_stmt(&mut self) -> Result<(), ParseError> {
        self.found(Production::IfStmt);

        let node = self.builder.cursor();
        self.builder.fill(node, NodeLabel::If, None);

        self.expect(TokenKind::Keyword(Keyword::If))?;
        self.builder.advance_to_child(node)?;
        self.exp()?;
        self.expect(TokenKind::Keyword(Keyword::Then))?;
        self.builder.advance_to_child(node)?;
        self.stmt_sequence(false)?;

        if self.check(TokenKind::Keyword(Keyword::Else)) {
            self.advance()?;
            self.builder.advance_to_child(node)?;
            self.stmt_sequence(false)?;
        }
        self.expect(TokenKind::Keyword(Keyword::End))?;

        self.builder.advance_to_next(node);
        Ok(())
    }

    fn repeat_stmt(&mut self) -> Result<(), ParseError> {
        self.found(Production::RepeatStmt);

        let node = self.builder.cursor();
        self.builder.fill(node, NodeLabel::Repeat, None);

        self.expect(TokenKind::Keyword(Keyword::Repeat))?;
        self.builder.advance_to_child(node)?;
        self.stmt_sequence(false)?;
        self.expect(TokenKind::Keyword(Keyword::Until))?;
        self.builder.advance_to_child(node)?;
        self.exp()?;

        self.builder.advance_to_next(node);
        Ok(())
    }

    fn assign_stmt(&mut self) -> Result<(), ParseError> {
        self.found(Production::AssignStmt);

        let node = self.builder.cursor();
        let target = self.expect(TokenKind::Identifier)?;
        self.builder.fill(node, NodeLabel::Assign, Some(target.into_lexeme()));

        self.expect(TokenKind::Assign)?;
        self.builder.advance_to_child(node)?;
        self.exp()?;

        self.builder.advance_to_next(node);
        Ok(())
    }

    fn read_stmt(&mut self) -> Result<(), ParseError> {
        self.found(Production::ReadStmt);

        let node = self.builder.cursor();
        self.builder.fill(node, NodeLabel::Read, None);

        self.expect(TokenKind::Keyword(Keyword::Read))?;
        let target = self.expect(TokenKind::Identifier)?;
        self.builder.fill(node, NodeLabel::Read, Some(target.into_lexeme()));

        self.builder.advance_to_next(node);
        Ok(())
    }

    fn write_stmt(&mut self) -> Result<(), ParseError> {
        self.found(Production::WriteStmt);

        let node = self.builder.cursor();
        self.builder.fill(node, NodeLabel::Write, None);

        self.expect(TokenKind::Keyword(Keyword::Write))?;
        self.builder.advance_to_child(node)?;
        self.exp()?;

        self.builder.advance_to_next(node);
        Ok(())
    }
}
