//! Expression parsing implementation
//!
//! ```text
//! exp        ::= simple-exp [('<' | '=') simple-exp]
//! simple-exp ::= term (('+' | '-') term)*
//! term       ::= factor (('*' | '/') factor)*
//! factor     ::= '(' exp ')' | number | identifier
//! ```
//!
//! Each production returns the root of the subtree it built. When an operator
//! follows, that root is rotated under a new `op` node which takes over its
//! slot, so repeated operators nest to the left: `a - b - c` becomes
//! `op(-, op(-, a, b), c)`.

use super::parse::{ParseError, Parser, Production};
use super::token::TokenKind;
use super::tree::{NodeId, NodeLabel};

impl<I: Iterator<Item = char>> Parser<I> {
    pub(crate) fn exp(&mut self) -> Result<NodeId, ParseError> {
        self.found(Production::Exp);
        self.builder.mark_expression(self.builder.cursor());

        let mut left = self.simple_exp()?;
        if matches!(self.current.kind(), TokenKind::Less | TokenKind::Equal) {
            left = self.binary_op(left, Production::ComparisonOp)?;
            self.simple_exp()?;
        }

        Ok(left)
    }

    fn simple_exp(&mut self) -> Result<NodeId, ParseError> {
        self.found(Production::SimpleExp);
        self.builder.mark_expression(self.builder.cursor());

        let mut left = self.term()?;
        while matches!(self.current.kind(), TokenKind::Plus | TokenKind::Minus) {
            left = self.binary_op(left, Production::AddOp)?;
            self.term()?;
        }

        Ok(left)
    }

    fn term(&mut self) -> Result<NodeId, ParseError> {
        self.found(Production::Term);
        self.builder.mark_expression(self.builder.cursor());

        let mut left = self.factor()?;
        while matches!(self.current.kind(), TokenKind::Star | TokenKind::Slash) {
            left = self.binary_op(left, Production::MulOp)?;
            self.factor()?;
        }

        Ok(left)
    }

    fn factor(&mut self) -> Result<NodeId, ParseError> {
        self.found(Production::Factor);
        let node = self.builder.cursor();
        self.builder.mark_expression(node);

        match self.current.kind() {
            TokenKind::LParen => {
                self.advance()?;
                let inner = self.exp()?;
                self.expect(TokenKind::RParen)?;
                Ok(inner)
            }
            TokenKind::Identifier => {
                let token = self.advance()?;
                self.builder.fill(node, NodeLabel::Id, Some(token.into_lexeme()));
                Ok(node)
            }
            TokenKind::Number => {
                let token = self.advance()?;
                self.builder.fill(node, NodeLabel::Const, Some(token.into_lexeme()));
                Ok(node)
            }
            _ => Err(self.unexpected("factor")),
        }
    }

    /// Consume the operator under the lookahead, rotate `left` beneath a new
    /// `op` node, and plant the placeholder for the right operand.
    fn binary_op(&mut self, left: NodeId, production: Production) -> Result<NodeId, ParseError> {
        self.found(production);

        let op = self.builder.rotate(left, self.current.lexeme())?;
        self.advance()?;
        self.builder.advance_to_child(op)?;

        Ok(op)
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::parse::{parse, ParseError};
    use crate::parser::tree::{NodeId, NodeLabel, SyntaxTree};

    /// Render an expression subtree as a fully parenthesized string.
    fn sexpr(tree: &SyntaxTree, id: NodeId) -> String {
        let node = tree.node(id);
        match node.label() {
            NodeLabel::Op => {
                let operands: Vec<String> = node.children().map(|c| sexpr(tree, c)).collect();
                format!("({} {})", node.value().unwrap(), operands.join(" "))
            }
            _ => node.value().unwrap().to_string(),
        }
    }

    /// Parse `write <expr>` and return the written expression.
    fn write_expr(source: &str) -> String {
        let tree = parse(&format!("write {}", source)).unwrap();
        let write = tree.node(tree.root());
        sexpr(&tree, write.child(0).unwrap())
    }

    #[test]
    fn test_addition_is_left_associative() {
        let tree = parse("write 1+2+3").unwrap();
        let outer_id = tree.node(tree.root()).child(0).unwrap();
        let outer = tree.node(outer_id);

        assert_eq!(outer.label(), NodeLabel::Op);
        assert_eq!(outer.value(), Some("+"));
        assert_eq!(outer.child_count(), 2);

        let inner = tree.node(outer.child(0).unwrap());
        assert_eq!(inner.label(), NodeLabel::Op);
        assert_eq!(inner.value(), Some("+"));
        assert_eq!(tree.node(inner.child(0).unwrap()).value(), Some("1"));
        assert_eq!(tree.node(inner.child(1).unwrap()).value(), Some("2"));

        let third = tree.node(outer.child(1).unwrap());
        assert_eq!(third.label(), NodeLabel::Const);
        assert_eq!(third.value(), Some("3"));
    }

    #[test]
    fn test_mixed_additive_operators() {
        assert_eq!(write_expr("a - b + c"), "(+ (- a b) c)");
    }

    #[test]
    fn test_multiplication_binds_tighter() {
        assert_eq!(write_expr("a * b + c"), "(+ (* a b) c)");
        assert_eq!(write_expr("a + b * c"), "(+ a (* b c))");
        assert_eq!(write_expr("a / b / c"), "(/ (/ a b) c)");
    }

    #[test]
    fn test_comparison_takes_whole_sides() {
        assert_eq!(write_expr("a + b < c * d"), "(< (+ a b) (* c d))");
        assert_eq!(write_expr("x = 0"), "(= x 0)");
    }

    #[test]
    fn test_parentheses_add_no_node() {
        assert_eq!(write_expr("(a + b) * c"), "(* (+ a b) c)");
        assert_eq!(write_expr("((7))"), "7");
        assert_eq!(write_expr("a - (b - c)"), "(- a (- b c))");
    }

    #[test]
    fn test_rotation_keeps_parent_links() {
        let tree = parse("x := 1 + 2 * 3 - 4").unwrap();
        for id in tree.iter() {
            let node = tree.node(id);
            for child in node.children() {
                assert_eq!(tree.node(child).parent(), Some(id));
            }
            if let Some(next) = node.next() {
                assert_eq!(tree.node(next).parent(), Some(id));
            }
        }
    }

    #[test]
    fn test_expression_nodes_are_marked() {
        let tree = parse("if a < (b + 1) then write a * 2 end").unwrap();
        for id in tree.iter() {
            let node = tree.node(id);
            let is_statement = matches!(node.label(), NodeLabel::If | NodeLabel::Write);
            assert_eq!(node.is_expression(), !is_statement, "{:?}", node.label());
        }
    }

    #[test]
    fn test_invalid_factor() {
        let err = parse("write +1").unwrap_err();
        assert!(matches!(
            err,
            ParseError::Grammar { ref found, ref expected, .. }
                if found == "+" && expected == "factor"
        ));
    }

    #[test]
    fn test_unclosed_parenthesis() {
        let err = parse("write (1 + 2").unwrap_err();
        assert!(matches!(
            err,
            ParseError::Grammar { ref expected, .. } if expected == ")"
        ));
    }

    #[test]
    fn test_comparison_does_not_chain() {
        // exp allows a single comparison; the second '<' is trailing input
        let err = parse("write a < b < c").unwrap_err();
        assert!(matches!(
            err,
            ParseError::Grammar { ref found, ref expected, .. }
                if found == "<" && expected == ";"
        ));
    }
}
