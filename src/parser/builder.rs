//! Incremental tree construction with an insertion cursor
//!
//! The parser never assembles subtrees bottom-up. Instead it reserves a slot
//! by planting a `NIL` placeholder, moves the cursor onto it, and lets the
//! production that follows fill the placeholder in place. Binary operators
//! are added afterwards by rotating the already-built left operand under a
//! new `op` node.
//!
//! The builder owns the tree and the cursor; the parser only owns the token
//! stream.

use super::tree::{NodeId, NodeLabel, SyntaxTree, TreeError};

pub(crate) struct TreeBuilder {
    tree: SyntaxTree,
    cursor: NodeId,
}

impl TreeBuilder {
    pub(crate) fn new() -> Self {
        let tree = SyntaxTree::new();
        let cursor = tree.root();
        Self { tree, cursor }
    }

    /// The node the next production will fill
    pub(crate) fn cursor(&self) -> NodeId {
        self.cursor
    }

    pub(crate) fn fill(&mut self, node: NodeId, label: NodeLabel, value: Option<String>) {
        self.tree.set_label(node, label, value);
    }

    pub(crate) fn mark_expression(&mut self, node: NodeId) {
        self.tree.mark_expression(node);
    }

    /// Plant a placeholder as the next child of `parent` and move onto it.
    pub(crate) fn advance_to_child(&mut self, parent: NodeId) -> Result<NodeId, TreeError> {
        let placeholder = self.tree.alloc(NodeLabel::Nil);
        self.tree.add_child(parent, placeholder)?;
        self.cursor = placeholder;
        Ok(placeholder)
    }

    /// Plant a placeholder as the `next` of `node` and move onto it.
    pub(crate) fn advance_to_next(&mut self, node: NodeId) -> NodeId {
        let placeholder = self.tree.alloc(NodeLabel::Nil);
        self.tree.set_next(node, placeholder);
        self.cursor = placeholder;
        placeholder
    }

    /// Lift `operand` under a new `op` node carrying `symbol`.
    ///
    /// The op node takes over the slot `operand` occupied and `operand`
    /// becomes its first child. The cursor moves onto the op node, which is
    /// returned.
    pub(crate) fn rotate(&mut self, operand: NodeId, symbol: &str) -> Result<NodeId, TreeError> {
        let op = self.tree.alloc(NodeLabel::Op);
        self.tree.set_label(op, NodeLabel::Op, Some(symbol.to_string()));
        self.tree.mark_expression(op);

        self.tree.replace(operand, op)?;
        self.tree.add_child(op, operand)?;

        self.cursor = op;
        Ok(op)
    }

    /// Prune the remaining placeholders and hand over the tree.
    pub(crate) fn finish(mut self) -> Result<SyntaxTree, TreeError> {
        self.tree.prune_nil()?;
        Ok(self.tree)
    }

    #[cfg(test)]
    pub(crate) fn tree(&self) -> &SyntaxTree {
        &self.tree
    }

    #[cfg(test)]
    pub(crate) fn tree_mut(&mut self) -> &mut SyntaxTree {
        &mut self.tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::tree::Slot;

    #[test]
    fn test_advance_to_child_moves_cursor() {
        let mut builder = TreeBuilder::new();
        let root = builder.cursor();
        builder.fill(root, NodeLabel::Write, None);

        let child = builder.advance_to_child(root).unwrap();
        assert_eq!(builder.cursor(), child);
        assert!(builder.tree().node(child).is_nil());
        assert_eq!(builder.tree().slot_of(child), Ok(Slot::Child(0)));
    }

    #[test]
    fn test_advance_to_next_moves_cursor() {
        let mut builder = TreeBuilder::new();
        let root = builder.cursor();
        let next = builder.advance_to_next(root);
        assert_eq!(builder.cursor(), next);
        assert_eq!(builder.tree().slot_of(next), Ok(Slot::Next));
    }

    #[test]
    fn test_rotate_splices_into_child_slot() {
        let mut builder = TreeBuilder::new();
        let stmt = builder.cursor();
        builder.fill(stmt, NodeLabel::Write, None);
        let left = builder.advance_to_child(stmt).unwrap();
        builder.fill(left, NodeLabel::Const, Some("1".to_string()));

        let op = builder.rotate(left, "+").unwrap();
        let right = builder.advance_to_child(op).unwrap();
        builder.fill(right, NodeLabel::Const, Some("2".to_string()));

        let tree = builder.tree();
        assert_eq!(builder.cursor(), right);
        assert_eq!(tree.node(stmt).child(0), Some(op));
        assert_eq!(tree.node(op).value(), Some("+"));
        assert!(tree.node(op).is_expression());
        assert_eq!(tree.node(op).child(0), Some(left));
        assert_eq!(tree.node(op).child(1), Some(right));
        assert_eq!(tree.node(left).parent(), Some(op));
        assert_eq!(tree.node(op).parent(), Some(stmt));
    }

    #[test]
    fn test_finish_prunes_placeholders() {
        let mut builder = TreeBuilder::new();
        let root = builder.cursor();
        builder.fill(root, NodeLabel::Read, Some("x".to_string()));
        builder.advance_to_next(root);

        let tree = builder.finish().unwrap();
        assert_eq!(tree.node(root).next(), None);
        assert_eq!(tree.len(), 1);
    }
}
