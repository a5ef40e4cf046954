//! Syntax tree storage and structural queries
//!
//! Nodes live in an arena ([`SyntaxTree`]) and refer to each other by
//! [`NodeId`]. A node has up to [`MAX_CHILDREN`] ordered child slots and a
//! `next` link that threads the statements of one sequence together. The
//! `parent` link points at whichever node holds this one, through a child
//! slot or through `next`; it is only used to find and rewrite a node's
//! position.
//!
//! # Layout queries
//!
//! [`SyntaxTree::leaf_count`] and [`SyntaxTree::width`] are the two queries a
//! renderer uses to space nodes horizontally. Both take `Option<NodeId>` so
//! an absent node can be passed straight through.

use std::fmt;

/// Index of a node inside its [`SyntaxTree`]
pub type NodeId = usize;

/// Maximum number of children a node can hold (`if` uses all three)
pub const MAX_CHILDREN: usize = 3;

/// Grammar symbol a node stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeLabel {
    /// Placeholder that has not been filled by a production yet
    Nil,
    If,
    Repeat,
    Assign,
    Read,
    Write,
    Op,
    Id,
    Const,
}

impl NodeLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeLabel::Nil => "NIL",
            NodeLabel::If => "if",
            NodeLabel::Repeat => "repeat",
            NodeLabel::Assign => "assign",
            NodeLabel::Read => "read",
            NodeLabel::Write => "write",
            NodeLabel::Op => "op",
            NodeLabel::Id => "id",
            NodeLabel::Const => "const",
        }
    }
}

impl fmt::Display for NodeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a node is attached to its parent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Root,
    Child(usize),
    Next,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    #[error("node {parent} already has {MAX_CHILDREN} children")]
    ChildOverflow { parent: NodeId },

    #[error("node {node} names {parent} as parent but is not linked from it")]
    Detached { node: NodeId, parent: NodeId },
}

/// Fixed-capacity ordered child slots
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Children {
    slots: [Option<NodeId>; MAX_CHILDREN],
    len: usize,
}

impl Children {
    fn push(&mut self, id: NodeId) -> bool {
        if self.len == MAX_CHILDREN {
            return false;
        }
        self.slots[self.len] = Some(id);
        self.len += 1;
        true
    }

    fn position(&self, id: NodeId) -> Option<usize> {
        self.slots.iter().position(|slot| *slot == Some(id))
    }

    fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.slots[..self.len].iter().flatten().copied()
    }
}

/// One grammar symbol instance
#[derive(Debug, Clone)]
pub struct Node {
    label: NodeLabel,
    value: Option<String>,
    is_expression: bool,
    children: Children,
    next: Option<NodeId>,
    parent: Option<NodeId>,
}

impl Node {
    fn new(label: NodeLabel) -> Self {
        Self {
            label,
            value: None,
            is_expression: false,
            children: Children::default(),
            next: None,
            parent: None,
        }
    }

    pub fn label(&self) -> NodeLabel {
        self.label
    }

    /// Associated lexeme: identifier name, literal text or operator symbol
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Whether the node belongs to an expression subtree
    pub fn is_expression(&self) -> bool {
        self.is_expression
    }

    /// Present children in slot order
    pub fn children(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.children.iter()
    }

    pub fn child(&self, index: usize) -> Option<NodeId> {
        self.children.slots.get(index).copied().flatten()
    }

    pub fn child_count(&self) -> usize {
        self.children.iter().count()
    }

    pub fn next(&self) -> Option<NodeId> {
        self.next
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn is_nil(&self) -> bool {
        self.label == NodeLabel::Nil
    }
}

/// Arena-backed syntax tree
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl SyntaxTree {
    /// A tree holding a single placeholder root.
    pub(crate) fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeLabel::Nil)],
            root: 0,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Panics if `id` was not allocated by this tree.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// Node existence query
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Overwrite a parent link without touching the parent's slots.
    #[cfg(test)]
    pub(crate) fn set_parent(&mut self, id: NodeId, parent: Option<NodeId>) {
        self.nodes[id].parent = parent;
    }

    pub(crate) fn alloc(&mut self, label: NodeLabel) -> NodeId {
        self.nodes.push(Node::new(label));
        self.nodes.len() - 1
    }

    pub(crate) fn set_label(&mut self, id: NodeId, label: NodeLabel, value: Option<String>) {
        let node = &mut self.nodes[id];
        node.label = label;
        if value.is_some() {
            node.value = value;
        }
    }

    pub(crate) fn mark_expression(&mut self, id: NodeId) {
        self.nodes[id].is_expression = true;
    }

    /// Append `child` to the first free child slot of `parent`.
    pub(crate) fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        if !self.nodes[parent].children.push(child) {
            return Err(TreeError::ChildOverflow { parent });
        }
        self.nodes[child].parent = Some(parent);
        Ok(())
    }

    pub(crate) fn set_next(&mut self, node: NodeId, next: NodeId) {
        self.nodes[node].next = Some(next);
        self.nodes[next].parent = Some(node);
    }

    /// Find how `id` is attached to its parent.
    ///
    /// A child slot and the `next` link are checked separately, so a node
    /// whose parent link is stale is reported instead of being treated as
    /// the parent's `next`.
    pub fn slot_of(&self, id: NodeId) -> Result<Slot, TreeError> {
        let Some(parent) = self.nodes[id].parent else {
            return Ok(Slot::Root);
        };
        let parent_node = &self.nodes[parent];

        if let Some(index) = parent_node.children.position(id) {
            Ok(Slot::Child(index))
        } else if parent_node.next == Some(id) {
            Ok(Slot::Next)
        } else {
            Err(TreeError::Detached { node: id, parent })
        }
    }

    /// Put `new` into the slot currently occupied by `old`.
    ///
    /// `old` is left without a parent; the caller is expected to re-attach it.
    pub(crate) fn replace(&mut self, old: NodeId, new: NodeId) -> Result<(), TreeError> {
        let slot = self.slot_of(old)?;
        let parent = self.nodes[old].parent;

        match (slot, parent) {
            (Slot::Child(index), Some(p)) => self.nodes[p].children.slots[index] = Some(new),
            (Slot::Next, Some(p)) => self.nodes[p].next = Some(new),
            _ => self.root = new,
        }

        self.nodes[new].parent = parent;
        self.nodes[old].parent = None;
        Ok(())
    }

    /// Unlink every reachable placeholder node.
    pub(crate) fn prune_nil(&mut self) -> Result<(), TreeError> {
        let nil: Vec<NodeId> = self.iter().filter(|&id| self.nodes[id].is_nil()).collect();

        for id in nil {
            let parent = self.nodes[id].parent;
            match (self.slot_of(id)?, parent) {
                (Slot::Child(index), Some(p)) => self.nodes[p].children.slots[index] = None,
                (Slot::Next, Some(p)) => self.nodes[p].next = None,
                // Only an empty program leaves a NIL root; keep it.
                _ => continue,
            }
            self.nodes[id].parent = None;
        }

        Ok(())
    }

    /// Reachable nodes in pre-order: a node, its children, then its `next`.
    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        let mut stack = vec![self.root];
        std::iter::from_fn(move || {
            let id = stack.pop()?;
            let node = &self.nodes[id];
            if let Some(next) = node.next {
                stack.push(next);
            }
            let children: Vec<NodeId> = node.children().collect();
            stack.extend(children.into_iter().rev());
            Some(id)
        })
    }

    /// Number of reachable nodes
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes[self.root].is_nil()
    }

    /// Number of leaves below `id`, ignoring `next` chains.
    pub fn leaf_count(&self, id: Option<NodeId>) -> usize {
        let Some(id) = id else {
            return 0;
        };
        let node = &self.nodes[id];
        if node.child_count() == 0 {
            return 1;
        }
        node.children().map(|child| self.leaf_count(Some(child))).sum()
    }

    /// Horizontal extent used for spacing siblings.
    ///
    /// A childless node is 1 wide regardless of its `next` chain. Otherwise
    /// each child contributes its leaf count plus the width of its own `next`
    /// chain, and the node's `next` chain is added on top.
    pub fn width(&self, id: Option<NodeId>) -> usize {
        let Some(id) = id else {
            return 0;
        };
        let node = &self.nodes[id];
        if node.child_count() == 0 {
            return 1;
        }

        let children: usize = node
            .children()
            .map(|child| self.leaf_count(Some(child)) + self.width(self.nodes[child].next))
            .sum();
        children + self.width(node.next)
    }

    /// Indented text rendering: children two spaces deeper than their
    /// parent, `next` chains at the same depth.
    pub fn outline(&self) -> String {
        let mut out = String::new();
        let mut stack = vec![(self.root, 0usize)];

        while let Some((id, depth)) = stack.pop() {
            let node = &self.nodes[id];
            out.push_str(&"  ".repeat(depth));
            out.push_str(node.label.as_str());
            if let Some(value) = node.value() {
                out.push_str(" (");
                out.push_str(value);
                out.push(')');
            }
            out.push('\n');

            if let Some(next) = node.next {
                stack.push((next, depth));
            }
            let children: Vec<NodeId> = node.children().collect();
            stack.extend(children.into_iter().rev().map(|c| (c, depth + 1)));
        }

        out
    }
}

impl fmt::Display for SyntaxTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.outline())
    }
}
