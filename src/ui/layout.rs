//! Grid layout of a syntax tree
//!
//! Places every reachable node on a grid of columns and depths. Children go
//! one depth below their parent, starting at the parent's column and advancing
//! by each child's [`SyntaxTree::width`]. A `next` statement stays at its
//! predecessor's depth, to the right of everything its predecessor's children
//! occupy. A per-depth frontier pushes a node right when the width estimate
//! would put it on top of an already placed node.

use crate::parser::tree::{NodeId, SyntaxTree};
use rustc_hash::FxHashMap;

/// Columns of a node box, borders included
pub const NODE_WIDTH: usize = 10;
/// Rows of a node box, borders included
pub const NODE_HEIGHT: usize = 4;
pub const COLUMN_GAP: usize = 2;
pub const ROW_GAP: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    Child,
    Next,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    pub kind: EdgeKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub column: usize,
    pub depth: usize,
}

impl Placement {
    /// Top-left character cell of the node box
    pub fn origin(self) -> (usize, usize) {
        (
            self.column * (NODE_WIDTH + COLUMN_GAP),
            self.depth * (NODE_HEIGHT + ROW_GAP),
        )
    }
}

#[derive(Debug, Default)]
pub struct TreeLayout {
    positions: FxHashMap<NodeId, Placement>,
    order: Vec<NodeId>,
    edges: Vec<Edge>,
    frontier: Vec<usize>,
}

impl TreeLayout {
    pub fn compute(tree: &SyntaxTree) -> Self {
        let mut layout = TreeLayout::default();
        if !tree.is_empty() {
            layout.place(tree, tree.root(), 0, 0);
        }
        layout
    }

    fn place(&mut self, tree: &SyntaxTree, start: NodeId, column: usize, depth: usize) {
        if self.frontier.len() <= depth {
            self.frontier.resize(depth + 1, 0);
        }

        let mut current = Some(start);
        let mut column = column;

        while let Some(id) = current {
            let here = column.max(self.frontier[depth]);
            self.frontier[depth] = here + 1;
            self.positions.insert(id, Placement { column: here, depth });
            self.order.push(id);

            let node = tree.node(id);
            let mut child_column = here;
            for child in node.children() {
                self.edges.push(Edge {
                    from: id,
                    to: child,
                    kind: EdgeKind::Child,
                });
                self.place(tree, child, child_column, depth + 1);
                child_column += tree.width(Some(child));
            }

            column = child_column.max(here + 1);
            current = node.next();
            if let Some(next) = current {
                self.edges.push(Edge {
                    from: id,
                    to: next,
                    kind: EdgeKind::Next,
                });
            }
        }
    }

    pub fn position(&self, id: NodeId) -> Option<Placement> {
        self.positions.get(&id).copied()
    }

    /// Placed nodes in placement order
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, Placement)> + '_ {
        self.order.iter().map(|id| (*id, self.positions[id]))
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Character-cell size of the whole drawing
    pub fn extent(&self) -> (usize, usize) {
        self.positions.values().fold((0, 0), |(w, h), p| {
            let (x, y) = p.origin();
            (w.max(x + NODE_WIDTH), h.max(y + NODE_HEIGHT))
        })
    }
}
