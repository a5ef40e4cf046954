//! Syntax tree pane rendering
//!
//! Statement nodes are drawn as square boxes and expression nodes as rounded
//! boxes, each showing the node label and, below it, the value in
//! parentheses. Children hang below their parent through a connector; a
//! statement's `next` is joined by a horizontal line at label height.

use crate::parser::tree::{Node, SyntaxTree};
use crate::ui::layout::{EdgeKind, Placement, TreeLayout, NODE_HEIGHT, NODE_WIDTH};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Widget},
    Frame,
};

/// Scroll offset of the tree drawing, in character cells
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeScroll {
    pub x: usize,
    pub y: usize,
}

/// Render the syntax tree pane
pub fn render_tree_pane(
    frame: &mut Frame,
    area: Rect,
    tree: &SyntaxTree,
    layout: &TreeLayout,
    is_focused: bool,
    scroll: &mut TreeScroll,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(" Syntax Tree ")
        .borders(Borders::ALL)
        .border_style(border_style);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Keep at least one column / row of the drawing in view
    let (width, height) = layout.extent();
    scroll.x = scroll.x.min(width.saturating_sub(1));
    scroll.y = scroll.y.min(height.saturating_sub(1));

    frame.render_widget(
        TreeCanvas {
            tree,
            layout,
            scroll: *scroll,
        },
        inner,
    );
}

struct TreeCanvas<'a> {
    tree: &'a SyntaxTree,
    layout: &'a TreeLayout,
    scroll: TreeScroll,
}

impl Widget for TreeCanvas<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut pen = Pen {
            buf,
            area,
            scroll: self.scroll,
        };

        for (id, placement) in self.layout.nodes() {
            draw_node(&mut pen, self.tree.node(id), placement);
        }

        let edge_style = Style::default().fg(DEFAULT_THEME.edge);
        for (id, placement) in self.layout.nodes() {
            let node = self.tree.node(id);
            let children: Vec<Placement> = self
                .layout
                .edges()
                .iter()
                .filter(|e| e.from == id && e.kind == EdgeKind::Child)
                .filter_map(|e| self.layout.position(e.to))
                .collect();
            draw_child_connectors(&mut pen, placement, &children, edge_style);

            if let Some(next) = node.next().and_then(|n| self.layout.position(n)) {
                draw_next_connector(&mut pen, placement, next, edge_style);
            }
        }
    }
}

/// Writes grid cells into the buffer, clipped to the pane and shifted by
/// the scroll offset.
struct Pen<'b> {
    buf: &'b mut Buffer,
    area: Rect,
    scroll: TreeScroll,
}

impl Pen<'_> {
    fn put(&mut self, x: usize, y: usize, symbol: &str, style: Style) {
        let (Some(dx), Some(dy)) = (
            x.checked_sub(self.scroll.x),
            y.checked_sub(self.scroll.y),
        ) else {
            return;
        };
        if dx >= self.area.width as usize || dy >= self.area.height as usize {
            return;
        }
        self.buf.set_string(
            self.area.x + dx as u16,
            self.area.y + dy as u16,
            symbol,
            style,
        );
    }

    fn put_str(&mut self, x: usize, y: usize, text: &str, style: Style) {
        for (offset, ch) in text.chars().enumerate() {
            let mut tmp = [0u8; 4];
            self.put(x + offset, y, ch.encode_utf8(&mut tmp), style);
        }
    }
}

fn draw_node(pen: &mut Pen<'_>, node: &Node, placement: Placement) {
    let (x, y) = placement.origin();
    let (style, corners) = if node.is_expression() {
        (Style::default().fg(DEFAULT_THEME.expression), ["╭", "╮", "╰", "╯"])
    } else {
        (Style::default().fg(DEFAULT_THEME.statement), ["┌", "┐", "└", "┘"])
    };
    let inner = NODE_WIDTH - 2;
    let horizontal = "─".repeat(inner);

    pen.put(x, y, corners[0], style);
    pen.put_str(x + 1, y, &horizontal, style);
    pen.put(x + NODE_WIDTH - 1, y, corners[1], style);

    for row in 1..NODE_HEIGHT - 1 {
        pen.put(x, y + row, "│", style);
        pen.put(x + NODE_WIDTH - 1, y + row, "│", style);
    }

    let bottom = y + NODE_HEIGHT - 1;
    pen.put(x, bottom, corners[2], style);
    pen.put_str(x + 1, bottom, &horizontal, style);
    pen.put(x + NODE_WIDTH - 1, bottom, corners[3], style);

    pen.put_str(
        x + 1,
        y + 1,
        &centered(node.label().as_str(), inner),
        style.add_modifier(Modifier::BOLD),
    );
    if let Some(value) = node.value() {
        pen.put_str(x + 1, y + 2, &centered(&format!("({value})"), inner), style);
    }
}

fn draw_child_connectors(
    pen: &mut Pen<'_>,
    parent: Placement,
    children: &[Placement],
    style: Style,
) {
    if children.is_empty() {
        return;
    }

    let (px, py) = parent.origin();
    let pc = px + NODE_WIDTH / 2;
    let stem = py + NODE_HEIGHT;
    let rail = stem + 1;

    pen.put(pc, stem, "│", style);

    let centers: Vec<usize> = children.iter().map(|c| c.origin().0 + NODE_WIDTH / 2).collect();
    let lo = centers.iter().copied().min().unwrap_or(pc).min(pc);
    let hi = centers.iter().copied().max().unwrap_or(pc).max(pc);
    for x in lo..=hi {
        pen.put(x, rail, "─", style);
    }

    for (child, &cc) in children.iter().zip(&centers) {
        let corner = match cc.cmp(&pc) {
            std::cmp::Ordering::Less => "┌",
            std::cmp::Ordering::Equal => "│",
            std::cmp::Ordering::Greater => "┐",
        };
        pen.put(cc, rail, corner, style);
        pen.put(cc, child.origin().1, "┴", style);
    }

    let left = centers.iter().any(|&c| c < pc);
    let right = centers.iter().any(|&c| c > pc);
    let down = centers.iter().any(|&c| c == pc);
    let junction = match (left, right, down) {
        (false, false, _) => "│",
        (true, true, false) => "┴",
        (true, true, true) => "┼",
        (false, true, false) => "└",
        (false, true, true) => "├",
        (true, false, false) => "┘",
        (true, false, true) => "┤",
    };
    pen.put(pc, rail, junction, style);
}

fn draw_next_connector(pen: &mut Pen<'_>, from: Placement, to: Placement, style: Style) {
    let (fx, fy) = from.origin();
    let (tx, _) = to.origin();
    let row = fy + 1;

    for x in fx + NODE_WIDTH..tx {
        pen.put(x, row, "─", style);
    }
    pen.put(tx, row, "┤", style);
}

/// Center `text` in `width` cells, truncating with '…' when it does not fit.
fn centered(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len > width {
        let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
        cut.push('…');
        return cut;
    }
    format!("{:^width$}", text, width = width)
}
