//! Main TUI application state and logic

use crate::parser::SyntaxTree;
use crate::ui::layout::TreeLayout;
use crate::ui::panes::{self, TreeScroll};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use tracing::debug;

/// Horizontal scroll step of the tree pane, in cells
const TREE_SCROLL_STEP: usize = 4;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Tree,
}

impl FocusedPane {
    /// Move focus to the other pane
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Tree,
            FocusedPane::Tree => FocusedPane::Source,
        }
    }
}

/// The main application state
pub struct App {
    /// The program text, shown in the source pane
    pub source_code: String,

    pub tree: SyntaxTree,
    pub layout: TreeLayout,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    pub source_scroll: usize,
    pub tree_scroll: TreeScroll,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl App {
    pub fn new(tree: SyntaxTree, source_code: String) -> Self {
        let layout = TreeLayout::compute(&tree);
        App {
            source_code,
            tree,
            layout,
            focused_pane: FocusedPane::Tree,
            source_scroll: 0,
            tree_scroll: TreeScroll::default(),
            should_quit: false,
            status_message: "Parsed successfully".to_string(),
        }
    }

    /// Run the event loop until the user quits
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key_event(key);
                }
            }
        }

        Ok(())
    }

    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Panes on top, status bar on the last row
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
            .split(main_chunks[0]);

        panes::render_source_pane(
            frame,
            columns[0],
            &self.source_code,
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        panes::render_tree_pane(
            frame,
            columns[1],
            &self.tree,
            &self.layout,
            self.focused_pane == FocusedPane::Tree,
            &mut self.tree_scroll,
        );

        panes::render_status_bar(
            frame,
            main_chunks[1],
            &self.status_message,
            self.tree.len(),
            self.focused_pane,
        );
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
                debug!("focus moved to {:?}", self.focused_pane);
            }
            KeyCode::Home => match self.focused_pane {
                FocusedPane::Source => self.source_scroll = 0,
                FocusedPane::Tree => self.tree_scroll = TreeScroll::default(),
            },
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Source => {
                    self.source_scroll = self.source_scroll.saturating_sub(1);
                }
                FocusedPane::Tree => {
                    self.tree_scroll.y = self.tree_scroll.y.saturating_sub(1);
                }
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Source => {
                    self.source_scroll = self.source_scroll.saturating_add(1);
                }
                FocusedPane::Tree => {
                    self.tree_scroll.y = self.tree_scroll.y.saturating_add(1);
                }
            },
            KeyCode::Left if self.focused_pane == FocusedPane::Tree => {
                self.tree_scroll.x = self.tree_scroll.x.saturating_sub(TREE_SCROLL_STEP);
            }
            KeyCode::Right if self.focused_pane == FocusedPane::Tree => {
                self.tree_scroll.x = self.tree_scroll.x.saturating_add(TREE_SCROLL_STEP);
            }
            _ => {}
        }
    }
}
