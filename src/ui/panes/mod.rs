//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`source`]: Source code display with syntax highlighting and line numbers
//! - [`tree`]: The syntax tree drawn as boxes and connectors
//! - [`status`]: Status bar with keybindings and tree statistics
//!
//! Each pane module exports a primary `render_*` function that takes the
//! frame, its area, the data to show, and the pane's scroll state.

pub mod source;
pub mod status;
pub mod tree;

pub use source::render_source_pane;
pub use status::render_status_bar;
pub use tree::{render_tree_pane, TreeScroll};
