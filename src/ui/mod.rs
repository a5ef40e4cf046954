//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into four layers:
//!
//! - **[`app`]**: application state, keyboard event loop, pane focus
//! - **[`layout`]**: places syntax tree nodes on a grid
//! - **[`panes`]**: render functions for each visible pane (source, tree, status bar)
//! - **[`theme`]**: centralized color palette used by all panes
//!
//! The entry point for consumers is [`App`]: construct it with a parsed
//! [`SyntaxTree`] and call [`App::run`] to start the event loop.
//!
//! [`SyntaxTree`]: crate::parser::SyntaxTree
//! [`App::run`]: app::App::run

pub mod app;
pub mod layout;
pub mod panes;
pub mod theme;

pub use app::App;
