//! # Introduction
//!
//! tinytree parses programs written in TINY, a small teaching language with
//! `if`, `repeat`, `read`, `write` and assignment statements, and builds a
//! syntax tree that can be printed or browsed in a terminal UI built with
//! [ratatui](https://docs.rs/ratatui).
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Parser → SyntaxTree → Outline / TUI
//! ```
//!
//! 1. [`parser`]: tokenises the source and builds the [`parser::SyntaxTree`]
//!    in a single recursive-descent pass. Each recognised production is
//!    logged through `tracing`.
//! 2. [`diagnostics`]: installs the subscriber writing the parse trace to a
//!    log file.
//! 3. [`config`]: command-line options.
//! 4. [`ui`]: ratatui-based viewer; not part of the stable library API.
//!
//! ## Example
//!
//! ```
//! let tree = tinytree::parser::parse("read x; write x * 2").unwrap();
//! assert_eq!(tree.len(), 5);
//! ```

pub mod config;
pub mod diagnostics;
pub mod parser;
pub mod ui;
