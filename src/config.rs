//! Command-line configuration

use std::path::PathBuf;

/// Default diagnostic log file, created in the working directory
pub const DEFAULT_LOG_FILE: &str = "parser_output.txt";

/// Default log filter; `info` records every production the parser enters
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(clap::Parser, Debug)]
#[clap(
    name = "tinytree",
    version,
    about = "Parse a TINY program and browse its syntax tree"
)]
pub struct Cli {
    /// Path to the TINY source file
    pub source: PathBuf,

    /// Diagnostic log file (truncated on every run)
    #[clap(long, default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,

    /// Log filter directive; RUST_LOG takes precedence
    #[clap(long, default_value = DEFAULT_LOG_FILTER)]
    pub log_level: String,

    /// Print the tree outline to stdout instead of opening the viewer
    #[clap(short, long)]
    pub print: bool,
}
