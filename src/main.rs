// tinytree: TINY parser with a syntax tree viewer

use std::fs;
use std::io;

use clap::Parser as _;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use tinytree::config::Cli;
use tinytree::diagnostics;
use tinytree::parser::parse;
use tinytree::ui::App;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if let Err(e) = diagnostics::init(&cli.log_file, &cli.log_level) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    let source = match fs::read_to_string(&cli.source) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: cannot read '{}': {}", cli.source.display(), e);
            std::process::exit(1);
        }
    };

    info!("parsing {}", cli.source.display());
    let tree = match parse(&source) {
        Ok(tree) => tree,
        Err(e) => {
            eprintln!("Parser error: {}", e);
            std::process::exit(1);
        }
    };
    info!("parsed {} nodes", tree.len());

    if cli.print {
        print!("{}", tree.outline());
        return Ok(());
    }

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(tree, source);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
