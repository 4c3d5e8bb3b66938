// electriC: lexer, parser and terminal AST viewer

use std::io;
use std::path::PathBuf;

use clap::{ArgAction, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use electric::report::Report;
use electric::source;
use electric::ui::App;

/// Environment variable holding a tracing filter directive.
const LOG_ENV: &str = "ELECTRIC_LOG";

/// Tokenize and parse an electriC program, then browse the result
#[derive(Debug, Parser)]
#[command(name = "electric", version, about)]
struct Cli {
    /// Source file to load (.ec)
    file: PathBuf,

    /// Print the token table and AST outline instead of starting the viewer
    #[arg(long)]
    dump: bool,

    /// Increase logging verbosity (-v: debug, -vv+: trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn directive_for_verbosity(v: u8) -> &'static str {
    match v {
        0 => "warn",
        1 => "electric=debug",
        _ => "electric=trace",
    }
}

/// Log to stderr. The viewer owns the screen, so it only logs when asked to.
fn init_tracing(verbose: u8, interactive: bool) {
    let requested = verbose > 0 || std::env::var_os(LOG_ENV).is_some();
    if interactive && !requested {
        return;
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV)
                .unwrap_or_else(|_| EnvFilter::new(directive_for_verbosity(verbose))),
        )
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, !cli.dump);

    let source = match source::load(&cli.file) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let report = Report::build(source);

    if cli.dump {
        print!("{}", report.token_table());
        println!();
        print!("{}", report.tree());
        if !report.is_ok() {
            std::process::exit(1);
        }
        return Ok(());
    }

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(report);
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
