// mulscan: extract multiply instructions from corrupted memory

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::info;
use tracing_subscriber::EnvFilter;

use mulscan::interpreter::{conditional_sum, tokenize, unconditional_sum};
use mulscan::ui::App;
use mulscan::ScanMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Count every well-formed mul
    Unconditional,
    /// Let do / don't switch muls on and off
    Conditional,
    /// Print both answers, unconditional first
    Both,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Memory dump to scan; reads stdin when absent or "-"
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Which answer(s) to print
    #[arg(short, long, value_enum, default_value_t = Mode::Both)]
    mode: Mode,

    /// Print the token stream before the answers
    #[arg(short, long)]
    tokens: bool,

    /// Step through the scan in a terminal viewer instead of printing
    #[arg(long)]
    tui: bool,
}

fn read_input(file: Option<&PathBuf>) -> Result<String> {
    match file {
        Some(path) if path.as_os_str() != "-" => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            Ok(buffer)
        }
    }
}

fn run_tui(source: String, mode: ScanMode) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(source, mode);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res.context("viewer failed")
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let source = read_input(args.file.as_ref())?;
    info!(chars = source.chars().count(), "loaded input");

    if args.tui {
        let mode = match args.mode {
            Mode::Unconditional => ScanMode::Unconditional,
            Mode::Conditional | Mode::Both => ScanMode::Conditional,
        };
        return run_tui(source, mode);
    }

    if args.tokens {
        let rendered: Vec<String> = tokenize(&source).iter().map(|t| t.to_string()).collect();
        println!("{}", rendered.join(" "));
    }

    if matches!(args.mode, Mode::Unconditional | Mode::Both) {
        println!("{}", unconditional_sum(&source));
    }
    if matches!(args.mode, Mode::Conditional | Mode::Both) {
        println!("{}", conditional_sum(&source));
    }

    Ok(())
}
