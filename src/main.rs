mod app;
mod config;
mod editor;
mod error;
mod event;
mod logging;
mod notes;
mod ui;

use std::env;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use crossterm::{
    cursor::SetCursorStyle,
    event::{DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use app::App;
use config::Config;
use event::run_app;

#[derive(Debug, Parser)]
#[command(name = "jotter", version, about = "A floating, tabbed scratchpad for the terminal")]
struct Cli {
    /// Open this folder as the notes directory
    path: Option<String>,

    /// Print the config file path
    #[arg(short, long)]
    config: bool,

    /// Print the notes directory path
    #[arg(short, long)]
    dir: bool,

    /// Rewrite the config file with defaults
    #[arg(long)]
    reset: bool,

    /// Start with the panel hidden
    #[arg(long)]
    hidden: bool,
}

fn resolve_path(path_str: &str) -> Option<PathBuf> {
    let expanded = shellexpand::tilde(path_str).to_string();
    let path = PathBuf::from(&expanded);
    let absolute = if path.is_absolute() {
        path
    } else {
        env::current_dir().ok()?.join(path)
    };

    absolute.canonicalize().ok().or(Some(absolute))
}

fn reset_config() -> io::Result<()> {
    let path = Config::config_path();
    Config::default().save_to(&path)?;
    println!("Reset: {}", path.display());
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.config {
        println!("{}", Config::config_path().display());
        return ExitCode::SUCCESS;
    }
    if cli.reset {
        return match reset_config() {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Failed to reset config: {}", e);
                ExitCode::FAILURE
            }
        };
    }

    if let Err(e) = logging::init(&Config::log_path()) {
        eprintln!("Logging disabled: {}", e);
    }

    let mut config = Config::load_or_create();
    if let Some(path_arg) = cli.path.as_deref() {
        match resolve_path(path_arg) {
            Some(path) if path.is_file() => {
                eprintln!("Not a directory: {}", path.display());
                return ExitCode::FAILURE;
            }
            Some(path) => config.notes_dir = path.to_string_lossy().to_string(),
            None => {
                eprintln!("Invalid path: {}", path_arg);
                return ExitCode::FAILURE;
            }
        }
    }
    if cli.hidden {
        config.start_visible = false;
    }

    if cli.dir {
        println!("{}", config.notes_path().display());
        return ExitCode::SUCCESS;
    }

    // Build the whole context before touching the terminal so startup
    // failures print normally.
    let mut app = match App::new(config) {
        Ok(app) => app,
        Err(e) => {
            log::error!("startup failed: {}", e);
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(&mut app) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(app: &mut App) -> error::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste,
        SetCursorStyle::SteadyBar
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, app);
    let closed = app.shutdown();

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        SetCursorStyle::DefaultUserShape,
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    result.and(closed)
}
