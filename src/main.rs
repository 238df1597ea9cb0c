//! # snipbox CLI Entry Point
//!
//! Starts a single interactive session over the snippet collection and writes
//! the collection back when the session ends normally.
//!
//! ## Usage
//!
//! ```bash
//! # Use ~/.snipbox/snippets.json
//! snipbox
//!
//! # Use another directory and default language
//! SNIPBOX_HOME=~/code/snippets SNIPBOX_DEFAULT_LANGUAGE=rust snipbox
//! snipbox --home ~/code/snippets --default-language rust
//! ```
//!
//! ## Lifecycle
//!
//! 1. **Configuration**: flags and environment variables are resolved once
//! 2. **Load**: the index is read, or created and seeded when missing
//! 3. **Session**: one event at a time is routed through [`App`]
//! 4. **Save**: on quit the whole collection overwrites the index
//!
//! A startup error or a failed save exits with a non-zero status.
//!
//! ## Key Bindings
//!
//! - `Tab` / `Shift-Tab` - Switch between folders and snippets
//! - `j` / `k` / arrows - Move selection
//! - `/` - Filter snippets (`Enter` applies, `Esc` clears)
//! - `n` / `e` - New / edit snippet
//! - `x` - Delete snippet (confirm with `y`)
//! - `c` - Copy content to the clipboard
//! - `s` - Toggle favorite
//! - `K` / `J` - Move snippet up / down
//! - `?` - Help
//! - `q` / `Ctrl-c` - Quit

use snipbox::config::Config;
use snipbox::snippet::storage;
use snipbox::ui::app::{Status, StatusKind};
use snipbox::ui::clipboard::{Clipboard, Osc52, SystemClipboard, WithFallback};
use snipbox::ui::{self, App};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::fs::OpenOptions;
use std::io;
use std::panic;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// How long to wait for an event before redrawing.
const POLL_TIMEOUT: Duration = Duration::from_millis(250);

/// Trait for reading terminal events (allows dependency injection for testing)
trait EventReader {
    fn read_event(&mut self, timeout: Duration) -> Result<Option<Event>>;
}

/// Production event reader that uses crossterm's event polling + read
struct CrosstermEventReader;

impl EventReader for CrosstermEventReader {
    fn read_event(&mut self, timeout: Duration) -> Result<Option<Event>> {
        if event::poll(timeout).context("Failed to poll for events")? {
            Ok(Some(event::read().context("Failed to read terminal event")?))
        } else {
            Ok(None)
        }
    }
}

/// snipbox - browse, filter, edit and copy code snippets
#[derive(Parser, Debug)]
#[command(name = "snipbox")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Browse, filter, edit and copy code snippets from the terminal", long_about = None)]
struct Args {
    /// Directory holding the snippet index and content files [default: ~/.snipbox]
    #[arg(long, value_name = "DIR", env = "SNIPBOX_HOME")]
    home: Option<PathBuf>,

    /// File name of the snippet index inside the home directory [default: snippets.json]
    #[arg(long, value_name = "NAME", env = "SNIPBOX_FILE")]
    file: Option<String>,

    /// Language tag for new snippets [default: go]
    #[arg(long, value_name = "LANG", env = "SNIPBOX_DEFAULT_LANGUAGE")]
    default_language: Option<String>,

    /// Colour theme
    #[arg(long, value_name = "NAME", env = "SNIPBOX_THEME")]
    theme: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Set up panic hook to ensure terminal is restored on panic
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_application(args);

    let _ = panic::take_hook();

    result
}

fn run_application(args: Args) -> Result<()> {
    let config = Config::resolve(args.home, args.file, args.default_language, args.theme)?;

    storage::ensure_home(&config)?;
    init_logging(&config);

    let snippets = storage::load_or_seed(&config)?;
    let mut app = App::new(config, snippets);

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode for terminal")?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let run_result = terminal
        .size()
        .context("Failed to read terminal size")
        .and_then(|size| {
            app.resize(size.width, size.height);
            let mut event_reader = CrosstermEventReader;
            let mut clipboard = WithFallback::new(SystemClipboard::new(), Osc52::new(io::stdout()));
            run_app(&mut terminal, &mut app, &mut event_reader, &mut clipboard)
        });

    // Restore terminal (always runs, even if run_app failed)
    let cleanup_result = cleanup_terminal(&mut terminal);

    run_result?;
    cleanup_result?;

    persist(&app)
}

/// Write the final collection over the snippet index.
fn persist(app: &App) -> Result<()> {
    let path = app.config.index_path();
    if let Err(err) = storage::save(&path, app.all_snippets()) {
        tracing::error!(error = %format!("{:#}", err), "final save failed");
        return Err(err);
    }
    tracing::info!(
        path = %path.display(),
        count = app.all_snippets().len(),
        "saved snippet index"
    );
    Ok(())
}

/// Send logs to `<home>/snipbox.log`; stdout belongs to the interface.
fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_env("SNIPBOX_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    match OpenOptions::new()
        .create(true)
        .append(true)
        .open(config.log_path())
    {
        Ok(file) => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init();
        }
        Err(_) => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::sink)
                .try_init();
        }
    }
}

/// Clean up terminal state
fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;

    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to restore terminal")?;

    terminal.show_cursor().context("Failed to show cursor")?;

    Ok(())
}

fn run_app<B>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    event_reader: &mut dyn EventReader,
    clipboard: &mut dyn Clipboard,
) -> Result<()>
where
    B: Backend,
    B::Error: Send + Sync + 'static,
{
    loop {
        terminal
            .draw(|f| ui::render(f, app))
            .context("Failed to draw terminal UI")?;

        let Some(event) = event_reader.read_event(POLL_TIMEOUT)? else {
            continue;
        };

        app.handle_event(event);

        if let Some(text) = app.take_clipboard() {
            match clipboard.set(&text) {
                Ok(via) => tracing::debug!(via, bytes = text.len(), "copied to clipboard"),
                Err(err) => {
                    tracing::warn!(error = %format!("{:#}", err), "clipboard write failed");
                    app.status = Some(Status {
                        text: "Copy failed".to_string(),
                        kind: StatusKind::Error,
                    });
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
