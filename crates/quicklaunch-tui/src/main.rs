//! quicklaunch - type a few letters, press enter, run the command.
//!
//! Loads the candidate registry (a commands file or installed applications),
//! then either runs the interactive terminal launcher or prints matches for a
//! one-shot query.

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures_util::StreamExt;
use quicklaunch_core::config::{Config, Directories};
use quicklaunch_core::platform::{self, current_os_identifier};
use quicklaunch_core::registry::{
    DesktopSource, FileSource, Registry, RegistrySource, load_registry,
};
use quicklaunch_core::Session;
use quicklaunch_tui::app::App;
use quicklaunch_tui::render::render;
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use std::io;
use std::path::Path;

mod cli;

use cli::{Cli, Commands};

/// Set up logging with file output. The launcher owns the terminal, so logs
/// go to a timestamped file in the cache directory.
fn setup_logging(debug_flag: bool, log_dir: &Path) {
    let level = if debug_flag || cfg!(debug_assertions) {
        "debug"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let log_dir = if std::fs::create_dir_all(log_dir).is_ok() {
        log_dir.to_path_buf()
    } else {
        std::env::temp_dir()
    };

    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let log_filename = format!("quicklaunch-{timestamp}.log");

    #[cfg(unix)]
    {
        let symlink_path = log_dir.join("quicklaunch.log");
        let _ = std::fs::remove_file(&symlink_path);
        let _ = std::os::unix::fs::symlink(log_dir.join(&log_filename), symlink_path);
    }

    let file_appender = tracing_appender::rolling::never(&log_dir, &log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    std::mem::forget(guard);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .with(filter)
        .init();
}

/// Pick the registry source: CLI file, configured file, or app discovery.
fn registry_source(cli: &Cli, config: &Config) -> Box<dyn RegistrySource> {
    match cli.config.as_ref().or(config.commands_file.as_ref()) {
        Some(path) => Box::new(FileSource::new(path)),
        None => Box::new(DesktopSource::from_config(config)),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let dirs = Directories::new().ok();
    let log_dir = dirs
        .as_ref()
        .map_or_else(std::env::temp_dir, |d| d.logs.clone());
    setup_logging(cli.debug, &log_dir);

    let config = match &dirs {
        Some(dirs) => Config::load(&dirs.config_file).unwrap_or_else(|e| {
            tracing::warn!("Ignoring unreadable config: {}", e);
            Config::default()
        }),
        None => Config::default(),
    };

    if platform::detect().is_none() {
        tracing::warn!(
            "No runner for {}; selected commands will not start",
            current_os_identifier()
        );
    }

    let registry = load_registry(registry_source(&cli, &config).as_ref());

    match cli.command {
        Some(Commands::List { ref query, json }) => list(registry, query, json)?,
        Some(Commands::Tui) | None => run_tui(registry, cli.compat).await?,
    }

    Ok(())
}

/// Print the candidates matching `query`, one per line or as JSON.
fn list(registry: Registry, query: &str, json: bool) -> Result<()> {
    let mut session = Session::with_shell(registry, current_os_identifier());
    session.query_changed(query);

    if json {
        let matches: Vec<_> = session.filtered().collect();
        println!("{}", serde_json::to_string_pretty(&matches)?);
    } else {
        for candidate in session.filtered() {
            if candidate.description.is_empty() {
                println!("{}", candidate.title);
            } else {
                println!("{}\t{}", candidate.title, candidate.description);
            }
        }
    }
    Ok(())
}

/// Restores the terminal when the launcher exits, including on error.
struct TerminalGuard {
    compat: bool,
}

impl TerminalGuard {
    fn enter(compat: bool) -> Result<Self> {
        enable_raw_mode()?;
        if !compat {
            execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)?;
        }
        Ok(Self { compat })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        if !self.compat {
            let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        }
    }
}

async fn run_tui(registry: Registry, compat: bool) -> Result<()> {
    let mut session = Session::with_shell(registry, current_os_identifier());
    let mut app = App::new();
    for update in session.open() {
        app.apply(update);
    }

    let _guard = TerminalGuard::enter(compat)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    if compat {
        terminal.clear()?;
    }

    let mut events = EventStream::new();

    loop {
        terminal.draw(|f| render(f, &mut app, session.registry()))?;

        let Some(event) = events.next().await else {
            break;
        };

        let view_event = match event? {
            Event::Key(key) => app.on_key(key),
            Event::Mouse(mouse) if !compat => app.on_mouse(mouse),
            _ => None,
        };

        if let Some(view_event) = view_event {
            tracing::debug!("View event: {:?}", view_event);
            for update in session.handle(view_event) {
                app.apply(update);
            }
        }

        if app.should_quit() {
            break;
        }
    }

    if let Some(reason) = app.ended {
        tracing::info!("Launcher closed: {:?}", reason);
    }
    Ok(())
}
