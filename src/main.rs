mod app;
mod audio;
mod config;
mod overlays;
mod panels;
mod placeholders;
mod storage;
mod task_list;
mod terminal;
mod ui;
mod util;

use std::fs;
use std::io;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::prelude::*;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use app::App;
use audio::Chime;
use config::{Cli, Config};
use storage::JsonStore;
use terminal::TerminalGuard;

fn main() -> Result<()> {
    let config = Config::from_cli(Cli::parse());
    let _log_guard = init_tracing(&config)?;
    tracing::info!(store = %config.store_path.display(), "starting five-tasks");

    let mut store_error = None;
    let store = JsonStore::open(&config.store_path).unwrap_or_else(|e| {
        // Keep the unreadable file intact and work in memory
        store_error = Some(format!("{e}. Changes will not be saved."));
        JsonStore::in_memory()
    });
    tracing::debug!(persisted = store.path().is_some(), "store ready");

    let placeholder = placeholders::pick_placeholder(&mut rand::thread_rng());
    let chime = if config.mute { None } else { Chime::new() };
    if !config.mute && chime.is_none() {
        tracing::warn!("no audio output device, chime disabled");
    }

    let mut app = App::new(store, placeholder, chime);
    if let Some(message) = store_error {
        app.report_error(message);
    }

    let mut guard = TerminalGuard::new("five-tasks")?;
    tracing::debug!(keyboard_enhanced = guard.keyboard_enhanced(), "terminal ready");

    let result = run(guard.terminal_mut(), &mut app);
    app.unload();
    drop(guard);

    if let Err(ref e) = result {
        tracing::error!(error = %e, "event loop failed");
    }
    result
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    let tick_rate = Duration::from_millis(100);
    app.on_resize(terminal.size()?.width);

    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        if event::poll(tick_rate)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                Event::Resize(width, _) => app.on_resize(width),
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Log to a file; stdout belongs to the terminal UI.
fn init_tracing(config: &Config) -> Result<WorkerGuard> {
    let log_dir = match config.log_file.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => std::path::PathBuf::from("."),
    };
    let file_name = config
        .log_file
        .file_name()
        .context("log file path has no file name")?;
    fs::create_dir_all(&log_dir)
        .with_context(|| format!("create log directory {}", log_dir.display()))?;

    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(&log_dir, file_name));
    let filter = EnvFilter::try_new(&config.log_level).context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;

    Ok(guard)
}
