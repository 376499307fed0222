use std::io;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use ratatui::Terminal;
use ratatui::crossterm::event;
use ratatui::crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::CrosstermBackend;
use tokio::sync::mpsc;

use paperfinder_core::{Overrides, Settings};

mod action;
mod app;
mod input;
mod theme;
mod view;

use action::Action;
use app::App;

/// Paper Finder TUI - search Crossref papers in a terminal popup.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Contact address sent to Crossref (polite pool)
    #[arg(long)]
    mailto: Option<String>,

    /// Path to the saved-state JSON file
    #[arg(long)]
    state: Option<PathBuf>,

    /// Directory CSV exports are written to
    #[arg(long)]
    download_dir: Option<PathBuf>,

    /// Color theme: hacker (default) or modern
    #[arg(long)]
    theme: Option<String>,
}

/// Route tracing output to a daily log file; the terminal is ours.
fn init_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let dir = dirs::cache_dir()?.join("paperfinder").join("logs");
    std::fs::create_dir_all(&dir).ok()?;
    let appender = tracing_appender::rolling::daily(dir, "paperfinder-tui.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Some(guard)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    let _log_guard = init_logging();

    // Resolve config from CLI flags > env vars > config file > defaults
    let config = paperfinder_core::config_file::load_config();
    let settings = Settings::resolve(
        &config,
        Overrides {
            mailto: args.mailto,
            state_path: args.state,
            download_dir: args.download_dir,
            theme: args.theme,
        }
        .with_env(),
    );
    let theme = theme::Theme::by_name(&settings.theme);

    // Saved params and results are in place before the first frame.
    let finder = paperfinder_core::open(&settings).await;

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    // Install panic hook that restores terminal before printing panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));

    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    // Drain any stray input events (e.g. Enter keypress from launching the command)
    while event::poll(Duration::from_millis(50)).unwrap_or(false) {
        let _ = event::read();
    }

    let (fetch_tx, mut fetch_rx) = mpsc::unbounded_channel();
    let mut app =
        App::new(finder, theme, settings.download_dir.clone()).with_fetch_channel(fetch_tx);

    let tick_rate = Duration::from_millis(100);

    loop {
        terminal.draw(|f| app.view(f))?;

        tokio::select! {
            Some(result) = fetch_rx.recv() => {
                app.finish_search(result).await;
            }
            maybe_event = async {
                if event::poll(tick_rate).unwrap_or(false) {
                    event::read().ok()
                } else {
                    None
                }
            } => {
                if let Some(evt) = maybe_event {
                    let action = input::map_event(&evt, app.input_mode());
                    app.update(action).await;
                }
            }
        }

        app.update(Action::Tick).await;

        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;

    Ok(())
}
