//! Terminal UI for hanoi

mod app;
mod audio;
mod input;
mod layout;
mod ui;

pub use audio::TerminalBell;
pub use input::{KeyAction, key_action, pointer_event};
pub use layout::BoardLayout;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use hanoi_core::{ScoreLedger, Session};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use tokio::time::{Duration, sleep};
use tracing::{error, info, instrument};

use crate::{GameConfig, JsonScoreStore};
use app::App;

/// Log file written while the TUI owns the terminal.
pub const LOG_FILE: &str = "hanoi.log";

/// Target frame interval.
const FRAME: Duration = Duration::from_millis(16);

/// Run the game in the terminal.
pub async fn run_tui(config: GameConfig) -> Result<()> {
    // Setup logging to file to avoid interfering with TUI
    let log_file = std::fs::File::create(LOG_FILE).context("Failed to create log file")?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(crate::DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init(); // Don't panic if already initialized

    info!("Starting hanoi TUI");

    let launch = config.launch().context("Invalid board parameters")?;
    let ledger = ScoreLedger::new(
        JsonScoreStore::new(config.scores_path().clone()),
        config.player_name().clone(),
    );
    let session = Session::new(launch, ledger, config.step_duration())?;
    let mut app = App::new(session);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_game(&mut terminal, &mut app).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!(error = ?err, "Game loop error");
        return Err(err);
    }

    info!("TUI exited");
    Ok(())
}

/// Frame loop: draw, drain input, advance the session.
#[instrument(skip_all)]
async fn run_game(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<JsonScoreStore>,
) -> Result<()> {
    loop {
        let status = app.status_message().to_string();
        let mut layout = None;
        terminal.draw(|f| {
            layout = Some(ui::draw(f, app.session(), &status));
        })?;
        if let Some(layout) = layout {
            app.set_layout(layout);
        }

        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if let Some(action) = key_action(key.code) {
                        app.key(action)?;
                    }
                }
                Event::Mouse(mouse) => {
                    if let Some(pointer) = pointer_event(mouse) {
                        app.pointer(pointer)?;
                    }
                }
                _ => {}
            }
        }

        if app.should_quit() {
            return Ok(());
        }

        app.tick()?;
        sleep(FRAME).await;
    }
}
