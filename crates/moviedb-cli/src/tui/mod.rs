//! Interactive movie browser.
//!
//! Fetches run as spawned tasks and report back over a channel; the event
//! loop waits on that channel for one tick before polling the keyboard, so
//! the UI stays responsive on a current-thread runtime.

/// Browser state types.
pub mod app;
mod ui;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use moviedb_api::tmdb::TmdbClient;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

use self::app::{App, Dispatch, InputMode, Reply};
use crate::route::Route;

/// How long the loop waits for a finished fetch before polling input.
const TICK: Duration = Duration::from_millis(100);

/// What the event loop does after a key press.
enum Command {
    /// Keep going.
    Continue,
    /// Leave the browser.
    Quit,
    /// Spawn a fetch.
    Fetch(Dispatch),
}

impl From<Option<Dispatch>> for Command {
    fn from(dispatch: Option<Dispatch>) -> Self {
        dispatch.map_or(Self::Continue, Self::Fetch)
    }
}

/// Runs the browser starting at `route`.
///
/// # Errors
///
/// Returns an error if terminal setup or event handling fails.
pub async fn run_browser(client: TmdbClient, route: Route) -> Result<()> {
    let client = Arc::new(client);
    let (tx, mut rx) = unbounded_channel();

    let (mut app, dispatch) = App::new(route);
    if let Some(dispatch) = dispatch {
        spawn_fetch(&client, &tx, dispatch);
    }

    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen)
        .context("failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    let result = run_event_loop(&mut terminal, &mut app, &client, &tx, &mut rx).await;

    // Cleanup (always attempt even if event loop failed)
    disable_raw_mode().context("failed to disable raw mode")?;
    crossterm::execute!(io::stdout(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;

    result
}

/// Main event loop.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    client: &Arc<TmdbClient>,
    tx: &UnboundedSender<Reply>,
    rx: &mut UnboundedReceiver<Reply>,
) -> Result<()> {
    loop {
        terminal
            .draw(|frame| ui::draw(frame, app))
            .context("failed to draw TUI")?;

        if let Ok(Some(reply)) = tokio::time::timeout(TICK, rx.recv()).await {
            app.apply(reply);
            while let Ok(reply) = rx.try_recv() {
                app.apply(reply);
            }
        }

        while event::poll(Duration::ZERO).context("failed to poll events")? {
            let Event::Key(key) = event::read().context("failed to read event")? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            let command = match app.input_mode {
                InputMode::Search => handle_search_input(app, key.code),
                InputMode::Normal => handle_normal_input(app, key.code, key.modifiers),
            };
            match command {
                Command::Continue => {}
                Command::Quit => return Ok(()),
                Command::Fetch(dispatch) => spawn_fetch(client, tx, dispatch),
            }
        }
    }
}

/// Runs a fetch on the runtime and sends the reply back to the loop.
fn spawn_fetch(client: &Arc<TmdbClient>, tx: &UnboundedSender<Reply>, dispatch: Dispatch) {
    let client = Arc::clone(client);
    let tx = tx.clone();
    tokio::spawn(async move {
        let outcome = dispatch.fetch.run(client.as_ref()).await;
        // The loop may already be gone when the browser quits mid-fetch.
        let _ = tx.send(Reply {
            generation: dispatch.generation,
            outcome,
        });
    });
}

/// Handles key input in search mode.
fn handle_search_input(app: &mut App, key: KeyCode) -> Command {
    match key {
        KeyCode::Esc => {
            app.cancel_search();
            Command::Continue
        }
        KeyCode::Enter => app.submit_search().into(),
        KeyCode::Backspace => {
            app.search_input.pop();
            Command::Continue
        }
        KeyCode::Char(c) => {
            app.search_input.push(c);
            Command::Continue
        }
        _ => Command::Continue,
    }
}

/// Handles key input in normal mode.
fn handle_normal_input(app: &mut App, key: KeyCode, modifiers: KeyModifiers) -> Command {
    match key {
        KeyCode::Char('q') => Command::Quit,
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Command::Quit,
        KeyCode::Up | KeyCode::Char('k') => {
            app.move_up();
            Command::Continue
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.move_down();
            Command::Continue
        }
        KeyCode::Right => app.next_page().into(),
        KeyCode::Left => app.previous_page().into(),
        KeyCode::Enter => app.open_selected().into(),
        KeyCode::Backspace | KeyCode::Esc => app.back().into(),
        KeyCode::Char('g' | 'h') => app.navigate(Route::Home).into(),
        KeyCode::Char('p') => app.navigate(Route::Popular).into(),
        KeyCode::Char('t') => app.navigate(Route::TopRated).into(),
        KeyCode::Char('r') => app.reload().into(),
        KeyCode::Char('/') => {
            app.start_search();
            Command::Continue
        }
        KeyCode::Char('o') => {
            if let Some(url) = app.external_url()
                && let Err(e) = open::that(&url)
            {
                tracing::warn!(error = %e, %url, "failed to open browser");
            }
            Command::Continue
        }
        _ => Command::Continue,
    }
}
