//! CapTrack - Capstone Project Tracker
//!
//! Terminal client for the demo-mode CapTrack session: sign in with any
//! credentials, land on the dashboard for the role inferred from the email,
//! and sign out through the confirmation dialog.

use std::io;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing::{error, info};

use captrack::application::{App, Session, SystemClock};
use captrack::cli::Cli;
use captrack::infrastructure::{init_logging, SessionFileStore};
use captrack::presentation::{render_ui, InputHandler};

/// Longest wait for input when no session transition is pending.
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Entry point for the CapTrack terminal client.
///
/// Parses the command line, sets up logging and the optional session file,
/// then runs the event loop until the user quits.
///
/// # Errors
///
/// Returns an error if logging or terminal setup fails, or if the terminal
/// interface fails during runtime.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(&cli.log_file)?;

    let mut session = Session::new(cli.session_config(), SystemClock);
    if cli.remember {
        let store = SessionFileStore::new(&cli.session_file);
        match store.load() {
            Ok(Some(identity)) => {
                session.restore(identity);
            }
            Ok(None) => {}
            Err(e) => error!(error = %e, "discarding stored session"),
        }
        session.subscribe(move |snapshot| store.sync(snapshot));
    }
    info!(remember = cli.remember, "captrack starting");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(session);
    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!(error = %err, "terminal loop failed");
        println!("{err:?}");
    }

    Ok(())
}

/// Main application event loop.
///
/// Waits for key presses no longer than the next session deadline so that
/// timed transitions complete and redraw on time.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        app.tick();
        terminal.draw(|f| render_ui(f, app))?;

        if app.should_quit {
            return Ok(());
        }

        let timeout = app
            .session
            .next_deadline()
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
            .unwrap_or(IDLE_POLL)
            .min(IDLE_POLL);

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    InputHandler::handle_key_event(app, key.code, key.modifiers);
                }
            }
        }
    }
}
