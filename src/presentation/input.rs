use crate::application::{App, Route};
use crate::domain::Role;
use crossterm::event::{KeyCode, KeyModifiers};

/// Maps key presses to application actions.
///
/// Keys are interpreted according to the current route: the login form takes
/// typed text, the dashboard takes navigation keys and the sign-out dialog
/// takes a yes/no answer.
pub struct InputHandler;

impl InputHandler {
    /// Handles a single key press. Ctrl+C quits from any screen.
    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) && key == KeyCode::Char('c') {
            app.should_quit = true;
            return;
        }

        match app.route() {
            Route::Login { signing_in: false } => Self::handle_login_mode(app, key),
            Route::Dashboard {
                logout_dialog: true,
                ..
            } => Self::handle_logout_dialog(app, key),
            Route::Dashboard { .. } => Self::handle_dashboard_mode(app, key),
            // The form is disabled while a transition is pending
            Route::Login { signing_in: true } | Route::SigningOut => {}
        }
    }

    fn handle_login_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter => app.submit_login(),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => app.toggle_focus(),
            KeyCode::Backspace => app.backspace(),
            KeyCode::F(1) => app.fill_demo_account(Role::Student),
            KeyCode::F(2) => app.fill_demo_account(Role::Faculty),
            KeyCode::F(3) => app.fill_demo_account(Role::Admin),
            KeyCode::Esc => app.should_quit = true,
            KeyCode::Char(c) => app.type_char(c),
            _ => {}
        }
    }

    fn handle_dashboard_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Up | KeyCode::Char('k') => app.previous_view(),
            KeyCode::Down | KeyCode::Char('j') => app.next_view(),
            KeyCode::Char('o') => app.request_logout(),
            KeyCode::Char('q') => app.should_quit = true,
            _ => {}
        }
    }

    fn handle_logout_dialog(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Char('y') | KeyCode::Enter => app.confirm_logout(),
            KeyCode::Char('n') | KeyCode::Esc => app.cancel_logout(),
            _ => {}
        }
    }
}
