//! Front-end state for the terminal client.
//!
//! `App` owns the session and everything the screens need besides it: the
//! login form buffers, the selected dashboard view and the status line.

use super::routing::{nav_items, route, NavItem, Route};
use super::session::Session;
use crate::domain::{validate_credentials, CredentialErrors, Role, SessionPhase};

pub const WELCOME_MESSAGE: &str = "Login Successful: Welcome to CapTrack!";
pub const LOGIN_FAILED_MESSAGE: &str =
    "Login Failed: The email or password you entered is incorrect.";
pub const SIGNED_OUT_MESSAGE: &str = "Signed out. Sign in again to access your account.";

/// Which login form field receives typed characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Email,
    Password,
}

/// Main application state.
///
/// # Examples
///
/// ```
/// use captrack::application::{App, Route, Session, SessionConfig, SystemClock};
/// use captrack::domain::Role;
///
/// let mut app = App::new(Session::new(SessionConfig::immediate(), SystemClock));
/// app.fill_demo_account(Role::Admin);
/// app.submit_login();
/// assert_eq!(app.route(), Route::Dashboard { role: Role::Admin, logout_dialog: false });
/// ```
#[derive(Debug)]
pub struct App {
    /// Session state machine driving the screens
    pub session: Session,
    /// Email field buffer
    pub email_input: String,
    /// Password field buffer (rendered masked)
    pub password_input: String,
    /// Field receiving typed characters
    pub focus: LoginField,
    /// Field errors from the last rejected submission
    pub field_errors: CredentialErrors,
    /// Temporary status message to display
    pub status_message: Option<String>,
    /// Index into the current role's navigation items
    pub selected_nav: usize,
    /// Set when the user asks to leave; the main loop exits on it
    pub should_quit: bool,
    last_phase: SessionPhase,
}

impl Default for App {
    fn default() -> Self {
        Self::new(Session::default())
    }
}

impl App {
    /// Creates the application state around an existing session.
    ///
    /// The session may already be signed in, for example after restoring a
    /// remembered identity.
    pub fn new(session: Session) -> Self {
        let last_phase = session.phase();
        Self {
            session,
            email_input: String::new(),
            password_input: String::new(),
            focus: LoginField::Email,
            field_errors: CredentialErrors::default(),
            status_message: None,
            selected_nav: 0,
            should_quit: false,
            last_phase,
        }
    }

    /// Screen to show for the current session state.
    pub fn route(&self) -> Route {
        route(&self.session.snapshot())
    }

    /// Role of the signed-in user, if any.
    pub fn role(&self) -> Option<Role> {
        self.session.user().map(|user| user.role)
    }

    /// Navigation item selected on the dashboard.
    ///
    /// Returns `None` when nobody is signed in.
    pub fn current_view(&self) -> Option<NavItem> {
        let items = nav_items(self.role()?);
        items.get(self.selected_nav).or_else(|| items.first()).copied()
    }

    /// Appends a character to the focused login field.
    pub fn type_char(&mut self, c: char) {
        match self.focus {
            LoginField::Email => self.email_input.push(c),
            LoginField::Password => self.password_input.push(c),
        }
    }

    /// Removes the last character of the focused login field.
    pub fn backspace(&mut self) {
        match self.focus {
            LoginField::Email => self.email_input.pop(),
            LoginField::Password => self.password_input.pop(),
        };
    }

    /// Moves focus between the email and password fields.
    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            LoginField::Email => LoginField::Password,
            LoginField::Password => LoginField::Email,
        };
    }

    /// Copies a demo account's credentials into the login form.
    pub fn fill_demo_account(&mut self, role: Role) {
        let account = self.session.accounts().account(role);
        self.email_input = account.email.clone();
        self.password_input = account.password.clone();
        self.field_errors = CredentialErrors::default();
        self.status_message = Some(format!(
            "Demo Account Loaded: {} credentials have been filled in.",
            role.title()
        ));
    }

    /// Validates the form and, if it passes, starts a sign-in.
    pub fn submit_login(&mut self) {
        if self.session.is_loading() {
            return;
        }

        if let Err(errors) = validate_credentials(&self.email_input, &self.password_input) {
            self.status_message = Some(format!("Validation Error: {}", errors));
            self.field_errors = errors;
            return;
        }

        self.field_errors = CredentialErrors::default();
        self.status_message = None;
        if !self.session.login(&self.email_input, &self.password_input) {
            self.status_message = Some(LOGIN_FAILED_MESSAGE.to_string());
        }
        self.sync();
    }

    /// Selects the next dashboard view, wrapping to the first.
    pub fn next_view(&mut self) {
        if let Some(role) = self.role() {
            self.selected_nav = (self.selected_nav + 1) % nav_items(role).len();
        }
    }

    /// Selects the previous dashboard view, wrapping to the last.
    pub fn previous_view(&mut self) {
        if let Some(role) = self.role() {
            let len = nav_items(role).len();
            self.selected_nav = (self.selected_nav + len - 1) % len;
        }
    }

    /// Opens the sign-out confirmation dialog.
    pub fn request_logout(&mut self) {
        self.session.request_logout();
        self.sync();
    }

    /// Dismisses the sign-out dialog and stays on the dashboard.
    pub fn cancel_logout(&mut self) {
        self.session.cancel_logout();
        self.sync();
    }

    /// Accepts the sign-out dialog and starts signing out.
    pub fn confirm_logout(&mut self) {
        self.session.confirm_logout();
        self.sync();
    }

    /// Text of the sign-out confirmation dialog.
    pub fn logout_prompt(&self) -> String {
        match self.session.user() {
            Some(user) if !user.name.is_empty() => {
                format!("{}, are you sure you want to sign out?", user.name)
            }
            _ => "Are you sure you want to sign out?".to_string(),
        }
    }

    /// Advances pending session transitions. Call once per loop iteration.
    ///
    /// Completed sign-ins reset the dashboard view and show the welcome
    /// message; completed sign-outs clear the login form.
    pub fn tick(&mut self) {
        self.session.poll();
        self.sync();
    }

    fn sync(&mut self) {
        let phase = self.session.phase();
        if phase == self.last_phase {
            return;
        }

        match (self.last_phase, phase) {
            (
                SessionPhase::Anonymous | SessionPhase::Authenticating,
                SessionPhase::Authenticated,
            ) => {
                self.selected_nav = 0;
                self.clear_form();
                self.status_message = Some(WELCOME_MESSAGE.to_string());
            }
            (_, SessionPhase::Anonymous) => {
                self.selected_nav = 0;
                self.clear_form();
                self.status_message = Some(SIGNED_OUT_MESSAGE.to_string());
            }
            (_, SessionPhase::LogoutRequested) | (_, SessionPhase::LoggingOut) => {
                self.status_message = None;
            }
            _ => {}
        }
        self.last_phase = phase;
    }

    fn clear_form(&mut self) {
        self.email_input.clear();
        self.password_input.clear();
        self.focus = LoginField::Email;
        self.field_errors = CredentialErrors::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{ManualClock, SessionConfig, DEFAULT_LOGIN_DELAY, DEFAULT_LOGOUT_DELAY};
    use crate::domain::ValidationError;
    use std::rc::Rc;

    fn immediate_app() -> App {
        App::new(Session::new(SessionConfig::immediate(), ManualClock::new()))
    }

    fn timed_app() -> (App, Rc<ManualClock>) {
        let clock = Rc::new(ManualClock::new());
        let session = Session::new(SessionConfig::default(), Rc::clone(&clock));
        (App::new(session), clock)
    }

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            app.type_char(c);
        }
    }

    #[test]
    fn test_app_default() {
        let app = App::default();
        assert_eq!(app.route(), Route::Login { signing_in: false });
        assert_eq!(app.focus, LoginField::Email);
        assert!(app.email_input.is_empty());
        assert!(app.status_message.is_none());
        assert!(!app.should_quit);
        assert!(app.current_view().is_none());
    }

    #[test]
    fn test_typing_follows_focus() {
        let mut app = immediate_app();
        type_str(&mut app, "a@b.co");
        app.toggle_focus();
        type_str(&mut app, "secret!");
        app.backspace();

        assert_eq!(app.email_input, "a@b.co");
        assert_eq!(app.password_input, "secret");
        app.toggle_focus();
        assert_eq!(app.focus, LoginField::Email);
    }

    #[test]
    fn test_invalid_form_never_reaches_session() {
        let mut app = immediate_app();
        type_str(&mut app, "not-an-email");
        app.toggle_focus();
        type_str(&mut app, "123");

        app.submit_login();
        assert_eq!(app.session.phase(), SessionPhase::Anonymous);
        assert_eq!(app.field_errors.email, Some(ValidationError::InvalidEmail));
        assert_eq!(
            app.field_errors.password,
            Some(ValidationError::PasswordTooShort { min: 6 })
        );
        assert!(app.status_message.as_ref().unwrap().starts_with("Validation Error"));
    }

    #[test]
    fn test_fill_demo_account() {
        let mut app = immediate_app();
        app.fill_demo_account(Role::Faculty);
        assert_eq!(app.email_input, "faculty@uc.edu.ph");
        assert_eq!(app.password_input, "faculty123");
        assert_eq!(
            app.status_message.as_deref(),
            Some("Demo Account Loaded: Faculty credentials have been filled in.")
        );
    }

    #[test]
    fn test_successful_login_flow() {
        let (mut app, clock) = timed_app();
        app.fill_demo_account(Role::Student);
        app.submit_login();
        assert_eq!(app.route(), Route::Login { signing_in: true });

        clock.advance(DEFAULT_LOGIN_DELAY);
        app.tick();
        assert_eq!(
            app.route(),
            Route::Dashboard {
                role: Role::Student,
                logout_dialog: false
            }
        );
        assert_eq!(app.status_message.as_deref(), Some(WELCOME_MESSAGE));
        assert!(app.password_input.is_empty());
        assert_eq!(app.current_view().unwrap().id, "dashboard");
    }

    #[test]
    fn test_submit_ignored_while_loading() {
        let (mut app, clock) = timed_app();
        app.fill_demo_account(Role::Student);
        app.submit_login();
        let deadline = app.session.next_deadline();

        clock.advance(DEFAULT_LOGIN_DELAY / 2);
        app.submit_login();
        assert_eq!(app.session.next_deadline(), deadline);
    }

    #[test]
    fn test_navigation_wraps() {
        let mut app = immediate_app();
        app.fill_demo_account(Role::Admin);
        app.submit_login();
        assert_eq!(app.status_message.as_deref(), Some(WELCOME_MESSAGE));

        app.previous_view();
        assert_eq!(app.current_view().unwrap().id, "settings");
        app.next_view();
        assert_eq!(app.current_view().unwrap().id, "dashboard");
        app.next_view();
        assert_eq!(app.current_view().unwrap().label, "User Management");
    }

    #[test]
    fn test_navigation_resets_on_login() {
        let mut app = immediate_app();
        app.fill_demo_account(Role::Admin);
        app.submit_login();
        app.next_view();
        app.next_view();
        app.session.logout();
        app.tick();

        app.fill_demo_account(Role::Student);
        app.submit_login();
        assert_eq!(app.selected_nav, 0);
    }

    #[test]
    fn test_logout_dialog_cancel() {
        let mut app = immediate_app();
        app.fill_demo_account(Role::Faculty);
        app.submit_login();

        app.request_logout();
        assert_eq!(
            app.route(),
            Route::Dashboard {
                role: Role::Faculty,
                logout_dialog: true
            }
        );
        assert_eq!(
            app.logout_prompt(),
            "Dr. Sarah Wilson, are you sure you want to sign out?"
        );

        app.cancel_logout();
        assert_eq!(
            app.route(),
            Route::Dashboard {
                role: Role::Faculty,
                logout_dialog: false
            }
        );
    }

    #[test]
    fn test_logout_confirm_shows_signing_out() {
        let (mut app, clock) = timed_app();
        app.fill_demo_account(Role::Admin);
        app.submit_login();
        clock.advance(DEFAULT_LOGIN_DELAY);
        app.tick();

        app.request_logout();
        app.confirm_logout();
        assert_eq!(app.route(), Route::SigningOut);

        clock.advance(DEFAULT_LOGOUT_DELAY);
        app.tick();
        assert_eq!(app.route(), Route::Login { signing_in: false });
        assert_eq!(app.status_message.as_deref(), Some(SIGNED_OUT_MESSAGE));
    }

    #[test]
    fn test_logout_prompt_without_user() {
        let app = immediate_app();
        assert_eq!(app.logout_prompt(), "Are you sure you want to sign out?");
    }
}
