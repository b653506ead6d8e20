//! Session state machine.
//!
//! The session owns the signed-in identity and the sign-out confirmation flow:
//!
//! ```text
//! Anonymous -> Authenticating -> Authenticated -> LogoutRequested -> LoggingOut -> Anonymous
//!                                      ^                |
//!                                      +--- cancel -----+
//! ```
//!
//! Signing in and signing out each carry a simulated delay. The delay is
//! measured on an injected [`Clock`]: the operation records a deadline and
//! [`Session::poll`] completes it once the deadline has passed. A zero delay
//! completes inside the call that started it.

use super::clock::{Clock, SystemClock};
use crate::domain::{DemoAccounts, RoleRules, SessionPhase, SessionSnapshot, UserIdentity};
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, info};

pub const DEFAULT_LOGIN_DELAY: Duration = Duration::from_millis(1000);
pub const DEFAULT_LOGOUT_DELAY: Duration = Duration::from_millis(800);

/// Simulated round-trip times for the two timed transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub login_delay: Duration,
    pub logout_delay: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            login_delay: DEFAULT_LOGIN_DELAY,
            logout_delay: DEFAULT_LOGOUT_DELAY,
        }
    }
}

impl SessionConfig {
    /// No delays: every transition finishes inside the call that starts it.
    pub fn immediate() -> Self {
        Self {
            login_delay: Duration::ZERO,
            logout_delay: Duration::ZERO,
        }
    }
}

/// Handle returned by [`Session::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&SessionSnapshot)>;

#[derive(Debug, Clone)]
enum State {
    Anonymous,
    Authenticating {
        email: String,
        /// Identity still on screen while the new login is pending.
        previous: Option<UserIdentity>,
        ready_at: Instant,
    },
    Authenticated(UserIdentity),
    LogoutRequested(UserIdentity),
    LoggingOut {
        user: UserIdentity,
        done_at: Instant,
    },
}

impl State {
    fn phase(&self) -> SessionPhase {
        match self {
            State::Anonymous => SessionPhase::Anonymous,
            State::Authenticating { .. } => SessionPhase::Authenticating,
            State::Authenticated(_) => SessionPhase::Authenticated,
            State::LogoutRequested(_) => SessionPhase::LogoutRequested,
            State::LoggingOut { .. } => SessionPhase::LoggingOut,
        }
    }
}

/// The current user and the transitions that change it.
///
/// # Examples
///
/// ```
/// use captrack::application::{Session, SessionConfig, SystemClock};
/// use captrack::domain::{Role, SessionPhase};
///
/// let mut session = Session::new(SessionConfig::immediate(), SystemClock);
/// assert!(session.login("faculty@uc.edu.ph", "faculty123"));
/// assert_eq!(session.user().map(|u| u.role), Some(Role::Faculty));
///
/// session.request_logout();
/// assert!(session.show_logout_dialog());
/// session.confirm_logout();
/// assert_eq!(session.phase(), SessionPhase::Anonymous);
/// ```
pub struct Session {
    state: State,
    config: SessionConfig,
    accounts: DemoAccounts,
    rules: RoleRules,
    clock: Box<dyn Clock>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default(), SystemClock)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("state", &self.state)
            .field("config", &self.config)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Creates an anonymous session using the demo accounts and role rules.
    pub fn new(config: SessionConfig, clock: impl Clock + 'static) -> Self {
        let accounts = DemoAccounts::default();
        let rules = RoleRules::demo(&accounts);
        Self {
            state: State::Anonymous,
            config,
            accounts,
            rules,
            clock: Box::new(clock),
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Replaces the account table and rule list used to resolve identities.
    pub fn with_directory(mut self, accounts: DemoAccounts, rules: RoleRules) -> Self {
        self.accounts = accounts;
        self.rules = rules;
        self
    }

    pub fn accounts(&self) -> &DemoAccounts {
        &self.accounts
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.phase()
    }

    pub fn user(&self) -> Option<&UserIdentity> {
        match &self.state {
            State::Anonymous => None,
            State::Authenticating { previous, .. } => previous.as_ref(),
            State::Authenticated(user)
            | State::LogoutRequested(user)
            | State::LoggingOut { user, .. } => Some(user),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, State::Authenticating { .. })
    }

    pub fn is_logging_out(&self) -> bool {
        matches!(self.state, State::LoggingOut { .. })
    }

    pub fn show_logout_dialog(&self) -> bool {
        matches!(self.state, State::LogoutRequested(_))
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            user: self.user().cloned(),
            is_loading: self.is_loading(),
            is_logging_out: self.is_logging_out(),
            show_logout_dialog: self.show_logout_dialog(),
            phase: self.phase(),
        }
    }

    /// Maps an email to the identity a completed login would issue.
    pub fn resolve_identity(&self, email: &str) -> UserIdentity {
        match self.rules.resolve(email) {
            Some(role) => self.accounts.identity(role).clone(),
            None => self.accounts.synthesize_student(email),
        }
    }

    /// Starts a sign-in. Demo mode accepts every credential pair, so this
    /// always returns `true`.
    ///
    /// Any pending transition is replaced. The identity is resolved when the
    /// login delay has passed.
    pub fn login(&mut self, email: &str, _password: &str) -> bool {
        let ready_at = self.clock.now() + self.config.login_delay;
        let previous = self.user().cloned();
        info!(%email, "sign-in started");

        self.state = State::Authenticating {
            email: email.to_string(),
            previous,
            ready_at,
        };
        self.notify();
        self.poll();
        true
    }

    /// Opens the sign-out confirmation. Only valid while authenticated.
    pub fn request_logout(&mut self) -> bool {
        self.transition("request_logout", |state| match state {
            State::Authenticated(user) => Ok(State::LogoutRequested(user)),
            other => Err(other),
        })
    }

    /// Closes the sign-out confirmation and keeps the user signed in.
    pub fn cancel_logout(&mut self) -> bool {
        self.transition("cancel_logout", |state| match state {
            State::LogoutRequested(user) => Ok(State::Authenticated(user)),
            other => Err(other),
        })
    }

    /// Accepts the sign-out confirmation. The user stays visible until the
    /// logout delay has passed.
    pub fn confirm_logout(&mut self) -> bool {
        let done_at = self.clock.now() + self.config.logout_delay;
        let started = self.transition("confirm_logout", |state| match state {
            State::LogoutRequested(user) => Ok(State::LoggingOut { user, done_at }),
            other => Err(other),
        });
        if started {
            info!("sign-out started");
            self.poll();
        }
        started
    }

    /// Signs out at once, skipping the confirmation and the delay.
    pub fn logout(&mut self) {
        if matches!(self.state, State::Anonymous) {
            return;
        }
        info!(phase = ?self.phase(), "signed out immediately");
        self.state = State::Anonymous;
        self.notify();
    }

    /// Re-enters a stored session. Ignored unless the session is anonymous.
    pub fn restore(&mut self, identity: UserIdentity) -> bool {
        let restored = self.transition("restore", |state| match state {
            State::Anonymous => Ok(State::Authenticated(identity)),
            other => Err(other),
        });
        if restored {
            info!(email = ?self.user().map(|u| u.email.as_str()), "session restored");
        }
        restored
    }

    /// When the pending timed transition, if any, is due.
    pub fn next_deadline(&self) -> Option<Instant> {
        match &self.state {
            State::Authenticating { ready_at, .. } => Some(*ready_at),
            State::LoggingOut { done_at, .. } => Some(*done_at),
            _ => None,
        }
    }

    /// Finishes a pending timed transition whose deadline has passed.
    ///
    /// Returns `true` when the state changed.
    pub fn poll(&mut self) -> bool {
        let now = self.clock.now();
        let next = match &self.state {
            State::Authenticating {
                email, ready_at, ..
            } if now >= *ready_at => {
                let user = self.resolve_identity(email);
                info!(email = %user.email, role = %user.role, "signed in");
                State::Authenticated(user)
            }
            State::LoggingOut { done_at, .. } if now >= *done_at => {
                info!("signed out");
                State::Anonymous
            }
            _ => return false,
        };

        self.state = next;
        self.notify();
        true
    }

    /// Registers a listener that receives a snapshot after every change.
    pub fn subscribe(&mut self, listener: impl FnMut(&SessionSnapshot) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    fn transition<F>(&mut self, operation: &'static str, step: F) -> bool
    where
        F: FnOnce(State) -> Result<State, State>,
    {
        let current = std::mem::replace(&mut self.state, State::Anonymous);
        match step(current) {
            Ok(next) => {
                self.state = next;
                self.notify();
                true
            }
            Err(unchanged) => {
                debug!(operation, phase = ?unchanged.phase(), "ignored in current phase");
                self.state = unchanged;
                false
            }
        }
    }

    fn notify(&mut self) {
        if self.listeners.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        for (_, listener) in self.listeners.iter_mut() {
            listener(&snapshot);
        }
    }
}
