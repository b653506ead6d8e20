//! Screen selection derived from the session.

use crate::domain::{Role, SessionSnapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Full-screen "Signing out..." while the logout delay runs.
    SigningOut,
    /// Login form; `signing_in` overlays the "Signing in..." screen.
    Login { signing_in: bool },
    /// Role dashboard, optionally under the sign-out confirmation dialog.
    Dashboard { role: Role, logout_dialog: bool },
}

/// Picks the screen for a snapshot. Signing out wins over everything else,
/// then a missing user sends the viewer to the login form.
pub fn route(snapshot: &SessionSnapshot) -> Route {
    if snapshot.is_logging_out {
        return Route::SigningOut;
    }

    match &snapshot.user {
        None => Route::Login {
            signing_in: snapshot.is_loading,
        },
        Some(user) => Route::Dashboard {
            role: user.role,
            logout_dialog: snapshot.show_logout_dialog,
        },
    }
}

/// One entry in a dashboard's side navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub id: &'static str,
    pub label: &'static str,
}

const fn item(id: &'static str, label: &'static str) -> NavItem {
    NavItem { id, label }
}

const STUDENT_NAV: &[NavItem] = &[
    item("dashboard", "Dashboard"),
    item("upload", "Upload Files"),
    item("feedback", "Feedback"),
    item("repository", "Repository"),
    item("settings", "Settings"),
];

const FACULTY_NAV: &[NavItem] = &[
    item("dashboard", "Dashboard"),
    item("submissions", "Submissions"),
    item("feedback", "Feedback"),
    item("repository", "Repository"),
    item("settings", "Settings"),
];

const ADMIN_NAV: &[NavItem] = &[
    item("dashboard", "Dashboard"),
    item("users", "User Management"),
    item("projects", "Projects"),
    item("system", "System Health"),
    item("activity", "Activity Logs"),
    item("settings", "System Settings"),
];

pub fn nav_items(role: Role) -> &'static [NavItem] {
    match role {
        Role::Student => STUDENT_NAV,
        Role::Faculty => FACULTY_NAV,
        Role::Admin => ADMIN_NAV,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DemoAccounts, SessionPhase};

    fn snapshot(role: Option<Role>) -> SessionSnapshot {
        let accounts = DemoAccounts::default();
        SessionSnapshot {
            user: role.map(|r| accounts.identity(r).clone()),
            is_loading: false,
            is_logging_out: false,
            show_logout_dialog: false,
            phase: if role.is_some() {
                SessionPhase::Authenticated
            } else {
                SessionPhase::Anonymous
            },
        }
    }

    #[test]
    fn test_anonymous_routes_to_login() {
        assert_eq!(route(&snapshot(None)), Route::Login { signing_in: false });
    }

    #[test]
    fn test_loading_overlays_login() {
        let mut s = snapshot(None);
        s.is_loading = true;
        assert_eq!(route(&s), Route::Login { signing_in: true });
    }

    #[test]
    fn test_role_dashboards() {
        for role in Role::ALL {
            assert_eq!(
                route(&snapshot(Some(role))),
                Route::Dashboard {
                    role,
                    logout_dialog: false
                }
            );
        }
    }

    #[test]
    fn test_dialog_overlay() {
        let mut s = snapshot(Some(Role::Faculty));
        s.show_logout_dialog = true;
        assert_eq!(
            route(&s),
            Route::Dashboard {
                role: Role::Faculty,
                logout_dialog: true
            }
        );
    }

    #[test]
    fn test_signing_out_takes_priority_over_user() {
        let mut s = snapshot(Some(Role::Admin));
        s.is_logging_out = true;
        assert_eq!(route(&s), Route::SigningOut);
    }

    #[test]
    fn test_nav_items_start_with_dashboard() {
        for role in Role::ALL {
            assert_eq!(nav_items(role)[0].id, "dashboard");
        }
        assert_eq!(nav_items(Role::Admin).len(), 6);
        assert_eq!(nav_items(Role::Faculty)[1].label, "Submissions");
        assert_eq!(nav_items(Role::Student)[1].label, "Upload Files");
    }
}
