//! Canned demo accounts.
//!
//! Demo mode accepts any credentials, but these three accounts map to fixed
//! identities and can be filled into the login form with a single key.

use super::models::{Role, UserIdentity};

/// Name given to a synthesized identity when the email has no local part.
pub const FALLBACK_NAME: &str = "Demo User";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoAccount {
    pub email: String,
    pub password: String,
    pub identity: UserIdentity,
}

/// The demo account table, one account per role.
#[derive(Debug, Clone)]
pub struct DemoAccounts {
    student: DemoAccount,
    faculty: DemoAccount,
    admin: DemoAccount,
}

impl Default for DemoAccounts {
    fn default() -> Self {
        Self {
            student: DemoAccount {
                email: "student@uc.edu.ph".to_string(),
                password: "student123".to_string(),
                identity: UserIdentity {
                    id: "1".to_string(),
                    name: "John Smith".to_string(),
                    email: "student@uc.edu.ph".to_string(),
                    role: Role::Student,
                    department: "Computer Science".to_string(),
                    student_id: Some("ST001".to_string()),
                    permissions: None,
                },
            },
            faculty: DemoAccount {
                email: "faculty@uc.edu.ph".to_string(),
                password: "faculty123".to_string(),
                identity: UserIdentity {
                    id: "3".to_string(),
                    name: "Dr. Sarah Wilson".to_string(),
                    email: "faculty@uc.edu.ph".to_string(),
                    role: Role::Faculty,
                    department: "Computer Science".to_string(),
                    student_id: None,
                    permissions: None,
                },
            },
            admin: DemoAccount {
                email: "admin@uc.edu.ph".to_string(),
                password: "admin123".to_string(),
                identity: UserIdentity {
                    id: "5".to_string(),
                    name: "Maria Santos".to_string(),
                    email: "admin@uc.edu.ph".to_string(),
                    role: Role::Admin,
                    department: "IT Administration".to_string(),
                    student_id: None,
                    permissions: Some(
                        ["user_management", "system_settings", "reports", "data_export"]
                            .iter()
                            .map(|p| p.to_string())
                            .collect(),
                    ),
                },
            },
        }
    }
}

impl DemoAccounts {
    pub fn account(&self, role: Role) -> &DemoAccount {
        match role {
            Role::Student => &self.student,
            Role::Faculty => &self.faculty,
            Role::Admin => &self.admin,
        }
    }

    pub fn identity(&self, role: Role) -> &UserIdentity {
        &self.account(role).identity
    }

    /// Builds a student identity for an email that matched no role rule.
    ///
    /// The demo student's record is reused with the email replaced and the
    /// name taken from the part before `@`.
    ///
    /// # Examples
    ///
    /// ```
    /// use captrack::domain::{DemoAccounts, Role};
    ///
    /// let accounts = DemoAccounts::default();
    /// let user = accounts.synthesize_student("jane.doe@example.com");
    /// assert_eq!(user.role, Role::Student);
    /// assert_eq!(user.name, "jane.doe");
    /// assert_eq!(user.email, "jane.doe@example.com");
    /// ```
    pub fn synthesize_student(&self, email: &str) -> UserIdentity {
        let local_part = email.split('@').next().unwrap_or_default();
        let name = if local_part.is_empty() {
            FALLBACK_NAME.to_string()
        } else {
            local_part.to_string()
        };

        UserIdentity {
            name,
            email: email.to_string(),
            ..self.student.identity.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accounts_match_their_roles() {
        let accounts = DemoAccounts::default();
        for role in Role::ALL {
            let account = accounts.account(role);
            assert_eq!(account.identity.role, role);
            assert_eq!(account.identity.email, account.email);
        }
    }

    #[test]
    fn test_admin_permissions() {
        let accounts = DemoAccounts::default();
        let admin = accounts.identity(Role::Admin);
        assert!(admin.has_permission("user_management"));
        assert!(admin.has_permission("data_export"));
        assert!(accounts.identity(Role::Faculty).permissions.is_none());
    }

    #[test]
    fn test_synthesize_student_keeps_student_record() {
        let accounts = DemoAccounts::default();
        let user = accounts.synthesize_student("someone@example.org");
        assert_eq!(user.id, "1");
        assert_eq!(user.student_id.as_deref(), Some("ST001"));
        assert_eq!(user.department, "Computer Science");
        assert_eq!(user.name, "someone");
    }

    #[test]
    fn test_synthesize_student_empty_local_part() {
        let accounts = DemoAccounts::default();
        assert_eq!(accounts.synthesize_student("@example.org").name, FALLBACK_NAME);
        assert_eq!(accounts.synthesize_student("").name, FALLBACK_NAME);
    }

    #[test]
    fn test_synthesize_student_without_at_sign() {
        let accounts = DemoAccounts::default();
        let user = accounts.synthesize_student("plainname");
        assert_eq!(user.name, "plainname");
        assert_eq!(user.email, "plainname");
    }
}
