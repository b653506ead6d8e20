//! Ordered email-to-role rules.
//!
//! Rules are checked top to bottom and the first rule with a matching
//! predicate decides the role. The order is part of the contract: an email
//! such as `student-admin@x.com` resolves to the student role because the
//! student rule comes first.

use super::accounts::DemoAccounts;
use super::models::Role;

/// A single predicate over an email address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailMatcher {
    /// Case-sensitive equality with the whole address.
    Exact(String),
    /// Keyword found anywhere in the lowercased address.
    Contains(String),
}

impl EmailMatcher {
    pub fn contains(keyword: &str) -> Self {
        EmailMatcher::Contains(keyword.to_lowercase())
    }

    fn matches(&self, email: &str, lowered: &str) -> bool {
        match self {
            EmailMatcher::Exact(address) => email == address,
            EmailMatcher::Contains(keyword) => lowered.contains(keyword.as_str()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleRule {
    pub role: Role,
    pub matchers: Vec<EmailMatcher>,
}

impl RoleRule {
    pub fn new(role: Role, matchers: Vec<EmailMatcher>) -> Self {
        Self { role, matchers }
    }
}

/// First-match-wins rule list.
///
/// # Examples
///
/// ```
/// use captrack::domain::{DemoAccounts, Role, RoleRules};
///
/// let rules = RoleRules::demo(&DemoAccounts::default());
/// assert_eq!(rules.resolve("Prof.Lee@uni.edu"), Some(Role::Faculty));
/// assert_eq!(rules.resolve("student-admin@x.com"), Some(Role::Student));
/// assert_eq!(rules.resolve("someone@x.com"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleRules {
    rules: Vec<RoleRule>,
}

impl RoleRules {
    pub fn new(rules: Vec<RoleRule>) -> Self {
        Self { rules }
    }

    /// The demo rule set: student, then faculty, then admin.
    pub fn demo(accounts: &DemoAccounts) -> Self {
        let exact = |role| EmailMatcher::Exact(accounts.account(role).email.clone());
        Self::new(vec![
            RoleRule::new(
                Role::Student,
                vec![exact(Role::Student), EmailMatcher::contains("student")],
            ),
            RoleRule::new(
                Role::Faculty,
                vec![
                    exact(Role::Faculty),
                    EmailMatcher::contains("faculty"),
                    EmailMatcher::contains("teacher"),
                    EmailMatcher::contains("prof"),
                ],
            ),
            RoleRule::new(
                Role::Admin,
                vec![
                    exact(Role::Admin),
                    EmailMatcher::contains("admin"),
                    EmailMatcher::contains("administrator"),
                ],
            ),
        ])
    }

    pub fn rules(&self) -> &[RoleRule] {
        &self.rules
    }

    /// Returns the role of the first rule that matches, if any.
    pub fn resolve(&self, email: &str) -> Option<Role> {
        let lowered = email.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matchers.iter().any(|m| m.matches(email, &lowered)))
            .map(|rule| rule.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo() -> RoleRules {
        RoleRules::demo(&DemoAccounts::default())
    }

    #[test]
    fn test_demo_rule_order() {
        let roles: Vec<Role> = demo().rules().iter().map(|r| r.role).collect();
        assert_eq!(roles, vec![Role::Student, Role::Faculty, Role::Admin]);
    }

    #[test]
    fn test_exact_demo_emails() {
        let rules = demo();
        assert_eq!(rules.resolve("student@uc.edu.ph"), Some(Role::Student));
        assert_eq!(rules.resolve("faculty@uc.edu.ph"), Some(Role::Faculty));
        assert_eq!(rules.resolve("admin@uc.edu.ph"), Some(Role::Admin));
    }

    #[test]
    fn test_student_keyword_is_case_insensitive() {
        let rules = demo();
        assert_eq!(rules.resolve("STUDENT.one@school.edu"), Some(Role::Student));
        assert_eq!(rules.resolve("my-Student-acct@x.com"), Some(Role::Student));
    }

    #[test]
    fn test_faculty_keywords() {
        let rules = demo();
        assert_eq!(rules.resolve("teacher@x.com"), Some(Role::Faculty));
        assert_eq!(rules.resolve("prof.kim@x.com"), Some(Role::Faculty));
        assert_eq!(rules.resolve("Faculty.Member@x.com"), Some(Role::Faculty));
    }

    #[test]
    fn test_admin_keywords() {
        let rules = demo();
        assert_eq!(rules.resolve("admin@x.com"), Some(Role::Admin));
        assert_eq!(rules.resolve("administrator@x.com"), Some(Role::Admin));
        assert_eq!(rules.resolve("SysAdmin@x.com"), Some(Role::Admin));
    }

    #[test]
    fn test_first_match_wins() {
        let rules = demo();
        assert_eq!(rules.resolve("student-admin@x.com"), Some(Role::Student));
        assert_eq!(rules.resolve("student.teacher@x.com"), Some(Role::Student));
        assert_eq!(rules.resolve("prof.admin@x.com"), Some(Role::Faculty));
        assert_eq!(rules.resolve("faculty-student@x.com"), Some(Role::Student));
    }

    #[test]
    fn test_keyword_in_domain_counts() {
        assert_eq!(demo().resolve("jane@admin.example.com"), Some(Role::Admin));
    }

    #[test]
    fn test_no_match() {
        let rules = demo();
        assert_eq!(rules.resolve("jane.doe@example.com"), None);
        assert_eq!(rules.resolve(""), None);
    }

    #[test]
    fn test_exact_match_is_case_sensitive_but_keyword_still_applies() {
        let rules = RoleRules::new(vec![RoleRule::new(
            Role::Admin,
            vec![EmailMatcher::Exact("Root@x.com".to_string())],
        )]);
        assert_eq!(rules.resolve("Root@x.com"), Some(Role::Admin));
        assert_eq!(rules.resolve("root@x.com"), None);
    }

    #[test]
    fn test_custom_rule_order_is_respected() {
        let rules = RoleRules::new(vec![
            RoleRule::new(Role::Admin, vec![EmailMatcher::contains("ADMIN")]),
            RoleRule::new(Role::Student, vec![EmailMatcher::contains("student")]),
        ]);
        assert_eq!(rules.resolve("student-admin@x.com"), Some(Role::Admin));
    }
}
