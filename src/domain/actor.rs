use crate::error::{CardError, Result};
use serde::Deserialize;
use std::fmt;

#[derive(Debug, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    Manager,
    Employee,
    #[default]
    User,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Manager => "MANAGER",
            Role::Employee => "EMPLOYEE",
            Role::User => "USER",
        }
    }

    /// Admins and managers review applications and see everyone's cards.
    pub fn is_reviewer(self) -> bool {
        matches!(self, Role::Admin | Role::Manager)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The authenticated user a workflow call is made on behalf of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user: u32,
    pub role: Role,
}

impl Actor {
    pub fn new(user: u32, role: Role) -> Self {
        Self { user, role }
    }

    pub fn require_reviewer(&self, action: &'static str) -> Result<()> {
        if self.role.is_reviewer() {
            Ok(())
        } else {
            Err(self.denied(action))
        }
    }

    pub fn require_admin(&self, action: &'static str) -> Result<()> {
        if self.role == Role::Admin {
            Ok(())
        } else {
            Err(self.denied(action))
        }
    }

    /// Reviewers may see any application, everyone else only their own.
    pub fn can_view(&self, owner: u32) -> bool {
        self.role.is_reviewer() || self.user == owner
    }

    fn denied(&self, action: &'static str) -> CardError {
        CardError::PermissionDenied {
            role: self.role.to_string(),
            action,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reviewer_roles() {
        assert!(Role::Admin.is_reviewer());
        assert!(Role::Manager.is_reviewer());
        assert!(!Role::Employee.is_reviewer());
        assert!(!Role::User.is_reviewer());
    }

    #[test]
    fn test_require_admin() {
        assert!(Actor::new(1, Role::Admin).require_admin("delete").is_ok());
        let err = Actor::new(1, Role::Manager)
            .require_admin("delete")
            .unwrap_err();
        assert_eq!(err.to_string(), "Role MANAGER is not allowed to delete");
    }

    #[test]
    fn test_can_view() {
        let user = Actor::new(5, Role::User);
        assert!(user.can_view(5));
        assert!(!user.can_view(6));
        assert!(Actor::new(1, Role::Manager).can_view(6));
    }

    #[test]
    fn test_role_deserialization() {
        let role: Role = serde_json::from_str("\"MANAGER\"").unwrap();
        assert_eq!(role, Role::Manager);
    }
}
