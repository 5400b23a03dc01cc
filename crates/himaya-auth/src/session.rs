use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from login and authorization checks.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("User {username} is not allowed to access wilaya {wilaya_id}")]
    Forbidden { username: String, wilaya_id: String },

    #[error("Operation requires the admin role")]
    AdminRequired,
}

/// Account role. Admins see every wilaya; users see only their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

/// An authenticated session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub username: String,
    pub role: Role,
    /// Set for `Role::User` sessions; the only wilaya they may touch.
    pub wilaya_id: Option<String>,
}

impl Session {
    /// Whether this session may read or write records for the wilaya.
    pub fn can_access(&self, wilaya_id: &str) -> bool {
        match self.role {
            Role::Admin => true,
            Role::User => self.wilaya_id.as_deref() == Some(wilaya_id),
        }
    }

    /// Fail with `AuthError::Forbidden` unless the session may touch the
    /// wilaya.
    pub fn ensure_can_access(&self, wilaya_id: &str) -> Result<(), AuthError> {
        if self.can_access(wilaya_id) {
            Ok(())
        } else {
            Err(AuthError::Forbidden {
                username: self.username.clone(),
                wilaya_id: wilaya_id.to_string(),
            })
        }
    }

    /// Fail unless the session holds the admin role.
    pub fn ensure_admin(&self) -> Result<(), AuthError> {
        match self.role {
            Role::Admin => Ok(()),
            Role::User => Err(AuthError::AdminRequired),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_session(wilaya_id: &str) -> Session {
        Session {
            username: "adrar".into(),
            role: Role::User,
            wilaya_id: Some(wilaya_id.into()),
        }
    }

    #[test]
    fn admin_accesses_any_wilaya() {
        let s = Session {
            username: "admin".into(),
            role: Role::Admin,
            wilaya_id: None,
        };
        assert!(s.can_access("01"));
        assert!(s.can_access("58"));
        assert!(s.ensure_admin().is_ok());
    }

    #[test]
    fn user_is_restricted_to_own_wilaya() {
        let s = user_session("01");
        assert!(s.can_access("01"));
        assert!(!s.can_access("02"));
        assert!(s.ensure_can_access("01").is_ok());
        assert_eq!(
            s.ensure_can_access("02"),
            Err(AuthError::Forbidden {
                username: "adrar".into(),
                wilaya_id: "02".into(),
            })
        );
    }

    #[test]
    fn user_without_wilaya_accesses_nothing() {
        let s = Session {
            username: "orphan".into(),
            role: Role::User,
            wilaya_id: None,
        };
        assert!(!s.can_access("01"));
    }

    #[test]
    fn user_cannot_pass_admin_gate() {
        assert_eq!(user_session("01").ensure_admin(), Err(AuthError::AdminRequired));
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
    }
}
