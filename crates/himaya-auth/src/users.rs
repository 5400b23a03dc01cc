use sha2::{Digest, Sha256};

use crate::session::{AuthError, Role, Session};

/// A seeded account. Passwords are stored as lowercase hex SHA-256 digests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub username: String,
    pub password_hash: String,
    pub role: Role,
    pub wilaya_id: Option<String>,
}

/// Hex SHA-256 of a password.
pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// The static credential list. Add accounts here as wilayas come online.
pub fn seed_users() -> Vec<User> {
    vec![
        User {
            username: "admin".into(),
            // dgpc2024
            password_hash: "a42aed2b3ced1b079e723ff8f0bf2e7cbed4c338a049490420dec4d28f74347c"
                .into(),
            role: Role::Admin,
            wilaya_id: None,
        },
        User {
            username: "adrar".into(),
            // adrar2024
            password_hash: "8bcbf56df5cae3da63e27ba9e7a8e06fb3f23cec1acb1c76ed3bb691b7816363"
                .into(),
            role: Role::User,
            wilaya_id: Some("01".into()),
        },
    ]
}

/// Match a username/password pair against the account list.
pub fn login(users: &[User], username: &str, password: &str) -> Result<Session, AuthError> {
    let candidate = hash_password(password);
    users
        .iter()
        .find(|u| u.username == username && u.password_hash == candidate)
        .map(|u| Session {
            username: u.username.clone(),
            role: u.role,
            wilaya_id: u.wilaya_id.clone(),
        })
        .ok_or(AuthError::InvalidCredentials)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_stable_hex_sha256() {
        assert_eq!(
            hash_password("dgpc2024"),
            "a42aed2b3ced1b079e723ff8f0bf2e7cbed4c338a049490420dec4d28f74347c"
        );
    }

    #[test]
    fn admin_login_succeeds() {
        let session = login(&seed_users(), "admin", "dgpc2024").unwrap();
        assert_eq!(session.role, Role::Admin);
        assert_eq!(session.wilaya_id, None);
    }

    #[test]
    fn wilaya_account_carries_its_wilaya() {
        let session = login(&seed_users(), "adrar", "adrar2024").unwrap();
        assert_eq!(session.role, Role::User);
        assert_eq!(session.wilaya_id.as_deref(), Some("01"));
    }

    #[test]
    fn wrong_password_is_rejected() {
        assert_eq!(
            login(&seed_users(), "admin", "wrong"),
            Err(AuthError::InvalidCredentials)
        );
    }

    #[test]
    fn unknown_user_is_rejected() {
        assert_eq!(
            login(&seed_users(), "nobody", "dgpc2024"),
            Err(AuthError::InvalidCredentials)
        );
    }
}
